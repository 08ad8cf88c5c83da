//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for nations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationId(pub u64);

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for alliances (the matching groups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllianceId(pub u64);

impl fmt::Display for AllianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority rank for sending or receiving (1 = highest, 3 = lowest)
pub type Priority = u8;

pub const HIGHEST_PRIORITY: Priority = 1;
pub const LOWEST_PRIORITY: Priority = 3;

/// Resource carried by an aid offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Cash,
    Tech,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Cash => "cash",
            Resource::Tech => "tech",
        }
    }
}

/// Direction of an aid slot relative to the nation that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Send,
    Receive,
}

/// One of the four directional slot types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    SendCash,
    SendTech,
    GetCash,
    GetTech,
}

impl SlotKind {
    pub const ALL: [SlotKind; 4] = [
        SlotKind::SendCash,
        SlotKind::SendTech,
        SlotKind::GetCash,
        SlotKind::GetTech,
    ];

    pub fn new(resource: Resource, direction: Direction) -> Self {
        match (resource, direction) {
            (Resource::Cash, Direction::Send) => SlotKind::SendCash,
            (Resource::Tech, Direction::Send) => SlotKind::SendTech,
            (Resource::Cash, Direction::Receive) => SlotKind::GetCash,
            (Resource::Tech, Direction::Receive) => SlotKind::GetTech,
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            SlotKind::SendCash | SlotKind::GetCash => Resource::Cash,
            SlotKind::SendTech | SlotKind::GetTech => Resource::Tech,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            SlotKind::SendCash | SlotKind::SendTech => Direction::Send,
            SlotKind::GetCash | SlotKind::GetTech => Direction::Receive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::SendCash => "send cash",
            SlotKind::SendTech => "send tech",
            SlotKind::GetCash => "get cash",
            SlotKind::GetTech => "get tech",
        }
    }
}

/// Undirected pair of nations, stored with the smaller id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(NationId, NationId);

impl PairKey {
    pub fn new(a: NationId, b: NationId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn members(&self) -> (NationId, NationId) {
        (self.0, self.1)
    }
}
