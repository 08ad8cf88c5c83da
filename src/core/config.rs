//! Engine configuration loaded from TOML
//!
//! Every section falls back to its default when omitted, so an empty file is a
//! valid configuration. The banding table in particular is a policy choice
//! and is expected to be tuned per alliance.

use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::categorize::{default_bands, Band};
use crate::core::error::{AidError, Result};
use crate::core::types::{AllianceId, HIGHEST_PRIORITY, LOWEST_PRIORITY};

/// Total slot ceilings per nation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityLimits {
    /// Slot ceiling for ordinary nations
    pub standard_limit: u8,
    /// Slot ceiling for nations with the expanded-capacity (DRA) flag
    pub expanded_limit: u8,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            standard_limit: 5,
            expanded_limit: 6,
        }
    }
}

impl CapacityLimits {
    pub fn limit_for(&self, expanded: bool) -> u8 {
        if expanded {
            self.expanded_limit
        } else {
            self.standard_limit
        }
    }
}

/// Matching policy switches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Let internal recommendations consume an unused external slot once the
    /// tracked slot of that type is exhausted. Off unless explicitly enabled.
    pub allow_external_fallback: bool,
}

/// Link from one alliance to the alliance that absorbs its overflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossGroupLink {
    pub group: AllianceId,
    pub linked: AllianceId,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub capacity: CapacityLimits,
    pub policy: PolicyConfig,
    /// Categorization bands, evaluated in order; first match wins
    pub bands: Vec<Band>,
    pub cross_group: Vec<CrossGroupLink>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityLimits::default(),
            policy: PolicyConfig::default(),
            bands: default_bands(),
            cross_group: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a TOML configuration string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(AidError::InvalidConfig)?;
        Ok(config)
    }

    /// The enabled linked alliance for `group`, if any
    pub fn linked_group(&self, group: AllianceId) -> Option<AllianceId> {
        self.cross_group
            .iter()
            .find(|link| link.group == group && link.enabled)
            .map(|link| link.linked)
    }

    pub fn with_link(mut self, group: AllianceId, linked: AllianceId) -> Self {
        self.cross_group.push(CrossGroupLink {
            group,
            linked,
            enabled: true,
        });
        self
    }

    pub fn with_external_fallback(mut self, allow: bool) -> Self {
        self.policy.allow_external_fallback = allow;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let limits = &self.capacity;
        if limits.standard_limit == 0 {
            return Err("standard_limit must be at least 1".into());
        }
        if limits.expanded_limit < limits.standard_limit {
            return Err(format!(
                "expanded_limit ({}) should be >= standard_limit ({})",
                limits.expanded_limit, limits.standard_limit
            ));
        }

        for band in &self.bands {
            for (template, limit, label) in [
                (&band.standard, limits.standard_limit, "standard"),
                (&band.expanded, limits.expanded_limit, "expanded"),
            ] {
                if template.total() > limit as u32 {
                    return Err(format!(
                        "band '{}' {} template uses {} slots, limit is {}",
                        band.name,
                        label,
                        template.total(),
                        limit
                    ));
                }
                for priority in [template.send_priority, template.receive_priority] {
                    if !(HIGHEST_PRIORITY..=LOWEST_PRIORITY).contains(&priority) {
                        return Err(format!(
                            "band '{}' has priority {} outside {}..={}",
                            band.name, priority, HIGHEST_PRIORITY, LOWEST_PRIORITY
                        ));
                    }
                }
            }
        }

        let mut linked_groups = AHashSet::new();
        for link in &self.cross_group {
            if link.group == link.linked {
                return Err(format!("alliance {} cannot be linked to itself", link.group));
            }
            if !linked_groups.insert(link.group) {
                return Err(format!("alliance {} has more than one cross-group link", link.group));
            }
        }

        Ok(())
    }
}
