//! Coordinator - fetch a snapshot through the providers and run the engine

mod service;

pub use service::{recommend_for_group, recommend_for_groups};
