//! Alliance Aid - nation categorization and aid recommendation engine

pub mod capacity;
pub mod categorize;
pub mod coordinator;
pub mod core;
pub mod model;
pub mod recommend;
pub mod report;
pub mod snapshot;
