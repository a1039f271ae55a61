//! Script-backed mutation runtime.
//!
//! Every multi-document mutation in the crate is one Lua script execution:
//! the script runs atomically against the keyspace, which gives the
//! read-check-write serialization the data model's counters depend on.

pub mod commands;
pub mod executor;
pub mod scripts;

pub use commands::EngagementCommand;
pub use executor::{execute, parse_script_response};
