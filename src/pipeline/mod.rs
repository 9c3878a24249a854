//! Bounded probe pipeline
//!
//! This module reads candidate lines, admits at most a fixed number of
//! probes at a time and waits for every dispatched probe before a run ends.

pub mod dispatcher;

// Re-export commonly used items
pub use dispatcher::{Dispatcher, RunSummary};
