//! urlpulse - probe large lists of URLs and report the live and broken ones
//!
//! Every input line is parsed into a target and probed with one HTTP
//! request. At most a fixed number of probes are in flight at once, and
//! only responses that pass the status filter are printed.

pub mod config;
pub mod core;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod ui;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use crate::core::{
    DropReason, ProbeOutcome, ProbeResult, ProbeTarget, Result, TargetError, UrlPulseError,
};
pub use pipeline::{Dispatcher, RunSummary};
pub use probe::{HttpProber, Probe, ProbeSettings};
pub use report::{LineReporter, Report};
