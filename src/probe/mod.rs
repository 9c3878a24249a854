//! Probing of single targets
//!
//! This module builds the shared HTTP client, sends one request per
//! target and measures the response body.

pub mod analyzer;
pub mod client;
pub mod prober;

// Re-export commonly used items
pub use analyzer::BodyAnalysis;
pub use client::build_client;
pub use prober::{HttpProber, Probe, ProbeSettings};
