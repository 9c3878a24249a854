//! Result filtering and reporting
//!
//! This module decides which probe results are worth showing and
//! writes them out as plain text lines.

pub mod filter;
pub mod reporter;

// Re-export commonly used items
pub use reporter::{LineReporter, Report};
