//! Application-wide constants to avoid magic values throughout the codebase.
//!
//! This module centralizes the defaults of a probe run, the filter bounds
//! and the output conventions so they can be tuned in one place.

/// Default run configuration values
pub mod defaults {
    /// Default HTTP method - HEAD skips the body and is the fastest probe
    pub const METHOD: &str = "HEAD";
    /// Default User-Agent header value
    pub const USER_AGENT: &str = "Mozilla";
    /// Default number of probes in flight at once
    pub const CONCURRENCY: usize = 50;
    /// Default delay after a probe before its slot is released (disabled)
    pub const DELAY_MS: u64 = 0;
    /// Default maximum number of body bytes to analyze
    pub const MAX_BODY_BYTES: u64 = 1_024_000;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
}

/// Limits enforced when validating configuration
pub mod limits {
    /// Upper bound for the concurrency ceiling
    pub const MAX_CONCURRENCY: usize = 10_000;
}

/// Status code bounds of the report filter
pub mod filter_bounds {
    /// Highest status code reported at the low end (inclusive)
    pub const REPORT_AT_OR_BELOW: u16 = 300;
    /// Lowest status code reported at the high end (inclusive)
    pub const REPORT_AT_OR_ABOVE: u16 = 500;
}

/// Output formatting constants
pub mod output {
    /// Field separator of a result line
    pub const FIELD_SEPARATOR: char = ' ';
    /// Placeholder printed when a response has no content type
    pub const MISSING_CONTENT_TYPE: &str = "-";
}

/// Configuration file discovery
pub mod config_files {
    /// Config file name looked up in the working directory and its parents
    pub const FILE_NAME: &str = ".urlpulse.toml";
    /// How many parent directories are searched
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}

/// URL schemes a probe can be sent to
pub const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];
