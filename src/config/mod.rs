//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{config_files, defaults, limits, timeouts};
use crate::core::error::{Result, UrlPulseError};

/// Run configuration. Fixed at startup and shared read-only by every probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP method used for every probe
    pub method: Option<String>,

    /// User-Agent header sent with every probe
    pub user_agent: Option<String>,

    /// Maximum number of probes in flight
    pub concurrency: Option<usize>,

    /// Delay in milliseconds before a finished probe releases its slot
    pub delay: Option<u64>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Maximum number of body bytes read for analysis
    pub max_body_bytes: Option<u64>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Some(defaults::METHOD.to_string()),
            user_agent: Some(defaults::USER_AGENT.to_string()),
            concurrency: Some(defaults::CONCURRENCY),
            delay: Some(defaults::DELAY_MS),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            max_body_bytes: Some(defaults::MAX_BODY_BYTES),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, filling unset values with defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UrlPulseError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            UrlPulseError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validated by the caller once CLI overrides are merged
        Ok(config.with_defaults())
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Result<Self> {
        let candidates = std::iter::once(config_files::FILE_NAME.to_string()).chain(
            (1..=config_files::PARENT_SEARCH_DEPTH)
                .map(|i| format!("{}{}", "../".repeat(i), config_files::FILE_NAME)),
        );

        for path in candidates {
            if Path::new(&path).is_file() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Fill every unset value with its default
    fn with_defaults(self) -> Self {
        let fallback = Self::default();
        Self {
            method: self.method.or(fallback.method),
            user_agent: self.user_agent.or(fallback.user_agent),
            concurrency: self.concurrency.or(fallback.concurrency),
            delay: self.delay.or(fallback.delay),
            timeout: self.timeout.or(fallback.timeout),
            max_body_bytes: self.max_body_bytes.or(fallback.max_body_bytes),
            verbose: self.verbose.or(fallback.verbose),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Request shape
        if let Some(ref method) = cli_config.method {
            self.method = Some(method.clone());
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Pacing
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(delay) = cli_config.delay {
            self.delay = Some(delay);
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }

        // Output
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or(defaults::METHOD)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes.unwrap_or(defaults::MAX_BODY_BYTES)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get per-probe delay as Duration
    pub fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay.unwrap_or(defaults::DELAY_MS))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate method
        if let Some(ref method) = self.method {
            if method.trim().is_empty() {
                return Err(UrlPulseError::Config(
                    "Method cannot be empty. Expected an HTTP method such as HEAD or GET."
                        .to_string(),
                ));
            }
            if reqwest::Method::from_bytes(method.as_bytes()).is_err() {
                return Err(UrlPulseError::Config(format!(
                    "Method '{method}' is not a valid HTTP method."
                )));
            }
        }

        // Validate concurrency
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(UrlPulseError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > limits::MAX_CONCURRENCY {
                return Err(UrlPulseError::Config(format!(
                    "Concurrency of {concurrency} is extremely high and may exhaust file descriptors. Expected at most {}.",
                    limits::MAX_CONCURRENCY
                )));
            }
        }

        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(UrlPulseError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(UrlPulseError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        // Validate analysis budget
        if self.max_body_bytes == Some(0) {
            return Err(UrlPulseError::Config(
                "max_body_bytes cannot be 0. Expected a positive number of bytes.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Request shape
    pub method: Option<String>,     // --method
    pub user_agent: Option<String>, // --user-agent

    // Pacing
    pub concurrency: Option<usize>, // --concurrency
    pub delay: Option<u64>,         // --delay
    pub timeout: Option<u64>,       // --timeout

    // Output
    pub verbose: bool, // --verbose

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
