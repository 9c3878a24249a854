use std::fmt;

/// Errors that stop a urlpulse run before or while it starts up.
///
/// Failures of individual candidates and probes are not represented here;
/// they are values (`TargetError`, `DropReason`) that never abort a run.
#[derive(Debug)]
pub enum UrlPulseError {
    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Input file could not be opened
    InputOpen {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for UrlPulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlPulseError::Config(msg) => write!(f, "Configuration error: {msg}"),
            UrlPulseError::Http(err) => write!(f, "HTTP error: {err}"),
            UrlPulseError::InputOpen { path, source } => {
                write!(f, "failed to open file '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for UrlPulseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UrlPulseError::Http(err) => Some(err),
            UrlPulseError::InputOpen { source, .. } => Some(source),
            UrlPulseError::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for UrlPulseError {
    fn from(err: reqwest::Error) -> Self {
        UrlPulseError::Http(err)
    }
}

/// Type alias for Results using UrlPulseError
pub type Result<T> = std::result::Result<T, UrlPulseError>;
