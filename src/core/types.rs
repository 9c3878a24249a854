use std::fmt;

use url::Url;

use crate::core::constants::{SUPPORTED_SCHEMES, output};

/// A candidate line that parsed into a probeable URL.
///
/// Owned by the probe task that is dispatched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    url: Url,
}

/// Reasons a candidate line is skipped before any probe is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Line is empty or only whitespace
    Empty,
    /// Text is not an absolute URL
    Malformed(url::ParseError),
    /// Scheme cannot be probed over HTTP
    UnsupportedScheme(String),
    /// URL has no host to connect to
    MissingHost,
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::Malformed(err) => write!(f, "malformed URL: {err}"),
            Self::UnsupportedScheme(scheme) => write!(f, "unsupported scheme '{scheme}'"),
            Self::MissingHost => write!(f, "URL has no host"),
        }
    }
}

impl std::error::Error for TargetError {}

impl ProbeTarget {
    /// Parse one candidate line into a target.
    ///
    /// # Examples
    /// ```
    /// use urlpulse::core::types::ProbeTarget;
    ///
    /// let target = ProbeTarget::parse("  https://example.com/login  ").unwrap();
    /// assert_eq!(target.as_str(), "https://example.com/login");
    /// assert!(ProbeTarget::parse("example.com").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TargetError::Empty);
        }

        let url = Url::parse(raw).map_err(TargetError::Malformed)?;
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(TargetError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(TargetError::MissingHost);
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// A response that made it through the analyzer.
///
/// This is the unit handed to the filter and the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub status_code: u16,
    /// Decoded characters read from the body, or the declared length when
    /// analysis was skipped
    pub adjusted_size: u64,
    /// Number of space-separated tokens in the bytes read
    pub word_count: usize,
    /// Content-Type header with all whitespace removed
    pub content_type: String,
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let content_type = if self.content_type.is_empty() {
            output::MISSING_CONTENT_TYPE
        } else {
            &self.content_type
        };
        let sep = output::FIELD_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.status_code, self.adjusted_size, self.word_count, content_type, self.url
        )
    }
}

/// Why a dispatched probe produced no result.
#[derive(Debug)]
pub enum DropReason {
    /// Configured method is not a valid HTTP method
    InvalidMethod(String),
    /// Request could not be built for the target
    InvalidRequest(reqwest::Error),
    /// Connect, DNS, TLS or timeout failure
    Transport(reqwest::Error),
    /// Probe task panicked
    Panicked(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMethod(method) => write!(f, "invalid method '{method}'"),
            Self::InvalidRequest(err) => write!(f, "invalid request: {err}"),
            Self::Transport(err) => {
                let detail = std::error::Error::source(err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                if err.is_timeout() {
                    write!(f, "timed out: {detail}")
                } else {
                    write!(f, "transport error: {detail}")
                }
            }
            Self::Panicked(msg) => write!(f, "probe task panicked: {msg}"),
        }
    }
}

/// Outcome of one dispatched probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Analyzed(ProbeResult),
    Dropped(DropReason),
}

impl ProbeOutcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, Self::Analyzed(_))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn result(content_type: &str) -> ProbeResult {
        ProbeResult {
            url: "http://some-domain.com/".to_string(),
            status_code: 200,
            adjusted_size: 12,
            word_count: 3,
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_parse__valid_urls() {
        let target = ProbeTarget::parse("http://example.com").unwrap();
        assert_eq!(target.as_str(), "http://example.com/");

        let target = ProbeTarget::parse("https://example.com:8443/a?b=c").unwrap();
        assert_eq!(target.url().port(), Some(8443));
        assert_eq!(target.url().query(), Some("b=c"));
    }

    #[test]
    fn test_parse__trims_whitespace() {
        let target = ProbeTarget::parse("\t https://example.com/x \r").unwrap();
        assert_eq!(target.as_str(), "https://example.com/x");
    }

    #[test]
    fn test_parse__empty_line() {
        assert_eq!(ProbeTarget::parse(""), Err(TargetError::Empty));
        assert_eq!(ProbeTarget::parse("   "), Err(TargetError::Empty));
    }

    #[test]
    fn test_parse__no_scheme() {
        assert!(matches!(
            ProbeTarget::parse("example.com/path"),
            Err(TargetError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse__incomplete_url() {
        assert!(ProbeTarget::parse("http://").is_err());
        assert!(ProbeTarget::parse("https://[invalid").is_err());
    }

    #[test]
    fn test_parse__unsupported_scheme() {
        assert_eq!(
            ProbeTarget::parse("ftp://example.com/file"),
            Err(TargetError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            ProbeTarget::parse("mailto:someone@example.com"),
            Err(TargetError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_target_error_display() {
        assert_eq!(TargetError::Empty.to_string(), "empty line");
        assert_eq!(
            TargetError::UnsupportedScheme("ftp".to_string()).to_string(),
            "unsupported scheme 'ftp'"
        );
        assert_eq!(TargetError::MissingHost.to_string(), "URL has no host");
    }

    #[test]
    fn test_probe_result__to_string() {
        assert_eq!(
            result("text/html;charset=utf-8").to_string(),
            "200 12 3 text/html;charset=utf-8 http://some-domain.com/"
        );
    }

    #[test]
    fn test_probe_result__to_string__missing_content_type() {
        assert_eq!(result("").to_string(), "200 12 3 - http://some-domain.com/");
    }

    #[test]
    fn test_drop_reason_display() {
        assert_eq!(
            DropReason::InvalidMethod("GE T".to_string()).to_string(),
            "invalid method 'GE T'"
        );
        assert!(
            DropReason::Panicked("boom".to_string())
                .to_string()
                .contains("boom")
        );
    }

    #[test]
    fn test_probe_outcome_is_analyzed() {
        assert!(ProbeOutcome::Analyzed(result("")).is_analyzed());
        assert!(!ProbeOutcome::Dropped(DropReason::InvalidMethod("x".to_string())).is_analyzed());
    }
}
