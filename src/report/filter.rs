use crate::core::constants::filter_bounds;

/// Whether a status code is worth reporting.
///
/// Success, informational and the exact 300 code pass, as do all server
/// errors. Redirects above 300 and client errors are suppressed.
pub fn passes(status_code: u16) -> bool {
    status_code <= filter_bounds::REPORT_AT_OR_BELOW
        || status_code >= filter_bounds::REPORT_AT_OR_ABOVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_success_and_informational() {
        for code in [100, 101, 200, 204, 250, 299] {
            assert!(passes(code), "{code} should pass");
        }
    }

    #[test]
    fn test_passes_exactly_300() {
        assert!(passes(300));
        assert!(!passes(301));
    }

    #[test]
    fn test_drops_redirects_and_client_errors() {
        for code in [301, 302, 307, 308, 399, 400, 401, 404, 429, 499] {
            assert!(!passes(code), "{code} should be dropped");
        }
    }

    #[test]
    fn test_passes_server_errors() {
        for code in [500, 502, 503, 504, 599, 999] {
            assert!(passes(code), "{code} should pass");
        }
    }
}
