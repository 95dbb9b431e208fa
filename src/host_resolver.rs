// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Host Resolver
 * Resolves the trusted host for the current request from client headers
 *
 * This is the attack surface under study: X-Forwarded-Host wins over Host,
 * both are trusted verbatim, and no allow-list, trimming or format check is
 * applied. Hardening this function would erase the vulnerability class the
 * testbed exists to exhibit.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::RequestHeaders;
use tracing::debug;

pub const HOST: &str = "host";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Resolve the candidate host for the current request.
///
/// Precedence: non-empty `X-Forwarded-Host`, then non-empty `Host`, then the
/// caller-supplied fallback. Total function, no side effects.
pub fn resolve(headers: &RequestHeaders, fallback: &str) -> String {
    if let Some(forwarded) = headers.get(X_FORWARDED_HOST) {
        if !forwarded.is_empty() {
            debug!("resolved host from X-Forwarded-Host: {}", forwarded);
            return forwarded.to_string();
        }
    }

    if let Some(host) = headers.get(HOST) {
        if !host.is_empty() {
            debug!("resolved host from Host: {}", host);
            return host.to_string();
        }
    }

    debug!("no host header present, using fallback: {}", fallback);
    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_host_wins() {
        let headers = RequestHeaders::from_pairs([
            ("Host", "victim.com"),
            ("X-Forwarded-Host", "evil.com"),
        ]);

        assert_eq!(resolve(&headers, "localhost"), "evil.com");
    }

    #[test]
    fn test_host_used_without_forwarded() {
        let headers = RequestHeaders::from_pairs([("Host", "victim.com")]);

        assert_eq!(resolve(&headers, "localhost"), "victim.com");
    }

    #[test]
    fn test_empty_forwarded_host_falls_through() {
        let headers = RequestHeaders::from_pairs([
            ("Host", "victim.com"),
            ("X-Forwarded-Host", ""),
        ]);

        assert_eq!(resolve(&headers, "localhost"), "victim.com");
    }

    #[test]
    fn test_fallback_when_no_headers() {
        let headers = RequestHeaders::new();

        assert_eq!(resolve(&headers, "localhost"), "localhost");
    }

    #[test]
    fn test_value_is_returned_verbatim() {
        // Ports, whitespace and scheme-looking junk all pass through untouched
        let headers =
            RequestHeaders::from_pairs([("X-Forwarded-Host", " evil.com:8080/phish ")]);

        assert_eq!(resolve(&headers, "localhost"), " evil.com:8080/phish ");
    }
}
