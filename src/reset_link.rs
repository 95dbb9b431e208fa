// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Reset-Link Builder
 * Deterministic concatenation of the outbound password-reset URL
 *
 * Values are passed through with no URL-encoding. Scanner test suites match
 * the emitted link byte-for-byte, so escaping anything here would change
 * the artifact under study.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

/// Builds reset links for one flow source (e.g. `jwt_bypass`).
#[derive(Debug, Clone)]
pub struct ResetLinkBuilder {
    source: String,
}

impl ResetLinkBuilder {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// `http://{host}/reset/{token}?from={source}&t={token}` followed by
    /// `&key=value` per extra claim, insertion order preserved, unescaped.
    pub fn build(
        &self,
        base_host: &str,
        token: &str,
        extra_claims: &[(String, String)],
    ) -> String {
        let mut url = format!(
            "http://{}/reset/{}?from={}&t={}",
            base_host, token, self.source, token
        );

        for (key, value) in extra_claims {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }

        url
    }
}
