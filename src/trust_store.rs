// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Trust Store
 * Process-wide credential to (host, subject) mapping
 *
 * One store replaces the per-framework jwtStore/oauthStore/sessionStore
 * globals of the source corpus. Last writer wins, entries live for the
 * process lifetime, no expiry - a demonstration store, not a cache.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use dashmap::DashMap;
use tracing::debug;

/// What a credential was last seen vouching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustEntry {
    pub host: String,
    pub subject: String,
}

/// Concurrency-safe mapping from opaque credential string to trust entry.
#[derive(Debug, Default)]
pub struct TrustStore {
    entries: DashMap<String, TrustEntry>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Associate a credential with a host and subject. Overwrites any
    /// previous association for the same credential.
    pub fn put(&self, key: &str, host: &str, subject: &str) {
        debug!("trust store: {} -> host={} subject={}", key, host, subject);
        self.entries.insert(
            key.to_string(),
            TrustEntry {
                host: host.to_string(),
                subject: subject.to_string(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<TrustEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
