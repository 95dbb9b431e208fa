// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request Context Collaborator Interface
//!
//! CDI scopes, ThreadLocals, HttpSessions, Struts value stacks and Play
//! request-args all boil down to one capability: set/get a string keyed by
//! a fixed name for the current logical request. Framework adapters
//! implement this trait outside the crate; `InMemoryContext` is the adapter
//! the demo binary and tests use.

use std::collections::HashMap;
use std::sync::Mutex;

pub const POLLUTED_HOST: &str = "polluted_host";
pub const USER_AGENT: &str = "user_agent";
pub const REQUEST_TIME: &str = "request_time";
pub const SESSION_ID: &str = "session_id";

/// The fixed keys the reset-link builder reads, in the order they appear
/// as extra claims.
pub const CONTEXT_KEYS: [&str; 4] = [POLLUTED_HOST, USER_AGENT, REQUEST_TIME, SESSION_ID];

pub trait RequestContext: Send + Sync {
    fn set(&self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<String>;
}

/// Snapshot the fixed context keys in order, skipping absent ones.
pub fn snapshot(ctx: &dyn RequestContext) -> Vec<(String, String)> {
    CONTEXT_KEYS
        .iter()
        .filter_map(|key| ctx.get(key).map(|value| (key.to_string(), value)))
        .collect()
}

/// Mutex-guarded map standing in for whatever the framework provides.
#[derive(Debug, Default)]
pub struct InMemoryContext {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryContext {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl RequestContext for InMemoryContext {
    fn set(&self, key: &str, value: String) {
        self.values
            .lock()
            .expect("context mutex poisoned")
            .insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("context mutex poisoned")
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let ctx = InMemoryContext::new();
        ctx.set(POLLUTED_HOST, "victim.com".to_string());
        ctx.set(POLLUTED_HOST, "evil.com".to_string());

        assert_eq!(ctx.get(POLLUTED_HOST), Some("evil.com".to_string()));
        assert_eq!(ctx.get(SESSION_ID), None);
    }

    #[test]
    fn test_snapshot_keeps_fixed_key_order() {
        let ctx = InMemoryContext::new();
        ctx.set(SESSION_ID, "sess-1".to_string());
        ctx.set(POLLUTED_HOST, "evil.com".to_string());

        let snap = snapshot(&ctx);
        assert_eq!(
            snap,
            vec![
                (POLLUTED_HOST.to_string(), "evil.com".to_string()),
                (SESSION_ID.to_string(), "sess-1".to_string()),
            ]
        );
    }
}
