// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Token Mutator
 * Rewrites the trusted-host claim inside a credential
 *
 * The original signature segment is reattached byte-for-byte after the
 * payload changes. No re-signing occurs anywhere, which is the observation
 * the whole testbed exists to make reproducible.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::token;
use serde_json::json;
use tracing::debug;

const HOST_CLAIM: &str = "host";

/// Rewrite the host a credential vouches for.
///
/// Best effort, never errors: anything that cannot be rewritten comes back
/// unchanged. Compact tokens get their payload `host` claim replaced with
/// the original signature preserved; opaque credentials get a literal
/// loopback substring swap.
pub fn rewrite_host(credential: &str, new_host: &str) -> String {
    if credential.matches('.').count() == 2 {
        rewrite_compact(credential, new_host)
    } else {
        rewrite_opaque(credential, new_host)
    }
}

fn rewrite_compact(credential: &str, new_host: &str) -> String {
    let mut decoded = match token::decode(credential) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("mutation skipped, credential does not decode: {}", e);
            return credential.to_string();
        }
    };

    decoded
        .payload
        .insert(HOST_CLAIM.to_string(), json!(new_host));

    debug!("rewrote host claim to {}", new_host);
    token::encode(&decoded)
}

fn rewrite_opaque(credential: &str, new_host: &str) -> String {
    for literal in ["localhost", "127.0.0.1"] {
        if credential.contains(literal) {
            debug!("replacing loopback literal {} with {}", literal, new_host);
            return credential.replace(literal, new_host);
        }
    }
    credential.to_string()
}
