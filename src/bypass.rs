// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Bypass Evaluator
 * Classifies credentials as forgeable under fixed, auditable rules
 *
 * The evaluator never sees a verification secret, so HS256 is classified as
 * weak alongside alg:none - a structurally present signature that is never
 * checked buys nothing. That classification is a modeled limitation of the
 * demonstration, kept verbatim from the source corpus.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::minting::WEAK_MARKER;
use crate::token;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum length under which an opaque credential counts as guessable
const MIN_OPAQUE_LENGTH: usize = 32;

const LOOPBACK_LITERALS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Why a credential was (or was not) classified bypassable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BypassReason {
    NoCredential,
    Malformed,
    AlgNone,
    WeakAlg,
    EmptySignature,
    OpaqueOrStrong,
    WeakMarker,
    LoopbackHost,
    ShortToken,
}

impl BypassReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BypassReason::NoCredential => "no_credential",
            BypassReason::Malformed => "malformed",
            BypassReason::AlgNone => "alg_none",
            BypassReason::WeakAlg => "weak_alg",
            BypassReason::EmptySignature => "empty_signature",
            BypassReason::OpaqueOrStrong => "opaque_or_strong",
            BypassReason::WeakMarker => "weak_marker",
            BypassReason::LoopbackHost => "loopback_host",
            BypassReason::ShortToken => "short_token",
        }
    }
}

impl std::fmt::Display for BypassReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification result: verdict plus the first rule that matched.
/// Observability data, not a correctness gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BypassVerdict {
    pub bypassable: bool,
    pub reason: BypassReason,
}

impl BypassVerdict {
    fn hit(reason: BypassReason) -> Self {
        Self {
            bypassable: true,
            reason,
        }
    }

    fn miss(reason: BypassReason) -> Self {
        Self {
            bypassable: false,
            reason,
        }
    }
}

/// Classify a credential of either kind.
///
/// Dispatch mirrors how the corpus recognizes its own tokens: exactly two
/// dots means the compact three-segment shape, anything else is opaque.
pub fn evaluate(credential: &str) -> BypassVerdict {
    if credential.is_empty() {
        return BypassVerdict::miss(BypassReason::NoCredential);
    }

    let verdict = if credential.matches('.').count() == 2 {
        evaluate_compact(credential)
    } else {
        evaluate_opaque(credential)
    };

    debug!(
        "credential classified: bypassable={} reason={}",
        verdict.bypassable, verdict.reason
    );
    verdict
}

/// Rules for the compact three-segment variant, first match wins.
pub fn evaluate_compact(credential: &str) -> BypassVerdict {
    if credential.is_empty() {
        return BypassVerdict::miss(BypassReason::NoCredential);
    }

    // Malformed is unsafe: a token nothing can parse is a token nothing
    // will verify either
    let decoded = match token::decode(credential) {
        Ok(decoded) => decoded,
        Err(_) => return BypassVerdict::hit(BypassReason::Malformed),
    };

    match decoded.algorithm() {
        Some("none") => return BypassVerdict::hit(BypassReason::AlgNone),
        Some("HS256") => return BypassVerdict::hit(BypassReason::WeakAlg),
        _ => {}
    }

    if decoded.signature.is_empty() || decoded.signature == "null" {
        return BypassVerdict::hit(BypassReason::EmptySignature);
    }

    BypassVerdict::miss(BypassReason::OpaqueOrStrong)
}

/// Rules for the opaque credential variant, first match wins.
pub fn evaluate_opaque(credential: &str) -> BypassVerdict {
    if credential.is_empty() {
        return BypassVerdict::miss(BypassReason::NoCredential);
    }

    if credential.starts_with(WEAK_MARKER) {
        return BypassVerdict::hit(BypassReason::WeakMarker);
    }

    if LOOPBACK_LITERALS.iter().any(|l| credential.contains(l)) {
        return BypassVerdict::hit(BypassReason::LoopbackHost);
    }

    if credential.len() < MIN_OPAQUE_LENGTH {
        return BypassVerdict::hit(BypassReason::ShortToken);
    }

    BypassVerdict::miss(BypassReason::OpaqueOrStrong)
}
