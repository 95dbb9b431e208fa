// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HNP Testbed Error Types
 * Error taxonomy for the trust-context pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Failure to decode a compact three-segment token.
///
/// Every consumer recovers locally: the bypass evaluator maps a decode
/// failure to "bypassable" and the mutator returns its input unchanged.
/// Nothing in the pipeline propagates this as a fatal error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Token does not split into the expected header.payload.signature shape
    #[error("token does not have the three-segment compact shape")]
    MalformedStructure,

    /// A segment is not valid base64url, or does not hold a flat JSON object
    #[error("invalid segment encoding: {0}")]
    InvalidEncoding(String),
}

/// Mail delivery failure, surfaced to the caller as a best-effort
/// error payload. Never retried, never fatal.
#[derive(Error, Debug, Clone)]
pub enum MailError {
    #[error("mail delivery failed for {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },
}
