// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Compact Token Codec
 * Structural encode/decode for the three-segment dot-joined token format
 *
 * Validation here is structural only. No cryptographic verification happens
 * anywhere in the testbed - the signature segment is carried as an opaque
 * string and reattached verbatim by the mutator, which is the flaw the
 * corpus demonstrates.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::DecodeError;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Value};

/// A structurally decoded compact token.
///
/// Header and payload are flat string-keyed maps whose values are strings or
/// 64-bit integers. The signature is never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
    pub signature: String,
}

impl DecodedToken {
    /// Best-effort `alg` lookup in the header segment
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Best-effort string claim lookup in the payload segment
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }
}

/// Decode a compact token into its parts.
///
/// Fails with `MalformedStructure` when the input does not split into
/// exactly three segments with non-empty header and payload. The signature
/// segment may be empty: `header.payload.` is the wire shape of an unsigned
/// alg:none token and must stay decodable so the evaluator can classify it.
pub fn decode(token: &str) -> Result<DecodedToken, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(DecodeError::MalformedStructure);
    }

    let header = decode_segment(parts[0], "header")?;
    let payload = decode_segment(parts[1], "payload")?;

    // Signature must be valid base64url but stays an opaque string
    if !parts[2].is_empty() {
        general_purpose::URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|e| DecodeError::InvalidEncoding(format!("signature: {}", e)))?;
    }

    Ok(DecodedToken {
        header,
        payload,
        signature: parts[2].to_string(),
    })
}

/// Re-encode a decoded token.
///
/// Exact left-inverse of `decode` for header and payload; the signature is
/// whatever string the caller supplies, appended without inspection.
pub fn encode(decoded: &DecodedToken) -> String {
    format!(
        "{}.{}.{}",
        encode_segment(&decoded.header),
        encode_segment(&decoded.payload),
        decoded.signature
    )
}

fn decode_segment(segment: &str, which: &str) -> Result<Map<String, Value>, DecodeError> {
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| DecodeError::InvalidEncoding(format!("{}: {}", which, e)))?;

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| DecodeError::InvalidEncoding(format!("{}: {}", which, e)))?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(DecodeError::InvalidEncoding(format!(
                "{}: expected a JSON object, got {}",
                which, other
            )))
        }
    };

    // Flat mapping: string or 64-bit integer values only
    for (key, value) in &map {
        if !(value.is_string() || value.is_i64() || value.is_u64()) {
            return Err(DecodeError::InvalidEncoding(format!(
                "{}: claim '{}' is not a string or integer",
                which, key
            )));
        }
    }

    Ok(map)
}

fn encode_segment(map: &Map<String, Value>) -> String {
    let json = Value::Object(map.clone()).to_string();
    general_purpose::URL_SAFE_NO_PAD.encode(json)
}
