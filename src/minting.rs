// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Vulnerable Credential Minting
 * Produces the deliberately weak credentials the testbed circulates
 *
 * The compact minter advertises HS256 in the header while signing with an
 * unkeyed MD5 digest of data plus secret. The opaque minter embeds a known
 * weak marker. Both weaknesses are the demonstration artifact and are
 * preserved exactly as the source corpus exhibits them.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::token::{self, DecodedToken};
use base64::{engine::general_purpose, Engine as _};
use md5::{Digest, Md5};
use serde_json::{json, Map, Value};
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::debug;

/// Marker prefix carried by every minted opaque credential
pub const WEAK_MARKER: &str = "vulnerable_";

/// Mint a compact token carrying the trusted-host claim.
///
/// Header claims HS256; the signature is `weak_signature`, not HMAC. The
/// mismatch goes undetected because nothing in the pipeline ever verifies.
pub fn mint_compact(email: &str, host: &str, secret: &str) -> String {
    let mut header = Map::new();
    header.insert("alg".to_string(), json!("HS256"));
    header.insert("typ".to_string(), json!("JWT"));

    let mut payload = Map::new();
    payload.insert("email".to_string(), json!(email));
    payload.insert("host".to_string(), json!(host));
    payload.insert("iat".to_string(), json!(chrono::Utc::now().timestamp()));

    let unsigned = DecodedToken {
        header,
        payload,
        signature: String::new(),
    };

    let encoded = token::encode(&unsigned);
    let signing_input = encoded.trim_end_matches('.');
    let signature = weak_signature(signing_input, secret);

    debug!("minted compact credential for host {}", host);
    format!("{}{}", encoded, signature)
}

/// Mint an opaque credential in the source corpus's pattern:
/// weak marker, random hex, then hashes of email and host.
pub fn mint_opaque(email: &str, host: &str) -> String {
    let credential = format!(
        "{}oauth_token_{}_{}_{}",
        WEAK_MARKER,
        generate_id(),
        string_hash(email),
        string_hash(host)
    );

    debug!("minted opaque credential for host {}", host);
    credential
}

/// Weak signature: base64url(MD5(data || secret)). Unkeyed digest with
/// secret concatenation, exactly as the corpus generates it.
pub fn weak_signature(signing_input: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(signing_input.as_bytes());
    hasher.update(secret.as_bytes());
    general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Proper HMAC-SHA256 signature, base64url encoded. Used to mint tokens
/// whose signature segment looks structurally sound.
pub fn sign_hs256(signing_input: &str, secret: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signing_input.as_bytes());

    general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Generate unique identifier
pub fn generate_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    format!("{:016x}{:016x}", rng.random::<u64>(), rng.random::<u64>())
}

fn string_hash(input: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish() as u32
}
