// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Case-insensitive request header map.
///
/// Ephemeral - owned by the calling request scope and handed to the host
/// resolver for a single resolution call. Names are folded to lowercase on
/// insert so lookups match however the framework collaborator spells them.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    values: HashMap<String, String>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name.as_ref(), value.into());
        }
        headers
    }

    pub fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_lowercase(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which credential variant a flow models.
///
/// Compact is the JWT-bypass variant (three dot-joined base64url segments),
/// Opaque is the OAuth-bypass variant (single unstructured token string).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Compact,
    Opaque,
}

impl Default for CredentialKind {
    fn default() -> Self {
        CredentialKind::Compact
    }
}

impl CredentialKind {
    /// Value of the `from` query parameter in the reset link
    pub fn source(&self) -> &'static str {
        match self {
            CredentialKind::Compact => "jwt_bypass",
            CredentialKind::Opaque => "oauth_bypass",
        }
    }

    /// Claim-name prefix used in reset-link parameters and responses
    pub fn claim_prefix(&self) -> &'static str {
        match self {
            CredentialKind::Compact => "jwt",
            CredentialKind::Opaque => "oauth",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::Compact => write!(f, "compact"),
            CredentialKind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Result of one forgot-password pass through the pipeline.
///
/// Serializes to the JSON-shaped response the framework collaborator hands
/// back to the client. Token and polluted host are intentionally unescaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotOutcome {
    pub ok: bool,
    pub token: String,
    pub credential: String,
    pub polluted_host: String,
    pub user_email: String,
    pub bypassable: bool,
    pub reason: String,
    pub reset_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_error: Option<String>,
}

/// Result of following a reset link back into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetOutcome {
    pub ok: bool,
    pub token: String,
    pub polluted_host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    pub bypassable: bool,
}
