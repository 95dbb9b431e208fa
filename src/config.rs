// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HNP Testbed Flow Configuration
 * Deserializable knobs for the demonstration pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::CredentialKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig {
    /// Host used when neither Host nor X-Forwarded-Host is present
    #[serde(default = "default_fallback_host")]
    pub fallback_host: String,

    /// Static reset token embedded in every outbound link
    #[serde(default = "default_reset_token")]
    pub reset_token: String,

    #[serde(default)]
    pub credential_kind: CredentialKind,

    /// Secret fed to the deliberately weak signer
    #[serde(default = "default_signing_secret")]
    pub signing_secret: String,

    #[serde(default = "default_mail_subject")]
    pub mail_subject: String,

    /// Recipient substituted when the form posts an empty email
    #[serde(default = "default_email")]
    pub default_email: String,
}

fn default_fallback_host() -> String {
    "localhost".to_string()
}

fn default_reset_token() -> String {
    "reset-token-123".to_string()
}

fn default_signing_secret() -> String {
    "vulnerable-secret-key".to_string()
}

fn default_mail_subject() -> String {
    "Reset your password".to_string()
}

fn default_email() -> String {
    "user@example.com".to_string()
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            fallback_host: default_fallback_host(),
            reset_token: default_reset_token(),
            credential_kind: CredentialKind::Compact,
            signing_secret: default_signing_secret(),
            mail_subject: default_mail_subject(),
            default_email: default_email(),
        }
    }
}
