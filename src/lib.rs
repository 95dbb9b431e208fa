// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HNP Testbed Library
 * Reproducible host-header-poisoning trust pipeline for scanner validation
 *
 * Distills the shared algorithm of the per-framework demonstration apps:
 * a client-controlled host is trusted, carried through a request context
 * and a credential, and embedded unescaped into an emailed reset link.
 * The flaws are the product; nothing here is hardened on purpose.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod bypass;
pub mod config;
pub mod context;
pub mod errors;
pub mod host_resolver;
pub mod mailer;
pub mod minting;
pub mod mutator;
pub mod reset_flow;
pub mod reset_link;
pub mod token;
pub mod trust_store;
pub mod types;

pub use bypass::{BypassReason, BypassVerdict};
pub use config::FlowConfig;
pub use errors::{DecodeError, MailError};
pub use reset_flow::ResetFlow;
pub use token::DecodedToken;
pub use trust_store::{TrustEntry, TrustStore};
pub use types::{CredentialKind, ForgotOutcome, RequestHeaders, ResetOutcome};
