// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Password Reset Flow
 * End-to-end trust-context propagation pipeline
 *
 * Wires the resolver, evaluator, mutator, trust store and link builder into
 * the forgot/reset pair every variant of the source corpus repeats. The
 * whole flow is synchronous on the caller's thread; the only spawned work
 * is the fire-and-forget context probe, which reproduces the corpus's
 * background thread reading a possibly stale request context.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::bypass::{self, BypassVerdict};
use crate::config::FlowConfig;
use crate::context::{self, RequestContext};
use crate::host_resolver;
use crate::mailer::MailSender;
use crate::minting;
use crate::mutator;
use crate::reset_link::ResetLinkBuilder;
use crate::token;
use crate::trust_store::TrustStore;
use crate::types::{CredentialKind, ForgotOutcome, RequestHeaders, ResetOutcome};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the background probe saw when it finally ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeObservation {
    pub host: Option<String>,
    pub user_agent: Option<String>,
    pub request_time: Option<String>,
}

/// Journal of background-probe observations.
///
/// The probe runs happens-after the main write in the common case, but no
/// ordering is guaranteed: by the time it reads, a later request may have
/// overwritten the context. Observing that staleness is the point.
#[derive(Debug, Default)]
pub struct ProbeLog {
    observations: Mutex<Vec<ProbeObservation>>,
}

impl ProbeLog {
    pub fn record(&self, observation: ProbeObservation) {
        self.observations
            .lock()
            .expect("probe log mutex poisoned")
            .push(observation);
    }

    pub fn observations(&self) -> Vec<ProbeObservation> {
        self.observations
            .lock()
            .expect("probe log mutex poisoned")
            .clone()
    }
}

pub struct ResetFlow {
    config: FlowConfig,
    store: Arc<TrustStore>,
    mailer: Arc<dyn MailSender>,
    link_builder: ResetLinkBuilder,
    probe_log: Arc<ProbeLog>,
}

impl ResetFlow {
    pub fn new(config: FlowConfig, store: Arc<TrustStore>, mailer: Arc<dyn MailSender>) -> Self {
        let link_builder = ResetLinkBuilder::new(config.credential_kind.source());
        Self {
            config,
            store,
            mailer,
            link_builder,
            probe_log: Arc::new(ProbeLog::default()),
        }
    }

    pub fn store(&self) -> &Arc<TrustStore> {
        &self.store
    }

    pub fn probe_log(&self) -> &Arc<ProbeLog> {
        &self.probe_log
    }

    /// Handle a forgot-password submission.
    ///
    /// Resolves the candidate host from attacker-controllable headers, mints
    /// or mutates the credential, records the trust association, builds the
    /// poisoned reset link and hands it to the mail collaborator. Always
    /// succeeds; a failed mail send is reported inside the outcome.
    pub fn forgot(
        &self,
        headers: &RequestHeaders,
        email: &str,
        inbound_credential: Option<&str>,
        ctx: Arc<dyn RequestContext>,
    ) -> ForgotOutcome {
        let email = if email.is_empty() {
            self.config.default_email.as_str()
        } else {
            email
        };
        let kind = self.config.credential_kind;

        info!("[{}] handling forgot-password for {}", kind.source(), email);

        let host = host_resolver::resolve(headers, &self.config.fallback_host);

        let credential = match inbound_credential.filter(|c| !c.is_empty()) {
            None => {
                debug!("no inbound credential, minting a fresh one");
                self.mint(email, &host)
            }
            Some(inbound) => {
                if bypass::evaluate(inbound).bypassable {
                    mutator::rewrite_host(inbound, &host)
                } else {
                    inbound.to_string()
                }
            }
        };

        self.store.put(&credential, &host, email);
        self.pollute_context(headers, &host, ctx.as_ref());
        self.spawn_context_probe(Arc::clone(&ctx));

        let verdict = bypass::evaluate(&credential);
        let claims = self.link_claims(kind, &credential, &verdict, ctx.as_ref());
        let reset_link = self
            .link_builder
            .build(&host, &self.config.reset_token, &claims);

        let html = format!(
            "<p>Reset your password: <a href='{}'>{}</a></p>",
            reset_link, reset_link
        );
        let mail_error = match self.mailer.send(email, &self.config.mail_subject, &html) {
            Ok(()) => None,
            Err(e) => {
                warn!("reset mail not delivered: {}", e);
                Some(e.to_string())
            }
        };

        ForgotOutcome {
            ok: mail_error.is_none(),
            token: self.config.reset_token.clone(),
            credential,
            polluted_host: host,
            user_email: email.to_string(),
            bypassable: verdict.bypassable,
            reason: verdict.reason.to_string(),
            reset_link,
            mail_error,
        }
    }

    /// Handle a reset-link visit.
    ///
    /// The trust store is consulted first; when the credential is unknown the
    /// flow falls back to resolving the host from the current request's
    /// headers, exactly as the corpus does.
    pub fn reset(
        &self,
        token: &str,
        credential: Option<&str>,
        headers: &RequestHeaders,
    ) -> ResetOutcome {
        let entry = credential.and_then(|c| self.store.get(c));

        let (polluted_host, user_email) = match entry {
            Some(entry) => (entry.host, Some(entry.subject)),
            None => (
                host_resolver::resolve(headers, &self.config.fallback_host),
                None,
            ),
        };

        let bypassable = credential
            .map(|c| bypass::evaluate(c).bypassable)
            .unwrap_or(false);

        info!(
            "[{}] reset visit, token={} host={}",
            self.config.credential_kind.source(),
            token,
            polluted_host
        );

        ResetOutcome {
            ok: true,
            token: token.to_string(),
            polluted_host,
            user_email,
            credential: credential.map(str::to_string),
            bypassable,
        }
    }

    /// Best-effort `alg` extraction from a compact credential.
    pub fn algorithm_of(credential: &str) -> String {
        token::decode(credential)
            .ok()
            .and_then(|decoded| decoded.algorithm().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn mint(&self, email: &str, host: &str) -> String {
        match self.config.credential_kind {
            CredentialKind::Compact => {
                minting::mint_compact(email, host, &self.config.signing_secret)
            }
            CredentialKind::Opaque => minting::mint_opaque(email, host),
        }
    }

    fn pollute_context(&self, headers: &RequestHeaders, host: &str, ctx: &dyn RequestContext) {
        ctx.set(context::POLLUTED_HOST, host.to_string());
        if let Some(user_agent) = headers.get("user-agent") {
            ctx.set(context::USER_AGENT, user_agent.to_string());
        }
        ctx.set(
            context::REQUEST_TIME,
            chrono::Utc::now().timestamp_millis().to_string(),
        );
    }

    fn link_claims(
        &self,
        kind: CredentialKind,
        credential: &str,
        verdict: &BypassVerdict,
        ctx: &dyn RequestContext,
    ) -> Vec<(String, String)> {
        let prefix = kind.claim_prefix();

        let mut claims = vec![(format!("{}_token", prefix), credential.to_string())];
        claims.extend(context::snapshot(ctx));
        claims.push((
            format!("{}_bypassable", prefix),
            verdict.bypassable.to_string(),
        ));
        if kind == CredentialKind::Compact {
            claims.push((format!("{}_algorithm", prefix), Self::algorithm_of(credential)));
        }

        claims
    }

    /// Fire-and-forget probe of the shared request context.
    ///
    /// Never awaited and never consulted by the reset link. The delay makes
    /// the stale-context race easy to hit: a second request can overwrite
    /// the context before the probe reads it, and that outcome is expected.
    /// Without a runtime the probe is skipped silently.
    fn spawn_context_probe(&self, ctx: Arc<dyn RequestContext>) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("no async runtime, skipping context probe");
                return;
            }
        };

        let probe_log = Arc::clone(&self.probe_log);
        handle.spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;

            let observation = ProbeObservation {
                host: ctx.get(context::POLLUTED_HOST),
                user_agent: ctx.get(context::USER_AGENT),
                request_time: ctx.get(context::REQUEST_TIME),
            };
            info!(
                "[background_probe] polluted context: host={:?} user_agent={:?} time={:?}",
                observation.host, observation.user_agent, observation.request_time
            );
            probe_log.record(observation);
        });
    }
}
