// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use hnp_testbed::config::FlowConfig;
use hnp_testbed::context::InMemoryContext;
use hnp_testbed::mailer::{MailSender, RecordingMailer};
use hnp_testbed::reset_flow::ResetFlow;
use hnp_testbed::trust_store::TrustStore;
use hnp_testbed::types::{CredentialKind, RequestHeaders};

/// Run one forgot/reset round trip through the poisoning pipeline
#[derive(Parser, Debug)]
#[command(name = "hnp-testbed", version, about)]
struct Args {
    /// Victim email address submitted to the forgot form
    #[arg(long, default_value = "user@example.com")]
    email: String,

    /// Value of the Host header
    #[arg(long, default_value = "victim.com")]
    host: String,

    /// Value of the X-Forwarded-Host header, if the attacker sets one
    #[arg(long)]
    forwarded_host: Option<String>,

    /// Inbound credential cookie, minted fresh when omitted
    #[arg(long)]
    credential: Option<String>,

    /// Credential variant to model: compact (JWT-style) or opaque (OAuth-style)
    #[arg(long, value_enum, default_value = "compact")]
    kind: Kind,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Compact,
    Opaque,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("HNP Testbed - trust-context propagation demo");

    let config = FlowConfig {
        credential_kind: match args.kind {
            Kind::Compact => CredentialKind::Compact,
            Kind::Opaque => CredentialKind::Opaque,
        },
        ..FlowConfig::default()
    };

    let mailer = Arc::new(RecordingMailer::new());
    let flow = ResetFlow::new(
        config,
        Arc::new(TrustStore::new()),
        Arc::clone(&mailer) as Arc<dyn MailSender>,
    );

    let mut headers = RequestHeaders::new();
    headers.insert("Host", args.host.clone());
    if let Some(forwarded) = &args.forwarded_host {
        headers.insert("X-Forwarded-Host", forwarded.clone());
    }
    headers.insert("User-Agent", "hnp-testbed-demo/1.0".to_string());

    let ctx = Arc::new(InMemoryContext::new());
    let outcome = flow.forgot(&headers, &args.email, args.credential.as_deref(), ctx);

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let Some(mail) = mailer.last() {
        info!("captured outbound mail to {}: {}", mail.to, mail.subject);
        println!("{}", mail.html_body);
    }

    let reset = flow.reset(&outcome.token, Some(&outcome.credential), &headers);
    println!("{}", serde_json::to_string_pretty(&reset)?);

    // Give the fire-and-forget probe a moment to log before exit
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;

    Ok(())
}
