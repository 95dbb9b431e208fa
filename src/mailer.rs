// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Mail Collaborator Interface
//!
//! The testbed never speaks SMTP. It hands the finished HTML body to
//! whatever `MailSender` the embedding framework supplies and records the
//! outcome. `RecordingMailer` captures outbound mail in memory for the demo
//! binary and the test suite, and can be flipped to fail for the
//! error-path tests.

use crate::errors::MailError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};

/// One captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

pub trait MailSender: Send + Sync {
    fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}

/// In-memory mail sink.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundMail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail, for exercising the error path
    pub fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }

    pub fn last(&self) -> Option<OutboundMail> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .last()
            .cloned()
    }
}

impl MailSender for RecordingMailer {
    fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            warn!("mail sink configured to fail, dropping message to {}", to);
            return Err(MailError::Delivery {
                recipient: to.to_string(),
                reason: "mail sink unavailable".to_string(),
            });
        }

        info!("recording outbound mail to {}: {}", to, subject);
        self.sent.lock().expect("mailer mutex poisoned").push(OutboundMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}
