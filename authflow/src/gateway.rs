//! Contract of the hosted auth provider as consumed by the UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider owns password hashing, session issuance and the OAuth
//! dance. Everything here treats it as an opaque, already-correct service;
//! failures only ever expose a message string.
//!
//! The trait is `?Send` because the browser implementation awaits
//! `gloo-net` futures, which are tied to the JS event loop.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::events::{SessionListener, Subscription};

/// Identity record as reported by the provider. Display-only; the
/// authoritative copy stays with the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<String>,
}

impl SessionUser {
    /// Creation date as `YYYY-MM-DD`, or `"N/A"`.
    #[must_use]
    pub fn created_on(&self) -> String {
        display_date(self.created_at.as_deref())
    }

    /// Last sign-in date as `YYYY-MM-DD`, or `"N/A"`.
    #[must_use]
    pub fn last_signed_in_on(&self) -> String {
        display_date(self.last_sign_in_at.as_deref())
    }
}

const DISPLAY_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of an RFC 3339 timestamp, in its own offset.
fn display_date(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| OffsetDateTime::parse(ts, &Rfc3339).ok())
        .and_then(|at| at.date().format(DISPLAY_DATE).ok())
        .unwrap_or_else(|| "N/A".to_owned())
}

/// Any provider failure. Only the message is ever inspected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Result of a successful sign-up call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The provider confirmed the account immediately and issued a session.
    SignedIn(SessionUser),
    /// The account exists but has no usable session until the user
    /// confirms through email.
    VerificationPending(SessionUser),
}

/// Operations of the hosted auth provider.
#[async_trait::async_trait(?Send)]
pub trait AuthGateway {
    /// Create an account with email + password.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    /// Password sign-in; establishes a session on success.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;

    /// Start an out-of-band OAuth redirect. `Ok` means the redirect was
    /// initiated; completion is only observable through the callback route
    /// or a session-change event.
    async fn sign_in_with_third_party(&self, provider: &str, redirect_target: &str) -> Result<(), AuthError>;

    /// Current session's user, `None` when signed out.
    async fn current_session(&self) -> Result<Option<SessionUser>, AuthError>;

    /// Exchange the refresh token for a new session.
    async fn refresh_session(&self) -> Result<Option<SessionUser>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Ask the provider to email a password-reset link that lands on
    /// `redirect_target`.
    async fn reset_password_for_email(&self, email: &str, redirect_target: &str) -> Result<(), AuthError>;

    /// Register for out-of-band session changes. The returned handle must be
    /// dropped or unsubscribed when the observing view is torn down.
    fn subscribe(&self, listener: SessionListener) -> Subscription;
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
