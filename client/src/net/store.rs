//! In-memory provider session for the browser tab.
//!
//! DESIGN
//! ======
//! Tokens live only in this struct; nothing is written to storage, so a full
//! page reload starts signed out unless the provider redirect hands tokens
//! back through the callback fragment. Every mutation that changes who is
//! signed in returns the [`SessionEvent`] the gateway should broadcast.

use authflow::events::{SessionEvent, SessionEventKind};
use authflow::gateway::SessionUser;
use authflow::gotrue::{ProviderSettings, TokenSession};

#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    settings: Option<ProviderSettings>,
    tokens: Option<TokenSession>,
    user: Option<SessionUser>,
}

impl SessionStore {
    #[must_use]
    pub fn settings(&self) -> Option<&ProviderSettings> {
        self.settings.as_ref()
    }

    pub fn set_settings(&mut self, settings: ProviderSettings) {
        self.settings = Some(settings);
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Replace the token set. The user is taken from the grant when present,
    /// otherwise left for the next `/user` lookup to fill in.
    pub fn install(&mut self, tokens: TokenSession, kind: SessionEventKind) -> SessionEvent {
        self.user = tokens.user.clone();
        self.tokens = Some(tokens);
        SessionEvent::new(kind, self.user.clone())
    }

    /// Record the user fetched for the current tokens.
    pub fn set_user(&mut self, user: SessionUser) -> Option<SessionEvent> {
        self.tokens.as_ref()?;
        let changed = self.user.as_ref().is_some_and(|u| *u != user);
        self.user = Some(user);
        changed.then(|| SessionEvent::new(SessionEventKind::UserUpdated, self.user.clone()))
    }

    /// Drop the session; yields `SignedOut` only if one existed.
    pub fn clear(&mut self) -> Option<SessionEvent> {
        let had_session = self.tokens.take().is_some();
        self.user = None;
        had_session.then(|| SessionEvent::new(SessionEventKind::SignedOut, None))
    }

    /// Snapshot replayed to a new listener once the session is known: a
    /// cached user, or no tokens at all.
    #[must_use]
    pub fn initial_event(&self) -> Option<SessionEvent> {
        match (&self.tokens, &self.user) {
            (None, _) => Some(SessionEvent::new(SessionEventKind::InitialSession, None)),
            (Some(_), Some(user)) => Some(SessionEvent::new(SessionEventKind::InitialSession, Some(user.clone()))),
            (Some(_), None) => None,
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
