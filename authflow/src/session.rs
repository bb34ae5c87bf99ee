//! Auth state derivation.
//!
//! DESIGN
//! ======
//! A [`SessionDeriver`] is created `Pending` when an auth-gated view mounts
//! and settles to `Authenticated` or `Unauthenticated` from the first
//! session query, a session-change event or a sign-in/sign-out result. It
//! never returns to `Pending`; a remount builds a new deriver.
//!
//! Each settle reports at most one navigation, and only when the state
//! *kind* changes. Re-applying an unchanged state (repeated renders,
//! duplicate events) yields `None`, which is what keeps the auth screen and
//! the dashboard from bouncing between each other.
//!
//! A failed session query counts as signed out.

use crate::events::{SessionEvent, SessionEventKind};
use crate::gateway::{AuthError, SessionUser};
use crate::routes::Route;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthSessionState {
    #[default]
    Pending,
    Authenticated(SessionUser),
    Unauthenticated,
}

impl AuthSessionState {
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Screen that owns the deriver; decides which transitions navigate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Auth,
    Dashboard,
}

/// Navigation owed when entering `state` while on `view`.
#[must_use]
pub fn redirect_for(view: View, state: &AuthSessionState) -> Option<Route> {
    match (view, state) {
        (View::Auth | View::Home, AuthSessionState::Authenticated(_)) => Some(Route::Dashboard),
        (View::Dashboard, AuthSessionState::Unauthenticated) => Some(Route::Auth),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionDeriver {
    view: View,
    state: AuthSessionState,
    signed_in_at_mount: bool,
}

impl SessionDeriver {
    #[must_use]
    pub fn new(view: View) -> Self {
        Self { view, state: AuthSessionState::Pending, signed_in_at_mount: false }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn state(&self) -> &AuthSessionState {
        &self.state
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.state.user()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Signed in, and already so when the view mounted (the mount query or
    /// the initial session event said so). False after a sign-in made here.
    #[must_use]
    pub fn signed_in_at_mount(&self) -> bool {
        self.signed_in_at_mount
    }

    /// Apply the settled result of the mount-time session query.
    ///
    /// Ignored once the state has already been resolved by an event or an
    /// explicit sign-in/out, since that information is newer.
    pub fn resolve_query(&mut self, result: Result<Option<SessionUser>, AuthError>) -> Option<Route> {
        if !self.is_pending() {
            log::debug!("session query settled after state resolved; ignoring");
            return None;
        }
        let next = match result {
            Ok(Some(user)) => AuthSessionState::Authenticated(user),
            Ok(None) => AuthSessionState::Unauthenticated,
            Err(e) => {
                log::warn!("session query failed, treating as signed out: {e}");
                AuthSessionState::Unauthenticated
            }
        };
        self.signed_in_at_mount = next.user().is_some();
        self.settle(next)
    }

    /// Apply an out-of-band session change.
    pub fn apply_event(&mut self, event: &SessionEvent) -> Option<Route> {
        match (event.kind, &event.user) {
            (SessionEventKind::SignedOut, _) => self.settle(AuthSessionState::Unauthenticated),
            (SessionEventKind::InitialSession, Some(user)) if self.is_pending() => {
                self.signed_in_at_mount = true;
                self.settle(AuthSessionState::Authenticated(user.clone()))
            }
            (_, Some(user)) => self.settle(AuthSessionState::Authenticated(user.clone())),
            (SessionEventKind::InitialSession, None) if self.is_pending() => {
                self.settle(AuthSessionState::Unauthenticated)
            }
            (kind, None) => {
                log::debug!("ignoring {kind:?} event without a user");
                None
            }
        }
    }

    /// A sign-in call (or confirmed sign-up) returned a user.
    pub fn signed_in(&mut self, user: SessionUser) -> Option<Route> {
        self.settle(AuthSessionState::Authenticated(user))
    }

    /// An explicit sign-out succeeded.
    pub fn signed_out(&mut self) -> Option<Route> {
        self.settle(AuthSessionState::Unauthenticated)
    }

    fn settle(&mut self, next: AuthSessionState) -> Option<Route> {
        debug_assert!(!next.is_pending(), "Pending is only entered on mount");
        let changed = !self.state.same_kind(&next);
        if next.user().is_none() {
            self.signed_in_at_mount = false;
        }
        self.state = next;
        if !changed {
            return None;
        }
        let route = redirect_for(self.view, &self.state);
        if let Some(route) = route {
            log::info!("session transition on {:?} -> navigate {}", self.view, route.path());
        }
        route
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
