//! Session-change event channel.
//!
//! DESIGN
//! ======
//! The provider pushes session changes (sign-in elsewhere, token refresh,
//! completed OAuth redirect) to registered listeners. [`SessionEventHub`] is
//! the in-process side of that channel; [`Subscription`] is the disposable
//! handle a view holds while mounted. Disposal runs exactly once, either on
//! [`Subscription::unsubscribe`] or on drop.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::gateway::SessionUser;

/// Why the provider's session changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// One change notification with the session's user after the change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub user: Option<SessionUser>,
}

impl SessionEvent {
    #[must_use]
    pub fn new(kind: SessionEventKind, user: Option<SessionUser>) -> Self {
        Self { kind, user }
    }
}

pub type SessionListener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

type Disposer = Box<dyn FnOnce() + Send + Sync>;

/// Handle for one registered listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Disposer>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { dispose: Some(Box::new(dispose)) }
    }

    /// A handle with nothing to release (e.g. server-side rendering).
    pub fn inert() -> Self {
        Self { dispose: None }
    }

    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, SessionListener>,
}

/// Fan-out registry of session listeners.
#[derive(Clone, Default)]
pub struct SessionEventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl SessionEventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it receives every event until the returned
    /// handle is released.
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, listener);
            id
        };
        let hub = self.clone();
        Subscription::new(move || {
            hub.lock().listeners.remove(&id);
        })
    }

    /// Deliver `event` to every live listener.
    pub fn emit(&self, event: &SessionEvent) {
        // Snapshot so listeners may unsubscribe from inside the callback.
        let listeners: Vec<SessionListener> = self.lock().listeners.values().cloned().collect();
        log::debug!("session event {:?} -> {} listener(s)", event.kind, listeners.len());
        for listener in listeners {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
