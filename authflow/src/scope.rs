//! Mount-scoped lifetime for async work started by a view.
//!
//! A [`ViewScope`] is created when an auth-gated view mounts and dropped when
//! it unmounts. Async tasks hold a cheap [`ScopeHandle`] and check
//! [`ScopeHandle::is_alive`] before applying results, so a lookup that
//! resolves after navigation never touches torn-down state. The scope also
//! owns the view's single session subscription and releases it on close.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::events::Subscription;

#[derive(Clone, Debug)]
pub struct ScopeHandle {
    alive: Arc<AtomicBool>,
}

impl ScopeHandle {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Run `apply` only while the owning view is mounted.
    pub fn run_if_alive<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() {
            Some(apply())
        } else {
            log::debug!("view unmounted; dropping late async result");
            None
        }
    }
}

#[derive(Debug)]
pub struct ViewScope {
    alive: Arc<AtomicBool>,
    subscription: Mutex<Option<Subscription>>,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)), subscription: Mutex::new(None) }
    }

    #[must_use]
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle { alive: self.alive.clone() }
    }

    /// Hold `subscription` for the rest of the scope. A view has at most one
    /// active subscription; a previous one is released first.
    pub fn attach(&self, subscription: Subscription) {
        let previous = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(subscription);
        drop(previous);
    }

    #[cfg(test)]
    pub(crate) fn has_subscription(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Tear down: mark dead and release the subscription.
    pub fn close(self) {
        drop(self);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        let subscription = self
            .subscription
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(subscription);
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
