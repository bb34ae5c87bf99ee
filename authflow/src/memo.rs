//! Scope-owned memoization of in-flight session lookups.
//!
//! Several parts of one view may ask for the session while the first request
//! is still outstanding; they all await the same shared future. Entries are
//! keyed by operation name, dropped on error so the next caller retries, and
//! cleared wholesale on sign-out. The cache belongs to the view that created
//! it and dies with it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::gateway::{AuthError, SessionUser};

/// Key for `AuthGateway::current_session` lookups.
pub const CURRENT_SESSION: &str = "current-session";

pub type SessionResult = Result<Option<SessionUser>, AuthError>;

type SharedLookup = Shared<LocalBoxFuture<'static, SessionResult>>;

#[derive(Clone, Default)]
pub struct SessionQueryCache {
    entries: Rc<RefCell<HashMap<&'static str, SharedLookup>>>,
}

impl SessionQueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Await the memoized lookup for `key`, starting it with `start` when no
    /// entry exists.
    pub async fn fetch<F, Fut>(&self, key: &'static str, start: F) -> SessionResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SessionResult> + 'static,
    {
        let lookup = {
            let mut entries = self.entries.borrow_mut();
            entries
                .entry(key)
                .or_insert_with(|| start().boxed_local().shared())
                .clone()
        };
        let result = lookup.clone().await;
        if let Err(e) = &result {
            log::debug!("session lookup {key} failed, dropping memo: {e}");
            self.forget(key, &lookup);
        }
        result
    }

    /// Drop `key` only while it still maps to `lookup`; a newer entry
    /// started after a `clear` stays.
    fn forget(&self, key: &str, lookup: &SharedLookup) {
        let mut entries = self.entries.borrow_mut();
        if entries.get(key).is_some_and(|current| current.ptr_eq(lookup)) {
            entries.remove(key);
        }
    }

    /// Forget every lookup (sign-out).
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

#[cfg(test)]
#[path = "memo_test.rs"]
mod tests;
