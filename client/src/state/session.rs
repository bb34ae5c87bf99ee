//! Per-view session scope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each auth-aware page (home, auth, dashboard) calls [`use_session_scope`]
//! once on mount. The hook owns the page's [`SessionDeriver`], its memoized
//! session query and its one gateway subscription, and turns the deriver's
//! navigation decisions into router navigations.
//!
//! LIFETIME
//! ========
//! The [`ViewScope`] is closed in `on_cleanup`: the subscription is released
//! and async results that land afterwards are dropped by
//! [`ScopeHandle::run_if_alive`].

use std::sync::Arc;

use authflow::events::{SessionEvent, SessionListener};
use authflow::gateway::AuthGateway;
use authflow::memo::SessionQueryCache;
use authflow::routes::Route;
use authflow::scope::{ScopeHandle, ViewScope};
use authflow::session::{SessionDeriver, View};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::gateway::BrowserGateway;

/// Reactive handles for one mounted view.
#[derive(Clone)]
pub struct SessionScope {
    pub deriver: RwSignal<SessionDeriver>,
    pub queries: StoredValue<SessionQueryCache, LocalStorage>,
    pub handle: ScopeHandle,
    navigation: RwSignal<Option<String>>,
}

impl SessionScope {
    /// Queue a navigation; the router effect performs it on the next tick.
    pub fn navigate_to(&self, target: impl Into<String>) {
        self.navigation.set(Some(target.into()));
    }

    /// Apply a deriver decision, if any.
    pub fn follow(&self, route: Option<Route>) {
        if let Some(route) = route {
            self.navigate_to(route.path());
        }
    }
}

/// Signal that performs (and clears) a queued router navigation.
///
/// Async tasks and gateway listeners cannot hold the router's navigate
/// closure, so they write the target here instead.
pub fn use_navigation_queue() -> RwSignal<Option<String>> {
    let navigation = RwSignal::new(None::<String>);
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(target) = navigation.get() {
            navigation.set(None);
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
    navigation
}

/// Mount the session scope for `view`.
pub fn use_session_scope(view: View) -> SessionScope {
    let deriver = RwSignal::new(SessionDeriver::new(view));
    let queries = StoredValue::new_local(SessionQueryCache::new());
    let navigation = use_navigation_queue();
    let scope = ViewScope::new();
    let session = SessionScope { deriver, queries, handle: scope.handle(), navigation };

    let listener: SessionListener = {
        let session = session.clone();
        Arc::new(move |event: &SessionEvent| {
            session.handle.run_if_alive(|| {
                let route = session.deriver.try_update(|d| d.apply_event(event)).flatten();
                session.follow(route);
            });
        })
    };
    scope.attach(BrowserGateway.subscribe(listener));

    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let Some(cache) = session.queries.try_get_value() else {
                return;
            };
            let result = cache
                .fetch(authflow::memo::CURRENT_SESSION, || async { BrowserGateway.current_session().await })
                .await;
            session.handle.run_if_alive(|| {
                let route = session.deriver.try_update(|d| d.resolve_query(result)).flatten();
                session.follow(route);
            });
        });
    }

    on_cleanup(move || scope.close());
    session
}
