//! Third-party sign-in return route (`/auth/callback`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider redirects here with tokens (or an error) in the URL
//! fragment. The page hands the fragment to the gateway, runs one session
//! query and leaves for `/dashboard` or `/auth?error=...`. Navigation goes
//! through the router so the in-memory session survives.

use leptos::prelude::*;

use crate::state::session::use_navigation_queue;

pub const COMPLETING_TEXT: &str = "Completing authentication...";

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let navigation = use_navigation_queue();

    #[cfg(feature = "hydrate")]
    {
        use authflow::gateway::AuthGateway;
        use authflow::routes::{self, CALLBACK_FAILED};

        use crate::net::gateway::BrowserGateway;

        let scope = authflow::scope::ViewScope::new();
        let handle = scope.handle();
        let query_error = routes::error_from_query(&leptos_router::hooks::use_location().search.get_untracked());
        leptos::task::spawn_local(async move {
            let destination = match (query_error, crate::util::location::hash()) {
                (Some(message), _) => routes::auth_with_error(&message),
                (None, None) => routes::auth_with_error(CALLBACK_FAILED),
                (None, Some(fragment)) => match BrowserGateway.absorb_callback(&fragment) {
                    Err(e) => routes::auth_with_error(&e.message),
                    Ok(_) => routes::callback_destination(&BrowserGateway.current_session().await),
                },
            };
            log::info!("auth callback settled; continuing to {destination}");
            handle.run_if_alive(|| navigation.set(Some(destination)));
        });
        on_cleanup(move || scope.close());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = navigation;
    }

    view! {
        <div class="callback-page">
            <div class="callback-page__spinner"></div>
            <p>{COMPLETING_TEXT}</p>
        </div>
    }
}
