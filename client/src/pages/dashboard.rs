//! Dashboard page: the signed-in user's details and sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Until the session resolves it
//! shows a checking state; an unauthenticated result navigates to `/auth`
//! exactly once through the session scope.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use authflow::controller::{InFlight, Operation, finish_sign_out};
use authflow::gateway::{AuthGateway, SessionUser};
use authflow::session::View;
use leptos::prelude::*;

use crate::net::gateway::BrowserGateway;
use crate::state::session::use_session_scope;

pub const CHECKING_TEXT: &str = "Checking authentication...";

/// Label/value rows rendered for `user`.
pub(crate) fn detail_rows(user: &SessionUser) -> [(&'static str, String); 4] {
    [
        ("Email", user.email.clone()),
        ("User ID", user.id.clone()),
        ("Created", user.created_on()),
        ("Last Sign In", user.last_signed_in_on()),
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session_scope(View::Dashboard);
    let deriver = session.deriver;
    let in_flight = RwSignal::new(InFlight::default());
    let page_error = RwSignal::new(None::<String>);

    let on_sign_out = Callback::new(move |()| {
        let Some(Ok(())) = in_flight.try_update(|f| f.begin(Operation::SignOut)) else {
            return;
        };
        page_error.set(None);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = BrowserGateway.sign_out().await;
            session.handle.run_if_alive(|| {
                in_flight.update(|f| f.end(Operation::SignOut));
                let Some(cache) = session.queries.try_get_value() else {
                    return;
                };
                match session.deriver.try_update(|d| finish_sign_out(d, &cache, result)) {
                    Some(Ok(route)) => session.follow(route),
                    Some(Err(message)) => page_error.set(Some(message)),
                    None => {}
                }
            });
        });
    });

    let signing_out = move || in_flight.with(|f| f.is_active(Operation::SignOut));

    view! {
        <div class="dashboard-page">
            {move || match deriver.with(|d| d.user().cloned()) {
                None => view! { <p class="dashboard-loading">{CHECKING_TEXT}</p> }.into_any(),
                Some(user) => {
                    view! {
                        <div class="dashboard-card">
                            <h1 class="dashboard-card__title">"Dashboard"</h1>
                            <p class="dashboard-card__welcome">"Welcome back!"</p>
                            <dl class="dashboard-details">
                                {detail_rows(&user)
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <dt>{label}</dt>
                                        <dd>{value}</dd>
                                    })
                                    .collect_view()}
                            </dl>
                            {move || page_error.get().map(|m| view! { <p class="auth-message auth-message--error">{m}</p> })}
                            <button
                                class="auth-button"
                                disabled=signing_out
                                on:click=move |_| on_sign_out.run(())
                            >
                                "Sign Out"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
