//! Auth screen: login/signup form, third-party sign-in, password reset.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the network side of the form. Each action runs the
//! controller's begin/perform/finish split so the form signal is never
//! borrowed across an await, and results that land after unmount are
//! dropped by the session scope's handle.
//!
//! An `?error=` query parameter (set by the callback route) seeds the form
//! error.

use authflow::controller::{FormController, Notice, SubmitOutcome, perform_submit};
use authflow::gateway::AuthGateway;
use authflow::routes;
use authflow::session::{SessionDeriver, View};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::auth_form::AuthForm;
use crate::net::gateway::BrowserGateway;
use crate::state::session::use_session_scope;
use crate::util::location;

/// Provider shown before `/api/auth/config` answers.
const DEFAULT_PROVIDER: &str = "google";

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session_scope(View::Auth);
    let initial_error = routes::error_from_query(&use_location().search.get_untracked());
    let form = RwSignal::new(FormController::default().with_form_error(initial_error));
    let provider = RwSignal::new(DEFAULT_PROVIDER.to_owned());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Some(configured) = BrowserGateway.oauth_provider().await {
            let _ = provider.try_set(configured);
        }
    });

    let deriver = session.deriver;
    Effect::new(move || {
        if deriver.with(SessionDeriver::signed_in_at_mount) {
            form.update(|f| f.set_notice(Notice::AlreadySignedIn));
        }
    });

    let on_submit = {
        let session = session.clone();
        Callback::new(move |()| {
            let ticket = match form.try_update(FormController::begin_submit) {
                Some(Ok(ticket)) => ticket,
                Some(Err(rejected)) => {
                    log::debug!("submit rejected: {rejected}");
                    return;
                }
                None => return,
            };
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let result = perform_submit(&BrowserGateway, &ticket).await;
                session.handle.run_if_alive(|| {
                    if let Some(SubmitOutcome::SignedIn(user)) = form.try_update(|f| f.finish_submit(ticket, result)) {
                        session.follow(session.deriver.try_update(|d| d.signed_in(user)).flatten());
                    }
                });
            });
        })
    };

    let on_third_party = {
        let handle = session.handle.clone();
        Callback::new(move |()| {
            let Some(origin) = location::origin() else {
                return;
            };
            let redirect = routes::callback_url(&origin);
            let provider = provider.get_untracked();
            let Some(Ok(ticket)) = form.try_update(|f| f.begin_third_party(&provider, &redirect)) else {
                return;
            };
            let handle = handle.clone();
            leptos::task::spawn_local(async move {
                let result = BrowserGateway
                    .sign_in_with_third_party(&ticket.provider, &ticket.redirect_target)
                    .await;
                handle.run_if_alive(|| form.try_update(|f| f.finish_third_party(ticket, result)));
            });
        })
    };

    let on_forgot_password = {
        let handle = session.handle.clone();
        Callback::new(move |()| {
            let Some(origin) = location::origin() else {
                return;
            };
            let redirect = routes::reset_password_url(&origin);
            let Some(Ok(ticket)) = form.try_update(|f| f.begin_password_reset(&redirect)) else {
                return;
            };
            let handle = handle.clone();
            leptos::task::spawn_local(async move {
                let result = BrowserGateway
                    .reset_password_for_email(&ticket.email, &ticket.redirect_target)
                    .await;
                handle.run_if_alive(|| form.try_update(|f| f.finish_password_reset(ticket, result)));
            });
        })
    };

    view! {
        <div class="auth-page">
            <AuthForm form provider on_submit on_third_party on_forgot_password/>
        </div>
    }
}
