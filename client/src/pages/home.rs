//! Public landing page. Signed-in visitors go straight to the dashboard.

use authflow::routes::Route;
use authflow::session::View;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::use_session_scope;

#[component]
pub fn HomePage() -> impl IntoView {
    let _ = use_session_scope(View::Home);

    view! {
        <div class="home-page">
            <h1 class="home-page__title">"Welcome"</h1>
            <p class="home-page__subtitle">"Sign in or create an account to open your dashboard."</p>
            <div class="home-page__actions">
                <A href=Route::Auth.path() attr:class="auth-button">
                    "Get Started"
                </A>
            </div>
            <p class="home-page__subtitle">
                <A href=Route::Auth.path()>"Create an account"</A>
                " or "
                <A href=Route::Auth.path()>"Sign in"</A>
            </p>
        </div>
    }
}
