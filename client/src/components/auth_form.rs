//! Login/signup card.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure rendering over a [`FormController`] signal. The page owns the
//! network callbacks; this component only edits values and toggles the mode
//! locally.
//!
//! The field list is keyed on the mode memo, not the controller, so typing
//! does not rebuild the inputs (which would drop focus).

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use authflow::controller::{FormController, Notice, Operation};
use authflow::mode::config_for;
use leptos::prelude::*;

use crate::components::form_field::FormField;

/// Class of the status line under the form.
pub(crate) fn message_class(is_error: bool) -> &'static str {
    if is_error { "auth-message auth-message--error" } else { "auth-message auth-message--info" }
}

#[component]
pub fn AuthForm(
    form: RwSignal<FormController>,
    #[prop(into)] provider: Signal<String>,
    on_submit: Callback<()>,
    on_third_party: Callback<()>,
    on_forgot_password: Callback<()>,
) -> impl IntoView {
    let mode = Memo::new(move |_| form.with(FormController::mode));
    let config = Memo::new(move |_| config_for(mode.get()));

    let submitting = move || form.with(|f| f.is_in_flight(Operation::Submit));
    let redirecting = move || form.with(|f| f.is_in_flight(Operation::ThirdParty));
    let form_error = move || form.with(|f| f.form_error().map(str::to_owned));
    let notice = move || form.with(|f| f.notice().map(Notice::message));

    view! {
        <div class="auth-card">
            <div class="auth-card__header">
                <h1 class="auth-card__title">{move || config.with(|c| c.title)}</h1>
                <p class="auth-card__subtitle">{move || config.with(|c| c.description)}</p>
            </div>
            <Show when=move || config.with(|c| c.show_third_party_auth)>
                <button
                    type="button"
                    class="auth-button auth-button--outline"
                    disabled=redirecting
                    on:click=move |_| on_third_party.run(())
                >
                    {move || config.with(|c| c.third_party_label(&provider.get()))}
                </button>
                <div class="auth-divider">
                    <span>"Or continue with"</span>
                </div>
            </Show>
            <form
                class="auth-form"
                novalidate=true
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                {move || {
                    config
                        .get()
                        .fields
                        .into_iter()
                        .map(|spec| view! { <FormField spec form on_forgot_password/> })
                        .collect_view()
                }}
                {move || form_error().map(|m| view! { <p class=message_class(true)>{m}</p> })}
                {move || notice().map(|m| view! { <p class=message_class(false)>{m}</p> })}
                <button type="submit" class="auth-button" disabled=submitting>
                    {move || form.with(FormController::submit_label)}
                </button>
            </form>
            <p class="auth-card__toggle">
                {move || config.with(|c| c.toggle_hint_text)}
                " "
                <a
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        form.update(FormController::toggle_mode);
                    }
                >
                    {move || config.with(|c| c.toggle_action_text)}
                </a>
            </p>
        </div>
    }
}
