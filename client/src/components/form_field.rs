//! One labelled input of the auth form.

#[cfg(test)]
#[path = "form_field_test.rs"]
mod form_field_test;

use authflow::controller::FormController;
use authflow::mode::FormFieldSpec;
use leptos::prelude::*;

pub const FORGOT_PASSWORD_TEXT: &str = "Forgot your password?";

/// Input class; invalid fields get the error outline.
pub(crate) fn input_class(has_error: bool) -> &'static str {
    if has_error { "auth-input auth-input--invalid" } else { "auth-input" }
}

#[component]
pub fn FormField(spec: FormFieldSpec, form: RwSignal<FormController>, on_forgot_password: Callback<()>) -> impl IntoView {
    let name = spec.name;
    let id = name.as_str();
    let value = move || form.with(|f| f.values().get(name).to_owned());
    let error = move || form.with(|f| f.error_for(name).map(str::to_owned));

    let forgot_link = spec.show_forgot_password_link.then(|| {
        view! {
            <a
                href="#"
                class="auth-field__forgot"
                on:click=move |ev| {
                    ev.prevent_default();
                    on_forgot_password.run(());
                }
            >
                {FORGOT_PASSWORD_TEXT}
            </a>
        }
    });

    view! {
        <div class="auth-field">
            <div class="auth-field__header">
                <label for=id>{spec.label}</label>
                {forgot_link}
            </div>
            <input
                id=id
                name=id
                type=spec.input_kind.as_str()
                class=move || input_class(error().is_some())
                placeholder=spec.placeholder.unwrap_or_default()
                required=spec.required
                prop:value=value
                on:input=move |ev| form.update(|f| f.set_field(name, event_target_value(&ev)))
            />
            {move || error().map(|message| view! { <p class="auth-field__error">{message}</p> })}
        </div>
    }
}
