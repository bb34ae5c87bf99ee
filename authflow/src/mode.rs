//! Per-mode form configuration for the auth screen.
//!
//! `config_for` is a total lookup over [`AuthMode`]; every call builds a
//! fresh value, so two calls with the same mode compare equal without
//! sharing storage.

use serde::{Deserialize, Serialize};

/// Which credential shape the auth form is collecting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    /// Display label, also used as the prefix of the third-party button.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Signup",
        }
    }
}

/// Form field identifiers. Ordering drives error rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Email,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// DOM `id`/`name` attribute for the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

/// HTML input type rendered for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Email,
    Password,
    Text,
}

impl InputKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Text => "text",
        }
    }
}

/// Validation ruleset selected by a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// Well-formed email, non-empty password.
    Login,
    /// Well-formed email, complex password, matching confirmation.
    Signup,
}

/// Static description of one rendered input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormFieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub input_kind: InputKind,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub show_forgot_password_link: bool,
}

/// Everything the auth form needs to render one mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthModeConfig {
    pub mode: AuthMode,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FormFieldSpec>,
    pub submit_label: &'static str,
    pub toggle_hint_text: &'static str,
    pub toggle_action_text: &'static str,
    pub validation_ruleset: Ruleset,
    pub show_third_party_auth: bool,
    pub show_confirm_field: bool,
}

impl AuthModeConfig {
    /// Whether this mode renders `name`.
    #[must_use]
    pub fn has_field(&self, name: FieldName) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Label for the third-party button, e.g. `"Login with Google"`.
    #[must_use]
    pub fn third_party_label(&self, provider: &str) -> String {
        format!("{} with {}", self.mode.label(), provider_display_name(provider))
    }
}

const EMAIL_FIELD: FormFieldSpec = FormFieldSpec {
    name: FieldName::Email,
    label: "Email",
    input_kind: InputKind::Email,
    placeholder: Some("m@example.com"),
    required: true,
    show_forgot_password_link: false,
};

/// Build the configuration for `mode`.
#[must_use]
pub fn config_for(mode: AuthMode) -> AuthModeConfig {
    match mode {
        AuthMode::Login => AuthModeConfig {
            mode,
            title: "Welcome back",
            description: "Login with your Google account or email",
            fields: vec![
                EMAIL_FIELD,
                FormFieldSpec {
                    name: FieldName::Password,
                    label: "Password",
                    input_kind: InputKind::Password,
                    placeholder: None,
                    required: true,
                    show_forgot_password_link: true,
                },
            ],
            submit_label: "Login",
            toggle_hint_text: "Don't have an account?",
            toggle_action_text: "Sign up",
            validation_ruleset: Ruleset::Login,
            show_third_party_auth: true,
            show_confirm_field: false,
        },
        AuthMode::Signup => AuthModeConfig {
            mode,
            title: "Create an account",
            description: "Sign up with your Google account or email",
            fields: vec![
                EMAIL_FIELD,
                FormFieldSpec {
                    name: FieldName::Password,
                    label: "Password",
                    input_kind: InputKind::Password,
                    placeholder: None,
                    required: true,
                    show_forgot_password_link: false,
                },
                FormFieldSpec {
                    name: FieldName::ConfirmPassword,
                    label: "Confirm Password",
                    input_kind: InputKind::Password,
                    placeholder: None,
                    required: true,
                    show_forgot_password_link: false,
                },
            ],
            submit_label: "Sign up",
            toggle_hint_text: "Already have an account?",
            toggle_action_text: "Login",
            validation_ruleset: Ruleset::Signup,
            show_third_party_auth: true,
            show_confirm_field: true,
        },
    }
}

/// `"google"` -> `"Google"`.
pub(crate) fn provider_display_name(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;
