//! Credential validation rules.
//!
//! Raw form values go in; either typed [`Credentials`] or a per-field error
//! map comes out. Signup credentials can only be built by [`validate`], so a
//! `SignupCredentials` value always carries a complex password and a
//! matching confirmation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use serde::{Deserialize, Serialize};

use crate::mode::{FieldName, Ruleset};

pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_COMPLEXITY: &str = "Password must be at least 8 characters and contain at least one uppercase letter, one lowercase letter, and one number";
pub const CONFIRM_REQUIRED: &str = "Please confirm your password";
pub const PASSWORD_MISMATCH: &str = "Passwords don't match";

const MIN_PASSWORD_LEN: usize = 8;

/// Field-scoped error messages, ordered by [`FieldName`].
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Raw, untrusted input as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FieldValues {
    #[must_use]
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, name: FieldName, value: String) {
        match name {
            FieldName::Email => self.email = value,
            FieldName::Password => self.password = value,
            FieldName::ConfirmPassword => self.confirm_password = value,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty() && self.confirm_password.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Signup input that passed every rule. Only [`validate`] constructs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupCredentials {
    email: String,
    password: String,
}

impl SignupCredentials {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Validated credentials, one variant per mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Login(LoginCredentials),
    Signup(SignupCredentials),
}

impl Credentials {
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Login(c) => &c.email,
            Self::Signup(c) => &c.email,
        }
    }
}

/// Fields checked by a ruleset, in render order.
#[must_use]
pub fn fields_for(ruleset: Ruleset) -> &'static [FieldName] {
    match ruleset {
        Ruleset::Login => &[FieldName::Email, FieldName::Password],
        Ruleset::Signup => &[FieldName::Email, FieldName::Password, FieldName::ConfirmPassword],
    }
}

/// Error for a single field under `ruleset`, or `None` when it passes.
///
/// Fields outside the ruleset always pass.
#[must_use]
pub fn field_error(ruleset: Ruleset, values: &FieldValues, field: FieldName) -> Option<&'static str> {
    match (ruleset, field) {
        (_, FieldName::Email) => (!is_valid_email(values.email.trim())).then_some(EMAIL_INVALID),
        (Ruleset::Login, FieldName::Password) => values.password.is_empty().then_some(PASSWORD_REQUIRED),
        (Ruleset::Signup, FieldName::Password) => {
            (!meets_password_complexity(&values.password)).then_some(PASSWORD_COMPLEXITY)
        }
        (Ruleset::Signup, FieldName::ConfirmPassword) => {
            if values.confirm_password.is_empty() {
                Some(CONFIRM_REQUIRED)
            } else if values.confirm_password != values.password {
                Some(PASSWORD_MISMATCH)
            } else {
                None
            }
        }
        (Ruleset::Login, FieldName::ConfirmPassword) => None,
    }
}

/// Run every rule of `ruleset` against `values`.
///
/// # Errors
///
/// Returns the full field-error map when any rule fails.
pub fn validate(ruleset: Ruleset, values: &FieldValues) -> Result<Credentials, FieldErrors> {
    let errors: FieldErrors = fields_for(ruleset)
        .iter()
        .filter_map(|&field| field_error(ruleset, values, field).map(|msg| (field, msg.to_owned())))
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    let email = values.email.trim().to_owned();
    let password = values.password.clone();
    Ok(match ruleset {
        Ruleset::Login => Credentials::Login(LoginCredentials { email, password }),
        Ruleset::Signup => Credentials::Signup(SignupCredentials { email, password }),
    })
}

/// Validate only the email field (password-reset requests).
///
/// # Errors
///
/// Returns an error map holding the email message when the address is malformed.
pub fn validate_email(values: &FieldValues) -> Result<String, FieldErrors> {
    let email = values.email.trim();
    if is_valid_email(email) {
        Ok(email.to_owned())
    } else {
        Err(FieldErrors::from([(FieldName::Email, EMAIL_INVALID.to_owned())]))
    }
}

/// At least eight characters with a lowercase letter, an uppercase letter and
/// a digit. Any missing class fails the whole check.
#[must_use]
pub fn meets_password_complexity(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// `local@domain.tld`: local part of `[A-Za-z0-9_'+.-]` not ending in a
/// dot, then hyphenated alphanumeric labels and an alphabetic TLD of two or
/// more letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Email grammar check. Leading and doubled dots are rejected outside the
/// pattern (no lookahead in `regex`).
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
