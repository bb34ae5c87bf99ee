//! Fixed navigation targets and the redirect-callback decision.

use crate::gateway::{AuthError, SessionUser};

/// Shown on `/auth` when the callback route finds no session.
pub const CALLBACK_NO_SESSION: &str = "Authentication could not be completed. Please try again.";
/// Forwarded when the callback flow fails in an unexpected way.
pub const CALLBACK_FAILED: &str = "authentication_failed";

const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// Logical destinations of the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Auth,
    AuthCallback,
    Dashboard,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::AuthCallback => "/auth/callback",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// `/auth?error=<encoded message>`.
#[must_use]
pub fn auth_with_error(message: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", message)
        .finish();
    format!("{}?{query}", Route::Auth.path())
}

/// Decode the `error` parameter from a query string (with or without `?`).
#[must_use]
pub fn error_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "error")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

/// Absolute URL the provider should send the browser back to after OAuth.
#[must_use]
pub fn callback_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), Route::AuthCallback.path())
}

/// Page the password-reset email links back to. The page itself is served by
/// the provider's hosted flow; only the URL is built here.
#[must_use]
pub fn reset_password_url(origin: &str) -> String {
    format!("{}{RESET_PASSWORD_PATH}", origin.trim_end_matches('/'))
}

/// Where the callback route goes once its session query settles.
#[must_use]
pub fn callback_destination(result: &Result<Option<SessionUser>, AuthError>) -> String {
    match result {
        Ok(Some(_)) => Route::Dashboard.path().to_owned(),
        Ok(None) => auth_with_error(CALLBACK_NO_SESSION),
        Err(e) => {
            log::warn!("auth callback session query failed: {e}");
            auth_with_error(&e.message)
        }
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
