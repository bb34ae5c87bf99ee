//! Wire format of the hosted provider's GoTrue REST API.
//!
//! Builds URLs, request bodies and headers, and parses response bodies into
//! [`crate::gateway`] types. No I/O happens here: the browser gateway sends
//! these over `gloo-net` and the server's health probe over `reqwest`.
//!
//! Endpoints used:
//!
//! | call                 | request                                              |
//! |----------------------|------------------------------------------------------|
//! | sign up              | `POST /auth/v1/signup`                               |
//! | password sign-in     | `POST /auth/v1/token?grant_type=password`            |
//! | refresh              | `POST /auth/v1/token?grant_type=refresh_token`       |
//! | current user         | `GET  /auth/v1/user` (bearer access token)           |
//! | sign out             | `POST /auth/v1/logout` (bearer access token)         |
//! | password reset email | `POST /auth/v1/recover?redirect_to=...`              |
//! | third-party redirect | `GET  /auth/v1/authorize?provider=...&redirect_to=...` |
//! | liveness             | `GET  /auth/v1/health`                               |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::gateway::{AuthError, SessionUser, SignUpOutcome};

const API_PREFIX: &str = "/auth/v1";

/// Same-origin endpoint serving [`ProviderSettings`] to the browser.
pub const SETTINGS_PATH: &str = "/api/auth/config";

/// Connection settings the browser receives from `/api/auth/config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub url: String,
    pub anon_key: String,
    pub oauth_provider: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("provider response missing {0}")]
    Missing(&'static str),
    #[error("invalid provider url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<WireError> for AuthError {
    fn from(e: WireError) -> Self {
        Self::new(e.to_string())
    }
}

/// Token set issued by the password, refresh and OAuth grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

// =============================================================================
// URLS
// =============================================================================

impl ProviderSettings {
    fn endpoint(&self, path: &str) -> Result<Url, WireError> {
        let base = self.url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{API_PREFIX}{path}"))?)
    }

    /// # Errors
    ///
    /// Returns [`WireError::Url`] when the configured base URL is not absolute.
    pub fn signup_url(&self) -> Result<String, WireError> {
        Ok(self.endpoint("/signup")?.into())
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn password_grant_url(&self) -> Result<String, WireError> {
        self.token_url("password")
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn refresh_grant_url(&self) -> Result<String, WireError> {
        self.token_url("refresh_token")
    }

    fn token_url(&self, grant_type: &str) -> Result<String, WireError> {
        let mut url = self.endpoint("/token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);
        Ok(url.into())
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn user_url(&self) -> Result<String, WireError> {
        Ok(self.endpoint("/user")?.into())
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn logout_url(&self) -> Result<String, WireError> {
        Ok(self.endpoint("/logout")?.into())
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn health_url(&self) -> Result<String, WireError> {
        Ok(self.endpoint("/health")?.into())
    }

    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn recover_url(&self, redirect_to: &str) -> Result<String, WireError> {
        let mut url = self.endpoint("/recover")?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    /// Page the browser navigates to for a third-party sign-in.
    ///
    /// # Errors
    ///
    /// See [`ProviderSettings::signup_url`].
    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, WireError> {
        let mut url = self.endpoint("/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }

    /// `apikey` plus a bearer token; the anon key stands in when there is no
    /// user session.
    #[must_use]
    pub fn headers(&self, access_token: Option<&str>) -> Vec<(&'static str, String)> {
        let bearer = access_token.unwrap_or(&self.anon_key);
        vec![("apikey", self.anon_key.clone()), ("Authorization", format!("Bearer {bearer}"))]
    }
}

// =============================================================================
// BODIES
// =============================================================================

#[must_use]
pub fn credentials_body(email: &str, password: &str) -> Value {
    serde_json::json!({ "email": email, "password": password })
}

#[must_use]
pub fn refresh_body(refresh_token: &str) -> Value {
    serde_json::json!({ "refresh_token": refresh_token })
}

#[must_use]
pub fn recover_body(email: &str) -> Value {
    serde_json::json!({ "email": email })
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Sign-up answers with a full session when the account is auto-confirmed and
/// with a bare user object when email verification is still required.
///
/// # Errors
///
/// Returns [`WireError`] when the body is neither shape.
pub fn parse_sign_up(body: &str) -> Result<(SignUpOutcome, Option<TokenSession>), WireError> {
    let value: Value = serde_json::from_str(body)?;
    if value.get("access_token").is_some() {
        let session: TokenSession = serde_json::from_value(value)?;
        let user = session.user.clone().ok_or(WireError::Missing("user"))?;
        return Ok((SignUpOutcome::SignedIn(user), Some(session)));
    }
    let user = match value.get("user") {
        Some(nested) if !nested.is_null() => serde_json::from_value(nested.clone())?,
        _ => serde_json::from_value(value)?,
    };
    Ok((SignUpOutcome::VerificationPending(user), None))
}

/// # Errors
///
/// Returns [`WireError`] when the token fields are absent.
pub fn parse_session(body: &str) -> Result<TokenSession, WireError> {
    Ok(serde_json::from_str(body)?)
}

/// # Errors
///
/// Returns [`WireError`] when the body has no user `id`.
pub fn parse_user(body: &str) -> Result<SessionUser, WireError> {
    Ok(serde_json::from_str(body)?)
}

/// Human-readable message from an error response.
///
/// GoTrue has used several error shapes over time; the first present of
/// `msg`, `error_description`, `message`, `error` wins.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map_or_else(|| format!("request failed: {status}"), str::to_owned)
}

// =============================================================================
// OAUTH RETURN
// =============================================================================

/// What the provider appended to the callback URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackFragment {
    Tokens { access_token: String, refresh_token: String, expires_in: Option<u64> },
    Error(String),
    Empty,
}

/// Parse a callback URL's `#fragment` (or `?query`); the leading marker is
/// optional.
#[must_use]
pub fn parse_callback_fragment(raw: &str) -> CallbackFragment {
    let raw = raw.trim_start_matches(['#', '?']);
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut error = None;
    let mut error_description = None;
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse().ok(),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }
    if let Some(message) = error_description.or(error) {
        return CallbackFragment::Error(message);
    }
    match (access_token, refresh_token) {
        (Some(access_token), Some(refresh_token)) => {
            CallbackFragment::Tokens { access_token, refresh_token, expires_in }
        }
        _ => CallbackFragment::Empty,
    }
}

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod tests;
