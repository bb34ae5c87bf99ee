//! Browser implementation of [`AuthGateway`] over the provider's REST API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, tokens held in a
//! per-tab [`SessionStore`], change events fanned out through one
//! [`SessionEventHub`].
//! Server-side (SSR): stubs. Session state is only meaningful in the browser,
//! so SSR renders every auth-gated view as pending.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes an [`AuthError`] carrying the provider's own message
//! when it sent one (`gotrue::error_message`), or the transport error text.
//! A rejected access token is not an error for `current_session`: the gateway
//! tries the refresh grant and reports "no session" if that fails too.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use authflow::events::{SessionListener, Subscription};
use authflow::gateway::{AuthError, AuthGateway, SessionUser, SignUpOutcome};
use authflow::gotrue::{self, CallbackFragment};

#[cfg(feature = "hydrate")]
use authflow::events::{SessionEvent, SessionEventHub, SessionEventKind};
#[cfg(feature = "hydrate")]
use authflow::gotrue::{ProviderSettings, TokenSession};
#[cfg(feature = "hydrate")]
use super::store::SessionStore;

#[cfg(feature = "hydrate")]
thread_local! {
    static STORE: std::cell::RefCell<SessionStore> = std::cell::RefCell::new(SessionStore::default());
}

#[cfg(feature = "hydrate")]
static HUB: std::sync::LazyLock<SessionEventHub> = std::sync::LazyLock::new(SessionEventHub::new);

/// Handle to the tab's provider session. Zero-sized; all state is per tab.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserGateway;

#[cfg(any(test, feature = "hydrate"))]
fn settings_failed_message(status: u16) -> String {
    format!("auth config request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Body of a 2xx response, or the provider's error message.
#[cfg(any(test, feature = "hydrate"))]
fn checked(status: u16, body: String) -> Result<String, AuthError> {
    if is_success(status) { Ok(body) } else { Err(AuthError::new(gotrue::error_message(status, &body))) }
}

/// Statuses meaning the presented token is no longer valid.
#[cfg(any(test, feature = "hydrate"))]
fn is_token_rejected(status: u16) -> bool {
    matches!(status, 400 | 401 | 403)
}

#[cfg(not(feature = "hydrate"))]
fn server_only() -> AuthError {
    AuthError::new("not available on server")
}

// =============================================================================
// HTTP (hydrate)
// =============================================================================

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy)]
enum Method {
    Get,
    Post,
}

#[cfg(feature = "hydrate")]
fn transport_error(e: gloo_net::Error) -> AuthError {
    AuthError::new(e.to_string())
}

#[cfg(feature = "hydrate")]
fn with_store<T>(apply: impl FnOnce(&mut SessionStore) -> T) -> T {
    STORE.with(|store| apply(&mut store.borrow_mut()))
}

#[cfg(feature = "hydrate")]
fn broadcast(event: Option<SessionEvent>) {
    if let Some(event) = event {
        HUB.emit(&event);
    }
}

/// Send one request and return `(status, body)` whatever the status.
#[cfg(feature = "hydrate")]
async fn send(
    method: Method,
    url: &str,
    headers: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
) -> Result<(u16, String), AuthError> {
    let mut builder = match method {
        Method::Get => gloo_net::http::Request::get(url),
        Method::Post => gloo_net::http::Request::post(url),
    };
    for (name, value) in &headers {
        builder = builder.header(name, value);
    }
    let request = match body {
        Some(body) => builder.json(&body).map_err(transport_error)?,
        None => builder.build().map_err(transport_error)?,
    };
    let resp = request.send().await.map_err(transport_error)?;
    let status = resp.status();
    let text = resp.text().await.map_err(transport_error)?;
    Ok((status, text))
}

/// Public provider settings, fetched from the server once per tab.
#[cfg(feature = "hydrate")]
async fn settings() -> Result<ProviderSettings, AuthError> {
    if let Some(settings) = with_store(|s| s.settings().cloned()) {
        return Ok(settings);
    }
    let resp = gloo_net::http::Request::get(gotrue::SETTINGS_PATH)
        .send()
        .await
        .map_err(transport_error)?;
    if !resp.ok() {
        return Err(AuthError::new(settings_failed_message(resp.status())));
    }
    let settings: ProviderSettings = resp.json().await.map_err(transport_error)?;
    with_store(|s| s.set_settings(settings.clone()));
    Ok(settings)
}

#[cfg(feature = "hydrate")]
async fn fetch_user(settings: &ProviderSettings, access_token: &str) -> Result<SessionUser, AuthError> {
    let (status, body) = send(Method::Get, &settings.user_url()?, settings.headers(Some(access_token)), None).await?;
    Ok(gotrue::parse_user(&checked(status, body)?)?)
}

// =============================================================================
// CALLBACK
// =============================================================================

impl BrowserGateway {
    /// Take over the tokens the provider appended to the callback URL.
    ///
    /// Returns `Ok(true)` when tokens were installed and `Ok(false)` when the
    /// fragment carried nothing. The user is resolved by the next
    /// `current_session` call.
    ///
    /// # Errors
    ///
    /// Returns the provider's `error_description` (or `error`) verbatim.
    pub fn absorb_callback(self, fragment: &str) -> Result<bool, AuthError> {
        match gotrue::parse_callback_fragment(fragment) {
            CallbackFragment::Tokens { access_token, refresh_token, expires_in } => {
                #[cfg(feature = "hydrate")]
                {
                    let tokens = TokenSession { access_token, refresh_token, expires_in, user: None };
                    let _ = with_store(|s| s.install(tokens, SessionEventKind::SignedIn));
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = (access_token, refresh_token, expires_in);
                }
                Ok(true)
            }
            CallbackFragment::Error(message) => Err(AuthError::new(message)),
            CallbackFragment::Empty => Ok(false),
        }
    }

    /// Provider named by the server config, for the third-party button label.
    pub async fn oauth_provider(self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            settings().await.ok().map(|s| s.oauth_provider)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

#[async_trait::async_trait(?Send)]
impl AuthGateway for BrowserGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let settings = settings().await?;
            let body = gotrue::credentials_body(email, password);
            let (status, text) = send(Method::Post, &settings.signup_url()?, settings.headers(None), Some(body)).await?;
            let (outcome, tokens) = gotrue::parse_sign_up(&checked(status, text)?)?;
            if let Some(tokens) = tokens {
                broadcast(Some(with_store(|s| s.install(tokens, SessionEventKind::SignedIn))));
            }
            Ok(outcome)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(server_only())
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let settings = settings().await?;
            let body = gotrue::credentials_body(email, password);
            let (status, text) =
                send(Method::Post, &settings.password_grant_url()?, settings.headers(None), Some(body)).await?;
            let mut tokens = gotrue::parse_session(&checked(status, text)?)?;
            let user = match tokens.user.clone() {
                Some(user) => user,
                None => fetch_user(&settings, &tokens.access_token).await?,
            };
            tokens.user = Some(user.clone());
            broadcast(Some(with_store(|s| s.install(tokens, SessionEventKind::SignedIn))));
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(server_only())
        }
    }

    async fn sign_in_with_third_party(&self, provider: &str, redirect_target: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let settings = settings().await?;
            let url = settings.authorize_url(provider, redirect_target)?;
            let window = web_sys::window().ok_or_else(|| AuthError::new("no browser window"))?;
            window
                .location()
                .set_href(&url)
                .map_err(|_| AuthError::new("could not open the provider sign-in page"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (provider, redirect_target);
            Err(server_only())
        }
    }

    async fn current_session(&self) -> Result<Option<SessionUser>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let Some(token) = with_store(|s| s.access_token().map(str::to_owned)) else {
                return Ok(None);
            };
            if let Some(user) = with_store(|s| s.user().cloned()) {
                return Ok(Some(user));
            }
            let settings = settings().await?;
            let (status, body) = send(Method::Get, &settings.user_url()?, settings.headers(Some(&token)), None).await?;
            if is_token_rejected(status) {
                log::info!("access token rejected ({status}); trying refresh grant");
                return self.refresh_session().await;
            }
            let user = gotrue::parse_user(&checked(status, body)?)?;
            broadcast(with_store(|s| s.set_user(user.clone())));
            Ok(Some(user))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    async fn refresh_session(&self) -> Result<Option<SessionUser>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let Some(refresh_token) = with_store(|s| s.refresh_token().map(str::to_owned)) else {
                return Ok(None);
            };
            let settings = settings().await?;
            let body = gotrue::refresh_body(&refresh_token);
            let (status, text) =
                send(Method::Post, &settings.refresh_grant_url()?, settings.headers(None), Some(body)).await?;
            if is_token_rejected(status) {
                log::info!("refresh token rejected ({status}); clearing session");
                broadcast(with_store(SessionStore::clear));
                return Ok(None);
            }
            let mut tokens = gotrue::parse_session(&checked(status, text)?)?;
            if tokens.user.is_none() {
                tokens.user = Some(fetch_user(&settings, &tokens.access_token).await?);
            }
            let event = with_store(|s| s.install(tokens, SessionEventKind::TokenRefreshed));
            let user = event.user.clone();
            broadcast(Some(event));
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            if let Some(token) = with_store(|s| s.access_token().map(str::to_owned)) {
                let settings = settings().await?;
                let (status, body) =
                    send(Method::Post, &settings.logout_url()?, settings.headers(Some(&token)), None).await?;
                // An already-invalid token still ends the local session.
                if !is_token_rejected(status) && status != 404 {
                    checked(status, body)?;
                }
            }
            broadcast(with_store(SessionStore::clear));
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(server_only())
        }
    }

    async fn reset_password_for_email(&self, email: &str, redirect_target: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let settings = settings().await?;
            let body = gotrue::recover_body(email);
            let (status, text) =
                send(Method::Post, &settings.recover_url(redirect_target)?, settings.headers(None), Some(body)).await?;
            checked(status, text).map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, redirect_target);
            Err(server_only())
        }
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        #[cfg(feature = "hydrate")]
        {
            let subscription = HUB.subscribe(listener.clone());
            if let Some(initial) = with_store(|s| s.initial_event()) {
                listener(&initial);
            }
            subscription
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = listener;
            Subscription::inert()
        }
    }
}
