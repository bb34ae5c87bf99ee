use super::*;

fn settings() -> ProviderSettings {
    ProviderSettings {
        url: "https://abc.supabase.co/".into(),
        anon_key: "anon-key".into(),
        oauth_provider: "google".into(),
    }
}

const USER_JSON: &str = r#"{
    "id": "8d1c",
    "email": "u1@example.com",
    "created_at": "2024-05-01T10:00:00.000Z",
    "last_sign_in_at": null,
    "app_metadata": {"provider": "email"}
}"#;

// =============================================================================
// urls
// =============================================================================

#[test]
fn endpoints_strip_trailing_slash() {
    let s = settings();
    assert_eq!(s.signup_url().unwrap(), "https://abc.supabase.co/auth/v1/signup");
    assert_eq!(s.user_url().unwrap(), "https://abc.supabase.co/auth/v1/user");
    assert_eq!(s.logout_url().unwrap(), "https://abc.supabase.co/auth/v1/logout");
    assert_eq!(s.health_url().unwrap(), "https://abc.supabase.co/auth/v1/health");
}

#[test]
fn token_urls_carry_grant_type() {
    let s = settings();
    assert_eq!(s.password_grant_url().unwrap(), "https://abc.supabase.co/auth/v1/token?grant_type=password");
    assert_eq!(s.refresh_grant_url().unwrap(), "https://abc.supabase.co/auth/v1/token?grant_type=refresh_token");
}

#[test]
fn authorize_url_encodes_redirect() {
    let url = settings()
        .authorize_url("google", "http://localhost:3000/auth/callback")
        .unwrap();
    assert_eq!(
        url,
        "https://abc.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
    );
}

#[test]
fn recover_url_encodes_redirect() {
    let url = settings().recover_url("https://app.example.com/auth/reset-password").unwrap();
    assert!(url.starts_with("https://abc.supabase.co/auth/v1/recover?redirect_to=https%3A%2F%2F"));
}

#[test]
fn relative_base_url_is_rejected() {
    let s = ProviderSettings { url: "not a url".into(), ..settings() };
    assert!(matches!(s.signup_url(), Err(WireError::Url(_))));
}

#[test]
fn headers_fall_back_to_anon_key() {
    let s = settings();
    assert_eq!(
        s.headers(None),
        vec![("apikey", "anon-key".to_owned()), ("Authorization", "Bearer anon-key".to_owned())]
    );
    assert_eq!(s.headers(Some("jwt"))[1].1, "Bearer jwt");
}

// =============================================================================
// responses
// =============================================================================

#[test]
fn sign_up_without_tokens_is_verification_pending() {
    let (outcome, session) = parse_sign_up(USER_JSON).unwrap();
    assert_eq!(session, None);
    match outcome {
        SignUpOutcome::VerificationPending(user) => {
            assert_eq!(user.id, "8d1c");
            assert_eq!(user.created_on(), "2024-05-01");
            assert_eq!(user.last_signed_in_on(), "N/A");
        }
        other @ SignUpOutcome::SignedIn(_) => panic!("expected pending, got {other:?}"),
    }
}

#[test]
fn sign_up_with_tokens_is_signed_in() {
    let body = format!(
        r#"{{"access_token":"a","refresh_token":"r","expires_in":3600,"token_type":"bearer","user":{USER_JSON}}}"#
    );
    let (outcome, session) = parse_sign_up(&body).unwrap();
    assert!(matches!(outcome, SignUpOutcome::SignedIn(ref u) if u.email == "u1@example.com"));
    assert_eq!(session.map(|s| s.expires_in), Some(Some(3600)));
}

#[test]
fn sign_up_session_without_user_is_missing() {
    let body = r#"{"access_token":"a","refresh_token":"r"}"#;
    assert!(matches!(parse_sign_up(body), Err(WireError::Missing("user"))));
}

#[test]
fn session_requires_tokens() {
    assert!(parse_session(r#"{"access_token":"a"}"#).is_err());
    let session = parse_session(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
    assert_eq!(session.user, None);
}

#[test]
fn user_requires_id() {
    assert!(parse_user(r#"{"email":"x@y.z"}"#).is_err());
    assert_eq!(parse_user(USER_JSON).unwrap().email, "u1@example.com");
}

#[test]
fn error_message_priority() {
    assert_eq!(error_message(400, r#"{"code":400,"msg":"User already registered"}"#), "User already registered");
    assert_eq!(
        error_message(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
        "Invalid login credentials"
    );
    assert_eq!(error_message(500, r#"{"message":"boom"}"#), "boom");
    assert_eq!(error_message(401, r#"{"error":"unauthorized"}"#), "unauthorized");
    assert_eq!(error_message(502, "<html>bad gateway</html>"), "request failed: 502");
    assert_eq!(error_message(400, r#"{"msg":""}"#), "request failed: 400");
}

#[test]
fn wire_error_becomes_auth_error() {
    let err: AuthError = WireError::Missing("user").into();
    assert_eq!(err.message, "provider response missing user");
}

#[test]
fn bodies() {
    assert_eq!(credentials_body("a@b.co", "pw")["email"], "a@b.co");
    assert_eq!(refresh_body("r")["refresh_token"], "r");
    assert_eq!(recover_body("a@b.co"), serde_json::json!({"email": "a@b.co"}));
}

// =============================================================================
// oauth return
// =============================================================================

#[test]
fn callback_tokens() {
    let parsed = parse_callback_fragment("#access_token=a&expires_in=3600&refresh_token=r&token_type=bearer");
    assert_eq!(
        parsed,
        CallbackFragment::Tokens { access_token: "a".into(), refresh_token: "r".into(), expires_in: Some(3600) }
    );
}

#[test]
fn callback_error_prefers_description() {
    let parsed = parse_callback_fragment("#error=access_denied&error_description=User+cancelled+login");
    assert_eq!(parsed, CallbackFragment::Error("User cancelled login".into()));
    assert_eq!(parse_callback_fragment("?error=server_error"), CallbackFragment::Error("server_error".into()));
}

#[test]
fn callback_without_tokens_is_empty() {
    assert_eq!(parse_callback_fragment(""), CallbackFragment::Empty);
    assert_eq!(parse_callback_fragment("#access_token=a"), CallbackFragment::Empty);
}
