use super::*;
use crate::testing::user;

fn event(kind: SessionEventKind, user: Option<SessionUser>) -> SessionEvent {
    SessionEvent::new(kind, user)
}

// =============================================================================
// mount query
// =============================================================================

#[test]
fn starts_pending() {
    let deriver = SessionDeriver::new(View::Dashboard);
    assert!(deriver.is_pending());
    assert_eq!(deriver.user(), None);
}

#[test]
fn no_user_on_dashboard_navigates_to_auth_once() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    let navigations: Vec<_> = [
        deriver.resolve_query(Ok(None)),
        deriver.resolve_query(Ok(None)),
        deriver.signed_out(),
        deriver.apply_event(&event(SessionEventKind::SignedOut, None)),
    ]
    .into_iter()
    .flatten()
    .collect();

    assert_eq!(navigations, vec![Route::Auth]);
    assert_eq!(deriver.state(), &AuthSessionState::Unauthenticated);
}

#[test]
fn user_on_auth_screen_navigates_to_dashboard_once() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let mut navigations = Vec::new();
    navigations.extend(deriver.resolve_query(Ok(Some(user("u1")))));
    for _ in 0..5 {
        navigations.extend(deriver.signed_in(user("u1")));
        navigations.extend(deriver.apply_event(&event(SessionEventKind::TokenRefreshed, Some(user("u1")))));
    }

    assert_eq!(navigations, vec![Route::Dashboard]);
    assert_eq!(deriver.user(), Some(&user("u1")));
}

#[test]
fn query_error_fails_safe_to_unauthenticated() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    let nav = deriver.resolve_query(Err(AuthError::new("timeout")));
    assert_eq!(nav, Some(Route::Auth));
    assert_eq!(deriver.state(), &AuthSessionState::Unauthenticated);
}

#[test]
fn unauthenticated_auth_screen_stays_put() {
    let mut deriver = SessionDeriver::new(View::Auth);
    assert_eq!(deriver.resolve_query(Ok(None)), None);
    assert_eq!(deriver.state(), &AuthSessionState::Unauthenticated);
}

#[test]
fn authenticated_dashboard_stays_put() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    assert_eq!(deriver.resolve_query(Ok(Some(user("u1")))), None);
    assert_eq!(deriver.user(), Some(&user("u1")));
}

#[test]
fn home_redirects_signed_in_users() {
    let mut deriver = SessionDeriver::new(View::Home);
    assert_eq!(deriver.resolve_query(Ok(Some(user("u1")))), Some(Route::Dashboard));
    let mut home = SessionDeriver::new(View::Home);
    assert_eq!(home.resolve_query(Ok(None)), None);
}

#[test]
fn late_query_does_not_override_event() {
    let mut deriver = SessionDeriver::new(View::Auth);
    assert_eq!(deriver.apply_event(&event(SessionEventKind::SignedIn, Some(user("u1")))), Some(Route::Dashboard));
    assert_eq!(deriver.resolve_query(Ok(None)), None);
    assert_eq!(deriver.user(), Some(&user("u1")));
}

// =============================================================================
// transitions after resolution
// =============================================================================

#[test]
fn sign_in_after_unauthenticated_navigates_to_dashboard() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let _ = deriver.resolve_query(Ok(None));
    assert_eq!(deriver.signed_in(user("u1")), Some(Route::Dashboard));
}

#[test]
fn sign_out_event_on_dashboard_navigates_to_auth() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    let _ = deriver.resolve_query(Ok(Some(user("u1"))));
    assert_eq!(deriver.apply_event(&event(SessionEventKind::SignedOut, None)), Some(Route::Auth));
    assert_eq!(deriver.apply_event(&event(SessionEventKind::SignedOut, None)), None);
}

#[test]
fn user_updated_refreshes_user_without_navigation() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    let _ = deriver.resolve_query(Ok(Some(user("u1"))));
    let mut renamed = user("u1");
    renamed.email = "new@example.com".into();
    assert_eq!(deriver.apply_event(&event(SessionEventKind::UserUpdated, Some(renamed.clone()))), None);
    assert_eq!(deriver.user(), Some(&renamed));
}

#[test]
fn initial_session_without_user_resolves_only_pending() {
    let mut pending = SessionDeriver::new(View::Dashboard);
    assert_eq!(pending.apply_event(&event(SessionEventKind::InitialSession, None)), Some(Route::Auth));

    let mut resolved = SessionDeriver::new(View::Dashboard);
    let _ = resolved.resolve_query(Ok(Some(user("u1"))));
    assert_eq!(resolved.apply_event(&event(SessionEventKind::InitialSession, None)), None);
    assert!(resolved.user().is_some());
}

#[test]
fn token_refresh_without_user_is_ignored() {
    let mut deriver = SessionDeriver::new(View::Dashboard);
    let _ = deriver.resolve_query(Ok(Some(user("u1"))));
    assert_eq!(deriver.apply_event(&event(SessionEventKind::TokenRefreshed, None)), None);
    assert!(deriver.user().is_some());
}

#[test]
fn redirect_table() {
    let authed = AuthSessionState::Authenticated(user("u1"));
    assert_eq!(redirect_for(View::Auth, &authed), Some(Route::Dashboard));
    assert_eq!(redirect_for(View::Dashboard, &authed), None);
    assert_eq!(redirect_for(View::Dashboard, &AuthSessionState::Unauthenticated), Some(Route::Auth));
    assert_eq!(redirect_for(View::Auth, &AuthSessionState::Pending), None);
    assert_eq!(redirect_for(View::Dashboard, &AuthSessionState::Pending), None);
}

// =============================================================================
// signed in at mount
// =============================================================================

#[test]
fn mount_query_user_counts_as_signed_in_at_mount() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let _ = deriver.resolve_query(Ok(Some(user("u1"))));
    assert!(deriver.signed_in_at_mount());
}

#[test]
fn initial_session_event_counts_as_signed_in_at_mount() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let _ = deriver.apply_event(&event(SessionEventKind::InitialSession, Some(user("u1"))));
    assert!(deriver.signed_in_at_mount());
}

#[test]
fn fresh_sign_in_is_not_signed_in_at_mount() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let _ = deriver.resolve_query(Ok(None));
    assert_eq!(deriver.signed_in(user("u1")), Some(Route::Dashboard));
    assert!(!deriver.signed_in_at_mount());

    let mut via_event = SessionDeriver::new(View::Auth);
    let _ = via_event.resolve_query(Ok(None));
    let _ = via_event.apply_event(&event(SessionEventKind::SignedIn, Some(user("u1"))));
    assert!(!via_event.signed_in_at_mount());
}

#[test]
fn sign_out_clears_signed_in_at_mount() {
    let mut deriver = SessionDeriver::new(View::Auth);
    let _ = deriver.resolve_query(Ok(Some(user("u1"))));
    let _ = deriver.signed_out();
    let _ = deriver.signed_in(user("u1"));
    assert!(!deriver.signed_in_at_mount());
}
