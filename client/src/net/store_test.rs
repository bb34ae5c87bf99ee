use super::*;

fn user(id: &str) -> SessionUser {
    SessionUser { id: id.to_owned(), email: format!("{id}@example.com"), ..SessionUser::default() }
}

fn tokens(user: Option<SessionUser>) -> TokenSession {
    TokenSession { access_token: "a".into(), refresh_token: "r".into(), expires_in: Some(3600), user }
}

#[test]
fn empty_store_replays_signed_out_initial_session() {
    let store = SessionStore::default();
    assert_eq!(store.access_token(), None);
    assert_eq!(store.initial_event(), Some(SessionEvent::new(SessionEventKind::InitialSession, None)));
}

#[test]
fn install_with_user_reports_kind() {
    let mut store = SessionStore::default();
    let event = store.install(tokens(Some(user("u1"))), SessionEventKind::SignedIn);
    assert_eq!(event, SessionEvent::new(SessionEventKind::SignedIn, Some(user("u1"))));
    assert_eq!(store.access_token(), Some("a"));
    assert_eq!(store.refresh_token(), Some("r"));
    assert_eq!(
        store.initial_event(),
        Some(SessionEvent::new(SessionEventKind::InitialSession, Some(user("u1"))))
    );
}

#[test]
fn tokens_without_user_defer_initial_event() {
    let mut store = SessionStore::default();
    let _ = store.install(tokens(None), SessionEventKind::SignedIn);
    assert_eq!(store.initial_event(), None);
    assert_eq!(store.set_user(user("u1")), None);
    assert_eq!(store.user(), Some(&user("u1")));
}

#[test]
fn set_user_reports_changes_only() {
    let mut store = SessionStore::default();
    assert_eq!(store.set_user(user("u1")), None);
    assert_eq!(store.user(), None);

    let _ = store.install(tokens(Some(user("u1"))), SessionEventKind::SignedIn);
    assert_eq!(store.set_user(user("u1")), None);
    let mut renamed = user("u1");
    renamed.email = "new@example.com".into();
    assert_eq!(
        store.set_user(renamed.clone()),
        Some(SessionEvent::new(SessionEventKind::UserUpdated, Some(renamed)))
    );
}

#[test]
fn clear_signs_out_once() {
    let mut store = SessionStore::default();
    let _ = store.install(tokens(Some(user("u1"))), SessionEventKind::SignedIn);
    assert_eq!(store.clear(), Some(SessionEvent::new(SessionEventKind::SignedOut, None)));
    assert_eq!(store.clear(), None);
    assert_eq!(store.user(), None);
}

#[test]
fn settings_are_kept() {
    let mut store = SessionStore::default();
    store.set_settings(ProviderSettings {
        url: "https://abc.supabase.co".into(),
        anon_key: "k".into(),
        oauth_provider: "google".into(),
    });
    assert_eq!(store.settings().map(|s| s.oauth_provider.as_str()), Some("google"));
}
