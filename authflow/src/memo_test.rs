use super::*;
use crate::gateway::AuthGateway;
use crate::testing::{MockGateway, user};

fn lookup(gateway: &Rc<MockGateway>) -> impl FnOnce() -> LocalBoxFuture<'static, SessionResult> {
    let gateway = gateway.clone();
    move || async move { gateway.current_session().await }.boxed_local()
}

#[tokio::test]
async fn repeated_fetches_share_one_lookup() {
    let gateway = Rc::new(MockGateway::new());
    *gateway.session.borrow_mut() = Ok(Some(user("u1")));
    let cache = SessionQueryCache::new();

    let (a, b) = futures::join!(cache.fetch(CURRENT_SESSION, lookup(&gateway)), cache.fetch(CURRENT_SESSION, lookup(&gateway)));
    let again = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;

    assert_eq!(a, Ok(Some(user("u1"))));
    assert_eq!(b, a);
    assert_eq!(again, a);
    assert_eq!(gateway.session_queries.get(), 1);
    assert!(cache.is_cached(CURRENT_SESSION));
}

#[tokio::test]
async fn error_invalidates_entry_so_next_fetch_retries() {
    let gateway = Rc::new(MockGateway::new());
    *gateway.session.borrow_mut() = Err(AuthError::new("network down"));
    let cache = SessionQueryCache::new();

    let first = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    assert_eq!(first, Err(AuthError::new("network down")));
    assert!(!cache.is_cached(CURRENT_SESSION));

    *gateway.session.borrow_mut() = Ok(None);
    let second = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    assert_eq!(second, Ok(None));
    assert_eq!(gateway.session_queries.get(), 2);
}

#[tokio::test]
async fn clear_forces_fresh_lookup() {
    let gateway = Rc::new(MockGateway::new());
    *gateway.session.borrow_mut() = Ok(Some(user("u1")));
    let cache = SessionQueryCache::new();
    let _ = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;

    cache.clear();
    *gateway.session.borrow_mut() = Ok(None);
    let after = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;

    assert_eq!(after, Ok(None));
    assert_eq!(gateway.session_queries.get(), 2);
}

#[tokio::test]
async fn stale_failure_after_clear_keeps_fresh_entry() {
    let gateway = Rc::new(MockGateway::new());
    *gateway.session.borrow_mut() = Ok(Some(user("u2")));
    let cache = SessionQueryCache::new();
    let (tx, rx) = futures::channel::oneshot::channel::<SessionResult>();

    let mut stale = Box::pin(cache.fetch(CURRENT_SESSION, move || async move {
        rx.await.unwrap_or_else(|_| Err(AuthError::new("sender dropped")))
    }));
    assert!(futures::poll!(&mut stale).is_pending());

    cache.clear();
    let fresh = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    assert_eq!(fresh, Ok(Some(user("u2"))));

    tx.send(Err(AuthError::new("network down"))).unwrap();
    assert_eq!(stale.await, Err(AuthError::new("network down")));

    assert!(cache.is_cached(CURRENT_SESSION));
    let again = cache.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    assert_eq!(again, Ok(Some(user("u2"))));
    assert_eq!(gateway.session_queries.get(), 1);
}

#[tokio::test]
async fn caches_are_independent_per_scope() {
    let gateway = Rc::new(MockGateway::new());
    let first_scope = SessionQueryCache::new();
    let second_scope = SessionQueryCache::new();

    let _ = first_scope.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    let _ = second_scope.fetch(CURRENT_SESSION, lookup(&gateway)).await;
    assert_eq!(gateway.session_queries.get(), 2);
}
