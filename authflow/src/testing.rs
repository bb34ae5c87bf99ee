//! Scripted gateway used by unit tests.

use std::cell::{Cell, RefCell};

use crate::events::{SessionEvent, SessionEventHub, SessionEventKind, SessionListener, Subscription};
use crate::gateway::{AuthError, AuthGateway, SessionUser, SignUpOutcome};

pub(crate) fn user(id: &str) -> SessionUser {
    SessionUser {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        created_at: Some("2024-01-02T03:04:05Z".to_owned()),
        last_sign_in_at: None,
    }
}

pub(crate) struct MockGateway {
    pub sign_up: RefCell<Result<SignUpOutcome, AuthError>>,
    pub sign_in: RefCell<Result<SessionUser, AuthError>>,
    pub session: RefCell<Result<Option<SessionUser>, AuthError>>,
    pub third_party: RefCell<Result<(), AuthError>>,
    pub sign_out: RefCell<Result<(), AuthError>>,
    pub reset: RefCell<Result<(), AuthError>>,
    pub calls: RefCell<Vec<String>>,
    pub session_queries: Cell<usize>,
    pub hub: SessionEventHub,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        let unscripted = || AuthError::new("unscripted");
        Self {
            sign_up: RefCell::new(Err(unscripted())),
            sign_in: RefCell::new(Err(unscripted())),
            session: RefCell::new(Ok(None)),
            third_party: RefCell::new(Ok(())),
            sign_out: RefCell::new(Ok(())),
            reset: RefCell::new(Ok(())),
            calls: RefCell::new(Vec::new()),
            session_queries: Cell::new(0),
            hub: SessionEventHub::new(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait::async_trait(?Send)]
impl AuthGateway for MockGateway {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, AuthError> {
        self.record(format!("sign_up:{email}"));
        self.sign_up.borrow().clone()
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<SessionUser, AuthError> {
        self.record(format!("sign_in:{email}"));
        let result = self.sign_in.borrow().clone();
        if let Ok(user) = &result {
            self.hub.emit(&SessionEvent::new(SessionEventKind::SignedIn, Some(user.clone())));
        }
        result
    }

    async fn sign_in_with_third_party(&self, provider: &str, redirect_target: &str) -> Result<(), AuthError> {
        self.record(format!("oauth:{provider}:{redirect_target}"));
        self.third_party.borrow().clone()
    }

    async fn current_session(&self) -> Result<Option<SessionUser>, AuthError> {
        self.session_queries.set(self.session_queries.get() + 1);
        self.session.borrow().clone()
    }

    async fn refresh_session(&self) -> Result<Option<SessionUser>, AuthError> {
        self.record("refresh".to_owned());
        self.session.borrow().clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record("sign_out".to_owned());
        let result = self.sign_out.borrow().clone();
        if result.is_ok() {
            self.hub.emit(&SessionEvent::new(SessionEventKind::SignedOut, None));
        }
        result
    }

    async fn reset_password_for_email(&self, email: &str, redirect_target: &str) -> Result<(), AuthError> {
        self.record(format!("reset:{email}:{redirect_target}"));
        self.reset.borrow().clone()
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        self.hub.subscribe(listener)
    }
}
