//! Form interaction controller.
//!
//! ARCHITECTURE
//! ============
//! Every network-bound action is split into three steps so UI code can keep
//! the controller in a reactive signal without holding a borrow across an
//! `.await`:
//!
//! 1. `begin_*` validates, claims the operation's in-flight slot and hands
//!    out a ticket (or rejects without touching the network).
//! 2. `perform_*` runs the gateway call for that ticket.
//! 3. `finish_*` releases the slot and folds the result back into form state.
//!
//! The `async` methods (`submit`, `submit_third_party`,
//! `request_password_reset`) chain the three for callers that own the
//! controller outright.
//!
//! Tickets remember the form generation they were issued under. Toggling the
//! mode bumps the generation, so a response for the old mode is dropped
//! instead of writing into the freshly reset form.

use std::collections::BTreeSet;

use crate::gateway::{AuthError, AuthGateway, SessionUser, SignUpOutcome};
use crate::memo::SessionQueryCache;
use crate::mode::{AuthMode, AuthModeConfig, FieldName, config_for, provider_display_name};
use crate::routes::Route;
use crate::session::SessionDeriver;
use crate::validation::{self, Credentials, FieldErrors, FieldValues};

pub const SUBMITTING_LABEL: &str = "Loading...";

/// Operations that may each have one request outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Submit,
    ThirdParty,
    SignOut,
    PasswordReset,
}

/// Per-operation in-flight flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InFlight {
    active: BTreeSet<Operation>,
}

impl InFlight {
    /// Claim `op`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::InFlight`] when `op` is already outstanding.
    pub fn begin(&mut self, op: Operation) -> Result<(), Rejected> {
        if self.active.insert(op) { Ok(()) } else { Err(Rejected::InFlight(op)) }
    }

    pub fn end(&mut self, op: Operation) {
        self.active.remove(&op);
    }

    #[must_use]
    pub fn is_active(&self, op: Operation) -> bool {
        self.active.contains(&op)
    }
}

/// Why an action never reached the gateway.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("{0:?} already in progress")]
    InFlight(Operation),
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
}

/// Non-error, form-level status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    VerificationPending { email: String },
    ResetEmailSent { email: String },
    RedirectingToProvider { provider: String },
    AlreadySignedIn,
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::VerificationPending { .. } => "Account created! Please check your email to verify.".to_owned(),
            Self::ResetEmailSent { email } => format!("Password reset link sent to {email}."),
            Self::RedirectingToProvider { provider } => {
                format!("Redirecting to {}...", provider_display_name(provider))
            }
            Self::AlreadySignedIn => "You are already logged in".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    credentials: Credentials,
}

impl SubmitTicket {
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThirdPartyTicket {
    pub provider: String,
    pub redirect_target: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetTicket {
    pub email: String,
    pub redirect_target: String,
}

/// Successful gateway answer to a credential submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitSuccess {
    SignedIn(SessionUser),
    VerificationPending(SessionUser),
}

/// What the view should do after a submit settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Hand the user to the session deriver; it decides on navigation.
    SignedIn(SessionUser),
    /// Account created, no session yet. Stay on the form.
    VerificationPending { email: String },
    /// Gateway message, already set as the form-level error.
    Failed(String),
    /// The form was toggled while the request was in flight.
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThirdPartyOutcome {
    Redirecting,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    EmailSent { email: String },
    Failed(String),
}

/// State of the auth form for one mounted auth screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormController {
    config: AuthModeConfig,
    values: FieldValues,
    touched: BTreeSet<FieldName>,
    errors: FieldErrors,
    form_error: Option<String>,
    notice: Option<Notice>,
    in_flight: InFlight,
    generation: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(AuthMode::default())
    }
}

impl FormController {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self {
            config: config_for(mode),
            values: FieldValues::default(),
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            form_error: None,
            notice: None,
            in_flight: InFlight::default(),
            generation: 0,
        }
    }

    /// Start with a form-level error, e.g. from `/auth?error=...`.
    #[must_use]
    pub fn with_form_error(mut self, error: Option<String>) -> Self {
        self.form_error = error;
        self
    }

    // -------------------------------------------------------------------------
    // read access
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.config.mode
    }

    #[must_use]
    pub fn config(&self) -> &AuthModeConfig {
        &self.config
    }

    #[must_use]
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn error_for(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn is_in_flight(&self, op: Operation) -> bool {
        self.in_flight.is_active(op)
    }

    /// Submit button text; swaps to [`SUBMITTING_LABEL`] while submitting.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_in_flight(Operation::Submit) { SUBMITTING_LABEL } else { self.config.submit_label }
    }

    // -------------------------------------------------------------------------
    // local edits
    // -------------------------------------------------------------------------

    /// Record a keystroke and re-run validation for every touched field.
    /// Fields the current mode does not render are ignored.
    pub fn set_field(&mut self, field: FieldName, value: String) {
        if !self.config.has_field(field) {
            return;
        }
        self.values.set(field, value);
        self.touched.insert(field);
        self.revalidate();
    }

    /// Flip Login/Signup and reset every value, error and status line.
    pub fn toggle_mode(&mut self) {
        self.config = config_for(self.config.mode.toggled());
        self.values = FieldValues::default();
        self.touched.clear();
        self.errors.clear();
        self.form_error = None;
        self.notice = None;
        self.generation += 1;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn revalidate(&mut self) {
        let ruleset = self.config.validation_ruleset;
        self.errors = self
            .touched
            .iter()
            .filter_map(|&field| validation::field_error(ruleset, &self.values, field).map(|m| (field, m.to_owned())))
            .collect();
    }

    // -------------------------------------------------------------------------
    // credential submit
    // -------------------------------------------------------------------------

    /// Validate every field and claim the submit slot.
    ///
    /// # Errors
    ///
    /// [`Rejected::InFlight`] while a submit is outstanding;
    /// [`Rejected::Invalid`] (with errors now shown on the fields) otherwise.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, Rejected> {
        if self.in_flight.is_active(Operation::Submit) {
            return Err(Rejected::InFlight(Operation::Submit));
        }
        self.touched.extend(self.config.fields.iter().map(|f| f.name));
        let credentials = match validation::validate(self.config.validation_ruleset, &self.values) {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.errors.clone_from(&errors);
                return Err(Rejected::Invalid(errors));
            }
        };
        self.in_flight.begin(Operation::Submit)?;
        self.errors.clear();
        self.form_error = None;
        self.notice = None;
        Ok(SubmitTicket { generation: self.generation, credentials })
    }

    /// Release the submit slot and apply the gateway's answer.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, result: Result<SubmitSuccess, AuthError>) -> SubmitOutcome {
        self.in_flight.end(Operation::Submit);
        if ticket.generation != self.generation {
            log::debug!("discarding submit result for a toggled form");
            return SubmitOutcome::Discarded;
        }
        match result {
            Ok(SubmitSuccess::SignedIn(user)) => SubmitOutcome::SignedIn(user),
            Ok(SubmitSuccess::VerificationPending(user)) => {
                let email = if user.email.is_empty() { ticket.credentials.email().to_owned() } else { user.email };
                self.notice = Some(Notice::VerificationPending { email: email.clone() });
                SubmitOutcome::VerificationPending { email }
            }
            Err(e) => {
                log::info!("{} rejected by provider: {e}", self.config.mode.label());
                self.form_error = Some(e.message.clone());
                SubmitOutcome::Failed(e.message)
            }
        }
    }

    /// Validate, call the gateway and apply the result.
    ///
    /// # Errors
    ///
    /// Same as [`FormController::begin_submit`]; gateway failures are an
    /// `Ok(SubmitOutcome::Failed)`.
    pub async fn submit<G: AuthGateway + ?Sized>(&mut self, gateway: &G) -> Result<SubmitOutcome, Rejected> {
        let ticket = self.begin_submit()?;
        let result = perform_submit(gateway, &ticket).await;
        Ok(self.finish_submit(ticket, result))
    }

    // -------------------------------------------------------------------------
    // third-party redirect
    // -------------------------------------------------------------------------

    /// Claim the third-party slot.
    ///
    /// # Errors
    ///
    /// [`Rejected::InFlight`] while a redirect is already being started.
    pub fn begin_third_party(&mut self, provider: &str, redirect_target: &str) -> Result<ThirdPartyTicket, Rejected> {
        self.in_flight.begin(Operation::ThirdParty)?;
        self.form_error = None;
        Ok(ThirdPartyTicket { provider: provider.to_owned(), redirect_target: redirect_target.to_owned() })
    }

    /// On success the slot stays claimed: the page is about to be replaced by
    /// the provider's redirect.
    pub fn finish_third_party(&mut self, ticket: ThirdPartyTicket, result: Result<(), AuthError>) -> ThirdPartyOutcome {
        match result {
            Ok(()) => {
                self.notice = Some(Notice::RedirectingToProvider { provider: ticket.provider });
                ThirdPartyOutcome::Redirecting
            }
            Err(e) => {
                self.in_flight.end(Operation::ThirdParty);
                self.form_error = Some(e.message.clone());
                ThirdPartyOutcome::Failed(e.message)
            }
        }
    }

    /// # Errors
    ///
    /// Same as [`FormController::begin_third_party`].
    pub async fn submit_third_party<G: AuthGateway + ?Sized>(
        &mut self,
        gateway: &G,
        provider: &str,
        redirect_target: &str,
    ) -> Result<ThirdPartyOutcome, Rejected> {
        let ticket = self.begin_third_party(provider, redirect_target)?;
        let result = gateway
            .sign_in_with_third_party(&ticket.provider, &ticket.redirect_target)
            .await;
        Ok(self.finish_third_party(ticket, result))
    }

    // -------------------------------------------------------------------------
    // password reset
    // -------------------------------------------------------------------------

    /// Validate only the email and claim the reset slot.
    ///
    /// # Errors
    ///
    /// [`Rejected::InFlight`] or [`Rejected::Invalid`] for a malformed email.
    pub fn begin_password_reset(&mut self, redirect_target: &str) -> Result<ResetTicket, Rejected> {
        if self.in_flight.is_active(Operation::PasswordReset) {
            return Err(Rejected::InFlight(Operation::PasswordReset));
        }
        self.touched.insert(FieldName::Email);
        let email = match validation::validate_email(&self.values) {
            Ok(email) => email,
            Err(errors) => {
                self.errors.extend(errors.clone());
                return Err(Rejected::Invalid(errors));
            }
        };
        self.in_flight.begin(Operation::PasswordReset)?;
        self.errors.remove(&FieldName::Email);
        self.form_error = None;
        Ok(ResetTicket { email, redirect_target: redirect_target.to_owned() })
    }

    pub fn finish_password_reset(&mut self, ticket: ResetTicket, result: Result<(), AuthError>) -> ResetOutcome {
        self.in_flight.end(Operation::PasswordReset);
        match result {
            Ok(()) => {
                self.notice = Some(Notice::ResetEmailSent { email: ticket.email.clone() });
                ResetOutcome::EmailSent { email: ticket.email }
            }
            Err(e) => {
                self.form_error = Some(e.message.clone());
                ResetOutcome::Failed(e.message)
            }
        }
    }

    /// # Errors
    ///
    /// Same as [`FormController::begin_password_reset`].
    pub async fn request_password_reset<G: AuthGateway + ?Sized>(
        &mut self,
        gateway: &G,
        redirect_target: &str,
    ) -> Result<ResetOutcome, Rejected> {
        let ticket = self.begin_password_reset(redirect_target)?;
        let result = gateway
            .reset_password_for_email(&ticket.email, &ticket.redirect_target)
            .await;
        Ok(self.finish_password_reset(ticket, result))
    }
}

/// Gateway call for a submit ticket; the credential variant picks the call.
///
/// # Errors
///
/// Propagates the gateway's [`AuthError`].
pub async fn perform_submit<G: AuthGateway + ?Sized>(
    gateway: &G,
    ticket: &SubmitTicket,
) -> Result<SubmitSuccess, AuthError> {
    match &ticket.credentials {
        Credentials::Login(c) => gateway
            .sign_in(&c.email, &c.password)
            .await
            .map(SubmitSuccess::SignedIn),
        Credentials::Signup(c) => Ok(match gateway.sign_up(c.email(), c.password()).await? {
            SignUpOutcome::SignedIn(user) => SubmitSuccess::SignedIn(user),
            SignUpOutcome::VerificationPending(user) => SubmitSuccess::VerificationPending(user),
        }),
    }
}

/// Fold a finished sign-out into the view's session state.
///
/// On success the scope's memoized lookups are dropped and the deriver moves
/// to `Unauthenticated`, returning its one navigation.
///
/// # Errors
///
/// Returns the gateway message; session state is left untouched.
pub fn finish_sign_out(
    deriver: &mut SessionDeriver,
    queries: &SessionQueryCache,
    result: Result<(), AuthError>,
) -> Result<Option<Route>, String> {
    match result {
        Ok(()) => {
            queries.clear();
            Ok(deriver.signed_out())
        }
        Err(e) => {
            log::warn!("sign-out failed: {e}");
            Err(e.message)
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
