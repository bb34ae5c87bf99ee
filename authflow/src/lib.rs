//! Auth session and form decision logic shared by `client` and `server`.
//!
//! This crate owns everything the UI decides on its own: credential
//! validation, per-mode form configuration, session-state derivation and the
//! submit/toggle lifecycle of the auth form. Credential checks, session
//! issuance and OAuth all live in the hosted provider, reached through the
//! [`gateway::AuthGateway`] trait.
//!
//! ARCHITECTURE
//! ============
//! Leaf to root: `validation` and `mode` are pure lookups, `gateway` and
//! `events` describe the provider contract, `session` turns provider results
//! into `Pending`/`Authenticated`/`Unauthenticated` plus a one-shot
//! navigation, and `controller` binds them into the form lifecycle. `gotrue`
//! shapes the provider's REST wire format without doing any I/O.

pub mod controller;
pub mod events;
pub mod gateway;
pub mod gotrue;
pub mod memo;
pub mod mode;
pub mod routes;
pub mod scope;
pub mod session;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
