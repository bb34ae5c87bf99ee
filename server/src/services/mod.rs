//! Outbound services.
//!
//! ARCHITECTURE
//! ============
//! The server talks to the auth provider only to probe its health; route
//! handlers depend on the [`provider::ProviderProbe`] trait, not on HTTP.

pub mod provider;
