//! Networking modules for the hosted auth provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` performs the provider's REST calls and `store` holds the
//! resulting session for this tab.

pub mod gateway;
pub mod store;
