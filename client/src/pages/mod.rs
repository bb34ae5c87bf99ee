//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (session scope, gateway calls,
//! navigation) and delegates rendering details to `components`.

pub mod auth;
pub mod callback;
pub mod dashboard;
pub mod home;
