//! Reactive state shared by the page modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Decision logic lives in `authflow`; this layer only wires it into Leptos
//! signals, router navigation and mount/unmount lifetimes.

pub mod session;
