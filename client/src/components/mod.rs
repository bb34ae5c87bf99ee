//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the auth form from a `FormController` signal handed in
//! by the page; they never talk to the gateway themselves.

pub mod auth_form;
pub mod form_field;
