//! Browser helpers shared by pages.

pub mod location;
