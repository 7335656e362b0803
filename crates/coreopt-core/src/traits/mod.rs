//! Core traits for the option registry
//!
//! - [`Host`]: The settings protocol of the application embedding the core

pub mod host;

pub use host::Host;
