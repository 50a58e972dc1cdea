//! Infrastructure layer.
//!
//! Configuration and the wiring that turns it into a running engine. No
//! business logic lives here.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
