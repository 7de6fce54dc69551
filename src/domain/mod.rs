//! Domain layer for the epic cloner
//!
//! This module contains the issue and clone models, the error taxonomy and
//! the issue tracker port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CloneError, TrackerError, TrackerResult};
