//! # Roster Server Library
//!
//! Wires configuration, persistence, services and the REST router into a
//! runnable application.

pub mod app;
pub mod startup;

pub use app::*;
