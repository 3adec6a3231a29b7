//! Shared solver abstractions for oframe models.
//!
//! This crate defines the boundary between the model core and solver
//! backends: the [`SolverBackend`] trait plus the status, error, and
//! configuration types backends share. No concrete solver lives here.
//!
//! # Overview
//!
//! - [`SolverBackend`]: variable/constraint/objective handoff plus
//!   attribute and parameter forwarding
//! - [`SolverStatus`]: common status values across solvers
//! - [`SolverError`]: error types for solver operations
//! - [`SolverConfig`]: configuration options for solver behavior

mod config;
mod error;
mod status;
mod traits;

pub use config::SolverConfig;
pub use error::SolverError;
pub use status::SolverStatus;
pub use traits::{Sense, SolverBackend, VType};
