//! Numerical exercises on the Free-Energy principle.
//!
//! Perception of a single hidden cause `v` from a sensory input `u` through
//! the nonlinearity `g(v) = v²`, approached four ways:
//!
//! - **Exact posterior**: Bayes' rule on a grid.
//! - **Gradient ascent** on the free energy `F(φ)` to the posterior mode.
//! - **Predictive coding**: the same mode from two local error units.
//! - **Variance learning**: a Hebbian rule tuning the error variance `Σ`
//!   across trials.
//!
//! Each exercise produces a [`Figure`](simulation::Figure); the binary shows
//! them in the terminal.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod error;
pub mod simulation;
pub mod ui;

pub use config::ExperimentConfig;
pub use error::{ConfigError, Error, Result};
