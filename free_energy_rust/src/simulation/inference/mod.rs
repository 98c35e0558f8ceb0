//! Perception as inference on a single hidden cause.
//!
//! Four routes to the same posterior, from exact to biologically local.
//!
//! # Mathematical Foundation
//!
//! Generative model:
//! ```text
//! p(v) = N(v; v_p, Σ_p),    p(u|v) = N(u; g(v), Σ_u)
//! ```
//!
//! Free energy of a point estimate φ:
//! ```text
//! F(φ) = ln p(φ) + ln p(u|φ)
//! ```
//!
//! Belief update via gradient ascent:
//! ```text
//! dφ/dt = ∂F/∂φ
//! ```

mod free_energy;
mod generative_model;
mod posterior;
mod precision;
mod predictive_coding;

pub use free_energy::{free_energy, free_energy_gradient, GradientDescentEstimator};
pub use generative_model::{normal_density, GenerativeModel, ObservationModel};
pub use posterior::{exact_posterior, Posterior};
pub use precision::{VarianceLearner, VarianceLearningParams};
pub use predictive_coding::{PredictiveCodingEstimator, PredictiveCodingState};
