//! Predictive coding: the same mode found through local error units.
//!
//! Two error nodes relax towards their precision-weighted prediction errors
//! and `φ` is driven by them alone:
//! ```text
//! dε_p/dt = φ - v_p - Σ_p ε_p
//! dε_u/dt = u - g(φ) - Σ_u ε_u
//! dφ/dt   = ε_u g'(φ) - ε_p
//! ```
//!
//! At equilibrium `ε_p = (φ - v_p)/Σ_p` and `ε_u = (u - g(φ))/Σ_u`, so
//! `dφ/dt` equals the free-energy gradient without any node computing it.

use super::generative_model::GenerativeModel;
use crate::simulation::trace::{SampleRange, Trace};

/// Activity of the three nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictiveCodingState {
    /// Estimate `φ`
    pub phi: f64,
    /// Prior prediction error `ε_p`
    pub error_p: f64,
    /// Sensory prediction error `ε_u`
    pub error_u: f64,
}

impl PredictiveCodingState {
    /// `φ` at the prior mean, both error units silent.
    #[must_use]
    pub const fn initial(model: &GenerativeModel) -> Self {
        Self {
            phi: model.prior_mean,
            error_p: 0.0,
            error_u: 0.0,
        }
    }

    /// One Euler step.
    ///
    /// Both error units read the previous `φ`; `φ` then reads the updated
    /// errors.
    #[must_use]
    pub fn step(self, model: &GenerativeModel, dt: f64) -> Self {
        let d_error_p = self.phi - model.prior_mean - model.prior_variance * self.error_p;
        let d_error_u = model.observation
            - model.observation_function(self.phi)
            - model.sensory_variance * self.error_u;

        let error_p = self.error_p + dt * d_error_p;
        let error_u = self.error_u + dt * d_error_u;

        let d_phi = error_u * model.observation_jacobian(self.phi) - error_p;

        Self {
            phi: self.phi + dt * d_phi,
            error_p,
            error_u,
        }
    }
}

/// Runs the three-node network over a time range.
#[derive(Clone, Debug)]
pub struct PredictiveCodingEstimator {
    model: GenerativeModel,
    state: PredictiveCodingState,
}

impl PredictiveCodingEstimator {
    #[must_use]
    pub const fn new(model: GenerativeModel) -> Self {
        Self {
            state: PredictiveCodingState::initial(&model),
            model,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PredictiveCodingState {
        self.state
    }

    pub fn step(&mut self, dt: f64) -> PredictiveCodingState {
        self.state = self.state.step(&self.model, dt);
        self.state
    }

    /// Integrate over `time`, recording `(t, φ)` after every step.
    pub fn run(&mut self, time: &SampleRange) -> Trace {
        let ts = time.points();
        let mut trace = Trace::with_capacity(ts.len());
        for t in ts {
            let state = self.step(time.step);
            trace.push(t, state.phi);
        }
        trace
    }
}
