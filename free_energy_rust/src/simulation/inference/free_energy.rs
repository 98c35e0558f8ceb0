//! Free energy of a point estimate and its gradient ascent.
//!
//! With the approximate posterior collapsed onto `φ`, the (negative) free
//! energy reduces to the log joint:
//! ```text
//! F(φ) = ln p(φ) + ln p(u|φ)
//!      = -(φ - v_p)²/2Σ_p - (u - g(φ))²/2Σ_u + const
//! ```
//!
//! Maximising `F` finds the posterior mode. The gradient is
//! ```text
//! ∂F/∂φ = (v_p - φ)/Σ_p + (u - g(φ))/Σ_u × g'(φ)
//! ```

use super::generative_model::GenerativeModel;
use crate::simulation::trace::{SampleRange, Trace};

/// Compute `F(φ)` including the Gaussian normalizers.
///
/// Higher is better: the estimate explains the input while staying close to
/// the prior.
#[must_use]
pub fn free_energy(phi: f64, model: &GenerativeModel) -> f64 {
    model.prior_density(phi).ln() + model.likelihood(phi).ln()
}

/// Compute `∂F/∂φ` (ascent direction).
#[must_use]
pub fn free_energy_gradient(phi: f64, model: &GenerativeModel) -> f64 {
    // Prior prediction error, precision weighted
    let prior_term = (model.prior_mean - phi) / model.prior_variance;

    // Sensory prediction error, precision weighted and mapped back through g'
    let sensory_error = model.observation - model.observation_function(phi);
    let sensory_term =
        sensory_error / model.sensory_variance * model.observation_jacobian(phi);

    prior_term + sensory_term
}

/// Finds the posterior mode by fixed-step Euler ascent on `F`, starting from
/// the prior mean.
///
/// Runs for the whole time range with no convergence check so the trace
/// shows the approach to equilibrium.
#[derive(Clone, Debug)]
pub struct GradientDescentEstimator {
    model: GenerativeModel,
    /// Current estimate `φ`
    phi: f64,
}

impl GradientDescentEstimator {
    #[must_use]
    pub fn new(model: GenerativeModel) -> Self {
        Self {
            phi: model.prior_mean,
            model,
        }
    }

    #[must_use]
    pub const fn phi(&self) -> f64 {
        self.phi
    }

    /// Advance one Euler step: `φ ← φ + Δt × ∂F/∂φ`.
    pub fn step(&mut self, dt: f64) -> f64 {
        self.phi += dt * free_energy_gradient(self.phi, &self.model);
        self.phi
    }

    /// Integrate over `time` (its step is `Δt`), recording `(t, φ)` after
    /// every step.
    pub fn run(&mut self, time: &SampleRange) -> Trace {
        let ts = time.points();
        let mut trace = Trace::with_capacity(ts.len());
        for t in ts {
            let phi = self.step(time.step);
            trace.push(t, phi);
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::{TIME_START, TIME_STEP, TIME_STOP};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gradient_matches_finite_difference() {
        let model = GenerativeModel::new();
        let h = 1e-6;
        for &phi in &[0.5, 1.2, 2.0, 3.0, 4.1] {
            let numeric = (free_energy(phi + h, &model) - free_energy(phi - h, &model)) / (2.0 * h);
            assert_abs_diff_eq!(free_energy_gradient(phi, &model), numeric, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_gradient_step_increases_free_energy() {
        let model = GenerativeModel::new();
        let mut estimator = GradientDescentEstimator::new(model);
        let before = free_energy(estimator.phi(), &model);
        estimator.step(TIME_STEP);
        let after = free_energy(estimator.phi(), &model);
        assert!(after > before, "F should increase after an ascent step: {before} -> {after}");
    }

    #[test]
    fn test_starts_from_prior_mean() {
        let model = GenerativeModel::new();
        let estimator = GradientDescentEstimator::new(model);
        assert_abs_diff_eq!(estimator.phi(), model.prior_mean);
    }

    #[test]
    fn test_final_estimate_is_stationary() {
        let model = GenerativeModel::new();
        let mut estimator = GradientDescentEstimator::new(model);
        let trace = estimator.run(&SampleRange::new(TIME_START, TIME_STOP, TIME_STEP));

        assert_eq!(trace.len(), 499);
        let (t, phi) = trace.last().unwrap();
        assert_abs_diff_eq!(t, 4.99, epsilon = 1e-9);
        assert_abs_diff_eq!(free_energy_gradient(phi, &model), 0.0, epsilon = 1e-6);
        // 3 + 3φ - 2φ³ = 0
        assert_abs_diff_eq!(phi, 1.567_468, epsilon = 1e-5);
    }
}
