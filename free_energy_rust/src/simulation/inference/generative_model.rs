//! Generative model for a single hidden cause observed through a nonlinearity.
//!
//! ```text
//! p(v)   = N(v; v_p, Σ_p)
//! p(u|v) = N(u; g(v), Σ_u)
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::simulation::params::{OBSERVED_INPUT, PRIOR_MEAN, PRIOR_VARIANCE, SENSORY_VARIANCE};

/// Gaussian density parameterised by its variance.
///
/// `p(x; μ, σ) = 1/√(2πσ) × exp(-(x - μ)² / 2σ)`
///
/// `sigma` is the variance in both the normalizer and the exponent.
#[inline]
#[must_use]
pub fn normal_density(x: f64, mu: f64, sigma: f64) -> f64 {
    1.0 / (2.0 * PI * sigma).sqrt() * (-(x - mu).powi(2) / (2.0 * sigma)).exp()
}

/// Maps the hidden cause `v` to the expected sensory input `g(v)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationModel {
    /// `g(v) = v²`
    #[default]
    Square,
    /// `g(v) = v`, which makes the posterior Gaussian.
    Identity,
}

impl ObservationModel {
    #[inline]
    #[must_use]
    pub fn g(self, v: f64) -> f64 {
        match self {
            Self::Square => v * v,
            Self::Identity => v,
        }
    }

    /// Derivative `g'(v)`.
    #[inline]
    #[must_use]
    pub fn g_prime(self, v: f64) -> f64 {
        match self {
            Self::Square => 2.0 * v,
            Self::Identity => 1.0,
        }
    }
}

/// Prior, likelihood and the observation being explained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeModel {
    /// Prior mean `v_p`
    pub prior_mean: f64,
    /// Prior variance `Σ_p`
    pub prior_variance: f64,
    /// Sensory noise variance `Σ_u`
    pub sensory_variance: f64,
    /// Observed input `u`
    pub observation: f64,
    pub observation_model: ObservationModel,
}

impl Default for GenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerativeModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prior_mean: PRIOR_MEAN,
            prior_variance: PRIOR_VARIANCE,
            sensory_variance: SENSORY_VARIANCE,
            observation: OBSERVED_INPUT,
            observation_model: ObservationModel::Square,
        }
    }

    /// Predicted input `g(v)`.
    #[inline]
    #[must_use]
    pub fn observation_function(&self, v: f64) -> f64 {
        self.observation_model.g(v)
    }

    /// `g'(v)`
    #[inline]
    #[must_use]
    pub fn observation_jacobian(&self, v: f64) -> f64 {
        self.observation_model.g_prime(v)
    }

    /// Prior density `p(v)`.
    #[must_use]
    pub fn prior_density(&self, v: f64) -> f64 {
        normal_density(v, self.prior_mean, self.prior_variance)
    }

    /// Likelihood of the stored observation, `p(u|v)`.
    #[must_use]
    pub fn likelihood(&self, v: f64) -> f64 {
        normal_density(self.observation, self.observation_function(v), self.sensory_variance)
    }

    /// Unnormalised posterior `p(v) × p(u|v)`.
    #[must_use]
    pub fn joint_density(&self, v: f64) -> f64 {
        self.prior_density(v) * self.likelihood(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_density_uses_variance() {
        // Peak height is 1/√(2πσ) with σ the variance
        assert_relative_eq!(normal_density(5.0, 5.0, 3.0), 1.0 / (6.0 * PI).sqrt(), epsilon = 1e-12);
        // At distance √σ from the mean the exponent is -1/2
        assert_relative_eq!(
            normal_density(1.0, 0.0, 1.0),
            (-0.5_f64).exp() / (2.0 * PI).sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            normal_density(2.0, 0.0, 4.0),
            (-0.5_f64).exp() / (8.0 * PI).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_square_observation_model() {
        let model = GenerativeModel::new();
        assert_relative_eq!(model.observation_function(1.5), 2.25);
        assert_relative_eq!(model.observation_jacobian(1.5), 3.0);
    }

    #[test]
    fn test_identity_observation_model() {
        let g = ObservationModel::Identity;
        assert_relative_eq!(g.g(-2.0), -2.0);
        assert_relative_eq!(g.g_prime(-2.0), 1.0);
    }

    #[test]
    fn test_likelihood_peaks_where_prediction_matches_input() {
        let model = GenerativeModel::new();
        let at_match = model.likelihood(2.0_f64.sqrt());
        let at_prior = model.likelihood(model.prior_mean);
        assert!(at_match > at_prior);
    }
}
