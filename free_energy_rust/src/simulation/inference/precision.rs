//! Hebbian learning of the prediction-error variance.
//!
//! A prediction error node `ε` and an inhibitory interneuron `e` relax
//! within each trial:
//! ```text
//! dε/dt = φ - g - e
//! de/dt = Σ ε - e
//! ```
//! At equilibrium `ε = (φ - g)/Σ` and `e = φ - g`, so the product `ε e`
//! compares the observed squared error with the current variance `Σ`.
//! After every trial the synapse `Σ` is nudged by the local rule
//! ```text
//! ΔΣ = α (ε e - 1)
//! ```
//! which settles where `Σ` matches the variance of `φ - g`.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Error, Result};
use crate::simulation::params::{
    INITIAL_SIGMA, LATENT_MEAN, LATENT_STD, TOP_DOWN_PREDICTION, TRIALS, TRIAL_DURATION,
    TRIAL_STEP, VARIANCE_LEARNING_RATE,
};
use crate::simulation::trace::Trace;

/// Parameters of the variance-learning experiment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarianceLearningParams {
    /// Mean of the sampled activity `φ`
    pub latent_mean: f64,
    /// Standard deviation of the sampled activity `φ`
    pub latent_std: f64,
    /// Fixed top-down prediction `g`
    pub prediction: f64,
    /// Learning rate `α`
    pub learning_rate: f64,
    pub trials: usize,
    /// Simulated time per trial
    pub trial_duration: f64,
    /// Euler step within a trial
    pub dt: f64,
    /// Starting value of `Σ`
    pub initial_sigma: f64,
    /// Zero both node activities at the start of every trial.
    ///
    /// Off by default: activity carries over between trials.
    pub reset_per_trial: bool,
}

impl Default for VarianceLearningParams {
    fn default() -> Self {
        Self {
            latent_mean: LATENT_MEAN,
            latent_std: LATENT_STD,
            prediction: TOP_DOWN_PREDICTION,
            learning_rate: VARIANCE_LEARNING_RATE,
            trials: TRIALS,
            trial_duration: TRIAL_DURATION,
            dt: TRIAL_STEP,
            initial_sigma: INITIAL_SIGMA,
            reset_per_trial: false,
        }
    }
}

impl VarianceLearningParams {
    /// Euler steps per trial: `trial_duration × ⌊1/dt⌋`.
    ///
    /// The step count per time unit is truncated, so a `dt` that does not
    /// divide 1 simulates slightly less than `trial_duration` (dt = 0.03
    /// gives 20 × 33 = 660 steps).
    #[must_use]
    pub fn steps_per_trial(&self) -> usize {
        (self.trial_duration * (1.0 / self.dt).trunc()).round() as usize
    }
}

/// Learns `Σ` across trials from locally available signals.
#[derive(Clone, Debug)]
pub struct VarianceLearner {
    params: VarianceLearningParams,
    /// Prediction error node `ε`
    epsilon: f64,
    /// Interneuron `e`
    error: f64,
    /// Variance estimate `Σ`
    sigma: f64,
    trials_run: usize,
}

impl VarianceLearner {
    #[must_use]
    pub fn new(params: VarianceLearningParams) -> Self {
        Self {
            params,
            epsilon: 0.0,
            error: 0.0,
            sigma: params.initial_sigma,
            trials_run: 0,
        }
    }

    #[must_use]
    pub const fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Current `(ε, e)`.
    #[must_use]
    pub const fn activity(&self) -> (f64, f64) {
        (self.epsilon, self.error)
    }

    #[must_use]
    pub const fn trials_run(&self) -> usize {
        self.trials_run
    }

    /// Relax the two nodes for one trial with activity `phi`, then apply the
    /// plasticity rule once. Returns the new `Σ`.
    pub fn run_trial(&mut self, phi: f64) -> f64 {
        if self.params.reset_per_trial {
            self.epsilon = 0.0;
            self.error = 0.0;
        }

        let dt = self.params.dt;
        for _ in 0..self.params.steps_per_trial() {
            // Both derivatives read the previous step's activity
            let d_epsilon = phi - self.params.prediction - self.error;
            let d_error = self.sigma * self.epsilon - self.error;
            self.epsilon += dt * d_epsilon;
            self.error += dt * d_error;
        }

        self.sigma += self.params.learning_rate * (self.epsilon * self.error - 1.0);
        self.trials_run += 1;
        self.sigma
    }

    /// Run all configured trials, drawing `φ ~ N(latent_mean, latent_std²)`
    /// from `rng` each trial, and record `(trial, Σ)` after each.
    ///
    /// # Errors
    ///
    /// Returns an error if the latent standard deviation is negative or not
    /// finite.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Trace> {
        let std = self.params.latent_std;
        if !(std.is_finite() && std >= 0.0) {
            return Err(Error::Config(ConfigError::invalid(
                "variance_learning.latent_std",
                format!("must be finite and non-negative, got {std}"),
            )));
        }
        let latent = Normal::new(self.params.latent_mean, self.params.latent_std)?;
        let mut trace = Trace::with_capacity(self.params.trials);

        for trial in 0..self.params.trials {
            let phi = latent.sample(rng);
            let sigma = self.run_trial(phi);
            trace.push(trial as f64, sigma);

            if (trial + 1) % 100 == 0 {
                debug!(trial = trial + 1, sigma, "variance learning progress");
            }
        }

        Ok(trace)
    }
}
