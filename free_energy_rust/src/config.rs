//! Experiment configuration.
//!
//! Every field defaults to the tutorial's literal constants, so an empty file
//! (or no file at all) reproduces the original run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::simulation::inference::{GenerativeModel, VarianceLearningParams};
use crate::simulation::params::{
    GRID_START, GRID_STEP, GRID_STOP, PREVIEW_MEAN, PREVIEW_START, PREVIEW_STEP, PREVIEW_STOP,
    PREVIEW_VARIANCE, TIME_START, TIME_STEP, TIME_STOP,
};
use crate::simulation::trace::SampleRange;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Seed for the latent samples of variance learning; thread RNG if unset
    pub seed: Option<u64>,

    /// Prior, likelihood and observation shared by exercises 1-3
    pub model: GenerativeModel,

    /// Grid over v for the exact posterior
    pub posterior_grid: SampleRange,

    /// Time axis for both phi integrators; its step is Δt
    pub time: SampleRange,

    pub preview: PreviewConfig,

    pub variance_learning: VarianceLearningParams,
}

/// The introductory density plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub mean: f64,
    pub variance: f64,
    pub range: SampleRange,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            mean: PREVIEW_MEAN,
            variance: PREVIEW_VARIANCE,
            range: SampleRange::new(PREVIEW_START, PREVIEW_STOP, PREVIEW_STEP),
        }
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: None,
            model: GenerativeModel::new(),
            posterior_grid: SampleRange::new(GRID_START, GRID_STOP, GRID_STEP),
            time: SampleRange::new(TIME_START, TIME_STOP, TIME_STEP),
            preview: PreviewConfig::default(),
            variance_learning: VarianceLearningParams::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Reject parameters the integrators cannot run with.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.model;
        require_finite("model.prior_mean", m.prior_mean)?;
        require_finite("model.observation", m.observation)?;
        require_positive("model.prior_variance", m.prior_variance)?;
        require_positive("model.sensory_variance", m.sensory_variance)?;

        validate_range("posterior_grid", &self.posterior_grid)?;
        validate_range("time", &self.time)?;
        validate_range("preview.range", &self.preview.range)?;
        require_finite("preview.mean", self.preview.mean)?;
        require_positive("preview.variance", self.preview.variance)?;

        let v = &self.variance_learning;
        require_finite("variance_learning.latent_mean", v.latent_mean)?;
        require_finite("variance_learning.latent_std", v.latent_std)?;
        if v.latent_std < 0.0 {
            return Err(ConfigError::invalid(
                "variance_learning.latent_std",
                format!("must not be negative, got {}", v.latent_std),
            ));
        }
        require_finite("variance_learning.prediction", v.prediction)?;
        require_finite("variance_learning.learning_rate", v.learning_rate)?;
        require_finite("variance_learning.initial_sigma", v.initial_sigma)?;
        require_positive("variance_learning.dt", v.dt)?;
        require_positive("variance_learning.trial_duration", v.trial_duration)?;
        if v.trials == 0 {
            return Err(ConfigError::invalid("variance_learning.trials", "must be at least 1"));
        }

        Ok(())
    }

    /// Commented example file with the default values.
    #[must_use]
    pub fn example() -> &'static str {
        EXAMPLE_CONFIG
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn validate_range(field: &'static str, range: &SampleRange) -> Result<(), ConfigError> {
    if !range.start.is_finite() || !range.stop.is_finite() {
        return Err(ConfigError::invalid(field, "bounds must be finite"));
    }
    if !(range.step.is_finite() && range.step > 0.0) {
        return Err(ConfigError::invalid(
            field,
            format!("step must be positive, got {}", range.step),
        ));
    }
    if range.start >= range.stop {
        return Err(ConfigError::invalid(
            field,
            format!("empty range [{}, {})", range.start, range.stop),
        ));
    }
    Ok(())
}

const EXAMPLE_CONFIG: &str = r#"# free_energy_rust configuration file
# Every table is optional; missing tables and keys keep the values shown here.
# Range tables (posterior_grid, time, preview.range) need all three keys.

# seed = 42

[model]
prior_mean = 3.0
prior_variance = 1.0
sensory_variance = 1.0
observation = 2.0
observation_model = "square"   # or "identity"

[posterior_grid]
start = 0.01
stop = 5.0
step = 0.01

[time]
start = 0.01
stop = 5.0
step = 0.01

[preview]
mean = 5.0
variance = 3.0
range = { start = 0.0, stop = 10.0, step = 0.1 }

[variance_learning]
latent_mean = 5.0
latent_std = 1.4142135623730951
prediction = 5.0
learning_rate = 0.01
trials = 1000
trial_duration = 20.0
dt = 0.01
initial_sigma = 1.0
reset_per_trial = false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let parsed: ExperimentConfig = toml::from_str(ExperimentConfig::example()).unwrap();
        assert_eq!(parsed, ExperimentConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: ExperimentConfig = toml::from_str(
            r#"
            seed = 7
            [model]
            observation = 4.0
            [variance_learning]
            reset_per_trial = true
            "#,
        )
        .unwrap();

        assert_eq!(parsed.seed, Some(7));
        assert!((parsed.model.observation - 4.0).abs() < f64::EPSILON);
        assert!((parsed.model.prior_mean - 3.0).abs() < f64::EPSILON);
        assert!(parsed.variance_learning.reset_per_trial);
        assert_eq!(parsed.variance_learning.trials, 1000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ExperimentConfig::default();
        config.model.sensory_variance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "model.sensory_variance", .. })
        ));

        let mut config = ExperimentConfig::default();
        config.time.step = -0.01;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "time", .. })));

        let mut config = ExperimentConfig::default();
        config.posterior_grid.start = 6.0;
        assert!(config.validate().is_err());

        let mut config = ExperimentConfig::default();
        config.variance_learning.trials = 0;
        assert!(config.validate().is_err());
    }
}
