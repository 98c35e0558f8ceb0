//! Simulation hyperparameters.

// Generative model (exercises 1-3)
pub const PRIOR_MEAN: f64 = 3.0;
pub const PRIOR_VARIANCE: f64 = 1.0;
pub const SENSORY_VARIANCE: f64 = 1.0;
pub const OBSERVED_INPUT: f64 = 2.0;

// Exact posterior grid over v, half-open [start, stop)
pub const GRID_START: f64 = 0.01;
pub const GRID_STOP: f64 = 5.0;
pub const GRID_STEP: f64 = 0.01;

// Euler integration of phi(t), half-open [start, stop)
pub const TIME_START: f64 = 0.01;
pub const TIME_STOP: f64 = 5.0;
pub const TIME_STEP: f64 = 0.01;

// Density preview plot
pub const PREVIEW_MEAN: f64 = 5.0;
pub const PREVIEW_VARIANCE: f64 = 3.0;
pub const PREVIEW_START: f64 = 0.0;
pub const PREVIEW_STOP: f64 = 10.0;
pub const PREVIEW_STEP: f64 = 0.1;

// Variance learning (exercise 5)
pub const LATENT_MEAN: f64 = 5.0;
pub const LATENT_STD: f64 = std::f64::consts::SQRT_2;
pub const TOP_DOWN_PREDICTION: f64 = 5.0;
pub const VARIANCE_LEARNING_RATE: f64 = 0.01;
pub const TRIALS: usize = 1000;
pub const TRIAL_DURATION: f64 = 20.0;
pub const TRIAL_STEP: f64 = 0.01;
pub const INITIAL_SIGMA: f64 = 1.0;

/// Final-value gap between the two phi estimators above which a warning is logged.
pub const ESTIMATOR_AGREEMENT_TOLERANCE: f64 = 0.05;
