//! The tutorial's exercises, run in order and turned into figures.

use rand::Rng;
use tracing::{info, warn};

use crate::config::{ExperimentConfig, PreviewConfig};
use crate::error::Result;
use crate::simulation::figure::Figure;
use crate::simulation::inference::{
    exact_posterior, free_energy_gradient, normal_density, GradientDescentEstimator,
    PredictiveCodingEstimator, VarianceLearner,
};
use crate::simulation::params::ESTIMATOR_AGREEMENT_TOLERANCE;
use crate::simulation::trace::Trace;

/// The figures, in script order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exercise {
    DensityPreview,
    ExactPosterior,
    GradientDescent,
    PredictiveCoding,
    VarianceLearning,
}

impl Exercise {
    pub const ALL: [Self; 5] = [
        Self::DensityPreview,
        Self::ExactPosterior,
        Self::GradientDescent,
        Self::PredictiveCoding,
        Self::VarianceLearning,
    ];

    /// Short tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DensityPreview => "Density",
            Self::ExactPosterior => "Posterior",
            Self::GradientDescent => "Gradient",
            Self::PredictiveCoding => "Predictive",
            Self::VarianceLearning => "Variance",
        }
    }
}

/// A finished exercise.
#[derive(Clone, Debug)]
pub struct ExerciseResult {
    pub exercise: Exercise,
    pub figure: Figure,
}

/// `N(x; mean, variance)` over the preview range.
#[must_use]
pub fn density_preview(preview: &PreviewConfig) -> Figure {
    let xs = preview.range.points();
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| normal_density(x, preview.mean, preview.variance))
        .collect();

    Figure::new(
        format!("p(x; {}, {})", preview.mean, preview.variance),
        "x",
        "p(x)",
    )
    .with_series("p(x)", Trace::from_xy(&xs, &ys))
}

/// Run every exercise with `config`, drawing latent samples from `rng`.
///
/// # Errors
///
/// Propagates a degenerate posterior normalizer or invalid latent
/// distribution parameters.
pub fn run_exercises<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<Vec<ExerciseResult>> {
    let mut results = Vec::with_capacity(Exercise::ALL.len());

    results.push(ExerciseResult {
        exercise: Exercise::DensityPreview,
        figure: density_preview(&config.preview),
    });

    // Exercise 1: exact posterior
    let posterior = exact_posterior(&config.model, &config.posterior_grid)?;
    info!(
        mode = posterior.mode().unwrap_or(f64::NAN),
        evidence = posterior.evidence,
        "exact posterior"
    );
    results.push(ExerciseResult {
        exercise: Exercise::ExactPosterior,
        figure: Figure::new("p(v|u) vs. v", "v", "p(v|u)")
            .with_series("p(v|u)", posterior.density)
            .with_series("p(v)", posterior.prior),
    });

    // Exercise 2: gradient ascent on F
    let gradient_trace = GradientDescentEstimator::new(config.model).run(&config.time);
    let gradient_final = gradient_trace.last().map_or(f64::NAN, |(_, phi)| phi);
    info!(
        phi = gradient_final,
        residual = free_energy_gradient(gradient_final, &config.model),
        "gradient descent"
    );

    // Exercise 3: predictive coding
    let coding_trace = PredictiveCodingEstimator::new(config.model).run(&config.time);
    let coding_final = coding_trace.last().map_or(f64::NAN, |(_, phi)| phi);
    info!(phi = coding_final, "predictive coding");

    let gap = (gradient_final - coding_final).abs();
    if gap > ESTIMATOR_AGREEMENT_TOLERANCE {
        warn!(
            gap,
            "gradient descent and predictive coding have not converged to the same estimate"
        );
    }

    results.push(ExerciseResult {
        exercise: Exercise::GradientDescent,
        figure: Figure::new("phi(t)", "t", "phi(t)").with_series("gradient descent", gradient_trace),
    });
    results.push(ExerciseResult {
        exercise: Exercise::PredictiveCoding,
        figure: Figure::new("phi(t)", "t", "phi(t)").with_series("predictive coding", coding_trace),
    });

    // Exercise 5: variance learning
    let mut learner = VarianceLearner::new(config.variance_learning);
    let sigma_trace = learner.run(rng)?;
    info!(
        sigma = learner.sigma(),
        trials = learner.trials_run(),
        reset_per_trial = config.variance_learning.reset_per_trial,
        "variance learning"
    );
    results.push(ExerciseResult {
        exercise: Exercise::VarianceLearning,
        figure: Figure::new("sigma(trial)", "trial", "sigma").with_series("sigma", sigma_trace),
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_density_preview_peaks_at_mean() {
        let figure = density_preview(&PreviewConfig::default());
        let trace = &figure.series[0].trace;
        assert_eq!(trace.len(), 100);
        let (x, _) = trace.argmax().unwrap();
        assert!((x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_exercises_run_in_script_order() {
        let mut config = ExperimentConfig::default();
        config.variance_learning.trials = 5;
        let mut rng = StdRng::seed_from_u64(3);

        let results = run_exercises(&config, &mut rng).unwrap();
        let order: Vec<Exercise> = results.iter().map(|r| r.exercise).collect();
        assert_eq!(order, Exercise::ALL.to_vec());

        let posterior = &results[1].figure;
        // Labelled by the plotted quantity, not the tutorial's "p(u|v)"
        assert_eq!(posterior.title, "p(v|u) vs. v");
        assert_eq!(posterior.x_label, "v");
        assert_eq!(posterior.y_label, "p(v|u)");
        assert!(posterior.series("p(v|u)").is_some());
        assert!(posterior.series("p(v)").is_some());
        assert_eq!(results[4].figure.series[0].trace.len(), 5);
    }
}
