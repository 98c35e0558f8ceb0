//! Exact posterior over a discretised hidden cause.
//!
//! ```text
//! p(v|u) = p(v) p(u|v) / p(u),    p(u) ≈ Σ p(v) p(u|v) Δv
//! ```

use rayon::prelude::*;

use super::generative_model::GenerativeModel;
use crate::error::{Error, Result};
use crate::simulation::trace::{SampleRange, Trace};

/// Posterior and prior densities evaluated on the same grid.
#[derive(Clone, Debug)]
pub struct Posterior {
    /// Grid spacing `Δv`
    pub step: f64,
    /// `p(u)` by the rectangle rule
    pub evidence: f64,
    /// `(v, p(v|u))`
    pub density: Trace,
    /// `(v, p(v))`
    pub prior: Trace,
}

impl Posterior {
    /// Grid point with the highest posterior density.
    #[must_use]
    pub fn mode(&self) -> Option<f64> {
        self.density.argmax().map(|(v, _)| v)
    }

    /// Rectangle-rule integral of the posterior, ≈ 1 by construction.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.density.rectangle_integral(self.step)
    }

    /// Posterior mean `Σ v p(v|u) Δv`.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.density
            .points()
            .iter()
            .map(|&(v, p)| v * p * self.step)
            .sum()
    }
}

/// Evaluate Bayes' rule pointwise over `grid`.
///
/// Grid points are evaluated in parallel; the normalizer is accumulated in
/// grid order so the result does not depend on thread scheduling.
///
/// # Errors
///
/// [`Error::DegenerateNormalizer`] when the evidence is zero or not finite,
/// e.g. when the grid misses all of the likelihood mass.
pub fn exact_posterior(model: &GenerativeModel, grid: &SampleRange) -> Result<Posterior> {
    let vs = grid.points();

    let (priors, joints): (Vec<f64>, Vec<f64>) = vs
        .par_iter()
        .map(|&v| {
            let prior = model.prior_density(v);
            (prior, prior * model.likelihood(v))
        })
        .unzip();

    let evidence: f64 = joints.iter().map(|j| j * grid.step).sum();
    if !evidence.is_finite() || evidence <= 0.0 {
        return Err(Error::DegenerateNormalizer(evidence));
    }

    let posterior: Vec<f64> = joints.iter().map(|j| j / evidence).collect();

    Ok(Posterior {
        step: grid.step,
        evidence,
        density: Trace::from_xy(&vs, &posterior),
        prior: Trace::from_xy(&vs, &priors),
    })
}
