//! Exact posterior over the default grid.

use approx::assert_abs_diff_eq;
use free_energy_rust::simulation::inference::{exact_posterior, free_energy_gradient, GenerativeModel};
use free_energy_rust::simulation::params::{GRID_START, GRID_STEP, GRID_STOP};
use free_energy_rust::simulation::SampleRange;

fn default_grid() -> SampleRange {
    SampleRange::new(GRID_START, GRID_STOP, GRID_STEP)
}

#[test]
fn test_posterior_integrates_to_one_over_domain() {
    let posterior = exact_posterior(&GenerativeModel::new(), &default_grid()).unwrap();
    let total: f64 = posterior.density.ys().map(|p| p * GRID_STEP).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
}

#[test]
fn test_domain_and_density_have_equal_length() {
    let posterior = exact_posterior(&GenerativeModel::new(), &default_grid()).unwrap();
    let xs: Vec<f64> = posterior.density.xs().collect();
    assert_eq!(xs.len(), 499);
    assert_abs_diff_eq!(xs[0], 0.01, epsilon = 1e-12);
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
    assert!(posterior.density.ys().all(|p| p.is_finite() && p >= 0.0));
}

#[test]
fn test_posterior_peak_far_from_prior_mean() {
    let model = GenerativeModel::new();
    let posterior = exact_posterior(&model, &default_grid()).unwrap();
    let mode = posterior.mode().unwrap();

    assert!(
        (mode - 2.0_f64.sqrt()).abs() < 0.25,
        "u = 2 should pull the posterior towards √2, got mode {mode}"
    );
    assert!((mode - model.prior_mean).abs() > 1.0);
}

#[test]
fn test_posterior_mode_is_map_estimate() {
    // The grid maximum sits within one grid step of the free-energy stationary point
    let model = GenerativeModel::new();
    let posterior = exact_posterior(&model, &default_grid()).unwrap();
    let mode = posterior.mode().unwrap();

    assert!(free_energy_gradient(mode - GRID_STEP, &model) > 0.0);
    assert!(free_energy_gradient(mode + GRID_STEP, &model) < 0.0);
}
