//! Append-only sample sequences recorded by the integrators.

use serde::{Deserialize, Serialize};

/// Half-open grid `start, start + step, ...` strictly below `stop`.
///
/// Points are computed as `start + i * step` rather than by repeated addition
/// so that long grids do not accumulate rounding drift. A point closer to
/// `stop` than a billionth of a step counts as `stop` and is excluded.
#[must_use]
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || start >= stop {
        return Vec::new();
    }
    let limit = stop - step * 1e-9;
    (0_u32..)
        .map(|i| start + f64::from(i) * step)
        .take_while(|&x| x < limit)
        .collect()
}

/// A half-open sampling range `[start, stop)` with a fixed step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl SampleRange {
    #[must_use]
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Grid points, see [`arange`].
    #[must_use]
    pub fn points(&self) -> Vec<f64> {
        arange(self.start, self.stop, self.step)
    }
}

/// Ordered `(x, y)` samples, one per time step or trial.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    points: Vec<(f64, f64)>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Builds a trace from paired abscissa and ordinate sequences.
    ///
    /// Extra elements of the longer sequence are dropped.
    #[must_use]
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self {
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(x, _)| x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }

    /// Sample with the largest ordinate (first one on ties).
    #[must_use]
    pub fn argmax(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .fold(None, |best: Option<(f64, f64)>, p| match best {
                Some(b) if b.1 >= p.1 => Some(b),
                _ => Some(p),
            })
    }

    /// Rectangle-rule integral of the ordinates with a fixed bin width.
    #[must_use]
    pub fn rectangle_integral(&self, width: f64) -> f64 {
        self.ys().map(|y| y * width).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arange_matches_half_open_grid() {
        let grid = arange(0.01, 5.0, 0.01);
        assert_eq!(grid.len(), 499);
        assert!((grid[0] - 0.01).abs() < 1e-12);
        assert!((grid[498] - 4.99).abs() < 1e-9);

        let preview = arange(0.0, 10.0, 0.1);
        assert_eq!(preview.len(), 100);
    }

    #[test]
    fn test_arange_degenerate_inputs() {
        assert!(arange(1.0, 1.0, 0.1).is_empty());
        assert!(arange(2.0, 1.0, 0.1).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
        assert!(arange(0.0, 1.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_trace_argmax_and_integral() {
        let trace = Trace::from_xy(&[0.0, 1.0, 2.0], &[0.5, 2.0, 1.0]);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.argmax(), Some((1.0, 2.0)));
        assert!((trace.rectangle_integral(0.5) - 1.75).abs() < 1e-12);
        assert_eq!(trace.last(), Some((2.0, 1.0)));
        assert!(Trace::new().argmax().is_none());
    }
}
