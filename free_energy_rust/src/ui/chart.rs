use crate::simulation::figure::Figure;

/// Fraction of the ordinate span added above and below the data.
const Y_PADDING: f64 = 0.05;

/// Axis extents of a figure as `(x_bounds, y_bounds)`.
///
/// Non-finite samples are ignored. Returns `None` when no finite sample
/// exists. Flat data gets a unit-wide window so the line stays visible.
#[must_use]
pub fn axis_bounds(figure: &Figure) -> Option<([f64; 2], [f64; 2])> {
    let mut points = figure
        .series
        .iter()
        .flat_map(|s| s.trace.points().iter().copied())
        .filter(|(x, y)| x.is_finite() && y.is_finite());

    let (x0, y0) = points.next()?;
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
    for (x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if x_max - x_min <= f64::EPSILON {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let y_span = y_max - y_min;
    if y_span <= f64::EPSILON {
        y_min -= 0.5;
        y_max += 0.5;
    } else {
        y_min -= y_span * Y_PADDING;
        y_max += y_span * Y_PADDING;
    }

    Some(([x_min, x_max], [y_min, y_max]))
}

/// `count` evenly spaced tick labels across `bounds`.
///
/// Decimal places shrink as the span grows.
#[must_use]
pub fn axis_labels(bounds: [f64; 2], count: usize) -> Vec<String> {
    let [lo, hi] = bounds;
    let span = hi - lo;
    let decimals = if span >= 100.0 {
        0
    } else if span >= 1.0 {
        2
    } else {
        3
    };

    match count {
        0 => Vec::new(),
        1 => vec![format!("{lo:.decimals$}")],
        _ => (0..count)
            .map(|i| {
                let value = lo + span * i as f64 / (count - 1) as f64;
                format!("{value:.decimals$}")
            })
            .collect(),
    }
}

/// Compact `name=value` summary of each line's final sample.
#[must_use]
pub fn final_value_summary(figure: &Figure) -> String {
    figure
        .final_values()
        .map(|(name, (_, y))| format!("{name}={y:.4}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
