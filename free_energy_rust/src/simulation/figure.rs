//! Plot descriptions handed to the rendering sink.

use super::trace::Trace;

/// A named line on a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub trace: Trace,
}

/// One plot: title, axis labels and the lines drawn on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Figure {
    #[must_use]
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    /// Adds a line to the figure (builder style).
    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, trace: Trace) -> Self {
        self.series.push(Series {
            name: name.into(),
            trace,
        });
        self
    }

    /// Looks up a line by name.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Final `(x, y)` of every non-empty line, in insertion order.
    pub fn final_values(&self) -> impl Iterator<Item = (&str, (f64, f64))> + '_ {
        self.series
            .iter()
            .filter_map(|s| s.trace.last().map(|p| (s.name.as_str(), p)))
    }
}
