pub mod chart;
pub mod render;

/// Which figure the viewer is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected: usize,
    pub count: usize,
}

impl ViewState {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { selected: 0, count }
    }

    /// Move to the next figure, wrapping around.
    pub fn next(&mut self) {
        if self.count > 0 {
            self.selected = (self.selected + 1) % self.count;
        }
    }

    /// Move to the previous figure, wrapping around.
    pub fn previous(&mut self) {
        if self.count > 0 {
            self.selected = (self.selected + self.count - 1) % self.count;
        }
    }

    /// Jump to a 0-based index if it exists.
    pub fn select(&mut self, index: usize) {
        if index < self.count {
            self.selected = index;
        }
    }
}
