pub mod exercises;
pub mod figure;
pub mod inference;
pub mod params;
pub mod trace;

pub use exercises::{run_exercises, Exercise, ExerciseResult};
pub use figure::{Figure, Series};
pub use trace::{arange, SampleRange, Trace};
