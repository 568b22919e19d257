pub mod set;

pub use set::{NewSet, RawWorkoutSet, ValidationError, WorkoutSet};
