//! Workout session handlers.

mod activity_log;
mod end_workout;
mod queries;
mod start_workout;

pub use activity_log::{ActivitySnapshot, WorkoutActivityLog, WORKOUT_EVENT_TYPES};
pub use end_workout::{EndWorkoutCommand, EndWorkoutHandler, EndWorkoutResult};
pub use queries::{
    GetWorkoutHandler, GetWorkoutQuery, HeartRateSource, ListWorkoutsHandler, ListWorkoutsQuery,
    WorkoutView,
};
pub use start_workout::{StartWorkoutCommand, StartWorkoutHandler, StartWorkoutResult};
