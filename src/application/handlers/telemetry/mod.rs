//! Telemetry consumers.
//!
//! One `TelemetryHandler` per (service, topic) pair:
//!
//! | Handler | Topic |
//! |---|---|
//! | `HrmBindConsumer` | `HR-Workout-*` |
//! | `ShelterLocator` | `HR-Queue-*` |
//! | `WorkoutLocationConsumer` | `HR-Queue-*` |
//! | `ShelterStatusConsumer` | `TRAIL-Workout-*` |
//! | `HeartRateConsumer` | `HRM-Reading-*` |

mod hrm_bind_consumer;
mod shelter_locator;
mod workout_folds;

pub use hrm_bind_consumer::HrmBindConsumer;
pub use shelter_locator::ShelterLocator;
pub use workout_folds::{HeartRateConsumer, ShelterStatusConsumer, WorkoutLocationConsumer};
