//! Heart-rate monitor domain module.
//!
//! Device bindings, the heart-rate value objects and stored readings.

mod binding;
mod heart_rate;
mod reading;

pub use binding::{HrmBinding, DEFAULT_SAMPLING_INTERVAL_MS};
pub use heart_rate::{HeartRate, HeartRateRange};
pub use reading::HrmReading;
