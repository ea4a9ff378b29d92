//! Player domain module.
//!
//! Player profiles: identity, body measurements, zone and the training
//! preferences that parameterize new workouts.

mod aggregate;

pub use aggregate::{age_on, Player, PlayerDetails, User, MAX_NAME_LENGTH};
