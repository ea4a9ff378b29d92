//! In-process implementations of the cross-service ports.
//!
//! Used when the player and peripheral services run inside this process
//! (single-process mode and integration tests). They call the same
//! application handlers the HTTP routes call, without the network hop.

mod peripheral;
mod player_directory;

pub use peripheral::LocalPeripheralBinding;
pub use player_directory::LocalPlayerDirectory;
