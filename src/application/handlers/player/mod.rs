//! Player handlers.

mod create_player;
mod queries;
mod update_player;

pub use create_player::{CreatePlayerCommand, CreatePlayerHandler, CreatePlayerResult};
pub use queries::{GetPlayerHandler, GetPlayerQuery, ListPlayersHandler};
pub use update_player::{UpdatePlayerCommand, UpdatePlayerHandler};
