//! HTTP adapter for player endpoints.
//!
//! - `POST /players` - Register a player
//! - `GET /players` - List players
//! - `GET /players/:id` - Fetch one player
//! - `PUT /players` - Replace a player's profile

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::player_routes;
