//! HTTP adapter for the trail manager.
//!
//! - `POST /trails` - Register a trail with its shelters
//! - `GET /trails` - List trails

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use routes::trail_routes;
