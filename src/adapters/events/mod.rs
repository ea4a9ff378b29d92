//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus for domain events

mod in_memory;

pub use in_memory::{InMemoryEventBus, DEFAULT_HISTORY_LIMIT};
