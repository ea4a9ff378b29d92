//! Peripheral binding handlers.
//!
//! Server side of the `/peripheral` contract used by the workout service.

mod bind_peripherals;
mod forward_location;
mod queries;
mod unbind_peripherals;

pub use bind_peripherals::{BindPeripheralsCommand, BindPeripheralsHandler};
pub use forward_location::{ForwardLocationCommand, ForwardLocationHandler};
pub use queries::{AverageHeartRateHandler, BindingStatus, BindingStatusHandler};
pub use unbind_peripherals::{UnbindOutcome, UnbindPeripheralsCommand, UnbindPeripheralsHandler};
