//! HRM peripheral service handlers.

mod queries;
mod record_reading;

pub use queries::{GetReadingHandler, ListReadingsHandler};
pub use record_reading::{RecordReadingCommand, RecordReadingHandler, RecordReadingResult};
