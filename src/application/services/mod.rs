//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod conversion;
mod edit;

pub use conversion::{is_json, ConversionReport, ConversionService, ParseOutcome};
pub use edit::{EditService, EditTarget};
