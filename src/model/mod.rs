//! Model definitions for invoice page records, meter classification, and
//! batch progress reporting.

pub mod progress;
pub mod record;
pub mod types;

// Re-export commonly used items at the module level
pub use progress::{ProgressEvent, ProgressSnapshot};
pub use record::{BatchResult, PageRecord};
pub use types::{MeterType, DEVICE_PLACEHOLDER};
