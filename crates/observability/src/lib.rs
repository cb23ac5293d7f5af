//! Process-wide tracing setup shared by the binaries.

pub mod tracing;

pub use self::tracing::{init, init_with_filter};
