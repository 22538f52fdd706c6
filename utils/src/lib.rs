//! Shared utilities for the tip jar.

pub mod logging;

pub use logging::{init_logging, LogFormat, ParseLogFormatError};
