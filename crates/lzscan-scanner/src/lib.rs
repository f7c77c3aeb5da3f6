//! Cursor-based text scanner for small hand-written parsers.

pub mod error;
pub mod scanner;

pub use error::{Result, ScanError};
pub use lzscan_core::LineBreakOptions;
pub use scanner::Scanner;
