//! Shared pieces of the lzscan workspace: error type, configuration and
//! the line-break translation flags.

pub mod config;
pub mod error;
pub mod line_break;

pub use config::{CodecConfig, LzsConfig, ScannerConfig};
pub use error::{LzsError, Result};
pub use line_break::LineBreakOptions;
