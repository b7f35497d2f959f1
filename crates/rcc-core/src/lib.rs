//! Core types and utilities for the RCC rotation data layer.
//!
//! This crate provides the foundational types shared by the data-loading
//! crates: the error type, the image tensor value type, normalization and
//! dataset configuration, and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{DataConfig, NormalizeConfig, PathRange};
pub use error::{Error, Result};
pub use logging::{init_default_logging, init_logging, LogConfig, LogLevel};
pub use types::{ImageDimensions, ImageTensor, CHANNELS};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::logging::*;
    pub use crate::types::*;
}
