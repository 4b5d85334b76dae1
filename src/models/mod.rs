//! Core data models for sysample.
//!
//! - Parameters and results flowing through the sampling pipeline
//! - Configuration loaded from TOML
//! - Error taxonomy

mod config;
mod error;
mod sample;

pub use config::*;
pub use error::*;
pub use sample::*;
