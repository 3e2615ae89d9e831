//! # gsort Common Library
//!
//! Shared code for the gsort workspace:
//! - Error type
//! - TOML configuration discovery and loading
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
