//! Common building blocks shared by every layer of the service.
//!
//! This crate provides:
//! - The unified `AppError` type and its HTTP mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
