//! Employee Management System - REST API for a small company's HR records
//!
//! Departments, employees and their login accounts, daily attendance,
//! leave requests and salary records, behind JWT authentication with an
//! admin/employee role split.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **services**: Use cases over the Unit of Work
//! - **infra**: PostgreSQL, Redis and health probes
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Response envelopes
//!
//! Domain entities live in the `domain` crate and the error type in
//! `common`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the first admin account
//! cargo run -- seed-admin
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use common::{AppError, AppResult};
pub use config::Config;
pub use infra::Cache;
