//! Command-line interface: `serve`, `migrate` and `seed-admin`.

pub mod args;

pub use args::{Cli, Commands};
