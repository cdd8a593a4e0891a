//! Shared response types.

mod response;

pub use response::{ApiResponse, Created, Named};
