//! SeaORM entity definitions
//!
//! Database-specific shapes, separate from the domain models. Enum columns
//! are stored as their display labels.

pub mod account;
pub mod attendance;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod salary;
