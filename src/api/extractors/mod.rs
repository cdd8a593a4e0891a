//! Request extractors that report failures in the standard error body.

mod validated_json;
mod validated_query;

pub use validated_json::{format_validation_errors, ValidatedJson};
pub use validated_query::ValidatedQuery;
