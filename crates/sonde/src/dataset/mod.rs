//! Tabular data handle, cell values, and row filter expressions.

mod query;
mod table;
mod value;

pub use query::{CompareOp, Literal, Query};
pub use table::Dataset;
pub use value::{Value, is_null_token, parse_datetime};
