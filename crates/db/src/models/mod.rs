//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - A `Serialize` record returned by the API (enum columns decoded)
//! - `Deserialize` + `Validate` DTOs for request payloads

use std::str::FromStr;

pub mod article;
pub mod help_request;
pub mod user;

/// Decode a text column into one of the core enums.
///
/// A value outside the enum means the row violates a CHECK constraint the
/// code relies on, so it surfaces as a column decode error.
pub(crate) fn decode_text_column<T>(column: &'static str, value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
