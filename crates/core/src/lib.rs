//! Domain logic for the aid-matching backend.
//!
//! Nothing in this crate touches the database or HTTP; it holds the shared
//! types, the error taxonomy, and the rules the service layer enforces.

pub mod error;
pub mod help_request;
pub mod languages;
pub mod types;
