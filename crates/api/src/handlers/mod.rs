pub mod articles;
pub mod help_requests;
