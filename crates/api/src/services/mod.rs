//! Service layer sitting between handlers and the persistence gateway.

pub mod help_requests;
