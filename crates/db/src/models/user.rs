//! Requester identity as far as this service stores it.

use aidhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identifying info attached to listings when `includeRequester` is set.
///
/// `name` is `null` for callers whose profile was never mirrored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RequesterSummary {
    pub id: DbId,
    pub name: Option<String>,
}

/// DTO for mirroring a profile from the identity provider. `id` is the
/// provider's user id, the same value carried in the `userId` claim.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
}
