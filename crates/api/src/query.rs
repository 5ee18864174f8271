//! Query-string normalization for the help request list endpoint.
//!
//! Generated clients send a multi-select as a bare `zipCode=a` when exactly
//! one value is chosen and as repeated `zipCode[]=a&zipCode[]=b` otherwise
//! (same for `status`). Both spellings, in any mix, are folded into one set
//! here, before any handler runs, so the rest of the stack only ever sees a
//! typed [`HelpRequestListQuery`].

use std::collections::BTreeSet;

use aidhub_core::help_request::{HelpRequestFilter, HelpRequestStatus, UserIdFilter};
use aidhub_core::types::DbId;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::AppError;

/// Parsed `GET /help-requests` query, with `userId` still unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpRequestListQuery {
    pub user_id: Option<UserIdFilter>,
    pub exclude_user_id: Option<DbId>,
    pub zip_codes: BTreeSet<String>,
    pub statuses: BTreeSet<HelpRequestStatus>,
    pub include_requester: bool,
}

impl HelpRequestListQuery {
    /// Build from decoded key/value pairs.
    ///
    /// Empty values are treated as absent and unknown keys are ignored. For
    /// the single-valued keys the last occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "userId" => query.user_id = Some(value.parse()?),
                "excludeUserId" => {
                    query.exclude_user_id = Some(value.parse().map_err(|_| {
                        AppError::BadRequest(format!(
                            "excludeUserId must be an integer, got '{value}'"
                        ))
                    })?);
                }
                "zipCode" | "zipCode[]" => {
                    query.zip_codes.insert(value.to_string());
                }
                "status" | "status[]" => {
                    query.statuses.insert(value.parse()?);
                }
                "includeRequester" => query.include_requester = parse_flag(value)?,
                _ => {}
            }
        }

        Ok(query)
    }

    /// Substitute the caller for the `me` token and produce the service filter.
    pub fn resolve(self, caller_id: DbId) -> HelpRequestFilter {
        HelpRequestFilter {
            user_id: self.user_id.map(|u| u.resolve(caller_id)),
            exclude_user_id: self.exclude_user_id,
            zip_codes: self.zip_codes,
            statuses: self.statuses,
            include_requester: self.include_requester,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(AppError::BadRequest(format!(
            "includeRequester must be true or false, got '{other}'"
        ))),
    }
}

impl<S> FromRequestParts<S> for HelpRequestListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::from_pairs(pairs)
    }
}
