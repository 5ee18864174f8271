//! Help request rules: status values, list filtering, and the article
//! association constraints.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Smallest quantity an association row may carry.
pub const MIN_ARTICLE_AMOUNT: i32 = 1;

/// Query token that stands for the authenticated caller's own id.
pub const ME_TOKEN: &str = "me";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a help request, stored as its uppercase name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HelpRequestStatus {
    #[default]
    Open,
    Ongoing,
    Completed,
    Cancelled,
}

impl HelpRequestStatus {
    pub const ALL: [HelpRequestStatus; 4] = [
        HelpRequestStatus::Open,
        HelpRequestStatus::Ongoing,
        HelpRequestStatus::Completed,
        HelpRequestStatus::Cancelled,
    ];

    /// The value stored in the `help_requests.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            HelpRequestStatus::Open => "OPEN",
            HelpRequestStatus::Ongoing => "ONGOING",
            HelpRequestStatus::Completed => "COMPLETED",
            HelpRequestStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for HelpRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HelpRequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown help request status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// The `userId` filter as the caller supplied it, before identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdFilter {
    /// The `me` token.
    Me,
    Id(DbId),
}

impl UserIdFilter {
    /// Replace the `me` token with the caller's id.
    pub fn resolve(self, caller_id: DbId) -> DbId {
        match self {
            UserIdFilter::Me => caller_id,
            UserIdFilter::Id(id) => id,
        }
    }
}

impl FromStr for UserIdFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ME_TOKEN {
            return Ok(UserIdFilter::Me);
        }
        s.parse::<DbId>().map(UserIdFilter::Id).map_err(|_| {
            CoreError::Validation(format!("userId must be an integer or '{ME_TOKEN}', got '{s}'"))
        })
    }
}

/// Fully resolved list criteria.
///
/// Every populated dimension is AND-combined; inside `zip_codes` and
/// `statuses` any member matches. An empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpRequestFilter {
    pub user_id: Option<DbId>,
    pub exclude_user_id: Option<DbId>,
    pub zip_codes: BTreeSet<String>,
    pub statuses: BTreeSet<HelpRequestStatus>,
    /// Projection option, not a constraint.
    pub include_requester: bool,
}

impl HelpRequestFilter {
    /// Whether a request with the given attributes passes every constraint.
    ///
    /// Reference semantics for the filter. The PostgreSQL list query
    /// expresses the same predicate in SQL, and storage backends without a
    /// query language (such as in-memory test stores) call this directly.
    pub fn matches(&self, requester_user_id: DbId, zip_code: &str, status: HelpRequestStatus) -> bool {
        if self.user_id.is_some_and(|id| id != requester_user_id) {
            return false;
        }
        if self.exclude_user_id == Some(requester_user_id) {
            return false;
        }
        if !self.zip_codes.is_empty() && !self.zip_codes.contains(zip_code) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&status) {
            return false;
        }
        true
    }

    /// Zip codes as an owned list, for binding to `= ANY($n)`.
    pub fn zip_code_list(&self) -> Vec<String> {
        self.zip_codes.iter().cloned().collect()
    }

    /// Status values as stored strings, for binding to `= ANY($n)`.
    pub fn status_list(&self) -> Vec<String> {
        self.statuses.iter().map(|s| s.as_str().to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Article associations
// ---------------------------------------------------------------------------

/// One requested quantity of a catalog article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleLine {
    pub article_id: DbId,
    pub amount: i32,
}

/// Reject quantities below [`MIN_ARTICLE_AMOUNT`].
pub fn validate_amount(amount: i32) -> Result<(), CoreError> {
    if amount < MIN_ARTICLE_AMOUNT {
        return Err(CoreError::Validation(format!(
            "amount must be at least {MIN_ARTICLE_AMOUNT}, got {amount}"
        )));
    }
    Ok(())
}

/// Collapse a submitted article list to one line per article.
///
/// Applies the same keyed-upsert rule as the per-article endpoint: a later
/// line for an article overwrites the amount of an earlier one. Lines keep
/// the position of the first occurrence.
pub fn merge_article_lines(lines: &[ArticleLine]) -> Result<Vec<ArticleLine>, CoreError> {
    let mut merged: Vec<ArticleLine> = Vec::with_capacity(lines.len());
    for line in lines {
        validate_amount(line.amount)?;
        match merged.iter_mut().find(|m| m.article_id == line.article_id) {
            Some(existing) => existing.amount = line.amount,
            None => merged.push(*line),
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(article_id: DbId, amount: i32) -> ArticleLine {
        ArticleLine { article_id, amount }
    }

    #[test]
    fn status_round_trips_through_storage_name() {
        for status in HelpRequestStatus::ALL {
            assert_eq!(status.as_str().parse::<HelpRequestStatus>().unwrap(), status);
        }
        assert!("open".parse::<HelpRequestStatus>().is_err());
    }

    #[test]
    fn status_defaults_to_open() {
        assert_eq!(HelpRequestStatus::default(), HelpRequestStatus::Open);
    }

    #[test]
    fn user_id_filter_parses_me_and_integers() {
        assert_eq!("me".parse::<UserIdFilter>().unwrap(), UserIdFilter::Me);
        assert_eq!("42".parse::<UserIdFilter>().unwrap(), UserIdFilter::Id(42));
        assert!("you".parse::<UserIdFilter>().is_err());
    }

    #[test]
    fn me_resolves_to_caller() {
        assert_eq!(UserIdFilter::Me.resolve(7), 7);
        assert_eq!(UserIdFilter::Id(3).resolve(7), 3);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = HelpRequestFilter::default();
        assert!(filter.matches(1, "10115", HelpRequestStatus::Open));
        assert!(filter.matches(2, "80331", HelpRequestStatus::Completed));
    }

    #[test]
    fn exclusion_wins_over_user_id() {
        let filter = HelpRequestFilter {
            user_id: Some(5),
            exclude_user_id: Some(5),
            ..Default::default()
        };
        assert!(!filter.matches(5, "10115", HelpRequestStatus::Open));
    }

    #[test]
    fn multi_valued_dimensions_match_any_member() {
        let filter = HelpRequestFilter {
            zip_codes: ["10115".to_string(), "10117".to_string()].into(),
            statuses: [HelpRequestStatus::Open, HelpRequestStatus::Ongoing].into(),
            ..Default::default()
        };
        assert!(filter.matches(1, "10117", HelpRequestStatus::Ongoing));
        assert!(!filter.matches(1, "80331", HelpRequestStatus::Open));
        assert!(!filter.matches(1, "10115", HelpRequestStatus::Completed));
    }

    #[test]
    fn amount_floor_is_one() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-3).is_err());
    }

    #[test]
    fn merge_keeps_last_amount_per_article() {
        let merged = merge_article_lines(&[line(7, 3), line(2, 1), line(7, 5)]).unwrap();
        assert_eq!(merged, vec![line(7, 5), line(2, 1)]);
    }

    #[test]
    fn merge_rejects_non_positive_amounts() {
        let err = merge_article_lines(&[line(1, 2), line(3, 0)]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
