//! # Collection Query Router
//!
//! Parses the collection endpoint's query parameters into a structured
//! query and evaluates it against the store.
//!
//! Dispatch is an exact match on the `action` parameter, first match
//! wins; an absent or unrecognized action lists the full collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::{DirectoryError, DirectoryResult};
use super::store::UserStore;
use super::user::User;

/// Limit applied when `action=limited` carries no limit parameter
pub const DEFAULT_LIMIT: usize = 10;

/// Raw query parameters of the collection endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Role breakdown of the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Total record count
    pub total: usize,

    /// Record count per role label
    pub by_role: BTreeMap<String, usize>,

    /// Distinct role labels, sorted
    pub roles: Vec<String>,
}

impl UserStats {
    /// Tally a snapshot of the collection
    pub fn tally(users: &[User]) -> Self {
        let mut by_role: BTreeMap<String, usize> = BTreeMap::new();
        for user in users {
            *by_role.entry(user.role.clone()).or_insert(0) += 1;
        }

        let roles: Vec<String> = by_role.keys().cloned().collect();

        Self {
            total: users.len(),
            by_role,
            roles,
        }
    }
}

/// One read mode of the collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionQuery {
    /// Full collection, insertion order
    All,
    /// Role breakdown
    Stats,
    /// Case-insensitive substring match over name and email
    Search(String),
    /// Exact role-label match
    FilterByRole(String),
    /// First `n` records in collection order
    Limited(usize),
}

impl CollectionQuery {
    /// Resolve raw parameters into a query.
    ///
    /// Validation errors surface here, before the store is touched: a
    /// search without a term and a limit that is not a positive integer
    /// are both bad requests.
    pub fn from_params(params: &ListParams) -> DirectoryResult<Self> {
        match params.action.as_deref() {
            Some("stats") => Ok(Self::Stats),

            Some("search") => match params.search.as_deref() {
                Some(term) if !term.is_empty() => Ok(Self::Search(term.to_string())),
                _ => Err(DirectoryError::EmptySearchTerm),
            },

            Some("filter") => match params.role.as_deref() {
                // Absent or empty role degrades to list-all
                Some(role) if !role.is_empty() => Ok(Self::FilterByRole(role.to_string())),
                _ => Ok(Self::All),
            },

            Some("limited") => match params.limit.as_deref() {
                Some(raw) if !raw.is_empty() => {
                    let limit: usize = raw
                        .parse()
                        .map_err(|_| DirectoryError::InvalidLimit(raw.to_string()))?;
                    if limit < 1 {
                        return Err(DirectoryError::InvalidLimit(raw.to_string()));
                    }
                    Ok(Self::Limited(limit))
                }
                _ => Ok(Self::Limited(DEFAULT_LIMIT)),
            },

            // Unknown actions fall through to list-all, like the default
            // arm of a switch
            _ => Ok(Self::All),
        }
    }

    /// Evaluate against the store. Read-only.
    pub fn evaluate(&self, store: &UserStore) -> DirectoryResult<QueryReply> {
        match self {
            Self::All => Ok(QueryReply::All(store.list_all()?)),

            Self::Stats => {
                let users = store.list_all()?;
                Ok(QueryReply::Stats(UserStats::tally(&users)))
            }

            Self::Search(term) => Ok(QueryReply::Matches {
                term: term.clone(),
                users: store.search(term)?,
            }),

            Self::FilterByRole(role) => Ok(QueryReply::Role {
                role: role.clone(),
                users: store.filter_by_role(role)?,
            }),

            Self::Limited(limit) => {
                let (users, total) = store.first(*limit)?;
                Ok(QueryReply::Page {
                    users,
                    limit: *limit,
                    total,
                })
            }
        }
    }
}

/// Result of a collection query, one variant per response shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryReply {
    All(Vec<User>),
    Stats(UserStats),
    Matches { term: String, users: Vec<User> },
    Role { role: String, users: Vec<User> },
    Page { users: Vec<User>, limit: usize, total: usize },
}
