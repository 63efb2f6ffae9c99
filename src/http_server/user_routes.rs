//! User Directory HTTP Routes
//!
//! The collection endpoint (`GET`/`POST /users`) and the single-record
//! endpoint (`GET`/`PUT`/`DELETE /users/{id}`).
//!
//! Every handler answers with the uniform envelope. Client errors carry
//! the specific validation message; server errors carry a generic
//! per-operation message with the detail attached.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};

use crate::directory::{
    CollectionQuery, DirectoryError, DirectoryResult, ListParams, QueryReply, User, UserDraft,
    UserStore,
};
use crate::observability::{Logger, Severity};

use super::response::{Envelope, ErrorEnvelope};

// ==================
// Shared State
// ==================

/// Directory state shared across handlers
pub struct DirectoryState {
    pub store: UserStore,
}

impl DirectoryState {
    /// State backed by the seeded demo collection
    pub fn new() -> Self {
        Self {
            store: UserStore::with_seed(),
        }
    }
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new()
    }
}

// ==================
// User Routes
// ==================

/// Create user directory routes
pub fn user_routes(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users", post(create_user_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/users/{id}", put(update_user_handler))
        .route("/users/{id}", delete(delete_user_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Map a directory error onto the failure envelope.
///
/// Client errors keep their own message; server errors answer with the
/// operation's generic message, attach the detail, and are logged.
fn failure(err: DirectoryError, context: &str) -> (StatusCode, Json<ErrorEnvelope>) {
    let status = err.status_code();

    if status.is_server_error() {
        let detail = err.to_string();
        Logger::log_stderr(
            Severity::Error,
            "request_failed",
            &[("detail", detail.as_str()), ("status", status.as_str())],
        );
        (status, Json(ErrorEnvelope::with_detail(context, detail)))
    } else {
        (status, Json(ErrorEnvelope::new(err.to_string())))
    }
}

/// Resolve a path segment to a record id.
///
/// A segment that is not an integer names no record, so it reports
/// not-found rather than a parse error.
fn parse_id(segment: &str) -> DirectoryResult<u64> {
    segment.parse().map_err(|_| DirectoryError::UserNotFound)
}

// ==================
// Collection Handlers
// ==================

/// Collection query router: list, stats, search, filter, bounded list
async fn list_users_handler(
    State(state): State<Arc<DirectoryState>>,
    Query(params): Query<ListParams>,
) -> Result<Response, (StatusCode, Json<ErrorEnvelope>)> {
    let query =
        CollectionQuery::from_params(&params).map_err(|e| failure(e, "Failed to fetch users"))?;
    let reply = query
        .evaluate(&state.store)
        .map_err(|e| failure(e, "Failed to fetch users"))?;

    Ok(match reply {
        QueryReply::All(users) => {
            Json(Envelope::ok(users, "Fetched user list")).into_response()
        }
        QueryReply::Stats(stats) => {
            Json(Envelope::ok(stats, "Fetched user statistics")).into_response()
        }
        QueryReply::Matches { term, users } => {
            let count = users.len();
            Json(
                Envelope::ok(users, format!("Search results for \"{}\"", term))
                    .with_count(count),
            )
            .into_response()
        }
        QueryReply::Role { role, users } => {
            let count = users.len();
            Json(
                Envelope::ok(users, format!("Fetched users with role {}", role))
                    .with_count(count),
            )
            .into_response()
        }
        QueryReply::Page {
            users,
            limit,
            total,
        } => {
            let count = users.len();
            Json(
                Envelope::ok(users, format!("Fetched first {} users", limit))
                    .with_count(count)
                    .with_total(total),
            )
            .into_response()
        }
    })
}

/// Create a new user record
async fn create_user_handler(
    State(state): State<Arc<DirectoryState>>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<Envelope<User>>), (StatusCode, Json<ErrorEnvelope>)> {
    let user = state
        .store
        .create(draft)
        .map_err(|e| failure(e, "Failed to create user"))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(user, "User created")),
    ))
}

// ==================
// Single-Record Handlers
// ==================

/// Fetch one record by id
async fn get_user_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<User>>, (StatusCode, Json<ErrorEnvelope>)> {
    let user = parse_id(&id)
        .and_then(|id| state.store.get(id))
        .map_err(|e| failure(e, "Failed to fetch user"))?;

    Ok(Json(Envelope::ok(user, "Fetched user")))
}

/// Replace the mutable fields of one record
async fn update_user_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(id): Path<String>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<Envelope<User>>, (StatusCode, Json<ErrorEnvelope>)> {
    let user = parse_id(&id)
        .and_then(|id| state.store.update(id, draft))
        .map_err(|e| failure(e, "Failed to update user"))?;

    Ok(Json(Envelope::ok(user, "User updated")))
}

/// Remove one record, answering with its prior content
async fn delete_user_handler(
    State(state): State<Arc<DirectoryState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<User>>, (StatusCode, Json<ErrorEnvelope>)> {
    let user = parse_id(&id)
        .and_then(|id| state.store.delete(id))
        .map_err(|e| failure(e, "Failed to delete user"))?;

    Ok(Json(Envelope::ok(user, "User deleted")))
}
