//! User Directory Invariant Tests
//!
//! Tests must prove that the directory's contracts hold:
//! 1. Id assignment: new id = max(existing) + 1, falling back to 1
//! 2. Query validation: bad search/limit parameters fail before the
//!    store is touched
//! 3. Read modes return exactly the specified subsets
//! 4. Failed mutations leave the collection unchanged
//! 5. Uniqueness: ids and emails stay unique across every operation

use rosterd::directory::{
    CollectionQuery, DirectoryError, ListParams, QueryReply, UserDraft, UserStore, DEFAULT_LIMIT,
};

fn seeded() -> UserStore {
    UserStore::with_seed()
}

fn list_params(pairs: &[(&str, &str)]) -> ListParams {
    let mut params = ListParams::default();
    for (key, value) in pairs {
        match *key {
            "action" => params.action = Some(value.to_string()),
            "role" => params.role = Some(value.to_string()),
            "limit" => params.limit = Some(value.to_string()),
            "search" => params.search = Some(value.to_string()),
            other => panic!("unknown param {}", other),
        }
    }
    params
}

fn run_query(store: &UserStore, pairs: &[(&str, &str)]) -> Result<QueryReply, DirectoryError> {
    CollectionQuery::from_params(&list_params(pairs))?.evaluate(store)
}

// =============================================================================
// ID ASSIGNMENT
// =============================================================================

/// New id equals one plus the maximum id present immediately before creation.
#[test]
fn test_new_id_is_max_plus_one() {
    let store = seeded();

    let first = store
        .create(UserDraft::new("X", "x@y.com", "用户"))
        .unwrap();
    assert_eq!(first.id, 5);

    let second = store
        .create(UserDraft::new("Y", "y@z.com", "用户"))
        .unwrap();
    assert_eq!(second.id, 6);
}

/// Creation over an emptied collection restarts ids at 1 instead of
/// producing an undefined id.
#[test]
fn test_empty_collection_id_fallback() {
    let store = seeded();
    for id in 1..=4 {
        store.delete(id).unwrap();
    }
    assert!(store.is_empty().unwrap());

    let user = store
        .create(UserDraft::new("X", "x@y.com", "用户"))
        .unwrap();
    assert_eq!(user.id, 1);
}

// =============================================================================
// SEARCH
// =============================================================================

/// Search returns exactly the records whose name or email contains the
/// term case-insensitively.
#[test]
fn test_search_returns_exact_subset() {
    let store = seeded();

    let expected: Vec<u64> = store
        .list_all()
        .unwrap()
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains("wang") || u.email.to_lowercase().contains("wang")
        })
        .map(|u| u.id)
        .collect();

    let reply = run_query(&store, &[("action", "search"), ("search", "WANG")]).unwrap();
    let QueryReply::Matches { users, .. } = reply else {
        panic!("expected matches reply");
    };

    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), expected);
    assert_eq!(users.len(), 1);
}

/// An empty or absent search term is a validation error, never an
/// empty-success result.
#[test]
fn test_search_without_term_is_validation_error() {
    let store = seeded();

    let absent = run_query(&store, &[("action", "search")]);
    assert!(matches!(absent, Err(DirectoryError::EmptySearchTerm)));

    let empty = run_query(&store, &[("action", "search"), ("search", "")]);
    assert!(matches!(empty, Err(DirectoryError::EmptySearchTerm)));
}

/// A term matching nothing is still a success, with an empty list.
#[test]
fn test_search_with_no_matches_succeeds() {
    let store = seeded();
    let reply = run_query(&store, &[("action", "search"), ("search", "nobody")]).unwrap();

    let QueryReply::Matches { users, .. } = reply else {
        panic!("expected matches reply");
    };
    assert!(users.is_empty());
}

// =============================================================================
// FILTER
// =============================================================================

/// Filtering by an unknown role label yields an empty success list.
#[test]
fn test_filter_unknown_role_is_empty_success() {
    let store = seeded();
    let reply = run_query(&store, &[("action", "filter"), ("role", "ghost")]).unwrap();

    let QueryReply::Role { users, .. } = reply else {
        panic!("expected role reply");
    };
    assert!(users.is_empty());
}

/// Role matching is exact and case-sensitive.
#[test]
fn test_filter_role_match_is_exact() {
    let store = seeded();
    store
        .create(UserDraft::new("Admin", "admin@example.com", "admin"))
        .unwrap();

    let reply = run_query(&store, &[("action", "filter"), ("role", "Admin")]).unwrap();
    let QueryReply::Role { users, .. } = reply else {
        panic!("expected role reply");
    };
    assert!(users.is_empty());
}

/// A filter without a role parameter behaves identically to list-all.
#[test]
fn test_filter_without_role_lists_all() {
    let store = seeded();
    let reply = run_query(&store, &[("action", "filter")]).unwrap();

    let QueryReply::All(users) = reply else {
        panic!("expected list-all reply");
    };
    assert_eq!(users.len(), 4);
}

// =============================================================================
// BOUNDED LIST
// =============================================================================

/// limit=0 and non-numeric limits are validation errors; limit=2 over a
/// 4-record collection yields exactly 2 records with count and total.
#[test]
fn test_bounded_list_validation_and_page() {
    let store = seeded();

    let zero = run_query(&store, &[("action", "limited"), ("limit", "0")]);
    assert!(matches!(zero, Err(DirectoryError::InvalidLimit(_))));

    let word = run_query(&store, &[("action", "limited"), ("limit", "abc")]);
    assert!(matches!(word, Err(DirectoryError::InvalidLimit(_))));

    let reply = run_query(&store, &[("action", "limited"), ("limit", "2")]).unwrap();
    let QueryReply::Page {
        users,
        limit,
        total,
    } = reply
    else {
        panic!("expected page reply");
    };
    assert_eq!(users.len(), 2);
    assert_eq!(limit, 2);
    assert_eq!(total, 4);
}

/// An absent limit parameter falls back to the default.
#[test]
fn test_bounded_list_default_limit() {
    let store = seeded();
    let reply = run_query(&store, &[("action", "limited")]).unwrap();

    let QueryReply::Page { users, limit, .. } = reply else {
        panic!("expected page reply");
    };
    assert_eq!(limit, DEFAULT_LIMIT);
    // Only 4 records exist, so the page is the whole collection
    assert_eq!(users.len(), 4);
}

// =============================================================================
// MUTATION ATOMICITY
// =============================================================================

/// Updating a record to an email owned by a different record conflicts
/// and leaves both records unchanged.
#[test]
fn test_conflicting_update_changes_nothing() {
    let store = seeded();
    let before = store.list_all().unwrap();

    let result = store.update(3, UserDraft::new("王五", "lisi@example.com", "用户"));
    assert!(matches!(result, Err(DirectoryError::EmailTaken(_))));

    assert_eq!(store.list_all().unwrap(), before);
}

/// A rejected creation leaves the collection unchanged.
#[test]
fn test_rejected_creation_changes_nothing() {
    let store = seeded();
    let before = store.list_all().unwrap();

    let duplicate = store.create(UserDraft::new("X", "zhangsan@example.com", "用户"));
    assert!(matches!(duplicate, Err(DirectoryError::EmailTaken(_))));

    let malformed = store.create(UserDraft::new("X", "not-an-email", "用户"));
    assert!(matches!(malformed, Err(DirectoryError::InvalidEmail)));

    assert_eq!(store.list_all().unwrap(), before);
}

/// Deleting a known id removes exactly one record and returns its
/// pre-deletion content; a second delete reports not-found.
#[test]
fn test_delete_exactly_once() {
    let store = seeded();

    let removed = store.delete(2).unwrap();
    assert_eq!(removed.id, 2);
    assert_eq!(removed.email, "lisi@example.com");
    assert_eq!(store.len().unwrap(), 3);

    assert!(matches!(
        store.delete(2),
        Err(DirectoryError::UserNotFound)
    ));
    assert_eq!(store.len().unwrap(), 3);
}

// =============================================================================
// UNIQUENESS
// =============================================================================

/// Ids and emails stay unique across a mixed mutation sequence.
#[test]
fn test_uniqueness_holds_across_operations() {
    let store = seeded();

    store
        .create(UserDraft::new("X", "x@y.com", "用户"))
        .unwrap();
    store.delete(1).unwrap();
    store
        .create(UserDraft::new("Y", "y@z.com", "编辑"))
        .unwrap();
    store
        .update(2, UserDraft::new("李四", "lisi-new@example.com", "用户"))
        .unwrap();

    let users = store.list_all().unwrap();

    let mut ids: Vec<u64> = users.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), users.len());

    let mut emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    emails.sort_unstable();
    emails.dedup();
    assert_eq!(emails.len(), users.len());
}

// =============================================================================
// STATS
// =============================================================================

/// The concrete scenario: seed ids 1-4, create a 用户 record, stats
/// reports total 5 with the updated role breakdown.
#[test]
fn test_stats_after_creation() {
    let store = seeded();

    let created = store
        .create(UserDraft::new("X", "x@y.com", "用户"))
        .unwrap();
    assert_eq!(created.id, 5);

    let reply = run_query(&store, &[("action", "stats")]).unwrap();
    let QueryReply::Stats(stats) = reply else {
        panic!("expected stats reply");
    };

    assert_eq!(stats.total, 5);
    assert_eq!(stats.by_role.get("用户"), Some(&3));
    assert_eq!(stats.by_role.get("管理员"), Some(&1));
    assert_eq!(stats.by_role.get("编辑"), Some(&1));
    assert_eq!(stats.roles.len(), 3);
}
