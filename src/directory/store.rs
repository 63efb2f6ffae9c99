//! # User Store
//!
//! The process-wide mutable collection backing every endpoint.
//!
//! A single `RwLock` guards the collection; every read-modify-write
//! sequence holds the write guard for its whole duration, so id
//! assignment, uniqueness checks, and the mutation itself are one
//! atomic step.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{DirectoryError, DirectoryResult};
use super::user::{User, UserDraft};

/// In-memory user collection
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

/// The four records every fresh store starts with
fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "张三".to_string(),
            email: "zhangsan@example.com".to_string(),
            role: "管理员".to_string(),
        },
        User {
            id: 2,
            name: "李四".to_string(),
            email: "lisi@example.com".to_string(),
            role: "用户".to_string(),
        },
        User {
            id: 3,
            name: "王五".to_string(),
            email: "wangwu@example.com".to_string(),
            role: "用户".to_string(),
        },
        User {
            id: 4,
            name: "赵六".to_string(),
            email: "zhaoliu@example.com".to_string(),
            role: "编辑".to_string(),
        },
    ]
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo records (ids 1..=4)
    pub fn with_seed() -> Self {
        Self {
            users: RwLock::new(seed_users()),
        }
    }

    fn read(&self) -> DirectoryResult<RwLockReadGuard<'_, Vec<User>>> {
        self.users
            .read()
            .map_err(|_| DirectoryError::Storage("Lock poisoned".to_string()))
    }

    fn write(&self) -> DirectoryResult<RwLockWriteGuard<'_, Vec<User>>> {
        self.users
            .write()
            .map_err(|_| DirectoryError::Storage("Lock poisoned".to_string()))
    }

    /// Number of records currently held
    pub fn len(&self) -> DirectoryResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DirectoryResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Full collection in insertion order
    pub fn list_all(&self) -> DirectoryResult<Vec<User>> {
        Ok(self.read()?.clone())
    }

    /// Records whose name or email contains `term`, case-insensitively
    pub fn search(&self, term: &str) -> DirectoryResult<Vec<User>> {
        let needle = term.to_lowercase();
        Ok(self
            .read()?
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Records whose role label matches `role` exactly (case-sensitive)
    pub fn filter_by_role(&self, role: &str) -> DirectoryResult<Vec<User>> {
        Ok(self
            .read()?
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    /// The first `limit` records in collection order, plus the full size
    pub fn first(&self, limit: usize) -> DirectoryResult<(Vec<User>, usize)> {
        let users = self.read()?;
        let page: Vec<User> = users.iter().take(limit).cloned().collect();
        Ok((page, users.len()))
    }

    /// Validate the draft, assign the next id, and append the record.
    ///
    /// The new id is one greater than the current maximum; an empty
    /// collection starts over at 1.
    pub fn create(&self, draft: UserDraft) -> DirectoryResult<User> {
        draft.validate()?;

        let mut users = self.write()?;

        if users.iter().any(|u| u.email == draft.email) {
            return Err(DirectoryError::EmailTaken(draft.email));
        }

        let id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
        let user = draft.into_user(id);
        users.push(user.clone());

        Ok(user)
    }

    /// Look up one record by id
    pub fn get(&self, id: u64) -> DirectoryResult<User> {
        self.read()?
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DirectoryError::UserNotFound)
    }

    /// Replace the mutable fields of the record with this id.
    ///
    /// Existence is checked before the draft is validated, so an unknown
    /// id reports not-found even when the body is also bad. The email may
    /// only collide with the record being updated itself.
    pub fn update(&self, id: u64, draft: UserDraft) -> DirectoryResult<User> {
        let mut users = self.write()?;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(DirectoryError::UserNotFound)?;

        draft.validate()?;

        if users.iter().any(|u| u.email == draft.email && u.id != id) {
            return Err(DirectoryError::EmailTaken(draft.email));
        }

        let user = &mut users[index];
        user.name = draft.name;
        user.email = draft.email;
        user.role = draft.role;

        Ok(user.clone())
    }

    /// Remove the record with this id and return its prior content
    pub fn delete(&self, id: u64) -> DirectoryResult<User> {
        let mut users = self.write()?;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(DirectoryError::UserNotFound)?;

        Ok(users.remove(index))
    }
}
