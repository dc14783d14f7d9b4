//! Key-value persistence seam for engine state.
//!
//! # Responsibility
//! - Define the narrow store contract both engines persist through.
//! - Provide the in-memory implementation used by tests and ephemeral
//!   sessions.
//!
//! # Invariants
//! - Stores hold opaque string blobs; serialization stays in the engines.
//! - Store failures never abort an engine operation; engines log and
//!   continue (state then reverts to defaults on next load).

use crate::db::DbError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure surfaced to the engines.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value store contract.
///
/// Methods take `&self`; implementations rely on interior mutability (or the
/// backend's own, as SQLite connections do). The engines are single-threaded
/// by design, so no `Sync` bound is required.
pub trait StateStore {
    /// Returns the blob stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: StateStore + ?Sized> StateStore for &T {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).save(key, value)
    }
}

/// In-memory store backed by a `HashMap`.
///
/// Used by tests and by sessions that opt out of durable persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
