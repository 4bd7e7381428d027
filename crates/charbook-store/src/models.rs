//! Domain model structs persisted in the SQLite database.
//!
//! Both structs derive `Serialize` and `Deserialize` so they can be handed
//! directly to templates or logged as structured values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.  Immutable after creation; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Rowid primary key.
    pub id: i64,
    /// Unique login name (case-sensitive exact match).
    pub username: String,
    /// Argon2id hash of the password, PHC string format.
    pub password_hash: String,
    /// Timestamp when the account was registered.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// A single submitted word token, owned by exactly one user.
///
/// The rowid doubles as the insertion-order key: listing a user's words
/// newest-first means `ORDER BY id DESC`, and that ordering feeds the
/// unique-character extraction downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Word {
    /// Rowid primary key, monotonically increasing with insertion.
    pub id: i64,
    /// The token text.  Never empty or whitespace-only.
    pub content: String,
    /// Owning user, FK -> users(id).
    pub user_id: i64,
    /// Timestamp when the word was ingested.
    pub created_at: DateTime<Utc>,
}
