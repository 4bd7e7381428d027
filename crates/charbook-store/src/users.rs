//! CRUD operations for [`User`] records.

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::User;

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new user and return the stored record.
    ///
    /// Usernames are unique (case-sensitive).  A duplicate registration is
    /// rejected with [`StoreError::UsernameTaken`] and leaves the table
    /// unchanged.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let created_at = Utc::now();

        let inserted = self.conn().execute(
            "INSERT INTO users (username, password_hash, created_at)
             VALUES (?1, ?2, ?3)",
            params![username, password_hash, created_at.to_rfc3339()],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::UsernameTaken);
            }
            Err(other) => return Err(other.into()),
        }

        Ok(User {
            id: self.conn().last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single user by rowid.
    pub fn get_user(&self, id: i64) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT id, username, password_hash, created_at
                 FROM users
                 WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Fetch a single user by exact username.
    pub fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.conn()
            .query_row(
                "SELECT id, username, password_hash, created_at
                 FROM users
                 WHERE username = ?1",
                params![username],
                row_to_user,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Total number of registered users.
    pub fn count_users(&self) -> Result<i64> {
        let count = self
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`User`].
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let username: String = row.get(1)?;
    let password_hash: String = row.get(2)?;
    let created_str: String = row.get(3)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id,
        username,
        password_hash,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db(dir: &tempfile::TempDir) -> Database {
        Database::open_at(&dir.path().join("test.db")).unwrap()
    }

    #[test]
    fn create_and_fetch_user() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_test_db(&dir);

        let created = db.create_user("alice", "$argon2id$stub").unwrap();
        assert_eq!(created.username, "alice");

        let by_name = db.get_user_by_username("alice").unwrap();
        assert_eq!(by_name, created);

        let by_id = db.get_user(created.id).unwrap();
        assert_eq!(by_id, created);
    }

    #[test]
    fn duplicate_username_leaves_table_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_test_db(&dir);

        db.create_user("bob", "hash-one").unwrap();
        let err = db.create_user("bob", "hash-two").unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));

        assert_eq!(db.count_users().unwrap(), 1);
        // The original record survives untouched.
        let bob = db.get_user_by_username("bob").unwrap();
        assert_eq!(bob.password_hash, "hash-one");
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_test_db(&dir);

        db.create_user("Carol", "hash").unwrap();
        let err = db.get_user_by_username("carol").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_test_db(&dir);

        let err = db.get_user_by_username("nobody").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let err = db.get_user(42).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
