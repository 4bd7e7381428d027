//! v001 -- Initial schema creation.
//!
//! Creates the two core tables: `users` and `words`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,        -- case-sensitive exact match
    password_hash TEXT NOT NULL,               -- Argon2id, PHC string format
    created_at    TEXT NOT NULL                -- ISO-8601 / RFC-3339
);

-- ----------------------------------------------------------------
-- Words
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS words (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    content    TEXT NOT NULL,                  -- never empty or whitespace-only
    user_id    INTEGER NOT NULL,               -- FK -> users(id)
    created_at TEXT NOT NULL,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Newest-first listing per user is the hot query.
CREATE INDEX IF NOT EXISTS idx_words_user_id
    ON words(user_id, id DESC);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
