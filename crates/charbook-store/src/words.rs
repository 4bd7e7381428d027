//! CRUD operations for [`Word`] records.

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::database::Database;
use crate::error::Result;
use crate::models::Word;

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert one row per token, owned by `user_id`, in the order given.
    ///
    /// Runs in a single transaction so a failed submission never persists a
    /// partial word list.  Tokens are stored as-is; the same token may be
    /// stored multiple times.  Returns the number of rows inserted.
    pub fn insert_words(&mut self, user_id: i64, tokens: &[&str]) -> Result<usize> {
        let created_at = Utc::now().to_rfc3339();

        let tx = self.conn_mut().transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO words (content, user_id, created_at)
                 VALUES (?1, ?2, ?3)",
            )?;
            for token in tokens {
                stmt.execute(params![token, user_id, created_at])?;
            }
        }
        tx.commit()?;

        Ok(tokens.len())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List all words owned by `user_id`, most recently inserted first.
    ///
    /// The descending-rowid ordering is a contract: the unique-character
    /// extraction downstream is first-occurrence based, so the position of
    /// each character in the final output is determined by the newest word
    /// containing it.
    pub fn words_for_user(&self, user_id: i64) -> Result<Vec<Word>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, content, user_id, created_at
             FROM words
             WHERE user_id = ?1
             ORDER BY id DESC",
        )?;

        let rows = stmt.query_map(params![user_id], row_to_word)?;

        let mut words = Vec::new();
        for row in rows {
            words.push(row?);
        }
        Ok(words)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete every word owned by `user_id`.  Returns the number of rows
    /// removed (0 when the user owns no words).
    pub fn delete_words_for_user(&self, user_id: i64) -> Result<usize> {
        let affected = self
            .conn()
            .execute("DELETE FROM words WHERE user_id = ?1", params![user_id])?;
        Ok(affected)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Word`].
fn row_to_word(row: &rusqlite::Row<'_>) -> rusqlite::Result<Word> {
    let id: i64 = row.get(0)?;
    let content: String = row.get(1)?;
    let user_id: i64 = row.get(2)?;
    let created_str: String = row.get(3)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Word {
        id,
        content,
        user_id,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db(dir: &tempfile::TempDir) -> (Database, i64) {
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let user = db.create_user("tester", "hash").unwrap();
        (db, user.id)
    }

    fn contents(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.content.as_str()).collect()
    }

    #[test]
    fn listing_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let (mut db, user_id) = open_test_db(&dir);

        let count = db.insert_words(user_id, &["爱", "学习", "爱好"]).unwrap();
        assert_eq!(count, 3);

        let words = db.words_for_user(user_id).unwrap();
        assert_eq!(contents(&words), vec!["爱好", "学习", "爱"]);
    }

    #[test]
    fn listing_spans_submissions_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let (mut db, user_id) = open_test_db(&dir);

        db.insert_words(user_id, &["猫"]).unwrap();
        db.insert_words(user_id, &["狗猫"]).unwrap();

        let words = db.words_for_user(user_id).unwrap();
        assert_eq!(contents(&words), vec!["狗猫", "猫"]);
    }

    #[test]
    fn duplicate_tokens_are_all_stored() {
        let dir = tempfile::tempdir().unwrap();
        let (mut db, user_id) = open_test_db(&dir);

        db.insert_words(user_id, &["do", "re", "do"]).unwrap();

        let words = db.words_for_user(user_id).unwrap();
        assert_eq!(contents(&words), vec!["do", "re", "do"]);
    }

    #[test]
    fn clear_removes_only_the_owners_words() {
        let dir = tempfile::tempdir().unwrap();
        let (mut db, user_id) = open_test_db(&dir);
        let other = db.create_user("other", "hash").unwrap();

        db.insert_words(user_id, &["one", "two"]).unwrap();
        db.insert_words(other.id, &["three"]).unwrap();

        assert_eq!(db.delete_words_for_user(user_id).unwrap(), 2);
        assert!(db.words_for_user(user_id).unwrap().is_empty());
        assert_eq!(db.words_for_user(other.id).unwrap().len(), 1);
    }

    #[test]
    fn clear_with_no_words_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (db, user_id) = open_test_db(&dir);

        assert_eq!(db.delete_words_for_user(user_id).unwrap(), 0);
        assert!(db.words_for_user(user_id).unwrap().is_empty());
    }
}
