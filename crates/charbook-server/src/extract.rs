//! Tokenization of raw submissions and unique-character extraction.
//!
//! `unique_characters` is first-occurrence based, so the order of the input
//! words directly determines the output order.  The caller contract is that
//! words arrive newest-first ([`Database::words_for_user`]): among all words
//! containing a given character, its output position is decided by the most
//! recently submitted one.
//!
//! [`Database::words_for_user`]: charbook_store::Database::words_for_user

use std::collections::HashSet;

use charbook_store::Database;

use crate::error::ServerError;

/// Split a raw submission into word tokens.
///
/// Commas are treated as whitespace, the text is split on any run of
/// whitespace, and empty tokens are dropped.  Token order matches the order
/// of appearance in the input.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.replace(',', " ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Collect the distinct characters across `words` in first-occurrence order.
///
/// The scan is two-level: word by word in the given order, then character by
/// character left to right within each word.  A character is emitted the
/// first time it is seen and skipped afterwards.  Granularity is one Unicode
/// scalar value per character.
pub fn unique_characters<I, S>(words: I) -> Vec<char>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for word in words {
        for ch in word.as_ref().chars() {
            if seen.insert(ch) {
                out.push(ch);
            }
        }
    }

    out
}

/// The single retrieval-plus-extraction path behind both the HTML view and
/// the document export.  Sharing it keeps the two byte-identical for the
/// same word set.
pub fn characters_for_user(db: &Database, user_id: i64) -> Result<Vec<char>, ServerError> {
    let words = db.words_for_user(user_id)?;
    Ok(unique_characters(words.iter().map(|w| w.content.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_whitespace_and_commas() {
        assert_eq!(tokenize("爱 学习 爱好"), vec!["爱", "学习", "爱好"]);
        assert_eq!(tokenize("a, b,,c"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("one\ttwo\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn tokenize_drops_empty_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t , , \n").is_empty());
    }

    #[test]
    fn tokenize_keeps_punctuation_attached_to_tokens() {
        assert_eq!(tokenize("hi! bye?"), vec!["hi!", "bye?"]);
    }

    #[test]
    fn newest_word_decides_character_position() {
        // Words as retrieved newest-first: "爱好" was submitted last.
        // 爱 and 好 are first seen there, 学 and 习 come from the older
        // "学习", and the oldest "爱" contributes nothing new.
        let chars = unique_characters(["爱好", "学习", "爱"]);
        assert_eq!(chars, vec!['爱', '好', '学', '习']);
    }

    #[test]
    fn repeated_character_across_submissions() {
        // "狗猫" submitted after "猫": newest-first retrieval puts 狗 ahead
        // of 猫 even though 猫 was submitted first.
        let chars = unique_characters(["狗猫", "猫"]);
        assert_eq!(chars, vec!['狗', '猫']);
    }

    #[test]
    fn each_distinct_character_appears_exactly_once() {
        let input = ["abca", "bcd", "dda"];
        let chars = unique_characters(input);

        let mut sorted = chars.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(chars.len(), sorted.len());

        let expected: HashSet<char> = input.iter().flat_map(|w| w.chars()).collect();
        assert_eq!(chars.iter().copied().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn extraction_is_idempotent() {
        let chars = unique_characters(["爱好", "学习", "爱"]);
        let collapsed: String = chars.iter().collect();
        assert_eq!(unique_characters([collapsed.as_str()]), chars);
    }

    #[test]
    fn reordering_input_never_changes_the_output_set() {
        let forward = unique_characters(["狗猫", "猫", "爱好"]);
        let backward = unique_characters(["爱好", "猫", "狗猫"]);

        let forward_set: HashSet<char> = forward.iter().copied().collect();
        let backward_set: HashSet<char> = backward.iter().copied().collect();
        assert_eq!(forward_set, backward_set);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(unique_characters(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn view_and_export_share_one_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_at(&dir.path().join("test.db")).unwrap();
        let user = db.create_user("tester", "hash").unwrap();

        db.insert_words(user.id, &["爱", "学习", "爱好"]).unwrap();

        let first = characters_for_user(&db, user.id).unwrap();
        assert_eq!(first, vec!['爱', '好', '学', '习']);

        // Calling again without intervening ingestion returns the identical
        // sequence, which is what keeps /filter_words and /download in sync.
        let second = characters_for_user(&db, user.id).unwrap();
        assert_eq!(first, second);
    }
}
