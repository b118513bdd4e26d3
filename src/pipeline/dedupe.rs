//! Deduplicator
//!
//! Records are identified by their natural key: trimmed title plus trimmed
//! ISBN. The first record seen for a key wins.

use std::collections::HashSet;

use crate::core::model::Record;

/// Natural key of a record
pub fn natural_key(record: &Record) -> (String, String) {
    (
        record.title().trim().to_string(),
        record.isbn().trim().to_string(),
    )
}

/// Drop every record whose natural key was already seen, keeping
/// first-occurrence order. Returns the surviving records and the number
/// dropped.
pub fn dedupe(records: Vec<Record>) -> (Vec<Record>, usize) {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);

    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| seen.insert(natural_key(record)))
        .collect();

    let dropped = before - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, isbn: &str, price: &str) -> Record {
        Record::from_pairs([("title", title), ("ISBN", isbn), ("price", price)])
    }

    #[test]
    fn test_keeps_first_occurrence() {
        let records = vec![
            book("Dune", "978-0", "10"),
            book("Emma", "978-1", "8"),
            book("Dune", "978-0", "99"),
        ];
        let (kept, dropped) = dedupe(records);
        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title(), "Dune");
        assert_eq!(kept[0].price(), "10");
        assert_eq!(kept[1].title(), "Emma");
    }

    #[test]
    fn test_key_is_trimmed() {
        let records = vec![book("Dune", "978-0", "10"), book("  Dune ", " 978-0", "11")];
        let (kept, dropped) = dedupe(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_same_title_different_isbn_survive() {
        let records = vec![book("Dune", "1", ""), book("Dune", "2", "")];
        let (kept, _) = dedupe(records);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_empty_keys_collapse() {
        let records = vec![
            Record::from_pairs([("author", "A")]),
            Record::from_pairs([("author", "B")]),
        ];
        let (kept, dropped) = dedupe(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].author(), "A");
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_lowercase_isbn_fallback() {
        let records = vec![
            Record::from_pairs([("title", "T"), ("isbn", "42")]),
            Record::from_pairs([("title", "T"), ("isbn", "42")]),
            Record::from_pairs([("title", "T"), ("isbn", "43")]),
        ];
        let (kept, _) = dedupe(records);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_pipe_in_title_does_not_collide() {
        let records = vec![
            Record::from_pairs([("title", "a|b"), ("ISBN", "c")]),
            Record::from_pairs([("title", "a"), ("ISBN", "b|c")]),
        ];
        let (kept, _) = dedupe(records);
        assert_eq!(kept.len(), 2);
    }
}
