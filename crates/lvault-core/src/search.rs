//! Link search
//!
//! A term matches a link when it is a case-insensitive substring of the
//! title, url, description, or any single tag.

use crate::models::LinkRecord;

/// Check whether `record` matches an already-lowercased term
fn matches(record: &LinkRecord, term: &str) -> bool {
    record.title.to_lowercase().contains(term)
        || record.url.to_lowercase().contains(term)
        || record.description.to_lowercase().contains(term)
        || record.tags.iter().any(|t| t.to_lowercase().contains(term))
}

/// Records matching `term`, in their original order
pub fn filter<'a>(records: &'a [LinkRecord], term: &str) -> Vec<&'a LinkRecord> {
    let term = term.to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, &term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: i64, title: &str, url: &str, description: &str, tags: &[&str]) -> LinkRecord {
        LinkRecord {
            id,
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<LinkRecord> {
        vec![
            record(3, "Rust Book", "doc.rust-lang.org/book", "", &["learning"]),
            record(2, "Hacker News", "news.ycombinator.com", "Tech NEWS daily", &[]),
            record(1, "Crates", "https://crates.io", "Rust package registry", &["Rust", "tools"]),
        ]
    }

    fn ids(found: &[&LinkRecord]) -> Vec<i64> {
        found.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let links = sample();
        assert_eq!(ids(&filter(&links, "")), vec![3, 2, 1]);
    }

    #[test]
    fn test_matches_each_field() {
        let links = sample();
        assert_eq!(ids(&filter(&links, "book")), vec![3]); // title and url
        assert_eq!(ids(&filter(&links, "ycombinator")), vec![2]); // url
        assert_eq!(ids(&filter(&links, "registry")), vec![1]); // description
        assert_eq!(ids(&filter(&links, "learn")), vec![3]); // tag substring
    }

    #[test]
    fn test_case_insensitive() {
        let links = sample();
        assert_eq!(ids(&filter(&links, "RUST")), vec![3, 1]);
        assert_eq!(ids(&filter(&links, "news")), vec![2]);
        assert_eq!(ids(&filter(&links, "TOOLS")), vec![1]);
    }

    #[test]
    fn test_no_match() {
        let links = sample();
        assert!(filter(&links, "python").is_empty());
    }

    #[test]
    fn test_term_is_not_trimmed() {
        let links = sample();
        assert_eq!(ids(&filter(&links, " news")), vec![2]);
        assert!(filter(&links, "crates ").is_empty());
    }
}
