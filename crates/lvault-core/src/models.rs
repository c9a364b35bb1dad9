//! Data models for Links Vault
//!
//! `LinkRecord` is the persisted shape of one bookmark. Its JSON form is the
//! one the browser version of the vault keeps under its storage key, so field
//! names are camelCase and `createdAt` is an ISO-8601 string.
//!
//! `LinkInput` is the raw form payload used by create and update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A saved link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Unique identifier (milliseconds since the epoch at creation)
    pub id: i64,
    /// Display title
    pub title: String,
    /// The URL, as typed (not validated beyond being non-empty)
    pub url: String,
    /// Optional description, empty when not given
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Tags in the order they were typed
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// When this link was created; never changes after creation
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Build a record from validated fields
    pub(crate) fn new(id: i64, created_at: DateTime<Utc>, fields: ValidLink) -> Self {
        Self {
            id,
            title: fields.title,
            url: fields.url,
            description: fields.description,
            tags: fields.tags,
            created_at,
        }
    }

    /// Replace every editable field, keeping `id` and `created_at`
    pub(crate) fn apply(&mut self, fields: ValidLink) {
        self.title = fields.title;
        self.url = fields.url;
        self.description = fields.description;
        self.tags = fields.tags;
    }
}

/// Form input for creating or editing a link
///
/// All fields are raw text; `tags` is a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkInput {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: String,
}

impl LinkInput {
    /// Input with a title and url, no description or tags
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Pre-fill a form from an existing record
    pub fn from_record(record: &LinkRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            tags: record.tags.join(", "),
        }
    }

    /// Trim and check the input
    ///
    /// Title and url must be non-empty after trimming. The description is
    /// trimmed and tags are parsed with [`parse_tags`].
    pub fn validate(&self) -> Result<ValidLink, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }

        Ok(ValidLink {
            title: title.to_string(),
            url: url.to_string(),
            description: self.description.trim().to_string(),
            tags: parse_tags(&self.tags),
        })
    }
}

/// Input that passed validation, with every field normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLink {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Split comma-separated tag text into trimmed, non-empty tags
///
/// Order is preserved and duplicates are kept, exactly as typed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix,
/// matching what `Date.prototype.toISOString` produces
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> LinkRecord {
        LinkRecord {
            id: 1_714_558_830_123,
            title: "Rust".to_string(),
            url: "https://rust-lang.org".to_string(),
            description: "The Rust language".to_string(),
            tags: vec!["lang".to_string(), "systems".to_string()],
            created_at: Utc.timestamp_millis_opt(1_714_558_830_123).unwrap(),
        }
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("work, dev, , tools"), vec!["work", "dev", "tools"]);
        assert_eq!(parse_tags("  rust  "), vec!["rust"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_tags_keeps_order_and_duplicates() {
        assert_eq!(parse_tags("b,a,b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_validate_trims_fields() {
        let input = LinkInput::new("  My Site ", " example.com ")
            .with_description("  notes  ")
            .with_tags("a, b");

        let valid = input.validate().unwrap();
        assert_eq!(valid.title, "My Site");
        assert_eq!(valid.url, "example.com");
        assert_eq!(valid.description, "notes");
        assert_eq!(valid.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_validate_requires_title_and_url() {
        assert_eq!(
            LinkInput::new("   ", "example.com").validate(),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            LinkInput::new("Title", "\t\n").validate(),
            Err(ValidationError::MissingUrl)
        );
        // Title is checked first
        assert_eq!(
            LinkInput::new("", "").validate(),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_input_from_record() {
        let input = LinkInput::from_record(&sample_record());
        assert_eq!(input.title, "Rust");
        assert_eq!(input.tags, "lang, systems");
        assert_eq!(parse_tags(&input.tags), sample_record().tags);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["id"], 1_714_558_830_123i64);
        assert_eq!(json["createdAt"], "2024-05-01T10:20:30.123Z");
        assert_eq!(json["tags"][1], "systems");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_record_reads_browser_json() {
        let raw = r#"{
            "id": 1714558830123,
            "title": "Rust",
            "url": "https://rust-lang.org",
            "description": "The Rust language",
            "tags": ["lang", "systems"],
            "createdAt": "2024-05-01T10:20:30.123Z"
        }"#;

        let record: LinkRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_record_coerces_missing_optional_fields() {
        let raw = r#"{
            "id": 1,
            "title": "t",
            "url": "u",
            "description": null,
            "createdAt": "2024-05-01T10:20:30Z"
        }"#;

        let record: LinkRecord = serde_json::from_str(raw).unwrap();
        assert!(record.description.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_record_rejects_wrong_shape() {
        let missing_url = r#"{"id": 1, "title": "t", "createdAt": "2024-05-01T10:20:30Z"}"#;
        assert!(serde_json::from_str::<LinkRecord>(missing_url).is_err());

        let bad_date = r#"{"id": 1, "title": "t", "url": "u", "createdAt": "yesterday"}"#;
        assert!(serde_json::from_str::<LinkRecord>(bad_date).is_err());
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut record = sample_record();
        let valid = LinkInput::new("New", "new.example").validate().unwrap();
        record.apply(valid);

        assert_eq!(record.id, sample_record().id);
        assert_eq!(record.created_at, sample_record().created_at);
        assert_eq!(record.title, "New");
        assert!(record.tags.is_empty());
        assert!(record.description.is_empty());
    }
}
