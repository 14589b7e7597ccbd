use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use url::Url;
use uuid::Uuid;

lazy_static::lazy_static! {
    /// A 32-hex run, bare or dashed 8-4-4-4-12, anchored at the end of a path segment.
    static ref TRAILING_ID: Regex = Regex::new(
        r"([0-9a-fA-F]{32}|[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})$"
    ).expect("trailing ID pattern is a valid regex");
}

/// A canonical reference to a Notion page or database.
///
/// Always stored as a lower-case, dashed, 36-character UUID. The only way to
/// obtain one from user input is [`NotionId::parse`]; IDs read from API
/// responses go through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotionId(String);

impl NotionId {
    /// Normalizes a user-supplied identifier into a canonical reference.
    ///
    /// Accepted shapes, tried in order:
    /// 1. a bare 32-character hex string,
    /// 2. an already-dashed UUID (any case),
    /// 3. an `http(s)` URL whose host contains `notion`; the last path
    ///    segment must end in a 32-hex run, dashed or not.
    ///
    /// No network access happens here.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let candidate = input.trim();

        if let Some(id) = Self::from_bare_hex(candidate) {
            return Ok(id);
        }

        if let Some(id) = Self::from_dashed(candidate) {
            return Ok(id);
        }

        match Url::parse(candidate) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::from_url(&url, input),
            _ => Err(invalid_reference(
                input,
                "expected a 32-character hex ID, a dashed UUID, or a Notion URL",
            )),
        }
    }

    /// Returns the dashed UUID form used in API paths and logs.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_bare_hex(candidate: &str) -> Option<Self> {
        if candidate.len() != 32 || !candidate.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Uuid::parse_str(candidate)
            .ok()
            .map(|uuid| NotionId(uuid.hyphenated().to_string()))
    }

    fn from_dashed(candidate: &str) -> Option<Self> {
        // parse_str also accepts braced and URN forms, which are longer
        if candidate.len() != 36 {
            return None;
        }
        Uuid::parse_str(candidate)
            .ok()
            .map(|uuid| NotionId(uuid.hyphenated().to_string()))
    }

    fn from_url(url: &Url, input: &str) -> Result<Self, ValidationError> {
        let host = url.host_str().unwrap_or_default();
        if !host.contains("notion") {
            return Err(invalid_reference(
                input,
                &format!("host '{}' is not a Notion domain", host),
            ));
        }

        // Url::path() already excludes the query string and fragment
        let last_segment = url
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .next_back()
            .unwrap_or_default();

        TRAILING_ID
            .captures(last_segment)
            .and_then(|captures| captures.get(1))
            .and_then(|run| Self::from_bare_hex(&run.as_str().replace('-', "")))
            .ok_or_else(|| invalid_reference(input, "no page or database ID found in URL path"))
    }
}

fn invalid_reference(input: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidReference {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NotionId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    reference: NotionId,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataSourceMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type DatabaseId = Id<DatabaseMarker>;
pub type DataSourceId = Id<DataSourceMarker>;

impl<T> Id<T> {
    /// Parses user input into a typed ID. See [`NotionId::parse`].
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        NotionId::parse(input).map(Self::from)
    }

    /// The untyped reference, as used by the traversal's visited set.
    pub fn reference(&self) -> &NotionId {
        &self.reference
    }

    pub fn as_str(&self) -> &str {
        self.reference.as_str()
    }
}

impl<T> From<NotionId> for Id<T> {
    fn from(reference: NotionId) -> Self {
        Self {
            reference,
            _phantom: PhantomData,
        }
    }
}

impl<T> From<&Id<T>> for NotionId {
    fn from(id: &Id<T>) -> Self {
        id.reference.clone()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference, f)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        NotionId::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHED: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_bare_hex_is_dashed() {
        let id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_dashed_uuid_is_lowercased() {
        let id = NotionId::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_bare_and_dashed_forms_agree() {
        for hex in [
            "0123456789abcdef0123456789abcdef",
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
            "a1b2c3d4e5f60718293a4b5c6d7e8f90",
        ] {
            let dashed = format!(
                "{}-{}-{}-{}-{}",
                &hex[0..8],
                &hex[8..12],
                &hex[12..16],
                &hex[16..20],
                &hex[20..32]
            );
            assert_eq!(
                NotionId::parse(hex).unwrap(),
                NotionId::parse(&dashed).unwrap()
            );
        }
    }

    #[test]
    fn test_url_with_title_slug() {
        let id =
            NotionId::parse("https://www.notion.so/acme/Test-Page-550e8400e29b41d4a716446655440000")
                .unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_url_query_and_fragment_are_ignored() {
        let id = NotionId::parse(
            "https://www.notion.so/Roadmap-550e8400e29b41d4a716446655440000?v=0123456789abcdef0123456789abcdef#block",
        )
        .unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_url_with_dashed_id_and_trailing_slash() {
        let id = NotionId::parse("https://acme.notion.site/550e8400-e29b-41d4-a716-446655440000/")
            .unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_url_takes_trailing_run_of_long_hex() {
        let id = NotionId::parse("https://www.notion.so/f550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.as_str(), DASHED);
    }

    #[test]
    fn test_non_notion_host_is_rejected() {
        let err =
            NotionId::parse("https://example.com/Page-550e8400e29b41d4a716446655440000").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidReference { .. }));
    }

    #[test]
    fn test_invalid_shapes() {
        for input in [
            "",
            "too-short",
            "550e8400e29b41d4a71644665544000g",
            "{550e8400-e29b-41d4-a716-446655440000}",
            "ftp://www.notion.so/550e8400e29b41d4a716446655440000",
            "https://www.notion.so/Page-without-id",
        ] {
            assert!(NotionId::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_typed_ids_share_reference() {
        let page = PageId::parse(DASHED).unwrap();
        let reference: NotionId = (&page).into();
        assert_eq!(page.reference(), &reference);
        assert_eq!(page.to_string(), DASHED);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let id: BlockId = serde_json::from_str("\"550E8400E29B41D4A716446655440000\"").unwrap();
        assert_eq!(id.as_str(), DASHED);
    }
}
