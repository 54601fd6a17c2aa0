//! Facet descriptor parsing
//!
//! The facet schema is configured as one compact string such as
//! `authors*,language_code`. Each comma-separated token names a facet
//! field; a `*` anywhere in the token marks the field as a collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker character denoting a collection-typed facet field
pub const ARRAY_MARKER: char = '*';

/// Kind of a facet field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    /// Single-valued field, filtered with equality
    Scalar,
    /// Collection field, filtered with a membership test
    Array,
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// Ordered mapping from facet field name to its kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetDescriptor {
    fields: IndexMap<String, FacetKind>,
}

impl FacetDescriptor {
    /// Parse a facet schema string
    ///
    /// Tokens are trimmed. Tokens that are empty once trimmed and stripped of
    /// markers are skipped, so `""` and `"*"` both yield an empty descriptor.
    /// A repeated field keeps its first position and takes the last kind.
    pub fn parse(raw: &str) -> Self {
        let mut fields = IndexMap::new();

        for token in raw.split(',') {
            let token = token.trim();
            let kind = if token.contains(ARRAY_MARKER) {
                FacetKind::Array
            } else {
                FacetKind::Scalar
            };

            let name: String = token.chars().filter(|c| *c != ARRAY_MARKER).collect();
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            fields.insert(name.to_string(), kind);
        }

        Self { fields }
    }

    /// Kind of the given field, if declared
    pub fn kind(&self, field: &str) -> Option<FacetKind> {
        self.fields.get(field).copied()
    }

    /// Declared field names in configuration order
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    /// Iterate over declared fields in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, FacetKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::str::FromStr for FacetDescriptor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_kinds() {
        let facets = FacetDescriptor::parse("a*,b,c*");
        assert_eq!(facets.len(), 3);
        assert_eq!(facets.kind("a"), Some(FacetKind::Array));
        assert_eq!(facets.kind("b"), Some(FacetKind::Scalar));
        assert_eq!(facets.kind("c"), Some(FacetKind::Array));
        assert_eq!(facets.kind("d"), None);
    }

    #[test]
    fn test_field_order_preserved() {
        let facets = FacetDescriptor::parse("language_code,authors*,original_publication_year");
        assert_eq!(
            facets.field_names(),
            vec!["language_code", "authors", "original_publication_year"]
        );
    }

    #[test]
    fn test_marker_anywhere_in_token() {
        let facets = FacetDescriptor::parse("*tags,gen*res");
        assert_eq!(facets.kind("tags"), Some(FacetKind::Array));
        assert_eq!(facets.kind("genres"), Some(FacetKind::Array));
    }

    #[test]
    fn test_malformed_input() {
        assert!(FacetDescriptor::parse("").is_empty());
        assert!(FacetDescriptor::parse("*").is_empty());
        assert!(FacetDescriptor::parse(" , ,, ").is_empty());

        let facets = FacetDescriptor::parse(" authors* , ,language_code ,*");
        assert_eq!(facets.field_names(), vec!["authors", "language_code"]);
    }

    #[test]
    fn test_duplicate_field_last_kind_wins() {
        let facets = FacetDescriptor::parse("authors,language_code,authors*");
        assert_eq!(facets.field_names(), vec!["authors", "language_code"]);
        assert_eq!(facets.kind("authors"), Some(FacetKind::Array));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "authors*,language_code";
        assert_eq!(FacetDescriptor::parse(raw), FacetDescriptor::parse(raw));
        assert_eq!(raw.parse::<FacetDescriptor>().unwrap().len(), 2);
    }

    #[test]
    fn test_serializes_as_map() {
        let facets = FacetDescriptor::parse("authors*,language_code");
        let json = serde_json::to_string(&facets).unwrap();
        assert_eq!(json, r#"{"authors":"array","language_code":"scalar"}"#);
    }
}
