//! Filter expressions in the backend's OData syntax
//!
//! Client filters arrive as ordered `{field, value}` pairs. They are turned
//! into a small expression tree using the facet descriptor to choose the
//! predicate for each field, then rendered to a string. Rendering quotes every
//! literal, so values are never spliced into the expression unescaped.

use crate::facets::{FacetDescriptor, FacetKind};
use crate::{BookSearchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiters tried, in order, for `search.in` value lists
const IN_DELIMITERS: [char; 5] = [',', '|', ';', '~', '^'];

/// One client-supplied filter pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub value: String,
}

impl FilterClause {
    pub fn new<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl std::str::FromStr for FilterClause {
    type Err = BookSearchError;

    /// Parse `field=value`
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok(Self::new(field.trim(), value))
            }
            _ => Err(BookSearchError::validation(format!(
                "Invalid filter '{}', expected field=value",
                s
            ))),
        }
    }
}

/// Filter expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// `field eq 'value'`
    Eq { field: String, value: String },
    /// `field/any(t: search.in(t, 'value', 'delim'))`
    AnyIn { field: String, value: String },
    /// `field/any(t: t eq 'value')`
    AnyEq { field: String, value: String },
    /// Conjunction, rendered in order with ` and `
    And(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Render the expression to an OData filter string
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Eq { field, value } => {
                out.push_str(field);
                out.push_str(" eq ");
                out.push_str(&quote(value));
            }
            Self::AnyIn { field, value } => match pick_delimiter(value) {
                Some(delimiter) => {
                    out.push_str(&format!(
                        "{}/any(t: search.in(t, {}, {}))",
                        field,
                        quote(value),
                        quote(&delimiter.to_string())
                    ));
                }
                None => {
                    Self::AnyEq {
                        field: field.clone(),
                        value: value.clone(),
                    }
                    .write_to(out);
                }
            },
            Self::AnyEq { field, value } => {
                out.push_str(&format!("{}/any(t: t eq {})", field, quote(value)));
            }
            Self::And(exprs) => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" and ");
                    }
                    expr.write_to(out);
                }
            }
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Build the expression tree for a list of filter clauses
///
/// # Errors
///
/// Returns `BookSearchError::UnknownFacetField` if a clause names a field
/// that is not in the descriptor.
pub fn build_filter(clauses: &[FilterClause], facets: &FacetDescriptor) -> Result<FilterExpr> {
    let exprs = clauses
        .iter()
        .map(|clause| {
            let kind = facets
                .kind(&clause.field)
                .ok_or_else(|| BookSearchError::unknown_facet(&clause.field))?;

            Ok(match kind {
                FacetKind::Array => FilterExpr::AnyIn {
                    field: clause.field.clone(),
                    value: clause.value.clone(),
                },
                FacetKind::Scalar => FilterExpr::Eq {
                    field: clause.field.clone(),
                    value: clause.value.clone(),
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FilterExpr::And(exprs))
}

/// Build and render the filter string, or `None` when there are no clauses
pub fn filter_expression(
    clauses: &[FilterClause],
    facets: &FacetDescriptor,
) -> Result<Option<String>> {
    if clauses.is_empty() {
        return Ok(None);
    }

    build_filter(clauses, facets).map(|expr| Some(expr.render()))
}

/// Quote an OData string literal, doubling embedded single quotes
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// First delimiter that cannot split the value
fn pick_delimiter(value: &str) -> Option<char> {
    IN_DELIMITERS.iter().copied().find(|d| !value.contains(*d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books_facets() -> FacetDescriptor {
        FacetDescriptor::parse("authors*,language_code")
    }

    #[test]
    fn test_mixed_filters() {
        let clauses = vec![
            FilterClause::new("authors", "Tolkien"),
            FilterClause::new("language_code", "eng"),
        ];

        let rendered = filter_expression(&clauses, &books_facets()).unwrap();
        assert_eq!(
            rendered.as_deref(),
            Some("authors/any(t: search.in(t, 'Tolkien', ',')) and language_code eq 'eng'")
        );
    }

    #[test]
    fn test_input_order_preserved() {
        let clauses = vec![
            FilterClause::new("language_code", "en-US"),
            FilterClause::new("authors", "J.K. Rowling"),
            FilterClause::new("language_code", "eng"),
        ];

        let expr = build_filter(&clauses, &books_facets()).unwrap();
        let rendered = expr.render();
        let parts: Vec<&str> = rendered.split(" and ").collect();
        assert_eq!(
            parts,
            vec![
                "language_code eq 'en-US'",
                "authors/any(t: search.in(t, 'J.K. Rowling', ','))",
                "language_code eq 'eng'",
            ]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let clauses = vec![
            FilterClause::new("authors", "Tolkien"),
            FilterClause::new("publisher", "Allen & Unwin"),
        ];

        let err = build_filter(&clauses, &books_facets()).unwrap_err();
        assert!(
            matches!(err, BookSearchError::UnknownFacetField { ref field } if field == "publisher")
        );
    }

    #[test]
    fn test_empty_clauses_yield_no_filter() {
        assert_eq!(filter_expression(&[], &books_facets()).unwrap(), None);
    }

    #[test]
    fn test_quotes_are_escaped() {
        let clauses = vec![
            FilterClause::new("authors", "Flannery O'Connor"),
            FilterClause::new("language_code", "x' or true or 'y"),
        ];

        let rendered = build_filter(&clauses, &books_facets()).unwrap().render();
        assert_eq!(
            rendered,
            "authors/any(t: search.in(t, 'Flannery O''Connor', ',')) and language_code eq 'x'' or true or ''y'"
        );
    }

    #[test]
    fn test_array_value_is_never_split() {
        let clause = FilterClause::new("authors", "Tolkien, J.R.R.");
        let rendered = build_filter(&[clause], &books_facets()).unwrap().render();
        assert_eq!(
            rendered,
            "authors/any(t: search.in(t, 'Tolkien, J.R.R.', '|'))"
        );

        let clause = FilterClause::new("authors", ",|;~^");
        let rendered = build_filter(&[clause], &books_facets()).unwrap().render();
        assert_eq!(rendered, "authors/any(t: t eq ',|;~^')");
    }

    #[test]
    fn test_clause_from_str() {
        let clause: FilterClause = "language_code=eng".parse().unwrap();
        assert_eq!(clause, FilterClause::new("language_code", "eng"));

        let clause: FilterClause = "title=a=b".parse().unwrap();
        assert_eq!(clause.value, "a=b");

        assert!("no-separator".parse::<FilterClause>().is_err());
        assert!("=value".parse::<FilterClause>().is_err());
    }
}
