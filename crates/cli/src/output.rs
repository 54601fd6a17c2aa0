//! CLI output formatting module

use booksearch_core::{BookSearchError, FacetDescriptor, Result, SearchResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = BookSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" => Ok(Self::Pretty),
            _ => Err(BookSearchError::validation(format!(
                "Invalid output format: {}. Valid formats: json, yaml, pretty",
                s
            ))),
        }
    }
}

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

impl OutputFormatter {
    /// Create a formatter writing to stdout
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, io::stdout())
    }

    /// Create a formatter with custom writer
    pub fn with_writer<W: Write + Send + 'static>(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer: Box::new(writer),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a value as JSON or YAML
    ///
    /// Pretty output falls back to indented JSON; commands with a
    /// human-readable rendering call their own `pretty_*` method instead.
    pub fn output<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json | OutputFormat::Pretty => {
                let json = serde_json::to_string_pretty(value)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(value).map_err(|e| {
                    BookSearchError::validation(format!("Failed to render YAML: {}", e))
                })?;
                write!(self.writer, "{}", yaml)?;
            }
        }
        Ok(())
    }

    /// Human-readable search results
    pub fn pretty_search(&mut self, query: &str, response: &SearchResponse) -> Result<()> {
        if response.results.is_empty() {
            writeln!(self.writer, "No results found for query: '{}'", query)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "Found {} book(s) for '{}', showing {}",
            response.count,
            query,
            response.results.len()
        )?;
        writeln!(self.writer, "{}", "=".repeat(72))?;

        for (i, result) in response.results.iter().enumerate() {
            let doc = &result.document;
            writeln!(
                self.writer,
                "{}. {} (score {:.3})",
                i + 1,
                doc.title.as_deref().unwrap_or("<untitled>"),
                result.score
            )?;
            if let Some(authors) = &doc.authors {
                writeln!(self.writer, "   by {}", authors.join(", "))?;
            }
            if let Some(year) = doc.original_publication_year {
                writeln!(self.writer, "   published {}", year)?;
            }
            if let Some(rating) = doc.average_rating {
                writeln!(self.writer, "   rating {:.2}", rating)?;
            }
        }

        for (facet, buckets) in &response.facets {
            writeln!(self.writer, "\n{}:", facet)?;
            for bucket in buckets.as_array().into_iter().flatten() {
                writeln!(
                    self.writer,
                    "  {} ({})",
                    display_value(&bucket["value"]),
                    bucket["count"]
                )?;
            }
        }

        Ok(())
    }

    /// Human-readable suggestion list
    pub fn pretty_suggestions(&mut self, suggestions: &[Value]) -> Result<()> {
        if suggestions.is_empty() {
            writeln!(self.writer, "No suggestions")?;
        }
        for suggestion in suggestions {
            writeln!(self.writer, "{}", display_value(&suggestion["@search.text"]))?;
        }
        Ok(())
    }

    /// Human-readable facet schema
    pub fn pretty_facets(&mut self, facets: &FacetDescriptor) -> Result<()> {
        if facets.is_empty() {
            writeln!(self.writer, "No facets configured")?;
        }
        for (field, kind) in facets.iter() {
            writeln!(self.writer, "{:<24} {}", field, kind)?;
        }
        Ok(())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps what was written for inspection
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_yaml_output() {
        let captured = Captured::default();
        let mut formatter = OutputFormatter::with_writer(OutputFormat::Yaml, captured.clone());

        formatter
            .output(&FacetDescriptor::parse("authors*,language_code"))
            .unwrap();

        assert_eq!(captured.text(), "authors: array\nlanguage_code: scalar\n");
    }

    #[test]
    fn test_pretty_facets() {
        let captured = Captured::default();
        let mut formatter = OutputFormatter::with_writer(OutputFormat::Pretty, captured.clone());

        formatter
            .pretty_facets(&FacetDescriptor::parse("authors*,language_code"))
            .unwrap();

        let text = captured.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("authors"));
        assert!(lines[0].ends_with("array"));
        assert!(lines[1].ends_with("scalar"));
    }

    #[test]
    fn test_pretty_suggestions() {
        let captured = Captured::default();
        let mut formatter = OutputFormatter::with_writer(OutputFormat::Pretty, captured.clone());

        formatter
            .pretty_suggestions(&[
                serde_json::json!({"@search.text": "The Hobbit", "id": "7"}),
                serde_json::json!({"id": "8"}),
            ])
            .unwrap();

        assert_eq!(captured.text(), "The Hobbit\n-\n");
    }
}
