//! Facets command: show the facet schema the server would use

use crate::commands::CliCommand;
use crate::output::{OutputFormat, OutputFormatter};
use booksearch_core::{FacetDescriptor, Result, SearchConfig};
use clap::Parser;
use std::path::PathBuf;

/// Print the parsed facet descriptor
#[derive(Parser, Debug, Clone)]
#[command(name = "facets")]
pub struct FacetsArgs {
    /// Facet list to parse instead of the configured one, e.g. "authors*,language_code"
    #[arg(long, value_name = "FACETS")]
    pub fields: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliCommand for FacetsArgs {
    async fn execute(&self) -> Result<()> {
        let facets = self.descriptor()?;

        if self.json {
            OutputFormatter::new(OutputFormat::Json).output(&facets)
        } else {
            OutputFormatter::new(OutputFormat::Pretty).pretty_facets(&facets)
        }
    }

    fn name(&self) -> &'static str {
        "facets"
    }
}

impl FacetsArgs {
    /// Parse the explicit facet list, or the configured one
    pub fn descriptor(&self) -> Result<FacetDescriptor> {
        match &self.fields {
            Some(fields) => Ok(FacetDescriptor::parse(fields)),
            None => {
                let config = SearchConfig::load(self.config.as_deref())?;
                Ok(FacetDescriptor::parse(&config.search_facets))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booksearch_core::FacetKind;
    use std::io::Write;

    #[test]
    fn test_explicit_fields() {
        let args = FacetsArgs::parse_from(["facets", "--fields", "authors*, language_code ,"]);
        let facets = args.descriptor().unwrap();

        assert_eq!(facets.field_names(), vec!["authors", "language_code"]);
        assert_eq!(facets.kind("authors"), Some(FacetKind::Array));
    }

    #[test]
    fn test_facets_from_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "search_service_name: books-demo\nsearch_api_key: secret\nsearch_facets: \"tags*,original_publication_year\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = FacetsArgs::parse_from(["facets", "--config", path.as_str()]);
        let facets = args.descriptor().unwrap();

        assert_eq!(facets.kind("tags"), Some(FacetKind::Array));
        assert_eq!(
            facets.kind("original_publication_year"),
            Some(FacetKind::Scalar)
        );
    }
}
