/*
 * settings.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pipeline settings record.
 */

//! Pipeline settings record.
//!
//! Settings are a flat document such as:
//!
//! ```yaml
//! processors:
//!   - docpipe.processors.table.TableProcessor
//!   - docpipe.processors.equation.EquationProcessor
//! page_range: "0-4,9"
//! paginate_output: true
//! TableProcessor_max_rows_per_batch: 30
//! ```
//!
//! `processors` selects components by identifier and `page_range` selects
//! pages. Every other key is kept in [`PipelineSettings::options`] and is
//! offered to each component when it is configured.

use docpipe_config::{ConfigError, ConfigMap, ConfigSource};
use docpipe_registry::{TypeIdentifier, TypeKey, TypeRegistry};
use docpipe_util::PageRange;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Components to build, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<TypeIdentifier>,

    /// Pages to process; all pages when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_range: Option<PageRange>,

    /// Remaining keys, offered to every component.
    #[serde(flatten)]
    pub options: ConfigMap,
}

impl PipelineSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            ConfigError::Parse {
                format: "json",
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Parse settings from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| {
            ConfigError::Parse {
                format: "yaml",
                message: e.to_string(),
            }
            .into()
        })
    }

    /// The source offered to components.
    ///
    /// This is the whole settings record flattened, so a component that has
    /// a `page_range` option sees it as well.
    pub fn config_source(&self) -> Result<ConfigSource> {
        Ok(ConfigSource::from_record(self)?)
    }

    /// Replace `page_range` with the pages selected by `expression`.
    ///
    /// An empty or blank expression clears the selection.
    pub fn set_page_range(&mut self, expression: &str) -> Result<()> {
        self.page_range = if expression.trim().is_empty() {
            None
        } else {
            Some(expression.parse::<PageRange>()?)
        };
        Ok(())
    }

    /// Pages to process in a document with `page_count` pages.
    ///
    /// Pages are zero-based; selected pages past the end are dropped.
    pub fn pages(&self, page_count: u32) -> PageRange {
        match &self.page_range {
            Some(range) => range.clone().clamp_to(page_count),
            None => PageRange::all(page_count),
        }
    }

    /// Replace `processors` with the identifiers of the given types.
    ///
    /// Nothing is changed if any type is not registered.
    pub fn set_processors<C: ?Sized>(
        &mut self,
        registry: &TypeRegistry<C>,
        types: &[TypeKey],
    ) -> Result<()> {
        self.processors = registry.unresolve(types)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YAML: &str = r#"
processors:
  - docpipe.processors.table.TableProcessor
page_range: "0-2,7"
paginate_output: true
TableProcessor_max_rows_per_batch: 30
"#;

    #[test]
    fn test_from_yaml() {
        let settings = PipelineSettings::from_yaml_str(YAML).unwrap();
        assert_eq!(settings.processors.len(), 1);
        assert_eq!(settings.processors[0].name(), "TableProcessor");
        assert_eq!(
            settings.page_range.as_ref().map(|r| r.as_slice().to_vec()),
            Some(vec![0, 1, 2, 7])
        );
        assert_eq!(settings.options.get("paginate_output"), Some(&json!(true)));
        assert_eq!(
            settings.options.get("TableProcessor_max_rows_per_batch"),
            Some(&json!(30))
        );
        assert!(!settings.options.contains_key("processors"));
    }

    #[test]
    fn test_from_json_bare_page_number() {
        let settings = PipelineSettings::from_json_str(r#"{"page_range": 3}"#).unwrap();
        assert_eq!(settings.pages(10).into_vec(), vec![3]);
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let result = PipelineSettings::from_json_str(r#"{"processors": ["NoModule"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_page_range_rejected() {
        let result = PipelineSettings::from_yaml_str("page_range: a-3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_page_range() {
        let mut settings = PipelineSettings::default();
        settings.set_page_range("4-6, 1").unwrap();
        assert_eq!(settings.pages(10).into_vec(), vec![1, 4, 5, 6]);

        settings.set_page_range("  ").unwrap();
        assert_eq!(settings.page_range, None);
    }

    #[test]
    fn test_set_page_range_error_keeps_selection() {
        let mut settings = PipelineSettings::from_yaml_str(YAML).unwrap();
        let before = settings.page_range.clone();

        let err = settings.set_page_range("2,x").unwrap_err();
        assert!(matches!(err, crate::PipelineError::PageRange(_)));
        insta::assert_snapshot!(err.to_string(), @"Invalid page range: Invalid page number 'x'");
        assert_eq!(settings.page_range, before);
    }

    #[test]
    fn test_pages_defaults_to_all() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.pages(3).into_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_pages_clamped() {
        let settings = PipelineSettings::from_yaml_str(YAML).unwrap();
        assert_eq!(settings.pages(5).into_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_config_source_contains_everything() {
        let settings = PipelineSettings::from_yaml_str(YAML).unwrap();
        let source = settings.config_source().unwrap();
        assert!(source.is_record());
        assert_eq!(source.get("page_range"), Some(&json!("0-2,7")));
        assert_eq!(source.get("paginate_output"), Some(&json!(true)));
        assert_eq!(
            source.get("processors"),
            Some(&json!(["docpipe.processors.table.TableProcessor"]))
        );
    }

    #[test]
    fn test_serialize_roundtrip() {
        let settings = PipelineSettings::from_yaml_str(YAML).unwrap();
        let text = serde_json::to_string(&settings).unwrap();
        let back = PipelineSettings::from_json_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
