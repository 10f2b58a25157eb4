//! Error types for docpipe

use docpipe_config::ConfigError;
use docpipe_registry::RegistryError;
use docpipe_util::PageRangeError;
use thiserror::Error;

/// Errors from setting up a pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// An identifier did not resolve, or a type is not registered.
    #[error("Component resolution failed: {0}")]
    Registry(#[from] RegistryError),

    /// Settings text could not be read or turned into a config source.
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    /// A page range expression given to [`PipelineSettings::set_page_range`].
    ///
    /// [`PipelineSettings::set_page_range`]: crate::PipelineSettings::set_page_range
    #[error("Invalid page range: {0}")]
    PageRange(#[from] PageRangeError),

    /// Failed to configure one component; wraps the underlying config error.
    #[error("Failed to configure {component}: {source}")]
    Component {
        component: String,
        #[source]
        source: ConfigError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
