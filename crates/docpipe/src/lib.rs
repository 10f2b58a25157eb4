//! Component plumbing for document pipelines.
//!
//! A document pipeline is assembled from pluggable components (builders,
//! processors, renderers) selected and tuned by a settings document. This
//! crate ties together the three pieces involved:
//!
//! - [`docpipe_registry`]: identifiers such as
//!   `docpipe.processors.table.TableProcessor` to registered types and back
//! - [`docpipe_config`]: shared settings bound onto each component, with
//!   `<TypeName>_<option>` keys taking precedence over plain `<option>` keys
//! - [`docpipe_util`]: page range expressions such as `"0-4,9"`
//!
//! # Example
//!
//! ```rust
//! use docpipe::{PipelineSettings, TypeRegistry, build_components, impl_configurable};
//!
//! #[derive(Default)]
//! struct TableProcessor {
//!     max_rows_per_batch: usize,
//! }
//! impl_configurable!(TableProcessor { max_rows_per_batch });
//!
//! let mut registry = TypeRegistry::<dyn docpipe::Configurable>::new();
//! registry
//!     .register::<TableProcessor>("docpipe.processors.table", "TableProcessor", || {
//!         Box::new(TableProcessor::default())
//!     })
//!     .unwrap();
//!
//! let settings = PipelineSettings::from_yaml_str(
//!     "processors: [docpipe.processors.table.TableProcessor]\n\
//!      page_range: \"0-2\"\n\
//!      TableProcessor_max_rows_per_batch: 30\n",
//! )
//! .unwrap();
//!
//! let components = build_components(&registry, &settings).unwrap();
//! assert_eq!(components.len(), 1);
//! assert_eq!(settings.pages(10).into_vec(), vec![0, 1, 2]);
//! ```

pub mod error;
pub mod settings;
pub mod setup;

pub use error::{PipelineError, Result};
pub use settings::PipelineSettings;
pub use setup::build_components;

// Re-export commonly used types
pub use docpipe_config::{
    ConfigError, ConfigSource, Configurable, apply, apply_global, apply_scoped, impl_configurable,
};
pub use docpipe_registry::{RegistryError, TypeIdentifier, TypeKey, TypeRef, TypeRegistry};
pub use docpipe_util::{PageRange, PageRangeError, parse_page_range};

// Re-export crates for fully-qualified access
pub use docpipe_config;
pub use docpipe_registry;
pub use docpipe_util;
