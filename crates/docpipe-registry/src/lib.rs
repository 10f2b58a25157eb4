//! Resolution of fully-qualified component identifiers.
//!
//! Pipeline configurations select their pluggable components by name, for
//! example `docpipe.processors.table.TableProcessor`. This crate turns those
//! names into registered types and turns types back into names, so the
//! component selection can be stored as plain strings.
//!
//! # Key Types
//!
//! - [`TypeIdentifier`]: a parsed `<module>.<TypeName>` string
//! - [`TypeRegistry`]: the set of known component types
//! - [`TypeRef`]: a resolved type that can build new instances
//! - [`TypeKey`]: runtime key mapping a Rust type back to its identifier
//!
//! # Example
//!
//! ```rust
//! use docpipe_registry::{TypeKey, TypeRegistry};
//!
//! trait Processor {}
//! struct TableProcessor;
//! impl Processor for TableProcessor {}
//!
//! let mut registry = TypeRegistry::<dyn Processor>::new();
//! registry
//!     .register::<TableProcessor>("docpipe.processors", "TableProcessor", || Box::new(TableProcessor))
//!     .unwrap();
//!
//! let resolved = registry.resolve(&["docpipe.processors.TableProcessor"]).unwrap();
//! let _instance = resolved[0].instantiate();
//!
//! let names = registry.unresolve(&[TypeKey::of::<TableProcessor>()]).unwrap();
//! assert_eq!(names[0].to_string(), "docpipe.processors.TableProcessor");
//! ```

mod error;
mod identifier;
mod registry;

pub use error::RegistryError;
pub use identifier::TypeIdentifier;
pub use registry::{TypeKey, TypeRef, TypeRegistry};
