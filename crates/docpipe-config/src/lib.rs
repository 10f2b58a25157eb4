//! Binding of shared configuration onto pipeline components.
//!
//! A single configuration source is shared by every component of a
//! document pipeline. This crate pushes the relevant part of it onto each
//! component instance.
//!
//! # Key Features
//!
//! - **Two-tier precedence**: plain keys (`paginate_output`) apply to every
//!   component that has the option; scoped keys
//!   (`MarkdownRenderer_paginate_output`) apply afterwards and win
//! - **Permissive**: keys no option matches are ignored
//! - **Explicit option surface**: targets implement [`Configurable`] instead
//!   of exposing arbitrary attributes
//!
//! # Architecture
//!
//! - [`ConfigSource`]: the flat, ordered option map (from a record, a
//!   mapping, JSON or YAML)
//! - [`Configurable`]: the settable-options surface of a target
//! - [`apply`], [`apply_global`], [`apply_scoped`]: the binding passes
//! - [`impl_configurable!`]: a field-backed `Configurable` for plain structs

mod binder;
mod error;
pub mod options;
mod source;

pub use binder::{Configurable, apply, apply_global, apply_scoped};
pub use error::ConfigError;
pub use options::short_type_name;
pub use source::{ConfigMap, ConfigSource};

// Re-export for convenience
pub use serde_json::Value;
