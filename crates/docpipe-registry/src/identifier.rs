/*
 * identifier.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Fully-qualified component identifiers.
 */

//! Fully-qualified component identifiers.
//!
//! An identifier has the form `<dotted.module.path>.<TypeName>`. The split
//! happens at the rightmost `.`, so everything before it is the module path
//! and the final segment is the member looked up inside that module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A `<module>.<TypeName>` identifier naming a registered component type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeIdentifier {
    module: String,
    name: String,
}

impl TypeIdentifier {
    /// Build an identifier from an already-split module path and type name.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Result<Self, RegistryError> {
        let module = module.into();
        let name = name.into();
        if module.is_empty() || name.is_empty() || name.contains('.') {
            return Err(RegistryError::invalid_identifier(format!("{module}.{name}")));
        }
        Ok(Self { module, name })
    }

    /// Parse `<module>.<TypeName>`, splitting on the rightmost `.`.
    pub fn parse(identifier: &str) -> Result<Self, RegistryError> {
        match identifier.rsplit_once('.') {
            Some((module, name)) if !module.is_empty() && !name.is_empty() => Ok(Self {
                module: module.to_string(),
                name: name.to_string(),
            }),
            _ => Err(RegistryError::invalid_identifier(identifier)),
        }
    }

    /// The dotted module path.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The simple type name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

impl FromStr for TypeIdentifier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeIdentifier {
    type Error = RegistryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TypeIdentifier> for String {
    fn from(identifier: TypeIdentifier) -> Self {
        identifier.to_string()
    }
}
