/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Error types for component type resolution.
 */

//! Error types for component type resolution.

use thiserror::Error;

/// Errors that can occur while resolving or naming component types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The identifier does not have the `<module>.<TypeName>` shape.
    #[error("Invalid type identifier '{identifier}': expected '<module>.<TypeName>'")]
    InvalidIdentifier {
        /// The identifier as given
        identifier: String,
    },

    /// No module is registered under the requested path.
    #[error("No module named '{module}'")]
    ModuleNotFound {
        /// The dotted module path
        module: String,
    },

    /// The module exists but does not define the requested member.
    #[error("Module '{module}' has no member '{member}'")]
    MemberNotFound {
        /// The dotted module path
        module: String,
        /// The member that was looked up
        member: String,
    },

    /// An item passed to `unresolve` is not a registered type.
    #[error("Item {index} ({type_name}) is not a registered component type")]
    UnregisteredType {
        /// Position of the offending item in the input
        index: usize,
        /// Rust type name of the offending item
        type_name: String,
    },
}

impl RegistryError {
    /// Create an "invalid identifier" error.
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Create a "module not found" error.
    pub fn module_not_found(module: impl Into<String>) -> Self {
        Self::ModuleNotFound {
            module: module.into(),
        }
    }

    /// Create a "member not found" error.
    pub fn member_not_found(module: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MemberNotFound {
            module: module.into(),
            member: member.into(),
        }
    }

    /// Create an "unregistered type" error.
    pub fn unregistered_type(index: usize, type_name: impl Into<String>) -> Self {
        Self::UnregisteredType {
            index,
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_not_found_message() {
        let err = RegistryError::module_not_found("docpipe.renderers");
        insta::assert_snapshot!(err.to_string(), @"No module named 'docpipe.renderers'");
    }

    #[test]
    fn test_member_not_found_message() {
        let err = RegistryError::member_not_found("docpipe.renderers", "HtmlRenderer");
        let msg = err.to_string();
        assert!(msg.contains("docpipe.renderers"));
        assert!(msg.contains("HtmlRenderer"));
    }

    #[test]
    fn test_unregistered_type_names_item() {
        let err = RegistryError::unregistered_type(2, "alloc::string::String");
        insta::assert_snapshot!(
            err.to_string(),
            @"Item 2 (alloc::string::String) is not a registered component type"
        );
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = RegistryError::invalid_identifier("Renderer");
        assert!(matches!(err, RegistryError::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("'Renderer'"));
    }
}
