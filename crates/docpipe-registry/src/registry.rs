/*
 * registry.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Registry of pluggable component types.
 */

//! Registry of pluggable component types.
//!
//! Pipeline configurations name their components with fully-qualified
//! identifiers such as `docpipe.renderers.markdown.MarkdownRenderer`. The
//! registry maps those identifiers to [`TypeRef`]s, which know how to build
//! a fresh instance, and maps Rust types back to the identifier they were
//! registered under.
//!
//! # Modules
//!
//! A module exists when at least one type was registered under it, or when
//! it is a dotted prefix of such a module (`docpipe.renderers` exists once
//! `docpipe.renderers.markdown` does). Looking up a member of a module that
//! exists but does not define it is a [`RegistryError::MemberNotFound`];
//! any other miss is a [`RegistryError::ModuleNotFound`].

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::identifier::TypeIdentifier;

/// Runtime key for a Rust type, used to map a type back to its identifier.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    rust_name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            rust_name: type_name::<T>(),
        }
    }

    /// Key for the static type of `value`.
    ///
    /// For a `&dyn Trait` this is the key of `dyn Trait` itself, not of the
    /// concrete type behind it, so it never matches a registered component.
    /// Keep the concrete type around (or use [`TypeKey::of`]) to unresolve
    /// instances built from a registry.
    pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// The Rust type name, for diagnostics only.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.rust_name).finish()
    }
}

/// A resolved component type.
///
/// `C` is the interface components are instantiated as, typically a trait
/// object such as `dyn Processor`.
pub struct TypeRef<C: ?Sized> {
    identifier: TypeIdentifier,
    key: TypeKey,
    constructor: fn() -> Box<C>,
}

impl<C: ?Sized> TypeRef<C> {
    /// The identifier this type is registered under.
    pub fn identifier(&self) -> &TypeIdentifier {
        &self.identifier
    }

    /// The defining module path.
    pub fn module(&self) -> &str {
        self.identifier.module()
    }

    /// The simple type name.
    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    /// The runtime key of the registered Rust type.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Build a new instance with the registered constructor.
    pub fn instantiate(&self) -> Box<C> {
        (self.constructor)()
    }
}

impl<C: ?Sized> Clone for TypeRef<C> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            key: self.key,
            constructor: self.constructor,
        }
    }
}

impl<C: ?Sized> fmt::Debug for TypeRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("identifier", &self.identifier.to_string())
            .field("key", &self.key)
            .finish()
    }
}

/// Registry of component types addressable by [`TypeIdentifier`].
///
/// Built once during setup and then shared read-only; resolution never
/// mutates the registry, so repeated lookups are idempotent.
pub struct TypeRegistry<C: ?Sized> {
    modules: IndexMap<String, IndexMap<String, TypeRef<C>>>,
    identifiers: HashMap<TypeKey, TypeIdentifier>,
}

impl<C: ?Sized> TypeRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
            identifiers: HashMap::new(),
        }
    }

    /// Register `T` as `<module>.<name>`.
    ///
    /// If a type with the same identifier already exists, it is replaced.
    /// If `T` was registered before under another identifier, both
    /// identifiers keep resolving but `unresolve` reports the newest one.
    pub fn register<T: ?Sized + 'static>(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        constructor: fn() -> Box<C>,
    ) -> Result<(), RegistryError> {
        let identifier = TypeIdentifier::new(module, name)?;
        let key = TypeKey::of::<T>();

        let members = self
            .modules
            .entry(identifier.module().to_string())
            .or_default();
        let replaced = members.insert(
            identifier.name().to_string(),
            TypeRef {
                identifier: identifier.clone(),
                key,
                constructor,
            },
        );

        if let Some(old) = replaced {
            if old.key != key && self.identifiers.get(&old.key) == Some(&identifier) {
                self.identifiers.remove(&old.key);
            }
        }

        tracing::debug!(
            identifier = %identifier,
            rust_type = key.rust_name(),
            "Registered component type"
        );
        self.identifiers.insert(key, identifier);
        Ok(())
    }

    /// Resolve every identifier, preserving order, count and duplicates.
    ///
    /// Fails on the first identifier that cannot be resolved.
    pub fn resolve<S: AsRef<str>>(
        &self,
        identifiers: &[S],
    ) -> Result<Vec<&TypeRef<C>>, RegistryError> {
        identifiers
            .iter()
            .map(|identifier| self.resolve_one(identifier.as_ref()))
            .collect()
    }

    /// Resolve a single `<module>.<TypeName>` identifier.
    pub fn resolve_one(&self, identifier: &str) -> Result<&TypeRef<C>, RegistryError> {
        let identifier = TypeIdentifier::parse(identifier)?;
        let type_ref = self.lookup(&identifier)?;
        tracing::debug!(identifier = %identifier, "Resolved component type");
        Ok(type_ref)
    }

    /// Resolve identifiers that were already parsed, e.g. from settings.
    pub fn resolve_identifiers(
        &self,
        identifiers: &[TypeIdentifier],
    ) -> Result<Vec<&TypeRef<C>>, RegistryError> {
        identifiers
            .iter()
            .map(|identifier| {
                let type_ref = self.lookup(identifier)?;
                tracing::debug!(identifier = %identifier, "Resolved component type");
                Ok(type_ref)
            })
            .collect()
    }

    /// Map each type key back to its identifier.
    ///
    /// Every key is validated before any identifier is produced; the first
    /// unregistered key is reported with its position.
    pub fn unresolve(&self, keys: &[TypeKey]) -> Result<Vec<TypeIdentifier>, RegistryError> {
        if let Some((index, key)) = keys
            .iter()
            .enumerate()
            .find(|(_, key)| !self.identifiers.contains_key(*key))
        {
            return Err(RegistryError::unregistered_type(index, key.rust_name()));
        }

        Ok(keys
            .iter()
            .filter_map(|key| self.identifiers.get(key).cloned())
            .collect())
    }

    /// The identifier `T` is registered under, if any.
    pub fn identifier_of<T: ?Sized + 'static>(&self) -> Option<&TypeIdentifier> {
        self.identifiers.get(&TypeKey::of::<T>())
    }

    /// Look up an already-parsed identifier.
    pub fn get(&self, identifier: &TypeIdentifier) -> Option<&TypeRef<C>> {
        self.modules
            .get(identifier.module())
            .and_then(|members| members.get(identifier.name()))
    }

    /// Check if a module path exists, either directly or as a package prefix.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
            || self.modules.keys().any(|registered| {
                registered
                    .strip_prefix(module)
                    .is_some_and(|rest| rest.starts_with('.'))
            })
    }

    /// Names of all modules with registered members, in registration order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(|s| s.as_str()).collect()
    }

    /// Names of the members registered directly under `module`.
    pub fn member_names(&self, module: &str) -> Vec<&str> {
        self.modules
            .get(module)
            .map(|members| members.keys().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.modules.values().map(IndexMap::len).sum()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, identifier: &TypeIdentifier) -> Result<&TypeRef<C>, RegistryError> {
        if let Some(type_ref) = self.get(identifier) {
            return Ok(type_ref);
        }
        if self.has_module(identifier.module()) {
            Err(RegistryError::member_not_found(
                identifier.module(),
                identifier.name(),
            ))
        } else {
            Err(RegistryError::module_not_found(identifier.module()))
        }
    }
}

impl<C: ?Sized> Default for TypeRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for TypeRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field(
                "types",
                &self
                    .modules
                    .values()
                    .flat_map(|members| members.values())
                    .map(|type_ref| type_ref.identifier.to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
