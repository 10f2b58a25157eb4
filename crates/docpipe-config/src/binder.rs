//! Binding of a shared configuration source onto a single target.
//!
//! One [`ConfigSource`] is shared by every component in a pipeline, so most
//! of its keys are irrelevant to any given target. Binding runs two passes
//! over the source, in source order:
//!
//! 1. **Global**: a key that names one of the target's options sets it.
//! 2. **Scoped**: a key containing the target's type name has a leading
//!    `<TypeName>_` removed; if the remainder names an option, it is set.
//!
//! The scoped pass runs second, so `MarkdownRenderer_paginate_output` beats
//! `paginate_output` for a `MarkdownRenderer`. Keys matching nothing are
//! ignored.
//!
//! # Substring matching
//!
//! The scoped pass selects keys by *containment* of the type name, not by
//! prefix. A key that mentions the type name anywhere is considered, and is
//! used unstripped when it does not start with `<TypeName>_`.

use serde_json::Value;

use crate::error::ConfigError;
use crate::source::ConfigSource;

/// A target whose named options can be overridden from a [`ConfigSource`].
pub trait Configurable {
    /// Type name matched against scoped keys, e.g. `"MarkdownRenderer"`.
    fn config_type_name(&self) -> &str;

    /// Check if the target has a settable option with this name.
    fn has_option(&self, name: &str) -> bool;

    /// Overwrite an option.
    ///
    /// Only called for names where [`has_option`](Self::has_option) returned
    /// true. Fails if the value cannot be stored in the option.
    fn set_option(&mut self, name: &str, value: &Value) -> Result<(), ConfigError>;
}

/// Apply `source` to `target`: the global pass, then the scoped pass.
///
/// An absent source leaves the target untouched. On error the target keeps
/// every option set before the failing one.
pub fn apply<T>(target: &mut T, source: Option<&ConfigSource>) -> Result<(), ConfigError>
where
    T: Configurable + ?Sized,
{
    let Some(source) = source else {
        return Ok(());
    };
    apply_global(target, source)?;
    apply_scoped(target, source)
}

/// Set every option whose name appears verbatim as a key.
pub fn apply_global<T>(target: &mut T, source: &ConfigSource) -> Result<(), ConfigError>
where
    T: Configurable + ?Sized,
{
    for (key, value) in source.entries() {
        if target.has_option(key) {
            set(target, key, key, value)?;
        } else {
            tracing::trace!(key, target = target.config_type_name(), "Ignoring config key");
        }
    }
    Ok(())
}

/// Set options from keys scoped to the target's type name.
pub fn apply_scoped<T>(target: &mut T, source: &ConfigSource) -> Result<(), ConfigError>
where
    T: Configurable + ?Sized,
{
    let type_name = target.config_type_name().to_string();
    let prefix = format!("{type_name}_");

    for (key, value) in source.entries() {
        if !key.contains(type_name.as_str()) {
            continue;
        }
        let option = match key.strip_prefix(prefix.as_str()) {
            Some(stripped) => stripped,
            None => {
                tracing::debug!(
                    key,
                    target = %type_name,
                    "Scoped key mentions type name without prefix"
                );
                key
            }
        };
        if target.has_option(option) {
            set(target, key, option, value)?;
        }
    }
    Ok(())
}

fn set<T>(target: &mut T, key: &str, option: &str, value: &Value) -> Result<(), ConfigError>
where
    T: Configurable + ?Sized,
{
    target.set_option(option, value)?;
    tracing::debug!(key, option, target = target.config_type_name(), "Applied config option");
    Ok(())
}
