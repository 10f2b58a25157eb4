//! Field-backed option surfaces.
//!
//! Most components keep their options as plain struct fields. Rather than
//! hand-writing [`Configurable`](crate::Configurable) for each of them,
//! [`impl_configurable!`](crate::impl_configurable) exposes a listed set of
//! fields as options.
//!
//! Setting an option deserializes the value into that one field's type and
//! assigns it. Nothing else on the target is read or written, so runtime
//! state, unlisted fields and values serde cannot represent (such as
//! non-finite floats) are left alone. A value of the wrong shape is rejected
//! by the field type's `Deserialize` impl and the field keeps its value.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ConfigError;

/// The unqualified name of `T`, without module path or generic arguments.
///
/// `docpipe::renderers::MarkdownRenderer<Html>` becomes `MarkdownRenderer`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Replace `field` with `value` deserialized as `F`.
///
/// On error `field` is untouched; the error names `option`.
pub fn set_field<F>(field: &mut F, option: &str, value: &Value) -> Result<(), ConfigError>
where
    F: DeserializeOwned,
{
    *field = serde_json::from_value(value.clone())
        .map_err(|e| ConfigError::invalid_value(option, e.to_string()))?;
    Ok(())
}

/// Implement [`Configurable`](crate::Configurable) for a struct by listing
/// the fields that are options.
///
/// Each listed field must implement `serde::de::DeserializeOwned`. The
/// option name is the field name unless given with `as "name"`. The type
/// name used for scoped keys defaults to the struct's unqualified name and
/// can be set with `as "name"` after the type.
///
/// ```text
/// impl_configurable!(TableProcessor { max_rows_per_batch, reformat_lines as "format_lines" });
/// impl_configurable!(LineBuilder as "lines" { min_line_height });
/// ```
///
/// # Example
///
/// ```
/// use docpipe_config::{ConfigSource, apply, impl_configurable};
/// use serde_json::json;
///
/// struct MarkdownRenderer {
///     paginate_output: bool,
/// }
/// impl_configurable!(MarkdownRenderer { paginate_output });
///
/// let source = ConfigSource::from_mapping([
///     ("paginate_output", json!(false)),
///     ("MarkdownRenderer_paginate_output", json!(true)),
/// ]);
/// let mut renderer = MarkdownRenderer { paginate_output: false };
/// apply(&mut renderer, Some(&source)).unwrap();
/// assert!(renderer.paginate_output);
/// ```
#[macro_export]
macro_rules! impl_configurable {
    (@option $field:ident) => {
        stringify!($field)
    };
    (@option $field:ident $option:literal) => {
        $option
    };
    (@impl $ty:ty, $name:expr, { $($field:ident $(as $option:literal)?),* }) => {
        impl $crate::Configurable for $ty {
            fn config_type_name(&self) -> &str {
                $name
            }

            fn has_option(&self, name: &str) -> bool {
                const OPTIONS: &[&str] = &[
                    $($crate::impl_configurable!(@option $field $($option)?)),*
                ];
                OPTIONS.iter().any(|option| *option == name)
            }

            fn set_option(
                &mut self,
                name: &str,
                value: &$crate::Value,
            ) -> ::std::result::Result<(), $crate::ConfigError> {
                let _ = value;
                $(
                    if name == $crate::impl_configurable!(@option $field $($option)?) {
                        return $crate::options::set_field(&mut self.$field, name, value);
                    }
                )*
                Err($crate::ConfigError::unknown_option(
                    name,
                    $crate::Configurable::config_type_name(self),
                ))
            }
        }
    };
    ($ty:ty as $name:literal { $($field:ident $(as $option:literal)?),* $(,)? }) => {
        $crate::impl_configurable!(@impl $ty, $name, { $($field $(as $option)?),* });
    };
    ($ty:ty { $($field:ident $(as $option:literal)?),* $(,)? }) => {
        $crate::impl_configurable!(
            @impl $ty,
            $crate::options::short_type_name::<$ty>(),
            { $($field $(as $option)?),* }
        );
    };
}
