/*
 * setup.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Component construction from pipeline settings.
 */

//! Component construction from pipeline settings.
//!
//! Setup resolves every configured identifier against a registry, builds a
//! fresh instance of each type and binds the settings onto it. Components
//! come back in configured order; an identifier listed twice produces two
//! independent instances.

use docpipe_config::{Configurable, apply};
use docpipe_registry::TypeRegistry;

use crate::error::{PipelineError, Result};
use crate::settings::PipelineSettings;

/// Build and configure the components selected by `settings.processors`.
///
/// Resolution of every identifier happens before any component is built,
/// so an unknown identifier fails without constructing anything.
pub fn build_components<C>(
    registry: &TypeRegistry<C>,
    settings: &PipelineSettings,
) -> Result<Vec<Box<C>>>
where
    C: Configurable + ?Sized,
{
    let resolved = registry.resolve_identifiers(&settings.processors)?;
    let source = settings.config_source()?;

    tracing::info!(components = resolved.len(), "Building pipeline components");

    resolved
        .into_iter()
        .map(|type_ref| {
            let mut component = type_ref.instantiate();
            apply(component.as_mut(), Some(&source)).map_err(|err| {
                PipelineError::Component {
                    component: type_ref.identifier().to_string(),
                    source: err,
                }
            })?;
            Ok(component)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpipe_config::{ConfigError, Value};
    use serde_json::json;

    trait Stepper: Configurable {
        fn step(&self) -> i64;
    }

    struct Counter {
        step: i64,
    }

    impl Stepper for Counter {
        fn step(&self) -> i64 {
            self.step
        }
    }

    impl Configurable for Counter {
        fn config_type_name(&self) -> &str {
            "Counter"
        }

        fn has_option(&self, name: &str) -> bool {
            name == "step"
        }

        fn set_option(
            &mut self,
            name: &str,
            value: &Value,
        ) -> std::result::Result<(), ConfigError> {
            self.step = value
                .as_i64()
                .ok_or_else(|| ConfigError::invalid_value(name, "expected an integer"))?;
            Ok(())
        }
    }

    fn registry() -> TypeRegistry<dyn Stepper> {
        let mut registry = TypeRegistry::<dyn Stepper>::new();
        registry
            .register::<Counter>("tests.counting", "Counter", || Box::new(Counter { step: 1 }))
            .unwrap();
        registry
    }

    fn settings(value: serde_json::Value) -> PipelineSettings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_empty() {
        let components = build_components(&registry(), &PipelineSettings::default()).unwrap();
        assert!(components.is_empty());
    }

    #[test]
    fn test_build_configures_each_instance() {
        let settings = settings(json!({
            "processors": ["tests.counting.Counter", "tests.counting.Counter"],
            "Counter_step": 5,
        }));
        let components = build_components(&registry(), &settings).unwrap();
        let steps: Vec<i64> = components.iter().map(|c| c.step()).collect();
        assert_eq!(steps, vec![5, 5]);
        assert!(components.iter().all(|c| c.config_type_name() == "Counter"));
    }

    #[test]
    fn test_build_unknown_identifier() {
        let settings = settings(json!({"processors": ["tests.counting.Missing"]}));
        let Err(err) = build_components(&registry(), &settings) else {
            panic!("missing type should fail");
        };
        assert!(matches!(err, PipelineError::Registry(_)));
    }

    #[test]
    fn test_build_bad_value_names_component() {
        let settings = settings(json!({
            "processors": ["tests.counting.Counter"],
            "step": "fast",
        }));
        let Err(err) = build_components(&registry(), &settings) else {
            panic!("bad value should fail");
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Failed to configure tests.counting.Counter: Invalid value for option 'step': expected an integer"
        );
    }
}
