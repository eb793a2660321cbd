//! Provider modules: named groups of field-generator functions.

use crate::error::{ProviderError, ProviderLoadError};
use rlog_core::{Value, FUNCTION_PREFIX};
use rlog_faker::Faker;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A field-generator function.
///
/// Receives the shared [`Faker`] first, followed by the positional string
/// arguments from the field specification. Argument coercion is the
/// function's own job.
pub type ProviderFn = Arc<dyn Fn(&Faker, &[String]) -> Result<Value, ProviderError> + Send + Sync>;

/// A named, immutable set of provider functions.
#[derive(Clone)]
pub struct ProviderModule {
    name: String,
    functions: BTreeMap<String, ProviderFn>,
}

impl ProviderModule {
    /// Start building a module with the given name.
    pub fn builder(name: impl Into<String>) -> ProviderModuleBuilder {
        ProviderModuleBuilder {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a function by its plain (unprefixed) name.
    pub fn get(&self, function: &str) -> Option<&ProviderFn> {
        self.functions.get(function)
    }

    /// Whether the module defines `function`.
    pub fn contains(&self, function: &str) -> bool {
        self.functions.contains_key(function)
    }

    /// Function names in sorted order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of functions in the module.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for ProviderModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderModule")
            .field("name", &self.name)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects functions for a [`ProviderModule`].
pub struct ProviderModuleBuilder {
    name: String,
    functions: Vec<(String, ProviderFn)>,
}

impl ProviderModuleBuilder {
    /// Add a function under its plain name (without the `func_` prefix).
    pub fn function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Faker, &[String]) -> Result<Value, ProviderError> + Send + Sync + 'static,
    {
        self.functions.push((name.into(), Arc::new(function)));
        self
    }

    /// Validate names and produce the module.
    pub fn build(self) -> Result<ProviderModule, ProviderLoadError> {
        if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(ProviderLoadError::InvalidModuleName(self.name));
        }

        let mut functions = BTreeMap::new();
        for (function, callable) in self.functions {
            if let Some(reason) = invalid_function_name(&function) {
                return Err(ProviderLoadError::InvalidFunctionName {
                    module: self.name,
                    function,
                    reason: reason.to_string(),
                });
            }
            if functions.contains_key(&function) {
                return Err(ProviderLoadError::DuplicateFunction {
                    module: self.name,
                    function,
                });
            }
            functions.insert(function, callable);
        }

        Ok(ProviderModule {
            name: self.name,
            functions,
        })
    }
}

fn invalid_function_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else if name.starts_with(FUNCTION_PREFIX) {
        Some("register the plain name, the 'func_' prefix belongs to field specifications")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: &'static str) -> impl Fn(&Faker, &[String]) -> Result<Value, ProviderError> {
        move |_, _| Ok(Value::from(value))
    }

    #[test]
    fn test_build_module() {
        let module = ProviderModule::builder("network")
            .function("b", constant("b"))
            .function("a", constant("a"))
            .build()
            .unwrap();

        assert_eq!(module.name(), "network");
        assert_eq!(module.len(), 2);
        assert_eq!(module.function_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(module.contains("a"));
        assert!(!module.contains("c"));

        let f = module.get("a").unwrap();
        assert_eq!(f(&Faker::default(), &[]).unwrap(), Value::from("a"));
    }

    #[test]
    fn test_rejects_duplicate_function() {
        let err = ProviderModule::builder("m")
            .function("a", constant("1"))
            .function("a", constant("2"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ProviderLoadError::DuplicateFunction {
                module: "m".to_string(),
                function: "a".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_invalid_names() {
        let err = ProviderModule::builder("m")
            .function("func_a", constant("1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProviderLoadError::InvalidFunctionName { ref function, .. } if function == "func_a"));

        let err = ProviderModule::builder("m")
            .function("two words", constant("1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProviderLoadError::InvalidFunctionName { .. }));

        let err = ProviderModule::builder("").build().unwrap_err();
        assert_eq!(err, ProviderLoadError::InvalidModuleName(String::new()));
    }
}
