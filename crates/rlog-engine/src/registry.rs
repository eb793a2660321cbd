//! The provider registry.
//!
//! Modules are registered explicitly through [`ProviderRegistryBuilder`] and
//! the resulting registry is immutable. Name lookup checks the core namespace
//! first, then every provider module in registration order; the first match
//! wins.

use crate::error::ProviderLoadError;
use crate::provider::{ProviderFn, ProviderModule};
use crate::providers;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Name of the built-in core namespace.
pub const CORE_MODULE: &str = "core";

/// Immutable mapping from module name to provider module.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    core: ProviderModule,
    providers: Vec<ProviderModule>,
}

impl ProviderRegistry {
    /// Start building a registry.
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Find a function by its plain name.
    ///
    /// Returns the module that defines it together with the function.
    pub fn lookup(&self, function: &str) -> Option<(&ProviderModule, &ProviderFn)> {
        self.modules()
            .find_map(|module| module.get(function).map(|f| (module, f)))
    }

    /// All modules, core namespace first, then providers in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &ProviderModule> {
        std::iter::once(&self.core).chain(self.providers.iter())
    }

    /// Get a module by name.
    pub fn module(&self, name: &str) -> Option<&ProviderModule> {
        self.modules().find(|module| module.name() == name)
    }

    /// The core namespace.
    pub fn core(&self) -> &ProviderModule {
        &self.core
    }

    /// Module names in lookup order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules().map(ProviderModule::name).collect()
    }
}

/// Collects modules for a [`ProviderRegistry`].
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    core: Option<ProviderModule>,
    providers: Vec<ProviderModule>,
}

impl ProviderRegistryBuilder {
    /// Set the core namespace. Without one, an empty `core` module is used.
    pub fn core(mut self, module: ProviderModule) -> Self {
        self.core = Some(module);
        self
    }

    /// Register a provider module. Lookup order follows registration order.
    pub fn provider(mut self, module: ProviderModule) -> Self {
        self.providers.push(module);
        self
    }

    /// Validate module names and produce the registry.
    pub fn build(self) -> Result<ProviderRegistry, ProviderLoadError> {
        let core = match self.core {
            Some(core) => core,
            None => ProviderModule::builder(CORE_MODULE).build()?,
        };

        let mut names = HashSet::new();
        for module in std::iter::once(&core).chain(self.providers.iter()) {
            if !names.insert(module.name()) {
                return Err(ProviderLoadError::DuplicateModule(module.name().to_string()));
            }
        }

        // Same name in several providers is allowed but only the first is reachable.
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for module in &self.providers {
            for function in module.function_names() {
                if core.contains(function) {
                    debug!(
                        function,
                        module = module.name(),
                        "provider function shadowed by core namespace"
                    );
                } else if let Some(first) = owners.get(function) {
                    warn!(
                        function,
                        module = module.name(),
                        first_module = *first,
                        "provider function defined in several modules, keeping the first"
                    );
                } else {
                    owners.insert(function, module.name());
                }
            }
        }

        debug!(
            modules = names.len(),
            functions = core.len() + owners.len(),
            "provider registry built"
        );

        Ok(ProviderRegistry {
            core,
            providers: self.providers,
        })
    }
}

static DEFAULT_REGISTRY: OnceLock<Result<Arc<ProviderRegistry>, ProviderLoadError>> =
    OnceLock::new();

/// The process-wide registry of built-in providers.
///
/// Built on first call; later calls return the same instance.
pub fn load_providers() -> Result<Arc<ProviderRegistry>, ProviderLoadError> {
    DEFAULT_REGISTRY
        .get_or_init(|| providers::default_registry().map(Arc::new))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlog_core::Value;
    use rlog_faker::Faker;

    fn module(name: &str, functions: &[(&str, &'static str)]) -> ProviderModule {
        functions
            .iter()
            .fold(ProviderModule::builder(name), |builder, (function, output)| {
                let output = *output;
                builder.function(*function, move |_: &Faker, _: &[String]| Ok(Value::from(output)))
            })
            .build()
            .unwrap()
    }

    fn call(registry: &ProviderRegistry, function: &str) -> (String, Value) {
        let (module, f) = registry.lookup(function).unwrap();
        (module.name().to_string(), f(&Faker::default(), &[]).unwrap())
    }

    #[test]
    fn test_core_wins_over_provider() {
        let registry = ProviderRegistry::builder()
            .core(module("core", &[("same", "core")]))
            .provider(module("plugin", &[("same", "plugin")]))
            .build()
            .unwrap();

        assert_eq!(call(&registry, "same"), ("core".to_string(), Value::from("core")));
    }

    #[test]
    fn test_first_registered_provider_wins() {
        let registry = ProviderRegistry::builder()
            .provider(module("zeta", &[("dup", "zeta")]))
            .provider(module("alpha", &[("dup", "alpha")]))
            .build()
            .unwrap();

        assert_eq!(call(&registry, "dup"), ("zeta".to_string(), Value::from("zeta")));
    }

    #[test]
    fn test_lookup_falls_through_to_providers() {
        let registry = ProviderRegistry::builder()
            .core(module("core", &[("a", "1")]))
            .provider(module("first", &[("b", "2")]))
            .provider(module("second", &[("c", "3")]))
            .build()
            .unwrap();

        assert_eq!(call(&registry, "c"), ("second".to_string(), Value::from("3")));
        assert!(registry.lookup("missing").is_none());
        assert_eq!(registry.module_names(), vec!["core", "first", "second"]);
    }

    #[test]
    fn test_duplicate_module_name() {
        let err = ProviderRegistry::builder()
            .provider(module("net", &[]))
            .provider(module("net", &[]))
            .build()
            .unwrap_err();
        assert_eq!(err, ProviderLoadError::DuplicateModule("net".to_string()));

        let err = ProviderRegistry::builder()
            .provider(module("core", &[]))
            .build()
            .unwrap_err();
        assert_eq!(err, ProviderLoadError::DuplicateModule("core".to_string()));
    }

    #[test]
    fn test_empty_core_by_default() {
        let registry = ProviderRegistry::builder().build().unwrap();
        assert_eq!(registry.core().name(), CORE_MODULE);
        assert!(registry.core().is_empty());
    }

    #[test]
    fn test_load_providers_is_a_fixed_point() {
        let first = load_providers().unwrap();
        let second = load_providers().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.module_names(), second.module_names());
        for (a, b) in first.modules().zip(second.modules()) {
            assert_eq!(
                a.function_names().collect::<Vec<_>>(),
                b.function_names().collect::<Vec<_>>()
            );
        }
    }
}
