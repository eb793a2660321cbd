//! Built-in provider modules.
//!
//! Each module exposes a `module()` constructor. [`default_registry`] wires
//! them together: the `core` namespace from [`builtin`] first, then
//! `network`, `identity`, `text` and `numeric`, in that lookup order.

pub mod args;
pub mod builtin;
pub mod identity;
pub mod network;
pub mod numeric;
pub mod text;

use crate::error::ProviderLoadError;
use crate::registry::ProviderRegistry;

/// Build a registry containing every built-in provider module.
pub fn default_registry() -> Result<ProviderRegistry, ProviderLoadError> {
    ProviderRegistry::builder()
        .core(builtin::module()?)
        .provider(network::module()?)
        .provider(identity::module()?)
        .provider(text::module()?)
        .provider(numeric::module()?)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_modules() {
        let registry = default_registry().unwrap();
        assert_eq!(
            registry.module_names(),
            vec!["core", "network", "identity", "text", "numeric"]
        );
        for function in ["timestamp", "randint", "randmac", "randuuid", "randsentence"] {
            assert!(registry.lookup(function).is_some(), "{function} missing");
        }
    }
}
