//! Rendering engine for rlog-generator.
//!
//! Field specifications are resolved against a [`ProviderRegistry`]: the
//! `core` namespace is searched first, then every provider module in the
//! order it was registered. A [`Generator`] bundles the registry with a
//! locale-configured [`rlog_faker::Faker`] and renders templates.
//!
//! ```rust
//! use rlog_core::FieldSpec;
//! use rlog_engine::Generator;
//! use std::collections::BTreeMap;
//!
//! let generator = Generator::with_default_providers().unwrap();
//!
//! let mut fields = BTreeMap::new();
//! fields.insert("ip".to_string(), FieldSpec::parse_function("func_randippub").unwrap());
//! fields.insert("action".to_string(), FieldSpec::choices(["ACCEPT", "DROP"]).unwrap());
//!
//! let line = generator.render("{0:%H:%M:%S} {ip} {action}", &fields).unwrap();
//! assert!(line.ends_with("ACCEPT") || line.ends_with("DROP"));
//! ```

pub mod error;
pub mod generator;
pub mod provider;
pub mod providers;
pub mod registry;

pub use error::{ProviderError, ProviderLoadError, RenderError};
pub use generator::{BoundFunction, Generator};
pub use provider::{ProviderFn, ProviderModule, ProviderModuleBuilder};
pub use registry::{load_providers, ProviderRegistry, ProviderRegistryBuilder, CORE_MODULE};
