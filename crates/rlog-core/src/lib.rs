//! Core types for rlog-generator.
//!
//! This crate provides the foundational types shared by the engine and the
//! command-line driver:
//!
//! - [`Value`] - A concrete value produced for one field
//! - [`FieldSpec`] - How one field gets its value (function call or literal choices)
//! - [`Template`] - A parsed log line template
//! - [`Config`] - Pattern configuration loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! rlog-core (this crate)
//!    │
//!    ├─── rlog-engine   (resolves FieldSpecs and renders Templates)
//!    │
//!    └─── rlog-generator (CLI driver, loads Config)
//! ```
//!
//! # Example
//!
//! ```rust
//! use rlog_core::{FieldSpec, Template};
//!
//! let template = Template::parse("{0:%H:%M} {user} logged in").unwrap();
//! assert_eq!(template.field_names(), vec!["user"]);
//!
//! let spec = FieldSpec::parse_function("func_randint 1 10").unwrap();
//! assert!(matches!(spec, FieldSpec::FunctionCall(_)));
//! ```

pub mod config;
pub mod field;
pub mod template;
pub mod values;

// Re-exports for convenience
pub use config::{CompiledPattern, Config, ConfigError, DurationSpec, PatternConfig};
pub use field::{FieldMap, FieldSpec, FieldSpecError, FunctionCall, FUNCTION_PREFIX};
pub use template::{Template, TemplateError, NOW_FIELD};
pub use values::Value;
