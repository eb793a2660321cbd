//! Pattern configuration loaded from YAML.
//!
//! ```yaml
//! locale: it_IT
//! patterns:
//!   - name: firewall
//!     template: "{0:%Y-%m-%d %H:%M:%S} {host} {action}"
//!     fields:
//!       host: func_randhostname 2
//!       action: [ACCEPT, DROP]
//!     eps: 10
//!     time: 30s
//!     path: /tmp/firewall.log
//! ```

use crate::field::{FieldMap, FieldSpec, FieldSpecError};
use crate::template::{Template, TemplateError, NOW_FIELD};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for configuration loading and compilation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two patterns share a name
    #[error("Duplicate pattern name: {0}")]
    DuplicatePattern(String),

    /// Field specification could not be interpreted
    #[error("Invalid field specification for '{field}' in pattern '{pattern}': {source}")]
    InvalidField {
        pattern: String,
        field: String,
        #[source]
        source: FieldSpecError,
    },

    /// Template could not be parsed
    #[error("Invalid template in pattern '{pattern}': {source}")]
    Template {
        pattern: String,
        #[source]
        source: TemplateError,
    },

    /// Template references a field the pattern does not define
    #[error("Template in pattern '{pattern}' references undefined field '{field}'")]
    UndefinedPlaceholder { pattern: String, field: String },

    /// Any other invalid pattern setting
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Locale for the value generator (e.g. `it_IT`)
    #[serde(default)]
    pub locale: Option<String>,

    /// Pattern definitions
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

/// One log pattern as written in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Pattern name, unique within the file
    pub name: String,

    /// Disabled patterns are compiled but never emitted
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Line template
    pub template: String,

    /// Field name to specification (function string or choice list)
    #[serde(default)]
    pub fields: Mapping,

    /// Events per second
    #[serde(default = "default_eps")]
    pub eps: f64,

    /// How long to emit for; unbounded when absent
    #[serde(default)]
    pub time: Option<DurationSpec>,

    /// Output file; stdout when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

fn default_eps() -> f64 {
    1.0
}

/// A run duration as written in YAML: plain seconds or a suffixed string
/// such as `30s`, `5m`, `1h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    /// Plain number of seconds
    Seconds(u64),
    /// Suffixed duration string
    Text(String),
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationSpec::Seconds(secs) => write!(f, "{secs}"),
            DurationSpec::Text(text) => f.write_str(text),
        }
    }
}

/// A pattern with its template and fields parsed.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub enabled: bool,
    pub template: Template,
    pub fields: FieldMap,
    pub eps: f64,
    pub time: Option<DurationSpec>,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The configured locale, if present and non-empty.
    pub fn locale(&self) -> Option<&str> {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
    }

    /// Get a pattern by name.
    pub fn get_pattern(&self, name: &str) -> Option<&PatternConfig> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Parse every pattern's template and fields.
    ///
    /// Fails on the first invalid pattern so misconfigured files are rejected
    /// before anything is emitted.
    pub fn compile(&self) -> Result<Vec<CompiledPattern>, ConfigError> {
        let mut seen = HashSet::new();
        self.patterns
            .iter()
            .map(|pattern| {
                if !seen.insert(pattern.name.as_str()) {
                    return Err(ConfigError::DuplicatePattern(pattern.name.clone()));
                }
                pattern.compile()
            })
            .collect()
    }
}

impl PatternConfig {
    /// Parse this pattern's template and field specifications.
    pub fn compile(&self) -> Result<CompiledPattern, ConfigError> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(ConfigError::InvalidPattern {
                pattern: self.name.clone(),
                reason: format!("eps must be a positive number, got {}", self.eps),
            });
        }

        let template = Template::parse(&self.template).map_err(|source| ConfigError::Template {
            pattern: self.name.clone(),
            source,
        })?;

        let fields = parse_fields(&self.name, &self.fields)?;

        if let Some(missing) = template
            .field_names()
            .into_iter()
            .find(|name| *name != NOW_FIELD && !fields.contains_key(*name))
        {
            return Err(ConfigError::UndefinedPlaceholder {
                pattern: self.name.clone(),
                field: missing.to_string(),
            });
        }

        Ok(CompiledPattern {
            name: self.name.clone(),
            enabled: self.enabled,
            template,
            fields,
            eps: self.eps,
            time: self.time.clone(),
            path: self.path.clone(),
        })
    }
}

/// Interpret a YAML mapping of field name to specification.
pub fn parse_fields(pattern: &str, fields: &Mapping) -> Result<FieldMap, ConfigError> {
    fields
        .iter()
        .map(|(key, value)| {
            let field = match key {
                YamlValue::String(s) => s.clone(),
                other => {
                    return Err(ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: format!("field names must be strings, found {other:?}"),
                    })
                }
            };
            let spec = FieldSpec::from_yaml(value).map_err(|source| ConfigError::InvalidField {
                pattern: pattern.to_string(),
                field: field.clone(),
                source,
            })?;
            Ok((field, spec))
        })
        .collect()
}
