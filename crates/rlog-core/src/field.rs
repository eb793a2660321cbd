//! Field specifications.
//!
//! A field is configured either as a function call string
//! (`"func_randint 1 10"`) or as a list of literal choices
//! (`[ACCEPT, DROP]`). The shape is decided once, when the configuration is
//! parsed, and the `func_` prefix is stripped there so the engine only ever
//! looks up plain function names.

use crate::values::Value;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;

/// Prefix every function token must carry.
pub const FUNCTION_PREFIX: &str = "func_";

/// Field name to specification map for one template.
pub type FieldMap = BTreeMap<String, FieldSpec>;

/// Error type for field specification parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldSpecError {
    /// Function expression contained no tokens
    #[error("empty function expression")]
    EmptyExpression,

    /// First token did not start with `func_`
    #[error("function token '{0}' must start with 'func_'")]
    MissingPrefix(String),

    /// Nothing followed the `func_` prefix
    #[error("function token '{0}' has no function name after 'func_'")]
    EmptyFunctionName(String),

    /// Literal choice list was empty
    #[error("literal choice list is empty")]
    EmptyChoices,

    /// Literal choice was itself a list or mapping
    #[error("literal choice #{0} is not a scalar value")]
    NonScalarChoice(usize),

    /// Specification was neither a string nor a list
    #[error("expected a function string or a list of choices, found {0}")]
    UnsupportedShape(&'static str),
}

/// A parsed `func_<name> [arg]...` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Original first token, including the prefix
    pub token: String,
    /// Function name with the prefix removed
    pub name: String,
    /// Positional string arguments
    pub args: Vec<String>,
}

impl FunctionCall {
    /// Parse a whitespace separated function expression.
    pub fn parse(expression: &str) -> Result<Self, FieldSpecError> {
        let mut tokens = expression.split_whitespace();
        let token = tokens.next().ok_or(FieldSpecError::EmptyExpression)?;

        let name = token
            .strip_prefix(FUNCTION_PREFIX)
            .ok_or_else(|| FieldSpecError::MissingPrefix(token.to_string()))?;
        if name.is_empty() {
            return Err(FieldSpecError::EmptyFunctionName(token.to_string()));
        }

        Ok(Self {
            token: token.to_string(),
            name: name.to_string(),
            args: tokens.map(str::to_string).collect(),
        })
    }
}

/// How a single field obtains its value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Invoke a provider function
    FunctionCall(FunctionCall),
    /// Pick uniformly from a fixed, non-empty list
    LiteralChoices(Vec<Value>),
}

impl FieldSpec {
    /// Build a function call specification from its string form.
    pub fn parse_function(expression: &str) -> Result<Self, FieldSpecError> {
        FunctionCall::parse(expression).map(Self::FunctionCall)
    }

    /// Build a literal choice specification.
    pub fn choices<I, V>(values: I) -> Result<Self, FieldSpecError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(FieldSpecError::EmptyChoices);
        }
        Ok(Self::LiteralChoices(values))
    }

    /// Interpret a YAML node from the configuration.
    pub fn from_yaml(yaml: &YamlValue) -> Result<Self, FieldSpecError> {
        match yaml {
            YamlValue::String(s) => Self::parse_function(s),
            YamlValue::Sequence(items) => {
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        Value::from_yaml(item).ok_or(FieldSpecError::NonScalarChoice(idx))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::choices(values)
            }
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
            YamlValue::Null => Err(FieldSpecError::UnsupportedShape("null")),
            YamlValue::Bool(_) => Err(FieldSpecError::UnsupportedShape("a boolean")),
            YamlValue::Number(_) => Err(FieldSpecError::UnsupportedShape("a number")),
            YamlValue::Mapping(_) => Err(FieldSpecError::UnsupportedShape("a mapping")),
        }
    }
}
