//! Error types for the rendering engine.

use rlog_core::{FieldSpecError, TemplateError};
use rlog_faker::FakerError;
use thiserror::Error;

/// Errors raised while building provider modules or the registry.
///
/// These are fatal at startup: no partial registry is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderLoadError {
    /// Module name was empty or contained whitespace
    #[error("Invalid provider module name '{0}'")]
    InvalidModuleName(String),

    /// Function name cannot be referenced from a field specification
    #[error("Provider module '{module}' declares invalid function name '{function}': {reason}")]
    InvalidFunctionName {
        module: String,
        function: String,
        reason: String,
    },

    /// Same function declared twice in one module
    #[error("Provider module '{module}' declares function '{function}' more than once")]
    DuplicateFunction { module: String, function: String },

    /// Two modules registered under the same name
    #[error("Provider module '{0}' is registered more than once")]
    DuplicateModule(String),
}

/// Errors raised by a provider function while producing a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Required positional argument missing
    #[error("missing argument #{index} ({name})")]
    MissingArgument { index: usize, name: &'static str },

    /// Argument could not be coerced to the expected type
    #[error("argument #{index} ({name}) must be {expected}, got '{value}'")]
    InvalidArgument {
        index: usize,
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    /// More arguments than the function accepts
    #[error("expected at most {max} arguments, got {got}")]
    TooManyArguments { max: usize, got: usize },

    /// Value generator rejected the request
    #[error(transparent)]
    Faker(#[from] FakerError),
}

/// Errors surfaced to callers of the resolve and render entry points.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No function with this name in the core namespace or any provider module
    #[error("Function '{token}' not found in the core namespace or any provider module")]
    FunctionNotFound { token: String },

    /// Function token is not a valid `func_<name>` token
    #[error("Invalid function token '{token}': {source}")]
    InvalidFunctionToken {
        token: String,
        #[source]
        source: FieldSpecError,
    },

    /// Field specification is neither a function string nor a literal list
    #[error("Invalid specification for field '{field}': {source}")]
    InvalidFieldSpecification {
        field: String,
        #[source]
        source: FieldSpecError,
    },

    /// Literal choice list has nothing to pick from
    #[error("Literal choice list is empty")]
    EmptyChoices,

    /// Template could not be parsed or substituted
    #[error("Failed to render template '{template}': {source}")]
    TemplateRenderError {
        template: String,
        #[source]
        source: TemplateError,
    },

    /// Provider function returned an error
    #[error("Function '{token}' from provider module '{module}' failed: {source}")]
    ProviderFailed {
        token: String,
        module: String,
        #[source]
        source: ProviderError,
    },
}
