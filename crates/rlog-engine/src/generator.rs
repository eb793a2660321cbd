//! The generator context: function resolution, field resolution and rendering.

use crate::error::{ProviderError, RenderError};
use crate::provider::{ProviderFn, ProviderModule};
use crate::registry::{load_providers, ProviderRegistry};
use chrono::Local;
use rand::seq::SliceRandom;
use rlog_core::{CompiledPattern, Config, FieldMap, FieldSpec, FunctionCall, Template, Value};
use rlog_faker::{Faker, FakerError, Locale};
use serde_yaml::Mapping;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything needed to turn field specifications into values.
///
/// Holds the shared provider registry and the locale-configured [`Faker`].
/// Cloning is cheap, and a clone can be reconfigured without affecting the
/// original, so each worker can own one.
#[derive(Debug, Clone)]
pub struct Generator {
    registry: Arc<ProviderRegistry>,
    faker: Faker,
}

/// A resolved function with the generator's [`Faker`] bound as its first argument.
pub struct BoundFunction<'a> {
    token: String,
    module: &'a ProviderModule,
    function: &'a ProviderFn,
    faker: Faker,
}

impl BoundFunction<'_> {
    /// Name of the module the function was found in.
    pub fn module(&self) -> &str {
        self.module.name()
    }

    /// The token the function was resolved from.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Invoke the function with the bound faker followed by `args`.
    pub fn call(&self, args: &[String]) -> Result<Value, RenderError> {
        (self.function)(&self.faker, args).map_err(|source| self.provider_failed(source))
    }

    fn provider_failed(&self, source: ProviderError) -> RenderError {
        RenderError::ProviderFailed {
            token: self.token.clone(),
            module: self.module.name().to_string(),
            source,
        }
    }
}

impl Generator {
    /// Create a generator over `registry` with the default locale.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            faker: Faker::default(),
        }
    }

    /// Create a generator over the built-in providers.
    pub fn with_default_providers() -> Result<Self, crate::error::ProviderLoadError> {
        Ok(Self::new(load_providers()?))
    }

    /// Use `locale` for every subsequent resolution.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.faker = Faker::new(locale);
        self
    }

    /// Reconfigure the locale from its textual form (e.g. `it_IT`).
    ///
    /// The last call wins.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), FakerError> {
        let locale: Locale = locale.parse()?;
        debug!(%locale, "generator locale set");
        self.faker = Faker::new(locale);
        Ok(())
    }

    /// Apply the configuration's `locale` key when it is present and non-empty.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), FakerError> {
        match config.locale() {
            Some(locale) => self.set_locale(locale),
            None => Ok(()),
        }
    }

    pub fn faker(&self) -> &Faker {
        &self.faker
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Look up a function by plain name, core namespace first.
    pub fn resolve(&self, name: &str) -> Result<BoundFunction<'_>, RenderError> {
        self.bind(&format!("{}{name}", rlog_core::FUNCTION_PREFIX), name)
    }

    /// Look up a function from a `func_<name>` token.
    pub fn resolve_token(&self, token: &str) -> Result<BoundFunction<'_>, RenderError> {
        let call = FunctionCall::parse(token).map_err(|source| RenderError::InvalidFunctionToken {
            token: token.to_string(),
            source,
        })?;
        self.bind(&call.token, &call.name)
    }

    fn bind(&self, token: &str, name: &str) -> Result<BoundFunction<'_>, RenderError> {
        let (module, function) =
            self.registry
                .lookup(name)
                .ok_or_else(|| RenderError::FunctionNotFound {
                    token: token.to_string(),
                })?;
        trace!(function = name, module = module.name(), "function resolved");

        Ok(BoundFunction {
            token: token.to_string(),
            module,
            function,
            faker: self.faker,
        })
    }

    /// Produce one value for a field specification.
    ///
    /// Function calls are invoked with their string arguments; literal lists
    /// yield one element chosen uniformly at random. An empty list is
    /// [`RenderError::EmptyChoices`].
    pub fn resolve_field(&self, spec: &FieldSpec) -> Result<Value, RenderError> {
        match spec {
            FieldSpec::FunctionCall(call) => self.bind(&call.token, &call.name)?.call(&call.args),
            FieldSpec::LiteralChoices(values) => values
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or(RenderError::EmptyChoices),
        }
    }

    /// Resolve every field independently.
    pub fn resolve_fields(&self, fields: &FieldMap) -> Result<HashMap<String, Value>, RenderError> {
        fields
            .iter()
            .map(|(name, spec)| Ok((name.clone(), self.resolve_field(spec)?)))
            .collect()
    }

    /// Parse `template`, resolve `fields` and substitute them along with the
    /// current local time.
    pub fn render(&self, template: &str, fields: &FieldMap) -> Result<String, RenderError> {
        let parsed = Template::parse(template).map_err(|source| RenderError::TemplateRenderError {
            template: template.to_string(),
            source,
        })?;
        self.render_template(&parsed, fields)
    }

    /// Like [`Generator::render`], with fields given as raw YAML.
    pub fn render_yaml(&self, template: &str, fields: &Mapping) -> Result<String, RenderError> {
        let fields = fields
            .iter()
            .map(|(key, value)| {
                let field = key
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{key:?}"));
                let spec = FieldSpec::from_yaml(value).map_err(|source| {
                    RenderError::InvalidFieldSpecification {
                        field: field.clone(),
                        source,
                    }
                })?;
                Ok((field, spec))
            })
            .collect::<Result<FieldMap, RenderError>>()?;
        self.render(template, &fields)
    }

    /// Render an already parsed template.
    pub fn render_template(
        &self,
        template: &Template,
        fields: &FieldMap,
    ) -> Result<String, RenderError> {
        let values = self.resolve_fields(fields)?;
        let now = Local::now().naive_local();
        template
            .render(&now, &values)
            .map_err(|source| RenderError::TemplateRenderError {
                template: template.source().to_string(),
                source,
            })
    }

    /// Render one line for a compiled pattern.
    pub fn render_pattern(&self, pattern: &CompiledPattern) -> Result<String, RenderError> {
        self.render_template(&pattern.template, &pattern.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use rlog_core::{FieldSpecError, TemplateError};
    use std::collections::BTreeMap;

    fn echo_args(_: &Faker, args: &[String]) -> Result<Value, ProviderError> {
        Ok(Value::String(args.join(",")))
    }

    fn echo_locale(faker: &Faker, _: &[String]) -> Result<Value, ProviderError> {
        Ok(Value::from(faker.locale().code()))
    }

    fn stub_generator() -> Generator {
        let core = ProviderModule::builder("core")
            .function("echo", echo_args)
            .function("shadowed", |_: &Faker, _: &[String]| Ok(Value::from("core")))
            .build()
            .unwrap();
        let plugin = ProviderModule::builder("plugin")
            .function("shadowed", |_: &Faker, _: &[String]| Ok(Value::from("plugin")))
            .function("locale", echo_locale)
            .function("fails", |_: &Faker, _: &[String]| {
                Err(ProviderError::TooManyArguments { max: 0, got: 1 })
            })
            .build()
            .unwrap();
        let registry = ProviderRegistry::builder()
            .core(core)
            .provider(plugin)
            .build()
            .unwrap();
        Generator::new(Arc::new(registry))
    }

    fn fields(pairs: &[(&str, FieldSpec)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn test_literal_choice_is_member() {
        let generator = stub_generator();
        let spec = FieldSpec::choices(["a", "b", "c"]).unwrap();
        let FieldSpec::LiteralChoices(choices) = &spec else {
            unreachable!()
        };
        for _ in 0..200 {
            let value = generator.resolve_field(&spec).unwrap();
            assert!(choices.contains(&value));
        }
    }

    #[test]
    fn test_empty_literal_choices_fail() {
        let generator = stub_generator();
        let spec = FieldSpec::LiteralChoices(Vec::new());
        assert!(matches!(
            generator.resolve_field(&spec),
            Err(RenderError::EmptyChoices)
        ));

        let fields = fields(&[("user", spec)]);
        assert!(matches!(
            generator.render("{user}", &fields),
            Err(RenderError::EmptyChoices)
        ));
    }

    #[test]
    fn test_float_range_failure_surfaces_as_provider_error() {
        let generator = Generator::with_default_providers().unwrap();
        let spec = FieldSpec::parse_function("func_randfloat -1e308 1e308").unwrap();
        let err = generator.resolve_field(&spec).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ProviderFailed {
                source: ProviderError::Faker(FakerError::InvalidFloatRange { .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_function_receives_args_unchanged() {
        let generator = stub_generator();
        let spec = FieldSpec::parse_function("func_echo a b").unwrap();
        assert_eq!(generator.resolve_field(&spec).unwrap(), Value::from("a,b"));
    }

    #[test]
    fn test_core_namespace_wins() {
        let generator = stub_generator();
        let bound = generator.resolve("shadowed").unwrap();
        assert_eq!(bound.module(), "core");
        assert_eq!(bound.call(&[]).unwrap(), Value::from("core"));
    }

    #[test]
    fn test_provider_modules_are_consulted() {
        let generator = stub_generator();
        let bound = generator.resolve_token("func_locale").unwrap();
        assert_eq!(bound.module(), "plugin");
        assert_eq!(bound.token(), "func_locale");
    }

    #[test]
    fn test_function_not_found_names_token() {
        let generator = stub_generator();
        let spec = FieldSpec::parse_function("func_doesNotExist").unwrap();
        let err = generator.resolve_field(&spec).unwrap_err();
        assert!(matches!(err, RenderError::FunctionNotFound { ref token } if token == "func_doesNotExist"));
        assert!(err.to_string().contains("func_doesNotExist"));
    }

    #[test]
    fn test_resolve_token_rejects_missing_prefix() {
        let generator = stub_generator();
        assert!(matches!(
            generator.resolve_token("echo"),
            Err(RenderError::InvalidFunctionToken {
                source: FieldSpecError::MissingPrefix(_),
                ..
            })
        ));
        assert!(matches!(
            generator.resolve_token("func"),
            Err(RenderError::InvalidFunctionToken { .. })
        ));
    }

    #[test]
    fn test_provider_failure_names_module() {
        let generator = stub_generator();
        let spec = FieldSpec::parse_function("func_fails").unwrap();
        let err = generator.resolve_field(&spec).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ProviderFailed { ref token, ref module, .. }
                if token == "func_fails" && module == "plugin"
        ));
    }

    #[test]
    fn test_locale_change_reaches_providers() {
        let mut generator = stub_generator();
        let spec = FieldSpec::parse_function("func_locale").unwrap();
        assert_eq!(generator.resolve_field(&spec).unwrap(), Value::from("en_US"));

        let config = Config::from_yaml("locale: it_IT\n").unwrap();
        generator.apply_config(&config).unwrap();
        assert_eq!(generator.resolve_field(&spec).unwrap(), Value::from("it_IT"));

        generator.set_locale("de_DE").unwrap();
        assert_eq!(generator.resolve_field(&spec).unwrap(), Value::from("de_DE"));

        // Missing locale leaves the current one untouched.
        generator.apply_config(&Config::default()).unwrap();
        assert_eq!(generator.faker().locale(), Locale::DeDe);

        assert!(generator.set_locale("xx_XX").is_err());
        assert_eq!(generator.faker().locale(), Locale::DeDe);
    }

    #[test]
    fn test_clones_are_independent() {
        let generator = stub_generator();
        let italian = generator.clone().with_locale(Locale::ItIt);
        assert_eq!(generator.faker().locale(), Locale::EnUs);
        assert_eq!(italian.faker().locale(), Locale::ItIt);
    }

    #[test]
    fn test_render_literal_choice() {
        let generator = stub_generator();
        let fields = fields(&[("user", FieldSpec::choices(["alice", "bob"]).unwrap())]);
        for _ in 0..1000 {
            let line = generator.render("{now} - {user}", &fields).unwrap();
            let (timestamp, user) = line.split_once(" - ").unwrap();
            assert!(user == "alice" || user == "bob");
            assert!(!timestamp.is_empty());
            assert!(timestamp.chars().next().unwrap().is_ascii_digit());
        }
    }

    #[test]
    fn test_render_ignores_unused_fields() {
        let generator = stub_generator();
        let fields = fields(&[
            ("user", FieldSpec::choices(["alice"]).unwrap()),
            ("unused", FieldSpec::parse_function("func_echo x").unwrap()),
        ]);
        assert_eq!(generator.render("{user}", &fields).unwrap(), "alice");
    }

    #[test]
    fn test_render_missing_placeholder() {
        let generator = stub_generator();
        let fields = fields(&[("user", FieldSpec::choices(["alice"]).unwrap())]);
        let err = generator.render("{user} {host}", &fields).unwrap_err();
        match err {
            RenderError::TemplateRenderError { template, source } => {
                assert_eq!(template, "{user} {host}");
                assert_eq!(source, TemplateError::MissingField("host".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_yaml_invalid_field() {
        let generator = stub_generator();
        let mapping: Mapping = serde_yaml::from_str("user: 42\n").unwrap();
        let err = generator.render_yaml("{user}", &mapping).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidFieldSpecification { ref field, .. } if field == "user"
        ));

        let mapping: Mapping = serde_yaml::from_str("user: func_echo hi\n").unwrap();
        assert_eq!(generator.render_yaml("<{user}>", &mapping).unwrap(), "<hi>");
    }

    #[test]
    fn test_render_with_default_providers() {
        let generator = Generator::with_default_providers().unwrap();
        let fields = fields(&[
            ("port", FieldSpec::parse_function("func_randint 1 65535").unwrap()),
            ("ts", FieldSpec::parse_function("func_timestamp").unwrap()),
        ]);
        let line = generator.render("{0:%Y} {port:>5} {ts}", &fields).unwrap();
        let parts: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
        let port: i64 = parts[1].parse().unwrap();
        assert!((1..=65535).contains(&port));
        assert!(parts[2].parse::<i64>().is_ok());
    }
}
