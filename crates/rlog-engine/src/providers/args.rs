//! Positional argument coercion for provider functions.
//!
//! Field specifications pass every argument as a string; providers use
//! [`Args`] to turn them into the types they need.

use crate::error::ProviderError;
use std::str::FromStr;

/// Borrowed view over a provider call's string arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    args: &'a [String],
}

impl<'a> Args<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self { args }
    }

    /// Fail when more than `max` arguments were supplied.
    pub fn at_most(self, max: usize) -> Result<Self, ProviderError> {
        if self.args.len() > max {
            return Err(ProviderError::TooManyArguments {
                max,
                got: self.args.len(),
            });
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Required argument parsed as `T`.
    pub fn required<T: FromStr>(
        &self,
        index: usize,
        name: &'static str,
        expected: &'static str,
    ) -> Result<T, ProviderError> {
        let raw = self
            .args
            .get(index)
            .ok_or(ProviderError::MissingArgument { index, name })?;
        parse(raw, index, name, expected)
    }

    /// Optional argument parsed as `T`, falling back to `default`.
    pub fn optional<T: FromStr>(
        &self,
        index: usize,
        name: &'static str,
        expected: &'static str,
        default: T,
    ) -> Result<T, ProviderError> {
        match self.args.get(index) {
            Some(raw) => parse(raw, index, name, expected),
            None => Ok(default),
        }
    }

    /// Optional argument capped at `max`; larger values are rejected.
    pub fn optional_at_most<T: FromStr + PartialOrd>(
        &self,
        index: usize,
        name: &'static str,
        expected: &'static str,
        default: T,
        max: T,
    ) -> Result<T, ProviderError> {
        let Some(raw) = self.args.get(index) else {
            return Ok(default);
        };
        let value: T = parse(raw, index, name, expected)?;
        if value > max {
            return Err(ProviderError::InvalidArgument {
                index,
                name,
                expected,
                value: raw.clone(),
            });
        }
        Ok(value)
    }

    /// Optional boolean flag. Accepts `true/false`, `yes/no`, `on/off`, `1/0`.
    pub fn flag(&self, index: usize, name: &'static str, default: bool) -> Result<bool, ProviderError> {
        let Some(raw) = self.args.get(index) else {
            return Ok(default);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ProviderError::InvalidArgument {
                index,
                name,
                expected: "a boolean",
                value: raw.clone(),
            }),
        }
    }
}

fn parse<T: FromStr>(
    raw: &str,
    index: usize,
    name: &'static str,
    expected: &'static str,
) -> Result<T, ProviderError> {
    raw.parse().map_err(|_| ProviderError::InvalidArgument {
        index,
        name,
        expected,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_required_and_optional() {
        let raw = strings(&["5", "x"]);
        let args = Args::new(&raw);

        assert_eq!(args.required::<i64>(0, "min", "an integer").unwrap(), 5);
        assert_eq!(args.optional::<u32>(2, "levels", "an integer", 1).unwrap(), 1);
        assert_eq!(
            args.required::<i64>(1, "max", "an integer").unwrap_err(),
            ProviderError::InvalidArgument {
                index: 1,
                name: "max",
                expected: "an integer",
                value: "x".to_string()
            }
        );
        assert_eq!(
            args.required::<i64>(3, "step", "an integer").unwrap_err(),
            ProviderError::MissingArgument { index: 3, name: "step" }
        );
    }

    #[test]
    fn test_flags() {
        let raw = strings(&["False", "yes", "maybe"]);
        let args = Args::new(&raw);
        assert!(!args.flag(0, "a", true).unwrap());
        assert!(args.flag(1, "b", false).unwrap());
        assert!(args.flag(2, "c", false).is_err());
        assert!(args.flag(3, "d", true).unwrap());
    }

    #[test]
    fn test_optional_at_most() {
        let raw = strings(&["10", "11"]);
        let args = Args::new(&raw);
        assert_eq!(args.optional_at_most::<u32>(0, "n", "0 to 10", 1, 10).unwrap(), 10);
        assert_eq!(args.optional_at_most::<u32>(2, "n", "0 to 10", 1, 10).unwrap(), 1);
        assert_eq!(
            args.optional_at_most::<u32>(1, "n", "0 to 10", 1, 10).unwrap_err(),
            ProviderError::InvalidArgument {
                index: 1,
                name: "n",
                expected: "0 to 10",
                value: "11".to_string()
            }
        );
    }

    #[test]
    fn test_at_most() {
        let raw = strings(&["1", "2", "3"]);
        assert!(Args::new(&raw).at_most(3).is_ok());
        assert_eq!(
            Args::new(&raw).at_most(2).unwrap_err(),
            ProviderError::TooManyArguments { max: 2, got: 3 }
        );
    }
}
