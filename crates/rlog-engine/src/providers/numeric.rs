//! Numeric providers and plain argument choice.

use super::args::Args;
use crate::error::{ProviderError, ProviderLoadError};
use crate::provider::ProviderModule;
use rand::seq::SliceRandom;
use rlog_core::Value;
use rlog_faker::Faker;

pub fn module() -> Result<ProviderModule, ProviderLoadError> {
    ProviderModule::builder("numeric")
        .function("randint", randint)
        .function("randfloat", randfloat)
        .function("randchoice", randchoice)
        .build()
}

/// `randint <min> <max>`, both ends included.
pub fn randint(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(2)?;
    let min: i64 = args.required(0, "min", "an integer")?;
    let max: i64 = args.required(1, "max", "an integer")?;
    Ok(Value::Int(faker.random_int(min, max)?))
}

/// `randfloat <min> <max> [decimals]`
pub fn randfloat(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(3)?;
    let min: f64 = args.required(0, "min", "a number")?;
    let max: f64 = args.required(1, "max", "a number")?;
    let value = faker.random_float(min, max)?;

    if args.len() < 3 {
        return Ok(Value::Float(value));
    }
    let decimals: u32 = args.required(2, "decimals", "a non-negative integer")?;
    let factor = 10f64.powi(decimals.min(15) as i32);
    Ok(Value::Float((value * factor).round() / factor))
}

/// `randchoice <a> [b]...`: one of the arguments, as a string.
pub fn randchoice(_faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let choice = args
        .choose(&mut rand::thread_rng())
        .ok_or(ProviderError::MissingArgument {
            index: 0,
            name: "choice",
        })?;
    Ok(Value::String(choice.clone()))
}
