//! Network-flavoured providers: MAC and IP addresses, host names, URIs.

use super::args::Args;
use crate::error::{ProviderError, ProviderLoadError};
use crate::provider::ProviderModule;
use rlog_core::Value;
use rlog_faker::Faker;

pub fn module() -> Result<ProviderModule, ProviderLoadError> {
    ProviderModule::builder("network")
        .function("randmac", randmac)
        .function("randippub", randippub)
        .function("randippriv", randippriv)
        .function("randhostname", randhostname)
        .function("randuri", randuri)
        .build()
}

pub fn randmac(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.mac_address()))
}

pub fn randippub(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.ipv4_public()))
}

pub fn randippriv(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.ipv4_private()))
}

/// Deepest subdomain nesting `randhostname` accepts.
pub const MAX_HOSTNAME_LEVELS: u32 = 127;

/// `randhostname [levels=1]`
pub fn randhostname(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(1)?;
    let levels: u32 =
        args.optional_at_most(0, "levels", "an integer from 0 to 127", 1, MAX_HOSTNAME_LEVELS)?;
    Ok(Value::String(faker.hostname(levels)))
}

pub fn randuri(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.uri()))
}
