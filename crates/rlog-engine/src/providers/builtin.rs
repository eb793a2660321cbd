//! The core namespace: functions looked up before any provider module.

use super::args::Args;
use crate::error::{ProviderError, ProviderLoadError};
use crate::provider::ProviderModule;
use crate::registry::CORE_MODULE;
use chrono::{Duration, Utc};
use rlog_core::Value;
use rlog_faker::Faker;

/// Default look-back window for [`timestamp`], in days.
pub const DEFAULT_TIMESTAMP_WINDOW_DAYS: u32 = 30;

pub fn module() -> Result<ProviderModule, ProviderLoadError> {
    ProviderModule::builder(CORE_MODULE)
        .function("timestamp", timestamp)
        .build()
}

/// Epoch seconds of a random moment in the last N days (default 30).
pub fn timestamp(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(1)?;
    let days: u32 = args.optional(0, "days", "a non-negative integer", DEFAULT_TIMESTAMP_WINDOW_DAYS)?;

    let end = Utc::now();
    let start = Duration::try_days(i64::from(days))
        .and_then(|window| end.checked_sub_signed(window))
        .ok_or_else(|| ProviderError::InvalidArgument {
            index: 0,
            name: "days",
            expected: "a window within the supported date range",
            value: days.to_string(),
        })?;
    Ok(Value::Int(faker.unix_time(start, end)))
}
