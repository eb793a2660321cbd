//! Identity providers: UUIDs, people, mailboxes, credentials.

use super::args::Args;
use crate::error::{ProviderError, ProviderLoadError};
use crate::provider::ProviderModule;
use rlog_core::Value;
use rlog_faker::Faker;

pub fn module() -> Result<ProviderModule, ProviderLoadError> {
    ProviderModule::builder("identity")
        .function("randuuid", randuuid)
        .function("randusername", randusername)
        .function("randname", randname)
        .function("randfreeemail", randfreeemail)
        .function("randcompanyemail", randcompanyemail)
        .function("randcity", randcity)
        .function("randpassword", randpassword)
        .build()
}

pub fn randuuid(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.uuid4()))
}

pub fn randusername(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.user_name()))
}

pub fn randname(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.name()))
}

pub fn randfreeemail(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.free_email()))
}

pub fn randcompanyemail(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::String(faker.company_email()))
}

pub fn randcity(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    Args::new(args).at_most(0)?;
    Ok(Value::from(faker.city()))
}

/// Longest password `randpassword` accepts.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

/// `randpassword [length=8] [special_chars=true] [digits=true]`
pub fn randpassword(faker: &Faker, args: &[String]) -> Result<Value, ProviderError> {
    let args = Args::new(args).at_most(3)?;
    let length: usize =
        args.optional_at_most(0, "length", "an integer from 0 to 4096", 8, MAX_PASSWORD_LENGTH)?;
    let special_chars = args.flag(1, "special_chars", true)?;
    let digits = args.flag(2, "digits", true)?;
    Ok(Value::String(faker.password(length, special_chars, digits)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlog_faker::Locale;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_randpassword_arguments() {
        let faker = Faker::default();
        let Value::String(pw) = randpassword(&faker, &strings(&["16", "false", "false"])).unwrap()
        else {
            panic!("Expected String value");
        };
        assert_eq!(pw.len(), 16);
        assert!(pw.chars().all(|c| c.is_ascii_alphabetic()));

        let Value::String(pw) = randpassword(&faker, &[]).unwrap() else {
            panic!("Expected String value");
        };
        assert_eq!(pw.len(), 8);
    }

    #[test]
    fn test_randpassword_caps_length() {
        let faker = Faker::default();
        assert!(randpassword(&faker, &strings(&["4096"])).is_ok());
        assert!(matches!(
            randpassword(&faker, &strings(&["1000000000000"])),
            Err(ProviderError::InvalidArgument { name: "length", .. })
        ));
    }

    #[test]
    fn test_randfreeemail_follows_locale() {
        let faker = Faker::new(Locale::ItIt);
        for _ in 0..20 {
            let Value::String(email) = randfreeemail(&faker, &[]).unwrap() else {
                panic!("Expected String value");
            };
            assert!(email.ends_with(".it"), "{email}");
        }
    }

    #[test]
    fn test_randuuid_shape() {
        let Value::String(id) = randuuid(&Faker::default(), &[]).unwrap() else {
            panic!("Expected String value");
        };
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }
}
