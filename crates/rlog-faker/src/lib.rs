//! Locale-aware fake value generator.
//!
//! [`Faker`] produces realistic random primitives (names, hosts, addresses,
//! sentences, timestamps) whose flavour depends on the configured [`Locale`].
//! Values come from the thread-local RNG; there is no seeding support.
//!
//! ```rust
//! use rlog_faker::{Faker, Locale};
//!
//! let faker = Faker::new(Locale::ItIt);
//! let email = faker.free_email();
//! assert!(email.contains('@'));
//! ```

mod faker;
mod locale;

pub use faker::Faker;
pub use locale::Locale;

/// Error type for faker operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FakerError {
    /// Locale string did not match any supported locale
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Inverted or empty range
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Float range that is inverted or not finite
    #[error("Invalid float range: min {min}, max {max} (bounds and their span must be finite)")]
    InvalidFloatRange { min: f64, max: f64 },
}
