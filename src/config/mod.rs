//! Configuration helpers used by the driver.

mod duration;

pub use duration::{parse_duration_to_secs, to_duration};
