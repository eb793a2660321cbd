//! rlog-generator library
//!
//! Generates fake log lines from YAML-configured patterns. Each pattern has a
//! template such as `"{0:%b %d %H:%M:%S} {host} sshd: {msg}"` and a field map
//! whose entries are either provider function calls (`func_randhostname 2`)
//! or literal choice lists (`[ACCEPT, DROP]`).
//!
//! # Crates
//!
//! - `rlog_faker` - locale-aware random values
//! - `rlog_core` - values, field specifications, templates and configuration
//! - `rlog_engine` - provider registry, resolution and rendering
//!
//! # CLI Usage
//!
//! ```bash
//! # Run every enabled pattern until its configured time elapses
//! rlog-generator generate --config patterns.yaml
//!
//! # Ten lines of one pattern, Italian locale
//! rlog-generator generate --config patterns.yaml --pattern firewall --count 10 --locale it_IT
//!
//! # Show available functions
//! rlog-generator list-functions --json
//! ```

pub mod config;
pub mod driver;
pub mod functions;

pub use driver::{run_generate, GenerateArgs};
pub use functions::{run_list_functions, ListFunctionsArgs};
