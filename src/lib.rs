//! Tengyur Lint
//!
//! A checker for digitized volumes of the Derge Tengyur.
//!
//! This library provides:
//! - Page locator parsing and ordering checks
//! - Rule-based orthography and punctuation scanning
//! - Variant reading resolution and verse meter checks
//! - Report formatting and batch processing

pub mod config;
pub mod driver;
pub mod parser;
pub mod report;
pub mod rules;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use driver::{run, RunSummary};
pub use parser::{parse_locator, Locator, ParsedLocator};
pub use report::{Category, Diagnostic, Report};
pub use rules::RuleCatalog;
pub use validation::{Options, Validator};
