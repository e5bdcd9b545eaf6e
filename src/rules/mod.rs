//! Rule System
//!
//! Declarative orthographic rules, loaded from TOML and compiled once.

pub mod catalog;
pub mod schema;

pub use catalog::RuleCatalog;
pub use schema::{Rule, RuleDef, RuleFile, RuleHit, RulesetMeta};
