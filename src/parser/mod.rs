//! Volume Parser
//!
//! Input decoding and locator parsing, kept free of validation concerns.
//! The engine consumes these pieces line by line.

pub mod lines;
pub mod locator;

pub use lines::normalized_lines;
pub use locator::{parse_locator, Locator, LocatorError, ParsedLocator, Side};
