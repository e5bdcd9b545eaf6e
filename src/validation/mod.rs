//! Volume Validation
//!
//! Line-by-line checks for etext volumes: pagination ordering, rule
//! scanning, variant resolution and verse meter tracking.

pub mod engine;
pub mod variants;
pub mod verses;

pub use engine::{Options, ParseState, Validator, VolumeSummary};
pub use variants::{resolve_variants, Resolution, VariantChoice, TSHEG};
pub use verses::{MeterDeviation, VerseState, METER};
