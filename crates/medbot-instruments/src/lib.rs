//! medbot-instruments
//!
//! Diagnostic test definitions. Pure data — no transport or session state.
//! Defines questions with their answer scores, the score-range grammar used
//! by diagnosis rules, and the catalog of tests loaded at start-up.

pub mod catalog;
pub mod error;
pub mod question;
pub mod scoring;
pub mod test_definition;

pub use catalog::Catalog;
pub use question::Question;
pub use scoring::{Diagnosis, DiagnosisRule, RangeSpec};
pub use test_definition::TestDefinition;
