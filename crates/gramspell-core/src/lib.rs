//! Shared building blocks for the gramspell suggestion engine.
//!
//! - [`distance`] -- normalized string-distance strategies used to re-score
//!   n-gram candidates
//! - [`field`] -- selection of reference-index fields for popularity lookups

pub mod distance;
pub mod field;

pub use distance::{DistanceKind, StringDistance};
pub use field::FieldSelector;
