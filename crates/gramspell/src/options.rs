// Engine configuration

use gramspell_core::DistanceKind;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::{DEFAULT_END_BOOST, DEFAULT_START_BOOST};

/// Default minimum similarity for a suggestion.
pub const DEFAULT_MIN_SCORE: f32 = 0.5;

/// Default minimum reference-index frequency for a suggestion.
pub const DEFAULT_MIN_DOC_FREQ: usize = 1;

/// Construction-time options of a [`SpellChecker`](crate::SpellChecker).
///
/// Every field has a default, so a JSON document only needs to name the
/// options it changes:
///
/// ```
/// use gramspell::SpellOptions;
/// use gramspell_core::DistanceKind;
///
/// let options = SpellOptions::from_json(r#"{ "min_score": 0.7, "distance": "jaro-winkler" }"#).unwrap();
/// assert_eq!(options.min_score, 0.7);
/// assert_eq!(options.distance, DistanceKind::JaroWinkler);
/// assert_eq!(options.start_boost, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellOptions {
    /// Minimum similarity (accuracy), expected in (0, 1). Not enforced.
    pub min_score: f32,
    /// Minimum reference-index frequency when popularity filtering is on.
    pub min_doc_freq: usize,
    /// Boost of the first-gram clause; 0 disables it.
    pub start_boost: f32,
    /// Boost of the last-gram clause; 0 disables it.
    pub end_boost: f32,
    /// String-distance strategy used for re-scoring.
    pub distance: DistanceKind,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            min_doc_freq: DEFAULT_MIN_DOC_FREQ,
            start_boost: DEFAULT_START_BOOST,
            end_boost: DEFAULT_END_BOOST,
            distance: DistanceKind::default(),
        }
    }
}

impl SpellOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
