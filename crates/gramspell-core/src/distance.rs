// String-distance strategies
//
// Every strategy maps a pair of words to a similarity in [0, 1] where 1.0
// means identical. The suggestion ranker compares these values against its
// acceptance threshold, so all strategies must share that scale.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A normalized string similarity measure.
pub trait StringDistance: Send + Sync + fmt::Debug {
    /// Similarity between `target` and `other`: 1.0 for equal strings,
    /// falling toward 0.0 as they diverge.
    fn distance(&self, target: &str, other: &str) -> f32;

    /// Short stable name, used in logs and configuration.
    fn name(&self) -> &'static str;
}

/// Edit distance normalized by the longer word: `1 - d / max(len)`.
///
/// This is the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinDistance;

impl StringDistance for LevenshteinDistance {
    fn distance(&self, target: &str, other: &str) -> f32 {
        strsim::normalized_levenshtein(target, other) as f32
    }

    fn name(&self) -> &'static str {
        DistanceKind::Levenshtein.as_str()
    }
}

/// Like [`LevenshteinDistance`], but an adjacent transposition costs one edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshteinDistance;

impl StringDistance for DamerauLevenshteinDistance {
    fn distance(&self, target: &str, other: &str) -> f32 {
        strsim::normalized_damerau_levenshtein(target, other) as f32
    }

    fn name(&self) -> &'static str {
        DistanceKind::DamerauLevenshtein.as_str()
    }
}

/// Jaro-Winkler similarity, which rewards a shared prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerDistance;

impl StringDistance for JaroWinklerDistance {
    fn distance(&self, target: &str, other: &str) -> f32 {
        strsim::jaro_winkler(target, other) as f32
    }

    fn name(&self) -> &'static str {
        DistanceKind::JaroWinkler.as_str()
    }
}

/// Error returned when a distance strategy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown string distance: {0} (expected levenshtein, damerau-levenshtein or jaro-winkler)")]
pub struct ParseDistanceError(pub String);

/// Named selection of a built-in strategy, for configuration files and
/// command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    #[default]
    Levenshtein,
    DamerauLevenshtein,
    JaroWinkler,
}

impl DistanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceKind::Levenshtein => "levenshtein",
            DistanceKind::DamerauLevenshtein => "damerau-levenshtein",
            DistanceKind::JaroWinkler => "jaro-winkler",
        }
    }

    /// Instantiate the strategy.
    pub fn build(self) -> Arc<dyn StringDistance> {
        match self {
            DistanceKind::Levenshtein => Arc::new(LevenshteinDistance),
            DistanceKind::DamerauLevenshtein => Arc::new(DamerauLevenshteinDistance),
            DistanceKind::JaroWinkler => Arc::new(JaroWinklerDistance),
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceKind {
    type Err = ParseDistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "levenshtein" | "levenstein" => Ok(DistanceKind::Levenshtein),
            "damerau-levenshtein" | "damerau" => Ok(DistanceKind::DamerauLevenshtein),
            "jaro-winkler" | "jarowinkler" => Ok(DistanceKind::JaroWinkler),
            _ => Err(ParseDistanceError(s.to_string())),
        }
    }
}
