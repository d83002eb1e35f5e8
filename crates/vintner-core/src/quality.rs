//! Quality bands
//!
//! Buckets the rounded quality score into three verdicts:
//! - `<= 5`: Low
//! - `6`: Medium
//! - `>= 7`: High

use serde::{Deserialize, Serialize};

/// Qualitative verdict for a predicted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityBand {
    Low,
    Medium,
    High,
}

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Map a rounded score to its band.
pub fn classify(rounded_score: i64) -> QualityBand {
    match rounded_score {
        i64::MIN..=5 => QualityBand::Low,
        6 => QualityBand::Medium,
        _ => QualityBand::High,
    }
}

impl QualityBand {
    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Low quality",
            Self::Medium => "Medium quality",
            Self::High => "High quality",
        }
    }

    /// One-sentence interpretation shown under the scores.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "The wine has significant flaws or lacks desirable characteristics.",
            Self::Medium => "The wine is acceptable but not exceptional.",
            Self::High => "The wine has excellent characteristics!",
        }
    }

    pub fn message(&self) -> String {
        format!("{} - {}", self.display_name(), self.description())
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Low => Severity::Error,
            Self::Medium => Severity::Warning,
            Self::High => Severity::Success,
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
