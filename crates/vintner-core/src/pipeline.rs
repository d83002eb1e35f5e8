//! Request pipeline
//!
//! One submission: parse → impute + predict → classify. Each call is
//! independent; nothing is remembered between submissions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::VintnerConfig;
use crate::error::{ParseError, PredictionError, VintnerError};
use crate::parse::parse_features;
use crate::predict::{Prediction, PredictionService};
use crate::quality::{classify, QualityBand, Severity};
use crate::schema::FeatureSchema;

/// A successful prediction with its verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub prediction: Prediction,
    pub band: QualityBand,
}

/// What a submission produced, ready for display
#[derive(Debug)]
pub enum Outcome {
    /// Scores and verdict
    Assessed(Assessment),
    /// The input was unusable; the user can correct it
    Rejected(ParseError),
    /// The artifacts failed on a well-formed sample
    Failed(PredictionError),
}

/// A single styled message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Outcome {
    /// The message to show for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            Outcome::Assessed(assessment) => Notice {
                severity: assessment.band.severity(),
                text: assessment.band.message(),
            },
            Outcome::Rejected(err) => Notice {
                severity: if err.is_empty_input() {
                    Severity::Warning
                } else {
                    Severity::Error
                },
                text: err.display_message(),
            },
            Outcome::Failed(err) => Notice {
                severity: Severity::Error,
                text: format!("Unexpected error: {err}"),
            },
        }
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match self {
            Outcome::Assessed(assessment) => Some(assessment),
            _ => None,
        }
    }
}

/// Parser, prediction service, and classifier wired together
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema: &'static FeatureSchema,
    service: Arc<PredictionService>,
}

impl Pipeline {
    pub fn new(schema: &'static FeatureSchema, service: Arc<PredictionService>) -> Self {
        Self { schema, service }
    }

    /// Load the configured artifacts for the wine schema.
    pub fn from_config(config: &VintnerConfig) -> Result<Self, VintnerError> {
        let schema = FeatureSchema::wine();
        let service =
            PredictionService::load(&config.artifacts.model, &config.artifacts.imputer, schema)?;
        Ok(Self::new(schema, Arc::new(service)))
    }

    pub fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }

    /// Run one submission, returning typed errors.
    pub fn run(&self, input: &str) -> Result<Assessment, VintnerError> {
        let features = parse_features(input, self.schema)?;
        let prediction = self.service.predict(&features)?;
        Ok(assess(prediction))
    }

    /// Run one submission and fold the result into a displayable outcome.
    pub fn submit(&self, input: &str) -> Outcome {
        let features = match parse_features(input, self.schema) {
            Ok(features) => features,
            Err(err) => {
                tracing::debug!("Rejected input: {}", err);
                return Outcome::Rejected(err);
            }
        };

        match self.service.predict(&features) {
            Ok(prediction) => Outcome::Assessed(assess(prediction)),
            Err(err) => {
                tracing::warn!("Prediction failed: {}", err);
                Outcome::Failed(err)
            }
        }
    }
}

fn assess(prediction: Prediction) -> Assessment {
    let band = classify(prediction.rounded);
    tracing::debug!(
        "Predicted {:.2} (rounded {}) -> {:?}",
        prediction.raw,
        prediction.rounded,
        band
    );
    Assessment { prediction, band }
}
