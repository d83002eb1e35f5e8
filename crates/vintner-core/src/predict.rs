//! Prediction service
//!
//! Runs one parsed sample through the imputer and the model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::{load_imputer, load_model, Imputer, Regressor};
use crate::error::{ArtifactError, PredictionError};
use crate::frame::FeatureVector;
use crate::schema::FeatureSchema;

/// Scores for one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Model output as-is
    pub raw: f64,
    /// Raw score rounded to 2 decimal places
    pub score: f64,
    /// Raw score rounded to the nearest integer, ties to even
    pub rounded: i64,
}

impl Prediction {
    pub fn from_raw(raw: f64) -> Self {
        Self {
            raw,
            score: (raw * 100.0).round_ties_even() / 100.0,
            rounded: raw.round_ties_even() as i64,
        }
    }

    /// The 2-decimal score as shown to the user.
    pub fn display_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Imputer + model pair, validated against a schema
pub struct PredictionService {
    imputer: Box<dyn Imputer>,
    model: Box<dyn Regressor>,
}

impl PredictionService {
    /// Combine artifacts, checking both were fitted on `schema` exactly.
    pub fn new(
        imputer: Box<dyn Imputer>,
        model: Box<dyn Regressor>,
        schema: &FeatureSchema,
    ) -> Result<Self, ArtifactError> {
        check_fitted_on(imputer.feature_names(), schema)?;
        check_fitted_on(model.feature_names(), schema)?;
        Ok(Self { imputer, model })
    }

    /// Load both artifacts from disk.
    pub fn load(
        model_path: impl AsRef<Path>,
        imputer_path: impl AsRef<Path>,
        schema: &FeatureSchema,
    ) -> Result<Self, ArtifactError> {
        let model = load_model(model_path)?;
        let imputer = load_imputer(imputer_path)?;
        Self::new(imputer, model, schema)
    }

    /// Impute and predict a single sample.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        let frame = features.to_frame();
        let imputed = self
            .imputer
            .transform(&frame)
            .map_err(PredictionError::Imputer)?;
        let output = self
            .model
            .predict(&imputed)
            .map_err(PredictionError::Model)?;

        let raw = match output.as_slice() {
            [raw] => *raw,
            other => return Err(PredictionError::OutputShape(other.len())),
        };
        if !raw.is_finite() {
            return Err(PredictionError::NonFinite(raw));
        }

        tracing::debug!("Model scored sample at {:.4}", raw);
        Ok(Prediction::from_raw(raw))
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("features", &self.model.feature_names())
            .finish()
    }
}

fn check_fitted_on(fitted: &[String], schema: &FeatureSchema) -> Result<(), ArtifactError> {
    if fitted != schema.names() {
        return Err(ArtifactError::SchemaMismatch {
            expected: fitted.to_vec(),
            actual: schema.names().to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ImputeStrategy, LinearModel, SimpleImputer};
    use crate::frame::FeatureFrame;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec!["a".to_string(), "b".to_string()]).unwrap()
    }

    fn imputer() -> Box<dyn Imputer> {
        Box::new(SimpleImputer {
            strategy: ImputeStrategy::Mean,
            feature_names: schema().names().to_vec(),
            statistics: vec![10.0, 20.0],
        })
    }

    fn linear(intercept: f64) -> Box<dyn Regressor> {
        Box::new(LinearModel {
            feature_names: schema().names().to_vec(),
            coefficients: vec![0.1, 0.01],
            intercept,
        })
    }

    fn vector(a: f64, b: f64) -> FeatureVector {
        let mut v = FeatureVector::new();
        v.push("a", a);
        v.push("b", b);
        v
    }

    /// Always returns the configured output.
    struct FixedModel {
        output: Vec<f64>,
        names: Vec<String>,
    }

    fn fixed(output: Vec<f64>) -> Box<dyn Regressor> {
        Box::new(FixedModel {
            output,
            names: schema().names().to_vec(),
        })
    }

    impl Regressor for FixedModel {
        fn predict(&self, _frame: &FeatureFrame) -> Result<Vec<f64>, ArtifactError> {
            Ok(self.output.clone())
        }

        fn feature_names(&self) -> &[String] {
            &self.names
        }
    }

    #[test]
    fn test_predict_linear() {
        let service = PredictionService::new(imputer(), linear(5.0), &schema()).unwrap();
        let p = service.predict(&vector(10.0, 20.0)).unwrap();
        assert!((p.raw - 6.2).abs() < 1e-9);
        assert_eq!(p.rounded, 6);
        assert_eq!(p.display_score(), "6.20");
    }

    #[test]
    fn test_predict_imputes_nan() {
        let service = PredictionService::new(imputer(), linear(0.0), &schema()).unwrap();
        let p = service.predict(&vector(f64::NAN, 0.0)).unwrap();
        assert!((p.raw - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_ties_to_even() {
        assert_eq!(Prediction::from_raw(5.5).rounded, 6);
        assert_eq!(Prediction::from_raw(6.5).rounded, 6);
        assert_eq!(Prediction::from_raw(6.51).rounded, 7);
        assert_eq!(Prediction::from_raw(5.4999).rounded, 5);
        assert_eq!(Prediction::from_raw(5.678).score, 5.68);
    }

    #[test]
    fn test_display_score_follows_rounded_score() {
        for (raw, shown) in [
            (3.135, "3.14"),
            (3.145, "3.14"),
            (6.165, "6.16"),
            (7.175, "7.18"),
        ] {
            let p = Prediction::from_raw(raw);
            assert_eq!(p.display_score(), shown, "raw {raw}");
            assert_eq!(p.display_score(), format!("{:.2}", p.score));
        }
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let other = FeatureSchema::new(vec!["b".to_string(), "a".to_string()]).unwrap();
        let err = PredictionService::new(imputer(), linear(0.0), &other).unwrap_err();
        assert!(matches!(err, ArtifactError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_wrong_output_shape() {
        let service = PredictionService::new(imputer(), fixed(vec![]), &schema()).unwrap();
        assert!(matches!(
            service.predict(&vector(1.0, 1.0)),
            Err(PredictionError::OutputShape(0))
        ));
    }

    #[test]
    fn test_non_finite_output() {
        let service =
            PredictionService::new(imputer(), fixed(vec![f64::INFINITY]), &schema()).unwrap();
        assert!(matches!(
            service.predict(&vector(1.0, 1.0)),
            Err(PredictionError::NonFinite(_))
        ));
    }

    #[test]
    fn test_artifact_error_is_wrapped() {
        let service = PredictionService::new(imputer(), linear(0.0), &schema()).unwrap();
        let mut wrong = FeatureVector::new();
        wrong.push("b", 1.0);
        wrong.push("a", 1.0);
        let err = service.predict(&wrong).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Imputer(ArtifactError::FeatureMismatch { .. })
        ));
        assert!(err
            .to_string()
            .starts_with("imputer failed: Feature names mismatch"));
    }
}
