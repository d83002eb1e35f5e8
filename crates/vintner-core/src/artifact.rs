//! Model and imputer artifacts
//!
//! The prediction service only sees two capabilities:
//!
//! - [`Imputer`]: fills missing (NaN) cells of a frame
//! - [`Regressor`]: maps each row of a frame to a score
//!
//! Trained artifacts are stored as tagged JSON documents. Every artifact
//! records the `feature_names` it was fitted on and rejects frames whose
//! columns differ.
//!
//! ```json
//! {
//!   "kind": "simple",
//!   "strategy": "mean",
//!   "feature_names": ["fixed acidity", "..."],
//!   "statistics": [8.32, "..."]
//! }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::frame::FeatureFrame;

/// Fills missing values in a frame.
pub trait Imputer: Send + Sync {
    /// Return a frame of the same shape with NaN cells filled.
    fn transform(&self, frame: &FeatureFrame) -> Result<FeatureFrame, ArtifactError>;

    /// Column names the imputer was fitted on.
    fn feature_names(&self) -> &[String];
}

/// Predicts a continuous score per row.
pub trait Regressor: Send + Sync {
    /// One score per input row.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>, ArtifactError>;

    /// Column names the model was fitted on.
    fn feature_names(&self) -> &[String];
}

// ============================================================================
// Imputer artifacts
// ============================================================================

/// Serialized imputer document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImputerArtifact {
    Simple(SimpleImputer),
}

impl ImputerArtifact {
    /// Check internal consistency and return the usable imputer.
    pub fn into_imputer(self) -> Result<Box<dyn Imputer>, ArtifactError> {
        match self {
            ImputerArtifact::Simple(imputer) => {
                imputer.validate()?;
                Ok(Box::new(imputer))
            }
        }
    }
}

/// Strategy the fill values were computed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    #[default]
    Mean,
    Median,
    MostFrequent,
    Constant,
}

/// Column-wise constant fill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleImputer {
    #[serde(default)]
    pub strategy: ImputeStrategy,
    pub feature_names: Vec<String>,
    /// Fill value per column
    pub statistics: Vec<f64>,
}

impl SimpleImputer {
    fn validate(&self) -> Result<(), ArtifactError> {
        if self.statistics.len() != self.feature_names.len() {
            return Err(ArtifactError::Invalid(format!(
                "imputer has {} statistics for {} features",
                self.statistics.len(),
                self.feature_names.len()
            )));
        }
        if let Some(i) = self.statistics.iter().position(|s| !s.is_finite()) {
            return Err(ArtifactError::Invalid(format!(
                "imputer statistic for `{}` is not finite",
                self.feature_names[i]
            )));
        }
        Ok(())
    }
}

impl Imputer for SimpleImputer {
    fn transform(&self, frame: &FeatureFrame) -> Result<FeatureFrame, ArtifactError> {
        frame.require_columns(&self.feature_names)?;

        let rows = frame
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.statistics)
                    .map(|(&x, &fill)| if x.is_nan() { fill } else { x })
                    .collect()
            })
            .collect();

        frame.with_rows(rows)
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

// ============================================================================
// Model artifacts
// ============================================================================

/// Serialized model document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    /// Check internal consistency and return the usable model.
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, ArtifactError> {
        match self {
            ModelArtifact::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ModelArtifact::Forest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

/// Ordinary least squares: `intercept + coefficients · x`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(ArtifactError::Invalid(format!(
                "linear model has {} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>, ArtifactError> {
        frame.require_columns(&self.feature_names)?;
        reject_missing(frame)?;

        Ok(frame
            .rows()
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Averaged ensemble of regression trees (random forest)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub feature_names: Vec<String>,
    pub trees: Vec<RegressionTree>,
}

/// Flat array of nodes; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

/// A split or a leaf
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl ForestModel {
    fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid("forest has no trees".to_string()));
        }
        let n_features = self.feature_names.len();
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|msg| ArtifactError::Invalid(format!("tree {t}: {msg}")))?;
        }
        Ok(())
    }
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".to_string());
        }
        let n_nodes = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= n_features {
                    return Err(format!("node {i} splits on feature {feature}"));
                }
                // Children must come after their parent, which also rules out cycles
                if left <= i || right <= i || left >= n_nodes || right >= n_nodes {
                    return Err(format!("node {i} has invalid children {left}/{right}"));
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl Regressor for ForestModel {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>, ArtifactError> {
        frame.require_columns(&self.feature_names)?;
        reject_missing(frame)?;

        let n_trees = self.trees.len() as f64;
        Ok(frame
            .rows()
            .iter()
            .map(|row| self.trees.iter().map(|t| t.evaluate(row)).sum::<f64>() / n_trees)
            .collect())
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn reject_missing(frame: &FeatureFrame) -> Result<(), ArtifactError> {
    for row in frame.rows() {
        if let Some(i) = row.iter().position(|x| x.is_nan()) {
            return Err(ArtifactError::MissingValue(frame.columns()[i].clone()));
        }
    }
    Ok(())
}

// ============================================================================
// Loading
// ============================================================================

/// Load an imputer artifact from a JSON file.
pub fn load_imputer(path: impl AsRef<Path>) -> Result<Box<dyn Imputer>, ArtifactError> {
    let artifact: ImputerArtifact = read_json(path.as_ref())?;
    artifact.into_imputer()
}

/// Load a model artifact from a JSON file.
pub fn load_model(path: impl AsRef<Path>) -> Result<Box<dyn Regressor>, ArtifactError> {
    let artifact: ModelArtifact = read_json(path.as_ref())?;
    artifact.into_regressor()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
        path: path_str.clone(),
        message: e.to_string(),
    })?;
    let parsed = serde_json::from_str(&content).map_err(|e| ArtifactError::Decode {
        path: path_str.clone(),
        message: e.to_string(),
    })?;
    tracing::info!("Loaded artifact from {}", path_str);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    fn frame(rows: Vec<Vec<f64>>) -> FeatureFrame {
        FeatureFrame::new(names(&["a", "b"]), rows).unwrap()
    }

    #[test]
    fn test_simple_imputer_fills_nan() {
        let imputer = SimpleImputer {
            strategy: ImputeStrategy::Mean,
            feature_names: names(&["a", "b"]),
            statistics: vec![1.5, -2.0],
        };
        let out = imputer
            .transform(&frame(vec![vec![f64::NAN, 3.0], vec![4.0, f64::NAN]]))
            .unwrap();
        assert_eq!(out.rows(), [vec![1.5, 3.0], vec![4.0, -2.0]]);
        assert_eq!(out.columns(), ["a", "b"]);
    }

    #[test]
    fn test_imputer_rejects_other_columns() {
        let imputer = SimpleImputer {
            strategy: ImputeStrategy::Median,
            feature_names: names(&["b", "a"]),
            statistics: vec![0.0, 0.0],
        };
        assert!(matches!(
            imputer.transform(&frame(vec![vec![1.0, 2.0]])),
            Err(ArtifactError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_linear_predict() {
        let model = LinearModel {
            feature_names: names(&["a", "b"]),
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        let out = model
            .predict(&frame(vec![vec![1.0, 1.0], vec![3.0, 0.0]]))
            .unwrap();
        assert_eq!(out, vec![1.5, 6.5]);
    }

    #[test]
    fn test_model_rejects_nan() {
        let model = LinearModel {
            feature_names: names(&["a", "b"]),
            coefficients: vec![1.0, 1.0],
            intercept: 0.0,
        };
        let err = model.predict(&frame(vec![vec![1.0, f64::NAN]])).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingValue(ref c) if c == "b"));
    }

    #[test]
    fn test_forest_averages_trees() {
        let json = r#"{
            "kind": "forest",
            "feature_names": ["a", "b"],
            "trees": [
                {"nodes": [
                    {"feature": 0, "threshold": 5.0, "left": 1, "right": 2},
                    {"value": 4.0},
                    {"value": 8.0}
                ]},
                {"nodes": [{"value": 6.0}]}
            ]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        let model = artifact.into_regressor().unwrap();
        let out = model
            .predict(&frame(vec![vec![5.0, 0.0], vec![5.1, 0.0]]))
            .unwrap();
        assert_eq!(out, vec![5.0, 7.0]);
    }

    #[test]
    fn test_forest_validation() {
        let bad_child = r#"{
            "kind": "forest",
            "feature_names": ["a"],
            "trees": [{"nodes": [{"feature": 0, "threshold": 1.0, "left": 0, "right": 1}, {"value": 1.0}]}]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(bad_child).unwrap();
        assert!(matches!(
            artifact.into_regressor(),
            Err(ArtifactError::Invalid(_))
        ));

        let bad_feature = r#"{
            "kind": "forest",
            "feature_names": ["a"],
            "trees": [{"nodes": [{"feature": 3, "threshold": 1.0, "left": 1, "right": 2}, {"value": 1.0}, {"value": 2.0}]}]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(bad_feature).unwrap();
        assert!(artifact.into_regressor().is_err());

        let empty = r#"{"kind": "forest", "feature_names": ["a"], "trees": []}"#;
        let artifact: ModelArtifact = serde_json::from_str(empty).unwrap();
        assert!(artifact.into_regressor().is_err());
    }

    #[test]
    fn test_linear_validation() {
        let json = r#"{"kind": "linear", "feature_names": ["a", "b"], "coefficients": [1.0], "intercept": 0.0}"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(matches!(
            artifact.into_regressor(),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn test_imputer_strategy_defaults_to_mean() {
        let json = r#"{"kind": "simple", "feature_names": ["a"], "statistics": [1.0]}"#;
        let artifact: ImputerArtifact = serde_json::from_str(json).unwrap();
        let ImputerArtifact::Simple(imputer) = artifact;
        assert_eq!(imputer.strategy, ImputeStrategy::Mean);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_model("/nonexistent/model.json").err().unwrap();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
