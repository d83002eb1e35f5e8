//! Feature vectors and tabular frames
//!
//! A [`FeatureVector`] is one parsed sample keyed by canonical feature name.
//! A [`FeatureFrame`] is the row-major table shape the artifacts consume.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// A single named measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Canonical (schema-cased) name
    pub name: String,
    /// Measured value
    pub value: f64,
}

/// One sample: an ordered mapping from canonical feature name to value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    features: Vec<Feature>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature; order of insertion is preserved.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.features.push(Feature {
            name: name.into(),
            value,
        });
    }

    /// Look up a value by canonical name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<f64> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.value).collect()
    }

    /// Serialize back to `name: value` lines, one per feature.
    pub fn to_lines(&self) -> String {
        self.features
            .iter()
            .map(|f| format!("{}: {}", f.name, f.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// View this sample as a single-row frame.
    pub fn to_frame(&self) -> FeatureFrame {
        FeatureFrame {
            columns: self.features.iter().map(|f| f.name.clone()).collect(),
            rows: vec![self.values()],
        }
    }
}

/// Row-major table with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    /// Build a frame, checking every row has one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, ArtifactError> {
        if let Some(row) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(ArtifactError::Invalid(format!(
                "row has {} cells, frame has {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Fail unless the column names equal `expected` in order.
    pub fn require_columns(&self, expected: &[String]) -> Result<(), ArtifactError> {
        if self.columns != expected {
            return Err(ArtifactError::FeatureMismatch {
                expected: expected.to_vec(),
                actual: self.columns.clone(),
            });
        }
        Ok(())
    }

    /// Replace the cells, keeping the column names.
    pub fn with_rows(&self, rows: Vec<Vec<f64>>) -> Result<Self, ArtifactError> {
        Self::new(self.columns.clone(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        let mut v = FeatureVector::new();
        v.push("density", 0.9978);
        v.push("pH", 3.51);
        v
    }

    #[test]
    fn test_get_is_case_sensitive() {
        let v = sample();
        assert_eq!(v.get("pH"), Some(3.51));
        assert_eq!(v.get("ph"), None);
    }

    #[test]
    fn test_to_lines() {
        assert_eq!(sample().to_lines(), "density: 0.9978\npH: 3.51");
    }

    #[test]
    fn test_to_frame_single_row() {
        let frame = sample().to_frame();
        assert_eq!(frame.columns(), ["density", "pH"]);
        assert_eq!(frame.rows(), [vec![0.9978, 3.51]]);
    }

    #[test]
    fn test_require_columns_order_matters() {
        let frame = sample().to_frame();
        let swapped = vec!["pH".to_string(), "density".to_string()];
        assert!(matches!(
            frame.require_columns(&swapped),
            Err(ArtifactError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = FeatureFrame::new(vec!["a".to_string()], vec![vec![1.0, 2.0]]);
        assert!(matches!(result, Err(ArtifactError::Invalid(_))));
    }
}
