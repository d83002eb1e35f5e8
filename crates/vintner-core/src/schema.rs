//! Feature schema
//!
//! The ordered list of physicochemical measurements the model was trained
//! on. Casing matters to the model; user input is matched case-insensitively.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::error::SchemaError;

/// Training column names of the wine quality model, in order.
pub const WINE_FEATURES: [&str; 11] = [
    "fixed acidity",
    "volatile acidity",
    "citric acid",
    "residual sugar",
    "chlorides",
    "free sulfur dioxide",
    "total sulfur dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
];

lazy_static! {
    static ref WINE_SCHEMA: FeatureSchema = FeatureSchema {
        names: WINE_FEATURES.iter().map(|s| s.to_string()).collect(),
    };
}

/// Ordered, duplicate-free set of feature names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from names in canonical casing.
    ///
    /// Names must be non-empty as a set and unique ignoring case, since
    /// lookups from user input are case-insensitive.
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.to_lowercase()) {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// The process-wide wine schema.
    pub fn wine() -> &'static FeatureSchema {
        &WINE_SCHEMA
    }

    /// Canonical names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Blank input template: every feature followed by `": "`, one per line.
    pub fn template(&self) -> String {
        self.names
            .iter()
            .map(|name| format!("{name}: "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
