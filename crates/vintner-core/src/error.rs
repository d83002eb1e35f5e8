//! Error types for vintner-core

use thiserror::Error;

/// Result type alias for vintner operations
pub type Result<T> = std::result::Result<T, VintnerError>;

/// Main error type for vintner operations
#[derive(Error, Debug)]
pub enum VintnerError {
    /// User input could not be turned into a feature vector
    #[error("{}", .0.display_message())]
    Parse(#[from] ParseError),

    /// The model or imputer failed while scoring a sample
    #[error("Unexpected error: {0}")]
    Prediction(#[from] PredictionError),

    /// An artifact could not be loaded or does not fit the schema
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Feature schema is malformed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Input parsing errors
///
/// All variants are user-correctable; the payload is the offending line
/// or the expected feature name, ready for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was entered, or only the unfilled template
    #[error("Please enter values for all wine sample properties.")]
    EmptyInput,

    /// A line has no `:` separator
    #[error("Missing `:` in line: `{line}`")]
    MissingDelimiter { line: String },

    /// The value part of a line is not a number
    #[error("Invalid numeric value in line: `{line}`")]
    InvalidNumber { line: String },

    /// A schema feature is absent from the input
    #[error("Missing required feature: `{feature}`")]
    MissingFeature { feature: String },
}

impl ParseError {
    /// Whether the user simply has not filled the form in yet.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ParseError::EmptyInput)
    }

    /// User-facing text. Format problems carry an `Input format error:`
    /// prefix; an empty form is reported as-is.
    pub fn display_message(&self) -> String {
        if self.is_empty_input() {
            self.to_string()
        } else {
            format!("Input format error: {self}")
        }
    }
}

/// Failures raised while imputing or predicting
#[derive(Error, Debug)]
pub enum PredictionError {
    /// The imputer rejected the sample
    #[error("imputer failed: {0}")]
    Imputer(#[source] ArtifactError),

    /// The model rejected the sample
    #[error("model failed: {0}")]
    Model(#[source] ArtifactError),

    /// The model produced the wrong number of outputs for one sample
    #[error("model returned {0} predictions for a single sample")]
    OutputShape(usize),

    /// The model produced NaN or infinity
    #[error("model returned a non-finite score: {0}")]
    NonFinite(f64),
}

/// Artifact loading and evaluation errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Invalid artifact: {0}")]
    Invalid(String),

    #[error("Artifact was fitted on {expected:?}, schema is {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Feature names mismatch: expected {expected:?}, got {actual:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Input contains NaN in column `{0}`")]
    MissingValue(String),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

/// Feature schema construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema has no features")]
    Empty,

    #[error("Duplicate feature name: {0}")]
    Duplicate(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
