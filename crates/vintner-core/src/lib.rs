//! vintner-core - Wine quality prediction from chemical measurements
//!
//! This crate turns free-form `name: value` text into a model-ready feature
//! vector and runs it through externally trained artifacts:
//!
//! - **Schema**: the eleven physicochemical features the model was fitted on
//! - **Parse**: case-insensitive `name: value` parsing against the schema
//! - **Artifact**: imputer and regressor capabilities loaded from JSON
//! - **Predict**: impute + predict for a single sample
//! - **Quality**: Low / Medium / High bands from the rounded score
//! - **Pipeline**: one submission from raw text to a renderable outcome
//!
//! # Example
//!
//! ```
//! use vintner_core::{parse_features, FeatureSchema};
//!
//! let text = "fixed acidity: 7.4\nvolatile acidity: 0.7\ncitric acid: 0\n\
//!             residual sugar: 1.9\nchlorides: 0.076\nfree sulfur dioxide: 11\n\
//!             total sulfur dioxide: 34\ndensity: 0.9978\npH: 3.51\n\
//!             sulphates: 0.56\nalcohol: 9.4";
//! let features = parse_features(text, FeatureSchema::wine()).unwrap();
//! assert_eq!(features.get("pH"), Some(3.51));
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod frame;
pub mod parse;
pub mod pipeline;
pub mod predict;
pub mod quality;
pub mod schema;

pub use artifact::*;
pub use config::*;
pub use error::*;
pub use frame::*;
pub use parse::*;
pub use pipeline::*;
pub use predict::*;
pub use quality::*;
pub use schema::*;
