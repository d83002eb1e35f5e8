//! Free-text feature parsing.
//!
//! Parses `name: value` lines into a [`FeatureVector`] ordered and cased
//! like the schema.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::frame::FeatureVector;
use crate::schema::FeatureSchema;

/// Suffix of an unfilled template line.
const PLACEHOLDER_SUFFIX: &str = ": ";

/// Parse multi-line `name: value` text against a schema.
///
/// Grammar, one entry per line: `<name>:<value>`
/// - name: matched case-insensitively against the schema
/// - value: anything `f64::from_str` accepts, surrounding whitespace ignored
///
/// Only the first `:` splits a line. Blank lines are skipped, unknown names
/// are ignored, and a repeated name keeps its last value.
///
/// # Examples
/// ```
/// use vintner_core::{parse_features, FeatureSchema, ParseError};
///
/// let schema = FeatureSchema::new(vec!["pH".into(), "alcohol".into()]).unwrap();
/// let v = parse_features("ALCOHOL: 9.4\nph: 3.51", &schema).unwrap();
/// assert_eq!(v.names(), ["pH", "alcohol"]);
///
/// assert_eq!(
///     parse_features("pH: \nalcohol: ", &schema),
///     Err(ParseError::EmptyInput)
/// );
/// ```
pub fn parse_features(input: &str, schema: &FeatureSchema) -> Result<FeatureVector, ParseError> {
    if is_blank_input(input) {
        return Err(ParseError::EmptyInput);
    }

    let mut raw: HashMap<String, f64> = HashMap::new();
    for line in input.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, value) = parse_line(line)?;
        raw.insert(name, value);
    }

    let mut features = FeatureVector::new();
    for feature in schema.iter() {
        let value = raw
            .get(&feature.to_lowercase())
            .copied()
            .ok_or_else(|| ParseError::MissingFeature {
                feature: feature.to_string(),
            })?;
        features.push(feature, value);
    }

    Ok(features)
}

/// True when nothing has been entered yet.
///
/// That is either whitespace only, or every non-blank line still ends with
/// the template's `": "` (checked before trimming, so `alcohol:` without
/// the trailing space does not count as a placeholder).
pub fn is_blank_input(input: &str) -> bool {
    if input.trim().is_empty() {
        return true;
    }
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.ends_with(PLACEHOLDER_SUFFIX))
}

/// Split one trimmed line into a lower-cased key and its value.
fn parse_line(line: &str) -> Result<(String, f64), ParseError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MissingDelimiter {
            line: line.to_string(),
        })?;

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            line: line.to_string(),
        })?;

    Ok((name.trim().to_lowercase(), value))
}
