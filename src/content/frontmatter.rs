//! Front-matter parsing

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use super::Metadata;
use crate::error::SkipReason;

lazy_static! {
    /// `---` line, header lines, `---` line, then the body verbatim
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---(?:\r?\n|\z)(.*)\z").unwrap();
}

/// Decoded front-matter of one document
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub fields: Metadata,
}

impl FrontMatter {
    /// Split content into its raw header and body.
    ///
    /// The body keeps its leading and trailing whitespace.
    pub fn split(content: &str) -> Result<(&str, &str), SkipReason> {
        let caps = FRONT_MATTER_RE
            .captures(content)
            .ok_or(SkipReason::MissingHeader)?;
        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        Ok((header, body))
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), SkipReason> {
        let (header, body) = Self::split(content)?;
        Ok((Self::decode(header)?, body))
    }

    /// Decode a YAML header into an ordered key/value mapping.
    ///
    /// `<<` merge keys are applied and scalar keys become strings.
    pub fn decode(header: &str) -> Result<Self, SkipReason> {
        let mut value: serde_yaml::Value = serde_yaml::from_str(header)?;
        if !value.is_mapping() {
            return Err(SkipReason::HeaderNotMapping);
        }
        value.apply_merge()?;
        let fields: Metadata = serde_yaml::from_value(stringify_keys(value))?;
        Ok(Self { fields })
    }

    pub fn into_metadata(self) -> Metadata {
        self.fields
    }
}

/// Rewrite scalar mapping keys (`2023:`, `true:`) as strings, recursively.
/// Sequence or mapping keys are left alone and fail to decode.
fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (key_to_string(key), stringify_keys(value)))
                .collect::<Mapping>(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(stringify_keys).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = stringify_keys(tagged.value);
            Value::Tagged(tagged)
        }
        other => other,
    }
}

fn key_to_string(key: Value) -> Value {
    match key {
        Value::Null => Value::String("null".to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}
