//! Regex values carried on the wire as their source text.
//!
//! The server compiles the same text with its own regex engine and applies it with search
//! semantics, so [`Pattern::is_match`] is unanchored as well.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CodecError;

/// A compiled regex that compares, hashes and serializes by its source.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, CodecError> {
        Ok(Self(Regex::new(source)?))
    }

    /// Pattern matching `text` literally.
    pub fn literal(text: &str) -> Result<Self, CodecError> {
        Self::new(&regex::escape(text))
    }

    pub fn as_str(&self) -> &str { self.0.as_str() }

    pub fn is_match(&self, haystack: &str) -> bool { self.0.is_match(haystack) }

    pub fn regex(&self) -> &Regex { &self.0 }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool { self.as_str() == other.as_str() }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) { self.as_str().hash(state) }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Pattern {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

/// Wire form of an optional pattern: its source, or `null`.
pub fn encode(pattern: Option<&Pattern>) -> Value {
    match pattern {
        Some(p) => Value::String(p.as_str().to_owned()),
        None => Value::Null,
    }
}

/// Inverse of [`encode`]. Any token other than a string or `null` is rejected.
pub fn decode(token: &Value) -> Result<Option<Pattern>, CodecError> {
    match token {
        Value::Null => Ok(None),
        Value::String(s) => Pattern::new(s).map(Some),
        Value::Bool(_) => Err(CodecError::MalformedValue("boolean")),
        Value::Number(_) => Err(CodecError::MalformedValue("number")),
        Value::Array(_) => Err(CodecError::MalformedValue("array")),
        Value::Object(_) => Err(CodecError::MalformedValue("object")),
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct PatternVisitor;

impl<'de> Visitor<'de> for PatternVisitor {
    type Value = Pattern;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a regex pattern string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Pattern, E> {
        Pattern::new(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PatternVisitor)
    }
}
