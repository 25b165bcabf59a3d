use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A token value as authored in a source file or produced by a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Objects and arrays (typography, shadows, ...). Rendered as compact JSON.
    Composite(serde_json::Value),
}
impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(value) => Some(value),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(value) => value.as_f64(),
            TokenValue::String(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}
impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Bool(value) => write!(f, "{value}"),
            TokenValue::Number(value) => write!(f, "{value}"),
            TokenValue::String(value) => f.write_str(value),
            TokenValue::Composite(value) => write!(f, "{value}"),
        }
    }
}
impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::String(value.to_string())
    }
}
impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::String(value)
    }
}
impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        TokenValue::Number(value.into())
    }
}
impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Number(value.into())
    }
}

/// The value exactly as it appeared in the source, before any transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Original {
    pub value: TokenValue,
}

/// A leaf of the merged dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Transformed and, once the dictionary is resolved, reference-free value.
    pub value: TokenValue,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub original: Original,
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub path: Vec<String>,
}
impl Token {
    pub fn new(path: &[&str], value: impl Into<TokenValue>) -> Self {
        let value = value.into();
        Token {
            value: value.clone(),
            type_: None,
            comment: None,
            original: Original { value },
            name: path.last().map(|x| x.to_string()).unwrap_or_default(),
            attributes: IndexMap::new(),
            path: path.iter().map(|x| x.to_string()).collect(),
        }
    }
    pub fn with_type(mut self, type_: &str) -> Self {
        self.type_ = Some(type_.to_string());
        self
    }
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Dotted identity used by `{a.b.c}` references.
    pub fn dotted_path(&self) -> String {
        self.path.iter().join(".")
    }
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|x| x.as_str())
    }
    /// Declared type, falling back to the `category` attribute.
    pub fn is_a(&self, kind: &str) -> bool {
        match &self.type_ {
            Some(type_) => type_ == kind,
            None => self.attribute("category") == Some(kind),
        }
    }
}
