//! Token source files: discovery, parsing and layered merging.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    token::Original,
    Token, TokenValue,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token(TokenSource),
    Group(Group),
    /// Scalars, arrays and anything else that is neither a token nor a
    /// group, e.g. a `"comment"` string on a group. Never emitted.
    Metadata(serde_json::Value),
}
impl TokenOrGroup {
    fn merge(&mut self, layer: TokenOrGroup, path: &str) {
        match (self, layer) {
            (TokenOrGroup::Group(base), TokenOrGroup::Group(layer)) => base.merge(layer, path),
            (slot, layer) => {
                debug!(path; "Token source overridden by later layer");
                *slot = layer;
            }
        }
    }
}

/// An object carrying `value` (or `$value`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenSource {
    #[serde(alias = "$value")]
    pub value: TokenValue,
    #[serde(rename = "type", alias = "$type", default)]
    pub type_: Option<String>,
    #[serde(alias = "$description", default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, serde_json::Value>,
}
impl TokenSource {
    fn to_token(&self, path: &[String], inherited_type: Option<&str>) -> Token {
        let attributes = self
            .attributes
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(value) => value.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        Token {
            value: self.value.clone(),
            type_: self
                .type_
                .clone()
                .or_else(|| inherited_type.map(|x| x.to_string())),
            comment: self.comment.clone(),
            original: Original {
                value: self.value.clone(),
            },
            name: path.last().cloned().unwrap_or_default(),
            attributes,
            path: path.to_vec(),
        }
    }
}

/// Any other object. `$type` applies to every descendant token that does
/// not declare its own. Other `$`-prefixed members (`$schema`,
/// `$extensions`, ...) are metadata and never hold tokens.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Group {
    #[serde(rename = "$type", default)]
    pub type_: Option<String>,
    #[serde(rename = "$description", default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub children: IndexMap<String, TokenOrGroup>,
}
impl Group {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| Error::ParseSource {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads and merges `files` in order; later files override earlier ones.
    pub fn load_layers(files: &[PathBuf]) -> Result<Self> {
        let mut merged = Group::default();
        for file in files {
            debug!(file = file.display().to_string(); "Loading token source");
            merged.merge(Group::load(file)?, "");
        }
        Ok(merged)
    }

    pub fn merge(&mut self, layer: Group, path: &str) {
        if layer.type_.is_some() {
            self.type_ = layer.type_;
        }
        if layer.description.is_some() {
            self.description = layer.description;
        }
        for (key, child) in layer.children {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            match self.children.get_mut(&key) {
                Some(existing) => existing.merge(child, &child_path),
                None => {
                    self.children.insert(key, child);
                }
            }
        }
    }

    /// All tokens, depth first in source order.
    pub fn flatten(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.collect(&mut Vec::new(), None, &mut tokens);
        tokens
    }
    fn collect(&self, path: &mut Vec<String>, inherited_type: Option<&str>, tokens: &mut Vec<Token>) {
        let type_ = self.type_.as_deref().or(inherited_type);
        for (key, child) in &self.children {
            path.push(key.clone());
            match child {
                _ if key.starts_with('$') => {
                    debug!(path = path.join("."); "Skipping metadata member")
                }
                TokenOrGroup::Token(source) => tokens.push(source.to_token(path, type_)),
                TokenOrGroup::Group(group) => group.collect(path, type_, tokens),
                TokenOrGroup::Metadata(_) => {
                    debug!(path = path.join("."); "Skipping non-token member")
                }
            }
            path.pop();
        }
    }
}

/// Expands glob `patterns` relative to `root`. Files keep pattern order
/// (sorted within one pattern); a file matched twice keeps its first place.
pub fn discover(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();
    for pattern in patterns {
        let full_pattern = root.join(pattern).display().to_string();
        let mut matches = glob::glob(&full_pattern)
            .map_err(|source| Error::Pattern {
                pattern: full_pattern.clone(),
                source,
            })?
            .collect::<Result<Vec<_>, _>>()?;
        if matches.is_empty() {
            debug!(pattern = full_pattern; "Source pattern matched no files");
        }
        matches.sort();
        files.extend(matches);
    }
    Ok(files.into_iter().collect())
}
