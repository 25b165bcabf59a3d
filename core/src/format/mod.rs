//! Output formats.
//!
//! Every format is a plain function from a [`FormatContext`] to the file
//! contents. The reference-preserving formats share [`render_value`], which
//! re-emits `{a.b.c}` references in the target's own idiom.

mod android;
mod css;
mod ios;
mod javascript;
mod json;
mod scss;

pub use android::android_xml;
pub use css::css_variables;
pub use ios::ios_plist_alias;
pub use javascript::javascript_es6;
pub use json::json_flat;
pub use scss::scss_variables;

use std::collections::HashSet;

use log::warn;
use serde::Deserialize;

use crate::{
    error::Result,
    expression::{shape, Segment, ValueShape},
    Dictionary, Token,
};

pub type FormatFn = fn(&FormatContext<'_>) -> Result<String>;

pub(crate) const GENERATED_HEADER: &str = "Do not edit directly, this file was auto-generated.";

/// Per-file rendering options. Unset options take each format's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatOptions {
    /// Keep references as aliases instead of resolved values.
    pub output_references: Option<bool>,
    pub var_prefix: Option<String>,
    pub selector: Option<String>,
    pub wrap_in_selector: Option<bool>,
    pub use_var_func: Option<bool>,
}

pub struct FormatContext<'a> {
    /// The whole dictionary; references resolve against all of it.
    pub dictionary: &'a Dictionary,
    /// The tokens to emit, in dictionary order.
    pub tokens: Vec<&'a Token>,
    pub options: &'a FormatOptions,
}
impl<'a> FormatContext<'a> {
    pub fn new(dictionary: &'a Dictionary, options: &'a FormatOptions) -> Self {
        FormatContext {
            dictionary,
            tokens: dictionary.tokens().iter().collect(),
            options,
        }
    }
    pub fn output_references(&self, default: bool) -> bool {
        self.options.output_references.unwrap_or(default)
    }

    /// The emitted tokens, each placed after the emitted tokens it
    /// references. Unrelated tokens keep dictionary order.
    pub fn sorted_by_reference(&self) -> Vec<&'a Token> {
        let emitted: HashSet<String> = self.tokens.iter().map(|x| x.dotted_path()).collect();
        let mut visited = HashSet::with_capacity(self.tokens.len());
        let mut sorted = Vec::with_capacity(self.tokens.len());
        for &token in &self.tokens {
            self.visit(token, &emitted, &mut visited, &mut sorted);
        }
        sorted
    }
    fn visit(
        &self,
        token: &'a Token,
        emitted: &HashSet<String>,
        visited: &mut HashSet<String>,
        sorted: &mut Vec<&'a Token>,
    ) {
        if !visited.insert(token.dotted_path()) {
            return;
        }
        for target in references(token, self.dictionary) {
            if emitted.contains(&target.dotted_path()) {
                self.visit(target, emitted, visited, sorted);
            }
        }
        sorted.push(token);
    }
}

/// The tokens that `token`'s authored value refers to, in order of
/// appearance. Unresolved references are skipped.
fn references<'d>(token: &Token, dictionary: &'d Dictionary) -> Vec<&'d Token> {
    let Some(raw) = token.original.value.as_str() else {
        return Vec::new();
    };
    match shape(raw) {
        ValueShape::Literal => Vec::new(),
        ValueShape::WholeReference(inner) => dictionary.find_reference(inner).into_iter().collect(),
        ValueShape::Embedded(segments) => segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Reference(inner) => dictionary.find_reference(inner),
                Segment::Text(_) => None,
            })
            .collect(),
    }
}

/// Renders a token's value, rewriting every reference in its authored value
/// with `reference`. Literals render as the transformed value; references
/// that do not resolve are kept as written.
pub(crate) fn render_value(
    token: &Token,
    dictionary: &Dictionary,
    output_references: bool,
    reference: impl Fn(&Token) -> String,
) -> String {
    let raw = match token.original.value.as_str() {
        Some(raw) if output_references => raw,
        _ => return token.value.to_string(),
    };
    match shape(raw) {
        ValueShape::Literal => token.value.to_string(),
        ValueShape::WholeReference(inner) => match dictionary.find_reference(inner) {
            Some(target) => reference(target),
            None => {
                warn!(token = token.dotted_path(), reference = inner; "Unresolved reference kept as written");
                raw.to_string()
            }
        },
        ValueShape::Embedded(segments) => segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.to_string(),
                Segment::Reference(inner) => match dictionary.find_reference(inner) {
                    Some(target) => reference(target),
                    None => {
                        warn!(token = token.dotted_path(), reference = *inner; "Unresolved reference kept as written");
                        segment.source()
                    }
                },
            })
            .collect(),
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
