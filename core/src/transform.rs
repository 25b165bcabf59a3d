//! Named token transforms.
//!
//! Attribute transforms derive metadata from a token's path, name transforms
//! compute the rendered identifier, and value transforms rewrite literal
//! values (units, colors). Every transform here is pure and idempotent.

use convert_case::{Case, Casing};
use csscolorparser::Color;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::{expression, Token, TokenValue};

pub type AttributeFn = fn(&Token) -> IndexMap<String, String>;
pub type NameFn = fn(&Token, Option<&str>) -> String;
pub type MatcherFn = fn(&Token) -> bool;
pub type ValueFn = fn(&Token) -> TokenValue;

#[derive(Clone, Copy)]
pub enum Transform {
    Attribute(AttributeFn),
    Name(NameFn),
    /// `matcher` must return `false`, never panic, for values it does not
    /// understand.
    Value {
        matcher: MatcherFn,
        transform: ValueFn,
    },
}
impl Transform {
    pub fn apply(&self, token: &mut Token, prefix: Option<&str>) {
        match self {
            Transform::Attribute(generate) => {
                let mut attributes = generate(token);
                // authored attributes win over generated ones
                attributes.extend(token.attributes.drain(..));
                token.attributes = attributes;
            }
            Transform::Name(name) => token.name = name(token, prefix),
            Transform::Value { matcher, transform } => {
                if !has_references(token) && matcher(token) {
                    token.value = transform(token);
                }
            }
        }
    }
}
impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transform::Attribute(_) => f.write_str("Transform::Attribute"),
            Transform::Name(_) => f.write_str("Transform::Name"),
            Transform::Value { .. } => f.write_str("Transform::Value"),
        }
    }
}

/// Reference-valued tokens take their value from the referenced token
/// during resolution instead.
fn has_references(token: &Token) -> bool {
    token
        .original
        .value
        .as_str()
        .map_or(false, |raw| expression::shape(raw).has_references())
}

pub fn builtins() -> Vec<(&'static str, Transform)> {
    vec![
        ("attribute/cti", Transform::Attribute(attribute_cti)),
        ("name/kebab", Transform::Name(|token, prefix| name(token, prefix, Case::Kebab))),
        ("name/camel", Transform::Name(|token, prefix| name(token, prefix, Case::Camel))),
        (
            "name/constant",
            Transform::Name(|token, prefix| name(token, prefix, Case::UpperSnake)),
        ),
        (
            "size/px",
            Transform::Value {
                matcher: |token| is_size(token) && unitless(&token.value).is_some(),
                transform: |token| match unitless(&token.value) {
                    Some(number) => format!("{number}px").into(),
                    None => token.value.clone(),
                },
            },
        ),
        (
            "size/pxToPt",
            Transform::Value {
                matcher: |token| pixels(&token.value).is_some(),
                transform: |token| convert_pixels(token, "pt"),
            },
        ),
        (
            "size/pxToDp",
            Transform::Value {
                matcher: |token| pixels(&token.value).is_some(),
                transform: |token| convert_pixels(token, "dp"),
            },
        ),
        (
            "color/css",
            Transform::Value {
                matcher: |token| token.is_a("color") && color(&token.value).is_some(),
                transform: |token| match color(&token.value) {
                    Some(color) => css_color(&color).into(),
                    None => token.value.clone(),
                },
            },
        ),
        (
            "color/hex",
            Transform::Value {
                matcher: |token| token.is_a("color") && color(&token.value).is_some(),
                transform: |token| match color(&token.value) {
                    Some(color) => color.to_hex_string().into(),
                    None => token.value.clone(),
                },
            },
        ),
        (
            "time/seconds",
            Transform::Value {
                matcher: |token| token.is_a("time") && milliseconds(&token.value).is_some(),
                transform: |token| match milliseconds(&token.value) {
                    Some(ms) => format!("{:.2}s", ms / 1000.0).into(),
                    None => token.value.clone(),
                },
            },
        ),
    ]
}

fn attribute_cti(token: &Token) -> IndexMap<String, String> {
    ["category", "type", "item", "subitem", "state"]
        .iter()
        .zip(&token.path)
        .map(|(key, segment)| (key.to_string(), segment.clone()))
        .collect()
}

fn name(token: &Token, prefix: Option<&str>, case: Case) -> String {
    prefix
        .into_iter()
        .chain(token.path.iter().map(|x| x.as_str()))
        .map(words)
        .join(" ")
        .to_case(case)
}
fn words(segment: &str) -> String {
    deunicode::deunicode(segment)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

fn is_size(token: &Token) -> bool {
    token.is_a("dimension") || token.is_a("size") || token.attribute("category") == Some("size")
}

/// The numeric text of a value carrying no unit at all.
fn unitless(value: &TokenValue) -> Option<String> {
    match value {
        TokenValue::Number(number) => Some(number.to_string()),
        TokenValue::String(text) => {
            let text = text.trim();
            text.parse::<f64>().is_ok().then(|| text.to_string())
        }
        _ => None,
    }
}

/// The number in front of a `px` suffix, e.g. `16` for `16px`.
fn pixels(value: &TokenValue) -> Option<&str> {
    let number = value.as_str()?.strip_suffix("px")?;
    (!number.is_empty() && number.chars().all(|c| c.is_ascii_digit() || c == '.')).then_some(number)
}
fn convert_pixels(token: &Token, unit: &str) -> TokenValue {
    match pixels(&token.value) {
        Some(number) => format!("{number}{unit}").into(),
        None => token.value.clone(),
    }
}

fn milliseconds(value: &TokenValue) -> Option<f64> {
    match value {
        TokenValue::Number(number) => number.as_f64(),
        TokenValue::String(text) => {
            let text = text.trim();
            text.strip_suffix("ms").unwrap_or(text).trim().parse().ok()
        }
        _ => None,
    }
}

fn color(value: &TokenValue) -> Option<Color> {
    csscolorparser::parse(value.as_str()?).ok()
}
fn css_color(color: &Color) -> String {
    if color.a >= 1.0 {
        return color.to_hex_string();
    }
    let [r, g, b, _] = color.to_rgba8();
    let alpha = (color.a * 100.0).round() / 100.0;
    format!("rgba({r}, {g}, {b}, {alpha})")
}
