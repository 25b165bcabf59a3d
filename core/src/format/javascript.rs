use itertools::Itertools;

use super::{FormatContext, GENERATED_HEADER};
use crate::{
    error::Result,
    expression::{shape, ValueShape},
    Token, TokenValue,
};

/// ES module of `export const NAME = value;` declarations.
///
/// With `output_references`, a token that is exactly one reference is
/// exported as the referenced constant; anything else is a literal.
/// Constants are declared before the aliases that use them.
pub fn javascript_es6(context: &FormatContext<'_>) -> Result<String> {
    let output_references = context.output_references(false);
    let tokens = if output_references {
        context.sorted_by_reference()
    } else {
        context.tokens.clone()
    };
    let lines = tokens
        .iter()
        .map(|token| -> Result<String> {
            let value = match alias(context, token) {
                Some(target) if output_references => target.name.clone(),
                _ => literal(&token.value)?,
            };
            Ok(match &token.comment {
                Some(comment) => format!("export const {} = {value}; // {comment}", token.name),
                None => format!("export const {} = {value};", token.name),
            })
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .join("\n");
    Ok(format!("/**\n * {GENERATED_HEADER}\n */\n\n{lines}\n"))
}

fn alias<'a>(context: &FormatContext<'a>, token: &Token) -> Option<&'a Token> {
    match shape(token.original.value.as_str()?) {
        ValueShape::WholeReference(inner) => context.dictionary.find_reference(inner),
        _ => None,
    }
}

fn literal(value: &TokenValue) -> Result<String> {
    Ok(match value {
        TokenValue::String(text) => serde_json::to_string(text)?,
        other => other.to_string(),
    })
}
