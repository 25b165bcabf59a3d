use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    expression::normalize_path,
    resolve,
    transform::Transform,
    Token,
};

/// The merged, ordered token set of one brand/platform build.
///
/// Paths are indexed once on construction; a dictionary never holds two
/// tokens with the same dotted path.
#[derive(Debug, Clone)]
pub struct Dictionary {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
}
impl Dictionary {
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let path = token.dotted_path();
            if index.insert(path.clone(), i).is_some() {
                return Err(Error::AmbiguousPath(path));
            }
        }
        Ok(Dictionary { tokens, index })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Looks up a token by its exact dotted path.
    pub fn get(&self, path: &str) -> Option<&Token> {
        self.index.get(path).map(|&i| &self.tokens[i])
    }
    /// Looks up the target of a reference body such as `colors.red.value`.
    pub fn find_reference(&self, reference: &str) -> Option<&Token> {
        self.get(normalize_path(reference))
    }
    pub(crate) fn position(&self, reference: &str) -> Option<usize> {
        self.index.get(normalize_path(reference)).copied()
    }

    pub fn filtered<'a>(&'a self, filter: Option<&TokenFilter>) -> Vec<&'a Token> {
        self.tokens
            .iter()
            .filter(|token| filter.map_or(true, |filter| filter.matches(token)))
            .collect()
    }

    /// Applies `pipeline` to every token, in order, then resolves references
    /// against the transformed values.
    pub fn transform(&self, pipeline: &[Transform], prefix: Option<&str>) -> Result<Self> {
        let tokens = self
            .tokens
            .iter()
            .map(|token| {
                let mut token = token.clone();
                for transform in pipeline {
                    transform.apply(&mut token, prefix);
                }
                token
            })
            .collect();
        resolve::resolve(&self.with_tokens(tokens))
    }

    /// Same paths, new token contents. Used after transforms, which never
    /// change a token's path.
    pub(crate) fn with_tokens(&self, tokens: Vec<Token>) -> Self {
        debug_assert_eq!(tokens.len(), self.tokens.len());
        Dictionary {
            tokens,
            index: self.index.clone(),
        }
    }
}

/// Selects the tokens written to one output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenFilter {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub category: Option<String>,
}
impl TokenFilter {
    pub fn of_type(type_: &str) -> Self {
        TokenFilter {
            type_: Some(type_.to_string()),
            category: None,
        }
    }
    pub fn matches(&self, token: &Token) -> bool {
        self.type_.as_deref().map_or(true, |type_| token.is_a(type_))
            && self
                .category
                .as_deref()
                .map_or(true, |category| token.attribute("category") == Some(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::new(vec![
            Token::new(&["colors", "primary"], "#0055ff").with_type("color"),
            Token::new(&["size", "base"], "16px").with_type("dimension"),
        ])
        .unwrap()
    }

    #[test]
    fn finds_by_exact_path() {
        let dictionary = dictionary();
        assert_eq!(dictionary.get("colors.primary").unwrap().name, "primary");
        assert!(dictionary.get("colors").is_none());
        assert!(dictionary.get("colors.primary.value").is_none());
    }

    #[test]
    fn reference_lookup_normalizes() {
        let dictionary = dictionary();
        assert!(dictionary.find_reference(" colors.primary.$value ").is_some());
        assert!(dictionary.find_reference("colors.secondary").is_none());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let result = Dictionary::new(vec![
            Token::new(&["spacing", "1.5"], "6px"),
            Token::new(&["spacing", "1", "5"], "5px"),
        ]);
        assert!(matches!(result, Err(Error::AmbiguousPath(path)) if path == "spacing.1.5"));
    }

    #[test]
    fn transforms_then_resolves() {
        let dictionary = Dictionary::new(vec![
            Token::new(&["size", "base"], "16px").with_type("dimension"),
            Token::new(&["size", "gap"], "{size.base}").with_type("dimension"),
        ])
        .unwrap();
        let pipeline = crate::Registry::with_builtins().pipeline("tokens-android").unwrap();
        let android = dictionary.transform(&pipeline, Some("token")).unwrap();
        let gap = android.get("size.gap").unwrap();
        assert_eq!(gap.name, "tokenSizeGap");
        assert_eq!(gap.value, crate::TokenValue::from("16dp"));
        assert_eq!(gap.original.value, crate::TokenValue::from("{size.base}"));
        assert_eq!(gap.attribute("category"), Some("size"));
        // the source dictionary is untouched
        assert_eq!(dictionary.get("size.base").unwrap().value, crate::TokenValue::from("16px"));
    }

    #[test]
    fn filters_by_type() {
        let dictionary = dictionary();
        let colors = dictionary.filtered(Some(&TokenFilter::of_type("color")));
        assert_eq!(colors.len(), 1);
        assert_eq!(dictionary.filtered(None).len(), 2);
    }
}
