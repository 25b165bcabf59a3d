use log::warn;

use crate::{
    error::{Error, Result},
    expression::{shape, Segment, ValueShape},
    Dictionary, TokenValue,
};

enum State {
    Pending,
    Active,
    Done(TokenValue),
}

/// Replaces every reference in the dictionary's values with the (already
/// transformed) value of the token it points to.
///
/// A whole-value reference keeps the referenced value's type; references
/// embedded in text are substituted by their string form. Unresolvable
/// references stay in the value verbatim.
pub(crate) fn resolve(dictionary: &Dictionary) -> Result<Dictionary> {
    let mut resolver = Resolver {
        dictionary,
        states: dictionary.tokens().iter().map(|_| State::Pending).collect(),
        stack: Vec::new(),
    };
    let tokens = (0..dictionary.len())
        .map(|i| {
            let value = resolver.resolve(i)?;
            let mut token = dictionary.tokens()[i].clone();
            token.value = value;
            Ok(token)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(dictionary.with_tokens(tokens))
}

struct Resolver<'a> {
    dictionary: &'a Dictionary,
    states: Vec<State>,
    stack: Vec<usize>,
}
impl Resolver<'_> {
    fn resolve(&mut self, i: usize) -> Result<TokenValue> {
        match &self.states[i] {
            State::Done(value) => return Ok(value.clone()),
            State::Active => return Err(self.cycle(i)),
            State::Pending => {}
        }
        self.states[i] = State::Active;
        self.stack.push(i);

        let dictionary = self.dictionary;
        let token = &dictionary.tokens()[i];
        let value = match token.original.value.as_str().map(shape) {
            None | Some(ValueShape::Literal) => token.value.clone(),
            Some(ValueShape::WholeReference(inner)) => match dictionary.position(inner) {
                Some(target) => self.resolve(target)?,
                None => {
                    warn!(token = token.dotted_path(), reference = inner; "Unresolved reference");
                    token.value.clone()
                }
            },
            Some(ValueShape::Embedded(segments)) => {
                let mut value = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => value.push_str(text),
                        Segment::Reference(inner) => match dictionary.position(inner) {
                            Some(target) => value.push_str(&self.resolve(target)?.to_string()),
                            None => {
                                warn!(token = token.dotted_path(), reference = inner; "Unresolved reference");
                                value.push_str(&segment.source());
                            }
                        },
                    }
                }
                TokenValue::String(value)
            }
        };

        self.stack.pop();
        self.states[i] = State::Done(value.clone());
        Ok(value)
    }

    fn cycle(&self, i: usize) -> Error {
        let start = self.stack.iter().position(|&x| x == i).unwrap_or(0);
        let tokens = self.dictionary.tokens();
        Error::CircularReference(
            self.stack[start..]
                .iter()
                .chain(std::iter::once(&i))
                .map(|&x| tokens[x].dotted_path())
                .collect(),
        )
    }
}
