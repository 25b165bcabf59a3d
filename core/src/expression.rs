//! Reference expressions inside authored token values.
//!
//! A raw string value is classified into a [`ValueShape`]: plain literal
//! text, a single `{a.b.c}` reference spanning the whole (trimmed) value, or
//! text with any number of references embedded in it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Body of a `{...}` expression, braces excluded, not yet normalized.
    Reference(&'a str),
}
impl Segment<'_> {
    /// The segment as it appeared in the source text.
    pub fn source(&self) -> String {
        match self {
            Segment::Text(text) => text.to_string(),
            Segment::Reference(inner) => format!("{{{inner}}}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueShape<'a> {
    Literal,
    WholeReference(&'a str),
    Embedded(Vec<Segment<'a>>),
}
impl ValueShape<'_> {
    pub fn has_references(&self) -> bool {
        !matches!(self, ValueShape::Literal)
    }
}

peg::parser! {
  grammar reference_parser() for str {
    rule reference() -> Segment<'input>
        = "{" inner:$([^ '}']+) "}" { Segment::Reference(inner) }

    rule text() -> Segment<'input>
        = text:$((!reference() [_])+) { Segment::Text(text) }

    pub(crate) rule segments() -> Vec<Segment<'input>>
        = segments:(reference() / text())* { segments }
  }
}

/// Splits `raw` into text and reference segments.
pub fn segments(raw: &str) -> Vec<Segment<'_>> {
    // The grammar accepts every input; the fallback only guards the API.
    reference_parser::segments(raw).unwrap_or_else(|_| vec![Segment::Text(raw)])
}

pub fn shape(raw: &str) -> ValueShape<'_> {
    let segments = segments(raw);
    if !segments
        .iter()
        .any(|segment| matches!(segment, Segment::Reference(_)))
    {
        return ValueShape::Literal;
    }
    if let [Segment::Reference(inner)] = self::segments(raw.trim()).as_slice() {
        return ValueShape::WholeReference(*inner);
    }
    ValueShape::Embedded(segments)
}

/// Canonical dotted lookup path for a reference body: trimmed, with any
/// trailing `.value` / `.$value` (any case) removed.
pub fn normalize_path(raw: &str) -> &str {
    let mut path = raw.trim();
    loop {
        match strip_value_suffix(path) {
            Some(stripped) => path = stripped.trim(),
            None => return path,
        }
    }
}
fn strip_value_suffix(path: &str) -> Option<&str> {
    [".value", ".$value"].iter().find_map(|suffix| {
        let split = path.len().checked_sub(suffix.len())?;
        if !path.is_char_boundary(split) {
            return None;
        }
        let (head, tail) = path.split_at(split);
        tail.eq_ignore_ascii_case(suffix).then_some(head)
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("colors.primary", "colors.primary")]
    #[case(" colors.primary ", "colors.primary")]
    #[case("colors.primary.value", "colors.primary")]
    #[case("colors.primary.$value", "colors.primary")]
    #[case("colors.primary.VALUE", "colors.primary")]
    #[case("colors.primary.value.value", "colors.primary")]
    #[case("value", "value")]
    #[case("colors.values", "colors.values")]
    fn normalizes_paths(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(raw), expected);
    }

    #[test]
    fn literal_without_braces() {
        assert_eq!(shape("16px"), ValueShape::Literal);
        assert_eq!(shape("{}"), ValueShape::Literal);
        assert_eq!(shape("{unclosed"), ValueShape::Literal);
    }

    #[test]
    fn whole_reference_ignores_surrounding_whitespace() {
        assert_eq!(shape("{colors.primary}"), ValueShape::WholeReference("colors.primary"));
        assert_eq!(shape("  {a.b.value} "), ValueShape::WholeReference("a.b.value"));
    }

    #[test]
    fn embedded_references_keep_text() {
        assert_eq!(
            shape("{a.b} 50%"),
            ValueShape::Embedded(vec![Segment::Reference("a.b"), Segment::Text(" 50%")])
        );
        assert_eq!(
            shape("{x} {y}"),
            ValueShape::Embedded(vec![
                Segment::Reference("x"),
                Segment::Text(" "),
                Segment::Reference("y"),
            ])
        );
        assert_eq!(
            shape("calc({a} * 2"),
            ValueShape::Embedded(vec![
                Segment::Text("calc("),
                Segment::Reference("a"),
                Segment::Text(" * 2"),
            ])
        );
    }

    #[test]
    fn nested_open_brace_belongs_to_the_reference() {
        assert_eq!(
            segments("{{a}"),
            vec![Segment::Reference("{a")]
        );
    }

    proptest! {
        #[test]
        fn normalizing_twice_is_a_no_op(raw in "[ a-zA-Z.$]{0,24}") {
            let once = normalize_path(&raw);
            prop_assert_eq!(normalize_path(once), once);
        }

        #[test]
        fn segments_reassemble_the_input(raw in "[a-z{} .%]{0,24}") {
            let rebuilt: String = segments(&raw).iter().map(|x| x.source()).collect();
            prop_assert_eq!(rebuilt, raw);
        }
    }
}
