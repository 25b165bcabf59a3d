use itertools::Itertools;

use super::{escape_xml, render_value, FormatContext};
use crate::{
    classify::DestinationKind,
    error::Result,
    expression::{shape, Segment, ValueShape},
    Dictionary, Token,
};

/// Android resource XML. References become `@<kind>/<name>`.
pub fn android_xml(context: &FormatContext<'_>) -> Result<String> {
    let output_references = context.output_references(true);
    let items = context
        .tokens
        .iter()
        .map(|token| {
            let kind = tag_for(token);
            let tag = kind.android_tag();
            let value = render_value(token, context.dictionary, output_references, |target| {
                format!("@{}/{}", DestinationKind::for_token(target).android_tag(), target.name)
            });
            let value = match kind {
                DestinationKind::String => escape_string_resource(
                    &value,
                    output_references && leads_with_reference(token, context.dictionary),
                ),
                _ => value,
            };
            let comment = token
                .comment
                .as_deref()
                .map(|comment| format!("<!-- {} -->", escape_xml(comment)))
                .unwrap_or_default();
            format!(
                "    <{tag} name=\"{}\">{}</{tag}>{comment}",
                escape_xml(&token.name),
                escape_xml(&value)
            )
        })
        .join("\n");
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n{items}\n</resources>\n"
    ))
}

/// `<color>`, `<dimen>` and `<integer>` cannot hold a reference mixed with
/// other text; such values are written as `<string>`.
fn tag_for(token: &Token) -> DestinationKind {
    match token.original.value.as_str() {
        Some(raw) => DestinationKind::for_value(token, &shape(raw)),
        None => DestinationKind::for_token(token),
    }
}

/// Whether the rendered value starts with a rewritten `@kind/name`.
fn leads_with_reference(token: &Token, dictionary: &Dictionary) -> bool {
    let Some(raw) = token.original.value.as_str() else {
        return false;
    };
    match shape(raw) {
        ValueShape::Literal => false,
        ValueShape::WholeReference(inner) => dictionary.find_reference(inner).is_some(),
        ValueShape::Embedded(segments) => matches!(
            segments.first(),
            Some(Segment::Reference(inner)) if dictionary.find_reference(inner).is_some()
        ),
    }
}

/// aapt string escapes: backslashes and quotes, plus a leading `@` or `?`
/// that would otherwise be read as a resource reference.
fn escape_string_resource(value: &str, is_reference: bool) -> String {
    let mut escaped = String::with_capacity(value.len() + 1);
    if !is_reference && value.starts_with(['@', '?']) {
        escaped.push('\\');
    }
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::{tests::dictionary, FormatOptions},
        Dictionary,
    };

    fn render(dictionary: &Dictionary, options: &FormatOptions) -> String {
        android_xml(&FormatContext::new(dictionary, options)).unwrap()
    }

    #[test]
    fn renders_resources_with_typed_references() {
        let output = render(&dictionary(), &FormatOptions::default());
        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
            <resources>\n\
            \x20   <color name=\"color-primary\">#0055FF</color>\n\
            \x20   <dimen name=\"size-base\">16px</dimen>\n\
            \x20   <color name=\"button-bg\">@color/color-primary</color>\n\
            \x20   <string name=\"overlay\">@color/color-primary 50%</string>\n\
            \x20   <color name=\"broken\">{colors.missing}</color>\n\
            </resources>\n"
        );
    }

    #[test]
    fn reference_kind_comes_from_the_target() {
        let dictionary = Dictionary::new(vec![
            Token::new(&["colors", "primary"], "#0055ff")
                .with_type("color")
                .with_name("token-color-primary"),
            Token::new(&["size", "base"], "16dp")
                .with_attribute("category", "size")
                .with_name("token-size-base"),
            Token::new(&["label"], "{colors.primary}").with_name("token-label"),
            Token::new(&["gap"], "{size.base}").with_name("token-gap"),
        ])
        .unwrap();
        let output = render(&dictionary, &FormatOptions::default());
        assert!(output.contains("<string name=\"token-label\">@color/token-color-primary</string>"));
        assert!(output.contains("<string name=\"token-gap\">@dimen/token-size-base</string>"));
    }

    #[test]
    fn composite_values_stay_strings_without_references() {
        let mut overlay = Token::new(&["overlay"], "{colors.primary} 50%")
            .with_type("color")
            .with_name("overlay");
        overlay.value = "#0055ff 50%".into();
        let dictionary = Dictionary::new(vec![overlay]).unwrap();
        let options = FormatOptions {
            output_references: Some(false),
            ..FormatOptions::default()
        };
        assert!(render(&dictionary, &options).contains("<string name=\"overlay\">#0055ff 50%</string>"));
    }

    #[test]
    fn comments_follow_the_element() {
        let dictionary = Dictionary::new(vec![Token::new(&["a"], "x & y")
            .with_name("a")
            .with_comment("used <rarely>")])
        .unwrap();
        assert!(render(&dictionary, &FormatOptions::default())
            .contains("    <string name=\"a\">x &amp; y</string><!-- used &lt;rarely&gt; -->"));
    }

    #[test]
    fn string_resources_are_escaped() {
        let dictionary = Dictionary::new(vec![
            Token::new(&["colors", "primary"], "#0055ff")
                .with_type("color")
                .with_name("primary"),
            Token::new(&["quote"], "don't \"panic\"").with_name("quote"),
            Token::new(&["handle"], "@brand").with_name("handle"),
            Token::new(&["query"], "?really").with_name("query"),
            Token::new(&["path"], r"C:\tokens").with_name("path"),
            Token::new(&["alias"], "{colors.primary} isn't").with_name("alias"),
        ])
        .unwrap();
        let output = render(&dictionary, &FormatOptions::default());
        assert!(output.contains(r#"<string name="quote">don\'t \&quot;panic\&quot;</string>"#));
        assert!(output.contains(r#"<string name="handle">\@brand</string>"#));
        assert!(output.contains(r#"<string name="query">\?really</string>"#));
        assert!(output.contains(r#"<string name="path">C:\\tokens</string>"#));
        assert!(output.contains(r#"<string name="alias">@color/primary isn\'t</string>"#));
    }
}
