use itertools::Itertools;

use super::{render_value, FormatContext, GENERATED_HEADER};
use crate::error::Result;

/// Plain Sass variables, `$name: value;`. With `output_references`,
/// variables are declared before the ones that use them.
pub fn scss_variables(context: &FormatContext<'_>) -> Result<String> {
    let output_references = context.output_references(false);
    let tokens = if output_references {
        context.sorted_by_reference()
    } else {
        context.tokens.clone()
    };
    let lines = tokens
        .iter()
        .map(|token| {
            let value = render_value(token, context.dictionary, output_references, |target| {
                format!("${}", target.name)
            });
            match &token.comment {
                Some(comment) => format!("${}: {value}; // {comment}", token.name),
                None => format!("${}: {value};", token.name),
            }
        })
        .join("\n");
    Ok(format!("// {GENERATED_HEADER}\n\n{lines}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{format::FormatOptions, Dictionary, Token};

    fn dictionary() -> Dictionary {
        let mut bg = Token::new(&["button", "bg"], "{colors.primary}").with_name("dsm-button-bg");
        bg.value = "#0055ff".into();
        Dictionary::new(vec![
            Token::new(&["colors", "primary"], "#0055ff")
                .with_name("dsm-colors-primary")
                .with_comment("brand blue"),
            bg,
        ])
        .unwrap()
    }

    #[test]
    fn resolved_by_default() {
        let output =
            scss_variables(&FormatContext::new(&dictionary(), &FormatOptions::default())).unwrap();
        assert_eq!(
            output,
            "// Do not edit directly, this file was auto-generated.\n\n\
            $dsm-colors-primary: #0055ff; // brand blue\n\
            $dsm-button-bg: #0055ff;\n"
        );
    }

    #[test]
    fn references_as_variables() {
        let options = FormatOptions {
            output_references: Some(true),
            ..FormatOptions::default()
        };
        let output = scss_variables(&FormatContext::new(&dictionary(), &options)).unwrap();
        assert!(output.contains("$dsm-button-bg: $dsm-colors-primary;\n"));
    }

    #[test]
    fn variables_declared_before_use() {
        let mut overlay =
            Token::new(&["overlay"], "{colors.primary} 50%").with_name("dsm-overlay");
        overlay.value = "#0055ff 50%".into();
        let dictionary = Dictionary::new(vec![
            overlay,
            Token::new(&["colors", "primary"], "#0055ff").with_name("dsm-colors-primary"),
        ])
        .unwrap();
        let options = FormatOptions {
            output_references: Some(true),
            ..FormatOptions::default()
        };
        let output = scss_variables(&FormatContext::new(&dictionary, &options)).unwrap();
        assert!(output.ends_with(
            "$dsm-colors-primary: #0055ff;\n$dsm-overlay: $dsm-colors-primary 50%;\n"
        ));
    }
}
