use itertools::Itertools;

use super::{render_value, FormatContext};
use crate::error::Result;

/// CSS custom properties, `--name: value;`, references as `var(--name)`.
pub fn css_variables(context: &FormatContext<'_>) -> Result<String> {
    let options = context.options;
    let var_prefix = options.var_prefix.as_deref().unwrap_or("--");
    let selector = options.selector.as_deref().unwrap_or(":root");
    let custom_property = var_prefix.starts_with("--");
    let wrap_in_selector = options.wrap_in_selector.unwrap_or(custom_property);
    let use_var_func = options.use_var_func.unwrap_or(true) && custom_property;
    let output_references = context.output_references(true);

    let body = context
        .tokens
        .iter()
        .map(|token| {
            let value = render_value(token, context.dictionary, output_references, |target| {
                if use_var_func {
                    format!("var({var_prefix}{})", target.name)
                } else {
                    format!("{var_prefix}{}", target.name)
                }
            });
            format!("  {var_prefix}{}: {value};", token.name)
        })
        .join("\n");

    Ok(if wrap_in_selector {
        format!("{selector} {{\n{body}\n}}\n")
    } else {
        format!("{body}\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{tests::dictionary, FormatOptions};

    fn prefixed(dictionary: &crate::Dictionary, options: &FormatOptions) -> String {
        let mut options = options.clone();
        options.var_prefix.get_or_insert_with(|| "--dsm-".to_string());
        css_variables(&FormatContext::new(dictionary, &options)).unwrap()
    }

    #[test]
    fn renders_root_block_with_var_references() {
        let output = prefixed(&dictionary(), &FormatOptions::default());
        assert_eq!(
            output,
            ":root {\n\
            \x20 --dsm-color-primary: #0055FF;\n\
            \x20 --dsm-size-base: 16px;\n\
            \x20 --dsm-button-bg: var(--dsm-color-primary);\n\
            \x20 --dsm-overlay: var(--dsm-color-primary) 50%;\n\
            \x20 --dsm-broken: {colors.missing};\n\
            }\n"
        );
    }

    #[test]
    fn bare_references_without_var_func() {
        let options = FormatOptions {
            use_var_func: Some(false),
            selector: Some(".theme".to_string()),
            ..FormatOptions::default()
        };
        let output = prefixed(&dictionary(), &options);
        assert!(output.starts_with(".theme {\n"));
        assert!(output.contains("  --dsm-button-bg: --dsm-color-primary;\n"));
    }

    #[test]
    fn non_custom_property_prefix_is_not_wrapped() {
        let options = FormatOptions {
            var_prefix: Some("$".to_string()),
            ..FormatOptions::default()
        };
        let output = css_variables(&FormatContext::new(&dictionary(), &options)).unwrap();
        assert!(!output.contains(":root"));
        assert!(output.contains("  $button-bg: $color-primary;\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let dictionary = dictionary();
        let options = FormatOptions::default();
        assert_eq!(prefixed(&dictionary, &options), prefixed(&dictionary, &options));
    }
}
