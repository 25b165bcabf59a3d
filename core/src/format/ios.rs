use itertools::Itertools;

use super::{escape_xml, render_value, FormatContext};
use crate::error::Result;

const PLIST_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
<plist version=\"1.0\">\n";

/// Property list of name/value strings; a reference is written as the bare
/// name of the token it points to.
pub fn ios_plist_alias(context: &FormatContext<'_>) -> Result<String> {
    let output_references = context.output_references(true);
    let entries = context
        .tokens
        .iter()
        .map(|token| {
            let value = render_value(token, context.dictionary, output_references, |target| {
                target.name.clone()
            });
            format!(
                "\t<key>{}</key>\n\t<string>{}</string>",
                escape_xml(&token.name),
                escape_xml(&value)
            )
        })
        .join("\n");
    Ok(format!("{PLIST_HEADER}<dict>\n{entries}\n</dict>\n</plist>\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{tests::dictionary, FormatOptions};

    #[test]
    fn renders_aliases_inside_plist_envelope() {
        let output =
            ios_plist_alias(&FormatContext::new(&dictionary(), &FormatOptions::default())).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert!(output.contains("<plist version=\"1.0\">\n<dict>\n\t<key>color-primary</key>\n"));
        assert!(output.contains("\t<key>button-bg</key>\n\t<string>color-primary</string>\n"));
        assert!(output.contains("\t<key>overlay</key>\n\t<string>color-primary 50%</string>\n"));
        assert!(output.contains("\t<key>broken</key>\n\t<string>{colors.missing}</string>\n"));
        assert!(output.ends_with("</dict>\n</plist>\n"));
    }

    #[test]
    fn only_selected_tokens_are_written() {
        let dictionary = dictionary();
        let options = FormatOptions::default();
        let mut context = FormatContext::new(&dictionary, &options);
        context.tokens.retain(|token| token.name == "button-bg");
        let output = ios_plist_alias(&context).unwrap();
        assert!(output.contains("<string>color-primary</string>"));
        assert!(!output.contains("<key>color-primary</key>"));
    }
}
