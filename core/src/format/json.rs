use super::FormatContext;
use crate::error::Result;

/// Pretty-printed array of the selected tokens with all their metadata.
pub fn json_flat(context: &FormatContext<'_>) -> Result<String> {
    let mut output = serde_json::to_string_pretty(&context.tokens)?;
    output.push('\n');
    Ok(output)
}
