use crate::identifier::Identifier;
use crate::{CodegenError, CodegenResult};

/// Fixed SQL text with `{{slot}}` markers.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub text: &'static str,
}

/// Fills every `{{slot}}` of `template`. Slot values are identifiers, so
/// nothing but validated names is ever spliced into the output. A marker
/// with no matching slot fails the render instead of leaking into SQL.
pub fn render(template: &Template, slots: &[(&str, &Identifier)]) -> CodegenResult<String> {
    let mut out = String::with_capacity(template.text.len());
    let mut rest = template.text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let end = after_open.find("}}").ok_or_else(|| {
            CodegenError::Template(format!("{}: unterminated slot marker", template.name))
        })?;

        let slot = after_open[..end].trim();
        let value = slots
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                CodegenError::Template(format!("{}: no value for slot '{slot}'", template.name))
            })?;

        out.push_str(value.as_str());
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
