//! Compiled layout templates

use std::fmt;

use handlebars::Handlebars;

use super::registry::TemplateError;
use crate::model::AclFragment;

/// Name of the entry every layout template is registered under
pub const LAYOUT_ENTRY: &str = "layout";

/// A compiled layout that renders one fragment at a time
///
/// Implementations must be safe to share across render workers without
/// synchronization.
pub trait LayoutTemplate: Send + Sync {
    /// Name the template was compiled from
    fn name(&self) -> &str;

    /// Render the layout entry for `fragment`, appending to `out`
    ///
    /// On error `out` is left as it was before the call.
    fn render_layout(&self, fragment: &AclFragment, out: &mut String) -> Result<(), TemplateError>;
}

/// Handlebars-backed layout template
///
/// HTML escaping is disabled (device configs are plain text) and strict mode
/// is on, so a template referencing a field the fragment does not carry fails
/// at render time instead of silently emitting nothing.
pub struct HandlebarsLayout {
    name: String,
    engine: Handlebars<'static>,
}

impl HandlebarsLayout {
    /// Compile `source` as the layout entry of a template called `name`
    pub fn compile(name: impl Into<String>, source: &str) -> Result<Self, TemplateError> {
        let name = name.into();
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_escape_fn(handlebars::no_escape);
        engine
            .register_template_string(LAYOUT_ENTRY, source)
            .map_err(|e| TemplateError::Compile {
                name: name.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { name, engine })
    }
}

impl LayoutTemplate for HandlebarsLayout {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_layout(&self, fragment: &AclFragment, out: &mut String) -> Result<(), TemplateError> {
        let text = self
            .engine
            .render(LAYOUT_ENTRY, fragment)
            .map_err(|e| TemplateError::Render {
                name: self.name.clone(),
                message: e.to_string(),
            })?;
        out.push_str(&text);
        Ok(())
    }
}

impl fmt::Debug for HandlebarsLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsLayout")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IntfDirection;

    fn fragment(units: &[(&str, &str)]) -> AclFragment {
        AclFragment {
            name: "v3in".to_string(),
            ip_version: Some(4),
            data: "no ip access-list extended v3in\n".to_string(),
            intf_direction: units
                .iter()
                .map(|(i, d)| IntfDirection {
                    intf: i.to_string(),
                    direction: d.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_fields() {
        let layout = HandlebarsLayout::compile("t", "{{Name}}|{{IPVersion}}|{{Data}}").unwrap();
        let mut out = String::new();
        layout.render_layout(&fragment(&[]), &mut out).unwrap();
        assert_eq!(out, "v3in|4|no ip access-list extended v3in\n");
    }

    #[test]
    fn test_render_does_not_escape() {
        let layout = HandlebarsLayout::compile("t", "{{Data}}").unwrap();
        let mut frag = fragment(&[]);
        frag.data = "remark <a & b>\n".to_string();
        let mut out = String::new();
        layout.render_layout(&frag, &mut out).unwrap();
        assert_eq!(out, "remark <a & b>\n");
    }

    #[test]
    fn test_render_iterates_units() {
        let layout =
            HandlebarsLayout::compile("t", "{{#each IntfDirection}}[{{Intf}} {{Direction}}]{{/each}}")
                .unwrap();
        let mut out = String::new();
        layout
            .render_layout(&fragment(&[("Vlan75", "in"), ("Vlan75", "out")]), &mut out)
            .unwrap();
        assert_eq!(out, "[Vlan75 in][Vlan75 out]");
    }

    #[test]
    fn test_render_appends_to_buffer() {
        let layout = HandlebarsLayout::compile("t", "{{Name}};").unwrap();
        let mut out = String::from("start;");
        layout.render_layout(&fragment(&[]), &mut out).unwrap();
        layout.render_layout(&fragment(&[]), &mut out).unwrap();
        assert_eq!(out, "start;v3in;v3in;");
    }

    #[test]
    fn test_unknown_field_fails_in_strict_mode() {
        let layout = HandlebarsLayout::compile("t", "{{Name}} {{Sequence}}").unwrap();
        let mut out = String::from("kept");
        let err = layout.render_layout(&fragment(&[]), &mut out).unwrap_err();
        assert!(matches!(err, TemplateError::Render { ref name, .. } if name == "t"));
        assert_eq!(out, "kept");
    }

    #[test]
    fn test_unclosed_block_fails_to_compile() {
        let err = HandlebarsLayout::compile("broken", "{{#each IntfDirection}}{{Intf}}").unwrap_err();
        assert!(matches!(err, TemplateError::Compile { ref name, .. } if name == "broken"));
    }
}
