//! Cisco renderer: runs the layout template once per fragment

use std::sync::Arc;

use super::VendorRenderer;
use crate::model::AclFragment;
use crate::template::{LayoutTemplate, TemplateError};

/// Marker the layout emits after each interface binding
const EXIT_MARKER: &str = "\nexit";

/// Renders Cisco configuration through a compiled layout template
#[derive(Clone)]
pub struct CiscoRenderer {
    layout: Arc<dyn LayoutTemplate>,
}

impl CiscoRenderer {
    pub fn new(layout: Arc<dyn LayoutTemplate>) -> Self {
        Self { layout }
    }

    /// Name of the layout template in use
    pub fn template_name(&self) -> &str {
        self.layout.name()
    }
}

impl VendorRenderer for CiscoRenderer {
    /// Render every fragment in order into one buffer, then strip all
    /// `\nexit` markers from the whole buffer.
    ///
    /// The first fragment that fails to render aborts the device; nothing
    /// after it is rendered.
    fn render(&self, fragments: &[AclFragment]) -> Result<String, TemplateError> {
        let mut buf = String::new();
        for fragment in fragments {
            self.layout.render_layout(fragment, &mut buf)?;
        }
        Ok(buf.replace(EXIT_MARKER, ""))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::template::HandlebarsLayout;

    fn fragment(name: &str, data: &str) -> AclFragment {
        AclFragment {
            name: name.to_string(),
            ip_version: Some(4),
            data: data.to_string(),
            intf_direction: Vec::new(),
        }
    }

    fn renderer(source: &str) -> CiscoRenderer {
        CiscoRenderer::new(Arc::new(HandlebarsLayout::compile("test", source).unwrap()))
    }

    /// Layout that fails on a named fragment and counts its calls
    struct FailOn {
        name: &'static str,
        calls: AtomicUsize,
    }

    impl LayoutTemplate for FailOn {
        fn name(&self) -> &str {
            "fail_on"
        }

        fn render_layout(&self, fragment: &AclFragment, out: &mut String) -> Result<(), TemplateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if fragment.name == self.name {
                return Err(TemplateError::Render {
                    name: "fail_on".to_string(),
                    message: format!("cannot render {}", fragment.name),
                });
            }
            out.push_str(&fragment.data);
            Ok(())
        }
    }

    #[test]
    fn test_fragments_concatenate_in_order() {
        let r = renderer("{{Name}}:{{Data}}");
        let out = r
            .render(&[fragment("a", "1\n"), fragment("b", "2\n")])
            .unwrap();
        assert_eq!(out, "a:1\nb:2\n");
    }

    #[test]
    fn test_exit_markers_removed_across_fragments() {
        let r = renderer("{{Data}}\nexit");
        let out = r
            .render(&[fragment("a", "line a"), fragment("b", "line b")])
            .unwrap();
        assert_eq!(out, "line aline b");
        assert!(!out.contains("\nexit"));
    }

    #[test]
    fn test_exit_marker_stripped_mid_token() {
        let r = renderer("{{Data}}");
        let out = r.render(&[fragment("a", "exit\nexit-address-family")]).unwrap();
        assert_eq!(out, "exit-address-family");
    }

    #[test]
    fn test_exit_markers_stripped_in_a_single_pass() {
        // Removing the inner marker joins a newline to a second "exit"
        let r = renderer("{{Data}}");
        let out = r.render(&[fragment("a", "x\n\nexitexit\n")]).unwrap();
        assert_eq!(out, "x\nexit\n");
    }

    #[test]
    fn test_empty_fragment_list_renders_empty() {
        let r = renderer("{{Data}}");
        assert_eq!(r.render(&[]).unwrap(), "");
    }

    #[test]
    fn test_failure_stops_at_failing_fragment() {
        let layout = Arc::new(FailOn {
            name: "bad",
            calls: AtomicUsize::new(0),
        });
        let r = CiscoRenderer::new(layout.clone());
        let err = r
            .render(&[fragment("ok", "x"), fragment("bad", "y"), fragment("later", "z")])
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
        assert_eq!(layout.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_template_name() {
        assert_eq!(renderer("{{Data}}").template_name(), "test");
    }
}
