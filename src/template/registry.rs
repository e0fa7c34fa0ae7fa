//! Template registry for storing layout sources and compiling them on demand

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::layout::{HandlebarsLayout, LayoutTemplate};

/// Name of the bundled Cisco ACL layout
pub const CISCO_ACL_TEMPLATE: &str = "cisco_acl";

/// File extension for templates loaded from a base directory
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Bundled Cisco ACL layout
///
/// Emits the raw ACL text, then binds it to each interface. Every binding is
/// closed with an `exit` line; the Cisco renderer strips those once all
/// fragments for a device are concatenated.
pub const CISCO_ACL_LAYOUT: &str = r#"{{Data}}{{#each IntfDirection}}interface {{Intf}}
 {{#if (eq @root.IPVersion 6)}}ipv6 traffic-filter{{else}}ip access-group{{/if}} {{@root.Name}} {{Direction}}
exit
{{/each}}"#;

/// Errors that can occur during template operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template not found in registry
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template definition
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },

    /// Error reading template file
    #[error("error reading template file {path}: {message}")]
    FileReadError { path: PathBuf, message: String },

    /// Template source could not be parsed
    #[error("template {name} failed to compile: {message}")]
    Compile { name: String, message: String },

    /// Template execution failed
    #[error("template {name} failed to render: {message}")]
    Render { name: String, message: String },
}

/// Something that can compile a named layout template
///
/// Compilation happens once, at startup; the returned layout is shared by
/// every push that follows.
pub trait TemplateProvider {
    fn compile(&self, name: &str) -> Result<Arc<dyn LayoutTemplate>, TemplateError>;
}

/// A stored template source
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    /// Template name
    pub name: String,
    /// Handlebars source of the layout entry
    pub source: String,
}

/// Registry of named layout sources
///
/// Sources are registered from strings, or looked up lazily as
/// `<base_path>/<name>.tmpl` when a base path is set.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateDefinition>,
    /// Base path for resolving template files
    base_path: Option<PathBuf>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the bundled layouts
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.templates.insert(
            CISCO_ACL_TEMPLATE.to_string(),
            TemplateDefinition {
                name: CISCO_ACL_TEMPLATE.to_string(),
                source: CISCO_ACL_LAYOUT.to_string(),
            },
        );
        registry
    }

    /// Create a new registry with a base path for file resolution
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            templates: HashMap::new(),
            base_path: Some(base_path),
        }
    }

    /// Register a template source under `name`
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        self.register_definition(TemplateDefinition {
            name: name.into(),
            source: source.into(),
        })
    }

    /// Register a template definition directly
    pub fn register_definition(&mut self, def: TemplateDefinition) -> Result<(), TemplateError> {
        if self.templates.contains_key(&def.name) {
            return Err(TemplateError::Duplicate {
                name: def.name.clone(),
            });
        }
        self.templates.insert(def.name.clone(), def);
        Ok(())
    }

    /// Register `name` from a file, replacing any source already stored
    pub fn override_from_file(
        &mut self,
        name: impl Into<String>,
        path: &Path,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        let source = read_source(path)?;
        self.templates
            .insert(name.clone(), TemplateDefinition { name, source });
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.templates.get(name)
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Path a template named `name` is expected at under the base path
    pub fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        self.base_path
            .as_ref()
            .map(|base| base.join(format!("{}.{}", name, TEMPLATE_EXTENSION)))
    }

    fn source_for(&self, name: &str) -> Result<String, TemplateError> {
        if let Some(def) = self.templates.get(name) {
            return Ok(def.source.clone());
        }
        match self.resolve_path(name) {
            Some(path) => read_source(&path),
            None => Err(TemplateError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

impl TemplateProvider for TemplateRegistry {
    fn compile(&self, name: &str) -> Result<Arc<dyn LayoutTemplate>, TemplateError> {
        let source = self.source_for(name)?;
        let layout = HandlebarsLayout::compile(name, &source)?;
        debug!(template = name, "compiled layout template");
        Ok(Arc::new(layout))
    }
}

fn read_source(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|e| TemplateError::FileReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AclFragment, IntfDirection};

    fn fragment(ip_version: Option<i32>, units: &[(&str, &str)]) -> AclFragment {
        AclFragment {
            name: "v3in".to_string(),
            ip_version,
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

    fn render(fragment: &AclFragment) -> String {
        let layout = TemplateRegistry::with_builtins()
            .compile(CISCO_ACL_TEMPLATE)
            .expect("Builtin layout should compile");
        let mut out = String::new();
        layout
            .render_layout(fragment, &mut out)
            .expect("Builtin layout should render");
        out
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = TemplateRegistry::new();
        registry.register("box", "{{Data}}").expect("Should register");
        assert!(registry.contains("box"));
        assert_eq!(registry.get("box").map(|d| d.source.as_str()), Some("{{Data}}"));
    }

    #[test]
    fn test_registry_duplicate_error() {
        let mut registry = TemplateRegistry::new();
        registry
            .register("box", "{{Data}}")
            .expect("First register should succeed");
        let result = registry.register("box", "{{Name}}");
        assert!(matches!(result, Err(TemplateError::Duplicate { .. })));
    }

    #[test]
    fn test_compile_missing_template() {
        let result = TemplateRegistry::new().compile("nope");
        assert!(matches!(result, Err(TemplateError::NotFound { ref name }) if name == "nope"));
    }

    #[test]
    fn test_compile_missing_file_under_base_path() {
        let registry = TemplateRegistry::with_base_path(PathBuf::from("/nonexistent-template-dir"));
        assert_eq!(
            registry.resolve_path("cisco_acl"),
            Some(PathBuf::from("/nonexistent-template-dir/cisco_acl.tmpl"))
        );
        let result = registry.compile("cisco_acl");
        assert!(matches!(result, Err(TemplateError::FileReadError { .. })));
    }

    #[test]
    fn test_override_from_file_replaces_builtin() {
        let path = std::env::temp_dir().join(format!("acl-rollout-override-{}.tmpl", std::process::id()));
        std::fs::write(&path, "{{Name}}!").unwrap();

        let mut registry = TemplateRegistry::with_builtins();
        registry
            .override_from_file(CISCO_ACL_TEMPLATE, &path)
            .expect("Should read template file");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(registry.get(CISCO_ACL_TEMPLATE).map(|d| d.source.as_str()), Some("{{Name}}!"));
        let mut out = String::new();
        registry
            .compile(CISCO_ACL_TEMPLATE)
            .unwrap()
            .render_layout(&fragment(Some(4), &[]), &mut out)
            .unwrap();
        assert_eq!(out, "v3in!");
    }

    #[test]
    fn test_override_from_missing_file() {
        let mut registry = TemplateRegistry::with_builtins();
        let result = registry.override_from_file(CISCO_ACL_TEMPLATE, Path::new("/nonexistent/acl.tmpl"));
        assert!(matches!(result, Err(TemplateError::FileReadError { .. })));
        assert_eq!(
            registry.get(CISCO_ACL_TEMPLATE).map(|d| d.source.as_str()),
            Some(CISCO_ACL_LAYOUT)
        );
    }

    #[test]
    fn test_compile_invalid_source() {
        let mut registry = TemplateRegistry::new();
        registry.register("bad", "{{#if Name}}").unwrap();
        assert!(matches!(
            registry.compile("bad"),
            Err(TemplateError::Compile { .. })
        ));
    }

    #[test]
    fn test_builtin_layout_without_units_is_raw_data() {
        let out = render(&fragment(Some(4), &[]));
        assert_eq!(out, "no ip access-list extended v3in\n");
    }

    #[test]
    fn test_builtin_layout_binds_ipv4_interfaces() {
        let out = render(&fragment(Some(4), &[("Vlan75", "in"), ("Vlan75", "out")]));
        assert!(out.starts_with("no ip access-list extended v3in\n"));
        assert!(out.contains("interface Vlan75\n ip access-group v3in in\nexit"));
        assert!(out.contains("interface Vlan75\n ip access-group v3in out\nexit"));
        assert!(!out.contains("traffic-filter"));
    }

    #[test]
    fn test_builtin_layout_binds_ipv6_interfaces() {
        let out = render(&fragment(Some(6), &[("Vlan86", "out")]));
        assert!(out.contains("interface Vlan86\n ipv6 traffic-filter v3in out\nexit"));
    }

    #[test]
    fn test_builtin_layout_without_ip_version() {
        let out = render(&fragment(None, &[("Vlan86", "in")]));
        assert!(out.contains(" ip access-group v3in in"));
    }
}
