//! Layout templates for template-driven vendors
//!
//! A [`TemplateProvider`] compiles a named layout once; the resulting
//! [`LayoutTemplate`] is shared read-only by every render that follows.
//! [`TemplateRegistry`] is the bundled provider, backed by handlebars.
//!
//! # Example
//!
//! ```rust
//! use acl_rollout::template::{LayoutTemplate, TemplateProvider, TemplateRegistry, CISCO_ACL_TEMPLATE};
//!
//! let registry = TemplateRegistry::with_builtins();
//! let layout = registry.compile(CISCO_ACL_TEMPLATE).unwrap();
//! assert_eq!(layout.name(), CISCO_ACL_TEMPLATE);
//! ```

mod layout;
mod registry;

pub use layout::{HandlebarsLayout, LayoutTemplate, LAYOUT_ENTRY};
pub use registry::{
    TemplateDefinition, TemplateError, TemplateProvider, TemplateRegistry, CISCO_ACL_LAYOUT,
    CISCO_ACL_TEMPLATE, TEMPLATE_EXTENSION,
};
