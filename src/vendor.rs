//! Vendor identifiers and the renderer registered for each

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::renderer::{CiscoRenderer, JuniperRenderer, VendorRenderer};
use crate::template::LayoutTemplate;

/// A device vendor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vendor {
    Cisco,
    Juniper,
    /// Any vendor id without built-in support
    Other(String),
}

impl Vendor {
    /// Parse a vendor id as it appears in push items
    pub fn from_id(id: &str) -> Self {
        match id {
            "cisco" => Vendor::Cisco,
            "juniper" => Vendor::Juniper,
            other => Vendor::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Vendor::Cisco => "cisco",
            Vendor::Juniper => "juniper",
            Vendor::Other(id) => id,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Renderer lookup by vendor
///
/// Supporting a new vendor means registering a renderer here; the push
/// preparer never matches on vendor itself.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<Vendor, Arc<dyn VendorRenderer>>,
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Cisco (template driven) and Juniper renderers
    pub fn standard(cisco_layout: Arc<dyn LayoutTemplate>) -> Self {
        let mut registry = Self::new();
        registry.register(Vendor::Cisco, Arc::new(CiscoRenderer::new(cisco_layout)));
        registry.register(Vendor::Juniper, Arc::new(JuniperRenderer));
        registry
    }

    /// Register (or replace) the renderer for `vendor`
    pub fn register(&mut self, vendor: Vendor, renderer: Arc<dyn VendorRenderer>) {
        self.renderers.insert(vendor, renderer);
    }

    /// Renderer for `vendor`, if one is registered
    pub fn get(&self, vendor: &Vendor) -> Option<&Arc<dyn VendorRenderer>> {
        self.renderers.get(vendor)
    }

    /// Look up by raw vendor id
    pub fn get_by_id(&self, id: &str) -> Option<&Arc<dyn VendorRenderer>> {
        self.get(&Vendor::from_id(id))
    }

    pub fn contains(&self, vendor: &Vendor) -> bool {
        self.renderers.contains_key(vendor)
    }

    /// Registered vendors, sorted by id
    pub fn vendors(&self) -> Vec<&Vendor> {
        let mut vendors: Vec<&Vendor> = self.renderers.keys().collect();
        vendors.sort_by(|a, b| a.id().cmp(b.id()));
        vendors
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("vendors", &self.vendors())
            .finish()
    }
}
