//! Vendor renderers that turn a device's fragments into configuration text
//!
//! Each renderer handles one vendor syntax. Renderers hold no per-call state
//! and are shared across the render workers of a push.

pub mod cisco;
pub mod juniper;

pub use cisco::CiscoRenderer;
pub use juniper::JuniperRenderer;

use crate::model::AclFragment;
use crate::template::TemplateError;

/// Renders the ordered fragment list of one device
pub trait VendorRenderer: Send + Sync {
    fn render(&self, fragments: &[AclFragment]) -> Result<String, TemplateError>;
}
