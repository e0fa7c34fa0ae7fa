//! Juniper renderer: raw fragment text, concatenated verbatim

use super::VendorRenderer;
use crate::model::AclFragment;
use crate::template::TemplateError;

/// Concatenates fragment data in order with no separators
#[derive(Debug, Clone, Copy, Default)]
pub struct JuniperRenderer;

impl JuniperRenderer {
    pub fn concat(fragments: &[AclFragment]) -> String {
        let mut buf = String::with_capacity(fragments.iter().map(|f| f.data.len()).sum());
        for fragment in fragments {
            buf.push_str(&fragment.data);
        }
        buf
    }
}

impl VendorRenderer for JuniperRenderer {
    fn render(&self, fragments: &[AclFragment]) -> Result<String, TemplateError> {
        Ok(Self::concat(fragments))
    }
}
