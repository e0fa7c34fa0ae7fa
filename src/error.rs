//! Error types for classification and push preparation

use thiserror::Error;

use crate::model::Ring;
use crate::template::TemplateError;

/// Errors raised while turning a push item into fragments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Cisco ACL name without the `<a>.<b>.<name>` shape
    #[error("malformed cisco ACL name '{name}': expected <a>.<b>.<name>, found {segments} segment(s)")]
    MalformedName { name: String, segments: usize },
}

impl ClassifyError {
    /// Create a malformed name error
    pub fn malformed_name(name: impl Into<String>, segments: usize) -> Self {
        Self::MalformedName {
            name: name.into(),
            segments,
        }
    }
}

/// A single entry in the error list returned alongside a push result
///
/// Errors are scoped: a classification error names the offending item, the
/// others name the offending device. None of them stop the rest of the push.
#[derive(Debug, Error)]
pub enum PushError {
    /// A push item could not be classified and was skipped
    #[error("push item #{index} '{acl_name}' skipped: {source}")]
    Classify {
        index: usize,
        acl_name: String,
        source: ClassifyError,
    },

    /// Rendering failed for one device in one ring
    #[error("{ring} config for device '{device}' failed to render: {source}")]
    Render {
        device: String,
        ring: Ring,
        source: TemplateError,
    },

    /// The device's vendor has no registered renderer (strict policy only)
    #[error("{ring} config for device '{device}' not rendered: unsupported vendor '{vendor}'")]
    UnknownVendor {
        device: String,
        vendor: String,
        ring: Ring,
    },
}

impl PushError {
    /// Create a classification error for the item at `index`
    pub fn classify(index: usize, acl_name: impl Into<String>, source: ClassifyError) -> Self {
        Self::Classify {
            index,
            acl_name: acl_name.into(),
            source,
        }
    }

    /// Create a render error for a device
    pub fn render(device: impl Into<String>, ring: Ring, source: TemplateError) -> Self {
        Self::Render {
            device: device.into(),
            ring,
            source,
        }
    }

    /// Create an unknown vendor error for a device
    pub fn unknown_vendor(device: impl Into<String>, vendor: impl Into<String>, ring: Ring) -> Self {
        Self::UnknownVendor {
            device: device.into(),
            vendor: vendor.into(),
            ring,
        }
    }

    /// Device the error applies to, if it is device scoped
    pub fn device(&self) -> Option<&str> {
        match self {
            PushError::Classify { .. } => None,
            PushError::Render { device, .. } | PushError::UnknownVendor { device, .. } => {
                Some(device.as_str())
            }
        }
    }

    /// Ring the error applies to, if it is device scoped
    pub fn ring(&self) -> Option<Ring> {
        match self {
            PushError::Classify { .. } => None,
            PushError::Render { ring, .. } | PushError::UnknownVendor { ring, .. } => Some(*ring),
        }
    }

    /// Ordering used for the aggregated error list: item errors by input
    /// position first, then device errors by ring and device name.
    pub(crate) fn sort_key(&self) -> (usize, usize, &str) {
        match self {
            PushError::Classify { index, .. } => (0, *index, ""),
            PushError::Render { device, ring, .. } | PushError::UnknownVendor { device, ring, .. } => {
                (1 + ring.index(), 0, device.as_str())
            }
        }
    }
}
