//! Data model for ACL push requests and the fragments derived from them
//!
//! Push items arrive from the transport layer (JSON in the CLI). Fragments are
//! built by the classifier and are what the vendor renderers consume.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag key that marks an enforcement point as part of the canary ring
pub const CANARY_TAG_KEY: &str = "Canary";

/// Tag value that must accompany [`CANARY_TAG_KEY`]
pub const CANARY_TAG_VALUE: &str = "True";

/// One ACL definition to be pushed to a set of enforcement points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclPushItem {
    /// Raw ACL name as stored upstream (`<a>.<b>.<name>` for cisco)
    pub acl_name: String,
    /// IP version the ACL applies to, when known
    #[serde(default)]
    pub ip_version: Option<i32>,
    /// Vendor identifier, e.g. `cisco` or `juniper`
    pub vendor: String,
    /// Raw vendor configuration text
    #[serde(default)]
    pub data: String,
    /// Devices this ACL is enforced on
    #[serde(default)]
    pub enforce_point: Vec<EnforcementPoint>,
}

impl AclPushItem {
    pub fn new(
        acl_name: impl Into<String>,
        vendor: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            acl_name: acl_name.into(),
            ip_version: None,
            vendor: vendor.into(),
            data: data.into(),
            enforce_point: Vec::new(),
        }
    }

    /// Set the IP version
    pub fn with_ip_version(mut self, version: i32) -> Self {
        self.ip_version = Some(version);
        self
    }

    /// Append an enforcement point
    pub fn with_enforce_point(mut self, point: EnforcementPoint) -> Self {
        self.enforce_point.push(point);
        self
    }
}

/// A device reference with its tags and interface bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementPoint {
    pub device_name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub units: Vec<EnforcementUnit>,
}

impl EnforcementPoint {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            tags: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Attach a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Bind the ACL to an interface in the given direction
    pub fn with_unit(mut self, name: impl Into<String>, direction: impl Into<String>) -> Self {
        self.units.push(EnforcementUnit {
            name: name.into(),
            direction: direction.into(),
        });
        self
    }

    /// Whether any tag places this point in the canary ring
    pub fn is_canary(&self) -> bool {
        self.tags.iter().any(Tag::is_canary)
    }

    /// Ring this enforcement point belongs to
    pub fn ring(&self) -> Ring {
        if self.is_canary() {
            Ring::Canary
        } else {
            Ring::Global
        }
    }
}

/// Key/value metadata on an enforcement point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(alias = "type")]
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn is_canary(&self) -> bool {
        self.key == CANARY_TAG_KEY && self.value == CANARY_TAG_VALUE
    }
}

/// An interface binding: interface name plus direction (`in`/`out`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementUnit {
    pub name: String,
    pub direction: String,
}

/// Rollout ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Canary,
    Global,
}

impl Ring {
    /// Both rings, in output order
    pub const ALL: [Ring; 2] = [Ring::Canary, Ring::Global];

    /// Position of this ring in the result mappings (0 = canary, 1 = global)
    pub fn index(self) -> usize {
        match self {
            Ring::Canary => 0,
            Ring::Global => 1,
        }
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ring::Canary => write!(f, "canary"),
            Ring::Global => write!(f, "global"),
        }
    }
}

/// Interface/direction pair as exposed to layout templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntfDirection {
    #[serde(rename = "Intf")]
    pub intf: String,
    #[serde(rename = "Direction")]
    pub direction: String,
}

impl From<&EnforcementUnit> for IntfDirection {
    fn from(unit: &EnforcementUnit) -> Self {
        Self {
            intf: unit.name.clone(),
            direction: unit.direction.clone(),
        }
    }
}

/// Rendering-ready data for one ACL item scoped to a single device
///
/// Serializes with the field names layout templates reference:
/// `Name`, `IPVersion`, `Data` and `IntfDirection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AclFragment {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IPVersion")]
    pub ip_version: Option<i32>,
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "IntfDirection")]
    pub intf_direction: Vec<IntfDirection>,
}
