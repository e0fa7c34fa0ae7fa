//! ACL classifier
//!
//! Walks the push items once and sorts every (item, enforcement point) pair
//! into the canary or global bucket of its device, recording the vendor of
//! each device along the way.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{ClassifyError, PushError};
use crate::model::{AclFragment, AclPushItem, IntfDirection, Ring};
use crate::vendor::Vendor;

/// Device name -> fragments for that device, in input order
pub type DeviceBuckets = BTreeMap<String, Vec<AclFragment>>;

/// Output of [`classify`]
#[derive(Debug, Default)]
pub struct Classification {
    /// Fragments for canary-tagged enforcement points
    pub canary: DeviceBuckets,
    /// Fragments for every other enforcement point
    pub global: DeviceBuckets,
    /// Device name -> vendor id of the last item that referenced it
    pub vendors: BTreeMap<String, String>,
    /// Items that could not be classified
    pub errors: Vec<PushError>,
}

impl Classification {
    /// Buckets for a ring
    pub fn bucket(&self, ring: Ring) -> &DeviceBuckets {
        match ring {
            Ring::Canary => &self.canary,
            Ring::Global => &self.global,
        }
    }

    fn bucket_mut(&mut self, ring: Ring) -> &mut DeviceBuckets {
        match ring {
            Ring::Canary => &mut self.canary,
            Ring::Global => &mut self.global,
        }
    }

    /// Vendor id recorded for a device
    pub fn vendor(&self, device: &str) -> Option<&str> {
        self.vendors.get(device).map(|s| s.as_str())
    }
}

/// Extract the display name of an ACL from its vendor naming convention
///
/// Cisco names are stored as `<a>.<b>.<name>`; the third segment is the name
/// configured on the device. Other vendors use the raw name unchanged.
pub fn normalize_name(raw: &str, vendor: &Vendor) -> Result<String, ClassifyError> {
    match vendor {
        Vendor::Cisco => {
            let segments: Vec<&str> = raw.split('.').collect();
            segments
                .get(2)
                .map(|s| s.to_string())
                .ok_or_else(|| ClassifyError::malformed_name(raw, segments.len()))
        }
        _ => Ok(raw.to_string()),
    }
}

/// Partition push items into per-device canary and global fragment lists
///
/// Ring membership is decided per enforcement point, so one item can land in
/// different rings on different devices. A malformed item is skipped and
/// reported; it does not affect the other items.
pub fn classify(items: &[AclPushItem]) -> Classification {
    let mut out = Classification::default();

    for (index, item) in items.iter().enumerate() {
        let vendor = Vendor::from_id(&item.vendor);
        let name = match normalize_name(&item.acl_name, &vendor) {
            Ok(name) => name,
            Err(err) => {
                warn!(index, acl = %item.acl_name, error = %err, "skipping push item");
                out.errors.push(PushError::classify(index, &item.acl_name, err));
                continue;
            }
        };

        for point in &item.enforce_point {
            let ring = point.ring();
            out.vendors
                .insert(point.device_name.clone(), item.vendor.clone());

            let fragment = AclFragment {
                name: name.clone(),
                ip_version: item.ip_version,
                data: item.data.clone(),
                intf_direction: point.units.iter().map(IntfDirection::from).collect(),
            };
            debug!(
                acl = %fragment.name,
                device = %point.device_name,
                %ring,
                units = fragment.intf_direction.len(),
                "classified fragment"
            );
            out.bucket_mut(ring)
                .entry(point.device_name.clone())
                .or_default()
                .push(fragment);
        }
    }

    out
}
