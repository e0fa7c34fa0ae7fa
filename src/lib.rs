//! ACL Rollout - canary/global ACL config rendering for multi-vendor devices
//!
//! This library classifies ACL push items into a canary ring (enforcement
//! points tagged `Canary=True`) and a global ring (everything else), then
//! renders vendor-correct configuration text for every device in each ring.
//! Pushing the text to devices is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use acl_rollout::{AclPushItem, EnforcementPoint, PushConfig, PushPreparer, TemplateRegistry};
//!
//! // Compile the Cisco layout once, at startup.
//! let preparer = PushPreparer::from_provider(&TemplateRegistry::with_builtins(), PushConfig::new())
//!     .unwrap();
//!
//! let items = vec![
//!     AclPushItem::new("jcl", "juniper", "firewall {}\n")
//!         .with_enforce_point(EnforcementPoint::new("mx1").with_tag("Canary", "True"))
//!         .with_enforce_point(EnforcementPoint::new("mx2")),
//! ];
//!
//! let result = preparer.prepare(&items);
//! assert_eq!(result.canary()["mx1"], "firewall {}\n");
//! assert_eq!(result.global()["mx2"], "firewall {}\n");
//! assert!(result.errors.is_empty());
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod preparer;
pub mod renderer;
pub mod template;
pub mod vendor;

pub use classifier::{classify, Classification, DeviceBuckets};
pub use config::{ConfigError, PushConfig, UnknownVendorPolicy};
pub use error::{ClassifyError, PushError};
pub use model::{AclFragment, AclPushItem, EnforcementPoint, EnforcementUnit, IntfDirection, Ring, Tag};
pub use preparer::{DeviceConfigs, PushPreparer, PushResult};
pub use renderer::{CiscoRenderer, JuniperRenderer, VendorRenderer};
pub use template::{LayoutTemplate, TemplateError, TemplateProvider, TemplateRegistry};
pub use vendor::{RendererRegistry, Vendor};
