//! Push preparation: classify, render per device, collect
//!
//! [`PushPreparer`] is built once at startup with a compiled Cisco layout and
//! can then serve any number of pushes, concurrently if needed. Each call is
//! independent: it classifies the items, renders every (ring, device) pair
//! on a bounded worker pool and merges the results.

use std::collections::BTreeMap;

use crossbeam::channel;
use tracing::{debug, info, warn};

use crate::classifier::{classify, Classification};
use crate::config::{PushConfig, UnknownVendorPolicy};
use crate::error::PushError;
use crate::model::{AclFragment, AclPushItem, Ring};
use crate::renderer::VendorRenderer;
use crate::template::{TemplateError, TemplateProvider};
use crate::vendor::RendererRegistry;

/// Device name -> rendered configuration text
pub type DeviceConfigs = BTreeMap<String, String>;

/// Result of one push preparation
#[derive(Debug, Default)]
pub struct PushResult {
    /// Index 0 is the canary ring, index 1 the global ring
    configs: [DeviceConfigs; 2],
    /// Everything that could not be classified or rendered
    pub errors: Vec<PushError>,
}

impl PushResult {
    /// Rendered configs for a ring
    pub fn ring(&self, ring: Ring) -> &DeviceConfigs {
        &self.configs[ring.index()]
    }

    pub fn canary(&self) -> &DeviceConfigs {
        self.ring(Ring::Canary)
    }

    pub fn global(&self) -> &DeviceConfigs {
        self.ring(Ring::Global)
    }

    /// Both mappings, canary first
    pub fn configs(&self) -> &[DeviceConfigs; 2] {
        &self.configs
    }

    /// True when nothing failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One (ring, device) render unit
struct RenderJob<'a> {
    ring: Ring,
    device: &'a str,
    vendor: &'a str,
    fragments: &'a [AclFragment],
}

/// Rendered text for a device, or the error that replaces it
struct RenderOutcome {
    ring: Ring,
    device: String,
    result: Result<String, PushError>,
}

/// Turns push items into per-device configuration for both rings
#[derive(Debug, Clone)]
pub struct PushPreparer {
    renderers: RendererRegistry,
    config: PushConfig,
}

impl PushPreparer {
    /// Create a preparer from an already assembled renderer registry
    pub fn new(renderers: RendererRegistry, config: PushConfig) -> Self {
        Self { renderers, config }
    }

    /// Compile the configured Cisco layout and build the standard renderers
    ///
    /// This is the startup step: a layout that fails to compile is returned
    /// as an error and no preparer exists to serve pushes with.
    pub fn from_provider(
        provider: &dyn TemplateProvider,
        config: PushConfig,
    ) -> Result<Self, TemplateError> {
        let layout = provider.compile(&config.cisco_template)?;
        info!(template = %config.cisco_template, workers = config.workers, "push preparer ready");
        Ok(Self::new(RendererRegistry::standard(layout), config))
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    /// Prepare a push: canary and global configs per device plus errors
    ///
    /// Never fails as a whole. A malformed item is skipped, a device that
    /// fails to render is left out of its ring; both are reported in
    /// [`PushResult::errors`], sorted so identical input yields identical
    /// output.
    pub fn prepare(&self, items: &[AclPushItem]) -> PushResult {
        let mut classification = classify(items);
        let mut errors = std::mem::take(&mut classification.errors);

        let jobs = jobs(&classification);
        let job_count = jobs.len();
        let outcomes = if self.config.workers <= 1 || job_count <= 1 {
            jobs.iter().map(|job| self.render_job(job)).collect()
        } else {
            self.render_parallel(jobs)
        };

        let mut configs: [DeviceConfigs; 2] = Default::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(text) => {
                    configs[outcome.ring.index()].insert(outcome.device, text);
                }
                Err(err) => errors.push(err),
            }
        }
        errors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        info!(
            items = items.len(),
            devices = job_count,
            canary = configs[Ring::Canary.index()].len(),
            global = configs[Ring::Global.index()].len(),
            errors = errors.len(),
            "prepared push"
        );
        PushResult { configs, errors }
    }

    fn render_parallel(&self, jobs: Vec<RenderJob<'_>>) -> Vec<RenderOutcome> {
        let workers = self.config.workers.min(jobs.len());
        let (job_tx, job_rx) = channel::bounded(workers * 2);
        let (out_tx, out_rx) = channel::unbounded();

        let scoped = crossbeam::scope(|s| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let out_tx = out_tx.clone();
                s.spawn(move |_| {
                    for job in job_rx.iter() {
                        if out_tx.send(self.render_job(&job)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(job_rx);
            drop(out_tx);
            for job in jobs {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
            drop(job_tx);
        });
        if let Err(panic) = scoped {
            std::panic::resume_unwind(panic);
        }

        out_rx.iter().collect()
    }

    fn render_job(&self, job: &RenderJob<'_>) -> RenderOutcome {
        let result = match self.renderers.get_by_id(job.vendor) {
            Some(renderer) => renderer.render(job.fragments).map_err(|err| {
                warn!(device = job.device, ring = %job.ring, error = %err, "render failed");
                PushError::render(job.device, job.ring, err)
            }),
            None => match self.config.unknown_vendor {
                UnknownVendorPolicy::Empty => {
                    warn!(device = job.device, vendor = job.vendor, "no renderer for vendor, emitting empty config");
                    Ok(String::new())
                }
                UnknownVendorPolicy::Reject => {
                    Err(PushError::unknown_vendor(job.device, job.vendor, job.ring))
                }
            },
        };
        debug!(device = job.device, ring = %job.ring, ok = result.is_ok(), "rendered device");
        RenderOutcome {
            ring: job.ring,
            device: job.device.to_string(),
            result,
        }
    }
}

/// Every (ring, device) pair of a classification, canary first
fn jobs(classification: &Classification) -> Vec<RenderJob<'_>> {
    Ring::ALL
        .iter()
        .flat_map(|&ring| {
            classification
                .bucket(ring)
                .iter()
                .map(move |(device, fragments)| RenderJob {
                    ring,
                    device: device.as_str(),
                    vendor: classification.vendor(device).unwrap_or_default(),
                    fragments: fragments.as_slice(),
                })
        })
        .collect()
}
