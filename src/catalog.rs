//! Catalog application
//!
//! A [`Catalog`] is a fully validated manifest. Applying it reconciles each
//! resource in declaration order against one facade. A resource that fails
//! is recorded and the run moves on to the next one; the adapter itself never
//! recovers from errors.

use crate::error::Result;
use crate::facade::Facade;
use crate::manifest::{DesiredState, Manifest};
use crate::platform::Platform;
use crate::reconcile::{reconcile, Action, ReconcileOptions, ReconcileReport};
use crate::schema::SchemaRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Result of applying one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResourceOutcome {
    Ok(ReconcileReport),
    Failed { resource: String, message: String },
}

impl ResourceOutcome {
    pub fn resource(&self) -> &str {
        match self {
            ResourceOutcome::Ok(report) => &report.resource,
            ResourceOutcome::Failed { resource, .. } => resource,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResourceOutcome::Failed { .. })
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, ResourceOutcome::Ok(report) if report.changed())
    }
}

/// Counts and per-resource outcomes of one run
#[derive(Debug, Clone, Serialize)]
pub struct ApplySummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub check_mode: bool,
    pub ok: usize,
    pub changed: usize,
    pub failed: usize,
    pub outcomes: Vec<ResourceOutcome>,
}

impl ApplySummary {
    fn new(check_mode: bool) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            check_mode,
            ok: 0,
            changed: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    fn record(&mut self, outcome: ResourceOutcome) {
        if outcome.is_failed() {
            self.failed += 1;
        } else if outcome.is_changed() {
            self.changed += 1;
        } else {
            self.ok += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Reports of resources that were (or would be) changed.
    pub fn changes(&self) -> impl Iterator<Item = &ReconcileReport> {
        self.outcomes.iter().filter_map(|o| match o {
            ResourceOutcome::Ok(report) if report.action != Action::Unchanged => Some(report),
            _ => None,
        })
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// A validated set of desired states
#[derive(Debug, Clone)]
pub struct Catalog<'r> {
    registry: &'r SchemaRegistry,
    resources: Vec<DesiredState>,
}

impl<'r> Catalog<'r> {
    /// Validate a whole manifest. Nothing is applied if any declaration is
    /// invalid.
    pub fn compile(
        manifest: &Manifest,
        registry: &'r SchemaRegistry,
        platform: Option<Platform>,
    ) -> Result<Self> {
        let resources = manifest.validate(registry, platform)?;
        Ok(Self {
            registry,
            resources,
        })
    }

    pub fn resources(&self) -> &[DesiredState] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Reconcile every resource, isolating per-resource failures.
    pub fn apply(&self, facade: &dyn Facade, options: &ReconcileOptions) -> ApplySummary {
        let mut summary = ApplySummary::new(options.check_mode);
        info!(
            "Applying {} resource(s) on {}{}",
            self.resources.len(),
            facade.platform(),
            if options.check_mode { " (check mode)" } else { "" }
        );

        for desired in &self.resources {
            let outcome = self
                .registry
                .get(desired.kind)
                .and_then(|kind| reconcile(facade, kind, desired, options));
            let outcome = match outcome {
                Ok(report) => ResourceOutcome::Ok(report),
                Err(e) => {
                    warn!("{}: {}", desired.reference(), e);
                    ResourceOutcome::Failed {
                        resource: desired.reference(),
                        message: e.to_string(),
                    }
                }
            };
            summary.record(outcome);
        }

        summary.finished_at = Utc::now();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::MemoryDevice;
    use crate::identity::Identity;
    use crate::manifest::ResourceDecl;
    use serde_json::json;

    #[test]
    fn test_failure_is_isolated() {
        let device = MemoryDevice::new(Platform::N9k);
        device.insert("cisco_vtp", Identity::singleton(), []);
        device.inject_fault("domain", "% VTP domain locked");

        let manifest = Manifest {
            resources: vec![
                ResourceDecl::new("cisco_vtp", "default").with_attr("domain", json!("lab")),
                ResourceDecl::new("cisco_bgp", "42").with_attr("router_id", json!("1.1.1.1")),
            ],
        };
        let catalog = Catalog::compile(&manifest, SchemaRegistry::builtin(), None).unwrap();
        let summary = catalog.apply(&device, &ReconcileOptions::new());

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.changed, 1);
        assert!(summary.outcomes[0].is_failed());
        assert!(summary.outcomes[0].resource().starts_with("cisco_vtp"));
        assert!(device.contains("cisco_bgp", &Identity::from_pairs([("asn", "42"), ("vrf", "default")])));
    }

    #[test]
    fn test_invalid_manifest_applies_nothing() {
        let manifest = Manifest {
            resources: vec![
                ResourceDecl::new("cisco_bgp", "42"),
                ResourceDecl::new("cisco_bgp", "not-an-asn extra"),
            ],
        };
        assert!(Catalog::compile(&manifest, SchemaRegistry::builtin(), None).is_err());
    }
}
