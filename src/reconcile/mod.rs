//! Reconciliation adapter
//!
//! One pass converges one resource instance:
//!
//! 1. **Lookup**: enumerate the kind and match the desired identity.
//! 2. **Ensure**: `absent` destroys and stops; `present` on a missing
//!    instance instantiates it and continues from an empty record.
//! 3. **Delta**: compare declared properties against the live values.
//! 4. **Composite groups**: each touched group is written once, with every
//!    member populated.
//! 5. **Scalars**: each remaining changed property is written on its own.
//!
//! Facade errors are not caught or retried; they end the pass and propagate
//! to the caller. In check mode the whole pass runs but nothing is written.

pub mod delta;

pub use delta::{Delta, PropertyChange, SetterCall};

use crate::enumerate::{enumerate, CurrentState};
use crate::error::{Error, Result};
use crate::facade::{Entity, Facade};
use crate::identity::Identity;
use crate::manifest::{check_rules, DesiredState, Ensure};
use crate::schema::ResourceKind;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Unchanged,
    Created,
    Updated,
    Destroyed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Unchanged => write!(f, "unchanged"),
            Action::Created => write!(f, "created"),
            Action::Updated => write!(f, "updated"),
            Action::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Compute and report changes without writing them
    pub check_mode: bool,
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }
}

/// What a pass did, or would do in check mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub resource: String,
    pub identity: Identity,
    pub action: Action,
    pub changes: Vec<PropertyChange>,
    pub setters: Vec<SetterCall>,
    pub check_mode: bool,
}

impl ReconcileReport {
    fn new(desired: &DesiredState, action: Action, options: &ReconcileOptions) -> Self {
        Self {
            resource: desired.reference(),
            identity: desired.identity.clone(),
            action,
            changes: Vec::new(),
            setters: Vec::new(),
            check_mode: options.check_mode,
        }
    }

    pub fn changed(&self) -> bool {
        self.action != Action::Unchanged
    }
}

/// Find the single enumerated instance with `identity`.
pub fn lookup<'a>(
    kind: &ResourceKind,
    instances: &'a [CurrentState],
    identity: &Identity,
) -> Result<Option<&'a CurrentState>> {
    let mut matches = instances.iter().filter(|c| &c.identity == identity);
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        return Err(Error::AmbiguousMatch {
            kind: kind.name.to_string(),
            identity: identity.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Run one reconciliation pass for `desired`.
pub fn reconcile(
    facade: &dyn Facade,
    kind: &ResourceKind,
    desired: &DesiredState,
    options: &ReconcileOptions,
) -> Result<ReconcileReport> {
    let resource = desired.reference();

    if desired.ensure == Ensure::Present {
        check_rules(kind, &resource, &desired.properties)?;
        let platform = facade.platform();
        for name in desired.properties.keys() {
            let property = kind.property(name)?;
            if !property.supported_on(platform) {
                return Err(Error::Unsupported {
                    property: property.name.to_string(),
                    platform: platform.to_string(),
                });
            }
        }
    }

    let instances = enumerate(facade, kind)?;
    let found = lookup(kind, &instances, &desired.identity)?;

    match (desired.ensure, found) {
        (Ensure::Absent, None) => {
            debug!("{}: already absent", resource);
            Ok(ReconcileReport::new(desired, Action::Unchanged, options))
        }
        (Ensure::Absent, Some(current)) => {
            if !options.check_mode {
                facade.entity(kind.name, &current.handle)?.destroy()?;
            }
            info!("{}: destroyed", resource);
            Ok(ReconcileReport::new(desired, Action::Destroyed, options))
        }
        (Ensure::Present, None) => {
            let entity = if options.check_mode {
                None
            } else {
                Some(facade.instantiate(kind.name, &desired.identity)?)
            };
            info!("{}: created", resource);
            let empty = CurrentState::empty(desired.identity.clone());
            converge(facade, kind, desired, &empty, entity, Action::Created, options)
        }
        (Ensure::Present, Some(current)) => {
            let entity = if options.check_mode {
                None
            } else {
                Some(facade.entity(kind.name, &current.handle)?)
            };
            converge(facade, kind, desired, current, entity, Action::Updated, options)
        }
    }
}

fn converge(
    facade: &dyn Facade,
    kind: &ResourceKind,
    desired: &DesiredState,
    current: &CurrentState,
    mut entity: Option<Box<dyn Entity + '_>>,
    action: Action,
    options: &ReconcileOptions,
) -> Result<ReconcileReport> {
    let delta = delta::compute(facade, kind, desired, current)?;
    let setters = delta::plan(facade, kind, &delta, current)?;

    if let Some(entity) = entity.as_mut() {
        for call in &setters {
            apply(kind, &mut **entity, call)?;
        }
    }

    let action = match action {
        Action::Updated if delta.is_empty() => Action::Unchanged,
        other => other,
    };
    if !delta.is_empty() {
        info!(
            "{}: {} propert{} changed via {} setter call(s)",
            desired.reference(),
            delta.changes.len(),
            if delta.changes.len() == 1 { "y" } else { "ies" },
            setters.len()
        );
    }

    let mut report = ReconcileReport::new(desired, action, options);
    report.changes = delta.changes;
    report.setters = setters;
    Ok(report)
}

fn apply(kind: &ResourceKind, entity: &mut (dyn Entity + '_), call: &SetterCall) -> Result<()> {
    debug!("{} '{}': {}", kind.name, entity.identity(), call.setter);
    match call.group {
        Some(name) => {
            let group = kind
                .groups
                .iter()
                .find(|g| g.name == name)
                .ok_or_else(|| Error::Config(format!("{}: unknown group '{}'", kind.name, name)))?;
            entity.set_group(group, &call.values)?;
        }
        None => {
            for (property, value) in &call.values {
                entity.set(property, value.clone())?;
            }
        }
    }
    Ok(())
}
