//! Delta computation and write planning
//!
//! A [`Delta`] lists the declared properties whose resolved desired value
//! differs from the live value. [`plan`] turns a delta into the ordered list
//! of setter invocations: one per touched composite group, then one per
//! changed independent property.

use crate::enumerate::CurrentState;
use crate::error::Result;
use crate::facade::Facade;
use crate::manifest::DesiredState;
use crate::schema::{ApplyOrder, CompositeGroup, DefaultPolicy, PropertyDef, ResourceKind};
use crate::value::{Desired, PropertyValue};
use serde::Serialize;
use tracing::trace;

/// One property whose value will change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyChange {
    pub property: &'static str,
    pub current: Option<PropertyValue>,
    pub desired: Option<PropertyValue>,
}

/// Declared properties that differ from the live state, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub changes: Vec<PropertyChange>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn get(&self, property: &str) -> Option<&PropertyChange> {
        self.changes.iter().find(|c| c.property == property)
    }

    pub fn touches(&self, group: &CompositeGroup) -> bool {
        group.members.iter().any(|m| self.get(m).is_some())
    }
}

/// A single setter invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetterCall {
    /// Composite setter name, or the property name for scalar writes
    pub setter: &'static str,
    /// Group the call writes, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
    pub values: Vec<(&'static str, Option<PropertyValue>)>,
}

/// Resolve the `default` sentinel for one property.
pub fn resolve_default(
    facade: &dyn Facade,
    kind: &ResourceKind,
    property: &PropertyDef,
) -> Result<Option<PropertyValue>> {
    match &property.default {
        DefaultPolicy::Literal(value) => Ok(value.clone()),
        DefaultPolicy::Query => {
            let value = facade.default_value(kind.name, property.name)?;
            Ok(value.map(|v| v.canonicalize(property.kind).unwrap_or(v)))
        }
    }
}

/// Resolve a declared value to the concrete value the device should hold.
pub fn resolve(
    facade: &dyn Facade,
    kind: &ResourceKind,
    property: &PropertyDef,
    desired: &Desired,
) -> Result<Option<PropertyValue>> {
    match desired {
        Desired::Value(value) => Ok(Some(value.clone())),
        Desired::Default => resolve_default(facade, kind, property),
    }
}

/// Compare every declared property against the live record.
pub fn compute(
    facade: &dyn Facade,
    kind: &ResourceKind,
    desired: &DesiredState,
    current: &CurrentState,
) -> Result<Delta> {
    let mut delta = Delta::default();
    for property in kind.properties() {
        let Some(requested) = desired.properties.get(property.name) else {
            continue;
        };
        let want = resolve(facade, kind, property, requested)?;
        let have = current.get(property.name).cloned();
        if want != have {
            trace!(
                "{}: {} differs ({:?} -> {:?})",
                desired.reference(),
                property.name,
                have,
                want
            );
            delta.changes.push(PropertyChange {
                property: property.name,
                current: have,
                desired: want,
            });
        }
    }
    Ok(delta)
}

/// Build the ordered setter invocations for a delta.
///
/// Every group with at least one changed member is written once with its full
/// tuple. Unchanged members keep their live value, or their default when the
/// live value is missing.
pub fn plan(
    facade: &dyn Facade,
    kind: &ResourceKind,
    delta: &Delta,
    current: &CurrentState,
) -> Result<Vec<SetterCall>> {
    let mut calls = Vec::new();

    for group in kind.groups.iter().filter(|g| delta.touches(g)) {
        let mut values = Vec::with_capacity(group.members.len());
        for &member in &group.members {
            let value = match delta.get(member) {
                Some(change) => change.desired.clone(),
                None => match current.get(member) {
                    Some(value) => Some(value.clone()),
                    None => resolve_default(facade, kind, kind.property(member)?)?,
                },
            };
            values.push((member, value));
        }
        calls.push(SetterCall {
            setter: group.setter,
            group: Some(group.name),
            values,
        });
    }

    let mut scalars: Vec<&PropertyChange> = Vec::new();
    for change in &delta.changes {
        if kind.property(change.property)?.is_independent() {
            scalars.push(change);
        }
    }
    if kind.apply_order == ApplyOrder::DisableFirst {
        // stable: disables keep their relative order, as do the rest
        scalars.sort_by_key(|c| c.desired != Some(PropertyValue::Bool(false)));
    }
    calls.extend(scalars.into_iter().map(|change| SetterCall {
        setter: change.property,
        group: None,
        values: vec![(change.property, change.desired.clone())],
    }));

    Ok(calls)
}
