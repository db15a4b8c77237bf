//! Instance enumeration
//!
//! Reads every live instance of a kind through the facade and canonicalizes
//! the device-native values so they compare directly against declared values.

use crate::error::Result;
use crate::facade::Facade;
use crate::identity::{canonical_identity, Identity};
use crate::schema::ResourceKind;
use crate::value::PropertyValue;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// Live state of one instance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentState {
    /// Identity in canonical form, comparable with a parsed title
    pub identity: Identity,
    /// Identity as the device reports it; addresses the entity
    #[serde(skip)]
    pub handle: Identity,
    /// Every schema property; `None` when unconfigured or unsupported
    pub properties: IndexMap<&'static str, Option<PropertyValue>>,
}

impl CurrentState {
    /// Record for an instance created in this pass.
    pub fn empty(identity: Identity) -> Self {
        Self {
            handle: identity.clone(),
            identity,
            properties: IndexMap::new(),
        }
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.properties.get(property).and_then(Option::as_ref)
    }
}

/// Enumerate all instances of `kind`.
///
/// Key values are normalized the same way declared titles are, so an instance
/// the device reports as `Ethernet1/1` is found by the title `ethernet1/1`.
/// Properties the device platform does not implement are reported as `None`
/// without being read.
pub fn enumerate(facade: &dyn Facade, kind: &ResourceKind) -> Result<Vec<CurrentState>> {
    let platform = facade.platform();
    let identities = facade.instances(kind.name)?;
    debug!("Enumerating {} instance(s) of {}", identities.len(), kind.name);

    let mut records = Vec::with_capacity(identities.len());
    for handle in identities {
        let entity = facade.entity(kind.name, &handle)?;
        let identity = canonical_identity(kind, &handle);
        let mut properties = IndexMap::with_capacity(kind.properties().len());
        for property in kind.properties() {
            if !property.supported_on(platform) {
                properties.insert(property.name, None);
                continue;
            }
            let value = match entity.get(property.name)? {
                Some(raw) => {
                    let canonical = raw.canonicalize(property.kind);
                    if canonical.is_none() {
                        warn!(
                            "{} '{}': cannot read {} value '{}' as {}, treating as unconfigured",
                            kind.name, identity, property.name, raw, property.kind
                        );
                    }
                    canonical
                }
                None => None,
            };
            properties.insert(property.name, value);
        }
        records.push(CurrentState {
            identity,
            handle,
            properties,
        });
    }
    Ok(records)
}
