//! In-memory device
//!
//! A [`MemoryDevice`] holds the configuration of one simulated switch. It can
//! be loaded from and saved to a snapshot file (YAML or JSON), records every
//! facade interaction, and can be told to reject specific commands.
//!
//! ```yaml
//! platform: n9k
//! entities:
//!   cisco_bgp:
//!     - key: { asn: "55", vrf: default }
//!       properties: { router_id: 1.1.1.1, shutdown: "false" }
//! defaults:
//!   cisco_bgp:
//!     shutdown: false
//! faults:
//!   set_metric_set: "% Invalid metric"
//! ```

use super::{Entity, Facade, FacadeCall, FacadeError, FacadeResult};
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::platform::Platform;
use crate::schema::CompositeGroup;
use crate::value::PropertyValue;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// One configured instance in a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub key: Identity,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
}

/// Serialized device state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default)]
    pub entities: IndexMap<String, Vec<EntityRecord>>,
    /// Per-kind property defaults answered to default-value queries
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub defaults: IndexMap<String, IndexMap<String, PropertyValue>>,
    /// Commands the device rejects, with the error text it returns
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub faults: IndexMap<String, String>,
}

impl DeviceSnapshot {
    /// Load a snapshot; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read device snapshot {}: {}", path.display(), e))
        })?;
        if is_json(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

#[derive(Debug, Default)]
struct DeviceState {
    snapshot: DeviceSnapshot,
    calls: Vec<FacadeCall>,
}

impl DeviceState {
    fn fault(&self, command: &str) -> FacadeResult<()> {
        match self.snapshot.faults.get(command) {
            Some(message) => Err(FacadeError::rejected(command, message.clone())),
            None => Ok(()),
        }
    }

    fn record_mut(&mut self, kind: &str, identity: &Identity) -> FacadeResult<&mut EntityRecord> {
        self.snapshot
            .entities
            .get_mut(kind)
            .and_then(|records| records.iter_mut().find(|r| &r.key == identity))
            .ok_or_else(|| FacadeError::not_found(kind, identity))
    }

    fn exists(&self, kind: &str, identity: &Identity) -> bool {
        self.snapshot
            .entities
            .get(kind)
            .is_some_and(|records| records.iter().any(|r| &r.key == identity))
    }
}

/// Simulated switch
#[derive(Debug, Default)]
pub struct MemoryDevice {
    state: Mutex<DeviceState>,
}

impl MemoryDevice {
    pub fn new(platform: Platform) -> Self {
        Self::from_snapshot(DeviceSnapshot {
            platform,
            ..Default::default()
        })
    }

    pub fn from_snapshot(snapshot: DeviceSnapshot) -> Self {
        Self {
            state: Mutex::new(DeviceState {
                snapshot,
                calls: Vec::new(),
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let snapshot = DeviceSnapshot::load(path)?;
        debug!(
            "Loaded device snapshot {} ({} kinds)",
            path.display(),
            snapshot.entities.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Copy of the current device state.
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.state.lock().snapshot.clone()
    }

    /// Add an instance directly, bypassing the call log.
    pub fn insert(
        &self,
        kind: &str,
        key: Identity,
        properties: impl IntoIterator<Item = (&'static str, PropertyValue)>,
    ) {
        let record = EntityRecord {
            key,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        };
        self.state
            .lock()
            .snapshot
            .entities
            .entry(kind.to_string())
            .or_default()
            .push(record);
    }

    pub fn set_default(&self, kind: &str, property: &str, value: PropertyValue) {
        self.state
            .lock()
            .snapshot
            .defaults
            .entry(kind.to_string())
            .or_default()
            .insert(property.to_string(), value);
    }

    /// Make the device reject `command` (a setter, property name, `create`,
    /// `destroy` or `instances`) with `message`.
    pub fn inject_fault(&self, command: &str, message: &str) {
        self.state
            .lock()
            .snapshot
            .faults
            .insert(command.to_string(), message.to_string());
    }

    /// Raw stored value of one property.
    pub fn stored(&self, kind: &str, key: &Identity, property: &str) -> Option<PropertyValue> {
        let state = self.state.lock();
        state
            .snapshot
            .entities
            .get(kind)?
            .iter()
            .find(|r| &r.key == key)?
            .properties
            .get(property)
            .cloned()
    }

    pub fn contains(&self, kind: &str, key: &Identity) -> bool {
        self.state.lock().exists(kind, key)
    }

    /// Every interaction recorded so far.
    pub fn calls(&self) -> Vec<FacadeCall> {
        self.state.lock().calls.clone()
    }

    /// Recorded interactions that changed device state.
    pub fn mutations(&self) -> Vec<FacadeCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn handle(&self, kind: &str, identity: &Identity) -> Box<dyn Entity + '_> {
        Box::new(MemoryEntity {
            device: self,
            kind: kind.to_string(),
            identity: identity.clone(),
        })
    }
}

impl Facade for MemoryDevice {
    fn platform(&self) -> Platform {
        self.state.lock().snapshot.platform
    }

    fn instances(&self, kind: &str) -> FacadeResult<Vec<Identity>> {
        let mut state = self.state.lock();
        state.calls.push(FacadeCall::Instances {
            kind: kind.to_string(),
        });
        state.fault("instances")?;
        Ok(state
            .snapshot
            .entities
            .get(kind)
            .map(|records| records.iter().map(|r| r.key.clone()).collect())
            .unwrap_or_default())
    }

    fn entity(&self, kind: &str, identity: &Identity) -> FacadeResult<Box<dyn Entity + '_>> {
        if !self.state.lock().exists(kind, identity) {
            return Err(FacadeError::not_found(kind, identity));
        }
        Ok(self.handle(kind, identity))
    }

    fn instantiate(
        &self,
        kind: &str,
        identity: &Identity,
    ) -> FacadeResult<Box<dyn Entity + '_>> {
        {
            let mut state = self.state.lock();
            state.calls.push(FacadeCall::Create {
                kind: kind.to_string(),
                identity: identity.to_string(),
            });
            state.fault("create")?;
            if state.exists(kind, identity) {
                return Err(FacadeError::rejected(
                    "create",
                    format!("{} '{}' already exists", kind, identity),
                ));
            }
            state
                .snapshot
                .entities
                .entry(kind.to_string())
                .or_default()
                .push(EntityRecord {
                    key: identity.clone(),
                    properties: IndexMap::new(),
                });
        }
        trace!("Created {} '{}'", kind, identity);
        Ok(self.handle(kind, identity))
    }

    fn default_value(&self, kind: &str, property: &str) -> FacadeResult<Option<PropertyValue>> {
        let mut state = self.state.lock();
        state.calls.push(FacadeCall::DefaultValue {
            kind: kind.to_string(),
            property: property.to_string(),
        });
        Ok(state
            .snapshot
            .defaults
            .get(kind)
            .and_then(|defaults| defaults.get(property))
            .cloned())
    }
}

struct MemoryEntity<'d> {
    device: &'d MemoryDevice,
    kind: String,
    identity: Identity,
}

impl Entity for MemoryEntity<'_> {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn get(&self, property: &str) -> FacadeResult<Option<PropertyValue>> {
        let mut state = self.device.state.lock();
        state.calls.push(FacadeCall::Get {
            kind: self.kind.clone(),
            identity: self.identity.to_string(),
            property: property.to_string(),
        });
        state.fault("get")?;
        let record = state.record_mut(&self.kind, &self.identity)?;
        Ok(record.properties.get(property).cloned())
    }

    fn set(&mut self, property: &str, value: Option<PropertyValue>) -> FacadeResult<()> {
        let mut state = self.device.state.lock();
        state.calls.push(FacadeCall::Set {
            kind: self.kind.clone(),
            identity: self.identity.to_string(),
            property: property.to_string(),
            value: value.clone(),
        });
        state.fault(property)?;
        let record = state.record_mut(&self.kind, &self.identity)?;
        store(record, property, value);
        Ok(())
    }

    fn set_group(
        &mut self,
        group: &CompositeGroup,
        values: &[(&str, Option<PropertyValue>)],
    ) -> FacadeResult<()> {
        let mut state = self.device.state.lock();
        state.calls.push(FacadeCall::SetGroup {
            kind: self.kind.clone(),
            identity: self.identity.to_string(),
            setter: group.setter.to_string(),
            values: values
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        });
        state.fault(group.setter)?;
        let record = state.record_mut(&self.kind, &self.identity)?;
        for (name, value) in values {
            store(record, name, value.clone());
        }
        Ok(())
    }

    fn destroy(self: Box<Self>) -> FacadeResult<()> {
        let mut state = self.device.state.lock();
        state.calls.push(FacadeCall::Destroy {
            kind: self.kind.clone(),
            identity: self.identity.to_string(),
        });
        state.fault("destroy")?;
        let records = state
            .snapshot
            .entities
            .get_mut(&self.kind)
            .ok_or_else(|| FacadeError::not_found(&self.kind, &self.identity))?;
        let before = records.len();
        records.retain(|r| r.key != self.identity);
        if records.len() == before {
            return Err(FacadeError::not_found(&self.kind, &self.identity));
        }
        trace!("Destroyed {} '{}'", self.kind, self.identity);
        Ok(())
    }
}

fn store(record: &mut EntityRecord, property: &str, value: Option<PropertyValue>) {
    match value {
        Some(value) => {
            record.properties.insert(property.to_string(), value);
        }
        None => {
            record.properties.shift_remove(property);
        }
    }
}
