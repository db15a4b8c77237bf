//! Manifests and desired state
//!
//! A manifest is a YAML or JSON document listing resource declarations:
//!
//! ```yaml
//! resources:
//!   - type: cisco_bgp_neighbor
//!     title: "42 red 1.1.1.1"
//!     description: uplink
//!     timers_keepalive: 30
//!     timers_holdtime: 90
//!   - type: cisco_vtp
//!     title: default
//!     ensure: absent
//! ```
//!
//! Every attribute other than `type`, `title` and `ensure` is a key field or a
//! property of the kind. Validation turns each declaration into a
//! [`DesiredState`] without touching the device.

use crate::error::{Error, Result};
use crate::identity::{parse_title, resource_ref, Identity};
use crate::platform::Platform;
use crate::schema::{ResourceKind, SchemaRegistry};
use crate::value::{Desired, PropertyValue};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Whether a resource should exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// One resource as written in a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDecl {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "string_or_number")]
    pub title: String,
    #[serde(default)]
    pub ensure: Ensure,
    #[serde(flatten)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Title {
        Text(String),
        Number(u64),
    }

    Ok(match Title::deserialize(deserializer)? {
        Title::Text(s) => s,
        Title::Number(n) => n.to_string(),
    })
}

impl ResourceDecl {
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            ensure: Ensure::Present,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn reference(&self) -> String {
        resource_ref(&self.kind, &self.title)
    }
}

/// A list of resource declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,
}

impl Manifest {
    /// Load a manifest; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::manifest_load(path, e.to_string()))?;
        let manifest = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        let manifest = manifest.map_err(|e| Error::manifest_load(path, e.to_string()))?;
        debug!(
            "Loaded manifest {} ({} resources)",
            path.display(),
            manifest.resources.len()
        );
        Ok(manifest)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate every declaration, reporting each one's outcome in order.
    ///
    /// A declaration whose kind and identity repeat an earlier valid one is
    /// rejected. When `platform` is known, properties the platform lacks are
    /// rejected too.
    pub fn validate_each(
        &self,
        registry: &SchemaRegistry,
        platform: Option<Platform>,
    ) -> Vec<Result<DesiredState>> {
        let mut seen = HashSet::new();
        self.resources
            .iter()
            .map(|decl| -> Result<DesiredState> {
                let state = DesiredState::from_decl(registry, decl, platform)?;
                if !seen.insert((state.kind, state.identity.to_string())) {
                    return Err(Error::validation(
                        decl.reference(),
                        format!("duplicate declaration of {} '{}'", state.kind, state.identity),
                    ));
                }
                Ok(state)
            })
            .collect()
    }

    /// Validate the whole manifest, failing on the first invalid declaration.
    pub fn validate(
        &self,
        registry: &SchemaRegistry,
        platform: Option<Platform>,
    ) -> Result<Vec<DesiredState>> {
        self.validate_each(registry, platform).into_iter().collect()
    }
}

/// Validated desired state of one resource
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredState {
    pub kind: &'static str,
    pub title: String,
    pub identity: Identity,
    pub ensure: Ensure,
    /// Declared properties in manifest order
    pub properties: IndexMap<&'static str, Desired>,
}

impl DesiredState {
    pub fn from_decl(
        registry: &SchemaRegistry,
        decl: &ResourceDecl,
        platform: Option<Platform>,
    ) -> Result<Self> {
        let kind = registry.get(&decl.kind)?;
        let reference = decl.reference();

        let mut explicit = IndexMap::new();
        let mut properties = IndexMap::new();
        for (name, raw) in &decl.attributes {
            if kind.key(name).is_some() {
                explicit.insert(name.clone(), key_value(&reference, name, raw)?);
                continue;
            }
            let property = kind.property(name)?;
            let desired = property
                .coerce(raw)
                .map_err(|message| Error::validation(&reference, message))?;
            if let Some(platform) = platform.filter(|_| decl.ensure == Ensure::Present) {
                if !property.supported_on(platform) {
                    return Err(Error::Unsupported {
                        property: property.name.to_string(),
                        platform: platform.to_string(),
                    });
                }
            }
            properties.insert(property.name, desired);
        }

        let identity = parse_title(kind, &decl.title, &explicit)?;

        match decl.ensure {
            Ensure::Present => {
                expand_exclusive(kind, &reference, &mut properties);
                check_rules(kind, &reference, &properties)?;
            }
            Ensure::Absent if !properties.is_empty() => {
                debug!(
                    "{}: ensure is absent, ignoring {} declared properties",
                    reference,
                    properties.len()
                );
            }
            Ensure::Absent => {}
        }

        Ok(Self {
            kind: kind.name,
            title: decl.title.clone(),
            identity,
            ensure: decl.ensure,
            properties,
        })
    }

    /// Reference used in messages, e.g. `cisco_vtp[default]`.
    pub fn reference(&self) -> String {
        resource_ref(self.kind, &self.title)
    }
}

fn key_value(reference: &str, name: &str, raw: &serde_json::Value) -> Result<String> {
    match raw {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::validation(
            reference,
            format!("key attribute {} must be a string or number (got {})", name, other),
        )),
    }
}

fn enabled_members(
    members: &[&'static str],
    properties: &IndexMap<&'static str, Desired>,
) -> Vec<&'static str> {
    members
        .iter()
        .copied()
        .filter(|m| {
            properties.get(m).and_then(Desired::literal) == Some(&PropertyValue::Bool(true))
        })
        .collect()
}

/// Turn off the other members of an exclusive set when one is enabled.
fn expand_exclusive(
    kind: &ResourceKind,
    reference: &str,
    properties: &mut IndexMap<&'static str, Desired>,
) {
    for set in kind.exclusive.iter().filter(|s| s.disable_others) {
        let enabled = enabled_members(&set.members, properties);
        if enabled.len() != 1 {
            continue;
        }
        for &member in &set.members {
            if !properties.contains_key(member) {
                properties.insert(member, Desired::Value(PropertyValue::Bool(false)));
            }
        }
        debug!("{}: {} enabled, disabling the other methods", reference, enabled[0]);
    }
}

/// Enforce the kind's cross-property rules on a set of declared properties.
pub fn check_rules(
    kind: &ResourceKind,
    reference: &str,
    properties: &IndexMap<&'static str, Desired>,
) -> Result<()> {
    for set in &kind.exclusive {
        let enabled = enabled_members(&set.members, properties);
        if enabled.len() > 1 {
            return Err(Error::MutualExclusion {
                resource: reference.to_string(),
                properties: enabled.iter().map(|p| p.to_string()).collect(),
            });
        }
    }

    for rule in &kind.requirements {
        let Some(declared) = properties.get(rule.property) else {
            continue;
        };
        let applies = match declared {
            Desired::Default => true,
            Desired::Value(value) => !rule.unless.contains(&value.to_string().as_str()),
        };
        if applies && !properties.contains_key(rule.requires) {
            return Err(Error::validation(
                reference,
                format!(
                    "the '{}' property must be set when specifying '{}'",
                    rule.requires, rule.property
                ),
            ));
        }
    }
    Ok(())
}
