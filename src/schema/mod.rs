//! Attribute schema
//!
//! A [`ResourceKind`] is a static table describing one kind of device
//! configuration entity: the key fields that identify an instance, the
//! properties that can be managed, which properties must be written together
//! through a composite setter, and the cross-property rules the device
//! enforces. The reconciliation adapter is generic over this table; no kind
//! carries its own getter or setter code.
//!
//! Built-in kinds live in [`kinds`] and are reachable through
//! [`SchemaRegistry`].

pub mod kinds;

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::value::{Desired, PropertyValue, DEFAULT_KEYWORD};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// ============================================================================
// Property Descriptors
// ============================================================================

/// Shape of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Boolean,
    Integer,
    String,
    FlatList,
    NestedList,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Boolean => write!(f, "boolean"),
            PropertyKind::Integer => write!(f, "integer"),
            PropertyKind::String => write!(f, "string"),
            PropertyKind::FlatList => write!(f, "flat_list"),
            PropertyKind::NestedList => write!(f, "nested_list"),
        }
    }
}

/// How the `default` keyword resolves for a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// A fixed value; `None` means the property is unconfigured by default
    Literal(Option<PropertyValue>),
    /// Ask the facade for the device's current default
    Query,
}

/// Descriptor for one managed property
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub default: DefaultPolicy,
    /// Composite group this property is written through, if any
    pub group: Option<&'static str>,
    /// Inclusive bounds for integer properties
    pub range: Option<RangeInclusive<i64>>,
    /// Accepted literals for string properties
    pub allowed: Option<&'static [&'static str]>,
    /// Platforms that do not implement this property
    pub unsupported_on: Vec<Platform>,
    pub description: &'static str,
}

impl PropertyDef {
    fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            default: DefaultPolicy::Query,
            group: None,
            range: None,
            allowed: None,
            unsupported_on: Vec::new(),
            description: "",
        }
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Integer)
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, PropertyKind::String)
    }

    pub fn flat_list(name: &'static str) -> Self {
        Self::new(name, PropertyKind::FlatList)
    }

    pub fn nested_list(name: &'static str) -> Self {
        Self::new(name, PropertyKind::NestedList)
    }

    /// Resolve `default` to a fixed value instead of querying the device.
    pub fn with_default(mut self, value: PropertyValue) -> Self {
        self.default = DefaultPolicy::Literal(Some(value));
        self
    }

    /// Resolve `default` to "unconfigured".
    pub fn unset_by_default(mut self) -> Self {
        self.default = DefaultPolicy::Literal(None);
        self
    }

    pub fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    pub fn unsupported_on(mut self, platforms: &[Platform]) -> Self {
        self.unsupported_on = platforms.to_vec();
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Whether this property has its own single-attribute setter.
    pub fn is_independent(&self) -> bool {
        self.group.is_none()
    }

    pub fn supported_on(&self, platform: Platform) -> bool {
        !self.unsupported_on.contains(&platform)
    }

    /// Parse a declared value into a [`Desired`] for this property.
    pub fn coerce(&self, raw: &serde_json::Value) -> std::result::Result<Desired, String> {
        if raw.as_str() == Some(DEFAULT_KEYWORD) {
            return Ok(Desired::Default);
        }
        let value = PropertyValue::from_json(raw)
            .and_then(|v| v.canonicalize(self.kind))
            .ok_or_else(|| format!("{} must be a {} (got {})", self.name, self.kind, raw))?;
        self.check(&value)?;
        Ok(Desired::Value(value))
    }

    /// Check range and allowed-value constraints.
    pub fn check(&self, value: &PropertyValue) -> std::result::Result<(), String> {
        if let (Some(range), Some(n)) = (&self.range, value.as_i64()) {
            if !range.contains(&n) {
                return Err(format!(
                    "{} value should be between {} and {}",
                    self.name,
                    range.start(),
                    range.end()
                ));
            }
        }
        if let (Some(allowed), Some(s)) = (self.allowed, value.as_str()) {
            if !allowed.contains(&s) {
                return Err(format!(
                    "{} must be one of {}, got '{}'",
                    self.name,
                    allowed.join(", "),
                    s
                ));
            }
        }
        Ok(())
    }
}

/// Properties that the device only accepts together, through one setter
#[derive(Debug, Clone)]
pub struct CompositeGroup {
    pub name: &'static str,
    /// Facade setter invoked with the full member tuple
    pub setter: &'static str,
    /// Members in setter argument order
    pub members: Vec<&'static str>,
}

impl CompositeGroup {
    pub fn new(name: &'static str, setter: &'static str, members: &[&'static str]) -> Self {
        Self {
            name,
            setter,
            members: members.to_vec(),
        }
    }
}

/// Boolean properties of which at most one may be `true`
#[derive(Debug, Clone)]
pub struct ExclusiveSet {
    pub members: Vec<&'static str>,
    /// Force the other members to `false` when one is declared `true`
    pub disable_others: bool,
}

/// Declaring `property` with a value outside `unless` requires `requires`
#[derive(Debug, Clone)]
pub struct Requirement {
    pub property: &'static str,
    pub unless: &'static [&'static str],
    pub requires: &'static str,
}

/// Order in which changed scalar properties are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyOrder {
    /// Schema order
    #[default]
    Declared,
    /// Boolean `false` values first, then everything else
    DisableFirst,
}

// ============================================================================
// Key Fields
// ============================================================================

static ASN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+|\d+\.\d+)$").expect("Invalid ASN regex"));

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid number regex"));

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").expect("Invalid word regex"));

/// Post-parse normalization applied to a key value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyNormalizer {
    #[default]
    None,
    /// ASDOT `1.5` becomes ASPLAIN `65541`
    Asn,
    /// `1.1.1.1/24` becomes `1.1.1.0/24`
    Network,
    Lowercase,
}

/// One component of a composite identity
#[derive(Debug, Clone)]
pub struct KeyField {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// Value used when neither the title nor an attribute supplies one
    pub default: Option<&'static str>,
    pub allowed: Option<&'static [&'static str]>,
    /// Extra value check beyond the pattern, e.g. a numeric range
    pub check: Option<fn(&str) -> bool>,
    pub normalizer: KeyNormalizer,
}

impl KeyField {
    /// A free-form single-word key.
    pub fn word(name: &'static str) -> Self {
        Self {
            name,
            pattern: &WORD_REGEX,
            default: None,
            allowed: None,
            check: None,
            normalizer: KeyNormalizer::None,
        }
    }

    /// A non-negative integer key.
    pub fn number(name: &'static str) -> Self {
        Self {
            pattern: &NUMBER_REGEX,
            ..Self::word(name)
        }
    }

    /// A BGP autonomous system number in ASPLAIN or ASDOT notation.
    pub fn asn(name: &'static str) -> Self {
        Self {
            pattern: &ASN_REGEX,
            normalizer: KeyNormalizer::Asn,
            ..Self::word(name)
        }
    }

    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    pub fn with_check(mut self, check: fn(&str) -> bool) -> Self {
        self.check = Some(check);
        self
    }

    pub fn normalized(mut self, normalizer: KeyNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
            && self.allowed.map_or(true, |allowed| allowed.contains(&token))
            && self.check.map_or(true, |check| check(token))
    }
}

// ============================================================================
// Resource Kinds
// ============================================================================

/// Static description of one configuration entity type
#[derive(Debug, Clone)]
pub struct ResourceKind {
    pub name: &'static str,
    pub description: &'static str,
    pub keys: Vec<KeyField>,
    properties: Vec<PropertyDef>,
    pub groups: Vec<CompositeGroup>,
    pub exclusive: Vec<ExclusiveSet>,
    pub requirements: Vec<Requirement>,
    pub apply_order: ApplyOrder,
}

impl ResourceKind {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            keys: Vec::new(),
            properties: Vec::new(),
            groups: Vec::new(),
            exclusive: Vec::new(),
            requirements: Vec::new(),
            apply_order: ApplyOrder::Declared,
        }
    }

    pub fn with_key(mut self, key: KeyField) -> Self {
        self.keys.push(key);
        self
    }

    /// A kind with exactly one instance, named `default`.
    pub fn singleton(self) -> Self {
        self.with_key(KeyField::word("name").with_allowed(&["default"]))
    }

    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_group(mut self, group: CompositeGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_exclusive(mut self, members: &[&'static str], disable_others: bool) -> Self {
        self.exclusive.push(ExclusiveSet {
            members: members.to_vec(),
            disable_others,
        });
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_apply_order(mut self, order: ApplyOrder) -> Self {
        self.apply_order = order;
        self
    }

    /// Properties in schema order.
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    /// Look up a property, failing for names the kind does not declare.
    pub fn property(&self, name: &str) -> Result<&PropertyDef> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::unknown_property(self.name, name))
    }

    pub fn is_boolean(&self, name: &str) -> Result<bool> {
        Ok(self.property(name)?.kind == PropertyKind::Boolean)
    }

    /// The composite group that owns `name`, if any.
    pub fn composite_group(&self, name: &str) -> Result<Option<&CompositeGroup>> {
        let property = self.property(name)?;
        Ok(property
            .group
            .and_then(|g| self.groups.iter().find(|group| group.name == g)))
    }

    pub fn key(&self, name: &str) -> Option<&KeyField> {
        self.keys.iter().find(|k| k.name == name)
    }

    /// Number of key fields in the composite identity.
    pub fn arity(&self) -> usize {
        self.keys.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.keys.len() == 1 && self.keys[0].allowed == Some(&["default"][..])
    }

    pub fn supports(&self, name: &str, platform: Platform) -> Result<bool> {
        Ok(self.property(name)?.supported_on(platform))
    }

    /// Check the schema's own consistency: every group member exists and
    /// points back at its group, and every rule names known properties.
    pub fn check_consistency(&self) -> Result<()> {
        for group in &self.groups {
            for member in &group.members {
                let property = self.property(member)?;
                if property.group != Some(group.name) {
                    return Err(Error::Config(format!(
                        "{}: property '{}' is listed in group '{}' but does not belong to it",
                        self.name, member, group.name
                    )));
                }
            }
        }
        for property in &self.properties {
            if let Some(g) = property.group {
                if !self.groups.iter().any(|group| group.name == g) {
                    return Err(Error::Config(format!(
                        "{}: property '{}' references unknown group '{}'",
                        self.name, property.name, g
                    )));
                }
            }
        }
        for set in &self.exclusive {
            for member in &set.members {
                if !self.is_boolean(member)? {
                    return Err(Error::Config(format!(
                        "{}: exclusive member '{}' is not boolean",
                        self.name, member
                    )));
                }
            }
        }
        for rule in &self.requirements {
            self.property(rule.property)?;
            self.property(rule.requires)?;
        }
        Ok(())
    }
}

// ============================================================================
// Registry
// ============================================================================

static BUILTIN: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::with_builtins);

/// Registry for looking up resource kinds by name
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    kinds: IndexMap<&'static str, ResourceKind>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Create a registry with all built-in kinds
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in kinds::builtin() {
            registry.register(kind);
        }
        registry
    }

    /// The process-wide registry of built-in kinds.
    pub fn builtin() -> &'static SchemaRegistry {
        &BUILTIN
    }

    pub fn register(&mut self, kind: ResourceKind) {
        self.kinds.insert(kind.name, kind);
    }

    pub fn get(&self, name: &str) -> Result<&ResourceKind> {
        self.kinds
            .get(name)
            .ok_or_else(|| Error::UnknownKind(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.kinds.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceKind> {
        self.kinds.values()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
