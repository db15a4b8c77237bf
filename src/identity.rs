//! Resource identities and title parsing
//!
//! A declared resource is named by a free-text title. Kinds with a composite
//! key split the title positionally into their key fields; key attributes
//! declared alongside the title always win over the positional value, and
//! fields with a default fall back to it.
//!
//! ```text
//! cisco_bgp_neighbor { "42 red 1.1.1.1": }   -> asn=42 vrf=red neighbor=1.1.1.1
//! cisco_bgp_neighbor { "42": vrf => blue,
//!                            neighbor => 2.2.2.2 }  -> asn=42 vrf=blue neighbor=2.2.2.2
//! cisco_bgp          { "42": }               -> asn=42 vrf=default
//! ```

use crate::error::{Error, Result};
use crate::schema::{KeyField, KeyNormalizer, ResourceKind};
use indexmap::IndexMap;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;
use tracing::warn;

/// Composite key of one resource instance, in key-field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identity(IndexMap<String, String>);

// Hand-written snapshots often leave numeric keys unquoted (`asn: 55`).
impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum KeyValue {
            Text(String),
            Number(u64),
        }

        let fields = IndexMap::<String, KeyValue>::deserialize(deserializer)?;
        Ok(Self(
            fields
                .into_iter()
                .map(|(field, value)| {
                    let value = match value {
                        KeyValue::Text(s) => s,
                        KeyValue::Number(n) => n.to_string(),
                    };
                    (field, value)
                })
                .collect(),
        ))
    }
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an identity from `(field, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Identity of a singleton kind.
    pub fn singleton() -> Self {
        Self::from_pairs([("name", "default")])
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", values.join(" "))
    }
}

/// Reference string used in messages, e.g. `cisco_vtp[default]`.
pub fn resource_ref(kind: &str, title: &str) -> String {
    format!("{}[{}]", kind, title)
}

/// Resolve a title plus explicitly declared key attributes into an identity.
pub fn parse_title(
    kind: &ResourceKind,
    title: &str,
    explicit: &IndexMap<String, String>,
) -> Result<Identity> {
    let reference = resource_ref(kind.name, title);
    let tokens: Vec<&str> = title.split_whitespace().collect();

    if tokens.is_empty() {
        return Err(Error::validation(reference, "title must not be empty"));
    }
    if kind.is_singleton() && title.trim() != "default" {
        return Err(Error::validation(
            reference,
            "only 'default' is accepted as a valid name",
        ));
    }
    if tokens.len() > kind.arity() {
        return Err(Error::validation(
            reference,
            format!(
                "title has {} fields but {} accepts at most {}",
                tokens.len(),
                kind.name,
                kind.arity()
            ),
        ));
    }

    let positional = positional_fields(kind, &tokens, &reference)?;

    let mut identity = Identity::new();
    for key in &kind.keys {
        let raw = explicit
            .get(key.name)
            .map(String::as_str)
            .or_else(|| positional.get(key.name).copied())
            .or(key.default)
            .ok_or_else(|| {
                Error::validation(
                    &reference,
                    format!("the '{}' parameter must be set in the manifest", key.name),
                )
            })?;
        if !key.matches(raw) {
            return Err(Error::validation(
                &reference,
                format!("'{}' is not a valid {}", raw, key.name),
            ));
        }
        identity.insert(key.name, normalize(key, raw, &reference)?);
    }

    Ok(identity)
}

/// Bring an identity reported by the device into the form [`parse_title`]
/// produces, so the two compare equal.
///
/// Key fields are reordered to the kind's key order and normalized. A value
/// the normalizer rejects is kept as reported; fields the kind does not
/// declare are kept after the key fields.
pub fn canonical_identity(kind: &ResourceKind, reported: &Identity) -> Identity {
    let reference = resource_ref(kind.name, &reported.to_string());
    let mut identity = Identity::new();
    for key in &kind.keys {
        if let Some(raw) = reported.get(key.name) {
            let value = normalize(key, raw, &reference).unwrap_or_else(|e| {
                warn!("{}, keeping the device value", e);
                raw.to_string()
            });
            identity.insert(key.name, value);
        }
    }
    for (field, value) in reported.fields() {
        if identity.get(field).is_none() {
            identity.insert(field, value);
        }
    }
    identity
}

fn positional_fields<'t>(
    kind: &ResourceKind,
    tokens: &[&'t str],
    reference: &str,
) -> Result<IndexMap<&'static str, &'t str>> {
    let all_match = tokens
        .iter()
        .zip(&kind.keys)
        .all(|(token, key)| key.matches(token));

    if all_match {
        return Ok(kind
            .keys
            .iter()
            .zip(tokens)
            .map(|(key, token)| (key.name, *token))
            .collect());
    }

    // A lone token that is not a key value is a free-text name; the key
    // fields must then come from attributes or defaults.
    if tokens.len() == 1 {
        return Ok(IndexMap::new());
    }

    let (token, key) = tokens
        .iter()
        .zip(&kind.keys)
        .find(|(token, key)| !key.matches(token))
        .map(|(t, k)| (*t, k.name))
        .unwrap_or_default();
    Err(Error::validation(
        reference,
        format!("title field '{}' is not a valid {}", token, key),
    ))
}

fn normalize(key: &KeyField, raw: &str, reference: &str) -> Result<String> {
    match key.normalizer {
        KeyNormalizer::None => Ok(raw.to_string()),
        KeyNormalizer::Lowercase => Ok(raw.to_lowercase()),
        KeyNormalizer::Asn => asdot_to_asplain(raw)
            .map(|n| n.to_string())
            .ok_or_else(|| {
                Error::validation(
                    reference,
                    format!("BGP asn {} must be specified in ASPLAIN or ASDOT notation", raw),
                )
            }),
        KeyNormalizer::Network => mask_network(raw).ok_or_else(|| {
            Error::validation(
                reference,
                format!(
                    "{} must be in valid ipv4/v6 address or address/length format",
                    key.name
                ),
            )
        }),
    }
}

/// Convert an ASDOT `high.low` AS number to ASPLAIN.
pub fn asdot_to_asplain(asn: &str) -> Option<u64> {
    match asn.split_once('.') {
        None => asn.parse::<u32>().ok().map(u64::from),
        Some((high, low)) => {
            let high: u64 = high.parse().ok()?;
            let low: u64 = low.parse().ok()?;
            if high > 0xFFFF || low > 0xFFFF {
                return None;
            }
            Some((high << 16) | low)
        }
    }
}

/// Mask an `address/prefix` down to its network; plain addresses are
/// returned in canonical form.
pub fn mask_network(value: &str) -> Option<String> {
    if value.contains('/') {
        let network: IpNetwork = value.parse().ok()?;
        Some(format!("{}/{}", network.network(), network.prefix()))
    } else {
        value.parse::<IpAddr>().ok().map(|addr| addr.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRegistry;

    fn kind(name: &str) -> &'static ResourceKind {
        SchemaRegistry::builtin().get(name).unwrap()
    }

    fn explicit(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_composite_title() {
        let id = parse_title(kind("cisco_bgp_neighbor"), "42 red 1.1.1.1", &explicit(&[]))
            .unwrap();
        assert_eq!(id.get("asn"), Some("42"));
        assert_eq!(id.get("vrf"), Some("red"));
        assert_eq!(id.get("neighbor"), Some("1.1.1.1"));
        assert_eq!(id.to_string(), "42 red 1.1.1.1");
    }

    #[test]
    fn test_explicit_beats_positional() {
        let id = parse_title(
            kind("cisco_bgp_neighbor"),
            "42 red 1.1.1.1",
            &explicit(&[("vrf", "blue")]),
        )
        .unwrap();
        assert_eq!(id.get("vrf"), Some("blue"));
    }

    #[test]
    fn test_trailing_default() {
        let id = parse_title(kind("cisco_bgp"), "42", &explicit(&[])).unwrap();
        assert_eq!(id.get("vrf"), Some("default"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_title(kind("cisco_bgp_neighbor"), "42", &explicit(&[])).unwrap_err();
        assert!(err.to_string().contains("'neighbor' parameter must be set"));
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse_title(kind("cisco_bgp"), "42 red extra", &explicit(&[])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_free_text_name() {
        let id = parse_title(
            kind("cisco_bgp_neighbor"),
            "raleigh",
            &explicit(&[("asn", "1"), ("neighbor", "10.1.1.1")]),
        )
        .unwrap();
        assert_eq!(id.to_string(), "1 default 10.1.1.1");
    }

    #[test]
    fn test_bad_positional_field() {
        let err = parse_title(kind("cisco_route_map"), "rm1 ten permit", &explicit(&[]))
            .unwrap_err();
        assert!(err.to_string().contains("not a valid sequence"));
    }

    #[test]
    fn test_singleton_name() {
        assert!(parse_title(kind("cisco_vtp"), "default", &explicit(&[])).is_ok());
        assert!(parse_title(kind("cisco_vtp"), "other", &explicit(&[])).is_err());
    }

    #[test]
    fn test_normalizers() {
        assert_eq!(asdot_to_asplain("1.5"), Some(65541));
        assert_eq!(asdot_to_asplain("55"), Some(55));
        assert_eq!(asdot_to_asplain("70000.1"), None);
        assert_eq!(mask_network("1.1.1.1/24").as_deref(), Some("1.1.1.0/24"));
        assert_eq!(
            mask_network("2000:123:38::34/64").as_deref(),
            Some("2000:123:38::/64")
        );
        assert_eq!(mask_network("not-an-ip"), None);

        let id = parse_title(kind("cisco_interface"), "Ethernet1/1", &explicit(&[])).unwrap();
        assert_eq!(id.get("name"), Some("ethernet1/1"));
    }

    #[test]
    fn test_canonical_identity_matches_parsed_title() {
        let reported = Identity::from_pairs([
            ("neighbor", "10.1.1.1/24"),
            ("vrf", "red"),
            ("asn", "1.5"),
        ]);
        let canonical = canonical_identity(kind("cisco_bgp_neighbor"), &reported);
        let parsed = parse_title(
            kind("cisco_bgp_neighbor"),
            "1.5 red 10.1.1.1/24",
            &explicit(&[]),
        )
        .unwrap();
        assert_eq!(canonical, parsed);
        assert_eq!(canonical.to_string(), "65541 red 10.1.1.0/24");

        let reported = Identity::from_pairs([("name", "Ethernet1/1")]);
        assert_eq!(
            canonical_identity(kind("cisco_interface"), &reported).get("name"),
            Some("ethernet1/1")
        );
    }

    #[test]
    fn test_canonical_identity_keeps_unparseable_values() {
        let reported = Identity::from_pairs([("asn", "not-an-asn"), ("vrf", "default")]);
        let canonical = canonical_identity(kind("cisco_bgp"), &reported);
        assert_eq!(canonical.get("asn"), Some("not-an-asn"));
    }

    #[test]
    fn test_numeric_keys_deserialize() {
        let id: Identity =
            serde_yaml::from_str("{ rmname: rm1, sequence: 10, action: permit }").unwrap();
        assert_eq!(id.get("sequence"), Some("10"));
        let id: Identity = serde_json::from_str(r#"{"asn": 55, "vrf": "default"}"#).unwrap();
        assert_eq!(id.to_string(), "55 default");
    }
}
