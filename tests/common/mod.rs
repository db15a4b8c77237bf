//! Shared helpers for the integration tests.

#![allow(dead_code)]

use nxconverge::prelude::*;
use nxconverge::value::DEFAULT_KEYWORD;
use serde_json::json;

/// Registry of built-in kinds.
pub fn registry() -> &'static SchemaRegistry {
    SchemaRegistry::builtin()
}

/// Validate one declaration against the built-in kinds.
pub fn desired(decl: &ResourceDecl) -> DesiredState {
    DesiredState::from_decl(registry(), decl, None).expect("declaration should validate")
}

/// Validate and reconcile one declaration.
pub fn converge(
    device: &MemoryDevice,
    decl: &ResourceDecl,
    options: &ReconcileOptions,
) -> nxconverge::Result<ReconcileReport> {
    let state = DesiredState::from_decl(registry(), decl, None)?;
    let kind = registry().get(state.kind)?;
    reconcile(device, kind, &state, options)
}

/// The `default` keyword as a declared value.
pub fn default_value() -> serde_json::Value {
    json!(DEFAULT_KEYWORD)
}

pub fn route_map_id() -> Identity {
    Identity::from_pairs([("rmname", "rm1"), ("sequence", "10"), ("action", "permit")])
}

pub fn neighbor_id(asn: &str, vrf: &str, neighbor: &str) -> Identity {
    Identity::from_pairs([("asn", asn), ("vrf", vrf), ("neighbor", neighbor)])
}

/// Setter names of every recorded write, in order.
pub fn setters(device: &MemoryDevice) -> Vec<String> {
    device
        .mutations()
        .iter()
        .filter_map(|c| c.setter().map(str::to_string))
        .collect()
}

/// A device snapshot with one BGP instance and one route-map entry.
pub const LAB_SNAPSHOT: &str = r#"
platform: n9k
hostname: leaf1
entities:
  cisco_bgp:
    - key: { asn: "42", vrf: default }
      properties:
        router_id: 10.0.0.1
        shutdown: false
  cisco_route_map:
    - key: { rmname: rm1, sequence: "10", action: permit }
      properties:
        set_metric_bandwidth: 10
"#;
