//! End-to-end reconciliation tests against the in-memory device.
//!
//! These cover the behaviours a converging run must guarantee:
//! - A second run over a converged device writes nothing
//! - Composite groups are written once, with every member populated
//! - `ensure` drives creation and destruction
//! - Cross-property rules and platform gating fail before any device call
//! - Check mode reports without writing
//! - A failing resource does not stop the others

mod common;

use common::*;
use nxconverge::facade::FacadeCall;
use nxconverge::prelude::*;
use nxconverge::schema::{KeyNormalizer, PropertyDef, PropertyKind};
use pretty_assertions::assert_eq;
use serde_json::json;

fn metric_decl() -> ResourceDecl {
    ResourceDecl::new("cisco_route_map", "rm1 10 permit")
        .with_attr("set_metric_additive", json!(false))
        .with_attr("set_metric_bandwidth", json!(44))
        .with_attr("set_metric_delay", json!(55))
        .with_attr("set_metric_reliability", json!(66))
        .with_attr("set_metric_effective_bandwidth", json!(77))
        .with_attr("set_metric_mtu", json!(88))
}

fn device_with_route_map() -> MemoryDevice {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_route_map",
        route_map_id(),
        [("set_metric_bandwidth", PropertyValue::Int(10))],
    );
    device
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_second_run_is_a_no_op() {
    let device = MemoryDevice::new(Platform::N9k);
    let decl = ResourceDecl::new("cisco_bgp_neighbor", "42 red 1.1.1.1")
        .with_attr("description", json!("uplink"))
        .with_attr("shutdown", json!(false))
        .with_attr("timers_keepalive", json!(30))
        .with_attr("timers_holdtime", json!(90))
        .with_attr("password", json!("s3cret"))
        .with_attr("password_type", json!("cleartext"));

    let first = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(first.action, Action::Created);
    assert!(!device.mutations().is_empty());

    device.clear_calls();
    let second = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(second.action, Action::Unchanged);
    assert!(second.changes.is_empty());
    assert!(device.mutations().is_empty());
}

#[test]
fn test_idempotent_with_string_encoded_device_values() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_vtp",
        Identity::singleton(),
        [
            ("version", PropertyValue::Str("2".into())),
            ("domain", PropertyValue::Str("lab".into())),
        ],
    );
    let decl = ResourceDecl::new("cisco_vtp", "default")
        .with_attr("version", json!(2))
        .with_attr("domain", json!("lab"));

    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Unchanged);
    assert!(device.mutations().is_empty());
}

/// A title every key field of `kind` accepts.
fn sample_title(kind: &ResourceKind) -> String {
    kind.keys
        .iter()
        .map(|key| match (key.allowed, key.normalizer) {
            (Some(allowed), _) => allowed[0],
            (None, KeyNormalizer::Asn) => "42",
            (None, KeyNormalizer::Network) => "10.1.1.0/24",
            (None, _) => "10",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A valid non-default value for `property`. Only the first member of an
/// exclusive set is enabled.
fn sample_value(kind: &ResourceKind, property: &PropertyDef) -> serde_json::Value {
    let exclusive_first = kind
        .exclusive
        .iter()
        .find(|set| set.members.contains(&property.name))
        .map(|set| set.members[0] == property.name);
    match property.kind {
        PropertyKind::Boolean => json!(exclusive_first.unwrap_or(true)),
        PropertyKind::Integer => json!(property.range.as_ref().map_or(1, |r| *r.start())),
        PropertyKind::String => json!(property.allowed.map_or("sample", |allowed| allowed[0])),
        PropertyKind::FlatList => json!(["a", "b"]),
        PropertyKind::NestedList => json!([["a", "b"], ["c", "d"]]),
    }
}

#[test]
fn test_every_kind_is_idempotent() {
    for kind in registry().iter() {
        let device = MemoryDevice::new(Platform::N9k);
        let mut decl = ResourceDecl::new(kind.name, sample_title(kind));
        for property in kind.properties() {
            if property.supported_on(Platform::N9k) {
                decl = decl.with_attr(property.name, sample_value(kind, property));
            }
        }

        let first = converge(&device, &decl, &ReconcileOptions::new())
            .unwrap_or_else(|e| panic!("{}: {}", kind.name, e));
        assert_eq!(first.action, Action::Created, "{}", kind.name);

        device.clear_calls();
        let second = converge(&device, &decl, &ReconcileOptions::new())
            .unwrap_or_else(|e| panic!("{}: {}", kind.name, e));
        assert_eq!(second.action, Action::Unchanged, "{}", kind.name);
        assert!(second.changes.is_empty(), "{}: {:?}", kind.name, second.changes);
        assert!(device.mutations().is_empty(), "{}", kind.name);
    }
}

// ============================================================================
// Device Identities
// ============================================================================

#[test]
fn test_interface_reported_in_mixed_case_is_found() {
    let device = MemoryDevice::new(Platform::N9k);
    let reported = Identity::from_pairs([("name", "Ethernet1/1")]);
    device.insert(
        "cisco_interface",
        reported.clone(),
        [("description", PropertyValue::Str("old".into()))],
    );

    let decl = ResourceDecl::new("cisco_interface", "Ethernet1/1")
        .with_attr("description", json!("old"));
    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Unchanged);
    assert!(device.mutations().is_empty());

    let decl = ResourceDecl::new("cisco_interface", "ethernet1/1")
        .with_attr("description", json!("new"));
    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Updated);
    assert_eq!(
        device.stored("cisco_interface", &reported, "description"),
        Some(PropertyValue::Str("new".into()))
    );
    assert!(!device.contains(
        "cisco_interface",
        &Identity::from_pairs([("name", "ethernet1/1")])
    ));
}

#[test]
fn test_asdot_device_key_matches_declared_asn() {
    let device = MemoryDevice::new(Platform::N9k);
    let reported = Identity::from_pairs([("asn", "1.5"), ("vrf", "default")]);
    device.insert(
        "cisco_bgp",
        reported.clone(),
        [("router_id", PropertyValue::Str("10.0.0.1".into()))],
    );

    for title in ["1.5", "65541"] {
        let decl = ResourceDecl::new("cisco_bgp", title).with_attr("router_id", json!("10.0.0.1"));
        let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
        assert_eq!(report.action, Action::Unchanged, "title {}", title);
    }
    assert!(device.mutations().is_empty());

    let decl = ResourceDecl::new("cisco_bgp", "65541").with_ensure(Ensure::Absent);
    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Destroyed);
    assert!(!device.contains("cisco_bgp", &reported));
}

// ============================================================================
// Composite Groups
// ============================================================================

#[test]
fn test_only_changed_member_differs_but_full_tuple_is_written() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_route_map",
        route_map_id(),
        [
            ("set_metric_additive", PropertyValue::Bool(false)),
            ("set_metric_bandwidth", PropertyValue::Int(33)),
            ("set_metric_delay", PropertyValue::Int(55)),
            ("set_metric_reliability", PropertyValue::Int(66)),
            ("set_metric_effective_bandwidth", PropertyValue::Int(77)),
            ("set_metric_mtu", PropertyValue::Int(88)),
        ],
    );

    let report = converge(&device, &metric_decl(), &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Updated);
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].property, "set_metric_bandwidth");

    let mutations = device.mutations();
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        FacadeCall::SetGroup { setter, values, .. } => {
            assert_eq!(setter, "set_metric_set");
            let tuple: Vec<Option<PropertyValue>> =
                values.iter().map(|(_, value)| value.clone()).collect();
            assert_eq!(
                tuple,
                vec![
                    Some(PropertyValue::Bool(false)),
                    Some(PropertyValue::Int(44)),
                    Some(PropertyValue::Int(55)),
                    Some(PropertyValue::Int(66)),
                    Some(PropertyValue::Int(77)),
                    Some(PropertyValue::Int(88)),
                ]
            );
        }
        other => panic!("expected a composite write, got {:?}", other),
    }
}

#[test]
fn test_metric_group_written_once_with_full_tuple() {
    let device = device_with_route_map();

    let report = converge(&device, &metric_decl(), &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Updated);

    let mutations = device.mutations();
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        FacadeCall::SetGroup { setter, values, .. } => {
            assert_eq!(setter, "set_metric_set");
            assert_eq!(
                values,
                &vec![
                    ("set_metric_additive".to_string(), Some(PropertyValue::Bool(false))),
                    ("set_metric_bandwidth".to_string(), Some(PropertyValue::Int(44))),
                    ("set_metric_delay".to_string(), Some(PropertyValue::Int(55))),
                    ("set_metric_reliability".to_string(), Some(PropertyValue::Int(66))),
                    (
                        "set_metric_effective_bandwidth".to_string(),
                        Some(PropertyValue::Int(77))
                    ),
                    ("set_metric_mtu".to_string(), Some(PropertyValue::Int(88))),
                ]
            );
        }
        other => panic!("expected a composite write, got {:?}", other),
    }
    assert_eq!(
        device.stored("cisco_route_map", &route_map_id(), "set_metric_mtu"),
        Some(PropertyValue::Int(88))
    );
}

#[test]
fn test_group_fills_unchanged_members_from_current_then_default() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_route_map",
        route_map_id(),
        [("set_metric_delay", PropertyValue::Int(7))],
    );
    let decl = ResourceDecl::new("cisco_route_map", "rm1 10 permit")
        .with_attr("set_metric_bandwidth", json!(44));

    converge(&device, &decl, &ReconcileOptions::new()).unwrap();

    let mutations = device.mutations();
    assert_eq!(mutations.len(), 1);
    let FacadeCall::SetGroup { values, .. } = &mutations[0] else {
        panic!("expected a composite write");
    };
    let values: Vec<Option<PropertyValue>> = values.iter().map(|(_, v)| v.clone()).collect();
    assert_eq!(
        values,
        vec![
            Some(PropertyValue::Bool(false)),
            Some(PropertyValue::Int(44)),
            Some(PropertyValue::Int(7)),
            None,
            None,
            None,
        ]
    );
}

#[test]
fn test_default_keyword_queries_device_default() {
    let device = MemoryDevice::new(Platform::N9k);
    let id = neighbor_id("42", "default", "1.1.1.1");
    device.insert(
        "cisco_bgp_neighbor",
        id.clone(),
        [
            ("timers_keepalive", PropertyValue::Int(30)),
            ("timers_holdtime", PropertyValue::Int(90)),
        ],
    );
    device.set_default("cisco_bgp_neighbor", "timers_keepalive", PropertyValue::Int(60));

    let decl = ResourceDecl::new("cisco_bgp_neighbor", "42 default 1.1.1.1")
        .with_attr("timers_keepalive", default_value());
    converge(&device, &decl, &ReconcileOptions::new()).unwrap();

    assert_eq!(setters(&device), vec!["timers_set"]);
    assert_eq!(
        device.stored("cisco_bgp_neighbor", &id, "timers_keepalive"),
        Some(PropertyValue::Int(60))
    );
    assert_eq!(
        device.stored("cisco_bgp_neighbor", &id, "timers_holdtime"),
        Some(PropertyValue::Int(90))
    );
}

#[test]
fn test_default_keyword_can_unconfigure() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_vtp",
        Identity::singleton(),
        [("password", PropertyValue::Str("hunter2".into()))],
    );
    let decl = ResourceDecl::new("cisco_vtp", "default").with_attr("password", default_value());

    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.changes[0].desired, None);
    assert_eq!(
        device.stored("cisco_vtp", &Identity::singleton(), "password"),
        None
    );
}

// ============================================================================
// Ensure
// ============================================================================

#[test]
fn test_absent_destroys_without_setters() {
    let device = device_with_route_map();
    let decl = ResourceDecl::new("cisco_route_map", "rm1 10 permit")
        .with_ensure(Ensure::Absent)
        .with_attr("set_metric_mtu", json!(88));

    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Destroyed);

    let mutations = device.mutations();
    assert_eq!(mutations.len(), 1);
    assert!(matches!(mutations[0], FacadeCall::Destroy { .. }));
    assert!(!device.contains("cisco_route_map", &route_map_id()));
}

#[test]
fn test_present_on_missing_creates_before_writing() {
    let device = MemoryDevice::new(Platform::N9k);
    let decl = ResourceDecl::new("cisco_vtp", "default")
        .with_attr("domain", json!("lab"))
        .with_attr("version", json!(2));

    let report = converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(report.action, Action::Created);

    let mutations = device.mutations();
    assert!(matches!(mutations[0], FacadeCall::Create { .. }));
    assert_eq!(setters(&device), vec!["domain", "version"]);
}

// ============================================================================
// Validation Before Any Device Call
// ============================================================================

#[test]
fn test_two_enabled_login_methods_rejected() {
    let device = MemoryDevice::new(Platform::N9k);
    let decl = ResourceDecl::new("cisco_aaa_authentication_login", "default")
        .with_attr("chap", json!(true))
        .with_attr("mschap", json!(true));

    let err = converge(&device, &decl, &ReconcileOptions::new()).unwrap_err();
    assert!(matches!(err, Error::MutualExclusion { .. }));
    assert!(device.calls().is_empty());
}

#[test]
fn test_tacacs_encryption_type_requires_password() {
    let decl = ResourceDecl::new("cisco_tacacs_server", "default")
        .with_attr("encryption_type", json!("clear"));
    let err = DesiredState::from_decl(registry(), &decl, None).unwrap_err();
    assert!(err
        .to_string()
        .contains("the 'encryption_password' property must be set when specifying 'encryption_type'"));

    let none = ResourceDecl::new("cisco_tacacs_server", "default")
        .with_attr("encryption_type", json!("none"));
    assert!(DesiredState::from_decl(registry(), &none, None).is_ok());
}

#[test]
fn test_unsupported_property_fails_before_device_call() {
    let device = MemoryDevice::new(Platform::N3k);
    let decl = ResourceDecl::new("cisco_interface", "Ethernet1/1")
        .with_attr("negotiate_auto", json!(true));

    let err = converge(&device, &decl, &ReconcileOptions::new()).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
    assert!(device.calls().is_empty());
}

#[test]
fn test_unsupported_property_reads_as_unconfigured() {
    let device = MemoryDevice::new(Platform::N3k);
    let id = Identity::from_pairs([("name", "ethernet1/1")]);
    device.insert(
        "cisco_interface",
        id,
        [("negotiate_auto", PropertyValue::Bool(true))],
    );
    let kind = registry().get("cisco_interface").unwrap();
    let instances = enumerate(&device, kind).unwrap();
    assert_eq!(instances[0].get("negotiate_auto"), None);
}

// ============================================================================
// Titles
// ============================================================================

#[test]
fn test_neighbor_title_positional_and_override() {
    let positional = desired(&ResourceDecl::new("cisco_bgp_neighbor", "42 red 1.1.1.1"));
    assert_eq!(positional.identity, neighbor_id("42", "red", "1.1.1.1"));

    let overridden = desired(
        &ResourceDecl::new("cisco_bgp_neighbor", "42 red 1.1.1.1").with_attr("vrf", json!("blue")),
    );
    assert_eq!(overridden.identity, neighbor_id("42", "blue", "1.1.1.1"));
}

#[test]
fn test_free_text_title_with_explicit_keys() {
    let state = desired(
        &ResourceDecl::new("cisco_bgp_neighbor", "uplink-to-core")
            .with_attr("asn", json!(1.5))
            .with_attr("neighbor", json!("10.1.1.1/24")),
    );
    assert_eq!(state.identity, neighbor_id("65541", "default", "10.1.1.0/24"));
}

// ============================================================================
// Scalar Ordering
// ============================================================================

#[test]
fn test_login_method_switch_disables_first() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert(
        "cisco_aaa_authentication_login",
        Identity::singleton(),
        [
            ("ascii_authentication", PropertyValue::Bool(false)),
            ("chap", PropertyValue::Bool(false)),
            ("mschap", PropertyValue::Bool(true)),
            ("mschapv2", PropertyValue::Bool(false)),
        ],
    );
    let decl =
        ResourceDecl::new("cisco_aaa_authentication_login", "default").with_attr("chap", json!(true));

    converge(&device, &decl, &ReconcileOptions::new()).unwrap();
    assert_eq!(setters(&device), vec!["mschap", "chap"]);
}

// ============================================================================
// Check Mode
// ============================================================================

#[test]
fn test_check_mode_reports_plan_without_writing() {
    let device = device_with_route_map();
    let options = ReconcileOptions::new().with_check_mode(true);

    let report = converge(&device, &metric_decl(), &options).unwrap();
    assert_eq!(report.action, Action::Updated);
    assert!(report.check_mode);
    assert_eq!(report.setters.len(), 1);
    assert_eq!(report.setters[0].setter, "set_metric_set");
    assert!(device.mutations().is_empty());
    assert_eq!(
        device.stored("cisco_route_map", &route_map_id(), "set_metric_bandwidth"),
        Some(PropertyValue::Int(10))
    );
}

#[test]
fn test_check_mode_absent_keeps_instance() {
    let device = device_with_route_map();
    let decl = ResourceDecl::new("cisco_route_map", "rm1 10 permit").with_ensure(Ensure::Absent);
    let options = ReconcileOptions::new().with_check_mode(true);

    let report = converge(&device, &decl, &options).unwrap();
    assert_eq!(report.action, Action::Destroyed);
    assert!(device.contains("cisco_route_map", &route_map_id()));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_device_rejection_propagates_verbatim() {
    let device = device_with_route_map();
    device.inject_fault("set_metric_set", "% Invalid metric");

    let err = converge(&device, &metric_decl(), &ReconcileOptions::new()).unwrap_err();
    assert!(matches!(err, Error::Facade(FacadeError::Rejected { .. })));
    assert!(err.to_string().contains("% Invalid metric"));
}

#[test]
fn test_duplicate_instances_are_ambiguous() {
    let device = MemoryDevice::new(Platform::N9k);
    device.insert("cisco_vtp", Identity::singleton(), []);
    device.insert("cisco_vtp", Identity::singleton(), []);
    let decl = ResourceDecl::new("cisco_vtp", "default").with_attr("domain", json!("lab"));

    let err = converge(&device, &decl, &ReconcileOptions::new()).unwrap_err();
    assert!(matches!(err, Error::AmbiguousMatch { count: 2, .. }));
    assert!(device.mutations().is_empty());
}

#[test]
fn test_failed_resource_does_not_stop_the_run() {
    let device = device_with_route_map();
    device.inject_fault("set_metric_set", "% Invalid metric");

    let manifest = Manifest {
        resources: vec![
            metric_decl(),
            ResourceDecl::new("cisco_vtp", "default").with_attr("domain", json!("lab")),
        ],
    };
    let catalog = Catalog::compile(&manifest, registry(), Some(Platform::N9k)).unwrap();
    let summary = catalog.apply(&device, &ReconcileOptions::new());

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.changed, 1);
    assert!(summary.has_failures());
    assert_eq!(
        device.stored("cisco_vtp", &Identity::singleton(), "domain"),
        Some(PropertyValue::Str("lab".into()))
    );
}
