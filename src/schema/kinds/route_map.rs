//! `cisco_route_map`
//!
//! One route-map entry, identified by `rmname sequence action`. Most of the
//! `set` clauses are single device commands carrying several values, so the
//! kind is dominated by composite groups.

use crate::platform::Platform;
use crate::schema::{CompositeGroup, KeyField, PropertyDef, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_route_map";

pub const METRIC_GROUP: &[&str] = &[
    "set_metric_additive",
    "set_metric_bandwidth",
    "set_metric_delay",
    "set_metric_reliability",
    "set_metric_effective_bandwidth",
    "set_metric_mtu",
];

pub const DAMPENING_GROUP: &[&str] = &[
    "set_dampening_half_life",
    "set_dampening_reuse",
    "set_dampening_suppress",
    "set_dampening_max_duration",
];

pub const DISTANCE_GROUP: &[&str] = &[
    "set_distance_igp_ebgp",
    "set_distance_internal",
    "set_distance_local",
];

pub const ROUTE_TYPE_GROUP: &[&str] = &[
    "match_route_type_external",
    "match_route_type_internal",
    "match_route_type_local",
    "match_route_type_nssa_external",
    "match_route_type_type_1",
    "match_route_type_type_2",
];

fn unset_integer(name: &'static str, group: &'static str) -> PropertyDef {
    PropertyDef::integer(name).in_group(group).unset_by_default()
}

fn bool_off(name: &'static str) -> PropertyDef {
    PropertyDef::boolean(name).with_default(PropertyValue::Bool(false))
}

pub fn kind() -> ResourceKind {
    let mut kind = ResourceKind::new(NAME, "Route-map entry")
        .with_key(KeyField::word("rmname"))
        .with_key(KeyField::number("sequence"))
        .with_key(KeyField::word("action").with_allowed(&["permit", "deny"]))
        .with_property(PropertyDef::string("description").unset_by_default())
        // match clauses
        .with_property(PropertyDef::flat_list("match_as_number").unset_by_default())
        .with_property(
            PropertyDef::flat_list("match_community")
                .in_group("match_community")
                .unset_by_default(),
        )
        .with_property(bool_off("match_community_exact_match").in_group("match_community"))
        .with_property(
            PropertyDef::string("match_ipv4_addr_access_list")
                .in_group("match_ip_addr_access_list")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("match_ipv6_addr_access_list")
                .in_group("match_ip_addr_access_list")
                .unset_by_default(),
        )
        .with_property(PropertyDef::flat_list("match_tag").unset_by_default())
        .with_property(
            PropertyDef::nested_list("match_metric")
                .unset_by_default()
                .describe("List of [metric, deviation] pairs"),
        )
        .with_property(
            bool_off("match_evpn_route_type_all")
                .unsupported_on(&[Platform::N5k, Platform::N6k])
                .describe("Match all EVPN route types"),
        );

    for &name in ROUTE_TYPE_GROUP {
        kind = kind.with_property(bool_off(name).in_group("match_route_type"));
    }

    kind = kind
        // set clauses
        .with_property(bool_off("set_metric_additive").in_group("metric"))
        .with_property(unset_integer("set_metric_bandwidth", "metric"))
        .with_property(unset_integer("set_metric_delay", "metric"))
        .with_property(unset_integer("set_metric_reliability", "metric"))
        .with_property(unset_integer("set_metric_effective_bandwidth", "metric"))
        .with_property(unset_integer("set_metric_mtu", "metric"))
        .with_property(unset_integer("set_dampening_half_life", "dampening"))
        .with_property(unset_integer("set_dampening_reuse", "dampening"))
        .with_property(unset_integer("set_dampening_suppress", "dampening"))
        .with_property(unset_integer("set_dampening_max_duration", "dampening"))
        .with_property(unset_integer("set_distance_igp_ebgp", "distance"))
        .with_property(unset_integer("set_distance_internal", "distance"))
        .with_property(unset_integer("set_distance_local", "distance"))
        .with_property(
            PropertyDef::string("set_ipv4_precedence")
                .in_group("ip_precedence")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("set_ipv6_precedence")
                .in_group("ip_precedence")
                .unset_by_default(),
        )
        .with_property(PropertyDef::flat_list("set_as_path_prepend").unset_by_default())
        .with_property(
            PropertyDef::integer("set_local_preference")
                .with_range(0..=4_294_967_295)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("set_origin")
                .with_allowed(&["egp", "igp", "incomplete"])
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::integer("set_tag")
                .with_range(0..=4_294_967_295)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::integer("set_weight")
                .with_range(0..=65535)
                .unset_by_default(),
        )
        .with_property(
            bool_off("set_nssa_only").unsupported_on(&[Platform::N3k, Platform::N9k]),
        );

    kind.with_group(CompositeGroup::new(
        "match_community",
        "match_community_set",
        &["match_community", "match_community_exact_match"],
    ))
    .with_group(CompositeGroup::new(
        "match_ip_addr_access_list",
        "match_ip_addr_access_list",
        &["match_ipv4_addr_access_list", "match_ipv6_addr_access_list"],
    ))
    .with_group(CompositeGroup::new(
        "match_route_type",
        "match_route_type_set",
        ROUTE_TYPE_GROUP,
    ))
    .with_group(CompositeGroup::new("metric", "set_metric_set", METRIC_GROUP))
    .with_group(CompositeGroup::new(
        "dampening",
        "set_dampening_set",
        DAMPENING_GROUP,
    ))
    .with_group(CompositeGroup::new(
        "distance",
        "set_distance_set",
        DISTANCE_GROUP,
    ))
    .with_group(CompositeGroup::new(
        "ip_precedence",
        "set_ip_precedence",
        &["set_ipv4_precedence", "set_ipv6_precedence"],
    ))
}
