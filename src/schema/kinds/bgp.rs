//! `cisco_bgp`
//!
//! Router BGP instance, identified by `asn vrf`. The vrf field defaults to
//! `default`, so a title holding just the AS number is complete.

use crate::schema::{CompositeGroup, KeyField, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_bgp";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "Router BGP instance per VRF")
        .with_key(KeyField::asn("asn"))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_property(
            PropertyDef::string("router_id")
                .unset_by_default()
                .describe("BGP router identifier"),
        )
        .with_property(PropertyDef::boolean("shutdown"))
        .with_property(PropertyDef::boolean("log_neighbor_changes"))
        .with_property(PropertyDef::boolean("graceful_restart"))
        .with_property(PropertyDef::boolean("bestpath_always_compare_med"))
        .with_property(PropertyDef::flat_list("confederation_peers").unset_by_default())
        .with_property(
            PropertyDef::integer("timer_bgp_keepalive")
                .in_group("timers")
                .with_range(0..=3600),
        )
        .with_property(
            PropertyDef::integer("timer_bgp_holdtime")
                .in_group("timers")
                .with_range(0..=3600),
        )
        .with_group(CompositeGroup::new(
            "timers",
            "timer_bgp_keepalive_hold_set",
            &["timer_bgp_keepalive", "timer_bgp_holdtime"],
        ))
}
