//! `cisco_bgp_af`
//!
//! A BGP address family, identified by `asn vrf afi safi`. The four
//! dampening timers are written together.

use super::{AFI, SAFI};
use crate::schema::{CompositeGroup, KeyField, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_bgp_af";

pub const DAMPENING_GROUP: &[&str] = &[
    "dampening_half_time",
    "dampening_reuse_time",
    "dampening_suppress_time",
    "dampening_max_suppress_time",
];

pub fn kind() -> ResourceKind {
    let mut kind = ResourceKind::new(NAME, "BGP address family")
        .with_key(KeyField::asn("asn"))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_key(KeyField::word("afi").with_allowed(AFI))
        .with_key(KeyField::word("safi").with_allowed(SAFI))
        .with_property(PropertyDef::string("additional_paths_selection").unset_by_default())
        .with_property(PropertyDef::boolean("additional_paths_install"))
        .with_property(PropertyDef::boolean("additional_paths_receive"))
        .with_property(PropertyDef::boolean("additional_paths_send"))
        .with_property(PropertyDef::boolean("advertise_l2vpn_evpn"))
        .with_property(PropertyDef::boolean("client_to_client"))
        .with_property(PropertyDef::boolean("default_information_originate"))
        .with_property(PropertyDef::integer("dampen_igp_metric").with_range(20..=1800))
        .with_property(PropertyDef::boolean("dampening_state"))
        .with_property(
            PropertyDef::string("dampening_routemap")
                .unset_by_default()
                .describe("Route-map supplying the dampening parameters"),
        )
        .with_property(PropertyDef::integer("maximum_paths").with_range(1..=64))
        .with_property(PropertyDef::integer("maximum_paths_ibgp").with_range(1..=64))
        .with_property(
            PropertyDef::nested_list("networks")
                .unset_by_default()
                .describe("Rows of [prefix, route_map]"),
        )
        .with_property(PropertyDef::string("next_hop_route_map").unset_by_default());

    for &member in DAMPENING_GROUP {
        kind = kind.with_property(
            PropertyDef::integer(member)
                .in_group("dampening")
                .with_range(1..=45),
        );
    }

    kind.with_group(CompositeGroup::new(
        "dampening",
        "dampening_set",
        DAMPENING_GROUP,
    ))
}
