//! `cisco_bgp_neighbor_af`
//!
//! Per-neighbor address-family settings, identified by
//! `asn vrf neighbor afi safi`. Several options are a state plus an optional
//! argument on one command line (`allowas-in 3`,
//! `default-originate route-map X`, `maximum-prefix 100 80 restart 5`) and
//! are written through composite setters.

use crate::schema::{
    CompositeGroup, KeyField, KeyNormalizer, PropertyDef, Requirement, ResourceKind,
};

pub const NAME: &str = "cisco_bgp_neighbor_af";

pub const AFI: &[&str] = &["ipv4", "ipv6", "l2vpn"];

pub const SAFI: &[&str] = &["unicast", "multicast", "evpn"];

pub const ADDITIONAL_PATHS: &[&str] = &["enable", "disable", "inherit"];

pub const SEND_COMMUNITY: &[&str] = &["none", "both", "extended", "standard"];

pub const SOFT_RECONFIGURATION: &[&str] = &["enable", "always", "inherit"];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "BGP neighbor address family")
        .with_key(KeyField::asn("asn"))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_key(KeyField::word("neighbor").normalized(KeyNormalizer::Network))
        .with_key(KeyField::word("afi").with_allowed(AFI))
        .with_key(KeyField::word("safi").with_allowed(SAFI))
        .with_property(PropertyDef::flat_list("advertise_map_exist").unset_by_default())
        .with_property(PropertyDef::flat_list("advertise_map_non_exist").unset_by_default())
        .with_property(PropertyDef::boolean("allowas_in").in_group("allowas_in"))
        .with_property(
            PropertyDef::integer("allowas_in_max")
                .in_group("allowas_in")
                .with_range(1..=10),
        )
        .with_property(PropertyDef::boolean("as_override"))
        .with_property(
            PropertyDef::string("additional_paths_receive").with_allowed(ADDITIONAL_PATHS),
        )
        .with_property(
            PropertyDef::string("additional_paths_send").with_allowed(ADDITIONAL_PATHS),
        )
        .with_property(PropertyDef::boolean("default_originate").in_group("default_originate"))
        .with_property(
            PropertyDef::string("default_originate_route_map")
                .in_group("default_originate")
                .unset_by_default(),
        )
        .with_property(PropertyDef::boolean("disable_peer_as_check"))
        .with_property(PropertyDef::string("filter_list_in").unset_by_default())
        .with_property(PropertyDef::string("filter_list_out").unset_by_default())
        .with_property(
            PropertyDef::integer("max_prefix_limit")
                .in_group("max_prefix")
                .with_range(1..=4294967295)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::integer("max_prefix_threshold")
                .in_group("max_prefix")
                .with_range(1..=100)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::integer("max_prefix_interval")
                .in_group("max_prefix")
                .with_range(1..=65535)
                .unset_by_default(),
        )
        .with_property(PropertyDef::boolean("max_prefix_warning").in_group("max_prefix"))
        .with_property(PropertyDef::boolean("next_hop_self"))
        .with_property(PropertyDef::boolean("next_hop_third_party"))
        .with_property(PropertyDef::string("prefix_list_in").unset_by_default())
        .with_property(PropertyDef::string("prefix_list_out").unset_by_default())
        .with_property(PropertyDef::string("route_map_in").unset_by_default())
        .with_property(PropertyDef::string("route_map_out").unset_by_default())
        .with_property(PropertyDef::boolean("route_reflector_client"))
        .with_property(PropertyDef::string("send_community").with_allowed(SEND_COMMUNITY))
        .with_property(
            PropertyDef::string("soft_reconfiguration_in").with_allowed(SOFT_RECONFIGURATION),
        )
        .with_property(PropertyDef::string("soo").unset_by_default())
        .with_property(PropertyDef::boolean("suppress_inactive"))
        .with_property(PropertyDef::string("unsuppress_map").unset_by_default())
        .with_property(PropertyDef::integer("weight").with_range(0..=65535))
        .with_group(CompositeGroup::new(
            "allowas_in",
            "allowas_in_set",
            &["allowas_in", "allowas_in_max"],
        ))
        .with_group(CompositeGroup::new(
            "default_originate",
            "default_originate_set",
            &["default_originate", "default_originate_route_map"],
        ))
        .with_group(CompositeGroup::new(
            "max_prefix",
            "max_prefix_set",
            &[
                "max_prefix_limit",
                "max_prefix_threshold",
                "max_prefix_interval",
                "max_prefix_warning",
            ],
        ))
        .with_requirement(Requirement {
            property: "max_prefix_threshold",
            unless: &[],
            requires: "max_prefix_limit",
        })
}
