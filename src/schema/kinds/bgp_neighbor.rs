//! `cisco_bgp_neighbor`
//!
//! A BGP peer, identified by `asn vrf neighbor`. The neighbor may be a
//! host address or an `address/prefix` range; ranges are stored masked.

use crate::schema::{
    CompositeGroup, KeyField, KeyNormalizer, PropertyDef, Requirement, ResourceKind,
};

pub const NAME: &str = "cisco_bgp_neighbor";

pub const PASSWORD_TYPES: &[&str] = &["cleartext", "3des", "md5", "cisco_type_7"];

pub const REMOVE_PRIVATE_AS: &[&str] = &["enable", "disable", "all", "replace-as"];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "BGP neighbor")
        .with_key(KeyField::asn("asn"))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_key(KeyField::word("neighbor").normalized(KeyNormalizer::Network))
        .with_property(PropertyDef::string("description").unset_by_default())
        .with_property(PropertyDef::boolean("connected_check"))
        .with_property(PropertyDef::boolean("capability_negotiation"))
        .with_property(PropertyDef::boolean("dynamic_capability"))
        .with_property(
            PropertyDef::integer("ebgp_multihop")
                .with_range(2..=255)
                .unset_by_default()
                .describe("Multihop TTL for an eBGP peer"),
        )
        .with_property(PropertyDef::string("local_as").unset_by_default())
        .with_property(
            PropertyDef::string("log_neighbor_changes")
                .with_allowed(&["enable", "disable", "inherit"]),
        )
        .with_property(PropertyDef::boolean("low_memory_exempt"))
        .with_property(
            PropertyDef::integer("maximum_peers")
                .with_range(1..=1000)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("password")
                .in_group("password")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("password_type")
                .in_group("password")
                .with_allowed(PASSWORD_TYPES),
        )
        .with_property(PropertyDef::string("remote_as").unset_by_default())
        .with_property(
            PropertyDef::string("remove_private_as").with_allowed(REMOVE_PRIVATE_AS),
        )
        .with_property(PropertyDef::boolean("shutdown"))
        .with_property(PropertyDef::boolean("suppress_4_byte_as"))
        .with_property(
            PropertyDef::integer("timers_keepalive")
                .in_group("timers")
                .with_range(0..=3600),
        )
        .with_property(
            PropertyDef::integer("timers_holdtime")
                .in_group("timers")
                .with_range(0..=3600),
        )
        .with_property(PropertyDef::boolean("transport_passive_only"))
        .with_property(PropertyDef::string("update_source").unset_by_default())
        .with_group(CompositeGroup::new(
            "password",
            "password_set",
            &["password", "password_type"],
        ))
        .with_group(CompositeGroup::new(
            "timers",
            "timers_set",
            &["timers_keepalive", "timers_holdtime"],
        ))
        .with_requirement(Requirement {
            property: "password",
            unless: &[""],
            requires: "password_type",
        })
        .with_requirement(Requirement {
            property: "password_type",
            unless: &[],
            requires: "password",
        })
}
