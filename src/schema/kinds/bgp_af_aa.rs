//! `cisco_bgp_af_aa`
//!
//! A BGP aggregate address, identified by `asn vrf afi safi aa`. Every
//! attribute of the aggregate belongs to the one `aggregate-address` command.

use super::{AFI, SAFI};
use crate::schema::{CompositeGroup, KeyField, KeyNormalizer, PropertyDef, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_bgp_af_aa";

pub const AGGREGATE_GROUP: &[&str] = &[
    "advertise_map",
    "attribute_map",
    "suppress_map",
    "as_set",
    "summary_only",
];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "BGP aggregate address")
        .with_key(KeyField::asn("asn"))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_key(KeyField::word("afi").with_allowed(AFI))
        .with_key(KeyField::word("safi").with_allowed(SAFI))
        .with_key(KeyField::word("aa").normalized(KeyNormalizer::Network))
        .with_property(
            PropertyDef::string("advertise_map")
                .in_group("aggregate")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("attribute_map")
                .in_group("aggregate")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("suppress_map")
                .in_group("aggregate")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::boolean("as_set")
                .in_group("aggregate")
                .with_default(PropertyValue::Bool(false)),
        )
        .with_property(
            PropertyDef::boolean("summary_only")
                .in_group("aggregate")
                .with_default(PropertyValue::Bool(false)),
        )
        .with_group(CompositeGroup::new("aggregate", "aa_set", AGGREGATE_GROUP))
}
