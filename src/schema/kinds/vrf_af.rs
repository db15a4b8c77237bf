//! `cisco_vrf_af`
//!
//! A VRF address family. VRF names are case-insensitive on the device and
//! are stored lowercased.

use super::{AFI, SAFI};
use crate::schema::{KeyField, KeyNormalizer, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_vrf_af";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "VRF address family")
        .with_key(KeyField::word("vrf").normalized(KeyNormalizer::Lowercase))
        .with_key(KeyField::word("afi").with_allowed(AFI))
        .with_key(KeyField::word("safi").with_allowed(SAFI))
        .with_property(PropertyDef::boolean("route_target_both_auto"))
        .with_property(PropertyDef::boolean("route_target_both_auto_evpn"))
        .with_property(PropertyDef::flat_list("route_target_import"))
        .with_property(PropertyDef::flat_list("route_target_import_evpn"))
        .with_property(PropertyDef::flat_list("route_target_export"))
        .with_property(PropertyDef::flat_list("route_target_export_evpn"))
}
