//! `cisco_interface`
//!
//! Physical and logical interfaces. Names are stored lowercased, matching
//! how the device reports them.

use crate::platform::Platform;
use crate::schema::{CompositeGroup, KeyField, KeyNormalizer, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_interface";

pub const SWITCHPORT_MODES: &[&str] = &[
    "disabled",
    "access",
    "tunnel",
    "fex_fabric",
    "trunk",
    "fabricpath",
];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "Interface configuration")
        .with_key(KeyField::word("name").normalized(KeyNormalizer::Lowercase))
        .with_property(PropertyDef::string("description").unset_by_default())
        .with_property(PropertyDef::boolean("shutdown"))
        .with_property(PropertyDef::string("switchport_mode").with_allowed(SWITCHPORT_MODES))
        .with_property(PropertyDef::integer("access_vlan").with_range(1..=4094))
        .with_property(PropertyDef::string("switchport_trunk_allowed_vlan"))
        .with_property(PropertyDef::integer("switchport_trunk_native_vlan").with_range(1..=4094))
        .with_property(PropertyDef::integer("mtu").with_range(576..=9216))
        .with_property(PropertyDef::string("speed"))
        .with_property(PropertyDef::string("duplex").with_allowed(&["auto", "full", "half"]))
        .with_property(PropertyDef::string("vrf").unset_by_default())
        .with_property(
            PropertyDef::string("ipv4_address")
                .in_group("ipv4_address")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::integer("ipv4_netmask_length")
                .in_group("ipv4_address")
                .with_range(0..=32)
                .unset_by_default(),
        )
        .with_property(PropertyDef::boolean("ipv4_proxy_arp"))
        .with_property(PropertyDef::boolean("ipv4_redirects"))
        .with_property(PropertyDef::integer("ipv4_arp_timeout").with_range(60..=28800))
        .with_property(
            PropertyDef::boolean("negotiate_auto").unsupported_on(&[Platform::N3k]),
        )
        .with_property(
            PropertyDef::boolean("fabric_forwarding_anycast_gateway")
                .unsupported_on(&[Platform::N3k, Platform::N5k, Platform::N6k]),
        )
        .with_property(
            PropertyDef::flat_list("stp_vlan_cost").unset_by_default(),
        )
        .with_property(
            PropertyDef::nested_list("switchport_pvlan_mapping_trunk")
                .unset_by_default()
                .unsupported_on(&[Platform::N3k]),
        )
        .with_group(CompositeGroup::new(
            "ipv4_address",
            "ipv4_addr_mask_set",
            &["ipv4_address", "ipv4_netmask_length"],
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_lowercased() {
        let kind = kind();
        assert_eq!(
            kind.key("name").unwrap().normalizer,
            KeyNormalizer::Lowercase
        );
    }
}
