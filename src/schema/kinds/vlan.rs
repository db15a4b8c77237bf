//! `cisco_vlan`

use crate::schema::{KeyField, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_vlan";

/// VLANs reserved for internal use by the switch.
pub const RESERVED: std::ops::RangeInclusive<u32> = 3968..=4047;

/// Whether `id` is a VLAN that can be configured.
pub fn valid_vlan_id(id: &str) -> bool {
    id.parse::<u32>()
        .is_ok_and(|id| (1..=4093).contains(&id) && !RESERVED.contains(&id))
}

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "VLAN")
        .with_key(KeyField::number("vlan").with_check(valid_vlan_id))
        .with_property(PropertyDef::string("vlan_name").describe("VLAN name"))
        .with_property(
            PropertyDef::integer("mapped_vni")
                .with_range(4096..=16777215)
                .unset_by_default()
                .describe("VXLAN network identifier mapped to the VLAN"),
        )
        .with_property(PropertyDef::string("state").with_allowed(&["active", "suspend"]))
        .with_property(PropertyDef::boolean("shutdown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlan_id_range() {
        assert!(valid_vlan_id("1"));
        assert!(valid_vlan_id("4093"));
        assert!(!valid_vlan_id("0"));
        assert!(!valid_vlan_id("4000"));
        assert!(!valid_vlan_id("4094"));
        assert!(!kind().key("vlan").unwrap().matches("3968"));
    }
}
