//! `cisco_ospf_area`

use crate::schema::{KeyField, PropertyDef, Requirement, ResourceKind};

pub const NAME: &str = "cisco_ospf_area";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "OSPF area")
        .with_key(KeyField::word("ospf"))
        .with_key(KeyField::word("vrf"))
        .with_key(KeyField::word("area"))
        .with_property(
            PropertyDef::string("authentication")
                .with_allowed(&["clear_text", "md5"])
                .unset_by_default(),
        )
        .with_property(PropertyDef::integer("default_cost").with_range(0..=16777215))
        .with_property(PropertyDef::string("filter_list_in").unset_by_default())
        .with_property(PropertyDef::string("filter_list_out").unset_by_default())
        .with_property(
            PropertyDef::nested_list("range")
                .unset_by_default()
                .describe("Rows of [prefix, not_advertise, cost]"),
        )
        .with_property(PropertyDef::boolean("stub"))
        .with_property(PropertyDef::boolean("stub_no_summary"))
        .with_requirement(Requirement {
            property: "stub_no_summary",
            unless: &["false"],
            requires: "stub",
        })
}
