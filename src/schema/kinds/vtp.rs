//! `cisco_vtp`

use crate::schema::{PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_vtp";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "VLAN Trunking Protocol global settings")
        .singleton()
        .with_property(PropertyDef::string("domain").describe("VTP administrative domain"))
        .with_property(
            PropertyDef::string("filename").describe("VTP file name for the VLAN database"),
        )
        .with_property(
            PropertyDef::integer("version")
                .with_range(1..=3)
                .describe("VTP version"),
        )
        .with_property(
            PropertyDef::string("password")
                .unset_by_default()
                .describe("VTP domain password"),
        )
}
