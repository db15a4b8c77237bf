//! `cisco_tacacs_server`
//!
//! Global TACACS+ server settings. The encryption type and key are written
//! together by one device command.

use crate::schema::{CompositeGroup, PropertyDef, Requirement, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_tacacs_server";

pub const ENCRYPTION_TYPES: &[&str] = &["clear", "encrypted", "none"];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "Global TACACS+ server settings")
        .singleton()
        .with_property(
            PropertyDef::integer("timeout")
                .with_range(1..=60)
                .describe("Seconds to wait for a server response"),
        )
        .with_property(
            PropertyDef::boolean("directed_request")
                .describe("Allow users to pick a server at login"),
        )
        .with_property(
            PropertyDef::integer("deadtime")
                .with_range(0..=1440)
                .describe("Minutes a failed server is skipped"),
        )
        .with_property(
            PropertyDef::string("encryption_type")
                .in_group("encryption")
                .with_allowed(ENCRYPTION_TYPES)
                .with_default(PropertyValue::Str("clear".to_string()))
                .describe("Encoding of the global key"),
        )
        .with_property(
            PropertyDef::string("encryption_password")
                .in_group("encryption")
                .unset_by_default()
                .describe("Global TACACS+ key"),
        )
        .with_property(
            PropertyDef::string("source_interface")
                .describe("Interface used as the source of TACACS+ packets"),
        )
        .with_group(CompositeGroup::new(
            "encryption",
            "encryption_key_set",
            &["encryption_type", "encryption_password"],
        ))
        .with_requirement(Requirement {
            property: "encryption_type",
            unless: &["none"],
            requires: "encryption_password",
        })
}
