//! `cisco_tacacs_server_host`
//!
//! One TACACS+ server. Like the global settings, the key and its encoding
//! are written by one command.

use super::tacacs_server::ENCRYPTION_TYPES;
use crate::schema::{CompositeGroup, KeyField, PropertyDef, Requirement, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_tacacs_server_host";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "TACACS+ server host")
        .with_key(KeyField::word("host"))
        .with_property(PropertyDef::integer("port").with_range(1..=65535))
        .with_property(PropertyDef::integer("timeout").with_range(1..=60))
        .with_property(
            PropertyDef::string("encryption_type")
                .in_group("encryption")
                .with_allowed(ENCRYPTION_TYPES)
                .with_default(PropertyValue::Str("clear".to_string())),
        )
        .with_property(
            PropertyDef::string("encryption_password")
                .in_group("encryption")
                .unset_by_default(),
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
