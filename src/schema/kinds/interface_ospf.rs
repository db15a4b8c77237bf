//! `cisco_interface_ospf`
//!
//! OSPF settings of one interface within one OSPF process, identified by
//! `interface ospf`. The message-digest key is configured by a single
//! command carrying the key id, algorithm, encryption and password.

use crate::schema::{
    CompositeGroup, KeyField, KeyNormalizer, PropertyDef, Requirement, ResourceKind,
};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_interface_ospf";

pub const ENCRYPTION_TYPES: &[&str] = &["cleartext", "3des", "cisco_type_7"];

pub const NETWORK_TYPES: &[&str] = &["broadcast", "p2p"];

pub const MESSAGE_DIGEST_GROUP: &[&str] = &[
    "message_digest_key_id",
    "message_digest_algorithm_type",
    "message_digest_encryption_type",
    "message_digest_password",
];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "Per-interface OSPF settings")
        .with_key(KeyField::word("interface").normalized(KeyNormalizer::Lowercase))
        .with_key(KeyField::word("ospf"))
        .with_property(
            PropertyDef::string("area")
                .unset_by_default()
                .describe("Area as a dotted quad, e.g. 0.0.0.0"),
        )
        .with_property(PropertyDef::integer("cost").with_range(0..=65535))
        .with_property(PropertyDef::integer("hello_interval").with_range(1..=65535))
        .with_property(PropertyDef::integer("dead_interval").with_range(1..=65535))
        .with_property(PropertyDef::integer("priority").with_range(0..=255))
        .with_property(PropertyDef::integer("transmit_delay").with_range(1..=450))
        .with_property(PropertyDef::string("network_type").with_allowed(NETWORK_TYPES))
        .with_property(PropertyDef::boolean("passive_interface"))
        .with_property(PropertyDef::boolean("bfd"))
        .with_property(PropertyDef::boolean("mtu_ignore"))
        .with_property(PropertyDef::boolean("shutdown"))
        .with_property(PropertyDef::boolean("message_digest"))
        .with_property(
            PropertyDef::integer("message_digest_key_id")
                .in_group("message_digest_key")
                .with_range(0..=255)
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::string("message_digest_algorithm_type")
                .in_group("message_digest_key")
                .with_allowed(&["md5"])
                .with_default(PropertyValue::Str("md5".to_string())),
        )
        .with_property(
            PropertyDef::string("message_digest_encryption_type")
                .in_group("message_digest_key")
                .with_allowed(ENCRYPTION_TYPES)
                .with_default(PropertyValue::Str("cleartext".to_string())),
        )
        .with_property(
            PropertyDef::string("message_digest_password")
                .in_group("message_digest_key")
                .unset_by_default(),
        )
        .with_group(CompositeGroup::new(
            "message_digest_key",
            "message_digest_key_set",
            MESSAGE_DIGEST_GROUP,
        ))
        .with_requirement(Requirement {
            property: "message_digest_password",
            unless: &[],
            requires: "message_digest_key_id",
        })
        .with_requirement(Requirement {
            property: "message_digest_algorithm_type",
            unless: &[],
            requires: "message_digest_key_id",
        })
        .with_requirement(Requirement {
            property: "message_digest_encryption_type",
            unless: &[],
            requires: "message_digest_key_id",
        })
}
