//! `cisco_ospf_area_vlink`
//!
//! A virtual link through an OSPF area, identified by `ospf vrf area vlink`.
//! Both authentication keys are written with their encryption type in one
//! command each.

use crate::schema::{CompositeGroup, KeyField, PropertyDef, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_ospf_area_vlink";

pub const ENCRYPTION_TYPES: &[&str] = &["cleartext", "3des", "cisco_type_7"];

fn cleartext(name: &'static str, group: &'static str) -> PropertyDef {
    PropertyDef::string(name)
        .in_group(group)
        .with_allowed(ENCRYPTION_TYPES)
        .with_default(PropertyValue::Str("cleartext".to_string()))
}

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "OSPF virtual link")
        .with_key(KeyField::word("ospf"))
        .with_key(KeyField::word("vrf"))
        .with_key(KeyField::word("area"))
        .with_key(KeyField::word("vlink"))
        .with_property(PropertyDef::string("auth_key_chain").unset_by_default())
        .with_property(
            PropertyDef::string("authentication")
                .with_allowed(&["cleartext", "md5", "null"])
                .unset_by_default(),
        )
        .with_property(cleartext("authentication_key_encryption_type", "authentication_key"))
        .with_property(
            PropertyDef::string("authentication_key_password")
                .in_group("authentication_key")
                .unset_by_default(),
        )
        .with_property(PropertyDef::integer("dead_interval").with_range(1..=65535))
        .with_property(PropertyDef::integer("hello_interval").with_range(1..=65535))
        .with_property(PropertyDef::integer("retransmit_interval").with_range(1..=65535))
        .with_property(PropertyDef::integer("transmit_delay").with_range(1..=450))
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
        .with_property(cleartext("message_digest_encryption_type", "message_digest_key"))
        .with_property(
            PropertyDef::string("message_digest_password")
                .in_group("message_digest_key")
                .unset_by_default(),
        )
        .with_group(CompositeGroup::new(
            "authentication_key",
            "authentication_key_set",
            &["authentication_key_encryption_type", "authentication_key_password"],
        ))
        .with_group(CompositeGroup::new(
            "message_digest_key",
            "message_digest_key_set",
            &[
                "message_digest_key_id",
                "message_digest_algorithm_type",
                "message_digest_encryption_type",
                "message_digest_password",
            ],
        ))
}
