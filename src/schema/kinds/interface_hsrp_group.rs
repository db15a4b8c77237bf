//! `cisco_interface_hsrp_group`
//!
//! An HSRP group on an interface, identified by `interface group iptype`.
//! Authentication, preemption, priority, timers and the IPv4 virtual
//! address are each a single device command with several arguments.

use crate::schema::{CompositeGroup, KeyField, KeyNormalizer, PropertyDef, ResourceKind};
use crate::value::PropertyValue;

pub const NAME: &str = "cisco_interface_hsrp_group";

pub const AUTHENTICATION_GROUP: &[&str] = &[
    "authentication_auth_type",
    "authentication_key_type",
    "authentication_enc_type",
    "authentication_string",
    "authentication_compatibility",
    "authentication_timeout",
];

pub const PREEMPT_GROUP: &[&str] = &[
    "preempt",
    "preempt_delay_minimum",
    "preempt_delay_reload",
    "preempt_delay_sync",
];

pub const PRIORITY_GROUP: &[&str] = &[
    "priority",
    "priority_forward_thresh_lower",
    "priority_forward_thresh_upper",
];

pub const TIMERS_GROUP: &[&str] = &[
    "timers_hello_msec",
    "timers_hello",
    "timers_hold_msec",
    "timers_hold",
];

fn grouped_integer(
    name: &'static str,
    group: &'static str,
    range: std::ops::RangeInclusive<i64>,
) -> PropertyDef {
    PropertyDef::integer(name).in_group(group).with_range(range)
}

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "HSRP group on an interface")
        .with_key(KeyField::word("interface").normalized(KeyNormalizer::Lowercase))
        .with_key(KeyField::number("group"))
        .with_key(KeyField::word("iptype").with_allowed(&["ipv4", "ipv6"]))
        // authentication
        .with_property(
            PropertyDef::string("authentication_auth_type")
                .in_group("authentication")
                .with_allowed(&["cleartext", "md5"]),
        )
        .with_property(
            PropertyDef::string("authentication_key_type")
                .in_group("authentication")
                .with_allowed(&["key-chain", "key-string"]),
        )
        .with_property(
            PropertyDef::string("authentication_enc_type")
                .in_group("authentication")
                .with_allowed(&["clear", "encrypted"]),
        )
        .with_property(
            PropertyDef::string("authentication_string")
                .in_group("authentication")
                .unset_by_default(),
        )
        .with_property(
            PropertyDef::boolean("authentication_compatibility")
                .in_group("authentication")
                .with_default(PropertyValue::Bool(false)),
        )
        .with_property(grouped_integer(
            "authentication_timeout",
            "authentication",
            0..=32767,
        ))
        // addresses
        .with_property(PropertyDef::boolean("ipv4_enable").in_group("ipv4_vip"))
        .with_property(
            PropertyDef::string("ipv4_vip")
                .in_group("ipv4_vip")
                .unset_by_default(),
        )
        .with_property(PropertyDef::flat_list("ipv6_vip").unset_by_default())
        .with_property(PropertyDef::boolean("ipv6_autoconfig"))
        .with_property(PropertyDef::string("mac_addr").unset_by_default())
        .with_property(PropertyDef::string("group_name").unset_by_default())
        // preemption
        .with_property(PropertyDef::boolean("preempt").in_group("preempt"))
        .with_property(grouped_integer("preempt_delay_minimum", "preempt", 0..=3600))
        .with_property(grouped_integer("preempt_delay_reload", "preempt", 0..=3600))
        .with_property(grouped_integer("preempt_delay_sync", "preempt", 0..=3600))
        // priority
        .with_property(grouped_integer("priority", "priority", 0..=255))
        .with_property(grouped_integer(
            "priority_forward_thresh_lower",
            "priority",
            1..=255,
        ))
        .with_property(grouped_integer(
            "priority_forward_thresh_upper",
            "priority",
            1..=255,
        ))
        // timers
        .with_property(PropertyDef::boolean("timers_hello_msec").in_group("timers"))
        .with_property(grouped_integer("timers_hello", "timers", 1..=999))
        .with_property(PropertyDef::boolean("timers_hold_msec").in_group("timers"))
        .with_property(grouped_integer("timers_hold", "timers", 3..=3000))
        .with_group(CompositeGroup::new(
            "authentication",
            "authentication_set",
            AUTHENTICATION_GROUP,
        ))
        .with_group(CompositeGroup::new(
            "ipv4_vip",
            "ipv4_vip_set",
            &["ipv4_enable", "ipv4_vip"],
        ))
        .with_group(CompositeGroup::new("preempt", "preempt_set", PREEMPT_GROUP))
        .with_group(CompositeGroup::new("priority", "priority_level_set", PRIORITY_GROUP))
        .with_group(CompositeGroup::new("timers", "timers_set", TIMERS_GROUP))
}
