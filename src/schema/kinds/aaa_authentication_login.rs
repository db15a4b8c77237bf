//! `cisco_aaa_authentication_login`
//!
//! Login authentication methods. Only one method can be active at a time,
//! and an active method must be turned off before another is turned on.

use crate::schema::{ApplyOrder, PropertyDef, ResourceKind};

pub const NAME: &str = "cisco_aaa_authentication_login";

/// Methods of which at most one may be enabled.
pub const METHODS: &[&str] = &["ascii_authentication", "chap", "mschap", "mschapv2"];

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "AAA authentication login methods")
        .singleton()
        .with_property(
            PropertyDef::boolean("ascii_authentication")
                .describe("ASCII authentication for login"),
        )
        .with_property(PropertyDef::boolean("chap").describe("CHAP authentication for login"))
        .with_property(
            PropertyDef::boolean("error_display").describe("Display login failure messages"),
        )
        .with_property(
            PropertyDef::boolean("mschap").describe("MS-CHAP authentication for login"),
        )
        .with_property(
            PropertyDef::boolean("mschapv2").describe("MS-CHAP v2 authentication for login"),
        )
        .with_exclusive(METHODS, true)
        .with_apply_order(ApplyOrder::DisableFirst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_are_exclusive() {
        let kind = kind();
        assert!(kind.is_singleton());
        assert_eq!(kind.exclusive.len(), 1);
        assert!(kind.exclusive[0].disable_others);
        assert!(!kind.exclusive[0].members.contains(&"error_display"));
    }
}
