//! `cisco_pim_rp_address`
//!
//! A static PIM rendezvous point. The kind has no properties: an RP address
//! is either configured or not.

use super::AFI;
use crate::schema::{KeyField, KeyNormalizer, ResourceKind};

pub const NAME: &str = "cisco_pim_rp_address";

pub fn kind() -> ResourceKind {
    ResourceKind::new(NAME, "Static PIM rendezvous point")
        .with_key(KeyField::word("afi").with_allowed(AFI))
        .with_key(KeyField::word("vrf").with_default("default"))
        .with_key(KeyField::word("rp_addr").normalized(KeyNormalizer::Network))
}
