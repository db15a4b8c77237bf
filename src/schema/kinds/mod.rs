//! Built-in resource kinds
//!
//! Each submodule exposes a `kind()` constructor returning the static table
//! for one NX-OS configuration entity.

pub mod aaa_authentication_login;
pub mod bgp;
pub mod bgp_af;
pub mod bgp_af_aa;
pub mod bgp_neighbor;
pub mod bgp_neighbor_af;
pub mod interface;
pub mod interface_hsrp_group;
pub mod interface_ospf;
pub mod ospf_area;
pub mod ospf_area_vlink;
pub mod pim_rp_address;
pub mod route_map;
pub mod tacacs_server;
pub mod tacacs_server_host;
pub mod vlan;
pub mod vrf_af;
pub mod vtp;

use super::ResourceKind;

/// Address families accepted by the `afi` key of unicast kinds.
pub const AFI: &[&str] = &["ipv4", "ipv6"];

pub const SAFI: &[&str] = &["unicast", "multicast"];

/// All built-in kinds, in registration order.
pub fn builtin() -> Vec<ResourceKind> {
    vec![
        aaa_authentication_login::kind(),
        bgp::kind(),
        bgp_af::kind(),
        bgp_af_aa::kind(),
        bgp_neighbor::kind(),
        bgp_neighbor_af::kind(),
        interface::kind(),
        interface_hsrp_group::kind(),
        interface_ospf::kind(),
        ospf_area::kind(),
        ospf_area_vlink::kind(),
        pim_rp_address::kind(),
        route_map::kind(),
        tacacs_server::kind(),
        tacacs_server_host::kind(),
        vlan::kind(),
        vrf_af::kind(),
        vtp::kind(),
    ]
}
