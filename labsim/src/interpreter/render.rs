// LabSim: Multi-vendor network lab simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Helpers shared by the output generators of the interpreters.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::{
    command::Exec,
    device::{parse_prefix_len, Device, Interface},
    neighbors::{discover, Neighbor},
};

/// `up` or `down`
pub(super) fn up_down(up: bool) -> &'static str {
    if up {
        "up"
    } else {
        "down"
    }
}

/// Build a normalized prefix from an address and a mask in any notation.
pub(super) fn prefix(ip: &str, mask: &str) -> Option<Ipv4Net> {
    let ip: Ipv4Addr = ip.parse().ok()?;
    Ipv4Net::new(ip, parse_prefix_len(mask)?).ok().map(|n| n.trunc())
}

/// Parse a CIDR string as normalized prefix.
pub(super) fn parse_cidr(cidr: &str) -> Option<Ipv4Net> {
    let (ip, len) = cidr.split_once('/')?;
    prefix(ip, len)
}

/// Split a prefix in CIDR notation into network address and dotted-decimal mask.
pub(super) fn dotted(cidr: &str) -> (String, String) {
    match parse_cidr(cidr) {
        Some(net) => (net.network().to_string(), net.netmask().to_string()),
        None => (cidr.to_string(), String::new()),
    }
}

/// Connected networks of all up and addressed interfaces: `(network, host address, interface)`.
pub(super) fn connected<'a>(
    interfaces: impl IntoIterator<Item = (&'a String, &'a Interface)>,
) -> Vec<(Ipv4Net, Ipv4Net, &'a str)> {
    interfaces
        .into_iter()
        .filter(|(_, i)| i.up)
        .filter_map(|(name, i)| {
            let host = i.net()?;
            Some((host.trunc(), Ipv4Net::new(host.addr(), 32).ok()?, name.as_str()))
        })
        .collect()
}

/// All neighbors of the working device.
pub(super) fn neighbors(exec: &Exec<'_>) -> Vec<Neighbor> {
    discover(&exec.device, exec.devices)
}

/// Lines of previously entered commands, taken from the history of the device.
pub(super) fn command_history(device: &Device) -> Vec<String> {
    device
        .history
        .iter()
        .filter(|l| l.starts_with(device.name.as_str()) || l.starts_with("root@") || l.starts_with("admin@"))
        .filter_map(|l| {
            let (_, cmd) = l.split_once(|c: char| c == '>' || c == '#')?;
            let cmd = cmd.trim();
            (!cmd.is_empty()).then(|| format!("  {cmd}"))
        })
        .collect()
}
