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

//! Neighbor discovery.
//!
//! Two devices are neighbors if they have up interfaces whose addresses share the first three
//! octets. This is a rough approximation of what ARP and CDP would show on a real network, but
//! it is deterministic: the result only depends on the device configurations.

use std::{collections::BTreeMap, net::Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::{
    device::Device,
    types::{DeviceClass, DeviceId},
};

/// Kind of neighbor table to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborKind {
    /// ARP-style rows (address and hardware address)
    Arp,
    /// CDP or LLDP-style rows (hostname, ports, and platform)
    Cdp,
}

/// One discovered neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighbor {
    /// Local interface on which the neighbor was seen
    pub local_interface: String,
    /// Id of the neighbor
    pub device_id: DeviceId,
    /// Hostname of the neighbor
    pub hostname: String,
    /// Class of the neighbor
    pub class: DeviceClass,
    /// Interface of the neighbor
    pub remote_interface: String,
    /// Address of the neighbor interface
    pub ip: Ipv4Addr,
}

impl Neighbor {
    /// Pseudo MAC address derived from the device id and the last octet of the address.
    pub fn mac(&self) -> String {
        let id = self.device_id.as_str();
        let chars: Vec<char> = id.chars().collect();
        let last2: String = chars[chars.len().saturating_sub(2)..].iter().collect();
        let first2: String = chars.iter().take(2).collect();
        format!("00{}:{}:5e:{}", last2, first2, self.ip.octets()[3])
    }

    /// Render the neighbor as an ARP row (without the protocol column).
    pub fn arp_row(&self) -> String {
        format!(
            "{:<15} {:<9} {:<16} ARPA   {}",
            self.ip.to_string(),
            "00:05:00",
            self.mac(),
            self.local_interface
        )
    }

    /// Render the neighbor as a CDP row.
    pub fn cdp_row(&self) -> String {
        format!(
            "{:<20} {:<15} 150       R S I    {:<10} {}",
            self.hostname,
            self.local_interface,
            self.class.to_string(),
            self.remote_interface
        )
    }
}

fn subnet(ip: Ipv4Addr) -> [u8; 3] {
    let o = ip.octets();
    [o[0], o[1], o[2]]
}

/// Discover all neighbors of a device. Local interfaces are ordered by name, peers by id, and
/// peer interfaces by name.
pub fn discover(device: &Device, devices: &BTreeMap<DeviceId, Device>) -> Vec<Neighbor> {
    let mut result = Vec::new();
    for (local, iface) in device.interfaces.iter().filter(|(_, i)| i.up) {
        let Some(ip) = iface.ipv4() else { continue };
        for peer in devices.values().filter(|d| d.id() != device.id()) {
            for (remote, peer_iface) in peer.interfaces.iter().filter(|(_, i)| i.up) {
                let Some(peer_ip) = peer_iface.ipv4() else { continue };
                if subnet(peer_ip) == subnet(ip) {
                    result.push(Neighbor {
                        local_interface: local.clone(),
                        device_id: peer.id().clone(),
                        hostname: peer.name.clone(),
                        class: peer.class,
                        remote_interface: remote.clone(),
                        ip: peer_ip,
                    });
                }
            }
        }
    }
    result
}

/// Render the neighbor table of a device.
pub fn find_neighbors(
    device: &Device,
    devices: &BTreeMap<DeviceId, Device>,
    kind: NeighborKind,
) -> Vec<String> {
    discover(device, devices)
        .iter()
        .map(|n| match kind {
            NeighborKind::Arp => n.arp_row(),
            NeighborKind::Cdp => n.cdp_row(),
        })
        .collect()
}
