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

use crate::{
    device::{Device, Interface},
    gui::GuiEdit,
    neighbors::{discover, NeighborKind},
    types::{DeviceClass, Vendor},
};

use super::*;
use maplit::btreemap;
use test_log::test;

#[test]
fn neighbors_share_the_first_three_octets() {
    let lab = lab("lab-instance-a");
    let rtr = lab.device("dev-rtr").unwrap();
    let found = discover(rtr, lab.devices());
    assert_eq!(found.len(), 2);

    assert_eq!(found[0].local_interface, "Gi0/0");
    assert_eq!(found[0].device_id.as_str(), "dev-sw");
    assert_eq!(found[0].hostname, "Core-SW");
    assert_eq!(found[0].remote_interface, "Gi0/2");
    assert_eq!(found[0].ip.to_string(), "192.168.20.1");

    assert_eq!(found[1].local_interface, "Gi0/1");
    assert_eq!(found[1].device_id.as_str(), "dev-fw");
    assert_eq!(found[1].remote_interface, "port2");
    assert_eq!(found[1].class, DeviceClass::Firewall);
}

#[test]
fn pseudo_mac_address() {
    let lab = lab("lab-instance-a");
    let found = discover(lab.device("dev-rtr").unwrap(), lab.devices());
    assert_eq!(found[0].mac(), "00sw:de:5e:1");
    assert_eq!(found[1].mac(), "00fw:de:5e:2");
}

#[test]
fn down_interfaces_are_ignored() {
    let mut lab = lab("lab-instance-a");
    lab.apply_gui_edit(
        "dev-fw",
        &GuiEdit::SetUp {
            interface: "port2".to_string(),
            up: false,
        },
    )
    .unwrap();
    let rows = lab.neighbors("dev-rtr", NeighborKind::Cdp).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("Core-SW"));

    lab.apply_gui_edit(
        "dev-rtr",
        &GuiEdit::ToggleUp {
            interface: "Gi0/0".to_string(),
        },
    )
    .unwrap();
    assert!(lab.neighbors("dev-rtr", NeighborKind::Arp).unwrap().is_empty());
}

#[test]
fn arp_rows() {
    let lab = lab("lab-instance-a");
    let rows = lab.neighbors("dev-sw", NeighborKind::Arp).unwrap();
    pretty_assertions::assert_eq!(
        rows,
        vec![
            format!("{:<15} {:<9} {:<16} ARPA   {}", "192.168.20.2", "00:05:00", "00tr:de:5e:2", "Gi0/2"),
            format!("{:<15} {:<9} {:<16} ARPA   {}", "192.168.10.10", "00:05:00", "00nt:de:5e:10", "Vlan10"),
        ]
    );
}

#[test]
fn devices_without_addresses() {
    let lonely = Device::new("x", "X", DeviceClass::Router, Vendor::Cisco)
        .with_interface("Gi0/0", Interface::default());
    let peer = Device::new("y", "Y", DeviceClass::Router, Vendor::Cisco)
        .with_interface("Gi0/0", Interface::with_address("10.0.0.1", "24"));
    let devices = btreemap! {
        lonely.id().clone() => lonely.clone(),
        peer.id().clone() => peer.clone(),
    };
    assert!(discover(&lonely, &devices).is_empty());
    assert!(discover(&peer, &devices).is_empty());
}

#[test]
fn unknown_device() {
    let lab = lab("lab-instance-a");
    assert!(lab.neighbors("dev-nope", NeighborKind::Arp).is_err());
}

#[test]
fn neighbors_are_symmetric() {
    for lab in catalog::labs().unwrap() {
        let devices = lab.devices();
        for (id, device) in devices.iter() {
            for n in discover(device, devices) {
                let back = discover(&devices[&n.device_id], devices);
                assert!(
                    back.iter().any(|m| &m.device_id == id
                        && m.local_interface == n.remote_interface
                        && m.remote_interface == n.local_interface),
                    "{}: {} sees {} but not the other way around",
                    lab.id(),
                    id,
                    n.device_id
                );
            }
        }
    }
}
