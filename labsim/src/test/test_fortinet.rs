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
    device::{PolicyAction, Route},
    simulation::{Protocol, StepOutcome},
    types::{ContextFrame, FrameKind, Transport},
};

use super::*;
use test_log::test;

#[test]
fn sections_and_objects() {
    let mut lab = lab("lab-instance-a");
    assert_prompt!(lab, "dev-fw", "FortiGate #");
    run!(lab, "dev-fw", "config system interface");
    assert_prompt!(lab, "dev-fw", "FortiGate (interface) #");
    run!(lab, "dev-fw", "edit port2");
    assert_prompt!(lab, "dev-fw", "FortiGate (port2) #");
    pretty_assertions::assert_eq!(
        lab.device("dev-fw").unwrap().context,
        vec![
            ContextFrame::new(FrameKind::Section, "system interface"),
            ContextFrame::new(FrameKind::Interface, "port2"),
        ]
    );
    run!(lab, "dev-fw", "next");
    assert_prompt!(lab, "dev-fw", "FortiGate (interface) #");
    // next without an object stays in the section
    run!(lab, "dev-fw", "next");
    assert_prompt!(lab, "dev-fw", "FortiGate (interface) #");
    run!(lab, "dev-fw", "end");
    assert_prompt!(lab, "dev-fw", "FortiGate #");
}

#[test]
fn interface_settings_apply_immediately() {
    let mut lab = lab("lab-instance-a");
    run!(
        lab,
        "dev-fw",
        "config system interface",
        "edit port2",
        "set ip 10.0.0.6 255.255.255.252",
        "set alias \"LAN uplink\"",
        "set status down",
        "set allowaccess ping https"
    );
    let iface = &lab.device("dev-fw").unwrap().interfaces["port2"];
    assert_eq!(iface.cidr(), "10.0.0.6/30");
    assert_eq!(iface.description.as_deref(), Some("LAN uplink"));
    assert!(!iface.up);

    assert_output!(
        lab,
        "dev-fw",
        "show",
        [
            "config system interface",
            "    edit \"port2\"",
            "        set ip 10.0.0.6 255.255.255.252",
            "        set alias \"LAN uplink\"",
            "        set zone \"LAN\"",
            "        set status down",
            "    next",
            "end",
        ]
    );

    run!(lab, "dev-fw", "set ip 10.0.0.9/30", "unset alias", "set status up", "end");
    let iface = &lab.device("dev-fw").unwrap().interfaces["port2"];
    assert_eq!(iface.cidr(), "10.0.0.9/30");
    assert!(iface.description.is_none());
    assert!(iface.up);
}

#[test]
fn new_firewall_policy() {
    let mut lab = lab("lab-instance-a");
    run!(
        lab,
        "dev-fw",
        "config firewall policy",
        "edit 0",
        "set name Block-DNS",
        "set srcintf port2",
        "set dstintf port1",
        "set srcaddr all",
        "set action deny",
        "set service DNS",
        "set schedule always"
    );
    assert_prompt!(lab, "dev-fw", "FortiGate (2) #");
    run!(lab, "dev-fw", "next", "end");

    let policies = &lab.device("dev-fw").unwrap().policies;
    assert_eq!(policies.len(), 2);
    let p = &policies[1];
    assert_eq!(p.id, 2);
    assert_eq!(p.name, "Block-DNS");
    assert_eq!(p.from_zone, "port2");
    assert_eq!(p.to_zone, "port1");
    assert_eq!(p.src_addr, "any");
    assert_eq!(p.action, PolicyAction::Deny);
    assert_eq!(p.protocol, Some(Transport::Udp));
    assert_eq!(p.dst_port, Some(53));

    assert_prints!(lab, "dev-fw", "show firewall policy", "        set service \"DNS\"");
}

#[test]
fn policy_changes_affect_the_simulation() {
    let mut lab = lab("lab-instance-a");
    run!(lab, "dev-fw", "config firewall policy", "edit 1", "set action deny", "end");
    let steps = lab.simulate("dev-client", Protocol::Http).unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[3].outcome, StepOutcome::Drop);
    assert_eq!(steps[3].device_id.as_str(), "dev-fw");

    run!(lab, "dev-fw", "config firewall policy", "edit 1", "set action accept", "end");
    let steps = lab.simulate("dev-client", Protocol::Http).unwrap();
    assert!(steps.iter().all(|s| s.outcome == StepOutcome::Success));
}

#[test]
fn delete_entries() {
    let mut lab = lab("lab-instance-a");
    run!(lab, "dev-fw", "config firewall policy");
    assert_output!(lab, "dev-fw", "delete 99", ["entry not found in datasource"]);
    assert_output!(lab, "dev-fw", "delete 1", []);
    assert!(lab.device("dev-fw").unwrap().policies.is_empty());
    run!(lab, "dev-fw", "end", "config system interface");
    assert_output!(lab, "dev-fw", "delete port9", ["entry not found in datasource"]);
}

#[test]
fn invalid_values_are_rejected() {
    let mut lab = lab("lab-instance-a");
    run!(lab, "dev-fw", "config system interface", "edit port2");
    let before = lab.device("dev-fw").unwrap().interfaces["port2"].clone();
    assert_output!(lab, "dev-fw", "set status sideways", ["command parse error"]);
    assert_eq!(lab.device("dev-fw").unwrap().interfaces["port2"], before);

    run!(lab, "dev-fw", "end", "config firewall policy", "edit 1");
    let before = lab.device("dev-fw").unwrap().policies.clone();
    assert_output!(lab, "dev-fw", "set action maybe", ["command parse error"]);
    assert_eq!(lab.device("dev-fw").unwrap().policies, before);
}

#[test]
fn no_policy_id_after_the_largest() {
    let mut lab = lab("lab-instance-a");
    run!(lab, "dev-fw", "config firewall policy");
    assert_output!(lab, "dev-fw", "edit 4294967295", []);
    run!(lab, "dev-fw", "next");
    assert_output!(lab, "dev-fw", "edit 0", ["command parse error"]);
    let d = lab.device("dev-fw").unwrap();
    assert_eq!(d.policies.len(), 2);
    assert_eq!(d.context, vec![ContextFrame::new(FrameKind::Section, "firewall policy")]);
}

#[test]
fn static_routes_by_position() {
    let mut lab = lab("lab-instance-a");
    run!(
        lab,
        "dev-fw",
        "config router static",
        "edit 3",
        "set dst 10.20.0.0 255.255.0.0",
        "set gateway 10.0.0.1",
        "set device port2",
        "next"
    );
    let routes = &lab.device("dev-fw").unwrap().routes;
    assert_eq!(routes.len(), 3);
    assert_eq!(
        routes[2],
        Route {
            destination: "10.20.0.0/16".to_string(),
            next_hop: "10.0.0.1".to_string(),
            interface: Some("port2".to_string()),
        }
    );

    run!(lab, "dev-fw", "edit 1", "set dst 192.168.0.0/24", "next", "delete 2", "end");
    let routes = &lab.device("dev-fw").unwrap().routes;
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0], Route::new("192.168.0.0/24", "10.0.0.1"));
    assert_eq!(routes[1].destination, "10.20.0.0/16");
}

#[test]
fn routing_table() {
    let mut lab = lab("lab-instance-a");
    let table = output(&mut lab, "dev-fw", "get router info routing-table all");
    assert!(table.contains(&"S*      0.0.0.0/0 [10/0] via 203.0.113.1, port1".to_string()));
    assert!(table.contains(&"S       192.168.0.0/16 [10/0] via 10.0.0.1, port2".to_string()));
    assert!(table.contains(&"C       10.0.0.0/30 is directly connected, port2".to_string()));
}

#[test]
fn error_messages() {
    let mut lab = lab("lab-instance-a");
    assert_output!(lab, "dev-fw", "frobnicate", ["command parse error"]);
    assert_output!(lab, "dev-fw", "config foo bar", ["command parse error"]);
    assert_output!(lab, "dev-fw", "get foo", ["Command fail. Return code -1"]);
    assert_output!(lab, "dev-fw", "diagnose foo", ["Unknown diagnose command."]);
    run!(lab, "dev-fw", "config firewall policy");
    assert_output!(lab, "dev-fw", "edit abc", ["command parse error"]);
}
