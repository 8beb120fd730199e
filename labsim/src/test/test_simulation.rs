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
    formatter::LabFormatter,
    simulation::{Protocol, StepOutcome},
    types::LabError,
};

use super::*;
use test_log::test;

#[test]
fn all_hops_forward() {
    let lab = lab("lab-instance-a");
    let steps = lab.simulate("dev-client", Protocol::Http).unwrap();
    let ids: Vec<&str> = steps.iter().map(|s| s.device_id.as_str()).collect();
    pretty_assertions::assert_eq!(ids, vec!["dev-client", "dev-sw", "dev-rtr", "dev-fw", "dev-isp"]);
    assert!(steps.iter().all(|s| s.outcome == StepOutcome::Success));
    assert_eq!(steps[0].detail.as_deref(), Some("src 192.168.10.10"));
    assert_eq!(steps[3].detail.as_deref(), Some("LAN_TO_WAN"));
    assert_eq!(steps[2].description, "Edge-Rtr routes the packet (L3) via 10.0.0.2");
}

#[test]
fn firewall_without_allow_rule_drops() {
    let mut lab = lab("lab-instance-a");
    lab.device_mut("dev-fw").unwrap().policies.clear();
    let steps = lab.simulate("dev-client", Protocol::Http).unwrap();
    assert_eq!(steps.len(), 4);
    let last = steps.last().unwrap();
    assert_eq!(last.device_id.as_str(), "dev-fw");
    assert_eq!(last.outcome, StepOutcome::Drop);
    assert_eq!(last.detail.as_deref(), Some("implicit-deny"));
}

#[test]
fn labs_without_policies_drop_at_the_firewall() {
    for id in ["lab-instance-c", "lab-instance-d"] {
        let lab = lab(id);
        let steps = lab.simulate("dev-client", Protocol::Https).unwrap();
        assert_eq!(steps.len(), 4, "{id}");
        assert_eq!(steps[3].outcome, StepOutcome::Drop, "{id}");
    }
}

#[test]
fn nsg_decisions() {
    let lab = lab("lab-instance-e");
    let decide = |protocol: Protocol| {
        let steps = lab.simulate("dev-client", protocol).unwrap();
        let nsg = steps.iter().find(|s| s.device_id.as_str() == "dev-nsg").unwrap();
        (nsg.outcome, nsg.detail.clone().unwrap(), steps.len())
    };
    use StepOutcome::{Drop, Success};
    assert_eq!(decide(Protocol::Http), (Success, "Allow-HTTP".to_string(), 4));
    assert_eq!(decide(Protocol::Https), (Success, "Allow-HTTPS".to_string(), 4));
    assert_eq!(decide(Protocol::Telnet), (Drop, "Deny-Telnet".to_string(), 3));
    assert_eq!(decide(Protocol::Ssh), (Drop, "Deny-All".to_string(), 3));
    assert_eq!(decide(Protocol::Icmp), (Drop, "Deny-All".to_string(), 3));
    // allow rules win over deny rules, even with a lower priority
    assert_eq!(decide(Protocol::Dns), (Success, "Allow-DNS".to_string(), 4));
}

#[test]
fn nsg_implicit_deny() {
    let mut lab = lab("lab-instance-e");
    lab.device_mut("dev-nsg")
        .unwrap()
        .policies
        .retain(|p| p.name != "Deny-All");
    let steps = lab.simulate("dev-client", Protocol::Ssh).unwrap();
    let last = steps.last().unwrap();
    assert_eq!(last.outcome, StepOutcome::Drop);
    assert_eq!(last.detail.as_deref(), Some("implicit-deny"));
}

#[test]
fn simulate_to_destination() {
    let lab = lab("lab-instance-a");
    let steps = lab.simulate_to("dev-client", "dev-rtr", Protocol::Ssh).unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2].outcome, StepOutcome::Process);
    assert_eq!(steps[2].description, "Edge-Rtr receives and processes the SSH request");

    let steps = lab.simulate_to("dev-client", "dev-isp", Protocol::Http).unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[4].outcome, StepOutcome::Process);

    assert!(matches!(
        lab.simulate_to("dev-client", "dev-nope", Protocol::Http),
        Err(LabError::DeviceNotFound(_))
    ));
    assert!(matches!(
        lab.simulate_to("dev-client", "dev-client", Protocol::Http),
        Err(LabError::DeviceNotFound(_))
    ));
}

#[test]
fn unknown_source() {
    let lab = lab("lab-instance-a");
    assert!(matches!(
        lab.simulate("dev-nope", Protocol::Http),
        Err(LabError::DeviceNotFound(_))
    ));
}

#[test]
fn protocol_tags() {
    assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
    assert_eq!("PING".parse::<Protocol>().unwrap(), Protocol::Icmp);
    assert!(matches!(
        "gopher".parse::<Protocol>(),
        Err(LabError::UnspecifiedProtocol(p)) if p == "gopher"
    ));
    assert_eq!(Protocol::Dns.selector(), "udp/53");
    assert_eq!(Protocol::Icmp.selector(), "icmp");
}

#[test]
fn format_steps() {
    let mut lab = lab("lab-instance-a");
    lab.device_mut("dev-fw").unwrap().policies.clear();
    let steps = lab.simulate("dev-client", Protocol::Http).unwrap();
    let text = steps.fmt(&lab);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "[  OK   ] Client-VLAN10: Client-VLAN10 generates HTTP traffic (tcp/80) (src 192.168.10.10)"
    );
    assert!(lines[3].starts_with("[ DROP  ] FortiGate: "));
    assert!(lines[3].ends_with("(implicit-deny)"));
    assert_eq!(
        lab.topology().fmt(&lab),
        "Client-VLAN10 -> Core-SW -> Edge-Rtr -> FortiGate -> ISP-Cloud"
    );
}
