// NetLab: Interactive console for multi-vendor networking labs
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

use std::time::Duration;

use labsim::prelude::*;

use crate::{
    config::ConsoleConfig,
    session::{LabSession, MetaCommand, SessionError},
};

use pretty_assertions::assert_eq;
use test_log::test;

fn session(id: &str) -> LabSession {
    LabSession::start(id, ConsoleConfig::default()).unwrap()
}

#[test]
fn console_opens_on_the_firewall() {
    let s = session("lab-instance-a");
    assert_eq!(s.active_id().as_str(), "dev-fw");
    assert_eq!(s.prompt(), "FortiGate #");
    // no firewall in the topology
    let s = session("lab-instance-e");
    assert_eq!(s.active_id().as_str(), "dev-client");
}

#[test]
fn boot_banner_is_shown_once() {
    let mut s = session("lab-instance-a");
    let banner = s.unread();
    assert_eq!(banner.last().map(String::as_str), Some("Welcome to FortiGate (Fortinet)"));
    assert!(s.unread().is_empty());

    let mut s = LabSession::start(
        "lab-instance-a",
        ConsoleConfig {
            echo_boot_banner: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(s.unread().is_empty());
    s.select("dev-client").unwrap();
    assert!(s.unread().is_empty());
}

#[test]
fn submit_returns_output_without_echo() {
    let mut s = session("lab-instance-a");
    let out = s.submit("get system status").unwrap();
    assert_eq!(
        out,
        vec![
            "Version: FortiGate-VM64 v7.2.0",
            "Firmware Signature: signed",
            "Admin domain config: disable"
        ]
    );
    assert!(s.unread().iter().all(|l| !l.starts_with("Version")));

    s.select("dev-rtr").unwrap();
    assert!(s.submit("enable").unwrap().is_empty());
    assert_eq!(s.prompt(), "Edge-Rtr#");
}

#[test]
fn select_unknown_device() {
    let mut s = session("lab-instance-a");
    assert!(matches!(
        s.select("dev-nope"),
        Err(SessionError::Lab(LabError::DeviceNotFound(_)))
    ));
    assert_eq!(s.active_id().as_str(), "dev-fw");
}

#[test]
fn cloud_devices_have_a_console() {
    let mut s = session("lab-instance-e");
    s.select("dev-nsg").unwrap();
    assert_eq!(s.prompt(), "VNet-NSG>");
    assert!(!s.submit("show nsg rules").unwrap().is_empty());
}

#[test]
fn playback_reveals_steps_in_order() {
    let mut s = session("lab-instance-a");
    s.select("dev-client").unwrap();
    let mut playback = s.simulate(Protocol::Http, None).unwrap();
    assert_eq!(playback.delay(), Duration::from_millis(800));
    assert_eq!(playback.steps().len(), 5);
    assert!(playback.revealed().is_empty());

    let first = playback.tick().unwrap().clone();
    assert_eq!(first.device_id.as_str(), "dev-client");
    assert_eq!(playback.revealed(), &[first]);
    while playback.tick().is_some() {}
    assert!(playback.is_done());
    assert_eq!(playback.revealed().len(), 5);
    assert_eq!(playback.outcome(), Some(StepOutcome::Success));
    assert!(playback.tick().is_none());
}

#[test]
fn playback_to_destination() {
    let mut s = session("lab-instance-a");
    s.select("dev-client").unwrap();
    let playback = s.simulate(Protocol::Ssh, Some("dev-rtr")).unwrap();
    assert_eq!(playback.steps().len(), 3);
    assert_eq!(playback.outcome(), Some(StepOutcome::Process));
    assert!(s.simulate(Protocol::Ssh, Some("dev-nope")).is_err());
}

#[test]
fn nsg_denies_telnet() {
    let mut s = session("lab-instance-e");
    let playback = s.simulate(Protocol::Telnet, None).unwrap();
    assert_eq!(playback.steps().len(), 3);
    assert_eq!(playback.outcome(), Some(StepOutcome::Drop));
    s.select("dev-client").unwrap();
    let playback = s.simulate(Protocol::Http, None).unwrap();
    assert_ne!(playback.outcome(), Some(StepOutcome::Drop));
}

#[test]
fn gui_edits_are_logged() {
    let mut s = session("lab-instance-a");
    let line = s
        .apply_gui(&GuiEdit::SetIp {
            interface: "port1".to_string(),
            ip: "203.0.113.9".to_string(),
        })
        .unwrap();
    assert_eq!(line, "GUI: Changed port1 IP to 203.0.113.9");
    assert_eq!(s.active().interfaces["port1"].ip, "203.0.113.9");
    let line = s
        .apply_gui(&GuiEdit::ToggleUp {
            interface: "port9".to_string(),
        })
        .unwrap();
    assert_eq!(line, "GUI: Interface port9 not found");
}

#[test]
fn neighbors_and_completion() {
    let mut s = session("lab-instance-a");
    assert_eq!(
        s.complete("get router info routing-t").unwrap(),
        "get router info routing-table "
    );
    s.select("dev-rtr").unwrap();
    assert_eq!(s.neighbors(NeighborKind::Cdp).unwrap().len(), 2);
}

#[test]
fn restart_keeps_the_console() {
    let mut s = session("lab-instance-a");
    s.select("dev-rtr").unwrap();
    s.submit("enable").unwrap();
    assert_eq!(s.prompt(), "Edge-Rtr#");
    s.restart().unwrap();
    assert_eq!(s.active_id().as_str(), "dev-rtr");
    assert_eq!(s.prompt(), "Edge-Rtr>");
    assert_eq!(
        s.unread().last().map(String::as_str),
        Some("Welcome to Edge-Rtr (Cisco)")
    );
}

#[test]
fn device_rows_mark_the_active_console() {
    let s = session("lab-instance-a");
    let rows = s.device_rows();
    assert_eq!(rows.len(), 5);
    let active = rows.iter().filter(|r| r.starts_with('*')).collect::<Vec<_>>();
    assert_eq!(active.len(), 1);
    assert!(active[0].contains("dev-fw"));
    assert!(active[0].contains("FortiGate"));
}

#[test]
fn parse_meta_commands() {
    let p = |s: &str| s.parse::<MetaCommand>().unwrap();
    assert_eq!(p(":help"), MetaCommand::Help);
    assert_eq!(p("devices"), MetaCommand::Devices);
    assert_eq!(p(":use dev-rtr"), MetaCommand::Use("dev-rtr".to_string()));
    assert_eq!(p(":neighbors"), MetaCommand::Neighbors(NeighborKind::Arp));
    assert_eq!(p(":neighbors lldp"), MetaCommand::Neighbors(NeighborKind::Cdp));
    assert_eq!(p(":complete sh ip"), MetaCommand::Complete("sh ip".to_string()));
    assert_eq!(
        p(":simulate ping dev-isp"),
        MetaCommand::Simulate {
            protocol: Protocol::Icmp,
            destination: Some("dev-isp".to_string())
        }
    );
    assert_eq!(
        p(":gui desc Gi0/1 Uplink to FW"),
        MetaCommand::Gui(GuiEdit::SetDescription {
            interface: "Gi0/1".to_string(),
            description: Some("Uplink to FW".to_string())
        })
    );
    assert_eq!(
        p(":gui zone port1"),
        MetaCommand::Gui(GuiEdit::SetZone {
            interface: "port1".to_string(),
            zone: None
        })
    );
    assert_eq!(p(":gui commit"), MetaCommand::Gui(GuiEdit::Commit));
    assert_eq!(p(":ask what is a vlan"), MetaCommand::Ask("what is a vlan".to_string()));
    assert_eq!(p(":quiz ospf"), MetaCommand::Quiz("ospf".to_string()));
    assert_eq!(p(":q"), MetaCommand::Quit);
}

#[test]
fn invalid_meta_commands() {
    let e = |s: &str| s.parse::<MetaCommand>().unwrap_err();
    assert!(matches!(e(":frobnicate"), SessionError::UnknownMeta(c) if c == "frobnicate"));
    assert!(matches!(e(":"), SessionError::UnknownMeta(_)));
    assert!(matches!(e(":use"), SessionError::InvalidArguments("use", _)));
    assert!(matches!(e(":ask"), SessionError::InvalidArguments("ask", _)));
    assert!(matches!(e(":gui ip port1"), SessionError::InvalidArguments("gui", _)));
    assert!(matches!(
        e(":simulate smtp"),
        SessionError::Lab(LabError::UnspecifiedProtocol(_))
    ));
}
