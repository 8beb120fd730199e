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
    device::Device,
    prompt::render_prompt,
    types::{CliMode, ContextFrame, DeviceClass, FrameKind},
};

use super::*;

fn device(vendor: Vendor, mode: CliMode, context: Vec<ContextFrame>) -> Device {
    let mut d = Device::new("d", "R1", DeviceClass::Router, vendor);
    d.mode = mode;
    d.context = context;
    d
}

#[test]
fn cisco() {
    let p = |mode| render_prompt(&device(Vendor::Cisco, mode, Vec::new()));
    assert_eq!(p(CliMode::User), "R1>");
    assert_eq!(p(CliMode::Privileged), "R1#");
    assert_eq!(p(CliMode::Config), "R1(config)#");
    assert_eq!(p(CliMode::ConfigInterface), "R1(config-if)#");
    assert_eq!(p(CliMode::ConfigRouter), "R1(config-router)#");
    assert_eq!(p(CliMode::ConfigVlan), "R1(config-vlan)#");
    // IOS-like vendors share the prompt
    assert_eq!(render_prompt(&device(Vendor::Aruba, CliMode::Config, Vec::new())), "R1(config)#");
}

#[test]
fn juniper() {
    assert_eq!(render_prompt(&device(Vendor::Juniper, CliMode::User, Vec::new())), "root@R1>");
    assert_eq!(
        render_prompt(&device(Vendor::Juniper, CliMode::Edit, Vec::new())),
        "[edit]\nroot@R1#"
    );
    assert_eq!(
        render_prompt(&device(
            Vendor::Juniper,
            CliMode::Edit,
            vec![ContextFrame::new(FrameKind::Interface, "ge-0/0/0")]
        )),
        "[edit interfaces ge-0/0/0]\nroot@R1#"
    );
    assert_eq!(
        render_prompt(&device(
            Vendor::Juniper,
            CliMode::Edit,
            vec![ContextFrame::new(FrameKind::Zone, "trust")]
        )),
        "[edit security zones security-zone trust]\nroot@R1#"
    );
}

#[test]
fn fortinet() {
    let p = |context| render_prompt(&device(Vendor::Fortinet, CliMode::User, context));
    assert_eq!(p(Vec::new()), "R1 #");
    assert_eq!(
        p(vec![ContextFrame::new(FrameKind::Section, "firewall policy")]),
        "R1 (policy) #"
    );
    assert_eq!(
        p(vec![
            ContextFrame::new(FrameKind::Section, "system interface"),
            ContextFrame::new(FrameKind::Interface, "port1"),
        ]),
        "R1 (port1) #"
    );
}

#[test]
fn paloalto_and_cloud() {
    assert_eq!(render_prompt(&device(Vendor::PaloAlto, CliMode::User, Vec::new())), "admin@R1>");
    assert_eq!(render_prompt(&device(Vendor::PaloAlto, CliMode::Config, Vec::new())), "admin@R1#");
    assert_eq!(render_prompt(&device(Vendor::Internet, CliMode::User, Vec::new())), "R1>");
}

#[test]
fn hostname_changes_the_prompt() {
    let mut d = device(Vendor::Cisco, CliMode::Privileged, Vec::new());
    d.name = String::from("Core-1");
    assert_eq!(render_prompt(&d), "Core-1#");
}
