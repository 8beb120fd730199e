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

//! Read-only console of cloud resources (network security groups, virtual machines, and the
//! internet uplink).

use lazy_static::lazy_static;

use super::{
    render::{connected, neighbors, up_down},
    CommandInterpreter,
};
use crate::{
    command::{Captures, Exec, Rule},
    device::{Device, PolicyAction},
    simulation::nsg_order,
    types::{CliMode, VendorFamily},
};

const UNSUPPORTED: &str = "% Error: command not supported on this cloud resource.";

const ANY: &[CliMode] = &[];

/// Interpreter of cloud resources. Only inspection commands are available.
#[derive(Debug, Default, Clone, Copy)]
pub struct CloudInterpreter;

impl CommandInterpreter for CloudInterpreter {
    fn family(&self) -> VendorFamily {
        VendorFamily::Cloud
    }

    fn modes(&self) -> &'static [CliMode] {
        &[CliMode::User]
    }

    fn rules(&self) -> &'static [Rule] {
        RULES.as_slice()
    }

    fn unknown(&self, _: &Device) -> &'static str {
        UNSUPPORTED
    }

    fn incomplete(&self) -> &'static str {
        UNSUPPORTED
    }
}

fn show_nsg_rules(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    if d.policies.is_empty() {
        exec.print("No security rules are associated with this resource.");
        return;
    }
    let mut lines = vec![format!(
        "{:<9} {:<20} {:<10} {:<7} {:<9} {:<6} {:<10} {}",
        "Priority", "Name", "Direction", "Access", "Protocol", "Port", "Source", "Destination"
    )];
    lines.extend(nsg_order(&d.policies).into_iter().map(|p| {
        format!(
            "{:<9} {:<20} {:<10} {:<7} {:<9} {:<6} {:<10} {}",
            p.priority.map(|x| x.to_string()).unwrap_or_else(|| String::from("-")),
            p.name,
            "Inbound",
            match p.action {
                PolicyAction::Allow => "Allow",
                PolicyAction::Deny => "Deny",
            },
            p.protocol
                .map(|t| t.to_string().to_uppercase())
                .unwrap_or_else(|| String::from("*")),
            p.dst_port.map(|x| x.to_string()).unwrap_or_else(|| String::from("*")),
            p.src_addr,
            p.dst_addr
        )
    }));
    exec.print_all(lines);
}

fn show_effective_routes(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let mut lines = vec![format!(
        "{:<9} {:<7} {:<19} {:<19} {}",
        "Source", "State", "Address Prefix", "Next Hop Type", "Next Hop IP"
    )];
    for (net, _, _) in connected(d.interfaces.iter()) {
        lines.push(format!(
            "{:<9} {:<7} {:<19} {:<19} {}",
            "Default",
            "Active",
            net.to_string(),
            "VnetLocal",
            "-"
        ));
    }
    for r in d.routes.iter() {
        lines.push(format!(
            "{:<9} {:<7} {:<19} {:<19} {}",
            "User", "Active", r.destination, "VirtualAppliance", r.next_hop
        ));
    }
    exec.print_all(lines);
}

fn show_interfaces(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec![format!(
        "{:<6} {:<15} {:<19} {:<6} {}",
        "Name", "Private IP", "Subnet", "State", "Zone"
    )];
    lines.extend(exec.device.interfaces.iter().map(|(name, i)| {
        format!(
            "{:<6} {:<15} {:<19} {:<6} {}",
            name,
            i.ip,
            i.net().map(|n| n.trunc().to_string()).unwrap_or_default(),
            up_down(i.up),
            i.zone.as_deref().unwrap_or("-")
        )
    }));
    exec.print_all(lines);
}

fn show_arp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines =
        vec!["Address          Age (min)  Hardware Addr    Type   Interface".to_string()];
    lines.extend(neighbors(exec).iter().map(|n| n.arp_row()));
    exec.print_all(lines);
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule::run(ANY, "show nsg rules", show_nsg_rules),
        Rule::run(ANY, "show effective-routes", show_effective_routes),
        Rule::run(ANY, "show interfaces", show_interfaces),
        Rule::run(ANY, "show arp", show_arp),
        Rule::run(ANY, "exit", |_, _| {}),
    ];
}
