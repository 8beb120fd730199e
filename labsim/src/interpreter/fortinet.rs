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

//! FortiOS-style interpreter.
//!
//! FortiOS has no modes. Nesting is expressed by the context stack only: `config <section>`
//! pushes a section frame, `edit <object>` pushes an object frame below it, `next` pops the
//! object and `end` leaves the section. Changes apply immediately.

use std::net::Ipv4Addr;

use lazy_static::lazy_static;

use super::{
    render::{connected, dotted, neighbors, parse_cidr, prefix, up_down},
    CommandInterpreter,
};
use crate::{
    command::{Captures, Exec, Rule, Scope},
    device::{Device, Interface, Policy, PolicyAction, Route},
    simulation::Protocol,
    types::{CliMode, ContextFrame, FrameKind, Transport, VendorFamily},
};

const PARSE_ERROR: &str = "command parse error";
const GET_ERROR: &str = "Command fail. Return code -1";
const DIAG_ERROR: &str = "Unknown diagnose command.";
const NOT_FOUND: &str = "entry not found in datasource";

const ANY: &[CliMode] = &[];

const INTERFACES: &str = "system interface";
const POLICIES: &str = "firewall policy";
const STATIC: &str = "router static";
const OSPF: &str = "router ospf";

/// Interpreter of the FortiOS command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct FortinetInterpreter;

impl CommandInterpreter for FortinetInterpreter {
    fn family(&self) -> VendorFamily {
        VendorFamily::Fortinet
    }

    fn modes(&self) -> &'static [CliMode] {
        &[CliMode::User]
    }

    fn rules(&self) -> &'static [Rule] {
        RULES.as_slice()
    }

    fn unknown(&self, _: &Device) -> &'static str {
        PARSE_ERROR
    }

    fn incomplete(&self) -> &'static str {
        PARSE_ERROR
    }
}

fn unquote(s: &str) -> String {
    s.trim_matches('"').to_string()
}

fn enter_section(exec: &mut Exec<'_>, section: &'static str) {
    exec.device.context = vec![ContextFrame::new(FrameKind::Section, section)];
}

fn push_object(exec: &mut Exec<'_>, kind: FrameKind, name: impl Into<String>) {
    exec.device.context.push(ContextFrame::new(kind, name));
}

fn next(exec: &mut Exec<'_>, _: &Captures) {
    if exec.device.frame().map(|f| f.kind != FrameKind::Section).unwrap_or(false) {
        exec.device.context.pop();
    }
}

fn edit_interface(exec: &mut Exec<'_>, caps: &Captures) {
    let name = unquote(caps.str("name"));
    exec.device.interface_entry(&name);
    push_object(exec, FrameKind::Interface, name);
}

fn edit_policy(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(mut id) = caps.parse::<u32>("id") else {
        exec.print(PARSE_ERROR);
        return;
    };
    if id == 0 {
        let highest = exec.device.policies.iter().map(|p| p.id).max().unwrap_or_default();
        let Some(next) = highest.checked_add(1) else {
            exec.print(PARSE_ERROR);
            return;
        };
        id = next;
    }
    let policies = &mut exec.device.policies;
    if !policies.iter().any(|p| p.id == id) {
        policies.push(Policy::new(id, "", "", "", PolicyAction::Deny));
    }
    push_object(exec, FrameKind::PolicyObject, id.to_string());
}

/// Static routes are addressed by their 1-based position. Editing a position past the end
/// creates a new default route without a gateway.
fn edit_route(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(seq) = caps.parse::<usize>("seq") else {
        exec.print(PARSE_ERROR);
        return;
    };
    let routes = &mut exec.device.routes;
    let pos = if seq == 0 || seq > routes.len() {
        routes.push(Route::new("0.0.0.0/0", "0.0.0.0"));
        routes.len()
    } else {
        seq
    };
    push_object(exec, FrameKind::StaticRoute, pos.to_string());
}

fn delete_interface(exec: &mut Exec<'_>, caps: &Captures) {
    if exec.device.interfaces.remove(&unquote(caps.str("name"))).is_none() {
        exec.print(NOT_FOUND);
    }
}

fn delete_policy(exec: &mut Exec<'_>, caps: &Captures) {
    let id = caps.parse::<u32>("id");
    let before = exec.device.policies.len();
    exec.device.policies.retain(|p| Some(p.id) != id);
    if exec.device.policies.len() == before {
        exec.print(NOT_FOUND);
    }
}

fn delete_route(exec: &mut Exec<'_>, caps: &Captures) {
    match caps.parse::<usize>("seq").filter(|s| (1..=exec.device.routes.len()).contains(s)) {
        Some(seq) => {
            exec.device.routes.remove(seq - 1);
        }
        None => exec.print(NOT_FOUND),
    }
}

fn with_interface(exec: &mut Exec<'_>, f: impl FnOnce(&mut Interface)) {
    match exec.device.frame_name(FrameKind::Interface).map(String::from) {
        Some(name) => f(exec.device.interface_entry(&name)),
        None => exec.print(PARSE_ERROR),
    }
}

fn with_policy(exec: &mut Exec<'_>, f: impl FnOnce(&mut Policy)) {
    let id = exec
        .device
        .frame_name(FrameKind::PolicyObject)
        .and_then(|n| n.parse::<u32>().ok());
    match id.and_then(|id| exec.device.policies.iter_mut().find(|p| p.id == id)) {
        Some(p) => f(p),
        None => exec.print(PARSE_ERROR),
    }
}

fn with_route(exec: &mut Exec<'_>, f: impl FnOnce(&mut Route)) {
    let pos = exec
        .device
        .frame_name(FrameKind::StaticRoute)
        .and_then(|n| n.parse::<usize>().ok());
    match pos.and_then(|p| exec.device.routes.get_mut(p.wrapping_sub(1))) {
        Some(r) => f(r),
        None => exec.print(PARSE_ERROR),
    }
}

fn set_status(exec: &mut Exec<'_>, caps: &Captures) {
    match caps.str("status") {
        "up" => with_interface(exec, |i| i.set_up(true)),
        "down" => with_interface(exec, |i| i.set_up(false)),
        _ => exec.print(PARSE_ERROR),
    }
}

fn set_action(exec: &mut Exec<'_>, caps: &Captures) {
    let action = match caps.str("action").to_lowercase().as_str() {
        "accept" => PolicyAction::Allow,
        "deny" => PolicyAction::Deny,
        _ => {
            exec.print(PARSE_ERROR);
            return;
        }
    };
    with_policy(exec, |p| p.action = action)
}

/// Protocol and port selector of a predefined service.
fn service_selector(name: &str) -> Option<(Option<Transport>, Option<u16>)> {
    match name.to_uppercase().as_str() {
        "ALL" => Some((None, None)),
        "ALL_TCP" => Some((Some(Transport::Tcp), None)),
        "ALL_UDP" => Some((Some(Transport::Udp), None)),
        "ALL_ICMP" => Some((Some(Transport::Icmp), None)),
        other => other
            .parse::<Protocol>()
            .ok()
            .map(|p| (Some(p.transport()), p.port())),
    }
}

fn service_name(p: &Policy) -> String {
    match (p.protocol, p.dst_port) {
        (None, None) => "ALL".to_string(),
        (Some(Transport::Icmp), _) => "ALL_ICMP".to_string(),
        (Some(t), port) => Protocol::ALL
            .iter()
            .find(|proto| proto.transport() == t && proto.port() == port)
            .map(|proto| proto.to_string().to_uppercase())
            .unwrap_or_else(|| p.service()),
        (None, Some(_)) => p.service(),
    }
}

fn set_service(exec: &mut Exec<'_>, caps: &Captures) {
    let first = caps
        .str("service")
        .split_whitespace()
        .next()
        .map(unquote)
        .unwrap_or_default();
    match service_selector(&first) {
        Some((protocol, port)) => with_policy(exec, |p| {
            p.protocol = protocol;
            p.dst_port = port;
        }),
        None => exec.print(NOT_FOUND),
    }
}

fn set_dst(exec: &mut Exec<'_>, caps: &Captures) {
    let net = match caps.get("cidr") {
        Some(cidr) => parse_cidr(cidr),
        None => prefix(caps.str("ip"), caps.str("mask")),
    };
    match net {
        Some(net) => with_route(exec, |r| r.destination = net.to_string()),
        None => exec.print(PARSE_ERROR),
    }
}

fn interface_config(d: &Device, only: Option<&str>) -> Vec<String> {
    let mut l = vec!["config system interface".to_string()];
    for (name, i) in d.interfaces.iter() {
        if only.map(|o| o != name.as_str()).unwrap_or(false) {
            continue;
        }
        l.push(format!("    edit \"{name}\""));
        if i.is_addressed() {
            l.push(format!("        set ip {} {}", i.ip, i.dotted_mask()));
        }
        if let Some(alias) = i.description.as_ref() {
            l.push(format!("        set alias \"{alias}\""));
        }
        if let Some(zone) = i.zone.as_ref() {
            l.push(format!("        set zone \"{zone}\""));
        }
        if !i.up {
            l.push("        set status down".to_string());
        }
        l.push("    next".to_string());
    }
    l.push("end".to_string());
    l
}

fn address_name(addr: &str) -> &str {
    if addr == "any" {
        "all"
    } else {
        addr
    }
}

fn policy_config(d: &Device, only: Option<&str>) -> Vec<String> {
    let mut l = vec!["config firewall policy".to_string()];
    for p in d.policies.iter() {
        if only.map(|o| o != p.id.to_string()).unwrap_or(false) {
            continue;
        }
        l.push(format!("    edit {}", p.id));
        l.push(format!("        set name \"{}\"", p.name));
        l.push(format!("        set srcintf \"{}\"", p.from_zone));
        l.push(format!("        set dstintf \"{}\"", p.to_zone));
        l.push(format!("        set srcaddr \"{}\"", address_name(&p.src_addr)));
        l.push(format!("        set dstaddr \"{}\"", address_name(&p.dst_addr)));
        l.push(format!(
            "        set action {}",
            match p.action {
                PolicyAction::Allow => "accept",
                PolicyAction::Deny => "deny",
            }
        ));
        l.push(format!("        set service \"{}\"", service_name(p)));
        l.push("    next".to_string());
    }
    l.push("end".to_string());
    l
}

fn route_config(d: &Device, only: Option<&str>) -> Vec<String> {
    let mut l = vec!["config router static".to_string()];
    for (pos, r) in d.routes.iter().enumerate() {
        let seq = (pos + 1).to_string();
        if only.map(|o| o != seq).unwrap_or(false) {
            continue;
        }
        let (net, mask) = dotted(&r.destination);
        l.push(format!("    edit {seq}"));
        l.push(format!("        set dst {net} {mask}"));
        l.push(format!("        set gateway {}", r.next_hop));
        if let Some(dev) = r.interface.as_ref() {
            l.push(format!("        set device \"{dev}\""));
        }
        l.push("    next".to_string());
    }
    l.push("end".to_string());
    l
}

/// `show` inside a section or an object.
fn show_scoped(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let section = d
        .context
        .iter()
        .find(|f| f.kind == FrameKind::Section)
        .map(|f| f.name.as_str());
    let object = d.frame().filter(|f| f.kind != FrameKind::Section).map(|f| f.name.as_str());
    let lines = match section {
        Some(INTERFACES) => interface_config(d, object),
        Some(POLICIES) => policy_config(d, object),
        Some(STATIC) => route_config(d, object),
        Some(OSPF) => vec![
            "config router ospf".to_string(),
            "    set router-id 0.0.0.0".to_string(),
            "end".to_string(),
        ],
        _ => vec![PARSE_ERROR.to_string()],
    };
    exec.print_all(lines);
}

fn show_interfaces(exec: &mut Exec<'_>, _: &Captures) {
    let lines = interface_config(&exec.device, None);
    exec.print_all(lines);
}

fn show_policies(exec: &mut Exec<'_>, _: &Captures) {
    let lines = policy_config(&exec.device, None);
    exec.print_all(lines);
}

fn show_routes(exec: &mut Exec<'_>, _: &Captures) {
    let lines = route_config(&exec.device, None);
    exec.print_all(lines);
}

fn get_interfaces(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec!["Name    Mode        IP/Mask             Status".to_string()];
    lines.extend(exec.device.interfaces.iter().map(|(name, i)| {
        let addr = if i.is_addressed() {
            format!("{} {}", i.ip, i.dotted_mask())
        } else {
            "0.0.0.0 0.0.0.0".to_string()
        };
        format!("{name:<7} static      {addr:<19} {}", up_down(i.up))
    }));
    exec.print_all(lines);
}

fn get_arp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec!["Address           Age(min)   Hardware Addr      Interface".to_string()];
    lines.extend(neighbors(exec).iter().map(|n| {
        format!("{:<17} {:<10} {:<18} {}", n.ip.to_string(), 0, n.mac(), n.local_interface)
    }));
    exec.print_all(lines);
}

fn get_routing_table(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let direct = connected(d.interfaces.iter());
    let mut lines = vec![
        "Codes: K - kernel, C - connected, S - static, R - RIP, B - BGP, O - OSPF".to_string(),
        String::new(),
        "Routing table for VRF=0".to_string(),
    ];
    for r in d.routes.iter() {
        let dev = r.interface.clone().or_else(|| {
            let nh = r.next_hop.parse::<Ipv4Addr>().ok()?;
            direct
                .iter()
                .find(|(net, _, _)| net.contains(&nh))
                .map(|(_, _, name)| name.to_string())
        });
        let code = if r.is_default() { "S*" } else { "S " };
        let dev = dev.map(|name| format!(", {name}")).unwrap_or_default();
        lines.push(format!("{code}      {} [10/0] via {}{dev}", r.destination, r.next_hop));
    }
    for (net, _, name) in direct.iter() {
        lines.push(format!("C       {net} is directly connected, {name}"));
    }
    exec.print_all(lines);
}

fn execute_ping(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.str("target");
    exec.print_all([
        format!("PING {target} (56 data bytes)"),
        format!("64 bytes from {target}: icmp_seq=0 ttl=255 time=0.9 ms"),
    ]);
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        // sections
        Rule::run(ANY, "config system interface", |x, _| enter_section(x, INTERFACES)).within(Scope::Top),
        Rule::run(ANY, "config firewall policy", |x, _| enter_section(x, POLICIES)).within(Scope::Top),
        Rule::run(ANY, "config router static", |x, _| enter_section(x, STATIC)).within(Scope::Top),
        Rule::run(ANY, "config router ospf", |x, _| enter_section(x, OSPF)).within(Scope::Top),
        Rule::print(ANY, "config <args...>", PARSE_ERROR).within(Scope::Top),
        Rule::run(ANY, "next", next),
        Rule::run(ANY, "end", |x, _| x.device.context.clear()),
        Rule::run(ANY, "abort", |x, _| x.device.context.clear()),

        Rule::run(ANY, "edit <name>", edit_interface).within(Scope::Section(INTERFACES)),
        Rule::run(ANY, "delete <name>", delete_interface).within(Scope::Section(INTERFACES)),
        Rule::run(ANY, "edit <id>", edit_policy).within(Scope::Section(POLICIES)),
        Rule::run(ANY, "delete <id>", delete_policy).within(Scope::Section(POLICIES)),
        Rule::run(ANY, "edit <seq>", edit_route).within(Scope::Section(STATIC)),
        Rule::run(ANY, "delete <seq>", delete_route).within(Scope::Section(STATIC)),
        Rule::run(ANY, "set <args...>", |_, _| {}).within(Scope::Section(OSPF)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Section(INTERFACES)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Section(POLICIES)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Section(STATIC)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Section(OSPF)),

        // interface objects
        Rule::run(ANY, "set ip <ip> <mask>", |x, c| {
            let (ip, mask) = (c.str("ip").to_string(), c.str("mask").to_string());
            with_interface(x, |i| i.set_address(ip, mask))
        })
        .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "set ip <cidr>", |x, c| {
            let cidr = c.str("cidr").to_string();
            with_interface(x, |i| i.set_cidr(&cidr))
        })
        .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "set status <status>", set_status).within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "set alias <text...>", |x, c| {
            let alias = unquote(c.str("text"));
            with_interface(x, |i| i.set_description(Some(alias)))
        })
        .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "set zone <zone>", |x, c| {
            let zone = unquote(c.str("zone"));
            with_interface(x, |i| i.set_zone(Some(zone)))
        })
        .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "unset alias", |x, _| with_interface(x, |i| i.set_description(None)))
            .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "unset zone", |x, _| with_interface(x, |i| i.set_zone(None)))
            .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "unset ip", |x, _| with_interface(x, |i| i.clear_address()))
            .within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "set <field> [args...]", |_, _| {}).within(Scope::Object(INTERFACES)),

        // policy objects
        Rule::run(ANY, "set name <text...>", |x, c| {
            let name = unquote(c.str("text"));
            with_policy(x, |p| p.name = name)
        })
        .within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set srcintf <zone>", |x, c| {
            let zone = unquote(c.str("zone"));
            with_policy(x, |p| p.from_zone = zone)
        })
        .within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set dstintf <zone>", |x, c| {
            let zone = unquote(c.str("zone"));
            with_policy(x, |p| p.to_zone = zone)
        })
        .within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set srcaddr <addr>", |x, c| {
            let addr = unquote(c.str("addr"));
            with_policy(x, |p| p.src_addr = if addr == "all" { "any".to_string() } else { addr })
        })
        .within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set dstaddr <addr>", |x, c| {
            let addr = unquote(c.str("addr"));
            with_policy(x, |p| p.dst_addr = if addr == "all" { "any".to_string() } else { addr })
        })
        .within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set action <action>", set_action).within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set service <service...>", set_service).within(Scope::Object(POLICIES)),
        Rule::run(ANY, "set <field> [args...]", |_, _| {}).within(Scope::Object(POLICIES)),

        // static route objects
        Rule::run(ANY, "set dst <ip> <mask>", set_dst).within(Scope::Object(STATIC)),
        Rule::run(ANY, "set dst <cidr>", set_dst).within(Scope::Object(STATIC)),
        Rule::run(ANY, "set gateway <gateway>", |x, c| {
            let gw = c.str("gateway").to_string();
            with_route(x, |r| r.next_hop = gw)
        })
        .within(Scope::Object(STATIC)),
        Rule::run(ANY, "set device <name>", |x, c| {
            let dev = unquote(c.str("name"));
            with_route(x, |r| r.interface = Some(dev))
        })
        .within(Scope::Object(STATIC)),

        Rule::run(ANY, "show", show_scoped).within(Scope::Object(INTERFACES)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Object(POLICIES)),
        Rule::run(ANY, "show", show_scoped).within(Scope::Object(STATIC)),

        // execute
        Rule::run(ANY, "execute ping <target>", execute_ping),
        Rule::print(ANY, "execute ping-options [args...]", "Ping options: repeat count=5, data size=56"),
        Rule::print(ANY, "execute ssh [args...]", "SSH connection failed."),
        Rule::print(ANY, "execute telnet [args...]", "Telnet connection failed."),
        Rule::print(ANY, "execute reboot", "Rebooting system..."),
        Rule::print(ANY, "execute factoryreset", "This operation will reset the system to factory default! Do you want to continue? (y/n)"),
        Rule::print(ANY, "execute backup [args...]", "Starting backup..."),
        Rule::print(ANY, "execute [args...]", PARSE_ERROR),

        // diagnose
        Rule::print(ANY, "diagnose sys session list", "session info: proto=6 proto_state=01 duration=120 state=may_dirty"),
        Rule::print(ANY, "diagnose sys top [args...]", "Run Time:  1 days,  4 hours and 15 minutes\n0U, 0N, 0S, 100I; 2038T, 514F"),
        Rule::print(ANY, "diagnose hardware deviceinfo nic [args...]", "Driver Name: virtio_net\nMAC Address: 00:09:0f:09:00:01\nLink: up\nSpeed: 10000"),
        Rule::print(ANY, "diagnose debug enable", "Debug output enabled."),
        Rule::print(ANY, "diagnose debug flow trace [args...]", "Trace start."),
        Rule::print(ANY, "diagnose [args...]", DIAG_ERROR),

        // get
        Rule::print(ANY, "get system status", "Version: FortiGate-VM64 v7.2.0\nFirmware Signature: signed\nAdmin domain config: disable"),
        Rule::print(ANY, "get system performance status", "CPU states: 0% user 0% system 100% idle\nMemory: 2097152k total, 514216k used"),
        Rule::run(ANY, "get system interface [physical]", get_interfaces),
        Rule::run(ANY, "get system arp", get_arp),
        Rule::run(ANY, "get router info routing-table [args...]", get_routing_table),
        Rule::print(ANY, "get router info ospf neighbor", "Neighbor ID     Pri   State           Dead Time   Address         Interface\n1.1.1.1         1     Full/DR         00:00:39    10.0.0.1        port1"),
        Rule::print(ANY, "get router info bgp summary", "BGP router identifier 2.2.2.2, local AS number 65001\nNeighbor        V    AS MsgRcvd MsgSent   TblVer  InQ OutQ Up/Down  State/PfxRcd\n10.0.0.1        4 65000      50      50        1    0    0 02:22:22        1"),
        Rule::print(ANY, "get router info kernel", "tab=254 vf=0 scope=0 type=1 proto=11 prio=0 0.0.0.0/0.0.0.0/0->0.0.0.0/0 pref=0.0.0.0 gwy=0.0.0.0 dev=3(port1)"),
        Rule::print(ANY, "get hardware status", "Model name: FortiGate-VM64\nASIC version: 0000\nCPU: Intel(R) Xeon(R) CPU"),
        Rule::print(ANY, "get hardware cpu", "processor       : 0\nvendor_id       : GenuineIntel\ncpu family      : 6"),
        Rule::print(ANY, "get hardware memory", "MemTotal:        2052444 kB\nMemFree:         1398864 kB"),
        Rule::print(ANY, "get [args...]", GET_ERROR),

        // show
        Rule::run(ANY, "show", show_interfaces).within(Scope::Top),
        Rule::run(ANY, "show system interface", show_interfaces),
        Rule::run(ANY, "show firewall policy", show_policies),
        Rule::run(ANY, "show router static", show_routes),
        Rule::print(ANY, "show system dns", "config system dns\n    set primary 8.8.8.8\n    set secondary 8.8.4.4\nend"),
        Rule::print(ANY, "show vpn ipsec [args...]", "IPsec VPN tunnels:\nNo tunnels configured."),
        Rule::print(ANY, "show full-configuration [args...]", "config system global\n    set admin-sport 443\nend\n..."),
        Rule::print(ANY, "show <args...>", PARSE_ERROR),
    ];
}
