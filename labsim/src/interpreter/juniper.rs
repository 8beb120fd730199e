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

//! Junos-style interpreter with a candidate configuration.
//!
//! Changes done in edit mode are written into the candidate configuration of the device and only
//! become visible after `commit`. Leaving edit mode with pending changes discards them.

use std::{collections::BTreeMap, net::Ipv4Addr};

use lazy_static::lazy_static;
use log::*;

use super::{
    render::{command_history, connected, neighbors, parse_cidr, up_down},
    run_nested, CommandInterpreter,
};
use crate::{
    command::{Captures, Exec, Rule, Scope},
    device::{Device, Interface, PolicyAction, Route},
    types::{
        CliMode::{self, Edit, User},
        ContextFrame, FrameKind, VendorFamily,
    },
};

const UNKNOWN: &str = "unknown command.";
const SYNTAX: &str = "syntax error.";
const INCOMPLETE: &str = "error: syntax error, expecting <data>";
const NOT_FOUND: &str = "warning: statement not found";

const USER: &[CliMode] = &[User];
const EDIT: &[CliMode] = &[Edit];
const ANY: &[CliMode] = &[];

/// Interpreter of the Junos command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct JuniperInterpreter;

impl CommandInterpreter for JuniperInterpreter {
    fn family(&self) -> VendorFamily {
        VendorFamily::Juniper
    }

    fn modes(&self) -> &'static [CliMode] {
        &[User, Edit]
    }

    fn rules(&self) -> &'static [Rule] {
        RULES.as_slice()
    }

    fn unknown(&self, _: &Device) -> &'static str {
        UNKNOWN
    }

    fn incomplete(&self) -> &'static str {
        INCOMPLETE
    }
}

/// Name of the logical unit of an interface (`ge-0/0/0.0`).
fn unit_name(name: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{name}.0")
    }
}

/// Resolve the interface addressed by `name` and `unit` in the candidate. Logical interfaces
/// that exist by their full name (`irb.10`) take precedence.
fn resolve(device: &Device, name: &str, unit: Option<&str>) -> String {
    if let Some(unit) = unit {
        let logical = format!("{name}.{unit}");
        if device.staged_interface(&logical).is_some() {
            return logical;
        }
    }
    if device.staged_interface(name).is_none() {
        if let Some((base, _)) = name.split_once('.') {
            if device.staged_interface(base).is_some() {
                return base.to_string();
            }
        }
    }
    name.to_string()
}

fn stage(exec: &mut Exec<'_>, name: &str, unit: Option<&str>, f: impl FnOnce(&mut Interface)) {
    let name = resolve(&exec.device, name, unit);
    f(exec.device.stage_interface(&name))
}

/// Stage a change on the interface of the current `edit interfaces` frame.
fn stage_framed(exec: &mut Exec<'_>, unit: Option<&str>, f: impl FnOnce(&mut Interface)) {
    match exec.device.frame_name(FrameKind::Interface).map(String::from) {
        Some(name) => stage(exec, &name, unit, f),
        None => exec.print(SYNTAX),
    }
}

fn normalize(cidr: &str) -> String {
    parse_cidr(cidr)
        .map(|n| n.to_string())
        .unwrap_or_else(|| cidr.to_string())
}

fn stage_route(exec: &mut Exec<'_>, destination: &str, next_hop: &str) {
    let route = Route::new(normalize(destination), next_hop);
    let routes = exec.device.stage_routes();
    if !routes.contains(&route) {
        routes.push(route);
    }
}

fn unstage_route(exec: &mut Exec<'_>, caps: &Captures) {
    let destination = normalize(caps.str("cidr"));
    if !exec.device.staged_routes().iter().any(|r| r.destination == destination) {
        exec.print(NOT_FOUND);
        return;
    }
    exec.device.stage_routes().retain(|r| r.destination != destination);
}

fn push_frame(exec: &mut Exec<'_>, kind: FrameKind, name: impl Into<String>) {
    exec.device.context.push(ContextFrame::new(kind, name));
}

fn edit_interface(exec: &mut Exec<'_>, caps: &Captures) {
    let name = resolve(&exec.device, caps.str("name"), None);
    exec.device.stage_interface(&name);
    push_frame(exec, FrameKind::Interface, name);
}

fn leave(exec: &mut Exec<'_>) {
    if exec.device.has_pending_changes() {
        exec.print("The configuration has been changed but not committed");
        exec.device.discard();
    }
    exec.device.context.clear();
    exec.print("Exiting configuration mode");
    exec.enter(User);
}

fn exit(exec: &mut Exec<'_>, _: &Captures) {
    if exec.device.context.pop().is_none() {
        leave(exec)
    }
}

fn commit(exec: &mut Exec<'_>, _: &Captures) {
    let changed = exec.device.commit();
    debug!("{}: commit (changed: {})", exec.device.id(), changed);
    exec.print("commit complete");
}

fn delete_interface(exec: &mut Exec<'_>, caps: &Captures) {
    let name = resolve(&exec.device, caps.str("name"), None);
    if exec.device.staged_interface(&name).is_none() {
        exec.print(NOT_FOUND);
    } else {
        exec.device.stage_removal(&name);
    }
}

/// Assign an interface to a zone. Without a zone, the interface is removed from its zone.
fn stage_zone(exec: &mut Exec<'_>, interface: &str, zone: Option<String>) {
    let name = resolve(&exec.device, interface, None);
    if zone.is_none() && exec.device.staged_interface(&name).is_none() {
        exec.print(NOT_FOUND);
        return;
    }
    stage(exec, &name, None, |i| i.set_zone(zone))
}

fn framed_zone(exec: &mut Exec<'_>, caps: &Captures, assign: bool) {
    match exec.device.frame_name(FrameKind::Zone).map(String::from) {
        Some(zone) => stage_zone(exec, caps.str("name"), assign.then_some(zone)),
        None => exec.print(SYNTAX),
    }
}

/// Zones with their bound logical interfaces.
fn zones(interfaces: &BTreeMap<String, Interface>) -> BTreeMap<&str, Vec<String>> {
    let mut zones: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (name, i) in interfaces.iter() {
        if let Some(zone) = i.zone.as_deref() {
            zones.entry(zone).or_default().push(unit_name(name));
        }
    }
    zones
}

/// Render the configuration hierarchy. With a section, only that top-level statement is shown.
fn config_lines(
    host: &str,
    interfaces: &BTreeMap<String, Interface>,
    routes: &[Route],
    section: Option<&str>,
) -> Vec<String> {
    let mut blocks: Vec<(&str, Vec<String>)> = vec![("system", vec![format!("    host-name {host};")])];

    let mut ifs = Vec::new();
    for (name, i) in interfaces.iter() {
        let (base, unit) = name.split_once('.').unwrap_or((name.as_str(), "0"));
        ifs.push(format!("    {base} {{"));
        if let Some(desc) = i.description.as_ref() {
            ifs.push(format!("        description \"{desc}\";"));
        }
        if !i.up {
            ifs.push("        disable;".to_string());
        }
        ifs.push(format!("        unit {unit} {{"));
        ifs.push("            family inet {".to_string());
        if i.is_addressed() {
            ifs.push(format!("                address {};", i.cidr()));
        }
        ifs.push("            }".to_string());
        ifs.push("        }".to_string());
        ifs.push("    }".to_string());
    }
    blocks.push(("interfaces", ifs));

    if !routes.is_empty() {
        let mut lines = vec!["    static {".to_string()];
        lines.extend(
            routes
                .iter()
                .map(|r| format!("        route {} next-hop {};", r.destination, r.next_hop)),
        );
        lines.push("    }".to_string());
        blocks.push(("routing-options", lines));
    }

    let zones = zones(interfaces);
    if !zones.is_empty() {
        let mut lines = vec!["    zones {".to_string()];
        for (zone, members) in zones {
            lines.push(format!("        security-zone {zone} {{"));
            lines.push("            interfaces {".to_string());
            lines.extend(members.iter().map(|m| format!("                {m};")));
            lines.push("            }".to_string());
            lines.push("        }".to_string());
        }
        lines.push("    }".to_string());
        blocks.push(("security", lines));
    }

    let mut out = Vec::new();
    if section.is_none() {
        out.push("## Last changed: 2024-05-01 12:00:00 UTC".to_string());
        out.push("version 21.4R1;".to_string());
    }
    for (name, body) in blocks {
        if section.map(|s| s == name).unwrap_or(true) {
            out.push(format!("{name} {{"));
            out.extend(body);
            out.push("}".to_string());
        }
    }
    out
}

fn show_configuration(exec: &mut Exec<'_>, caps: &Captures) {
    let d = &exec.device;
    let lines = config_lines(&d.name, &d.interfaces, &d.routes, caps.get("section"));
    exec.print_all(lines);
}

fn show_candidate(exec: &mut Exec<'_>, caps: &Captures) {
    let d = &exec.device;
    let lines = config_lines(
        d.staged_hostname(),
        &d.staged_interfaces(),
        d.staged_routes(),
        caps.get("section"),
    );
    exec.print_all(lines);
}

fn show_compare(exec: &mut Exec<'_>, _: &Captures) {
    let lines = exec.device.pending_diff();
    exec.print_all(lines);
}

fn show_version(exec: &mut Exec<'_>, _: &Captures) {
    let lines = [
        format!("Hostname: {}", exec.device.name),
        "Model: vmx".to_string(),
        "Junos: 21.4R1.12".to_string(),
        "JUNOS OS Kernel 64-bit  [20211111.2c1a3a0_builder_stable_11]".to_string(),
    ];
    exec.print_all(lines);
}

fn show_terse(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec!["Interface               Admin Link Proto    Local                 Remote".to_string()];
    lines.extend(exec.device.interfaces.iter().map(|(name, i)| {
        let state = up_down(i.up);
        format!("{:<23} {state:<5} {state:<4} inet     {}", unit_name(name), i.cidr())
    }));
    exec.print_all(lines);
}

fn show_interface(exec: &mut Exec<'_>, caps: &Captures) {
    let d = &exec.device;
    let lines = match caps.get("name") {
        Some(name) => match d.interfaces.get(name) {
            Some(i) => vec![physical(name, i)],
            None => vec![format!("error: device {name} not found")],
        },
        None => d.interfaces.iter().map(|(n, i)| physical(n, i)).collect(),
    };
    exec.print_all(lines);
}

fn physical(name: &str, i: &Interface) -> String {
    format!(
        "Physical interface: {name}, {}, Physical link is {}",
        if i.up { "Enabled" } else { "Administratively down" },
        if i.up { "Up" } else { "Down" }
    )
}

fn show_route(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let direct = connected(d.interfaces.iter());
    let count = d.routes.len() + 2 * direct.len();
    let mut lines = vec![
        format!("inet.0: {count} destinations, {count} routes ({count} active, 0 holddown, 0 hidden)"),
        "+ = Active Route, - = Last Active, * = Both".to_string(),
        String::new(),
    ];
    for r in d.routes.iter() {
        let via = r
            .next_hop
            .parse::<Ipv4Addr>()
            .ok()
            .and_then(|nh| direct.iter().find(|(net, _, _)| net.contains(&nh)))
            .map(|(_, _, name)| format!(" via {}", unit_name(name)))
            .unwrap_or_default();
        lines.push(format!("{:<19}*[Static/5] 4w2d 03:00:00", r.destination));
        lines.push(format!("                    >  to {}{via}", r.next_hop));
    }
    for (net, host, name) in direct.iter() {
        lines.push(format!("{:<19}*[Direct/0] 4w2d 03:00:00", net.to_string()));
        lines.push(format!("                    >  via {}", unit_name(name)));
        lines.push(format!("{:<19}*[Local/0] 4w2d 03:00:00", host.to_string()));
        lines.push(format!("                       Local via {}", unit_name(name)));
    }
    exec.print_all(lines);
}

fn show_arp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines =
        vec!["MAC Address       Address         Name                      Interface           Flags".to_string()];
    lines.extend(neighbors(exec).iter().map(|n| {
        format!(
            "{:<17} {:<15} {:<25} {:<19} none",
            n.mac(),
            n.ip.to_string(),
            n.hostname,
            unit_name(&n.local_interface)
        )
    }));
    exec.print_all(lines);
}

fn show_lldp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec![
        "Local Interface    Parent Interface    Chassis Id          Port info          System Name"
            .to_string(),
    ];
    lines.extend(neighbors(exec).iter().map(|n| {
        format!(
            "{:<18} {:<19} {:<19} {:<18} {}",
            n.local_interface,
            "-",
            n.mac(),
            n.remote_interface,
            n.hostname
        )
    }));
    exec.print_all(lines);
}

fn show_zones(exec: &mut Exec<'_>, _: &Captures) {
    let zones = zones(&exec.device.interfaces);
    let lines = if zones.is_empty() {
        vec!["No security zones configured.".to_string()]
    } else {
        zones
            .into_iter()
            .flat_map(|(zone, members)| {
                let mut l = vec![
                    format!("Security zone: {zone}"),
                    "  Send reset for non-SYN session TCP packets: Off".to_string(),
                    "  Policy configurable: Yes".to_string(),
                    format!("  Interfaces bound: {}", members.len()),
                    "  Interfaces:".to_string(),
                ];
                l.extend(members.into_iter().map(|m| format!("    {m}")));
                l
            })
            .collect()
    };
    exec.print_all(lines);
}

fn show_policies(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec!["Default policy: deny-all".to_string()];
    for (seq, p) in exec.device.policies.iter().enumerate() {
        lines.push(format!("From zone: {}, To zone: {}", p.from_zone, p.to_zone));
        lines.push(format!(
            "  Policy: {}, State: enabled, Index: {}, Sequence number: {}",
            p.name,
            p.id,
            seq + 1
        ));
        lines.push(format!("    Source addresses: {}", p.src_addr));
        lines.push(format!("    Destination addresses: {}", p.dst_addr));
        lines.push(format!("    Applications: {}", p.service()));
        lines.push(format!(
            "    Action: {}",
            match p.action {
                PolicyAction::Allow => "permit",
                PolicyAction::Deny => "deny",
            }
        ));
    }
    exec.print_all(lines);
}

fn show_cli_history(exec: &mut Exec<'_>, _: &Captures) {
    let lines = command_history(&exec.device);
    exec.print_all(lines);
}

fn ping(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.get("target").unwrap_or("8.8.8.8");
    exec.print_all([
        format!("PING {target} ({target}): 56 data bytes"),
        format!("64 bytes from {target}: icmp_seq=0 ttl=118 time=12.345 ms"),
    ]);
}

fn traceroute(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.get("target").unwrap_or("8.8.8.8");
    let first = exec
        .device
        .default_route()
        .map(|r| r.next_hop.clone())
        .unwrap_or_else(|| target.to_string());
    exec.print_all([
        format!("traceroute to {target} ({target}), 30 hops max, 40 byte packets"),
        format!(" 1  {first}  2.123 ms"),
    ]);
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        // operational mode
        Rule::run(USER, "exit", |_, _| {}),
        Rule::run(USER, "quit", |_, _| {}),
        Rule::run(USER, "configure [<option>]", |x, _| {
            x.print("Entering configuration mode");
            x.enter(Edit);
        }),
        Rule::run(USER, "edit", |x, _| {
            x.print("Entering configuration mode");
            x.enter(Edit);
        }),
        Rule::print(USER, "request system reboot", "Rebooting..."),
        Rule::print(USER, "request system halt", "Halting..."),
        Rule::print(USER, "monitor traffic [args...]", "Monitoring traffic... (Press Ctrl+C to stop)"),
        Rule::run(USER, "ping [target...]", ping),
        Rule::run(USER, "traceroute [target...]", traceroute),
        Rule::print(USER, "clear log [args...]", "Logs cleared."),
        Rule::print(USER, "clear <args...>", "Statistics cleared."),
        Rule::run(USER, "show configuration [<section>]", show_configuration),
        Rule::run(USER, "show version", show_version),
        Rule::run(USER, "show interfaces terse", show_terse),
        Rule::print(USER, "show interfaces extensive", "Physical interface: ge-0/0/0, Enabled, Physical link is Up\n  Link-level type: Ethernet, MTU: 1514, Speed: 1000mbps, BPDU Error: None, MAC-REWRITE Error: None, Loopback: Disabled\n  Source filtering: Disabled, Flow control: Enabled"),
        Rule::run(USER, "show interfaces [<name>]", show_interface),
        Rule::print(USER, "show route summary", "Router ID: 192.168.1.1\nIPv4 Route Table: 12 destinations, 12 routes (12 active, 0 holddown, 0 hidden)"),
        Rule::print(USER, "show route protocol ospf", "ospf.0: 3 destinations, 3 routes (3 active, 0 holddown, 0 hidden)"),
        Rule::print(USER, "show route protocol bgp", "bgp.l3vpn.0: 0 destinations, 0 routes (0 active, 0 holddown, 0 hidden)"),
        Rule::run(USER, "show route", show_route),
        Rule::run(USER, "show arp [no-resolve]", show_arp),
        Rule::run(USER, "show lldp neighbors", show_lldp),
        Rule::print(USER, "show system uptime", "Current time: 2024-05-15 14:30:00 UTC\nSystem booted: 5 days ago"),
        Rule::print(USER, "show system storage", "Filesystem              Size       Used      Avail  Capacity   Mounted on\n/dev/gpt/junos          2.0G       1.2G       700M       63%   /"),
        Rule::print(USER, "show system processes", "PID USERNAME  THR PRI NICE   SIZE    RES STATE   C   TIME    WCPU COMMAND\n1234 root        1  20    0   800M   500M select  0   5:00   0.00% rpd"),
        Rule::print(USER, "show chassis hardware", "Hardware inventory:\nItem             Version  Part number  Serial number     Description\nChassis                                VM6293482         vMX"),
        Rule::print(USER, "show chassis routing-engine", "Routing Engine status:\n  Temperature                 30 degrees C / 86 degrees F"),
        Rule::print(USER, "show chassis environment", "Class Item                           Status     Measurement\nTemp  Routing Engine                 OK         30 degrees C / 86 degrees F"),
        Rule::print(USER, "show chassis alarms", "No alarms currently active"),
        Rule::print(USER, "show ospf neighbor", "Address          Interface              State     ID               Pri  Dead\n10.0.0.2         ge-0/0/0.0             Full      2.2.2.2          128  35"),
        Rule::print(USER, "show ospf interface", "Interface           State   Area            DR ID           BDR ID          Nbrs\nge-0/0/0.0          DR      0.0.0.0         192.168.1.1     0.0.0.0         1"),
        Rule::print(USER, "show bgp summary", "Groups: 1 Peers: 1 Down peers: 0\nPeer                     AS      InPkt     OutPkt    OutQ   Flaps Last Up/Dwn State\n10.0.0.2              65001       100        100       0       0       1d 2h Establ"),
        Rule::print(USER, "show bgp neighbor [args...]", "Peer: 10.0.0.2+179 AS 65001 Local: 10.0.0.1+54321 AS 65000\n  Type: External    State: Established    Flags: <Sync>"),
        Rule::run(USER, "show security policies", show_policies),
        Rule::run(USER, "show security zones", show_zones),
        Rule::print(USER, "show security flow session", "Session ID: 100, Policy name: allow-web, Timeout: 1800, Valid\n  In: 192.168.10.10/4321 --> 8.8.8.8/80;tcp, Conn Tag: 0x0, If: ge-0/0/0.0"),
        Rule::print(USER, "show security nat source rule [args...]", "Total Source rules: 1\nRule name: source-nat-rule, Rule-set: source-nat-set\n  Rule-Id: 1, Rule type: source, Action: source-nat"),
        Rule::print(USER, "show log messages", "May 22 10:00:00 root: COMMIT_SUCCESS"),
        Rule::run(USER, "show cli history", show_cli_history),

        // configuration mode: navigation and commit
        Rule::run(EDIT, "exit configuration-mode", |x, _| leave(x)),
        Rule::run(EDIT, "exit", exit),
        Rule::run(EDIT, "quit", exit),
        Rule::run(EDIT, "up", |x, _| {
            x.device.context.pop();
        }),
        Rule::run(EDIT, "top", |x, _| x.device.context.clear()),
        Rule::print(EDIT, "commit check", "configuration check succeeds"),
        Rule::run(EDIT, "commit and-quit", |x, c| {
            commit(x, c);
            leave(x);
        }),
        Rule::run(EDIT, "commit", commit),
        Rule::run(EDIT, "rollback [<num>]", |x, _| {
            x.device.discard();
            x.print("load complete");
        }),
        Rule::run(EDIT, "show | compare", show_compare),
        Rule::run(EDIT, "show [<section>]", show_candidate),
        Rule::run(EDIT, "run <command...>", |x, c| {
            run_nested(x, RULES.as_slice(), User, c.str("command"), INCOMPLETE, UNKNOWN)
        }),

        // configuration mode: hierarchy
        Rule::run(EDIT, "edit interfaces <name>", edit_interface).within(Scope::Top),
        Rule::run(EDIT, "edit security zones security-zone <zone>", |x, c| {
            push_frame(x, FrameKind::Zone, c.str("zone"))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "edit routing-options static route <cidr>", |x, c| {
            push_frame(x, FrameKind::StaticRoute, normalize(c.str("cidr")))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "edit protocols <name>", |x, c| {
            push_frame(x, FrameKind::RouteProtocol, c.str("name"))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "edit vlans <name>", |x, c| push_frame(x, FrameKind::Vlan, c.str("name")))
            .within(Scope::Top),
        Rule::run(EDIT, "edit <path...>", |x, c| push_frame(x, FrameKind::Section, c.str("path"))),

        // configuration mode: absolute statements
        Rule::run(EDIT, "set interfaces <name> unit <unit> family inet address <cidr>", |x, c| {
            let cidr = c.str("cidr").to_string();
            stage(x, c.str("name"), c.get("unit"), |i| i.set_cidr(&cidr))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "set interfaces <name> description <text...>", |x, c| {
            let text = c.str("text").trim_matches('"').to_string();
            stage(x, c.str("name"), None, |i| i.set_description(Some(text)))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "set interfaces <name> disable", |x, c| {
            stage(x, c.str("name"), None, |i| i.set_up(false))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete interfaces <name> disable", |x, c| {
            stage(x, c.str("name"), None, |i| i.set_up(true))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete interfaces <name> description", |x, c| {
            stage(x, c.str("name"), None, |i| i.set_description(None))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete interfaces <name> unit <unit> family inet address [<cidr>]", |x, c| {
            stage(x, c.str("name"), c.get("unit"), |i| i.clear_address())
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete interfaces <name>", delete_interface).within(Scope::Top),
        Rule::run(EDIT, "set security zones security-zone <zone> interfaces <name>", |x, c| {
            stage_zone(x, c.str("name"), Some(c.str("zone").to_string()))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete security zones security-zone <zone> interfaces <name>", |x, c| {
            stage_zone(x, c.str("name"), None)
        })
        .within(Scope::Top),
        Rule::run(EDIT, "set routing-options static route <cidr> next-hop <next-hop>", |x, c| {
            stage_route(x, c.str("cidr"), c.str("next-hop"))
        })
        .within(Scope::Top),
        Rule::run(EDIT, "delete routing-options static route <cidr> [args...]", unstage_route)
            .within(Scope::Top),
        Rule::run(EDIT, "set system host-name <name>", |x, c| x.device.stage_hostname(c.str("name")))
            .within(Scope::Top),
        Rule::run(EDIT, "set protocols <args...>", |_, _| {}).within(Scope::Top),
        Rule::run(EDIT, "set vlans <args...>", |_, _| {}).within(Scope::Top),
        Rule::run(EDIT, "set security policies <args...>", |_, _| {}).within(Scope::Top),

        // configuration mode: statements relative to the current frame
        Rule::run(EDIT, "set unit <unit> family inet address <cidr>", |x, c| {
            let cidr = c.str("cidr").to_string();
            stage_framed(x, c.get("unit"), |i| i.set_cidr(&cidr))
        })
        .within(Scope::Frame(FrameKind::Interface)),
        Rule::run(EDIT, "delete unit <unit> family inet address [<cidr>]", |x, c| {
            stage_framed(x, c.get("unit"), |i| i.clear_address())
        })
        .within(Scope::Frame(FrameKind::Interface)),
        Rule::run(EDIT, "set description <text...>", |x, c| {
            let text = c.str("text").trim_matches('"').to_string();
            stage_framed(x, None, |i| i.set_description(Some(text)))
        })
        .within(Scope::Frame(FrameKind::Interface)),
        Rule::run(EDIT, "set disable", |x, _| stage_framed(x, None, |i| i.set_up(false)))
            .within(Scope::Frame(FrameKind::Interface)),
        Rule::run(EDIT, "delete disable", |x, _| stage_framed(x, None, |i| i.set_up(true)))
            .within(Scope::Frame(FrameKind::Interface)),
        Rule::run(EDIT, "set interfaces <name>", |x, c| framed_zone(x, c, true))
            .within(Scope::Frame(FrameKind::Zone)),
        Rule::run(EDIT, "delete interfaces <name>", |x, c| framed_zone(x, c, false))
            .within(Scope::Frame(FrameKind::Zone)),
        Rule::run(EDIT, "set next-hop <next-hop>", |x, c| {
            match x.device.frame_name(FrameKind::StaticRoute).map(String::from) {
                Some(dest) => stage_route(x, &dest, c.str("next-hop")),
                None => x.print(SYNTAX),
            }
        })
        .within(Scope::Frame(FrameKind::StaticRoute)),
        Rule::run(EDIT, "set <path...>", |_, _| {}).within(Scope::Frame(FrameKind::RouteProtocol)),
        Rule::run(EDIT, "set <path...>", |_, _| {}).within(Scope::Frame(FrameKind::Vlan)),
        Rule::run(EDIT, "set <path...>", |_, _| {}).within(Scope::Frame(FrameKind::Section)),
        Rule::run(EDIT, "set <path...>", |x, _| x.print(SYNTAX)),
        Rule::run(EDIT, "delete <path...>", |x, _| x.print(NOT_FOUND)),

        Rule::print(ANY, "show <args...>", UNKNOWN),
    ];
}
