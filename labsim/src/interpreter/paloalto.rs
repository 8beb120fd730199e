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

//! PAN-OS-style interpreter.

use lazy_static::lazy_static;

use super::{
    render::{connected, neighbors, up_down},
    run_nested, CommandInterpreter,
};
use crate::{
    command::{Captures, Exec, Rule},
    device::{Device, Policy, PolicyAction, Route},
    simulation::Protocol,
    types::{
        CliMode::{self, Config, User},
        Transport, VendorFamily,
    },
};

const INVALID: &str = "Invalid syntax.";
const INCOMPLETE: &str = "Incomplete command.";
const OK: &str = "[OK]";

const USER: &[CliMode] = &[User];
const CONF: &[CliMode] = &[Config];

/// Interpreter of the PAN-OS command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaloAltoInterpreter;

impl CommandInterpreter for PaloAltoInterpreter {
    fn family(&self) -> VendorFamily {
        VendorFamily::PaloAlto
    }

    fn modes(&self) -> &'static [CliMode] {
        &[User, Config]
    }

    fn rules(&self) -> &'static [Rule] {
        RULES.as_slice()
    }

    fn unknown(&self, _: &Device) -> &'static str {
        INVALID
    }

    fn incomplete(&self) -> &'static str {
        INCOMPLETE
    }
}

fn zone_matches(rule: &str, wanted: Option<&str>) -> bool {
    rule.eq_ignore_ascii_case("any") || wanted.map(|w| w.eq_ignore_ascii_case(rule)).unwrap_or(true)
}

/// Evaluate a flow description (`from TRUST to UNTRUST protocol 6 destination-port 443`)
/// against the security rules, first match wins.
fn test_policy_match(exec: &mut Exec<'_>, caps: &Captures) {
    let args: Vec<&str> = caps.str("args").split_whitespace().collect();
    let value = |key: &str| {
        args.iter()
            .position(|a| a.eq_ignore_ascii_case(key))
            .and_then(|i| args.get(i + 1))
            .copied()
    };
    let from = value("from");
    let to = value("to");
    let transport = value("protocol").and_then(|p| match p {
        "6" => Some(Transport::Tcp),
        "17" => Some(Transport::Udp),
        "1" => Some(Transport::Icmp),
        other => other.parse::<Transport>().ok(),
    });
    let port = value("destination-port").and_then(|p| p.parse::<u16>().ok());
    let selector_ok = |p: &Policy| match transport {
        Some(t) => p.matches(t, port),
        None => port.zip(p.dst_port).map(|(a, b)| a == b).unwrap_or(true),
    };
    let msg = match exec
        .device
        .policies
        .iter()
        .find(|p| zone_matches(&p.from_zone, from) && zone_matches(&p.to_zone, to) && selector_ok(p))
    {
        Some(p) => format!(
            "Access {} by policy \"{}\" from {} to {}",
            match p.action {
                PolicyAction::Allow => "allowed",
                PolicyAction::Deny => "denied",
            },
            p.name,
            p.from_zone,
            p.to_zone
        ),
        None => "No matching security rule found (implicit deny)".to_string(),
    };
    exec.print(msg);
}

fn ping(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.get("target").unwrap_or("8.8.8.8");
    exec.print_all([
        format!("PING {target} ({target}) 56(84) bytes of data."),
        format!("64 bytes from {target}: icmp_seq=1 ttl=118 time=4.20 ms"),
    ]);
}

fn show_system_info(exec: &mut Exec<'_>, _: &Captures) {
    let lines = [
        format!("hostname: {}", exec.device.name),
        "ip-address: 192.168.1.99".to_string(),
        "uptime: 2 days, 4:02:12".to_string(),
        "sw-version: 10.1.0".to_string(),
        "model: PA-VM".to_string(),
    ];
    exec.print_all(lines);
}

fn show_interface_all(exec: &mut Exec<'_>, _: &Captures) {
    let lines: Vec<String> = exec
        .device
        .interfaces
        .iter()
        .map(|(name, i)| {
            format!(
                "name: {name}, state: {}, ip: {}, zone: {}",
                up_down(i.up),
                i.cidr(),
                i.zone.as_deref().unwrap_or("N/A")
            )
        })
        .collect();
    exec.print_all(lines);
}

fn show_interface_logical(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let mut lines = vec![
        format!("total configured logical interfaces: {}", d.interfaces.len()),
        "name           id    vsys zone             forwarding-tag  ip-address".to_string(),
    ];
    lines.extend(d.interfaces.iter().enumerate().map(|(idx, (name, i))| {
        format!(
            "{name:<14} {:<5} 1    {:<16} 0               {}",
            16 + idx,
            i.zone.as_deref().unwrap_or(""),
            i.cidr()
        )
    }));
    exec.print_all(lines);
}

fn show_interface_hardware(exec: &mut Exec<'_>, _: &Captures) {
    let lines: Vec<String> = exec
        .device
        .interfaces
        .iter()
        .enumerate()
        .flat_map(|(idx, (name, i))| {
            [
                format!("Port: {name}, Name: {name}, MAC: 00:50:56:00:00:{:02x}", idx + 1),
                format!("Speed: 10000, Duplex: full, State: {}", up_down(i.up)),
            ]
        })
        .collect();
    exec.print_all(lines);
}

fn show_arp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec!["interface         ip-address      mac-address       port".to_string()];
    lines.extend(neighbors(exec).iter().map(|n| {
        format!(
            "{:<17} {:<15} {:<17} {}",
            n.local_interface,
            n.ip.to_string(),
            n.mac(),
            n.local_interface
        )
    }));
    exec.print_all(lines);
}

fn show_routes(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let mut lines = vec![
        "VIRTUAL ROUTER: default (id 1)".to_string(),
        "destination     nexthop           metric flags      age   interface".to_string(),
    ];
    let direct = connected(d.interfaces.iter());
    for r in d.routes.iter() {
        let out = r.interface.clone().or_else(|| {
            let nh = r.next_hop.parse::<std::net::Ipv4Addr>().ok()?;
            direct
                .iter()
                .find(|(net, _, _)| net.contains(&nh))
                .map(|(_, _, name)| name.to_string())
        });
        lines.push(format!(
            "{:<15} {:<17} 10     A S              {}",
            r.destination,
            r.next_hop,
            out.unwrap_or_default()
        ));
    }
    for (net, host, name) in direct.iter() {
        lines.push(format!(
            "{:<15} {:<17} 0      A C              {}",
            net.to_string(),
            host.addr().to_string(),
            name
        ));
    }
    exec.print_all(lines);
}

fn show_security_policy(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let lines: Vec<String> = if d.policies.is_empty() {
        vec!["No security policies configured.".to_string()]
    } else {
        d.policies
            .iter()
            .flat_map(|p| {
                [
                    format!("\"{}\" {{", p.name),
                    format!("        from {};", p.from_zone),
                    format!("        source {};", p.src_addr),
                    format!("        to {};", p.to_zone),
                    format!("        destination {};", p.dst_addr),
                    format!("        service {};", service_name(p)),
                    format!("        action {};", p.action),
                    "}".to_string(),
                ]
            })
            .collect()
    };
    exec.print_all(lines);
}

fn service_name(p: &Policy) -> String {
    match (p.protocol, p.dst_port) {
        (None, None) => "any".to_string(),
        (Some(t), Some(port)) => format!("{t}/{port}"),
        _ => p.service(),
    }
}

/// Protocol and port selector of a service or application name.
fn selector(name: &str) -> Option<(Option<Transport>, Option<u16>)> {
    match name.to_lowercase().as_str() {
        "any" | "application-default" => Some((None, None)),
        "service-http" | "web-browsing" => Some((Some(Transport::Tcp), Some(80))),
        "service-https" | "ssl" => Some((Some(Transport::Tcp), Some(443))),
        other => other
            .parse::<Protocol>()
            .ok()
            .map(|p| (Some(p.transport()), p.port())),
    }
}

/// A parsed assignment to one field of a security rule.
enum RuleField {
    From(String),
    To(String),
    Source(String),
    Destination(String),
    Action(PolicyAction),
    Selector(Option<Transport>, Option<u16>),
}

impl RuleField {
    fn parse(field: &str, value: &str) -> Option<Self> {
        Some(match field.to_lowercase().as_str() {
            "from" => RuleField::From(value.to_string()),
            "to" => RuleField::To(value.to_string()),
            "source" => RuleField::Source(value.to_string()),
            "destination" => RuleField::Destination(value.to_string()),
            "action" => RuleField::Action(match value.to_lowercase().as_str() {
                "allow" => PolicyAction::Allow,
                "deny" | "drop" | "reset-client" | "reset-server" | "reset-both" => {
                    PolicyAction::Deny
                }
                _ => return None,
            }),
            "service" | "application" => {
                let (protocol, port) = selector(value)?;
                RuleField::Selector(protocol, port)
            }
            _ => return None,
        })
    }

    fn apply(self, rule: &mut Policy) {
        match self {
            RuleField::From(zone) => rule.from_zone = zone,
            RuleField::To(zone) => rule.to_zone = zone,
            RuleField::Source(addr) => rule.src_addr = addr,
            RuleField::Destination(addr) => rule.dst_addr = addr,
            RuleField::Action(action) => rule.action = action,
            RuleField::Selector(protocol, port) => {
                rule.protocol = protocol;
                rule.dst_port = port;
            }
        }
    }
}

/// Change one field of a security rule, creating the rule if it does not exist. An invalid field
/// or value leaves the rulebase untouched.
fn set_rule(exec: &mut Exec<'_>, caps: &Captures) {
    let name = caps.str("name");
    let Some(change) = RuleField::parse(caps.str("field"), caps.str("value")) else {
        exec.print(INVALID);
        return;
    };
    let idx = match exec.device.policies.iter().position(|p| p.name == name) {
        Some(idx) => idx,
        None => {
            let next_id = exec.device.policies.iter().map(|p| p.id).max().unwrap_or_default();
            let Some(id) = next_id.checked_add(1) else {
                exec.print(INVALID);
                return;
            };
            exec.device.policies.push(Policy::new(id, name, "any", "any", PolicyAction::Allow));
            exec.device.policies.len() - 1
        }
    };
    change.apply(&mut exec.device.policies[idx]);
}

fn delete_rule(exec: &mut Exec<'_>, caps: &Captures) {
    let name = caps.str("name");
    let before = exec.device.policies.len();
    exec.device.policies.retain(|p| p.name != name);
    if exec.device.policies.len() == before {
        exec.print(format!("{name} does not exist"));
    }
}

fn add_static_route(exec: &mut Exec<'_>, caps: &Captures) {
    let destination = super::render::parse_cidr(caps.str("cidr"))
        .map(|n| n.to_string())
        .unwrap_or_else(|| caps.str("cidr").to_string());
    let route = Route::new(destination, caps.str("next-hop"));
    if !exec.device.routes.contains(&route) {
        exec.device.routes.push(route);
    }
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        // operational mode
        Rule::run(USER, "configure", |x, _| {
            x.print("Entering configuration mode");
            x.enter(Config);
        }),
        Rule::run(USER, "exit", |_, _| {}),
        Rule::print(USER, "request system restart", "Executing restart..."),
        Rule::print(USER, "request shutdown [args...]", "Executing shutdown..."),
        Rule::run(USER, "test security-policy-match [args...]", test_policy_match),
        Rule::print(USER, "debug dataplane [args...]", "Dataplane packet diagnosis enabled."),
        Rule::run(USER, "ping host <target>", ping),
        Rule::run(USER, "ping [args...]", ping),
        Rule::run(USER, "show interface all", show_interface_all),
        Rule::run(USER, "show interface logical", show_interface_logical),
        Rule::run(USER, "show interface hardware", show_interface_hardware),
        Rule::run(USER, "show routing route [args...]", show_routes),
        Rule::run(USER, "show system info", show_system_info),
        Rule::print(USER, "show system state [args...]", "sys.s1.p1.limit: 100"),
        Rule::print(USER, "show system resources [args...]", "load average: 0.05, 0.08, 0.02\nMem: 4G total, 1G used"),
        Rule::print(USER, "show system statistics [args...]", "counter          value      rate\n---------------------------------\nflow_fwd_l3_mcast 0        0"),
        Rule::run(USER, "show arp all", show_arp),
        Rule::print(USER, "show session all", "ID      Application    State    Type    Flag  Src[Sport]/Zone/Proto\n2423    dns            ACTIVE   FLOW    NS    192.168.10.10[4232]/TRUST/17"),
        Rule::print(USER, "show session info", "Session statistics\n  Number of allocated sessions: 1"),
        Rule::print(USER, "show session meter", "Session metering statistics\n  tps: 0"),
        Rule::print(USER, "show user ip-user-mapping [args...]", "IP              Vsys   Type   User              IdleTimeout(s) MaxTimeout(s)\n192.168.1.50    vsys1  AD     domain\\alice      900            3600"),
        Rule::print(USER, "show counter global [args...]", "Global counters:\nflow_fwd_l3_mcast 0"),
        Rule::print(USER, "show jobs all", "Enqueued Dequeued ID      Type    Status  Result  Completed\n14:20:01 14:20:01 12      Commit  FIN     OK      14:20:15"),
        Rule::print(USER, "show admins", "Admin     From            Role              Client\nadmin     192.168.10.10   superuser         Web"),
        Rule::print(USER, "show high-availability [args...]", "High Availability is not enabled"),
        Rule::run(USER, "show running security-policy", show_security_policy),
        Rule::print(USER, "show running nat-policy", "No NAT policies configured."),
        Rule::print(USER, "show config running", "users {\n  admin {\n    password-hash ...;\n    permissions superuser;\n  }\n}"),
        Rule::print(USER, "show config candidate", "Candidate config same as running."),
        Rule::print(USER, "show [args...]", INVALID),

        // configuration mode
        Rule::run(CONF, "exit", |x, _| {
            x.print("Exiting configuration mode");
            x.enter(User);
        }),
        Rule::run(CONF, "quit", |x, _| {
            x.print("Exiting configuration mode");
            x.enter(User);
        }),
        Rule::run(CONF, "set network interface ethernet <name> layer3 ip <cidr>", |x, c| {
            x.device.interface_entry(c.str("name")).set_cidr(c.str("cidr"));
            x.print(OK);
        }),
        Rule::print(CONF, "set network zone [args...]", OK),
        Rule::run(CONF, "set zone <zone> network layer3 <name>", |x, c| {
            let zone = c.str("zone").to_string();
            x.device.interface_entry(c.str("name")).set_zone(Some(zone));
        }),
        Rule::run(CONF, "set deviceconfig system hostname <name>", |x, c| {
            x.device.name = c.str("name").to_string()
        }),
        Rule::run(CONF, "set rulebase security rules <name> <field> <value>", set_rule),
        Rule::run(CONF, "delete rulebase security rules <name>", delete_rule),
        Rule::run(
            CONF,
            "set network virtual-router <vr> routing-table ip static-route <route> destination <cidr> nexthop ip-address <next-hop>",
            add_static_route,
        ),
        Rule::run(CONF, "set network virtual-router <vr> [args...]", |_, _| {}),
        Rule::print(CONF, "commit [args...]", "Configuration committed successfully"),
        Rule::run(CONF, "load config from <file>", |x, c| {
            let msg = format!("Config loaded from {}", c.str("file"));
            x.print(msg)
        }),
        Rule::run(CONF, "run <command...>", |x, c| {
            run_nested(x, RULES.as_slice(), User, c.str("command"), INCOMPLETE, INVALID)
        }),
    ];
}
