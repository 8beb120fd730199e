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

//! IOS-style interpreter, used for Cisco, Aruba, and Extreme devices.

use itertools::Itertools;
use lazy_static::lazy_static;

use super::{
    render::{command_history, connected, dotted, neighbors, prefix},
    run_nested, CommandInterpreter,
};
use crate::{
    command::{Captures, Exec, Rule},
    device::{Device, Interface, Route},
    types::{
        CliMode::{self, Config, ConfigInterface, ConfigRouter, ConfigVlan, Privileged, User},
        ContextFrame, FrameKind, VendorFamily,
    },
};

const UNKNOWN: &str = "% Unknown command.";
const INVALID: &str = "% Invalid input detected at '^' marker.";
const INCOMPLETE: &str = "% Incomplete command.";

const ANY: &[CliMode] = &[];
const PRIV: &[CliMode] = &[Privileged];
const EXEC: &[CliMode] = &[User, Privileged];
const CONF: &[CliMode] = &[Config];
const IF: &[CliMode] = &[ConfigInterface];
const ROUTER: &[CliMode] = &[ConfigRouter];
const VLAN: &[CliMode] = &[ConfigVlan];
const SUB: &[CliMode] = &[Config, ConfigInterface, ConfigRouter, ConfigVlan];

/// Interpreter of the IOS command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CiscoInterpreter;

impl CommandInterpreter for CiscoInterpreter {
    fn family(&self) -> VendorFamily {
        VendorFamily::Cisco
    }

    fn modes(&self) -> &'static [CliMode] {
        &[User, Privileged, Config, ConfigInterface, ConfigRouter, ConfigVlan]
    }

    fn rules(&self) -> &'static [Rule] {
        RULES.as_slice()
    }

    fn unknown(&self, device: &Device) -> &'static str {
        match device.mode {
            User | Privileged => UNKNOWN,
            _ => INVALID,
        }
    }

    fn incomplete(&self) -> &'static str {
        INCOMPLETE
    }
}

/// Apply a change to the interface that is currently configured.
fn edit_interface(exec: &mut Exec<'_>, f: impl FnOnce(&mut Interface)) {
    match exec.device.frame_name(FrameKind::Interface).map(String::from) {
        Some(name) => f(exec.device.interface_entry(&name)),
        None => exec.print(INCOMPLETE),
    }
}

fn exit(exec: &mut Exec<'_>, _: &Captures) {
    match exec.device.mode {
        ConfigInterface | ConfigRouter | ConfigVlan => {
            exec.device.context.clear();
            exec.enter(Config);
        }
        Config => exec.enter(Privileged),
        Privileged => exec.enter(User),
        _ => {}
    }
}

fn end(exec: &mut Exec<'_>, _: &Captures) {
    if exec.device.mode != User {
        exec.device.context.clear();
        exec.enter(Privileged);
    }
}

fn enter_interface(exec: &mut Exec<'_>, caps: &Captures) {
    let name = format!("{}{}", caps.str("name"), caps.str("suffix"));
    exec.device.interface_entry(&name);
    exec.device.context = vec![ContextFrame::new(FrameKind::Interface, name)];
    exec.enter(ConfigInterface);
}

fn enter_router(exec: &mut Exec<'_>, protocol: &str, process: &str) {
    let name = format!("{protocol} {process}");
    exec.device.context = vec![ContextFrame::new(FrameKind::RouteProtocol, name)];
    exec.enter(ConfigRouter);
}

fn enter_vlan(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(id) = caps.parse::<u16>("vlan").filter(|v| (1..4095).contains(v)) else {
        exec.print(INVALID);
        return;
    };
    exec.device
        .vlans
        .entry(id)
        .or_insert_with(|| format!("VLAN{id:04}"));
    exec.device.context = vec![ContextFrame::new(FrameKind::Vlan, id.to_string())];
    exec.enter(ConfigVlan);
}

fn add_route(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(net) = prefix(caps.str("ip"), caps.str("mask")) else {
        exec.print(INVALID);
        return;
    };
    let route = Route::new(net.to_string(), caps.str("next-hop"));
    if !exec.device.routes.contains(&route) {
        exec.device.routes.push(route);
    }
}

fn remove_route(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(net) = prefix(caps.str("ip"), caps.str("mask")) else {
        exec.print(INVALID);
        return;
    };
    let dest = net.to_string();
    let next_hop = caps.get("next-hop");
    exec.device
        .routes
        .retain(|r| !(r.destination == dest && next_hop.map(|n| n == r.next_hop).unwrap_or(true)));
}

fn set_access_vlan(exec: &mut Exec<'_>, caps: &Captures) {
    let Some(id) = caps.parse::<u16>("vlan").filter(|v| (1..4095).contains(v)) else {
        exec.print(INVALID);
        return;
    };
    if exec.device.frame_name(FrameKind::Interface).is_none() {
        exec.print(INCOMPLETE);
        return;
    }
    if !exec.device.vlans.contains_key(&id) {
        exec.print(format!("% Access VLAN does not exist. Creating vlan {id}"));
        exec.device.vlans.insert(id, format!("VLAN{id:04}"));
    }
    edit_interface(exec, |i| i.vlan = Some(id));
}

fn name_vlan(exec: &mut Exec<'_>, caps: &Captures) {
    match exec.device.frame_name(FrameKind::Vlan).and_then(|v| v.parse::<u16>().ok()) {
        Some(id) => {
            exec.device.vlans.insert(id, caps.str("name").to_string());
        }
        None => exec.print(INCOMPLETE),
    }
}

fn do_command(exec: &mut Exec<'_>, caps: &Captures) {
    run_nested(exec, RULES.as_slice(), Privileged, caps.str("command"), INCOMPLETE, INVALID);
}

fn ping(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.get("target").unwrap_or("target");
    exec.print_all([
        "Type escape sequence to abort.".to_string(),
        format!("Sending 5, 100-byte ICMP Echos to {target}, timeout is 2 seconds:"),
        "!!!!!".to_string(),
        "Success rate is 100 percent (5/5), round-trip min/avg/max = 1/1/2 ms".to_string(),
    ]);
}

fn traceroute(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.get("target").unwrap_or("target");
    exec.print(format!("Tracing the route to {target}"));
    let hops = exec
        .device
        .default_route()
        .map(|r| r.next_hop.clone())
        .into_iter()
        .chain(std::iter::once(target.to_string()))
        .enumerate()
        .map(|(n, hop)| format!("  {} {} {} msec {} msec {} msec", n + 1, hop, 2 * n + 1, 2 * n + 1, 2 * n + 2))
        .collect_vec();
    exec.print_all(hops);
}

fn show_history(exec: &mut Exec<'_>, _: &Captures) {
    let lines = command_history(&exec.device);
    exec.print_all(lines);
}

fn show_ip_interface_brief(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines = vec![format!(
        "{:<22} {:<15} {:<3} {:<6} {:<21} {}",
        "Interface", "IP-Address", "OK?", "Method", "Status", "Protocol"
    )];
    lines.extend(exec.device.interfaces.iter().map(|(name, i)| {
        let (ip, method) = if i.ip.is_empty() {
            ("unassigned", "unset")
        } else {
            (i.ip.as_str(), "manual")
        };
        let status = if i.up { "up" } else { "administratively down" };
        let proto = if i.up { "up" } else { "down" };
        format!("{name:<22} {ip:<15} YES {method:<6} {status:<21} {proto}")
    }));
    exec.print_all(lines);
}

fn running_config(d: &Device) -> Vec<String> {
    let mut l = vec![
        "Building configuration...".to_string(),
        String::new(),
        "Current configuration:".to_string(),
        "!".to_string(),
        format!("hostname {}", d.name),
        "!".to_string(),
    ];
    for (id, name) in d.vlans.iter() {
        l.push(format!("vlan {id}"));
        l.push(format!(" name {name}"));
        l.push("!".to_string());
    }
    for (name, i) in d.interfaces.iter() {
        l.push(format!("interface {name}"));
        if let Some(desc) = i.description.as_ref() {
            l.push(format!(" description {desc}"));
        }
        if let Some(vlan) = i.vlan {
            l.push(format!(" switchport access vlan {vlan}"));
        }
        if let Some(zone) = i.zone.as_ref() {
            l.push(format!(" zone-member security {zone}"));
        }
        if i.ip.is_empty() {
            l.push(" no ip address".to_string());
        } else {
            l.push(format!(" ip address {} {}", i.ip, i.dotted_mask()));
        }
        if !i.up {
            l.push(" shutdown".to_string());
        }
        l.push("!".to_string());
    }
    for r in d.routes.iter() {
        let (net, mask) = dotted(&r.destination);
        l.push(format!("ip route {net} {mask} {}", r.next_hop));
    }
    l.push("!".to_string());
    l.push("end".to_string());
    l
}

fn show_running_config(exec: &mut Exec<'_>, _: &Captures) {
    let lines = running_config(&exec.device);
    exec.print_all(lines);
}

fn show_startup_config(exec: &mut Exec<'_>, _: &Captures) {
    let lines = [
        "Using 1024 out of 262144 bytes".to_string(),
        format!("hostname {}", exec.device.name),
        "! Startup Config".to_string(),
        "end".to_string(),
    ];
    exec.print_all(lines);
}

fn interface_block(name: &str, i: &Interface) -> Vec<String> {
    let mut l = vec![format!(
        "{name} is {}, line protocol is {}",
        if i.up { "up" } else { "administratively down" },
        if i.up { "up" } else { "down" }
    )];
    if let Some(desc) = i.description.as_ref() {
        l.push(format!("  Description: {desc}"));
    }
    if i.is_addressed() {
        l.push(format!("  Internet address is {}", i.cidr()));
    }
    l.push("  MTU 1500 bytes, BW 1000000 Kbit/sec, DLY 10 usec,".to_string());
    l.push("  Encapsulation ARPA, loopback not set".to_string());
    l
}

fn show_interfaces(exec: &mut Exec<'_>, caps: &Captures) {
    let lines = match caps.get("name") {
        Some(name) => match exec.device.interfaces.get(name) {
            Some(i) => interface_block(name, i),
            None => vec![format!("% Interface {name} not found")],
        },
        None => exec
            .device
            .interfaces
            .iter()
            .flat_map(|(name, i)| interface_block(name, i))
            .collect(),
    };
    exec.print_all(lines);
}

fn show_ip_route(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let mut lines = vec![
        "Codes: L - local, C - connected, S - static, * - candidate default".to_string(),
        String::new(),
    ];
    match d.default_route() {
        Some(r) => lines.push(format!("Gateway of last resort is {} to network 0.0.0.0", r.next_hop)),
        None => lines.push("Gateway of last resort is not set".to_string()),
    }
    lines.push(String::new());
    for r in d.routes.iter() {
        let code = if r.is_default() { "S*" } else { "S " };
        lines.push(format!("{code}   {} [1/0] via {}", r.destination, r.next_hop));
    }
    for (net, host, name) in connected(d.interfaces.iter()) {
        lines.push(format!("C     {net} is directly connected, {name}"));
        lines.push(format!("L     {host} is directly connected, {name}"));
    }
    exec.print_all(lines);
}

fn show_arp(exec: &mut Exec<'_>, _: &Captures) {
    let mut lines =
        vec!["Protocol  Address          Age (min)  Hardware Addr   Type   Interface".to_string()];
    lines.extend(neighbors(exec).iter().map(|n| format!("Internet  {}", n.arp_row())));
    exec.print_all(lines);
}

fn show_cdp(exec: &mut Exec<'_>, caps: &Captures) {
    let found = neighbors(exec);
    let lines = if caps.get("detail").is_some() {
        found
            .iter()
            .flat_map(|n| {
                [
                    "-------------------------".to_string(),
                    format!("Device ID: {}", n.hostname),
                    "Entry address(es):".to_string(),
                    format!("  IP address: {}", n.ip),
                    format!("Platform: {},  Capabilities: Router Switch IGMP", n.class),
                    format!("Interface: {},  Port ID (outgoing port): {}", n.local_interface, n.remote_interface),
                    "Holdtime : 150 sec".to_string(),
                ]
            })
            .collect_vec()
    } else {
        std::iter::once(
            "Device ID        Local Intrfce     Holdtme    Capability  Platform  Port ID".to_string(),
        )
        .chain(found.iter().map(|n| n.cdp_row()))
        .collect_vec()
    };
    exec.print_all(lines);
}

fn show_vlan(exec: &mut Exec<'_>, _: &Captures) {
    let d = &exec.device;
    let mut lines = vec![
        "VLAN Name                             Status    Ports".to_string(),
        "---- -------------------------------- --------- -------------------------------".to_string(),
    ];
    let access_ports = |vlan: Option<u16>| {
        d.interfaces
            .iter()
            .filter(|(name, i)| {
                i.vlan == vlan && !name.to_lowercase().starts_with("vlan") && (vlan.is_some() || i.ip.is_empty())
            })
            .map(|(name, _)| name.as_str())
            .join(", ")
    };
    if !d.vlans.contains_key(&1) {
        lines.push(format!("{:<4} {:<32} {:<9} {}", 1, "default", "active", access_ports(None)));
    }
    for (id, name) in d.vlans.iter() {
        let ports = if *id == 1 { access_ports(None) } else { access_ports(Some(*id)) };
        lines.push(format!("{id:<4} {name:<32} {:<9} {ports}", "active"));
    }
    exec.print_all(lines);
}

fn delete(exec: &mut Exec<'_>, caps: &Captures) {
    let target = caps.str("target");
    if target.contains("nvram") || target.contains("startup") {
        exec.print("Erase of nvram: complete");
    } else {
        exec.print(format!("%Error deleting flash:{target} (No such file or directory)"));
    }
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        // navigation
        Rule::run(ANY, "exit", exit),
        Rule::run(SUB, "end", end),
        Rule::run(EXEC, "enable", |x, _| x.enter(Privileged)),
        Rule::run(PRIV, "disable", |x, _| x.enter(User)),
        Rule::run(PRIV, "configure [terminal]", |x, _| {
            x.print("Enter configuration commands, one per line.  End with CNTL/Z.");
            x.enter(Config);
        }),
        Rule::run(SUB, "do <command...>", do_command),

        // operational commands
        Rule::run(EXEC, "ping [target...]", ping),
        Rule::run(EXEC, "traceroute [target...]", traceroute),
        Rule::print(EXEC, "show version", "Cisco IOS Software, ISR Software (X86_64_LINUX_IOSD-UNIVERSALK9-M), Version 17.3.4a\nUptime is 4 weeks, 2 days, 3 hours"),
        Rule::print(EXEC, "show clock", "14:45:10.123 UTC Mon May 22 2024"),
        Rule::run(EXEC, "show history", show_history),
        Rule::print(EXEC, "show users", "    Line       User       Host(s)              Idle       Location\n*  0 con 0                idle                 00:00:00"),
        Rule::print(EXEC, "show sessions", "No active connections."),
        Rule::print(EXEC, "show ssh", "% SSH not enabled"),
        Rule::print(EXEC, "show inventory", "NAME: \"Chassis\", DESCR: \"Cisco ISR4331 Chassis\"\nPID: ISR4331/K9        , VID: V01 , SN: FDO2134251"),
        Rule::print(EXEC, "show flash", "Directory of flash:/\n    1  -rw-    500000000   May 1 2024  isr4300-universalk9.17.03.04a.SPA.bin"),
        Rule::print(EXEC, "show file systems", "Size(b)       Free(b)      Type  Flags  Prefixes\n* 4096000000    3500000000   disk  rw     flash:"),

        // privileged commands
        Rule::print(PRIV, "reload", "Proceed with reload? [confirm]"),
        Rule::print(PRIV, "write [memory]", "Building configuration...\n[OK]"),
        Rule::print(PRIV, "copy running-config startup-config", "Destination filename [startup-config]?\nBuilding configuration...\n[OK]"),
        Rule::run(PRIV, "delete <target>", delete),
        Rule::print(PRIV, "clear counters", "Clear \"show interface\" counters on all interfaces [confirm]\nCounters cleared."),
        Rule::print(PRIV, "clear arp-cache", "ARP cache cleared."),
        Rule::print(PRIV, "clear logging", "Logging buffer cleared."),
        Rule::print(PRIV, "clear ip nat translation [args...]", "Dynamic translation slots cleared."),
        Rule::print(PRIV, "debug ip packet", "IP packet debugging is on"),
        Rule::print(PRIV, "debug all", "This may severely impact network performance. Continue? (yes/[no]): yes\nAll possible debugging has been turned on"),
        Rule::print(PRIV, "undebug all", "All possible debugging has been turned off"),
        Rule::print(PRIV, "no debug all", "All possible debugging has been turned off"),

        // inspection
        Rule::run(PRIV, "show ip interface brief", show_ip_interface_brief),
        Rule::run(PRIV, "show running-config", show_running_config),
        Rule::run(PRIV, "show startup-config", show_startup_config),
        Rule::run(PRIV, "show interfaces [<name>]", show_interfaces),
        Rule::run(PRIV, "show ip route", show_ip_route),
        Rule::run(PRIV, "show arp", show_arp),
        Rule::run(PRIV, "show cdp neighbors [detail]", show_cdp),
        Rule::run(PRIV, "show lldp neighbors [detail]", show_cdp),
        Rule::run(PRIV, "show vlan [brief]", show_vlan),
        Rule::print(PRIV, "show mac address-table", "          Mac Address Table\n-------------------------------------------\nVlan    Mac Address       Type        Ports\n----    -----------       --------    -----\n10      0050.56b0.1122    DYNAMIC     Gi0/2"),
        Rule::print(PRIV, "show spanning-tree", "VLAN0010\n  Spanning tree enabled protocol rstp\n  Root ID    Priority    32778\n             Address     0016.9d82.1234\n             This bridge is the root"),
        Rule::print(PRIV, "show etherchannel summary", "Flags:  D - down        P - bundled in port-channel\nNumber of channel-groups in use: 0\nGroup  Port-channel  Protocol    Ports\n------+-------------+-----------+-----------------------------------------------"),
        Rule::print(PRIV, "show ip protocols", "Routing Protocol is \"ospf 1\"\n  Router ID 1.1.1.1\n  Number of areas in this router is 1. 1 normal 0 stub 0 nssa"),
        Rule::print(PRIV, "show ip ospf neighbor", "Neighbor ID     Pri   State           Dead Time   Address         Interface\n2.2.2.2           1   FULL/BDR        00:00:33    10.0.0.2        Gi0/0"),
        Rule::print(PRIV, "show ip ospf interface", "Gi0/0 is up, line protocol is up \n  Internet Address 10.0.0.1/30, Area 0, Process ID 1"),
        Rule::print(PRIV, "show bgp summary", "BGP router identifier 1.1.1.1, local AS number 65000\nNeighbor        V    AS MsgRcvd MsgSent   TblVer  InQ OutQ Up/Down  State/PfxRcd\n10.0.0.2        4 65001      12      12        3    0    0 00:11:12        1"),
        Rule::print(PRIV, "show bgp all", "For address family: IPv4 Unicast\nBGP table version is 3, local router ID is 1.1.1.1\n     Network          Next Hop            Metric LocPrf Weight Path\n *>  0.0.0.0          10.0.0.2                 0             0 65001 i"),
        Rule::print(PRIV, "show ip nat translations", "Pro Inside global      Inside local       Outside local      Outside global\ntcp 203.0.113.10:80    192.168.10.10:80   ---                ---"),
        Rule::print(PRIV, "show ip nat statistics", "Total active translations: 1 (1 static, 0 dynamic; 0 extended)"),
        Rule::print(PRIV, "show access-lists", "Standard IP access list 10\n    10 permit 192.168.10.0, wildcard bits 0.0.0.255"),
        Rule::print(PRIV, "show crypto isakmp sa", "dst             src             state          conn-id status\n10.0.0.2        10.0.0.1        QM_IDLE              1 ACTIVE"),
        Rule::print(PRIV, "show crypto ipsec sa", "interface: Tunnel0\n    Crypto map tag: Tunnel0-head-0, local addr 10.0.0.1"),
        Rule::print(PRIV, "show port-security", "Secure Port  MaxSecureAddr  CurrentAddr  SecurityViolation  Security Action\n                (Count)       (Count)          (Count)\n---------------------------------------------------------------------------"),
        Rule::print(PRIV, "show environment", "Fan 1: OK, Fan 2: OK\nTemp: 28C (Normal)"),
        Rule::print(PRIV, "show power inline", "Module   Available     Used     Remaining\n          (Watts)     (Watts)    (Watts)\n1           370.0        0.0       370.0"),
        Rule::print(PRIV, "show processes cpu", "CPU utilization for five seconds: 1%/0%; one minute: 1%; five minutes: 1%"),
        Rule::print(PRIV, "show memory", "Processor Pool Total: 10245628 Used: 452123 Free: 98124505"),
        Rule::print(PRIV, "show logging", "Syslog logging: enabled (0 messages dropped, 0 messages rate-limited, 0 flushes, 0 overruns, xml disabled, filtering disabled)"),
        Rule::print(PRIV, "show controllers", "Interface GigabitEthernet0/0\nHardware is ISR4331-3x1GE"),
        Rule::print(PRIV, "show tech-support", "... Generating Tech Support Output ...\n(This typically outputs thousands of lines of config/state)\n[DONE]"),
        Rule::print(PRIV, "show diag", "... Generating Tech Support Output ...\n(This typically outputs thousands of lines of config/state)\n[DONE]"),
        Rule::print(PRIV, "show protocols", "Global values:\n  Internet Protocol routing is enabled"),
        Rule::print(EXEC, "show [args...]", INVALID),

        // global configuration
        Rule::run(CONF, "hostname <name>", |x, c| x.device.name = c.str("name").to_string()),
        Rule::run(SUB, "interface <name> [<suffix>]", enter_interface),
        Rule::run(SUB, "router ospf <num>", |x, c| enter_router(x, "ospf", c.str("num"))),
        Rule::run(SUB, "router bgp <num>", |x, c| enter_router(x, "bgp", c.str("num"))),
        Rule::run(CONF, "ip route <ip> <mask> <next-hop>", add_route),
        Rule::run(CONF, "no ip route <ip> <mask> [<next-hop>]", remove_route),
        Rule::run(SUB, "vlan <vlan>", enter_vlan),
        Rule::run(CONF, "no vlan <vlan>", |x, c| {
            if let Some(id) = c.parse::<u16>("vlan") {
                x.device.vlans.remove(&id);
            }
        }),
        Rule::run(CONF, "access-list <args...>", |_, _| {}),
        Rule::run(CONF, "line vty <args...>", |_, _| {}),

        // interface configuration
        Rule::run(IF, "ip address <ip> <mask>", |x, c| {
            let (ip, mask) = (c.str("ip").to_string(), c.str("mask").to_string());
            edit_interface(x, |i| i.set_address(ip, mask))
        }),
        Rule::run(IF, "no ip address", |x, _| edit_interface(x, |i| i.clear_address())),
        Rule::run(IF, "shutdown", |x, _| edit_interface(x, |i| i.set_up(false))),
        Rule::run(IF, "no shutdown", |x, _| edit_interface(x, |i| i.set_up(true))),
        Rule::run(IF, "description <text...>", |x, c| {
            let text = c.str("text").to_string();
            edit_interface(x, |i| i.set_description(Some(text)))
        }),
        Rule::run(IF, "no description", |x, _| edit_interface(x, |i| i.set_description(None))),
        Rule::run(IF, "switchport access vlan <vlan>", set_access_vlan),
        Rule::run(IF, "no switchport access vlan", |x, _| edit_interface(x, |i| i.vlan = None)),
        Rule::run(IF, "switchport mode <word>", |_, _| {}),
        Rule::run(IF, "no switchport", |x, _| edit_interface(x, |i| i.vlan = None)),
        Rule::run(IF, "zone-member security <zone>", |x, c| {
            let zone = c.str("zone").to_string();
            edit_interface(x, |i| i.set_zone(Some(zone)))
        }),
        Rule::run(IF, "no zone-member security [<zone>]", |x, _| edit_interface(x, |i| i.set_zone(None))),

        // routing protocol configuration
        Rule::run(ROUTER, "network <args...>", |_, _| {}),
        Rule::run(ROUTER, "router-id <ip>", |_, _| {}),
        Rule::run(ROUTER, "neighbor <args...>", |_, _| {}),
        Rule::run(ROUTER, "passive-interface <name>", |_, _| {}),

        // vlan configuration
        Rule::run(VLAN, "name <name>", name_vlan),
    ];
}
