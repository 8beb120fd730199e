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

//! Command registry of every vendor family, used for the help output and for tab completion.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use lazy_static::lazy_static;
use maplit::btreemap;

use crate::types::{Vendor, VendorFamily};

/// Categorized list of the commands a vendor family understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    categories: Vec<(&'static str, Vec<&'static str>)>,
    vocabulary: BTreeSet<&'static str>,
}

impl CommandRegistry {
    fn new(categories: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        let vocabulary = categories
            .iter()
            .flat_map(|(_, cmds)| cmds.iter())
            .flat_map(|cmd| cmd.split_whitespace())
            .collect();
        Self {
            categories,
            vocabulary,
        }
    }

    /// All categories with their commands, in display order.
    pub fn categories(&self) -> &[(&'static str, Vec<&'static str>)] {
        &self.categories
    }

    /// Iterate over all registered commands.
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().flat_map(|(_, cmds)| cmds.iter().copied())
    }

    /// Every word that appears in any registered command.
    pub fn vocabulary(&self) -> &BTreeSet<&'static str> {
        &self.vocabulary
    }

    /// Lines printed by the `?` command.
    pub fn help_lines(&self, vendor: Vendor) -> Vec<String> {
        let mut lines = vec![format!("--- {vendor} Available Commands (Partial List) ---")];
        lines.extend(
            self.categories
                .iter()
                .map(|(cat, cmds)| format!("{}: {} ...", cat, cmds.iter().take(5).join(", "))),
        );
        lines.push(String::from("(See \"Lab Documentation\" tab for full list)"));
        lines
    }

    /// Complete the last word of the input. A unique match is completed and followed by a space.
    /// Multiple matches extend the word to their longest common prefix. Otherwise, the input is
    /// returned unchanged.
    pub fn complete(&self, input: &str) -> String {
        let (head, partial) = match input.rfind(' ') {
            Some(pos) => input.split_at(pos + 1),
            None => ("", input),
        };
        if partial.is_empty() {
            return input.to_string();
        }
        let lower = partial.to_lowercase();
        let matches = self
            .vocabulary
            .iter()
            .filter(|w| w.starts_with(lower.as_str()))
            .collect_vec();
        match matches.as_slice() {
            [] => input.to_string(),
            [word] => format!("{head}{word} "),
            [first, rest @ ..] => {
                let common = rest.iter().fold(first.len(), |len, w| {
                    first
                        .bytes()
                        .zip(w.bytes())
                        .take(len)
                        .take_while(|(a, b)| a == b)
                        .count()
                });
                if common > partial.len() {
                    format!("{head}{}", &first[..common])
                } else {
                    input.to_string()
                }
            }
        }
    }
}

lazy_static! {
    static ref REGISTRIES: BTreeMap<VendorFamily, CommandRegistry> = btreemap! {
        VendorFamily::Cisco => CommandRegistry::new(vec![
            ("User Mode", vec![
                "enable", "ping", "traceroute", "show version", "show clock", "show history",
                "show inventory", "show users", "show sessions", "show ssh", "show flash",
                "show file systems",
            ]),
            ("Privileged Mode", vec![
                "configure terminal", "write", "copy running-config startup-config", "reload",
                "debug ip packet", "undebug all", "clear counters", "clear arp", "clear logging",
                "delete nvram:startup-config", "disable",
            ]),
            ("Global Configuration", vec![
                "hostname", "interface", "router ospf", "router bgp", "ip route", "no ip route",
                "vlan", "access-list", "line vty", "do", "end", "exit",
            ]),
            ("Interface Configuration", vec![
                "ip address", "no ip address", "shutdown", "no shutdown", "description",
                "switchport access vlan", "switchport mode access", "zone-member security",
            ]),
            ("Show Configuration", vec![
                "show running-config", "show startup-config", "show interfaces",
                "show ip interface brief", "show ip route", "show protocols",
            ]),
            ("Show Layer 2", vec![
                "show vlan brief", "show mac address-table", "show spanning-tree",
                "show etherchannel summary", "show cdp neighbors", "show cdp neighbors detail",
                "show lldp neighbors", "show lldp neighbors detail", "show arp",
            ]),
            ("Show Layer 3/Routing", vec![
                "show ip protocols", "show ip ospf neighbor", "show ip ospf interface",
                "show bgp summary", "show bgp all", "show ip nat translations",
                "show ip nat statistics",
            ]),
            ("Show Security", vec![
                "show access-lists", "show crypto isakmp sa", "show crypto ipsec sa",
                "show port-security",
            ]),
            ("Show System/Hardware", vec![
                "show environment", "show power inline", "show processes cpu", "show memory",
                "show logging", "show controllers", "show tech-support", "show diag",
            ]),
        ]),
        VendorFamily::Juniper => CommandRegistry::new(vec![
            ("Operational", vec![
                "configure", "show interfaces terse", "show interfaces extensive", "show route",
                "show route summary", "show configuration", "request system reboot",
                "request system halt", "monitor traffic", "ping", "traceroute",
                "clear interface statistics",
            ]),
            ("Show System", vec![
                "show version", "show system uptime", "show system storage",
                "show system processes", "show chassis hardware", "show chassis routing-engine",
                "show chassis alarms", "show chassis environment",
            ]),
            ("Show Routing/Proto", vec![
                "show arp", "show lldp neighbors", "show ospf neighbor", "show ospf interface",
                "show bgp summary", "show bgp neighbor", "show route protocol ospf",
                "show route protocol bgp",
            ]),
            ("Show Security", vec![
                "show security policies", "show security zones", "show security flow session",
                "show security nat source rule",
            ]),
            ("Logs", vec!["show log messages", "show cli history", "clear log messages"]),
            ("Configuration", vec![
                "edit", "set interfaces", "set security zones", "set routing-options static route",
                "set system host-name", "delete", "commit", "commit check", "rollback", "show",
                "show | compare", "run", "up", "top", "exit",
            ]),
        ]),
        VendorFamily::Fortinet => CommandRegistry::new(vec![
            ("Execute", vec![
                "execute ping", "execute ssh", "execute telnet", "execute reboot",
                "execute ping-options", "execute factoryreset", "execute backup config",
            ]),
            ("Get System", vec![
                "get system status", "get system performance status", "get system interface",
                "get system arp", "get hardware status", "get hardware cpu", "get hardware memory",
            ]),
            ("Get Router", vec![
                "get router info routing-table all", "get router info ospf neighbor",
                "get router info bgp summary", "get router info kernel",
            ]),
            ("Diagnose", vec![
                "diagnose sys session list", "diagnose sys top", "diagnose hardware deviceinfo nic",
                "diagnose debug enable", "diagnose debug flow trace",
            ]),
            ("Show / Config", vec![
                "show firewall policy", "show system dns", "show vpn ipsec tunnel summary",
                "config system interface", "config firewall policy", "config router static",
                "config router ospf", "show full-configuration", "show router static",
            ]),
            ("Object Editing", vec![
                "edit", "set ip", "set status", "set alias", "set zone", "set srcintf",
                "set dstintf", "set action", "set service", "set dst", "set gateway",
                "set device", "delete", "next", "end",
            ]),
        ]),
        VendorFamily::PaloAlto => CommandRegistry::new(vec![
            ("Operational", vec![
                "show system info", "show system resources", "show system statistics",
                "show system state", "request system restart", "request shutdown", "ping",
                "test security-policy-match", "debug dataplane packet-diag",
            ]),
            ("Show Network", vec![
                "show interface all", "show interface logical", "show interface hardware",
                "show arp all", "show routing route", "show high-availability all",
            ]),
            ("Show Session/User", vec![
                "show session all", "show session info", "show session meter", "show jobs all",
                "show admins", "show user ip-user-mapping all",
            ]),
            ("Show Config", vec![
                "show running security-policy", "show running nat-policy", "show counter global",
                "show config running", "show config candidate",
            ]),
            ("Configuration", vec![
                "configure", "set network interface", "set network zone", "set zone",
                "set rulebase security rules", "set deviceconfig system hostname",
                "set network virtual-router", "delete rulebase security rules", "commit",
                "exit", "load config from",
            ]),
        ]),
        VendorFamily::Cloud => CommandRegistry::new(vec![
            ("Show", vec!["show nsg rules", "show effective-routes", "show interfaces", "show arp"]),
        ]),
    };
}

/// Get the command registry of a vendor family.
pub fn registry_for(family: VendorFamily) -> &'static CommandRegistry {
    &REGISTRIES[&family]
}
