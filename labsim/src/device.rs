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

//! # Device Model
//!
//! A [`Device`] holds the persistent configuration of one simulated network element (interfaces,
//! routes, policies, VLANs), its console state (mode and context stack), the candidate
//! configuration of two-phase-commit vendors, and the console history.
//!
//! Devices are values. Every console command or GUI edit produces a new device that replaces the
//! old one in the [`crate::lab::LabInstance`].

use std::{
    collections::{BTreeMap, BTreeSet},
    net::Ipv4Addr,
};

use ipnet::{ipv4_mask_to_prefix, Ipv4Net};
use serde::{Deserialize, Serialize};

use crate::types::{
    CliMode, ContextFrame, DeviceClass, DeviceId, FrameKind, Transport, Vendor, VendorFamily,
};

fn default_up() -> bool {
    true
}

fn any() -> String {
    String::from("any")
}

/// Configuration of a single interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interface {
    /// IPv4 address, or the empty string if unassigned.
    #[serde(default)]
    pub ip: String,
    /// Netmask, either in dotted-decimal notation or as prefix length. Empty if unassigned.
    #[serde(default)]
    pub mask: String,
    /// Administrative state.
    #[serde(default = "default_up")]
    pub up: bool,
    /// Access VLAN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    /// Security zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Interface {
    fn default() -> Self {
        Self {
            ip: String::new(),
            mask: String::new(),
            up: true,
            vlan: None,
            zone: None,
            description: None,
        }
    }
}

impl Interface {
    /// Create an interface with an address.
    pub fn with_address(ip: impl Into<String>, mask: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            mask: mask.into(),
            ..Default::default()
        }
    }

    /// Assign an address. The mask may be given in any notation.
    pub fn set_address(&mut self, ip: impl Into<String>, mask: impl Into<String>) {
        self.ip = ip.into();
        self.mask = mask.into();
    }

    /// Assign an address from CIDR notation (`10.0.0.1/30`). If there is no prefix length, only
    /// the IP is changed.
    pub fn set_cidr(&mut self, cidr: &str) {
        match cidr.split_once('/') {
            Some((ip, len)) => self.set_address(ip, len),
            None => self.ip = cidr.to_string(),
        }
    }

    /// Remove the address.
    pub fn clear_address(&mut self) {
        self.ip.clear();
        self.mask.clear();
    }

    /// Set the administrative state (`no shutdown` / `shutdown`).
    pub fn set_up(&mut self, up: bool) {
        self.up = up;
    }

    /// Set or clear the security zone.
    pub fn set_zone(&mut self, zone: Option<String>) {
        self.zone = zone.filter(|z| !z.is_empty());
    }

    /// Set or clear the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.is_empty());
    }

    /// Parse the IPv4 address, if any.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ip.parse().ok()
    }

    /// Parse the netmask as prefix length. Accepts `255.255.255.0`, `/24` and `24`.
    pub fn prefix_len(&self) -> Option<u8> {
        parse_prefix_len(&self.mask)
    }

    /// The address together with its prefix length, if both are valid.
    pub fn net(&self) -> Option<Ipv4Net> {
        Ipv4Net::new(self.ipv4()?, self.prefix_len()?).ok()
    }

    /// The address in CIDR notation, or just the IP if the mask is not valid.
    pub fn cidr(&self) -> String {
        match self.net() {
            Some(net) => net.to_string(),
            None => self.ip.clone(),
        }
    }

    /// The dotted-decimal netmask, or the raw mask string if it cannot be parsed.
    pub fn dotted_mask(&self) -> String {
        match self.net() {
            Some(net) => net.netmask().to_string(),
            None => self.mask.clone(),
        }
    }

    /// Whether the interface has an address that can be used on the wire.
    pub fn is_addressed(&self) -> bool {
        self.ipv4().is_some()
    }
}

/// Parse a netmask given as dotted decimal or as (optionally `/`-prefixed) length.
pub fn parse_prefix_len(mask: &str) -> Option<u8> {
    let mask = mask.trim();
    if mask.contains('.') {
        ipv4_mask_to_prefix(mask.parse().ok()?).ok()
    } else {
        mask.trim_start_matches('/').parse().ok().filter(|l| *l <= 32)
    }
}

/// A static route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    /// Destination prefix in CIDR notation
    pub destination: String,
    /// Next-hop address
    pub next_hop: String,
    /// Egress interface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

impl Route {
    /// Create a new route without an explicit egress interface.
    pub fn new(destination: impl Into<String>, next_hop: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            next_hop: next_hop.into(),
            interface: None,
        }
    }

    /// Whether this is the default route.
    pub fn is_default(&self) -> bool {
        self.destination == "0.0.0.0/0"
    }
}

/// Action of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    /// Let matching traffic pass
    Allow,
    /// Drop matching traffic
    Deny,
}

impl std::fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PolicyAction::Allow => "allow",
            PolicyAction::Deny => "deny",
        })
    }
}

/// A firewall or network security group rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Policy {
    /// Numeric id
    pub id: u32,
    /// Rule name
    pub name: String,
    /// Source zone or interface
    pub from_zone: String,
    /// Destination zone or interface
    pub to_zone: String,
    /// What happens with matching traffic
    pub action: PolicyAction,
    /// Priority (lower is evaluated first). Rules without priority keep their list order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Protocol selector. `None` matches everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Transport>,
    /// Destination port selector. `None` matches everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<u16>,
    /// Source address selector
    #[serde(default = "any")]
    pub src_addr: String,
    /// Destination address selector
    #[serde(default = "any")]
    pub dst_addr: String,
}

impl Policy {
    /// Create a new policy that matches all traffic between the two zones.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        from_zone: impl Into<String>,
        to_zone: impl Into<String>,
        action: PolicyAction,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            from_zone: from_zone.into(),
            to_zone: to_zone.into(),
            action,
            priority: None,
            protocol: None,
            dst_port: None,
            src_addr: any(),
            dst_addr: any(),
        }
    }

    /// Check if the protocol and port selectors of the rule match the flow. ICMP flows have no
    /// port and only match rules without port selector.
    pub fn matches(&self, protocol: Transport, port: Option<u16>) -> bool {
        let proto_ok = self.protocol.map(|p| p == protocol).unwrap_or(true);
        let port_ok = match (self.dst_port, port) {
            (None, _) => true,
            (Some(a), Some(b)) => a == b,
            (Some(_), None) => false,
        };
        proto_ok && port_ok
    }

    /// Human-readable service column (`tcp/80`, `any`).
    pub fn service(&self) -> String {
        match (self.protocol, self.dst_port) {
            (None, None) => String::from("any"),
            (Some(p), None) => p.to_string(),
            (None, Some(port)) => format!("any/{port}"),
            (Some(p), Some(port)) => format!("{p}/{port}"),
        }
    }
}

/// Staged changes of a two-phase-commit device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Full records of every interface touched while editing.
    #[serde(default)]
    pub interfaces: BTreeMap<String, Interface>,
    /// Interfaces deleted while editing.
    #[serde(default)]
    pub removed: BTreeSet<String>,
    /// Replacement of the static routes, if they were touched.
    #[serde(default)]
    pub routes: Option<Vec<Route>>,
    /// New hostname, if it was changed.
    #[serde(default)]
    pub hostname: Option<String>,
}

impl CandidateConfig {
    /// Whether there is anything to commit.
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
            && self.removed.is_empty()
            && self.routes.is_none()
            && self.hostname.is_none()
    }
}

/// One simulated network device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    /// Hostname
    pub name: String,
    /// Device class
    #[serde(rename = "type")]
    pub class: DeviceClass,
    vendor: Vendor,
    /// Interfaces, ordered by name
    #[serde(default)]
    pub interfaces: BTreeMap<String, Interface>,
    /// Static routes
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Firewall or NSG policies
    #[serde(default)]
    pub policies: Vec<Policy>,
    /// VLAN database
    #[serde(default)]
    pub vlans: BTreeMap<u16, String>,
    /// Console mode
    #[serde(default)]
    pub mode: CliMode,
    /// Console context stack, innermost frame last.
    #[serde(default)]
    pub context: Vec<ContextFrame>,
    /// Candidate configuration (only used by two-phase-commit vendors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidateConfig>,
    /// Console scrollback
    #[serde(default)]
    pub history: Vec<String>,
}

impl Device {
    /// Create a new device without any configuration.
    pub fn new(
        id: impl Into<DeviceId>,
        name: impl Into<String>,
        class: DeviceClass,
        vendor: Vendor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class,
            vendor,
            interfaces: BTreeMap::new(),
            routes: Vec::new(),
            policies: Vec::new(),
            vlans: BTreeMap::new(),
            mode: CliMode::User,
            context: Vec::new(),
            candidate: None,
            history: Vec::new(),
        }
    }

    /// Add an interface (builder style).
    pub fn with_interface(mut self, name: impl Into<String>, iface: Interface) -> Self {
        self.interfaces.insert(name.into(), iface);
        self
    }

    /// Add a route (builder style).
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Add a policy (builder style).
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }

    /// Id of the device
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Vendor of the device
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Command family of the device
    pub fn family(&self) -> VendorFamily {
        self.vendor.family()
    }

    /// Append text to the history. Multi-line text is split into one entry per line.
    pub fn log(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.history.push(String::new());
        } else {
            self.history.extend(text.lines().map(String::from));
        }
    }

    /// Innermost frame of the context stack.
    pub fn frame(&self) -> Option<&ContextFrame> {
        self.context.last()
    }

    /// Name of the innermost frame of the given kind.
    pub fn frame_name(&self, kind: FrameKind) -> Option<&str> {
        self.context
            .iter()
            .rev()
            .find(|f| f.kind == kind)
            .map(|f| f.name.as_str())
    }

    /// Get a mutable reference to an interface, creating an unconfigured one if it is missing.
    pub fn interface_entry(&mut self, name: &str) -> &mut Interface {
        self.interfaces.entry(name.to_string()).or_default()
    }

    /// The default route, if any.
    pub fn default_route(&self) -> Option<&Route> {
        self.routes.iter().find(|r| r.is_default())
    }

    /// Whether there are uncommitted changes.
    pub fn has_pending_changes(&self) -> bool {
        let Some(c) = self.candidate.as_ref() else {
            return false;
        };
        c.interfaces
            .iter()
            .any(|(name, i)| self.interfaces.get(name) != Some(i))
            || c.removed.iter().any(|r| self.interfaces.contains_key(r))
            || c.routes.as_ref().map(|r| *r != self.routes).unwrap_or(false)
            || c.hostname.as_ref().map(|h| *h != self.name).unwrap_or(false)
    }

    /// The interface as it would look after a commit.
    pub fn staged_interface(&self, name: &str) -> Option<&Interface> {
        if let Some(c) = self.candidate.as_ref() {
            if c.removed.contains(name) {
                return None;
            }
            if let Some(i) = c.interfaces.get(name) {
                return Some(i);
            }
        }
        self.interfaces.get(name)
    }

    /// All interfaces as they would look after a commit.
    pub fn staged_interfaces(&self) -> BTreeMap<String, Interface> {
        let mut result = self.interfaces.clone();
        if let Some(c) = self.candidate.as_ref() {
            c.removed.iter().for_each(|r| {
                result.remove(r);
            });
            result.extend(c.interfaces.clone());
        }
        result
    }

    /// The static routes as they would look after a commit.
    pub fn staged_routes(&self) -> &[Route] {
        self.candidate
            .as_ref()
            .and_then(|c| c.routes.as_deref())
            .unwrap_or(&self.routes)
    }

    /// The hostname as it would look after a commit.
    pub fn staged_hostname(&self) -> &str {
        self.candidate
            .as_ref()
            .and_then(|c| c.hostname.as_deref())
            .unwrap_or(&self.name)
    }

    /// Get the candidate record of an interface for editing. The record starts as a copy of the
    /// live interface, or as a new unconfigured interface.
    pub fn stage_interface(&mut self, name: &str) -> &mut Interface {
        let live = self.staged_interface(name).cloned().unwrap_or_default();
        let candidate = self.candidate.get_or_insert_with(Default::default);
        candidate.removed.remove(name);
        candidate.interfaces.entry(name.to_string()).or_insert(live)
    }

    /// Stage the removal of an interface.
    pub fn stage_removal(&mut self, name: &str) {
        let candidate = self.candidate.get_or_insert_with(Default::default);
        candidate.interfaces.remove(name);
        candidate.removed.insert(name.to_string());
    }

    /// Get the candidate route list for editing.
    pub fn stage_routes(&mut self) -> &mut Vec<Route> {
        let live = self.routes.clone();
        let candidate = self.candidate.get_or_insert_with(Default::default);
        candidate.routes.get_or_insert(live)
    }

    /// Stage a new hostname.
    pub fn stage_hostname(&mut self, name: impl Into<String>) {
        self.candidate.get_or_insert_with(Default::default).hostname = Some(name.into());
    }

    /// Merge the candidate configuration into the live configuration and clear it. Returns
    /// `false` if there was nothing to commit.
    pub fn commit(&mut self) -> bool {
        if !self.has_pending_changes() {
            self.candidate = None;
            return false;
        }
        let Some(candidate) = self.candidate.take() else {
            return false;
        };
        for removed in candidate.removed {
            self.interfaces.remove(&removed);
        }
        self.interfaces.extend(candidate.interfaces);
        if let Some(routes) = candidate.routes {
            self.routes = routes;
        }
        if let Some(name) = candidate.hostname {
            self.name = name;
        }
        true
    }

    /// Drop all uncommitted changes.
    pub fn discard(&mut self) {
        self.candidate = None;
    }

    /// Describe the uncommitted changes, one line per change.
    pub fn pending_diff(&self) -> Vec<String> {
        let Some(c) = self.candidate.as_ref() else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if let Some(h) = c.hostname.as_ref() {
            lines.push("[edit system]".to_string());
            lines.push(format!("-  host-name {};", self.name));
            lines.push(format!("+  host-name {};", h));
        }
        for r in c.removed.iter() {
            lines.push("[edit interfaces]".to_string());
            lines.push(format!("-  {r} {{ ... }}"));
        }
        for (name, new) in c.interfaces.iter() {
            let old = self.interfaces.get(name);
            if old == Some(new) {
                continue;
            }
            lines.push(format!("[edit interfaces {name}]"));
            let old_cidr = old.map(|i| i.cidr()).unwrap_or_default();
            if old_cidr != new.cidr() {
                if !old_cidr.is_empty() {
                    lines.push(format!("-  address {old_cidr};"));
                }
                if !new.ip.is_empty() {
                    lines.push(format!("+  address {};", new.cidr()));
                }
            }
            if old.map(|i| i.up) != Some(new.up) {
                lines.push(format!("{}  disable;", if new.up { "-" } else { "+" }));
            }
            if old.and_then(|i| i.description.as_ref()) != new.description.as_ref() {
                if let Some(d) = new.description.as_ref() {
                    lines.push(format!("+  description \"{d}\";"));
                }
            }
            if old.and_then(|i| i.zone.as_ref()) != new.zone.as_ref() {
                if let Some(z) = new.zone.as_ref() {
                    lines.push(format!("+  security-zone {z};"));
                }
            }
        }
        if let Some(routes) = c.routes.as_ref() {
            for r in self.routes.iter().filter(|r| !routes.contains(r)) {
                lines.push("[edit routing-options static]".to_string());
                lines.push(format!("-  route {} next-hop {};", r.destination, r.next_hop));
            }
            for r in routes.iter().filter(|r| !self.routes.contains(r)) {
                lines.push("[edit routing-options static]".to_string());
                lines.push(format!("+  route {} next-hop {};", r.destination, r.next_hop));
            }
        }
        lines
    }
}
