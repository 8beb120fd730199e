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

//! # Packet Simulation
//!
//! The simulation walks the topology in order, starting at the source, and evaluates the
//! policies of every hop:
//!
//! - Firewalls let the packet pass if they have at least one allow rule. Otherwise, the implicit
//!   deny drops it.
//! - Cloud resources with rules behave like a network security group: the rules are ordered by
//!   priority (rules without priority come last, in list order), and the first allow rule that
//!   matches the protocol and port lets the packet pass. If no allow rule matches, the first
//!   matching deny rule (or the implicit deny) drops it.
//! - All other devices forward the packet.
//!
//! The walk stops at the first hop that drops the packet.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    device::{Device, Policy, PolicyAction},
    lab::LabInstance,
    types::{DeviceClass, DeviceId, LabError, Transport},
};

/// Application protocol of a simulated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// HTTP (tcp/80)
    Http,
    /// HTTPS (tcp/443)
    Https,
    /// SSH (tcp/22)
    Ssh,
    /// Telnet (tcp/23)
    Telnet,
    /// DNS (udp/53)
    Dns,
    /// ICMP echo
    Icmp,
}

impl Protocol {
    /// All known protocols.
    pub const ALL: [Protocol; 6] = [
        Protocol::Http,
        Protocol::Https,
        Protocol::Ssh,
        Protocol::Telnet,
        Protocol::Dns,
        Protocol::Icmp,
    ];

    /// Transport protocol of the flow.
    pub fn transport(&self) -> Transport {
        match self {
            Protocol::Http | Protocol::Https | Protocol::Ssh | Protocol::Telnet => Transport::Tcp,
            Protocol::Dns => Transport::Udp,
            Protocol::Icmp => Transport::Icmp,
        }
    }

    /// Destination port of the flow.
    pub fn port(&self) -> Option<u16> {
        match self {
            Protocol::Http => Some(80),
            Protocol::Https => Some(443),
            Protocol::Ssh => Some(22),
            Protocol::Telnet => Some(23),
            Protocol::Dns => Some(53),
            Protocol::Icmp => None,
        }
    }

    /// Selector string, e.g. `tcp/80`.
    pub fn selector(&self) -> String {
        match self.port() {
            Some(port) => format!("{}/{}", self.transport(), port),
            None => self.transport().to_string(),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Ssh => "SSH",
            Protocol::Telnet => "Telnet",
            Protocol::Dns => "DNS",
            Protocol::Icmp => "ICMP",
        })
    }
}

impl FromStr for Protocol {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            "ssh" => Ok(Protocol::Ssh),
            "telnet" => Ok(Protocol::Telnet),
            "dns" => Ok(Protocol::Dns),
            "icmp" | "ping" => Ok(Protocol::Icmp),
            _ => Err(LabError::UnspecifiedProtocol(s.to_string())),
        }
    }
}

/// What happened to the packet at a hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The packet was sent or forwarded.
    Success,
    /// The packet was dropped.
    Drop,
    /// The packet reached its destination and was processed.
    Process,
}

/// One step of a simulated packet path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationStep {
    /// Device of this step
    pub device_id: DeviceId,
    /// Outcome
    pub outcome: StepOutcome,
    /// Human readable description
    pub description: String,
    /// Name of the rule that decided the outcome, if any.
    pub detail: Option<String>,
}

impl SimulationStep {
    fn new(device: &Device, outcome: StepOutcome, description: String) -> Self {
        Self {
            device_id: device.id().clone(),
            outcome,
            description,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Simulate a packet from the source along the entire topology.
pub fn simulate(
    lab: &LabInstance,
    source: &str,
    protocol: Protocol,
) -> Result<Vec<SimulationStep>, LabError> {
    walk(lab, source, None, protocol)
}

/// Simulate a packet from the source towards a destination in the topology. The walk ends at the
/// destination, which processes the packet unless it drops it.
pub fn simulate_to(
    lab: &LabInstance,
    source: &str,
    destination: &str,
    protocol: Protocol,
) -> Result<Vec<SimulationStep>, LabError> {
    if destination == source || lab.topology().node(destination).is_none() {
        return Err(LabError::DeviceNotFound(DeviceId::from(destination)));
    }
    walk(lab, source, Some(destination), protocol)
}

fn walk(
    lab: &LabInstance,
    source: &str,
    destination: Option<&str>,
    protocol: Protocol,
) -> Result<Vec<SimulationStep>, LabError> {
    let src = lab.device(source)?;
    let src_ip = src
        .interfaces
        .values()
        .find(|i| i.up && i.is_addressed())
        .map(|i| i.ip.clone());
    let mut source_step = SimulationStep::new(
        src,
        StepOutcome::Success,
        format!("{} generates {} traffic ({})", src.name, protocol, protocol.selector()),
    );
    if let Some(ip) = src_ip {
        source_step = source_step.with_detail(format!("src {ip}"));
    }
    let mut steps = vec![source_step];

    for id in lab.topology().device_ids().filter(|id| id.as_str() != source) {
        let device = lab.device(id.as_str())?;
        let mut step = evaluate_hop(device, protocol);
        let dropped = step.outcome == StepOutcome::Drop;
        let reached = destination == Some(id.as_str());
        if reached && !dropped {
            step.outcome = StepOutcome::Process;
            step.description = format!("{} receives and processes the {} request", device.name, protocol);
        }
        trace!("{}: {:?}", id, step.outcome);
        steps.push(step);
        if dropped || reached {
            break;
        }
    }

    debug!(
        "Simulated {} from {}: {} steps, final outcome {:?}",
        protocol,
        source,
        steps.len(),
        steps.last().map(|s| s.outcome)
    );
    Ok(steps)
}

/// Evaluate a single hop.
fn evaluate_hop(device: &Device, protocol: Protocol) -> SimulationStep {
    match device.class {
        DeviceClass::Cloud if !device.policies.is_empty() => evaluate_nsg(device, protocol),
        DeviceClass::Firewall => evaluate_firewall(device),
        _ => forward(device),
    }
}

fn evaluate_firewall(device: &Device) -> SimulationStep {
    match device.policies.iter().find(|p| p.action == PolicyAction::Allow) {
        Some(p) => SimulationStep::new(
            device,
            StepOutcome::Success,
            format!(
                "{} permits the flow by policy {} ({} -> {})",
                device.name, p.name, p.from_zone, p.to_zone
            ),
        )
        .with_detail(&p.name),
        None => SimulationStep::new(
            device,
            StepOutcome::Drop,
            format!("{} drops the flow: no policy allows it (implicit deny)", device.name),
        )
        .with_detail("implicit-deny"),
    }
}

/// Rules in the order a network security group evaluates them.
pub fn nsg_order(policies: &[Policy]) -> Vec<&Policy> {
    policies
        .iter()
        .sorted_by_key(|p| (p.priority.is_none(), p.priority.unwrap_or_default()))
        .collect()
}

fn evaluate_nsg(device: &Device, protocol: Protocol) -> SimulationStep {
    let rules = nsg_order(&device.policies);
    let hit = |action: PolicyAction| {
        rules
            .iter()
            .find(|p| p.action == action && p.matches(protocol.transport(), protocol.port()))
    };
    if let Some(p) = hit(PolicyAction::Allow) {
        SimulationStep::new(
            device,
            StepOutcome::Success,
            format!(
                "{} allows {} by rule {} (priority {})",
                device.name,
                protocol.selector(),
                p.name,
                p.priority.map(|x| x.to_string()).unwrap_or_else(|| String::from("-"))
            ),
        )
        .with_detail(&p.name)
    } else if let Some(p) = hit(PolicyAction::Deny) {
        SimulationStep::new(
            device,
            StepOutcome::Drop,
            format!("{} denies {} by rule {}", device.name, protocol.selector(), p.name),
        )
        .with_detail(&p.name)
    } else {
        SimulationStep::new(
            device,
            StepOutcome::Drop,
            format!("{} denies {}: no rule matches (implicit deny)", device.name, protocol.selector()),
        )
        .with_detail("implicit-deny")
    }
}

fn forward(device: &Device) -> SimulationStep {
    let via = device
        .default_route()
        .map(|r| format!(" via {}", r.next_hop))
        .unwrap_or_default();
    let description = match device.class {
        DeviceClass::Router => format!("{} routes the packet (L3){}", device.name, via),
        DeviceClass::Switch if via.is_empty() => format!("{} switches the frame (L2)", device.name),
        DeviceClass::Switch => format!("{} switches the frame and routes it (L3){}", device.name, via),
        DeviceClass::AccessPoint => format!("{} bridges the frame (L2)", device.name),
        DeviceClass::Firewall | DeviceClass::Cloud => {
            format!("{} forwards the packet{}", device.name, via)
        }
    };
    SimulationStep::new(device, StepOutcome::Success, description)
}
