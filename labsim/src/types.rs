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

//! Module containing the basic identifiers, tags, and error types used throughout the lab.

use std::{borrow::Borrow, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a device inside a lab instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a new device id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Class of a device, which also determines its icon on the topology and how the packet
/// simulation treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Layer 3 router
    Router,
    /// Layer 2/3 switch
    Switch,
    /// Stateful firewall
    Firewall,
    /// Wireless access point or end host
    AccessPoint,
    /// Cloud resource, e.g. an upstream provider or a network security group.
    Cloud,
}

impl Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DeviceClass::Router => "Router",
            DeviceClass::Switch => "Switch",
            DeviceClass::Firewall => "Firewall",
            DeviceClass::AccessPoint => "AccessPoint",
            DeviceClass::Cloud => "Cloud",
        })
    }
}

/// Vendor of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Vendor {
    /// Cisco IOS
    Cisco,
    /// Aruba (uses an IOS-like CLI)
    Aruba,
    /// Extreme Networks (uses an IOS-like CLI)
    Extreme,
    /// Juniper Junos
    Juniper,
    /// Fortinet FortiOS
    Fortinet,
    /// Palo Alto PAN-OS
    #[serde(rename = "Palo Alto")]
    PaloAlto,
    /// Generic internet or cloud provider
    Internet,
}

impl Vendor {
    /// The command family used to interpret the CLI of this vendor.
    pub fn family(&self) -> VendorFamily {
        match self {
            Vendor::Cisco | Vendor::Aruba | Vendor::Extreme => VendorFamily::Cisco,
            Vendor::Juniper => VendorFamily::Juniper,
            Vendor::Fortinet => VendorFamily::Fortinet,
            Vendor::PaloAlto => VendorFamily::PaloAlto,
            Vendor::Internet => VendorFamily::Cloud,
        }
    }

    /// Lines printed on the console when a device of this vendor boots.
    pub fn boot_banner(&self) -> &'static [&'static str] {
        match self.family() {
            VendorFamily::Cisco => &["Cisco IOS Software, Version 17.3.4", "Press RETURN to get started!"],
            VendorFamily::Juniper => &["Junos OS 21.4R1.12", "root@device% cli", "{master:0}"],
            VendorFamily::Fortinet => &["FortiGate-VM64 v7.2.0", "Login: admin", "Password:", "Welcome!"],
            VendorFamily::PaloAlto => &["PA-VM", "Welcome to PanOS", "admin@PA-VM>"],
            VendorFamily::Cloud => &[],
        }
    }
}

impl Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Vendor::Cisco => "Cisco",
            Vendor::Aruba => "Aruba",
            Vendor::Extreme => "Extreme",
            Vendor::Juniper => "Juniper",
            Vendor::Fortinet => "Fortinet",
            Vendor::PaloAlto => "Palo Alto",
            Vendor::Internet => "Internet",
        })
    }
}

/// Family of command line dialects. Every family has exactly one interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VendorFamily {
    /// IOS-style CLI (Cisco, Aruba, Extreme)
    Cisco,
    /// Junos-style CLI with candidate configuration and commit
    Juniper,
    /// FortiOS-style CLI with nested `config` / `edit` sections
    Fortinet,
    /// PAN-OS-style CLI with flat `set` commands
    PaloAlto,
    /// Read-only console of a cloud resource
    Cloud,
}

/// Mode of the simulated console. Each family only uses a subset of all modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CliMode {
    /// Unprivileged (or operational) mode
    #[default]
    User,
    /// Privileged exec mode
    Privileged,
    /// Global configuration mode
    Config,
    /// Interface configuration mode
    ConfigInterface,
    /// Routing protocol configuration mode
    ConfigRouter,
    /// VLAN configuration mode
    ConfigVlan,
    /// Candidate configuration editing mode
    Edit,
}

/// Kind of object a context frame refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    /// An interface (or port)
    Interface,
    /// A security zone
    Zone,
    /// A firewall policy object
    PolicyObject,
    /// A routing protocol instance
    RouteProtocol,
    /// A static route entry
    StaticRoute,
    /// A VLAN
    Vlan,
    /// A configuration section (e.g. `config system interface`)
    Section,
}

/// One level of nesting on the console context stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextFrame {
    /// What kind of object is currently edited
    pub kind: FrameKind,
    /// Name of the object (or the section path)
    pub name: String,
}

impl ContextFrame {
    /// Create a new context frame.
    pub fn new(kind: FrameKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Transport protocol selector of a policy or a simulated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// TCP
    Tcp,
    /// UDP
    Udp,
    /// ICMP
    Icmp,
}

impl Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Transport::Tcp => "tcp",
            Transport::Udp => "udp",
            Transport::Icmp => "icmp",
        })
    }
}

impl FromStr for Transport {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "icmp" => Ok(Self::Icmp),
            _ => Err(LabError::UnspecifiedProtocol(s.to_string())),
        }
    }
}

/// Errors that can occur when operating on a lab instance.
#[derive(Error, Debug)]
pub enum LabError {
    /// The device does not exist in the lab.
    #[error("Device was not found in the lab: {0}")]
    DeviceNotFound(DeviceId),
    /// A topology node references a device that does not exist.
    #[error("Topology node references an unknown device: {0}")]
    DanglingTopologyNode(DeviceId),
    /// Two devices share the same id.
    #[error("Device id is used twice: {0}")]
    DuplicateDevice(DeviceId),
    /// A lab with the given id does not exist in the catalog.
    #[error("Lab was not found in the catalog: {0}")]
    LabNotFound(String),
    /// The protocol tag of a simulation is not known.
    #[error("Protocol is not specified: {0:?}")]
    UnspecifiedProtocol(String),
    /// The lab definition could not be parsed.
    #[error("Invalid lab definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}
