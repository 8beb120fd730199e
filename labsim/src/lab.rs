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

//! # Lab Instance
//!
//! A [`LabInstance`] is the unit a user launches: a set of devices, an ordered [`Topology`], and
//! the static texts shown next to the consoles. The instance is the authoritative store of all
//! devices. Every console command or GUI edit replaces exactly one device.

use std::collections::{BTreeMap, HashSet};

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    device::Device,
    gui::{apply_gui_edit, GuiEdit},
    interpreter::interpreter_for,
    neighbors::{find_neighbors, NeighborKind},
    prompt::render_prompt,
    registry::registry_for,
    simulation::{simulate, simulate_to, Protocol, SimulationStep},
    types::{DeviceClass, DeviceId, LabError},
};

/// Difficulty level of a lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Beginner
    Beginner,
    /// Intermediate
    Intermediate,
    /// Advanced
    Advanced,
    /// Expert
    Expert,
}

/// One node of the topology diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    /// Device shown by this node
    pub device_id: DeviceId,
    /// Label in the diagram
    pub label: String,
    /// Icon in the diagram
    pub icon: DeviceClass,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Ordered sequence of nodes. The order is the default path of a packet through the lab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology {
    nodes: Vec<TopologyNode>,
}

impl Topology {
    /// Create a topology from its nodes.
    pub fn new(nodes: Vec<TopologyNode>) -> Self {
        Self { nodes }
    }

    /// The nodes in order.
    pub fn nodes(&self) -> &[TopologyNode] {
        &self.nodes
    }

    /// Iterate over the device ids in order.
    pub fn device_ids(&self) -> impl Iterator<Item = &DeviceId> {
        self.nodes.iter().map(|n| &n.device_id)
    }

    /// Get the node of a device.
    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.device_id.as_str() == id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the topology is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Static texts shown in the documentation view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    /// Dump of the initial configuration
    pub initial_config: String,
    /// Narrative of the expected packet flow
    pub packet_flow: String,
}

/// Raw definition of a lab, as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabDefinition {
    /// Lab id
    pub id: String,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Vendor label (e.g. `Hybrid`)
    pub vendor: String,
    /// All devices of the lab
    pub devices: Vec<Device>,
    /// Topology nodes
    pub topology: Vec<TopologyNode>,
    /// Checklist for the student
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Static documentation
    #[serde(default)]
    pub documentation: Documentation,
}

/// A running lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LabDefinition", into = "LabDefinition")]
pub struct LabInstance {
    id: String,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Vendor label
    pub vendor_label: String,
    devices: BTreeMap<DeviceId, Device>,
    topology: Topology,
    /// Checklist for the student
    pub objectives: Vec<String>,
    /// Static documentation
    pub documentation: Documentation,
}

impl TryFrom<LabDefinition> for LabInstance {
    type Error = LabError;

    fn try_from(def: LabDefinition) -> Result<Self, Self::Error> {
        let mut devices = BTreeMap::new();
        for mut device in def.devices {
            if device.history.is_empty() {
                device.history.extend(device.vendor().boot_banner().iter().map(|l| l.to_string()));
                device.history.push(format!("Welcome to {} ({})", device.name, device.vendor()));
            }
            let id = device.id().clone();
            if devices.insert(id.clone(), device).is_some() {
                return Err(LabError::DuplicateDevice(id));
            }
        }
        let mut seen = HashSet::new();
        for node in def.topology.iter() {
            if !devices.contains_key(&node.device_id) || !seen.insert(&node.device_id) {
                return Err(LabError::DanglingTopologyNode(node.device_id.clone()));
            }
        }
        debug!(
            "Loaded lab {} with {} devices and {} topology nodes",
            def.id,
            devices.len(),
            def.topology.len()
        );
        Ok(Self {
            id: def.id,
            title: def.title,
            description: def.description,
            difficulty: def.difficulty,
            vendor_label: def.vendor,
            devices,
            topology: Topology::new(def.topology),
            objectives: def.objectives,
            documentation: def.documentation,
        })
    }
}

impl From<LabInstance> for LabDefinition {
    fn from(lab: LabInstance) -> Self {
        let order: Vec<DeviceId> = lab.topology.device_ids().cloned().collect();
        let mut devices = lab.devices;
        let mut ordered: Vec<Device> = order.iter().filter_map(|id| devices.remove(id)).collect();
        ordered.extend(devices.into_values());
        Self {
            id: lab.id,
            title: lab.title,
            description: lab.description,
            difficulty: lab.difficulty,
            vendor: lab.vendor_label,
            devices: ordered,
            topology: lab.topology.nodes,
            objectives: lab.objectives,
            documentation: lab.documentation,
        }
    }
}

impl LabInstance {
    /// Lab id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All devices, ordered by id.
    pub fn devices(&self) -> &BTreeMap<DeviceId, Device> {
        &self.devices
    }

    /// The topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Get a device.
    pub fn device(&self, id: &str) -> Result<&Device, LabError> {
        self.devices
            .get(id)
            .ok_or_else(|| LabError::DeviceNotFound(DeviceId::from(id)))
    }

    /// Replace a device with a new value. The device must already exist.
    fn replace(&mut self, device: Device) -> Result<&Device, LabError> {
        let id = device.id().clone();
        match self.devices.get_mut(&id) {
            Some(slot) => {
                *slot = device;
                Ok(slot)
            }
            None => Err(LabError::DeviceNotFound(id)),
        }
    }

    /// Send a command line to the console of a device.
    pub fn execute(&mut self, id: &str, line: &str) -> Result<&Device, LabError> {
        let device = self.device(id)?;
        debug!("{}: {:?}", device.id(), line);
        let next = interpreter_for(device.family()).interpret(device, line, &self.devices);
        self.replace(next)
    }

    /// Apply an edit from the web GUI of a device.
    pub fn apply_gui_edit(&mut self, id: &str, edit: &GuiEdit) -> Result<&Device, LabError> {
        let device = self.device(id)?;
        debug!("{}: GUI edit {:?}", device.id(), edit);
        let next = apply_gui_edit(device, edit);
        self.replace(next)
    }

    /// Complete the last word of a partial command line.
    pub fn complete(&self, id: &str, partial: &str) -> Result<String, LabError> {
        Ok(registry_for(self.device(id)?.family()).complete(partial))
    }

    /// The current prompt of a device.
    pub fn prompt(&self, id: &str) -> Result<String, LabError> {
        Ok(render_prompt(self.device(id)?))
    }

    /// Neighbor table of a device.
    pub fn neighbors(&self, id: &str, kind: NeighborKind) -> Result<Vec<String>, LabError> {
        Ok(find_neighbors(self.device(id)?, &self.devices, kind))
    }

    /// Simulate a packet from the source along the whole topology.
    pub fn simulate(
        &self,
        source: &str,
        protocol: Protocol,
    ) -> Result<Vec<SimulationStep>, LabError> {
        simulate(self, source, protocol)
    }

    /// Simulate a packet from the source to the destination.
    pub fn simulate_to(
        &self,
        source: &str,
        destination: &str,
        protocol: Protocol,
    ) -> Result<Vec<SimulationStep>, LabError> {
        simulate_to(self, source, destination, protocol)
    }

    /// Mutable access to a device, used to prepare scenarios.
    pub fn device_mut(&mut self, id: &str) -> Result<&mut Device, LabError> {
        self.devices
            .get_mut(id)
            .ok_or_else(|| LabError::DeviceNotFound(DeviceId::from(id)))
    }
}
