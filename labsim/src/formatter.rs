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

//! Module that introduces a formatter to display all types containing a `DeviceId`.

use itertools::Itertools;

use crate::{
    lab::{LabInstance, Topology},
    neighbors::Neighbor,
    simulation::{SimulationStep, StepOutcome},
    types::DeviceId,
};

/// Trait to format a type that contains device ids, using the hostnames of the lab.
pub trait LabFormatter<'a, 'n> {
    /// Type that is returned, which implements `std::fmt::Display`.
    type Formatter;

    /// Return a struct that can be formatted and displayed. Unknown devices are shown as `?`.
    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter;
}

impl<'a, 'n> LabFormatter<'a, 'n> for DeviceId {
    type Formatter = &'n str;

    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter {
        lab.device(self.as_str()).map(|d| d.name.as_str()).unwrap_or("?")
    }
}

impl<'a, 'n> LabFormatter<'a, 'n> for SimulationStep {
    type Formatter = String;

    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter {
        let tag = match self.outcome {
            StepOutcome::Success => "  OK   ",
            StepOutcome::Drop => " DROP  ",
            StepOutcome::Process => "PROCESS",
        };
        match self.detail.as_ref() {
            Some(detail) => format!(
                "[{}] {}: {} ({})",
                tag,
                self.device_id.fmt(lab),
                self.description,
                detail
            ),
            None => format!("[{}] {}: {}", tag, self.device_id.fmt(lab), self.description),
        }
    }
}

//
// Simulated path
//

impl<'a, 'n> LabFormatter<'a, 'n> for &'a [SimulationStep] {
    type Formatter = String;

    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter {
        self.iter().map(|s| s.fmt(lab)).join("\n")
    }
}

impl<'a, 'n> LabFormatter<'a, 'n> for Vec<SimulationStep> {
    type Formatter = String;

    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter {
        self.as_slice().fmt(lab)
    }
}

impl<'a, 'n> LabFormatter<'a, 'n> for Topology {
    type Formatter = String;

    fn fmt(&'a self, lab: &'n LabInstance) -> Self::Formatter {
        self.device_ids().map(|id| id.fmt(lab)).join(" -> ")
    }
}

impl<'a, 'n> LabFormatter<'a, 'n> for Neighbor {
    type Formatter = String;

    fn fmt(&'a self, _lab: &'n LabInstance) -> Self::Formatter {
        format!(
            "{} ({}) via {} -> {}",
            self.hostname, self.ip, self.local_interface, self.remote_interface
        )
    }
}
