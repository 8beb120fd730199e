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

//! Edits coming from the web GUI of a device.
//!
//! GUI edits use the same [`Interface`](crate::device::Interface) setters as the console, so that
//! changing a field in the GUI leaves the device in the same state as the equivalent command.
//! Every edit appends one line to the console history. On two-phase-commit devices, edits are
//! staged into the candidate configuration.

use serde::{Deserialize, Serialize};

use crate::{
    device::{Device, Interface},
    types::VendorFamily,
};

/// A single field edit in the GUI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuiEdit {
    /// Change the IP address of an interface.
    SetIp {
        /// Interface name
        interface: String,
        /// New address
        ip: String,
    },
    /// Change the netmask of an interface.
    SetMask {
        /// Interface name
        interface: String,
        /// New mask
        mask: String,
    },
    /// Set the administrative state of an interface.
    SetUp {
        /// Interface name
        interface: String,
        /// New state
        up: bool,
    },
    /// Toggle the administrative state of an interface.
    ToggleUp {
        /// Interface name
        interface: String,
    },
    /// Set or clear the security zone of an interface.
    SetZone {
        /// Interface name
        interface: String,
        /// New zone
        zone: Option<String>,
    },
    /// Set or clear the description of an interface.
    SetDescription {
        /// Interface name
        interface: String,
        /// New description
        description: Option<String>,
    },
    /// Commit the staged changes (two-phase-commit devices only).
    Commit,
}

impl GuiEdit {
    fn interface(&self) -> Option<&str> {
        match self {
            GuiEdit::SetIp { interface, .. }
            | GuiEdit::SetMask { interface, .. }
            | GuiEdit::SetUp { interface, .. }
            | GuiEdit::ToggleUp { interface }
            | GuiEdit::SetZone { interface, .. }
            | GuiEdit::SetDescription { interface, .. } => Some(interface),
            GuiEdit::Commit => None,
        }
    }
}

/// Apply a GUI edit and return the new device.
pub fn apply_gui_edit(device: &Device, edit: &GuiEdit) -> Device {
    let mut next = device.clone();
    let staged = next.family() == VendorFamily::Juniper;

    let Some(name) = edit.interface() else {
        let msg = if next.commit() {
            "GUI: Commit Successful"
        } else {
            "GUI: No changes to commit"
        };
        next.log(msg);
        return next;
    };

    let exists = if staged {
        next.staged_interface(name).is_some()
    } else {
        next.interfaces.contains_key(name)
    };
    if !exists {
        next.log(format!("GUI: Interface {name} not found"));
        return next;
    }

    let iface: &mut Interface = if staged {
        next.stage_interface(name)
    } else {
        next.interface_entry(name)
    };

    let msg = match edit {
        GuiEdit::SetIp { ip, .. } => {
            iface.ip = ip.clone();
            format!("GUI: Changed {name} IP to {ip}")
        }
        GuiEdit::SetMask { mask, .. } => {
            iface.mask = mask.clone();
            format!("GUI: Changed {name} mask to {mask}")
        }
        GuiEdit::SetUp { up, .. } => {
            iface.set_up(*up);
            format!("GUI: {} {name}", if *up { "Enabled" } else { "Disabled" })
        }
        GuiEdit::ToggleUp { .. } => {
            let up = !iface.up;
            iface.set_up(up);
            format!("GUI: {} {name}", if up { "Enabled" } else { "Disabled" })
        }
        GuiEdit::SetZone { zone, .. } => {
            iface.set_zone(zone.clone());
            match iface.zone.as_ref() {
                Some(z) => format!("GUI: Set {name} zone to {z}"),
                None => format!("GUI: Cleared {name} zone"),
            }
        }
        GuiEdit::SetDescription { description, .. } => {
            iface.set_description(description.clone());
            format!("GUI: Changed {name} description")
        }
        GuiEdit::Commit => return next,
    };
    next.log(msg);
    next
}
