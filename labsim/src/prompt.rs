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

//! Rendering of the console prompt.

use itertools::Itertools;

use crate::{
    device::Device,
    types::{CliMode, ContextFrame, FrameKind, VendorFamily},
};

/// Render the prompt of a device. The prompt depends only on the vendor family, the hostname,
/// the mode, and the context stack. Juniper devices in edit mode have a two-line prompt.
pub fn render_prompt(device: &Device) -> String {
    let h = &device.name;
    match device.family() {
        VendorFamily::Cisco => match device.mode {
            CliMode::User => format!("{h}>"),
            CliMode::Privileged => format!("{h}#"),
            CliMode::Config => format!("{h}(config)#"),
            CliMode::ConfigInterface => format!("{h}(config-if)#"),
            CliMode::ConfigRouter => format!("{h}(config-router)#"),
            CliMode::ConfigVlan => format!("{h}(config-vlan)#"),
            CliMode::Edit => format!("{h}>"),
        },
        VendorFamily::Juniper => match device.mode {
            CliMode::Edit => format!("{}\nroot@{h}#", edit_banner(&device.context)),
            _ => format!("root@{h}>"),
        },
        VendorFamily::PaloAlto => match device.mode {
            CliMode::Config => format!("admin@{h}#"),
            _ => format!("admin@{h}>"),
        },
        VendorFamily::Fortinet => match device.frame() {
            Some(frame) => format!("{h} ({}) #", fortinet_label(frame)),
            None => format!("{h} #"),
        },
        VendorFamily::Cloud => format!("{h}>"),
    }
}

/// The `[edit ...]` banner of Junos, showing the hierarchy level.
fn edit_banner(context: &[ContextFrame]) -> String {
    if context.is_empty() {
        return String::from("[edit]");
    }
    let path = context
        .iter()
        .map(|f| match f.kind {
            FrameKind::Interface => format!("interfaces {}", f.name),
            FrameKind::Zone => format!("security zones security-zone {}", f.name),
            FrameKind::RouteProtocol => format!("protocols {}", f.name),
            FrameKind::StaticRoute => format!("routing-options static route {}", f.name),
            FrameKind::Vlan => format!("vlans {}", f.name),
            FrameKind::PolicyObject => format!("security policies policy {}", f.name),
            FrameKind::Section => f.name.clone(),
        })
        .join(" ");
    format!("[edit {path}]")
}

/// FortiOS shows the last word of a section, or the name of the edited object.
fn fortinet_label(frame: &ContextFrame) -> &str {
    match frame.kind {
        FrameKind::Section => frame.name.rsplit(' ').next().unwrap_or(&frame.name),
        _ => &frame.name,
    }
}
