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

//! # Vendor Command Interpreters
//!
//! Every vendor family has one interpreter that implements [`CommandInterpreter`]. An interpreter
//! is an ordered table of [`Rule`]s together with the vendor-specific error messages. The shared
//! [`CommandInterpreter::interpret`] method echoes the prompt and the command, handles the help
//! command, and dispatches the line to the first matching rule.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::*;

use crate::{
    command::{dispatch, Dispatch, Exec, Rule},
    device::Device,
    prompt::render_prompt,
    registry::registry_for,
    types::{CliMode, DeviceId, VendorFamily},
};

mod cisco;
mod cloud;
mod fortinet;
mod juniper;
mod paloalto;
mod render;

pub use cisco::CiscoInterpreter;
pub use cloud::CloudInterpreter;
pub use fortinet::FortinetInterpreter;
pub use juniper::JuniperInterpreter;
pub use paloalto::PaloAltoInterpreter;

/// Interpreter of one vendor family.
pub trait CommandInterpreter: std::fmt::Debug + Sync {
    /// The family this interpreter handles.
    fn family(&self) -> VendorFamily;

    /// All modes a device of this family can be in.
    fn modes(&self) -> &'static [CliMode];

    /// The ordered command table.
    fn rules(&self) -> &'static [Rule];

    /// Message printed for a line that matches no rule.
    fn unknown(&self, device: &Device) -> &'static str;

    /// Message printed for a line that matches a rule only partially.
    fn incomplete(&self) -> &'static str;

    /// Interpret a command line on a device, and return the new device. The old device is left
    /// untouched. `devices` contains all devices of the lab, used for neighbor tables.
    fn interpret(&self, device: &Device, line: &str, devices: &BTreeMap<DeviceId, Device>) -> Device {
        let mut next = device.clone();
        let prompt = render_prompt(device);
        let line = line.trim();
        if line.is_empty() {
            next.log(prompt);
            return next;
        }
        next.log(format!("{prompt} {line}"));

        let tokens = line.split_whitespace().collect_vec();
        if matches!(tokens.as_slice(), ["?"] | ["help"]) {
            registry_for(self.family())
                .help_lines(device.vendor())
                .into_iter()
                .for_each(|l| next.log(l));
            return next;
        }

        let mut exec = Exec::new(next, devices);
        match dispatch(self.rules(), &mut exec, &tokens) {
            Dispatch::Done => {}
            Dispatch::Incomplete => exec.print(self.incomplete()),
            Dispatch::Unknown => {
                debug!("{}: unknown command {:?}", device.id(), line);
                let msg = self.unknown(&exec.device);
                exec.print(msg)
            }
        }
        exec.device
    }
}

static CISCO: CiscoInterpreter = CiscoInterpreter;
static JUNIPER: JuniperInterpreter = JuniperInterpreter;
static FORTINET: FortinetInterpreter = FortinetInterpreter;
static PALOALTO: PaloAltoInterpreter = PaloAltoInterpreter;
static CLOUD: CloudInterpreter = CloudInterpreter;

/// Get the interpreter of a vendor family.
pub fn interpreter_for(family: VendorFamily) -> &'static dyn CommandInterpreter {
    match family {
        VendorFamily::Cisco => &CISCO,
        VendorFamily::Juniper => &JUNIPER,
        VendorFamily::Fortinet => &FORTINET,
        VendorFamily::PaloAlto => &PALOALTO,
        VendorFamily::Cloud => &CLOUD,
    }
}

/// Run a nested command with a temporarily changed mode and an empty context stack (e.g. `do`
/// on IOS or `run` on Junos). The mode and the context are restored afterwards.
fn run_nested(
    exec: &mut Exec<'_>,
    rules: &[Rule],
    mode: CliMode,
    line: &str,
    incomplete: &str,
    unknown: &str,
) {
    let saved_mode = exec.device.mode;
    let saved_context = std::mem::take(&mut exec.device.context);
    exec.device.mode = mode;
    let tokens = line.split_whitespace().collect_vec();
    match dispatch(rules, exec, &tokens) {
        Dispatch::Done => {}
        Dispatch::Incomplete => exec.print(incomplete),
        Dispatch::Unknown => exec.print(unknown),
    }
    exec.device.mode = saved_mode;
    exec.device.context = saved_context;
}
