// NetLab: Interactive console for multi-vendor networking labs
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

//! # Lab Session
//!
//! A [`LabSession`] is one running lab as seen by the console: the [`LabInstance`], the device
//! whose console is currently open, and how much of each console history was already shown.
//! Lines starting with `:` are [`MetaCommand`]s that act on the session instead of being sent to
//! the device.

use std::{collections::BTreeMap, str::FromStr, time::Duration};

use labsim::{prelude::*, prompt::render_prompt};
use log::*;
use thiserror::Error;

use crate::config::ConsoleConfig;

/// Error of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The lab rejected the operation.
    #[error("{0}")]
    Lab(#[from] LabError),
    /// The meta command does not exist.
    #[error("Unknown command `:{0}`. Type `:help` for a list of commands.")]
    UnknownMeta(String),
    /// The arguments of a meta command are invalid.
    #[error("Invalid arguments for `:{0}`: {1:?}")]
    InvalidArguments(&'static str, String),
    /// The lab has no device whose console could be opened.
    #[error("The lab {0} has no devices")]
    EmptyLab(String),
}

/// Command that acts on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// List the meta commands.
    Help,
    /// List all devices of the lab.
    Devices,
    /// Open the console of another device.
    Use(String),
    /// Show the topology path.
    Topology,
    /// Show the neighbor table of the active device.
    Neighbors(NeighborKind),
    /// Complete a partial command line.
    Complete(String),
    /// Simulate a packet from the active device.
    Simulate {
        /// Protocol of the flow
        protocol: Protocol,
        /// Stop at this device instead of walking the whole topology.
        destination: Option<String>,
    },
    /// Apply a GUI edit to the active device.
    Gui(GuiEdit),
    /// Show the objectives of the lab.
    Objectives,
    /// Show the lab documentation.
    Docs,
    /// Reload the lab from the catalog.
    Restart,
    /// Ask the tutor.
    Ask(String),
    /// Generate a quiz.
    Quiz(String),
    /// Leave the console.
    Quit,
}

/// Help text of the meta commands.
pub const META_HELP: [&str; 15] = [
    ":help                        show this help",
    ":devices                     list all devices",
    ":use <device>                open the console of a device",
    ":topology                    show the packet path of the lab",
    ":neighbors [arp|cdp]         neighbor table of the active device",
    ":complete <partial>          complete a command line",
    ":simulate <proto> [device]   simulate a packet from the active device",
    ":gui <edit>                  ip|mask <if> <val>, up|down|toggle <if>, zone <if> [z],",
    "                             desc <if> [text], commit",
    ":objectives                  show the lab objectives",
    ":docs                        show the lab documentation",
    ":restart                     reload the lab",
    ":ask <question>              ask the tutor",
    ":quiz <topic>                generate a quiz",
    ":quit                        leave the console",
];

impl FromStr for MetaCommand {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim_start();
        let body = body.strip_prefix(':').unwrap_or(body);
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let rest = || tokens.iter().skip(1).copied().collect::<Vec<_>>().join(" ");
        Ok(match tokens.as_slice() {
            ["help"] | ["?"] => MetaCommand::Help,
            ["devices"] => MetaCommand::Devices,
            ["use", id] => MetaCommand::Use(id.to_string()),
            ["topology"] => MetaCommand::Topology,
            ["neighbors"] | ["neighbors", "arp"] => MetaCommand::Neighbors(NeighborKind::Arp),
            ["neighbors", "cdp" | "lldp"] => MetaCommand::Neighbors(NeighborKind::Cdp),
            ["complete", ..] => {
                let partial = body.trim_start()["complete".len()..].trim_start();
                MetaCommand::Complete(partial.to_string())
            }
            ["simulate", protocol] => MetaCommand::Simulate {
                protocol: protocol.parse()?,
                destination: None,
            },
            ["simulate", protocol, destination] => MetaCommand::Simulate {
                protocol: protocol.parse()?,
                destination: Some(destination.to_string()),
            },
            ["gui", args @ ..] => MetaCommand::Gui(parse_gui_edit(args)?),
            ["objectives"] => MetaCommand::Objectives,
            ["docs"] => MetaCommand::Docs,
            ["restart"] => MetaCommand::Restart,
            ["ask", _, ..] => MetaCommand::Ask(rest()),
            ["quiz", _, ..] => MetaCommand::Quiz(rest()),
            ["quit" | "q" | "exit"] => MetaCommand::Quit,
            [cmd @ ("use" | "neighbors" | "simulate" | "ask" | "quiz"), ..] => {
                return Err(SessionError::InvalidArguments(static_name(cmd), rest()))
            }
            [cmd, ..] => return Err(SessionError::UnknownMeta(cmd.to_string())),
            [] => return Err(SessionError::UnknownMeta(String::new())),
        })
    }
}

fn static_name(cmd: &str) -> &'static str {
    match cmd {
        "use" => "use",
        "neighbors" => "neighbors",
        "simulate" => "simulate",
        "ask" => "ask",
        _ => "quiz",
    }
}

/// Parse the arguments of `:gui`.
fn parse_gui_edit(args: &[&str]) -> Result<GuiEdit, SessionError> {
    let s = |x: &&str| x.to_string();
    Ok(match args {
        ["ip", iface, ip] => GuiEdit::SetIp {
            interface: s(iface),
            ip: s(ip),
        },
        ["mask", iface, mask] => GuiEdit::SetMask {
            interface: s(iface),
            mask: s(mask),
        },
        ["up", iface] => GuiEdit::SetUp {
            interface: s(iface),
            up: true,
        },
        ["down", iface] => GuiEdit::SetUp {
            interface: s(iface),
            up: false,
        },
        ["toggle", iface] => GuiEdit::ToggleUp { interface: s(iface) },
        ["zone", iface] => GuiEdit::SetZone {
            interface: s(iface),
            zone: None,
        },
        ["zone", iface, zone] => GuiEdit::SetZone {
            interface: s(iface),
            zone: Some(s(zone)),
        },
        ["desc" | "description", iface, text @ ..] => GuiEdit::SetDescription {
            interface: s(iface),
            description: (!text.is_empty()).then(|| text.join(" ")),
        },
        ["commit"] => GuiEdit::Commit,
        _ => return Err(SessionError::InvalidArguments("gui", args.join(" "))),
    })
}

/// Step-by-step presentation of a computed packet path. The steps are fixed when the playback is
/// created; revealing them never touches any device.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    steps: Vec<SimulationStep>,
    revealed: usize,
    delay: Duration,
}

impl Playback {
    /// Create a new playback with nothing revealed yet.
    pub fn new(steps: Vec<SimulationStep>, delay: Duration) -> Self {
        Self {
            steps,
            revealed: 0,
            delay,
        }
    }

    /// Reveal the next step. Returns `None` once every step is revealed.
    pub fn tick(&mut self) -> Option<&SimulationStep> {
        let step = self.steps.get(self.revealed)?;
        self.revealed += 1;
        Some(step)
    }

    /// The steps revealed so far.
    pub fn revealed(&self) -> &[SimulationStep] {
        &self.steps[..self.revealed]
    }

    /// All steps, revealed or not.
    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }

    /// Whether every step is revealed.
    pub fn is_done(&self) -> bool {
        self.revealed >= self.steps.len()
    }

    /// Delay between two ticks.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Outcome of the last step of the path.
    pub fn outcome(&self) -> Option<StepOutcome> {
        self.steps.last().map(|s| s.outcome)
    }
}

/// One running lab, driven from the console.
#[derive(Debug, Clone)]
pub struct LabSession {
    lab: LabInstance,
    active: DeviceId,
    shown: BTreeMap<DeviceId, usize>,
    config: ConsoleConfig,
}

/// The device whose console is opened first: the first firewall of the topology, or the first
/// node, or the first device.
fn default_device(lab: &LabInstance) -> Option<DeviceId> {
    let nodes = lab.topology().nodes();
    nodes
        .iter()
        .find(|n| n.icon == DeviceClass::Firewall)
        .or_else(|| nodes.first())
        .map(|n| n.device_id.clone())
        .or_else(|| lab.devices().keys().next().cloned())
}

impl LabSession {
    /// Start a session on a lab.
    pub fn new(lab: LabInstance, config: ConsoleConfig) -> Result<Self, SessionError> {
        let active =
            default_device(&lab).ok_or_else(|| SessionError::EmptyLab(lab.id().to_string()))?;
        let shown = if config.echo_boot_banner {
            BTreeMap::new()
        } else {
            lab.devices()
                .iter()
                .map(|(id, d)| (id.clone(), d.history.len()))
                .collect()
        };
        info!("Started lab {} with the console of {}", lab.id(), active);
        Ok(Self {
            lab,
            active,
            shown,
            config,
        })
    }

    /// Start a session on a lab of the catalog.
    pub fn start(id: &str, config: ConsoleConfig) -> Result<Self, SessionError> {
        Self::new(catalog::lab(id)?, config)
    }

    /// The lab
    pub fn lab(&self) -> &LabInstance {
        &self.lab
    }

    /// The console settings
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Id of the device whose console is open.
    pub fn active_id(&self) -> &DeviceId {
        &self.active
    }

    /// The device whose console is open.
    pub fn active(&self) -> &Device {
        &self.lab.devices()[&self.active]
    }

    /// Prompt of the active device.
    pub fn prompt(&self) -> String {
        render_prompt(self.active())
    }

    /// Open the console of another device.
    pub fn select(&mut self, id: &str) -> Result<&Device, SessionError> {
        let id = self.lab.device(id)?.id().clone();
        debug!("Switching console to {}", id);
        self.active = id;
        Ok(self.active())
    }

    /// Mark the whole history of the active device as shown.
    fn mark_shown(&mut self) {
        let len = self.active().history.len();
        self.shown.insert(self.active.clone(), len);
    }

    /// Lines of the active console that were not shown yet. They are shown from now on.
    pub fn unread(&mut self) -> Vec<String> {
        let history = &self.active().history;
        let from = self.shown.get(&self.active).copied().unwrap_or(0).min(history.len());
        let lines = history[from..].to_vec();
        self.mark_shown();
        lines
    }

    /// Send a command line to the active device and return what it printed (without the echoed
    /// prompt and command).
    pub fn submit(&mut self, line: &str) -> Result<Vec<String>, SessionError> {
        let echo = self.prompt().lines().count();
        let before = self.active().history.len();
        let device = self.lab.execute(self.active.as_str(), line)?;
        let output = device
            .history
            .get(before + echo..)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        self.mark_shown();
        Ok(output)
    }

    /// Complete a partial command line for the active device.
    pub fn complete(&self, partial: &str) -> Result<String, SessionError> {
        Ok(self.lab.complete(self.active.as_str(), partial)?)
    }

    /// Neighbor table of the active device.
    pub fn neighbors(&self, kind: NeighborKind) -> Result<Vec<String>, SessionError> {
        Ok(self.lab.neighbors(self.active.as_str(), kind)?)
    }

    /// Apply a GUI edit to the active device and return the line it logged.
    pub fn apply_gui(&mut self, edit: &GuiEdit) -> Result<String, SessionError> {
        let device = self.lab.apply_gui_edit(self.active.as_str(), edit)?;
        let line = device.history.last().cloned().unwrap_or_default();
        self.mark_shown();
        Ok(line)
    }

    /// Simulate a packet from the active device, either along the whole topology or up to a
    /// destination.
    pub fn simulate(
        &self,
        protocol: Protocol,
        destination: Option<&str>,
    ) -> Result<Playback, SessionError> {
        let source = self.active.as_str();
        let steps = match destination {
            Some(dst) => self.lab.simulate_to(source, dst, protocol)?,
            None => self.lab.simulate(source, protocol)?,
        };
        Ok(Playback::new(steps, self.config.step_delay()))
    }

    /// One row per device: marker of the active console, id, hostname, class and vendor.
    pub fn device_rows(&self) -> Vec<String> {
        self.lab
            .devices()
            .iter()
            .map(|(id, d)| {
                format!(
                    "{} {:<12} {:<16} {:<12} {}",
                    if *id == self.active { "*" } else { " " },
                    id.as_str(),
                    d.name,
                    d.class.to_string(),
                    d.vendor()
                )
            })
            .collect()
    }

    /// Reload the lab from the catalog. The console stays on the same device.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let lab = catalog::lab(self.lab.id())?;
        let active = self.active.clone();
        *self = Self::new(lab, self.config.clone())?;
        if self.lab.device(active.as_str()).is_ok() {
            self.active = active;
        }
        info!("Restarted lab {}", self.lab.id());
        Ok(())
    }
}
