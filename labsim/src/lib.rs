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

#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # LabSim
//!
//! This is a library for simulating small multi-vendor network labs: a handful of routers,
//! switches, firewalls, and cloud resources, each with a vendor-specific command line.
//!
//! ## Main Concepts
//!
//! The [`lab::LabInstance`] is the main datastructure to operate on. It owns every
//! [`device::Device`] of the lab together with the ordered [`lab::Topology`]. Devices are values:
//! every command line or GUI edit produces a new device that replaces the old one in the
//! instance. A lab is usually loaded from the built-in [`catalog`].
//!
//! Command lines are interpreted by the [`interpreter::CommandInterpreter`] of the device's
//! vendor family. Each interpreter is an ordered table of [`command::Rule`]s, whose patterns
//! support keyword abbreviation (`sh ip int br`). The prompt of a device is derived from its
//! mode and context stack by [`prompt::render_prompt`].
//!
//! Firewalls and network security groups carry policies. The [`simulation`] walks a packet
//! along the topology and evaluates these policies at every hop.
//!
//! ## Example usage
//!
//! ```
//! use labsim::prelude::*;
//!
//! fn main() -> Result<(), LabError> {
//!     let mut lab = catalog::lab("lab-instance-a")?;
//!
//!     lab.execute("dev-rtr", "enable")?;
//!     assert_eq!(lab.prompt("dev-rtr")?, "Edge-Rtr#");
//!
//!     lab.execute("dev-rtr", "sh ip ro")?;
//!     let history = &lab.device("dev-rtr")?.history;
//!     assert!(history.iter().any(|l| l.contains("via 10.0.0.2")));
//!
//!     let steps = lab.simulate("dev-client", Protocol::Http)?;
//!     assert_eq!(steps.len(), 5);
//!     assert!(steps.iter().all(|s| s.outcome == StepOutcome::Success));
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod command;
pub mod device;
pub mod formatter;
pub mod gui;
pub mod interpreter;
pub mod lab;
pub mod neighbors;
pub mod prelude;
pub mod prompt;
pub mod registry;
pub mod simulation;
pub mod types;

#[cfg(test)]
mod test;
