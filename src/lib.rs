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

#![deny(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! # NetLab
//!
//! Interactive console for the labs of [`labsim`]. A [`session::LabSession`] wraps one running
//! lab and remembers which device console is open. Lines starting with `:` are console commands
//! ([`session::MetaCommand`]); everything else is sent to the device. Simulations are revealed
//! step by step through a [`session::Playback`].
//!
//! The [`tutor`] answers questions and generates quizzes. The [`config`] module reads the TOML
//! configuration of the console and the tutor.
//!
//! ```
//! use netlab::{config::ConsoleConfig, session::LabSession};
//!
//! let mut session = LabSession::start("lab-instance-a", ConsoleConfig::default()).unwrap();
//! assert_eq!(session.active_id().as_str(), "dev-fw");
//! session.submit("get system status").unwrap();
//! ```

pub mod config;
pub mod session;
pub mod tutor;

#[cfg(test)]
mod test;
