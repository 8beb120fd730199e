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

//! Built-in lab definitions.
//!
//! The definitions are compiled into the binary as JSON and parsed on demand. Every call returns
//! a fresh instance, so restarting a lab is as simple as loading it again.

use log::*;

use crate::{
    lab::{LabDefinition, LabInstance},
    types::LabError,
};

const DEFINITIONS: [(&str, &str); 5] = [
    ("lab-instance-a", include_str!("../labs/instance_a.json")),
    ("lab-instance-b", include_str!("../labs/instance_b.json")),
    ("lab-instance-c", include_str!("../labs/instance_c.json")),
    ("lab-instance-d", include_str!("../labs/instance_d.json")),
    ("lab-instance-e", include_str!("../labs/instance_e.json")),
];

/// Ids of all built-in labs, in catalog order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    DEFINITIONS.iter().map(|(id, _)| *id)
}

/// Parse a lab definition from JSON and validate it.
pub fn parse(json: &str) -> Result<LabInstance, LabError> {
    let def: LabDefinition = serde_json::from_str(json)?;
    LabInstance::try_from(def)
}

/// Load all built-in labs.
pub fn labs() -> Result<Vec<LabInstance>, LabError> {
    DEFINITIONS.iter().map(|(_, json)| parse(json)).collect()
}

/// Load a single built-in lab by its id.
pub fn lab(id: &str) -> Result<LabInstance, LabError> {
    let (_, json) = DEFINITIONS
        .iter()
        .find(|(lab_id, _)| *lab_id == id)
        .ok_or_else(|| LabError::LabNotFound(id.to_string()))?;
    debug!("Loading lab {}", id);
    parse(json)
}
