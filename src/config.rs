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

//! This module contains the code for reading the configuration.
//!
//! The configuration is a TOML file with two tables:
//!
//! ```toml
//! [console]
//! step_delay_ms = 800
//! default_lab = "lab-instance-a"
//! echo_boot_banner = true
//!
//! [tutor]
//! model = "offline"
//! system_instruction = "..."
//! ```
//!
//! Every key is optional. The file is taken from the `--config` argument, or from the path in
//! the environment variable `NETLAB_CONFIG`. Without a file, the defaults are used.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use lazy_static::lazy_static;
use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that points to the configuration file.
pub const CONFIG_ENV: &str = "NETLAB_CONFIG";

lazy_static! {
    /// Configuration file given by the environment, if any.
    pub static ref CONFIG_FROM_ENV: Option<PathBuf> = std::env::var_os(CONFIG_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
}

/// Instruction sent to the tutor model with every conversation.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a world-class Senior Network Engineer and \
    Mentor named \"Net-Start Bot\". Your goal is to teach beginners networking concepts clearly \
    and concisely. Use analogies. If asked about a vendor command, provide both the command and \
    an explanation. Be encouraging and professional. Format your response with Markdown \
    (headers, lists, bold text).";

/// Error while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Cannot read '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
    /// The file is not valid.
    #[error("Cannot parse the configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings of the interactive console
    pub console: ConsoleConfig,
    /// Settings of the tutor
    pub tutor: TutorConfig,
}

/// Settings of the interactive console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Delay between two revealed simulation steps, in milliseconds.
    pub step_delay_ms: u64,
    /// Lab that is started when none is given on the command line.
    pub default_lab: String,
    /// Print the console history (boot banner) when a device is selected for the first time.
    pub echo_boot_banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 800,
            default_lab: String::from("lab-instance-a"),
            echo_boot_banner: true,
        }
    }
}

/// Settings of the tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Name of the model. `offline` uses the built-in tutor.
    pub model: String,
    /// Instruction that frames every conversation.
    pub system_instruction: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: String::from("offline"),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl Config {
    /// Parse the configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read the configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml(&s)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Find the configuration file. An explicit path has precedence over the environment.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| CONFIG_FROM_ENV.clone())
    }

    /// Read the configuration file if there is one, and use the defaults otherwise.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::locate(explicit) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No configuration file given, using the defaults");
                Ok(Self::default())
            }
        }
    }
}

impl ConsoleConfig {
    /// Delay between two revealed simulation steps.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
