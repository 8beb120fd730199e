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

use std::{path::Path, time::Duration};

use crate::config::{Config, ConfigError, ConsoleConfig, DEFAULT_SYSTEM_INSTRUCTION};

use pretty_assertions::assert_eq;
use test_log::test;

#[test]
fn empty_file_uses_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.console.step_delay(), Duration::from_millis(800));
    assert_eq!(config.console.default_lab, "lab-instance-a");
    assert!(config.console.echo_boot_banner);
    assert_eq!(config.tutor.model, "offline");
    assert_eq!(config.tutor.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
}

#[test]
fn missing_keys_keep_their_default() {
    let config = Config::from_toml(
        "[console]\nstep_delay_ms = 10\n\n[tutor]\nsystem_instruction = \"Be brief.\"\n",
    )
    .unwrap();
    assert_eq!(
        config.console,
        ConsoleConfig {
            step_delay_ms: 10,
            ..Default::default()
        }
    );
    assert_eq!(config.tutor.model, "offline");
    assert_eq!(config.tutor.system_instruction, "Be brief.");
}

#[test]
fn invalid_values() {
    assert!(matches!(
        Config::from_toml("[console]\nstep_delay_ms = \"fast\"\n"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(Config::from_toml("console = 3"), Err(ConfigError::Parse(_))));
}

#[test]
fn explicit_path_wins() {
    assert_eq!(
        Config::locate(Some(Path::new("netlab.toml"))),
        Some(Path::new("netlab.toml").to_path_buf())
    );
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("netlab-test-{}.toml", std::process::id()));
    std::fs::write(&path, "[console]\ndefault_lab = \"lab-instance-e\"\necho_boot_banner = false\n")
        .unwrap();
    let config = Config::load_or_default(Some(path.as_path()));
    std::fs::remove_file(&path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.console.default_lab, "lab-instance-e");
    assert!(!config.console.echo_boot_banner);
    assert_eq!(config.console.step_delay_ms, 800);
}

#[test]
fn missing_file() {
    let path = Path::new("/nonexistent/netlab.toml");
    match Config::load(path) {
        Err(ConfigError::Io(p, _)) => assert_eq!(p, path),
        r => panic!("expected an io error, got {r:?}"),
    }
}
