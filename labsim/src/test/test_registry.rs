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

use crate::registry::registry_for;

use super::*;
use test_log::test;

#[test]
fn complete_unique_word() {
    let cisco = registry_for(VendorFamily::Cisco);
    assert_eq!(cisco.complete("show ru"), "show running-config ");
    assert_eq!(cisco.complete("conf"), "configure ");
    assert_eq!(cisco.complete("SHOW RU"), "SHOW running-config ");
    assert_eq!(registry_for(VendorFamily::Juniper).complete("comm"), "commit ");
    assert_eq!(registry_for(VendorFamily::Cloud).complete("show n"), "show nsg ");
}

#[test]
fn complete_common_prefix() {
    let cisco = registry_for(VendorFamily::Cisco);
    assert_eq!(cisco.complete("show inter"), "show interface");
    // `version`, `vlan`, and `vty` share nothing beyond the typed letter
    assert_eq!(cisco.complete("show v"), "show v");
}

#[test]
fn complete_without_match() {
    let cisco = registry_for(VendorFamily::Cisco);
    assert_eq!(cisco.complete(""), "");
    assert_eq!(cisco.complete("show "), "show ");
    assert_eq!(cisco.complete("frob"), "frob");
}

#[test]
fn complete_through_the_lab() {
    let lab = lab("lab-instance-a");
    assert_eq!(lab.complete("dev-rtr", "sh").unwrap(), "sh");
    assert_eq!(lab.complete("dev-fw", "get router info routing-t").unwrap(), "get router info routing-table ");
    assert!(lab.complete("dev-nope", "sh").is_err());
}

#[test]
fn vocabulary() {
    let juniper = registry_for(VendorFamily::Juniper);
    assert!(juniper.vocabulary().contains("rollback"));
    assert!(!juniper.vocabulary().contains("enable"));
    assert!(juniper.commands().any(|c| c == "show | compare"));
}

#[test]
fn help_lines() {
    let lines = registry_for(VendorFamily::Cisco).help_lines(Vendor::Cisco);
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "--- Cisco Available Commands (Partial List) ---");
    assert_eq!(
        lines[1],
        "User Mode: enable, ping, traceroute, show version, show clock ..."
    );
    assert_eq!(lines[10], "(See \"Lab Documentation\" tab for full list)");
}

#[test]
fn help_command() {
    let mut lab = lab("lab-instance-b");
    let expected = registry_for(VendorFamily::PaloAlto).help_lines(Vendor::PaloAlto);
    pretty_assertions::assert_eq!(output(&mut lab, "dev-fw", "?"), expected);
    let help = output(&mut lab, "dev-rtr", "help");
    assert_eq!(help[0], "--- Cisco Available Commands (Partial List) ---");
    // help does not change the mode
    assert_prompt!(lab, "dev-rtr", "Edge-Rtr>");
}
