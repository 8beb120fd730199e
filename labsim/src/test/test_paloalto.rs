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

use crate::{
    device::{PolicyAction, Route},
    simulation::{Protocol, StepOutcome},
    types::{CliMode, Transport},
};

use super::*;
use test_log::test;

const MATCH_HTTPS: &str =
    "test security-policy-match from TRUST to UNTRUST protocol 6 destination-port 443";

#[test]
fn configuration_mode() {
    let mut lab = lab("lab-instance-b");
    assert_prompt!(lab, "dev-fw", "admin@PA-Firewall>");
    assert_output!(lab, "dev-fw", "configure", ["Entering configuration mode"]);
    assert_prompt!(lab, "dev-fw", "admin@PA-Firewall#");
    assert_output!(lab, "dev-fw", "exit", ["Exiting configuration mode"]);
    assert_prompt!(lab, "dev-fw", "admin@PA-Firewall>");
    assert_output!(lab, "dev-fw", "exit", []);
    assert_eq!(lab.device("dev-fw").unwrap().mode, CliMode::User);
}

#[test]
fn policy_match() {
    let mut lab = lab("lab-instance-b");
    assert_output!(
        lab,
        "dev-fw",
        MATCH_HTTPS,
        ["Access allowed by policy \"Allow-Outbound\" from TRUST to UNTRUST"]
    );
    assert_output!(
        lab,
        "dev-fw",
        "test security-policy-match from UNTRUST to TRUST",
        ["No matching security rule found (implicit deny)"]
    );
}

#[test]
fn rulebase_changes() {
    let mut lab = lab("lab-instance-b");
    run!(
        lab,
        "dev-fw",
        "configure",
        "set rulebase security rules Block-Telnet from TRUST",
        "set rulebase security rules Block-Telnet to UNTRUST",
        "set rulebase security rules Block-Telnet service telnet",
        "set rulebase security rules Block-Telnet action deny"
    );
    let policies = &lab.device("dev-fw").unwrap().policies;
    assert_eq!(policies.len(), 2);
    let p = &policies[1];
    assert_eq!(p.id, 2);
    assert_eq!(p.name, "Block-Telnet");
    assert_eq!(p.from_zone, "TRUST");
    assert_eq!(p.to_zone, "UNTRUST");
    assert_eq!(p.protocol, Some(Transport::Tcp));
    assert_eq!(p.dst_port, Some(23));
    assert_eq!(p.action, PolicyAction::Deny);

    assert_output!(
        lab,
        "dev-fw",
        "set rulebase security rules Block-Telnet action maybe",
        ["Invalid syntax."]
    );

    run!(lab, "dev-fw", "set rulebase security rules Allow-Outbound action deny");
    assert_output!(
        lab,
        "dev-fw",
        format!("run {MATCH_HTTPS}").as_str(),
        ["Access denied by policy \"Allow-Outbound\" from TRUST to UNTRUST"]
    );
    assert_eq!(lab.device("dev-fw").unwrap().mode, CliMode::Config);

    run!(
        lab,
        "dev-fw",
        "delete rulebase security rules Allow-Outbound",
        "delete rulebase security rules Block-Telnet"
    );
    assert_output!(
        lab,
        "dev-fw",
        "delete rulebase security rules Nope",
        ["Nope does not exist"]
    );
    run!(lab, "dev-fw", "exit");
    assert_output!(
        lab,
        "dev-fw",
        MATCH_HTTPS,
        ["No matching security rule found (implicit deny)"]
    );
}

#[test]
fn rejected_rule_fields_leave_the_rulebase_alone() {
    let mut lab = lab("lab-instance-b");
    run!(lab, "dev-fw", "configure");
    let before = lab.device("dev-fw").unwrap().policies.clone();
    assert_output!(
        lab,
        "dev-fw",
        "set rulebase security rules Allow-Outbound service gopher",
        ["Invalid syntax."]
    );
    assert_eq!(lab.device("dev-fw").unwrap().policies, before);

    run!(lab, "dev-fw", "delete rulebase security rules Allow-Outbound");
    assert_output!(
        lab,
        "dev-fw",
        "set rulebase security rules web action bogus",
        ["Invalid syntax."]
    );
    assert_output!(
        lab,
        "dev-fw",
        "set rulebase security rules web service gopher",
        ["Invalid syntax."]
    );
    assert!(lab.device("dev-fw").unwrap().policies.is_empty());

    run!(lab, "dev-fw", "commit");
    let steps = lab.simulate("dev-client", Protocol::Https).unwrap();
    let last = steps.last().unwrap();
    assert_eq!(last.outcome, StepOutcome::Drop);
    assert_eq!(last.device_id.as_str(), "dev-fw");
}

#[test]
fn new_rule_after_the_highest_id() {
    let mut lab = lab("lab-instance-b");
    run!(lab, "dev-fw", "configure");
    let d = lab.device_mut("dev-fw").unwrap();
    d.policies[0].id = u32::MAX;
    assert_output!(
        lab,
        "dev-fw",
        "set rulebase security rules web action allow",
        ["Invalid syntax."]
    );
    assert_eq!(lab.device("dev-fw").unwrap().policies.len(), 1);
}

#[test]
fn denied_policy_drops_simulated_traffic() {
    let mut lab = lab("lab-instance-b");
    run!(
        lab,
        "dev-fw",
        "configure",
        "set rulebase security rules Allow-Outbound action deny",
        "commit"
    );
    let steps = lab.simulate("dev-client", Protocol::Https).unwrap();
    assert_eq!(steps.len(), 4);
    let last = steps.last().unwrap();
    assert_eq!(last.outcome, StepOutcome::Drop);
    assert_eq!(last.device_id.as_str(), "dev-fw");
    assert_eq!(last.detail.as_deref(), Some("implicit-deny"));
}

#[test]
fn network_configuration() {
    let mut lab = lab("lab-instance-b");
    run!(lab, "dev-fw", "configure");
    assert_output!(
        lab,
        "dev-fw",
        "set network interface ethernet ethernet1/3 layer3 ip 172.16.0.1/24",
        ["[OK]"]
    );
    run!(
        lab,
        "dev-fw",
        "set zone DMZ network layer3 ethernet1/3",
        "set network virtual-router default routing-table ip static-route dmz destination 172.16.8.9/21 nexthop ip-address 172.16.0.254",
        "set deviceconfig system hostname PA-Edge"
    );
    assert_prompt!(lab, "dev-fw", "admin@PA-Edge#");
    let d = lab.device("dev-fw").unwrap();
    let iface = &d.interfaces["ethernet1/3"];
    assert_eq!(iface.cidr(), "172.16.0.1/24");
    assert_eq!(iface.zone.as_deref(), Some("DMZ"));
    assert!(d.routes.contains(&Route::new("172.16.8.0/21", "172.16.0.254")));

    assert_prints!(
        lab,
        "dev-fw",
        "run show interface all",
        "name: ethernet1/3, state: up, ip: 172.16.0.1/24, zone: DMZ"
    );
    assert_output!(lab, "dev-fw", "commit", ["Configuration committed successfully"]);
}

#[test]
fn error_messages() {
    let mut lab = lab("lab-instance-b");
    assert_output!(lab, "dev-fw", "frobnicate", ["Invalid syntax."]);
    assert_output!(lab, "dev-fw", "show foo", ["Invalid syntax."]);
    run!(lab, "dev-fw", "configure");
    assert_output!(lab, "dev-fw", "set rulebase security rules X", ["Incomplete command."]);
}
