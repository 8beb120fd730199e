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

//! # Command grammar
//!
//! Vendor command lines are matched against ordered tables of [`Rule`]s. Every rule has a
//! [`Pattern`] written in a small syntax:
//!
//! - `show`: a keyword. The input token may be any non-empty prefix of the keyword
//!   (abbreviation), compared case-insensitively.
//! - `[terminal]`: an optional keyword.
//! - `<ip>`, `<mask>`, `<cidr>`, `<num>`: a typed argument, validated while matching.
//! - `<name>`: any other placeholder captures a single word.
//! - `[<name>]`: an optional argument.
//! - `<text...>`: captures all remaining tokens (at least one), joined by a single space.
//! - `[args...]`: captures all remaining tokens (possibly none).
//!
//! Matching a pattern yields [`Match::Full`] with the captured values, [`Match::Incomplete`] if
//! the input is a proper prefix of the pattern (e.g. a missing argument), or [`Match::None`].

use std::{collections::BTreeMap, net::Ipv4Addr, str::FromStr};

use log::*;

use crate::{
    device::{parse_prefix_len, Device},
    types::{CliMode, DeviceId, FrameKind},
};

/// Typed placeholder of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    Ip,
    Mask,
    Cidr,
    Num,
    Word,
}

impl ArgKind {
    fn from_name(name: &str) -> Self {
        match name {
            "ip" | "next-hop" | "gateway" => ArgKind::Ip,
            "mask" => ArgKind::Mask,
            "cidr" | "prefix" => ArgKind::Cidr,
            "num" | "id" | "vlan" | "as" | "unit" | "seq" => ArgKind::Num,
            _ => ArgKind::Word,
        }
    }

    fn accepts(&self, token: &str) -> bool {
        match self {
            ArgKind::Ip => token.parse::<Ipv4Addr>().is_ok(),
            ArgKind::Mask => token.contains('.') && parse_prefix_len(token).is_some(),
            ArgKind::Cidr => match token.split_once('/') {
                Some((ip, len)) => ip.parse::<Ipv4Addr>().is_ok() && parse_prefix_len(len).is_some(),
                None => false,
            },
            ArgKind::Num => token.parse::<u32>().is_ok(),
            ArgKind::Word => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Keyword { word: &'static str, optional: bool },
    Arg { name: &'static str, kind: ArgKind, optional: bool },
    Rest { name: &'static str, optional: bool },
}

/// A compiled command pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: &'static str,
    elements: Vec<Element>,
}

impl Pattern {
    /// Compile a pattern from its textual form.
    pub fn new(source: &'static str) -> Self {
        let elements = source
            .split_whitespace()
            .map(|tok| {
                let (inner, optional) = match tok.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                    Some(inner) => (inner, true),
                    None => (tok, false),
                };
                let bare = inner.trim_start_matches('<').trim_end_matches('>');
                if let Some(name) = bare.strip_suffix("...") {
                    Element::Rest { name, optional }
                } else if let Some(name) = inner.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                    Element::Arg {
                        name,
                        kind: ArgKind::from_name(name),
                        optional,
                    }
                } else {
                    Element::Keyword {
                        word: inner,
                        optional,
                    }
                }
            })
            .collect();
        Self { source, elements }
    }

    /// The textual form of the pattern.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Match the tokens against the pattern.
    pub fn matches(&self, tokens: &[&str]) -> Match {
        let mut captures = Captures::default();
        match_elements(&self.elements, tokens, &mut captures)
    }
}

fn keyword_matches(word: &str, token: &str) -> bool {
    !token.is_empty() && word.starts_with(token.to_lowercase().as_str())
}

fn match_elements(elements: &[Element], tokens: &[&str], caps: &mut Captures) -> Match {
    let Some((elem, rest)) = elements.split_first() else {
        return if tokens.is_empty() {
            Match::Full(caps.clone())
        } else {
            Match::None
        };
    };

    match elem {
        Element::Rest { name, optional } => {
            if tokens.is_empty() {
                if *optional {
                    match_elements(rest, tokens, caps)
                } else {
                    Match::Incomplete
                }
            } else {
                caps.values.insert(*name, tokens.join(" "));
                let result = match_elements(rest, &[], caps);
                caps.values.remove(name);
                result
            }
        }
        Element::Keyword { word, optional } => {
            let taken = match tokens.first() {
                Some(tok) if keyword_matches(word, tok) => match_elements(rest, &tokens[1..], caps),
                Some(_) => Match::None,
                None if *optional => Match::None,
                None => Match::Incomplete,
            };
            if *optional && !taken.is_full() {
                taken.or(match_elements(rest, tokens, caps))
            } else {
                taken
            }
        }
        Element::Arg {
            name,
            kind,
            optional,
        } => {
            let taken = match tokens.first() {
                Some(tok) if kind.accepts(tok) => {
                    caps.values.insert(*name, tok.to_string());
                    let result = match_elements(rest, &tokens[1..], caps);
                    caps.values.remove(name);
                    result
                }
                Some(_) => Match::None,
                None if *optional => Match::None,
                None => Match::Incomplete,
            };
            if *optional && !taken.is_full() {
                taken.or(match_elements(rest, tokens, caps))
            } else {
                taken
            }
        }
    }
}

/// Values captured by the placeholders of a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    values: BTreeMap<&'static str, String>,
}

impl Captures {
    /// Get a captured value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Get a captured value, or the empty string.
    pub fn str(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Parse a captured value.
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|s| s.parse().ok())
    }
}

/// Result of matching a command line against a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// The line matches the pattern completely.
    Full(Captures),
    /// The line is a prefix of the pattern, but something is missing.
    Incomplete,
    /// The line does not match.
    None,
}

impl Match {
    /// Whether the match is full.
    pub fn is_full(&self) -> bool {
        matches!(self, Match::Full(_))
    }

    /// Pick the better of the two results.
    fn or(self, other: Match) -> Match {
        match (self, other) {
            (Match::Full(c), _) | (_, Match::Full(c)) => Match::Full(c),
            (Match::Incomplete, _) | (_, Match::Incomplete) => Match::Incomplete,
            _ => Match::None,
        }
    }
}

/// Restriction of a rule on the context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Applies regardless of the context stack.
    Any,
    /// Only applies if the context stack is empty.
    Top,
    /// Only applies if the innermost frame has the given kind.
    Frame(FrameKind),
    /// Only applies inside the configuration section with the given name.
    Section(&'static str),
    /// Only applies inside an object nested in the given section.
    Object(&'static str),
}

impl Scope {
    fn admits(&self, device: &Device) -> bool {
        match self {
            Scope::Any => true,
            Scope::Top => device.context.is_empty(),
            Scope::Frame(kind) => device.frame().map(|f| f.kind == *kind).unwrap_or(false),
            Scope::Section(name) => device
                .frame()
                .map(|f| f.kind == FrameKind::Section && f.name == *name)
                .unwrap_or(false),
            Scope::Object(name) => {
                let n = device.context.len();
                n >= 2
                    && device.context[n - 1].kind != FrameKind::Section
                    && device.context[n - 2].kind == FrameKind::Section
                    && device.context[n - 2].name == *name
            }
        }
    }
}

/// Effect of a rule.
#[derive(Clone, Copy)]
pub enum Action {
    /// Print a fixed text.
    Print(&'static str),
    /// Run a function on the device.
    Run(fn(&mut Exec<'_>, &Captures)),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print(s) => f.debug_tuple("Print").field(s).finish(),
            Self::Run(_) => f.write_str("Run(..)"),
        }
    }
}

/// One entry of a command table.
#[derive(Debug, Clone)]
pub struct Rule {
    modes: &'static [CliMode],
    scope: Scope,
    pattern: Pattern,
    action: Action,
}

impl Rule {
    /// Create a rule that prints a fixed text. An empty list of modes means every mode.
    pub fn print(modes: &'static [CliMode], pattern: &'static str, text: &'static str) -> Self {
        Self {
            modes,
            scope: Scope::Any,
            pattern: Pattern::new(pattern),
            action: Action::Print(text),
        }
    }

    /// Create a rule that runs a function. An empty list of modes means every mode.
    pub fn run(
        modes: &'static [CliMode],
        pattern: &'static str,
        f: fn(&mut Exec<'_>, &Captures),
    ) -> Self {
        Self {
            modes,
            scope: Scope::Any,
            pattern: Pattern::new(pattern),
            action: Action::Run(f),
        }
    }

    /// Restrict the rule to a scope of the context stack.
    pub fn within(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// The pattern of this rule.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn applies(&self, device: &Device) -> bool {
        (self.modes.is_empty() || self.modes.contains(&device.mode)) && self.scope.admits(device)
    }
}

/// Execution context of a single command. Rule actions modify the working copy of the device.
#[derive(Debug)]
pub struct Exec<'a> {
    /// The working copy of the device.
    pub device: Device,
    /// All devices of the lab (including the old state of this device).
    pub devices: &'a BTreeMap<DeviceId, Device>,
}

impl<'a> Exec<'a> {
    /// Create a new execution context.
    pub fn new(device: Device, devices: &'a BTreeMap<DeviceId, Device>) -> Self {
        Self { device, devices }
    }

    /// Print a text to the console.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.device.log(text)
    }

    /// Print multiple lines to the console.
    pub fn print_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().for_each(|l| self.device.log(l))
    }

    /// Switch the console mode.
    pub fn enter(&mut self, mode: CliMode) {
        trace!("{}: mode {:?} -> {:?}", self.device.id(), self.device.mode, mode);
        self.device.mode = mode;
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A rule was executed.
    Done,
    /// No rule matched completely, but at least one rule expected more input.
    Incomplete,
    /// No rule matched.
    Unknown,
}

/// Find the first rule that matches the tokens completely and execute it.
pub fn dispatch(rules: &[Rule], exec: &mut Exec<'_>, tokens: &[&str]) -> Dispatch {
    let mut incomplete = false;
    for rule in rules.iter().filter(|r| r.applies(&exec.device)) {
        match rule.pattern.matches(tokens) {
            Match::Full(caps) => {
                trace!("matched rule `{}`", rule.pattern.source());
                match rule.action {
                    Action::Print(text) => exec.print(text),
                    Action::Run(f) => f(exec, &caps),
                }
                return Dispatch::Done;
            }
            Match::Incomplete => incomplete = true,
            Match::None => {}
        }
    }
    if incomplete {
        Dispatch::Incomplete
    } else {
        Dispatch::Unknown
    }
}
