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

//! # Tutor
//!
//! The tutor answers questions about networking and generates short quizzes. The console talks to
//! it through the [`ChatService`] trait. A remote language model can implement the trait; the
//! crate ships the [`OfflineTutor`], which answers from a small glossary and from the command
//! registries of the simulated vendors.
//!
//! Quizzes are exchanged as JSON arrays (see [`quiz_schema`]):
//!
//! ```json
//! [{"question": "...", "options": ["..."], "correctAnswer": "...", "explanation": "..."}]
//! ```

use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

use itertools::Itertools;
use labsim::{
    prelude::*,
    prompt::render_prompt,
    registry::registry_for,
    types::{ContextFrame, FrameKind},
};
use lazy_static::lazy_static;
use log::*;
use maplit::btreemap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::TutorConfig;

/// Answer used when the tutor has nothing to say.
pub const NO_RESPONSE: &str = "I'm sorry, I couldn't generate a response.";

/// Error of the tutor.
#[derive(Debug, Error)]
pub enum TutorError {
    /// The configured model is not available.
    #[error("The tutor model {0:?} is not available")]
    Unavailable(String),
    /// The quiz is not valid JSON, or does not have the expected structure.
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(#[from] serde_json::Error),
    /// The correct answer of a question is not one of its options.
    #[error("The answer of {0:?} is not one of the options")]
    InvalidAnswer(String),
    /// The quiz has no questions.
    #[error("The quiz has no questions")]
    EmptyQuiz,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The student
    User,
    /// The tutor
    Model,
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Content (Markdown)
    pub text: String,
    /// Milliseconds since the UNIX epoch
    pub timestamp: u64,
}

impl ChatMessage {
    fn now(role: Role, text: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    /// A message of the student.
    pub fn user(text: impl Into<String>) -> Self {
        Self::now(Role::User, text)
    }

    /// A message of the tutor.
    pub fn model(text: impl Into<String>) -> Self {
        Self::now(Role::Model, text)
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// The question
    pub question: String,
    /// Possible answers
    pub options: Vec<String>,
    /// The correct answer, one of the options.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    /// Why the answer is correct
    pub explanation: String,
}

impl Quiz {
    /// Check that the correct answer is one of the options.
    pub fn validate(&self) -> Result<(), TutorError> {
        if self.options.contains(&self.correct_answer) {
            Ok(())
        } else {
            Err(TutorError::InvalidAnswer(self.question.clone()))
        }
    }

    /// Whether the given answer is correct.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// Parse and validate a quiz.
pub fn parse_quiz(json: &str) -> Result<Vec<Quiz>, TutorError> {
    let quiz: Vec<Quiz> = serde_json::from_str(json)?;
    if quiz.is_empty() {
        return Err(TutorError::EmptyQuiz);
    }
    quiz.iter().try_for_each(Quiz::validate)?;
    Ok(quiz)
}

/// JSON schema of a quiz, as requested from a language model.
pub fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswer": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            },
            "required": ["question", "options", "correctAnswer", "explanation"]
        }
    })
}

/// Instruction that asks a language model for a quiz.
pub fn quiz_prompt(topic: &str) -> String {
    format!("Generate 3 multiple-choice questions about \"{topic}\" for a beginner network engineer.")
}

/// Request body of a chat turn for a remote model: the system instruction, the history, and the
/// new message.
pub fn chat_request(config: &TutorConfig, history: &[ChatMessage], message: &str) -> Value {
    let contents = history
        .iter()
        .map(|m| json!({ "role": m.role, "parts": [{ "text": m.text }] }))
        .chain(std::iter::once(json!({ "role": Role::User, "parts": [{ "text": message }] })))
        .collect_vec();
    json!({
        "model": config.model,
        "systemInstruction": config.system_instruction,
        "contents": contents,
    })
}

/// Something that can hold a tutoring conversation.
pub trait ChatService: std::fmt::Debug {
    /// Answer a message, given the previous messages of the conversation.
    fn send_message(&self, history: &[ChatMessage], message: &str) -> Result<String, TutorError>;

    /// Generate multiple-choice questions about a topic.
    fn generate_quiz(&self, topic: &str) -> Result<Vec<Quiz>, TutorError>;
}

/// A conversation with a tutor.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    history: Vec<ChatMessage>,
}

impl Conversation {
    /// Start an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages so far.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Ask the tutor and record both the question and the answer.
    pub fn ask(&mut self, service: &dyn ChatService, message: &str) -> Result<&str, TutorError> {
        let reply = service.send_message(&self.history, message)?;
        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::model(reply));
        Ok(self.history.last().map(|m| m.text.as_str()).unwrap_or_default())
    }
}

/// Get the tutor for the configured model.
pub fn tutor_for(config: &TutorConfig) -> Result<Box<dyn ChatService>, TutorError> {
    match config.model.as_str() {
        "offline" => Ok(Box::new(OfflineTutor::new(config.clone()))),
        model => Err(TutorError::Unavailable(model.to_string())),
    }
}

lazy_static! {
    static ref GLOSSARY: BTreeMap<&'static str, &'static str> = btreemap! {
        "arp" => "ARP maps an IPv4 address to a MAC address on the local segment. It is the \
            phone book a host looks into before it can send a frame to its neighbor.",
        "bgp" => "BGP exchanges reachability between autonomous systems. Routers pick the best \
            path by comparing attributes like local preference and AS path length.",
        "cdp" => "CDP is a discovery protocol that lets directly connected devices learn each \
            other's hostname, platform and port. LLDP is the vendor-neutral equivalent.",
        "commit" => "Junos keeps changes in a candidate configuration. Nothing takes effect \
            until you commit, and `show | compare` lists what would change.",
        "dns" => "DNS translates names into addresses. Clients ask a resolver over udp/53, much \
            like looking up a contact before making a call.",
        "firewall" => "A firewall forwards traffic between zones only if a policy allows it. \
            Everything that no policy allows is dropped by the implicit deny.",
        "nat" => "NAT rewrites addresses at the edge of a network. With overload, many private \
            hosts share one public address and are told apart by their ports.",
        "nsg" => "A network security group filters cloud traffic with prioritized rules. The \
            lowest priority number is evaluated first.",
        "ospf" => "OSPF is a link-state routing protocol. Every router floods its links in the \
            area and computes shortest paths with Dijkstra's algorithm.",
        "ping" => "Ping sends ICMP echo requests and waits for the replies. It is the first \
            test of whether a destination is reachable at all.",
        "route" => "A route tells a device where to send packets for a destination prefix. The \
            default route 0.0.0.0/0 matches everything that nothing more specific matches.",
        "subnet" => "A subnet is a range of addresses that share a prefix. Hosts in the same \
            subnet talk directly; everything else goes through a gateway.",
        "vlan" => "A VLAN splits one physical switch into separate broadcast domains, like \
            separate rooms in one building. Access ports belong to exactly one VLAN.",
        "zone" => "A security zone groups interfaces with the same trust level. Firewall \
            policies are written between zones, not between single interfaces.",
    };
}

/// Vendors whose command registries the tutor knows.
static VENDORS: [Vendor; 5] = [
    Vendor::Cisco,
    Vendor::Juniper,
    Vendor::Fortinet,
    Vendor::PaloAlto,
    Vendor::Internet,
];

/// Category of a registered command.
fn category_of(vendor: Vendor, command: &'static str) -> Option<&'static str> {
    registry_for(vendor.family())
        .categories()
        .iter()
        .find(|(_, cmds)| cmds.contains(&command))
        .map(|(cat, _)| *cat)
}

/// The first sentence of a glossary entry.
fn first_sentence(text: &str) -> String {
    match text.find(". ") {
        Some(pos) => text[..=pos].to_string(),
        None => text.to_string(),
    }
}

/// The built-in tutor that works without a network connection.
#[derive(Debug, Clone)]
pub struct OfflineTutor {
    config: TutorConfig,
}

impl OfflineTutor {
    /// Create the offline tutor.
    pub fn new(config: TutorConfig) -> Self {
        Self { config }
    }

    /// Explain the longest multi-word vendor command that appears in the message.
    fn command_hint(&self, message: &str) -> Option<String> {
        let command = VENDORS
            .iter()
            .flat_map(|v| registry_for(v.family()).commands())
            .filter(|c| c.contains(' ') && message.contains(c))
            .max_by_key(|c| c.len())?;
        let vendors = VENDORS
            .iter()
            .filter_map(|v| category_of(*v, command).map(|cat| format!("{v} ({cat})")))
            .join(", ");
        Some(format!("`{command}` is available on {vendors}."))
    }

    /// Question: which vendor uses a command that only one vendor has.
    fn vendor_question(&self, words: &[String], seed: usize) -> Option<Quiz> {
        let vendors = &VENDORS[..4];
        let unique = vendors
            .iter()
            .flat_map(|v| registry_for(v.family()).commands().map(move |c| (*v, c)))
            .filter(|(_, c)| {
                vendors
                    .iter()
                    .filter(|w| registry_for(w.family()).commands().any(|x| x == *c))
                    .count()
                    == 1
            })
            .collect_vec();
        let (vendor, command) = unique
            .iter()
            .find(|(_, c)| words.iter().any(|w| c.contains(w.as_str())))
            .or_else(|| unique.get(seed % unique.len().max(1)))
            .copied()?;
        Some(Quiz {
            question: format!("Which vendor uses the command `{command}`?"),
            options: vendors.iter().map(|v| v.to_string()).collect(),
            correct_answer: vendor.to_string(),
            explanation: format!(
                "`{command}` belongs to the {} commands of {vendor}.",
                category_of(vendor, command).unwrap_or("registered")
            ),
        })
    }

    /// Question: which statement describes a glossary term.
    fn glossary_question(&self, words: &[String], seed: usize) -> Option<Quiz> {
        let terms = GLOSSARY.keys().copied().collect_vec();
        let pos = terms
            .iter()
            .position(|t| words.iter().any(|w| w == t))
            .unwrap_or(seed % terms.len().max(1));
        let term = *terms.get(pos)?;
        let mut options = (0..4)
            .filter_map(|i| terms.get((pos + i * 3) % terms.len()))
            .map(|t| first_sentence(GLOSSARY[t]))
            .collect_vec();
        let correct = options.first()?.clone();
        let n = options.len();
        options.rotate_left(seed % n);
        Some(Quiz {
            question: format!("Which statement about {} is correct?", term.to_uppercase()),
            options,
            correct_answer: correct,
            explanation: GLOSSARY[term].to_string(),
        })
    }

    /// Question: which prompt a device shows in configuration mode.
    fn prompt_question(&self, seed: usize) -> Option<Quiz> {
        let prompts = VENDORS[..4]
            .iter()
            .map(|v| {
                let mut d = Device::new("quiz", "R1", DeviceClass::Router, *v);
                match v.family() {
                    VendorFamily::Cisco | VendorFamily::PaloAlto => d.mode = CliMode::Config,
                    VendorFamily::Juniper => d.mode = CliMode::Edit,
                    _ => d.context.push(ContextFrame::new(FrameKind::Section, "system interface")),
                }
                (*v, render_prompt(&d).replace('\n', " "))
            })
            .collect_vec();
        let (vendor, correct) = prompts.get(seed % prompts.len())?.clone();
        Some(Quiz {
            question: format!(
                "Which prompt does a {vendor} device named R1 show while it is being configured?"
            ),
            options: prompts.iter().map(|(_, p)| p.clone()).collect(),
            correct_answer: correct.clone(),
            explanation: format!("{vendor} shows `{correct}` while it is being configured."),
        })
    }
}

impl ChatService for OfflineTutor {
    fn send_message(&self, history: &[ChatMessage], message: &str) -> Result<String, TutorError> {
        debug!(
            "Offline tutor ({}): {} previous messages",
            self.config.model,
            history.len()
        );
        let lower = message.to_lowercase();
        let words = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect_vec();
        let mut parts = Vec::new();
        parts.extend(self.command_hint(&lower));
        parts.extend(
            GLOSSARY
                .iter()
                .filter(|(term, _)| words.contains(*term))
                .map(|(term, text)| format!("**{}**: {}", term.to_uppercase(), text)),
        );
        if parts.is_empty() {
            Ok(format!(
                "{NO_RESPONSE} Try asking about one of these topics: {}.",
                GLOSSARY.keys().join(", ")
            ))
        } else {
            Ok(parts.join("\n\n"))
        }
    }

    fn generate_quiz(&self, topic: &str) -> Result<Vec<Quiz>, TutorError> {
        debug!("{}", quiz_prompt(topic));
        let words = topic
            .to_lowercase()
            .split_whitespace()
            .filter(|w| w.len() >= 3)
            .map(String::from)
            .collect_vec();
        let seed = topic.len();
        let quiz = [
            self.vendor_question(&words, seed),
            self.glossary_question(&words, seed),
            self.prompt_question(seed),
        ]
        .into_iter()
        .flatten()
        .collect_vec();
        if quiz.is_empty() {
            return Err(TutorError::EmptyQuiz);
        }
        quiz.iter().try_for_each(Quiz::validate)?;
        Ok(quiz)
    }
}
