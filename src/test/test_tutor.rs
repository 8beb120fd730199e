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

use crate::{
    config::TutorConfig,
    tutor::{
        chat_request, parse_quiz, quiz_schema, tutor_for, ChatService, Conversation, OfflineTutor,
        Quiz, Role, TutorError, NO_RESPONSE,
    },
};

use pretty_assertions::assert_eq;
use test_log::test;

const QUIZ: &str = r#"[
    {
        "question": "Which layer does a switch operate on?",
        "options": ["Layer 1", "Layer 2", "Layer 3"],
        "correctAnswer": "Layer 2",
        "explanation": "Switches forward frames by MAC address."
    }
]"#;

fn offline() -> OfflineTutor {
    OfflineTutor::new(TutorConfig::default())
}

#[test]
fn parse_valid_quiz() {
    let quiz = parse_quiz(QUIZ).unwrap();
    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0].correct_answer, "Layer 2");
    assert!(quiz[0].is_correct("Layer 2"));
    assert!(!quiz[0].is_correct("Layer 3"));
    let json = serde_json::to_string(&quiz[0]).unwrap();
    assert!(json.contains("\"correctAnswer\":\"Layer 2\""));
}

#[test]
fn parse_invalid_quiz() {
    assert!(matches!(parse_quiz("[]"), Err(TutorError::EmptyQuiz)));
    assert!(matches!(parse_quiz("{\"question\": 1}"), Err(TutorError::InvalidQuiz(_))));
    let wrong = QUIZ.replace("\"correctAnswer\": \"Layer 2\"", "\"correctAnswer\": \"Layer 7\"");
    assert!(matches!(parse_quiz(&wrong), Err(TutorError::InvalidAnswer(_))));
}

#[test]
fn schema_requires_every_field() {
    let schema = quiz_schema();
    assert_eq!(schema["type"], "ARRAY");
    assert_eq!(
        schema["items"]["required"],
        serde_json::json!(["question", "options", "correctAnswer", "explanation"])
    );
}

#[test]
fn select_tutor() {
    assert!(tutor_for(&TutorConfig::default()).is_ok());
    let remote = TutorConfig {
        model: "gemini-2.5-flash".to_string(),
        ..Default::default()
    };
    assert!(matches!(tutor_for(&remote), Err(TutorError::Unavailable(m)) if m == "gemini-2.5-flash"));
}

#[test]
fn glossary_answers() {
    let answer = offline().send_message(&[], "What is a VLAN?").unwrap();
    assert!(answer.starts_with("**VLAN**: A VLAN splits one physical switch"));
    let answer = offline().send_message(&[], "How do NAT and ARP differ").unwrap();
    assert!(answer.contains("**ARP**"));
    assert!(answer.contains("**NAT**"));
}

#[test]
fn command_answers() {
    let answer = offline().send_message(&[], "What does show ip route do?").unwrap();
    assert!(answer.starts_with("`show ip route` is available on Cisco (Show Configuration)."));
    let answer = offline().send_message(&[], "when do I use show arp").unwrap();
    assert!(answer.contains("Cisco (Show Layer 2)"));
    assert!(answer.contains("Juniper (Show Routing/Proto)"));
    assert!(answer.contains("Internet (Show)"));
}

#[test]
fn unknown_question() {
    let answer = offline().send_message(&[], "hello there").unwrap();
    assert!(answer.starts_with(NO_RESPONSE));
    assert!(answer.contains("vlan"));
}

#[test]
fn conversation_keeps_history() {
    let tutor = offline();
    let mut conversation = Conversation::new();
    let answer = conversation.ask(&tutor, "explain ospf").unwrap().to_string();
    assert!(answer.contains("**OSPF**"));
    conversation.ask(&tutor, "and bgp?").unwrap();

    let history = conversation.history();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history.iter().map(|m| m.role).collect::<Vec<_>>(),
        vec![Role::User, Role::Model, Role::User, Role::Model]
    );
    assert_eq!(history[0].text, "explain ospf");
    assert_eq!(history[1].text, answer);
    assert!(history[3].timestamp >= history[0].timestamp);
}

#[test]
fn quiz_about_a_topic() {
    let quiz = offline().generate_quiz("vlan").unwrap();
    assert_eq!(quiz.len(), 3);
    quiz.iter().for_each(|q| q.validate().unwrap());

    assert_eq!(quiz[0].question, "Which vendor uses the command `vlan`?");
    assert_eq!(quiz[0].options, vec!["Cisco", "Juniper", "Fortinet", "Palo Alto"]);
    assert_eq!(quiz[0].correct_answer, "Cisco");

    assert_eq!(quiz[1].question, "Which statement about VLAN is correct?");
    assert_eq!(quiz[1].options.len(), 4);
    assert!(quiz[1].correct_answer.starts_with("A VLAN splits"));

    assert_eq!(
        quiz[2].options,
        vec!["R1(config)#", "[edit] root@R1#", "R1 (interface) #", "admin@R1#"]
    );
    assert_eq!(quiz[2].correct_answer, "R1(config)#");
}

#[test]
fn quiz_about_anything() {
    for topic in ["", "x", "routing between zones", "how do firewalls work?"] {
        let quiz: Vec<Quiz> = offline().generate_quiz(topic).unwrap();
        assert_eq!(quiz.len(), 3, "topic {topic:?}");
        quiz.iter().for_each(|q| q.validate().unwrap());
        // every option is unique
        for q in quiz.iter() {
            let mut options = q.options.clone();
            options.sort();
            options.dedup();
            assert_eq!(options.len(), q.options.len());
        }
    }
}

#[test]
fn request_for_a_remote_model() {
    let config = TutorConfig::default();
    let tutor = offline();
    let mut conversation = Conversation::new();
    conversation.ask(&tutor, "what is a subnet").unwrap();

    let request = chat_request(&config, conversation.history(), "and a vlan?");
    assert_eq!(request["systemInstruction"], config.system_instruction.as_str());
    let contents = request["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["role"], "user");
    assert_eq!(contents[2]["parts"][0]["text"], "and a vlan?");
}
