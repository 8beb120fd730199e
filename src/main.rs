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

use std::{
    error::Error,
    io::{BufRead, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use labsim::{prelude::*, registry::registry_for};
use log::*;

use netlab::{
    config::{Config, TutorConfig},
    session::{LabSession, MetaCommand, Playback, META_HELP},
    tutor::{tutor_for, ChatService, Conversation, OfflineTutor, Quiz},
};

/// Interactive console for the built-in networking labs.
#[derive(Debug, Parser)]
struct Cli {
    /// Configuration file (TOML). Defaults to the file in `NETLAB_CONFIG`.
    #[clap(long = "config", short = 'c', global = true)]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all labs of the catalog.
    List,
    /// Open the console of a lab.
    Run {
        /// Lab to start. Defaults to the lab in the configuration.
        lab: Option<String>,
        /// Device whose console is opened first.
        #[clap(long = "device", short = 'd')]
        device: Option<String>,
    },
    /// Simulate a packet through a lab.
    Simulate {
        /// Lab to simulate
        lab: String,
        /// Source device. Defaults to the device the console would open.
        #[clap(long = "from", short = 'f')]
        from: Option<String>,
        /// Protocol of the flow (http, https, ssh, telnet, dns or ping).
        #[clap(long = "protocol", short = 'p', default_value = "http")]
        protocol: Protocol,
        /// Stop at this device.
        #[clap(long = "to", short = 't')]
        to: Option<String>,
    },
    /// Show the command reference of a device.
    HelpCommands {
        /// Lab of the device
        lab: String,
        /// Device id
        device: String,
    },
    /// Ask the tutor a question.
    Ask {
        /// The question
        #[clap(required = true)]
        question: Vec<String>,
    },
    /// Generate a quiz about a topic.
    Quiz {
        /// The topic
        #[clap(required = true)]
        topic: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init_timed();

    let args = Cli::parse();
    let config = Config::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::List => {
            for lab in catalog::labs()? {
                println!(
                    "{:<16} {} ({:?}, {})",
                    lab.id(),
                    lab.title,
                    lab.difficulty,
                    lab.vendor_label
                );
            }
        }
        Command::Run { lab, device } => {
            let lab = lab.unwrap_or_else(|| config.console.default_lab.clone());
            console(&lab, device.as_deref(), &config)?;
        }
        Command::Simulate {
            lab,
            from,
            protocol,
            to,
        } => {
            let mut session = LabSession::start(&lab, config.console.clone())?;
            if let Some(from) = from {
                session.select(&from)?;
            }
            let playback = session.simulate(protocol, to.as_deref())?;
            play(&session, playback, false);
        }
        Command::HelpCommands { lab, device } => {
            let lab = catalog::lab(&lab)?;
            let device = lab.device(&device)?;
            for line in registry_for(device.family()).help_lines(device.vendor()) {
                println!("{line}");
            }
        }
        Command::Ask { question } => {
            let tutor = tutor(&config.tutor);
            println!("{}", tutor.send_message(&[], &question.join(" "))?);
        }
        Command::Quiz { topic } => {
            let tutor = tutor(&config.tutor);
            let quiz = tutor.generate_quiz(&topic.join(" "))?;
            run_quiz(&quiz, &mut std::io::stdin().lock())?;
        }
    }

    Ok(())
}

/// Get the configured tutor, or the offline tutor if the model is not available.
fn tutor(config: &TutorConfig) -> Box<dyn ChatService> {
    tutor_for(config).unwrap_or_else(|e| {
        warn!("{e}. Using the offline tutor instead.");
        Box::new(OfflineTutor::new(config.clone()))
    })
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}

/// Reveal the steps of a simulation one by one.
fn play(session: &LabSession, mut playback: Playback, animate: bool) {
    let delay = playback.delay();
    while let Some(step) = playback.tick() {
        println!("{}", step.fmt(session.lab()));
        if animate && !playback.is_done() {
            std::thread::sleep(delay);
        }
    }
    match playback.outcome() {
        Some(StepOutcome::Drop) => println!("Packet dropped."),
        Some(_) => println!("Packet delivered."),
        None => println!("Nothing to simulate."),
    }
}

/// Ask every question of a quiz and count the correct answers.
fn run_quiz(quiz: &[Quiz], input: &mut impl BufRead) -> Result<(), Box<dyn Error>> {
    let mut score = 0;
    for (i, q) in quiz.iter().enumerate() {
        println!("\n{}. {}", i + 1, q.question);
        for (letter, option) in ('a'..).zip(q.options.iter()) {
            println!("   {letter}) {option}");
        }
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        let answer = line
            .trim()
            .chars()
            .next()
            .and_then(|c| ('a'..).zip(q.options.iter()).find(|(l, _)| *l == c))
            .map(|(_, o)| o.as_str())
            .unwrap_or_default();
        if q.is_correct(answer) {
            score += 1;
            println!("Correct! {}", q.explanation);
        } else {
            println!("The answer is: {}. {}", q.correct_answer, q.explanation);
        }
    }
    println!("\nScore: {score}/{}", quiz.len());
    Ok(())
}

/// The interactive console.
fn console(lab: &str, device: Option<&str>, config: &Config) -> Result<(), Box<dyn Error>> {
    let tutor = tutor(&config.tutor);
    let mut conversation = Conversation::new();
    let mut session = LabSession::start(lab, config.console.clone())?;
    if let Some(device) = device {
        session.select(device)?;
    }

    println!(
        "{} ({:?})\n{}\nType :help for the console commands.\n",
        session.lab().title,
        session.lab().difficulty,
        session.lab().description
    );
    print_lines(session.unread());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{} ", session.prompt());
        std::io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if !line.trim_start().starts_with(':') {
            match session.submit(line) {
                Ok(output) => print_lines(output),
                Err(e) => println!("% {e}"),
            }
            continue;
        }

        let result = match line.parse::<MetaCommand>() {
            Ok(MetaCommand::Quit) => break,
            Ok(MetaCommand::Quiz(topic)) => tutor
                .generate_quiz(&topic)
                .map_err(Box::<dyn Error>::from)
                .and_then(|quiz| run_quiz(&quiz, &mut input)),
            Ok(cmd) => meta(&mut session, cmd, tutor.as_ref(), &mut conversation),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            println!("% {e}");
        }
    }

    info!("Leaving lab {}", session.lab().id());
    Ok(())
}

/// Execute a console command that does not go to the device.
fn meta(
    session: &mut LabSession,
    cmd: MetaCommand,
    tutor: &dyn ChatService,
    conversation: &mut Conversation,
) -> Result<(), Box<dyn Error>> {
    match cmd {
        MetaCommand::Help => {
            print_lines(META_HELP.iter().map(|l| l.to_string()));
            println!();
            let device = session.active();
            print_lines(registry_for(device.family()).help_lines(device.vendor()));
        }
        MetaCommand::Devices => print_lines(session.device_rows()),
        MetaCommand::Use(id) => {
            session.select(&id)?;
            print_lines(session.unread());
        }
        MetaCommand::Topology => println!("{}", session.lab().topology().fmt(session.lab())),
        MetaCommand::Neighbors(kind) => {
            let neighbors = session.neighbors(kind)?;
            if neighbors.is_empty() {
                println!("No neighbors found.");
            }
            print_lines(neighbors);
        }
        MetaCommand::Complete(partial) => println!("{}", session.complete(&partial)?),
        MetaCommand::Simulate {
            protocol,
            destination,
        } => {
            let playback = session.simulate(protocol, destination.as_deref())?;
            play(session, playback, true);
        }
        MetaCommand::Gui(edit) => println!("{}", session.apply_gui(&edit)?),
        MetaCommand::Objectives => {
            let objectives = &session.lab().objectives;
            print_lines(
                objectives
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("{}. {o}", i + 1)),
            );
        }
        MetaCommand::Docs => {
            let docs = &session.lab().documentation;
            println!("Initial configuration:\n{}", docs.initial_config);
            println!("\nPacket flow:\n{}", docs.packet_flow);
        }
        MetaCommand::Restart => {
            session.restart()?;
            println!("Lab {} restarted.", session.lab().id());
            print_lines(session.unread());
        }
        MetaCommand::Ask(question) => println!("{}", conversation.ask(tutor, &question)?),
        MetaCommand::Quiz(_) | MetaCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["netlab", "simulate", "lab-instance-e", "--protocol", "dns"]);
        match cli.command {
            Command::Simulate { lab, protocol, .. } => {
                assert_eq!(lab, "lab-instance-e");
                assert_eq!(protocol, Protocol::Dns);
            }
            c => panic!("unexpected command {c:?}"),
        }
        assert!(Cli::try_parse_from(["netlab", "ask"]).is_err());
    }

    #[test]
    fn quiz_is_scored_from_letters() {
        let quiz = vec![Quiz {
            question: "Q".to_string(),
            options: vec!["x".to_string(), "y".to_string()],
            correct_answer: "y".to_string(),
            explanation: String::new(),
        }];
        assert!(run_quiz(&quiz, &mut "b\n".as_bytes()).is_ok());
        assert!(run_quiz(&quiz, &mut "".as_bytes()).is_ok());
    }
}
