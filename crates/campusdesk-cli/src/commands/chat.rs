//! AI chat panels: one-shot sends and the interactive REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};

use anyhow::Result;
use campusdesk_application::{ChatOutcome, ChatService};
use campusdesk_core::chat::{
    ChatMessage, ChatPanel, ChatRole, FileData, QUICK_PROBLEMS, quick_problem,
};
use campusdesk_interaction::load_attachment;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::Output;
use crate::app::App;

pub struct ChatArgs {
    pub message: Option<String>,
    pub quick: Option<String>,
    pub attach: Option<PathBuf>,
    pub clear: bool,
}

/// Slash commands understood by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Clear,
    History,
    Help,
    /// `/quick` alone lists the problems.
    Quick(Option<String>),
    Attach(PathBuf),
    Detach,
    Unknown(String),
}

impl ReplCommand {
    const NAMES: &'static [&'static str] = &[
        "/attach", "/clear", "/detach", "/help", "/history", "/quick", "/quit",
    ];

    /// `None` for ordinary chat input.
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Some(Self::Quit);
        }
        let rest = trimmed.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = (!arg.is_empty()).then(|| arg.to_string());

        Some(match (name, arg) {
            ("quit" | "exit", _) => Self::Quit,
            ("clear", _) => Self::Clear,
            ("history", _) => Self::History,
            ("help", _) => Self::Help,
            ("quick", arg) => Self::Quick(arg),
            ("attach", Some(path)) => Self::Attach(PathBuf::from(path)),
            ("detach", _) => Self::Detach,
            _ => Self::Unknown(trimmed.to_string()),
        })
    }
}

#[derive(Clone)]
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(id) = line.strip_prefix("/quick ") {
            let start = line.len() - id.len();
            let candidates = QUICK_PROBLEMS
                .iter()
                .filter(|p| p.id.starts_with(id))
                .map(|p| Pair {
                    display: format!("{} ({})", p.id, p.label),
                    replacement: p.id.to_string(),
                })
                .collect();
            return Ok((start, candidates));
        }

        if line.starts_with('/') {
            let candidates = ReplCommand::NAMES
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            ReplCommand::NAMES
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ChatHelper {}

fn speaker(panel: ChatPanel) -> &'static str {
    match panel {
        ChatPanel::Helpdesk => "Helpdesk",
        ChatPanel::Pro => "Pro AI",
    }
}

fn print_message(panel: ChatPanel, message: &ChatMessage) {
    match message.role {
        ChatRole::User => {
            let attachment = message
                .file_data
                .as_ref()
                .and_then(|file| file.name.as_deref())
                .map(|name| format!(" [{name}]"))
                .unwrap_or_default();
            println!("{}{}", format!("> {}", message.text).green(), attachment.bright_black());
        }
        ChatRole::Model => {
            println!("{}", format!("[{}]", speaker(panel)).bright_magenta());
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
    }
}

fn print_outcome(panel: ChatPanel, outcome: &ChatOutcome) {
    match outcome {
        ChatOutcome::Replied(reply) => print_message(panel, reply),
        ChatOutcome::Superseded => println!("{}", "(reply discarded: superseded)".bright_black()),
    }
}

fn print_quick_problems() {
    for problem in QUICK_PROBLEMS {
        println!("  {:<11} {}", problem.id.bright_cyan(), problem.label);
    }
}

fn print_help(panel: ChatPanel) {
    println!("{}", "Commands:".bold());
    println!("  /clear          reset the conversation");
    println!("  /history        show the transcript");
    if panel.accepts_attachments() {
        println!("  /attach <file>  attach a JPEG, PNG or PDF to the next message");
        println!("  /detach         drop the pending attachment");
    } else {
        println!("  /quick [id]     ask a common question");
    }
    println!("  /quit           leave the chat");
}

pub async fn run(app: &App, out: &Output, panel: ChatPanel, args: ChatArgs) -> Result<()> {
    let chat = app.open_chat(panel).await?;
    if args.clear {
        chat.clear().await;
    }

    let attachment = match &args.attach {
        Some(path) => Some(load_attachment(path).await?),
        None => None,
    };

    let outcome = if let Some(id) = &args.quick {
        Some(chat.send_quick(id).await?)
    } else if args.message.is_some() || attachment.is_some() {
        let prompt = args.message.as_deref().unwrap_or_default();
        Some(chat.send(prompt, attachment).await?)
    } else {
        None
    };

    match outcome {
        Some(outcome) => {
            if !out.json(&chat.messages().await)? {
                print_outcome(panel, &outcome);
            }
            Ok(())
        }
        None if out.is_json() => {
            out.json(&chat.messages().await)?;
            Ok(())
        }
        None if args.clear => {
            println!("{}", "Conversation cleared.".bright_green());
            Ok(())
        }
        None => repl(&chat).await,
    }
}

async fn send_with_interrupt(chat: &ChatService, prompt: &str, attachment: Option<FileData>) {
    println!("{}", "thinking...".bright_black());
    tokio::select! {
        outcome = chat.send(prompt, attachment) => match outcome {
            Ok(outcome) => print_outcome(chat.panel(), &outcome),
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Request abandoned.".yellow());
        }
    }
}

async fn attach(path: &Path) -> Option<FileData> {
    match load_attachment(path).await {
        Ok(file) => {
            println!(
                "{}",
                format!("Attached {} ({})", path.display(), file.mime_type).bright_black()
            );
            Some(file)
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            None
        }
    }
}

async fn repl(chat: &ChatService) -> Result<()> {
    let panel = chat.panel();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    println!("{}", format!("=== {} ===", speaker(panel)).bright_magenta().bold());
    println!("{}", "Type '/help' for commands or '/quit' to leave.".bright_black());
    println!();
    for message in chat.messages().await {
        print_message(panel, &message);
    }

    let mut pending: Option<FileData> = None;
    loop {
        let prompt = if pending.is_some() { "[+file] >> " } else { ">> " };
        match rl.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() && pending.is_none() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match ReplCommand::parse(&line) {
                    Some(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Some(ReplCommand::Clear) => {
                        chat.clear().await;
                        pending = None;
                        for message in chat.messages().await {
                            print_message(panel, &message);
                        }
                        println!("{}", "Conversation cleared.".bright_green());
                    }
                    Some(ReplCommand::History) => {
                        for message in chat.messages().await {
                            print_message(panel, &message);
                        }
                    }
                    Some(ReplCommand::Help) => print_help(panel),
                    Some(ReplCommand::Quick(None)) => print_quick_problems(),
                    Some(ReplCommand::Quick(Some(id))) => {
                        let Some(problem) = quick_problem(&id) else {
                            eprintln!("{}", format!("Unknown quick problem '{id}'").red());
                            print_quick_problems();
                            continue;
                        };
                        println!("{}", format!("> {}", problem.prompt).green());
                        send_with_interrupt(chat, problem.prompt, None).await;
                    }
                    Some(ReplCommand::Attach(path)) => {
                        if !panel.accepts_attachments() {
                            eprintln!("{}", "This panel does not accept attachments.".red());
                            continue;
                        }
                        if let Some(file) = attach(&path).await {
                            pending = Some(file);
                        }
                    }
                    Some(ReplCommand::Detach) => {
                        pending = None;
                        println!("{}", "Attachment dropped.".bright_black());
                    }
                    Some(ReplCommand::Unknown(input)) => {
                        println!("{}", format!("Unknown command: {input}").bright_black());
                    }
                    None => {
                        let trimmed = line.trim();
                        if !trimmed.is_empty() {
                            println!("{}", format!("> {trimmed}").green());
                        }
                        send_with_interrupt(chat, trimmed, pending.take()).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }
    Ok(())
}
