use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use companion_client::{ClientConfig, HttpChatClient, JournalClient, MemoryClient};
use companion_core::chat::{
    ChatSession, ChatTransport, ConversationRegistry, ConversationSummary, EntryRole,
    SessionSnapshot,
};
use companion_core::config::{DEMO_USER_ID, HEALTH_PROBE_INTERVAL};
use companion_core::health::HealthMonitor;

const COMMANDS: &[&str] = &[
    "/new", "/list", "/open", "/pin", "/delete", "/memories", "/journal", "/dismiss", "/quit",
];

/// Readline helper providing slash-command completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = COMMANDS
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

impl Highlighter for CliHelper {
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

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_snapshot(snapshot: &SessionSnapshot) {
    for entry in &snapshot.messages {
        let speaker = match entry.role {
            EntryRole::User => "You".bright_green(),
            EntryRole::Assistant => "Companion".bright_blue(),
        };
        println!("{speaker}: {}", entry.text);
    }
}

fn print_error(snapshot: &SessionSnapshot) {
    if let Some(error) = &snapshot.error {
        println!("{} {}", "error:".bright_red(), error);
    }
}

fn print_conversations(summaries: &[ConversationSummary]) {
    if summaries.is_empty() {
        println!("{}", "No conversations yet.".dimmed());
        return;
    }
    for (index, summary) in summaries.iter().enumerate() {
        let pin = if summary.pinned { "*" } else { " " };
        println!(
            "{pin}{:>3}. {} ({} messages, last {})",
            index + 1,
            summary.first_message,
            summary.message_count,
            summary.last_message_time
        );
    }
}

/// Resolves a `/open 2`-style argument against the last listed conversations.
fn resolve_conversation<'a>(
    summaries: &'a [ConversationSummary],
    arg: &'a str,
) -> Option<&'a ConversationSummary> {
    if let Ok(index) = arg.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| summaries.get(i));
    }
    summaries.iter().find(|s| s.conversation_id == arg)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env();
    let user_id =
        std::env::var("COMPANION_USER_ID").unwrap_or_else(|_| DEMO_USER_ID.to_string());
    let transport = Arc::new(HttpChatClient::new(&config));
    let journal = JournalClient::new(&config);
    let memory = MemoryClient::new(&config);

    let session = Arc::new(ChatSession::new(transport.clone()));
    let registry = ConversationRegistry::new(transport.clone());

    let probe_client = transport.clone();
    let mut monitor = HealthMonitor::start(HEALTH_PROBE_INTERVAL, move || {
        let client = probe_client.clone();
        async move { client.probe_health().await }
    });

    println!("{}", "Companion chat. /list to browse, /quit to exit.".dimmed());

    let mut summaries = registry.refresh(&user_id).await;
    print_conversations(&summaries);

    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    loop {
        if monitor.banner_visible() {
            println!(
                "{} {}",
                "!".bright_yellow(),
                companion_core::BACKEND_UNREACHABLE_MSG.bright_yellow()
            );
        }

        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        let (command, arg) = match trimmed.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };

        match command {
            "/quit" => break,
            "/dismiss" => monitor.dismiss(),
            "/new" => {
                session.new_conversation().await;
                println!("{}", "Started a new conversation.".dimmed());
            }
            "/list" => {
                summaries = registry.refresh(&user_id).await;
                print_conversations(&summaries);
            }
            "/open" => match resolve_conversation(&summaries, arg) {
                Some(summary) => {
                    let id = summary.conversation_id.clone();
                    session.set_conversation(Some(id.clone())).await;
                    session.load_history(&user_id, Some(&id)).await;
                    let snapshot = session.snapshot().await;
                    print_snapshot(&snapshot);
                    print_error(&snapshot);
                }
                None => println!("{}", "No such conversation.".bright_red()),
            },
            "/pin" => match resolve_conversation(&summaries, arg) {
                Some(summary) => {
                    let (id, pinned) = (summary.conversation_id.clone(), summary.pinned);
                    summaries = registry.toggle_pin(&user_id, &id, pinned).await;
                    print_conversations(&summaries);
                }
                None => println!("{}", "No such conversation.".bright_red()),
            },
            "/delete" => match resolve_conversation(&summaries, arg) {
                Some(summary) => {
                    let id = summary.conversation_id.clone();
                    summaries = registry.delete(&user_id, &id, &session).await;
                    print_conversations(&summaries);
                }
                None => println!("{}", "No such conversation.".bright_red()),
            },
            "/memories" => match memory.memories(&user_id).await {
                Ok(memories) => {
                    for memory in memories {
                        println!("[{}] {}", memory.category.bright_magenta(), memory.content);
                    }
                }
                Err(err) => println!(
                    "{} {}",
                    "error:".bright_red(),
                    err.user_message("Failed to load memories")
                ),
            },
            "/journal" => match journal.ai_journals(&user_id, 10, 0).await {
                Ok(entries) => {
                    for entry in entries {
                        println!("{}", entry.reflection.italic());
                    }
                }
                Err(err) => println!(
                    "{} {}",
                    "error:".bright_red(),
                    err.user_message("Failed to load journal")
                ),
            },
            _ => {
                let before = session.snapshot().await.messages.len();
                session.send(&user_id, trimmed).await;
                let snapshot = session.snapshot().await;
                for entry in snapshot.messages.iter().skip(before) {
                    if entry.role == EntryRole::Assistant {
                        println!("{}: {}", "Companion".bright_blue(), entry.text);
                    }
                }
                print_error(&snapshot);
                // A first send mints the conversation id; keep the list fresh.
                if snapshot.current_conversation_id.is_some() {
                    summaries = registry.refresh(&user_id).await;
                }
            }
        }
    }

    monitor.stop();
    Ok(())
}
