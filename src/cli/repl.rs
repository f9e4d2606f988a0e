//! Line-oriented REPL helpers: slash-command parsing and incremental reply
//! printing.

use crate::cache::ConversationStore;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// `/new`
    NewSession,
    /// `/sessions`
    ListSessions,
    /// `/switch <n>` (1-based in the listing)
    Switch(usize),
    /// `/attach <path>`
    Attach(String),
    /// `/project <name>`
    Project(String),
    /// `/quit` or `/exit`
    Quit,
    /// Anything that is not a slash command
    Send(String),
    /// Blank line
    Empty,
    /// Malformed slash command, with a usage hint
    Invalid(String),
}

/// Parse one line of REPL input.
pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ReplCommand::Send(trimmed.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "new" => ReplCommand::NewSession,
        "sessions" => ReplCommand::ListSessions,
        "quit" | "exit" => ReplCommand::Quit,
        "switch" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => ReplCommand::Switch(n),
            _ => ReplCommand::Invalid("usage: /switch <n>".to_string()),
        },
        "attach" if !arg.is_empty() => ReplCommand::Attach(arg.to_string()),
        "attach" => ReplCommand::Invalid("usage: /attach <path>".to_string()),
        "project" if !arg.is_empty() => ReplCommand::Project(arg.to_string()),
        "project" => ReplCommand::Invalid("usage: /project <name>".to_string()),
        // Unknown commands go to the model as ordinary text
        _ => ReplCommand::Send(trimmed.to_string()),
    }
}

/// What to write for a new reply snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyUpdate {
    /// Nothing new
    Unchanged,
    /// Write this suffix after what is already printed
    Append(String),
    /// The reply no longer extends the printed text; print it again in full
    Reprint(String),
}

/// Turns successive full-reply snapshots into terminal output.
///
/// Snapshots normally grow by extension, so only the new suffix is printed.
/// A final error message replaces partial content and is reprinted whole.
#[derive(Debug, Default)]
pub struct ReplyPrinter {
    printed: String,
}

impl ReplyPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written so far.
    pub fn printed(&self) -> &str {
        &self.printed
    }

    pub fn update(&mut self, snapshot: &str) -> ReplyUpdate {
        if snapshot == self.printed {
            return ReplyUpdate::Unchanged;
        }
        let update = match snapshot.strip_prefix(self.printed.as_str()) {
            Some(suffix) => ReplyUpdate::Append(suffix.to_string()),
            None => ReplyUpdate::Reprint(snapshot.to_string()),
        };
        self.printed = snapshot.to_string();
        update
    }
}

/// One line per session, numbered for `/switch`, current marked with `*`.
pub fn session_lines(store: &ConversationStore) -> Vec<String> {
    let current = store.current_session_id();
    store
        .sessions()
        .iter()
        .enumerate()
        .map(|(i, session)| {
            let marker = if Some(session.id.as_str()) == current { '*' } else { ' ' };
            let project = session
                .project_id
                .as_deref()
                .and_then(|id| store.get_project(id))
                .map(|p| format!(" [{}]", p.name))
                .unwrap_or_default();
            format!(
                "{} {:>2}. {}{} ({} messages)",
                marker,
                i + 1,
                session.title,
                project,
                session.message_count()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::ExchangeOutcome;

    #[test]
    fn test_plain_text_is_sent() {
        assert_eq!(
            parse_line("  hello there \n"),
            ReplCommand::Send("hello there".to_string())
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line("/new"), ReplCommand::NewSession);
        assert_eq!(parse_line("/sessions"), ReplCommand::ListSessions);
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
        assert_eq!(parse_line("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn test_switch() {
        assert_eq!(parse_line("/switch 3"), ReplCommand::Switch(3));
        assert!(matches!(parse_line("/switch"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line("/switch 0"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line("/switch two"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_attach_keeps_spaces_in_path() {
        assert_eq!(
            parse_line("/attach  my notes.txt "),
            ReplCommand::Attach("my notes.txt".to_string())
        );
        assert!(matches!(parse_line("/attach"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_project() {
        assert_eq!(
            parse_line("/project Side Quest"),
            ReplCommand::Project("Side Quest".to_string())
        );
        assert!(matches!(parse_line("/project   "), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_unknown_slash_is_sent() {
        assert_eq!(
            parse_line("/shrug ok"),
            ReplCommand::Send("/shrug ok".to_string())
        );
    }

    #[test]
    fn test_printer_appends_suffixes() {
        let mut printer = ReplyPrinter::new();
        assert_eq!(printer.update("Hel"), ReplyUpdate::Append("Hel".to_string()));
        assert_eq!(printer.update("Hel"), ReplyUpdate::Unchanged);
        assert_eq!(printer.update("Hello"), ReplyUpdate::Append("lo".to_string()));
        assert_eq!(printer.printed(), "Hello");
    }

    #[test]
    fn test_printer_reprints_on_replacement() {
        let mut printer = ReplyPrinter::new();
        printer.update("Partial ans");
        assert_eq!(
            printer.update("Error: Connection lost"),
            ReplyUpdate::Reprint("Error: Connection lost".to_string())
        );
        assert_eq!(printer.printed(), "Error: Connection lost");
    }

    #[test]
    fn test_printer_multibyte_suffix() {
        let mut printer = ReplyPrinter::new();
        printer.update("caf");
        assert_eq!(printer.update("café ☕"), ReplyUpdate::Append("é ☕".to_string()));
    }

    #[test]
    fn test_session_lines_mark_current() {
        let mut store = ConversationStore::new();
        let older = store.create_session();
        let ex = store.begin_exchange(&older, "Weekend plans", Vec::new()).unwrap();
        store.finalize_exchange(&older, ex, ExchangeOutcome::Completed("Hike.".into()));
        let project = store.create_project("Home");
        store.assign_session_to_project(&older, Some(&project));
        store.create_session();

        let lines = session_lines(&store);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("*  1. New Chat"));
        assert_eq!(lines[1], "   2. Weekend plans [Home] (2 messages)");
    }
}
