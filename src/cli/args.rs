//! Command-line argument parsing for chatstream.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Prompt for an API key and store it
    Login,
    /// Remove the stored API key
    Logout,
    /// List saved sessions
    Sessions,
    /// Start the REPL in a fresh session
    NewSession,
    /// Run the interactive REPL (default)
    Repl,
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first recognized argument wins. Unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use chatstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatstream".to_string(), "login".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Login);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "login" => return CliCommand::Login,
            "logout" => return CliCommand::Logout,
            "sessions" => return CliCommand::Sessions,
            "new" => return CliCommand::NewSession,
            _ => {}
        }
    }
    CliCommand::Repl
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["chatstream", "--version"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_version_short_flag() {
        assert_eq!(parse(&["chatstream", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_login_logout() {
        assert_eq!(parse(&["chatstream", "login"]), CliCommand::Login);
        assert_eq!(parse(&["chatstream", "logout"]), CliCommand::Logout);
    }

    #[test]
    fn test_parse_sessions_and_new() {
        assert_eq!(parse(&["chatstream", "sessions"]), CliCommand::Sessions);
        assert_eq!(parse(&["chatstream", "new"]), CliCommand::NewSession);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["chatstream"]), CliCommand::Repl);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse(&["chatstream", "--unknown"]), CliCommand::Repl);
    }

    #[test]
    fn test_program_name_is_not_a_command() {
        assert_eq!(parse(&["login"]), CliCommand::Repl);
    }

    #[test]
    fn test_first_recognized_argument_wins() {
        assert_eq!(parse(&["chatstream", "-x", "logout", "login"]), CliCommand::Logout);
    }
}
