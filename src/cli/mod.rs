//! CLI module for chatstream.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - REPL command parsing and reply printing
//!
//! # Usage
//!
//! ```ignore
//! use chatstream::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => chatstream::cli::handle_version_command(),
//!     CliCommand::Repl => run_repl(),
//!     // ...
//! }
//! ```

pub mod args;
pub mod repl;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use repl::{parse_line, session_lines, ReplCommand, ReplyPrinter, ReplyUpdate};
pub use version::{handle_version_command, version_line, VERSION};
