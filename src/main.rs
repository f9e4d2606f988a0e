use chatstream::adapters::{FileCredentialsProvider, FileStorage, ReqwestHttpClient};
use chatstream::app::App;
use chatstream::cli::{
    handle_version_command, parse_args, parse_line, session_lines, CliCommand, ReplCommand,
    ReplyPrinter, ReplyUpdate,
};
use chatstream::config::Config;
use chatstream::traits::{ApiCredentials, CredentialsProvider};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CHATSTREAM_LOG";

/// Log to stderr so stdout carries only replies.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        handle_version_command();
    }

    color_eyre::install()?;
    init_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(command))
}

async fn run(command: CliCommand) -> Result<()> {
    let credentials = Arc::new(FileCredentialsProvider::new()?);

    match command {
        CliCommand::Login => return login(credentials.as_ref()).await,
        CliCommand::Logout => {
            credentials.clear().await?;
            println!("Stored API key removed.");
            return Ok(());
        }
        _ => {}
    }

    let config = Config::from_env()?;
    let storage = Arc::new(
        FileStorage::new(config.data_dir.clone()).with_quota(config.storage_quota_bytes),
    );
    let http = Arc::new(ReqwestHttpClient::new());
    let mut app = App::new(config, http, credentials, storage)?;

    match command {
        CliCommand::Sessions => {
            print_sessions(&app);
            Ok(())
        }
        CliCommand::NewSession => {
            app.new_session();
            repl(&mut app).await
        }
        _ => repl(&mut app).await,
    }
}

async fn login(credentials: &dyn CredentialsProvider) -> Result<()> {
    let key = rpassword::prompt_password("OpenAI API key: ")?;
    let creds = ApiCredentials::new(key.trim());
    if creds.is_empty() {
        return Err(eyre!("No key entered"));
    }
    credentials.save(&creds).await?;
    println!("API key saved.");
    Ok(())
}

fn print_sessions(app: &App) {
    let lines = session_lines(&app.store);
    if lines.is_empty() {
        println!("No sessions yet.");
    }
    for line in lines {
        println!("{}", line);
    }
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

async fn repl(app: &mut App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::NewSession => {
                app.new_session();
                println!("Started a new session.");
            }
            ReplCommand::ListSessions => print_sessions(app),
            ReplCommand::Switch(n) => {
                if app.switch_session(n - 1) {
                    let title = app.store.current_session().map(|s| s.title.as_str());
                    println!("Switched to {}", title.unwrap_or_default());
                } else {
                    println!("No session {}", n);
                }
            }
            ReplCommand::Attach(path) => match app.attach_file(Path::new(&path)) {
                Ok(attachment) => println!("Attached {}", attachment.name()),
                Err(err) => println!("{}", err),
            },
            ReplCommand::Project(name) => {
                if app.use_project(&name).is_some() {
                    println!("Using project {}", name);
                }
            }
            ReplCommand::Invalid(usage) => println!("{}", usage),
            ReplCommand::Send(text) => send(app, &text).await?,
        }
        prompt()?;
    }
    Ok(())
}

/// Submit `text` and print the reply as it streams in.
async fn send(app: &mut App, text: &str) -> Result<()> {
    let Some((session_id, exchange)) = app.submit_message(text) else {
        return Ok(());
    };

    let mut printer = ReplyPrinter::new();
    let mut write_error = None;
    app.drive_exchange(&session_id, exchange, |app| {
        let Some(reply) = app
            .store
            .get_session(&session_id)
            .and_then(|s| s.last_message())
        else {
            return;
        };
        let mut stdout = io::stdout();
        let result = match printer.update(&reply.content) {
            ReplyUpdate::Unchanged => Ok(()),
            ReplyUpdate::Append(suffix) => write!(stdout, "{}", suffix),
            ReplyUpdate::Reprint(full) => write!(stdout, "\n{}", full),
        }
        .and_then(|_| stdout.flush());
        if let Err(err) = result {
            write_error.get_or_insert(err);
        }
    })
    .await;
    println!();

    if let Some(err) = write_error {
        return Err(err.into());
    }
    if let Some(err) = app.save_error() {
        eprintln!("Warning: {}", err);
    }
    Ok(())
}
