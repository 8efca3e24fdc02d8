//! FitPrompt command-line entry point.
//!
//! # Responsibility
//! - Drive the core services against the durable SQLite store.
//! - Keep output plain so it can be piped into a clipboard tool.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fitprompt_core::db::{open_db, DbError};
use fitprompt_core::{
    core_version, init_logging, ping, security_headers, CoachError, CoachService, CoreConfig,
    FitnessProfile, KvProfileRepository, SqliteKeyValueStore, ThemeError, ThemeService,
};
use log::info;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("logging init failed: {0}")]
    Logging(String),
    #[error("database open failed: {0}")]
    Db(#[from] DbError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Coach(#[from] CoachError),
    #[error("failed to read `{path}`: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid profile JSON: {0}")]
    ProfileJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fitprompt", about = "Fitness coaching prompt generator", version)]
struct Cli {
    /// SQLite database path (defaults to FITPROMPT_DB_PATH or the temp dir).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Theme(ThemeCommand),
    Profile(ProfileCommand),
    /// Print the coaching prompt for the saved profile.
    Prompt,
    Reply(ReplyCommand),
    /// Clear the saved profile and reply.
    Reset,
    /// Print the HTTP security headers for hosting the web app.
    Headers,
}

#[derive(Args, Debug)]
struct ThemeCommand {
    #[command(subcommand)]
    command: ThemeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ThemeSubcommand {
    Show,
    Toggle,
    Set { mode: ThemeMode },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeMode {
    On,
    Off,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    /// Save a profile from a JSON file (`-` reads stdin).
    Save { path: String },
}

#[derive(Args, Debug)]
struct ReplyCommand {
    #[command(subcommand)]
    command: ReplySubcommand,
}

#[derive(Subcommand, Debug)]
enum ReplySubcommand {
    /// Record the AI reply from a file (`-` reads stdin).
    Record { path: String },
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli);
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(CliError::Logging)?;
    }

    match cli.command {
        Command::Ping => {
            println!("fitprompt_core ping={}", ping());
            println!("fitprompt_core version={}", core_version());
            Ok(())
        }
        Command::Headers => {
            for (name, value) in security_headers() {
                println!("{name}: {value}");
            }
            Ok(())
        }
        Command::Theme(theme) => with_store(&config, |store| run_theme(theme.command, store)),
        Command::Profile(profile) => with_store(&config, |store| {
            run_profile(profile.command, &CoachService::new(KvProfileRepository::new(store)))
        }),
        Command::Prompt => with_store(&config, |store| {
            let service = CoachService::new(KvProfileRepository::new(store));
            println!("{}", service.generate_prompt()?);
            Ok(())
        }),
        Command::Reply(reply) => with_store(&config, |store| {
            run_reply(reply.command, &CoachService::new(KvProfileRepository::new(store)))
        }),
        Command::Reset => with_store(&config, |store| {
            CoachService::new(KvProfileRepository::new(store)).reset()?;
            println!("profile and reply cleared");
            Ok(())
        }),
    }
}

/// Opens the configured database only for commands that touch stored state.
fn with_store(
    config: &CoreConfig,
    command: impl FnOnce(&SqliteKeyValueStore<'_>) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let conn = open_db(&config.db_path)?;
    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );
    command(&SqliteKeyValueStore::new(&conn))
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path.clone_from(db);
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    config
}

fn run_theme(command: ThemeSubcommand, store: &SqliteKeyValueStore<'_>) -> Result<(), CliError> {
    let service = ThemeService::new(store);
    match command {
        ThemeSubcommand::Show => {}
        ThemeSubcommand::Toggle => service.toggle()?,
        ThemeSubcommand::Set { mode } => service.set_dark_mode(matches!(mode, ThemeMode::On))?,
    }
    println!("{}", if service.is_dark_mode() { "dark" } else { "light" });
    Ok(())
}

fn run_profile(
    command: ProfileSubcommand,
    service: &CoachService<KvProfileRepository<&SqliteKeyValueStore<'_>>>,
) -> Result<(), CliError> {
    match command {
        ProfileSubcommand::Show => match service.profile()? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("no profile saved"),
        },
        ProfileSubcommand::Save { path } => {
            let raw = read_input(&path)?;
            let profile: FitnessProfile = serde_json::from_str(&raw)?;
            let saved = service.save_profile(&profile)?;
            println!("saved profile for {}", saved.display_name);
        }
    }
    Ok(())
}

fn run_reply(
    command: ReplySubcommand,
    service: &CoachService<KvProfileRepository<&SqliteKeyValueStore<'_>>>,
) -> Result<(), CliError> {
    match command {
        ReplySubcommand::Record { path } => {
            let raw = read_input(&path)?;
            let reply = service.record_reply(&raw)?;
            println!("recorded reply ({} chars)", reply.body.chars().count());
        }
        ReplySubcommand::Show => match service.latest_reply()? {
            Some(reply) => println!("{}", reply.body),
            None => println!("no reply recorded"),
        },
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_string(),
        source,
    };

    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(read_error)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(read_error)
}
