//! This client calls every endpoint of the notes server and prints what
//! comes back. The server address is read from the local configuration,
//! the BASE_URL environment variable, or the `--base-url` flag.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use config::{Config, File, FileFormat};
use notes::notes::{request::NoteRequest, response::NotesResponse};
use reqwest::{blocking::Response, StatusCode};
use tracing::debug;

/// The base URL used when neither the flag, the environment nor the config
/// file name one.
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    #[command(subcommand)]
    cmd: Command,
    /// The address of the notes server.
    #[arg(long)]
    base_url: Option<String>,
    /// Log requests as they are made.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print every note.
    List,
    /// Print a single note.
    Get { id: String },
    /// Store a new note.
    Create { text: String },
    /// Replace the text of a note.
    Update { id: String, text: String },
    /// Remove a note.
    Delete { id: String },
    /// Print the server's request counters.
    Metrics,
}

/// Finds the location for this app's local configuration.
fn get_config_base_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        Ok(PathBuf::from(path))
    } else if let Some(home) = dirs::home_dir() {
        Ok(home.join(".config"))
    } else {
        Err(anyhow!("failed to find config file path"))
    }
}

/// Reads `base_url` from the config file, if there is one.
fn load_base_url(config_file_path: &Path) -> anyhow::Result<Option<String>> {
    let config = Config::builder()
        .add_source(
            File::from(config_file_path.to_path_buf())
                .required(false)
                .format(FileFormat::Toml),
        )
        .build()
        .context("failed to load config file")?;

    match config.get::<String>("base_url") {
        Ok(url) => Ok(Some(url)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(err) => Err(err).context("property 'base_url' is invalid"),
    }
}

/// Fails with the server's message unless the response is a success.
fn check(res: Response) -> anyhow::Result<Response> {
    let status = res.status();

    if status.is_success() {
        Ok(res)
    } else {
        let message = res.text().unwrap_or_default();
        Err(anyhow!("request failed with {status}: {message}"))
    }
}

fn print_notes(res: Response) -> anyhow::Result<()> {
    let notes = check(res)?
        .json::<NotesResponse>()
        .context("failed to parse notes response")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&notes).context("failed to format notes")?
    );

    Ok(())
}

fn run(cmd: Command, base_url: &str, client: &reqwest::blocking::Client) -> anyhow::Result<()> {
    let notes_url = format!("{base_url}/notes");

    match cmd {
        Command::List => {
            debug!("listing notes");
            print_notes(client.get(&notes_url).send().context("request for notes failed")?)
        }
        Command::Get { id } => {
            debug!("fetching note {:?}", id);
            print_notes(
                client
                    .get(format!("{notes_url}/{id}"))
                    .send()
                    .context("request for note failed")?,
            )
        }
        Command::Create { text } => {
            debug!("creating note");
            print_notes(
                client
                    .post(&notes_url)
                    .json(&NoteRequest { text })
                    .send()
                    .context("request to create note failed")?,
            )
        }
        Command::Update { id, text } => {
            debug!("updating note {:?}", id);
            print_notes(
                client
                    .put(format!("{notes_url}/{id}"))
                    .json(&NoteRequest { text })
                    .send()
                    .context("request to update note failed")?,
            )
        }
        Command::Delete { id } => {
            debug!("deleting note {:?}", id);

            let res = check(
                client
                    .delete(format!("{notes_url}/{id}"))
                    .send()
                    .context("request to delete note failed")?,
            )?;

            if res.status() != StatusCode::NO_CONTENT {
                return Err(anyhow!("unexpected status {}", res.status()));
            }

            Ok(())
        }
        Command::Metrics => {
            debug!("fetching metrics");

            let res = check(
                client
                    .get(format!("{base_url}/metrics"))
                    .send()
                    .context("request for metrics failed")?,
            )?;

            print!("{}", res.text().context("failed to read metrics")?);

            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    // setup logging
    if opts.verbose {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("client=debug")
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .context("failed to set global default")?;
    }

    // determine the server address
    let config_file_path = get_config_base_path()?.join("notes").join("config.toml");

    debug!("config file path: {:?}", config_file_path);

    let base_url = match opts.base_url.or_else(|| std::env::var("BASE_URL").ok()) {
        Some(url) => url,
        None => load_base_url(&config_file_path)?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    };
    let base_url = base_url.trim_end_matches('/');

    debug!("base url: {:?}", base_url);

    // use the same http client for all requests
    let client = reqwest::blocking::Client::new();

    run(opts.cmd, base_url, &client)
}
