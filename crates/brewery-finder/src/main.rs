//! Brewery finder entry point.
//!
//! Reads commands from stdin, searches the Open Brewery DB for breweries
//! in the chosen US state, and draws the filtered list on stdout. Logs go
//! to stderr so they never interleave with the page.
//!
//! # Architecture
//!
//! ```text
//! stdin --> Command --> Controller --> spawned PendingSearch --> directory
//!                           ^                    |
//!                           +---- SearchEvent ---+
//! ```
//!
//! Everything that touches the view state runs on this one task; searches
//! only report back through a channel, so a newer search always wins.

mod command;
mod terminal;

use std::io::Stdout;
use std::sync::Arc;

use brewery_core::{
    BreweryDirectory, BreweryError, Controller, FinderConfig, FixtureDirectory, HttpDirectory,
    PendingSearch, SearchEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::terminal::TerminalPort;

/// The controller as wired up for the terminal.
type TerminalController = Controller<TerminalPort<Stdout>>;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// picks the directory backend, draws the initial page, then serves
/// commands until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the fixture cannot be
/// read, or stdin/stdout fail.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("brewery-finder starting");

    let config = FinderConfig::from_env()?;
    info!(
        api_url = config.api_url,
        fetch_delay_min_ms = config.delays.fetch_min.as_millis(),
        fetch_delay_max_ms = config.delays.fetch_max.as_millis(),
        receive_delay_ms = config.delays.receive.as_millis(),
        "configuration loaded"
    );

    let directory = build_directory(&config)?;
    info!(backend = directory.name(), "brewery directory configured");

    let mut controller = Controller::new(
        TerminalPort::new(std::io::stdout()),
        Arc::new(directory),
        config.delays,
    );
    controller.initialise().await;
    controller.port_mut().notice(HELP);

    let (tx, mut rx) = mpsc::unbounded_channel::<SearchEvent>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("end of input");
                    break;
                };
                if handle_line(&mut controller, &line, &tx) == Flow::Quit {
                    break;
                }
            }
            Some(event) = rx.recv() => {
                controller.apply(event);
            }
        }

        if let Some(e) = controller.port_mut().take_error() {
            return Err(e.into());
        }
    }

    info!("brewery-finder shutting down");
    Ok(())
}

/// Pick the fixture backend when one is configured, the live API otherwise.
fn build_directory(config: &FinderConfig) -> Result<BreweryDirectory, BreweryError> {
    match &config.fixture_path {
        Some(path) => {
            info!(path = %path.display(), "serving breweries from fixture file");
            Ok(BreweryDirectory::Fixture(FixtureDirectory::from_file(path)?))
        }
        None => Ok(BreweryDirectory::Http(HttpDirectory::new(&config.api_url)?)),
    }
}

/// Dispatch one input line to the matching listener.
fn handle_line(
    controller: &mut TerminalController,
    line: &str,
    events: &UnboundedSender<SearchEvent>,
) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "ignoring command");
            controller.port_mut().notice(&format!("{e}\n{HELP}"));
            return Flow::Continue;
        }
    };

    match command {
        Command::Region(region) => {
            let pending = controller.submit_region(&region);
            spawn_search(controller, pending, events);
        }
        Command::Type(brewery_type) => {
            let pending = controller.change_type_filter(brewery_type);
            spawn_search(controller, pending, events);
        }
        Command::City { name, included } => {
            if !controller.toggle_city(&name, included) {
                controller
                    .port_mut()
                    .notice(&format!("city filter unchanged for `{name}`"));
            }
        }
        Command::Show => {
            controller.refresh();
        }
        Command::Help => controller.port_mut().notice(HELP),
        Command::Quit => return Flow::Quit,
    }

    Flow::Continue
}

/// Run an issued search in the background; its events come back on `events`.
fn spawn_search(
    controller: &TerminalController,
    pending: Option<PendingSearch>,
    events: &UnboundedSender<SearchEvent>,
) {
    let Some(pending) = pending else {
        return;
    };
    let directory = controller.directory();
    let delays = controller.delays();
    let events = events.clone();
    tokio::spawn(async move {
        pending.run(&directory, delays, events).await;
    });
}
