//! Replay shell around the stayview library.
//!
//! Reads UI events as JSON lines on stdin, feeds them through a [`Session`]
//! backed by a fixture file, and prints the page view model as one JSON line
//! after each event once every outstanding request has been answered.
//!
//! # Usage
//!
//! ```text
//! stayview <fixture.json> [config.toml] < events.jsonl
//! ```
//!
//! # Event Lines
//!
//! ```text
//! {"type":"search_text_changed","text":"Da Lat"}
//! {"type":"search_submitted"}
//! {"type":"card_clicked","listing":"3","target":"favorite_button"}
//! {"type":"nav","event":{"type":"experiences_tab_click"}}
//! {"type":"route_changed","path":"/login"}
//! {"type":"login_submitted","email":"guest@example.com","password":"secret"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A malformed line is
//! reported on stderr and does not stop the replay.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stayview::backend::FixtureBackend;
use stayview::observability::init_tracing;
use stayview::{initialize, Config, Event, Session};

#[derive(Debug, Parser)]
#[command(name = "stayview")]
#[command(version)]
#[command(about = "Replay UI events against a fixture and print page view models")]
struct Cli {
    /// JSON fixture with listings and accounts.
    fixture: PathBuf,
    /// Optional TOML settings file.
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stayview: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> stayview::Result<()> {
    let config = cli.config.as_ref().map(Config::from_file).transpose()?.unwrap_or_default();
    init_tracing(&config);

    let backend = FixtureBackend::from_file(&cli.fixture)?;
    tracing::info!(fixture = %cli.fixture.display(), "fixture loaded");

    let mut session = Session::new(initialize(&config), backend);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    session.dispatch(&Event::CatalogRequested);
    session.settle();
    writeln!(out, "{}", serde_json::to_string(&session.view())?)?;

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: Event = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "skipping malformed event");
                eprintln!("line {}: {e}", number + 1);
                continue;
            }
        };

        session.dispatch(&event);
        let answered = session.settle();
        tracing::debug!(line = number + 1, answered = answered, route = %session.route(), "event replayed");

        writeln!(out, "{}", serde_json::to_string(&session.view())?)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fixture_is_required_and_config_optional() {
        assert!(Cli::try_parse_from(["stayview"]).is_err());

        let cli = Cli::try_parse_from(["stayview", "stays.json"]).unwrap();
        assert_eq!(cli.fixture, PathBuf::from("stays.json"));
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["stayview", "stays.json", "settings.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
    }
}
