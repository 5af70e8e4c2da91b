//! `case` - play a detective case in the terminal.
//!
//! ```bash
//! case --content cases/tin-soldier
//! case --config casebook.toml
//! RUST_LOG=case_engine=debug case --content cases/tin-soldier
//! ```
//!
//! Logs go to stderr so they never interleave with the story on stdout.

mod input;
mod text;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use case_engine::{CaseSession, RenderInstruction, Renderer};
use case_rules::{CaseConfig, CaseContent};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use input::{Input, HELP};
use text::TextRenderer;

/// Play a detective case book in the terminal
#[derive(Parser)]
#[command(name = "case")]
#[command(about = "Play a detective case book in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding locations.json and caseIntro.json
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// TOML config file with the content directory and scoring table
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut renderer = TextRenderer::new(io::stdout());

    let config = match &cli.config {
        Some(path) => CaseConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(CaseConfig::default()),
    };
    let config = abort_on_error(config, &mut renderer)?;

    let content_dir = cli.content.unwrap_or(config.content_dir);
    let content = CaseContent::load_dir(&content_dir)
        .with_context(|| format!("loading case from {}", content_dir.display()));
    let content = abort_on_error(content, &mut renderer)?;

    let mut session = CaseSession::new(content, config.scoring);
    session.request_intro().render_to(&mut renderer);
    println!("{HELP}");

    run(&mut session, &mut renderer)?;

    tracing::info!(session = %session.id(), "Session ended");
    Ok(())
}

/// Show a startup failure as a terminal error before bailing out.
fn abort_on_error<T>(result: Result<T>, renderer: &mut impl Renderer) -> Result<T> {
    if let Err(e) = &result {
        renderer.render(&RenderInstruction::TerminalError(format!("{e:#}")));
    }
    result
}

fn run(session: &mut CaseSession, renderer: &mut TextRenderer<io::Stdout>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        match input::parse(&line) {
            Ok(None) => {}
            Ok(Some(Input::Session(command))) => {
                let outcome = session.dispatch(command, renderer);
                tracing::debug!(?outcome, "Command handled");
            }
            Ok(Some(Input::Locations)) => text::write_directory(&mut io::stdout(), &session.directory())?,
            Ok(Some(Input::Progress)) => text::write_progress(&mut io::stdout(), &session.progress())?,
            Ok(Some(Input::Help)) => println!("{HELP}"),
            Ok(Some(Input::Quit)) => return Ok(()),
            Err(e) => println!("{e}"),
        }
    }
}
