use anyhow::Context;
use clap::Parser;
use smines_core::{CellCount, Coord, ExclusionRule, GameSession};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use command::{Command, Flow};
use settings::{Overrides, Preset};

mod command;
mod render;
mod settings;

/// Minesweeper played with text commands on stdin, one per line.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// JSON file with `rows`, `cols` and `mines`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Standard board size, replaces the config file
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the start tile's whole row and column free of mines, like classic smines
    #[arg(long)]
    legacy_exclusion: bool,
}

fn level_filter(level: log::Level) -> LevelFilter {
    match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        tracing_subscriber::fmt()
            .with_max_level(level_filter(log_level))
            .with_writer(io::stderr)
            .init();
    }

    let file = args.config.as_deref().map(settings::load).transpose()?;
    let overrides = Overrides {
        rows: args.rows,
        cols: args.cols,
        mines: args.mines,
    };
    let config = settings::resolve(file, args.preset, overrides)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let rule = if args.legacy_exclusion {
        ExclusionRule::RowAndColumn
    } else {
        ExclusionRule::Point
    };
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.rows,
        config.cols,
        config.mines,
        seed
    );

    let mut session =
        GameSession::with_rule(config, seed, rule).context("could not start the game")?;
    run(&mut session, io::stdin().lock(), io::stdout().lock())
}

fn run(session: &mut GameSession, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    write!(output, "{}", render::render(session))?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match command.apply(session) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(output, "{err}")?,
        }
        write!(output, "{}", render::render(session))?;
    }

    output.flush()?;
    Ok(())
}
