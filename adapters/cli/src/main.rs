#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Snake Tunnel from a map file.

mod config;
mod reports;
mod session;

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use snake_tunnel_rendering::{
    render_heatmap, render_initialization, render_outcome, render_ranking, render_statistics,
    ReportKind, ReportSink,
};
use snake_tunnel_system_game::Game;
use snake_tunnel_world::{parse_map_text, query};

use crate::{config::CliConfig, reports::DirectorySink};

const DEFAULT_REPORT_DIRECTORY: &str = "reports";

/// Plays a snake game on a map file, one movement glyph per turn.
#[derive(Debug, Parser)]
#[command(name = "snake-tunnel", version)]
struct Args {
    /// Map file: a `rows columns` header followed by one line of glyphs per row.
    #[arg(long)]
    map: PathBuf,
    /// File holding movement glyphs (`c`, `h`, `a`); standard input when omitted.
    #[arg(long)]
    moves: Option<PathBuf>,
    /// Directory receiving the report files.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Suppress the per-turn board printout; rejected moves still go to stderr.
    #[arg(long)]
    quiet: bool,
    /// Write debug logs to this file instead of warnings to stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Entry point for the Snake Tunnel command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let text = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read map at {}", args.map.display()))?;
    let map = parse_map_text(&text, config.limits)
        .with_context(|| format!("invalid map at {}", args.map.display()))?;
    info!("loaded map from {}", args.map.display());

    let directory = args
        .output
        .or(config.reports.directory)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIRECTORY));
    let mut sink = DirectorySink::create(&directory)?;

    let mut game = Game::new(map);
    sink.write_report(
        ReportKind::Initialization,
        &render_initialization(&game.board(), query::starting_head(game.map())),
    )?;

    let input: Box<dyn BufRead> = match &args.moves {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open moves at {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };
    let mut errors = io::stderr().lock();
    let summary = if args.quiet {
        session::play(&mut game, input, &mut io::sink(), &mut errors)?
    } else {
        session::play(&mut game, input, &mut io::stdout().lock(), &mut errors)?
    };

    write_final_reports(&mut sink, &game, &summary)?;
    print!("{}", render_outcome(game.state(), game.score()));
    Ok(())
}

fn write_final_reports<S: ReportSink>(sink: &mut S, game: &Game, summary: &str) -> Result<()> {
    sink.write_report(ReportKind::Summary, summary)?;
    sink.write_report(
        ReportKind::Statistics,
        &render_statistics(&game.statistics()),
    )?;
    sink.write_report(ReportKind::Heatmap, &render_heatmap(game.heatmap()))?;
    sink.write_report(ReportKind::Ranking, &render_ranking(&game.ranking()))?;
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        }
        None => TermLogger::init(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    }
    .context("failed to initialise logging")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use snake_tunnel_core::{MapLimits, Movement};

    #[derive(Default)]
    struct MemorySink {
        reports: HashMap<ReportKind, String>,
    }

    impl ReportSink for MemorySink {
        fn write_report(&mut self, kind: ReportKind, contents: &str) -> Result<()> {
            let _ = self.reports.insert(kind, contents.to_owned());
            Ok(())
        }
    }

    #[test]
    fn final_reports_cover_summary_statistics_heatmap_and_ranking() {
        let map = parse_map_text("1 3\n>* \n", MapLimits::default()).expect("valid map");
        let mut game = Game::new(map);
        let mut events = Vec::new();
        let _ = game
            .play_turn(Movement::Continue, &mut events)
            .expect("turn succeeds");

        let mut sink = MemorySink::default();
        write_final_reports(&mut sink, &game, "summary\n").expect("reports written");

        assert_eq!(sink.reports.len(), 4);
        assert_eq!(sink.reports[&ReportKind::Summary], "summary\n");
        assert_eq!(sink.reports[&ReportKind::Heatmap], "1 1 0\n");
        assert_eq!(
            sink.reports[&ReportKind::Ranking],
            "(0, 1 - 1)\n(0, 0 - 1)\n"
        );
        assert!(sink.reports[&ReportKind::Statistics].starts_with("Moves: 1\n"));
    }

    #[test]
    fn arguments_parse_from_the_command_line() {
        let args = Args::try_parse_from([
            "snake-tunnel",
            "--map",
            "maps/level.txt",
            "--output",
            "out",
            "--quiet",
        ])
        .expect("arguments parse");
        assert_eq!(args.map, PathBuf::from("maps/level.txt"));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.quiet);
        assert!(args.moves.is_none());
    }
}
