#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared text rendering contracts for Snake Tunnel adapters.
//!
//! Every function here is pure: it turns core snapshots into the glyph and
//! report text that adapters print to the console or hand to a [`ReportSink`].

use std::fmt::Write as _;

use anyhow::Result as AnyResult;
use snake_tunnel_core::{
    Board, Direction, Event, GameState, HeatmapView, MoveStatistics, Movement, Position, RankEntry,
};

/// Reports produced over the course of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Starting board and snake position.
    Initialization,
    /// Notable events, one line per turn that produced one.
    Summary,
    /// Move counters.
    Statistics,
    /// Visit counts laid out like the board.
    Heatmap,
    /// Visited positions ordered by heat.
    Ranking,
}

impl ReportKind {
    /// Every report kind, in the order adapters write them.
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Initialization,
        ReportKind::Summary,
        ReportKind::Statistics,
        ReportKind::Heatmap,
        ReportKind::Ranking,
    ];

    /// File name used when the report is persisted.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Initialization => "initialization.txt",
            Self::Summary => "summary.txt",
            Self::Statistics => "statistics.txt",
            Self::Heatmap => "heatmap.txt",
            Self::Ranking => "ranking.txt",
        }
    }
}

/// Destination for finished reports.
pub trait ReportSink {
    /// Persists the contents of one report.
    fn write_report(&mut self, kind: ReportKind, contents: &str) -> AnyResult<()>;
}

/// Renders the board as one line of glyphs per row.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let mut text = String::new();
    for row in board.iter_rows() {
        text.extend(row.iter().map(|cell| cell.glyph()));
        text.push('\n');
    }
    text
}

/// Renders the board followed by the snake's starting position.
#[must_use]
pub fn render_initialization(board: &Board, start: Position) -> String {
    let mut text = render_board(board);
    let _ = writeln!(
        text,
        "The snake starts at row {}, column {}.",
        start.row(),
        start.column()
    );
    text
}

/// Renders the console frame shown after a turn.
#[must_use]
pub fn render_turn_frame(movement: Movement, board: &Board, score: u32) -> String {
    let mut text = format!("Board after move '{}':\n", movement.glyph());
    text.push_str(&render_board(board));
    let _ = writeln!(text, "Score: {score}");
    text
}

/// Renders the summary lines for one turn.
///
/// Only growth, currency, and end-of-game events are reported; quiet turns
/// produce an empty string.
#[must_use]
pub fn render_turn_summary(turn: u32, movement: Movement, events: &[Event]) -> String {
    let glyph = movement.glyph();
    let mut text = String::new();
    for event in events {
        match event {
            Event::SnakeGrew { length } => {
                let _ = writeln!(
                    text,
                    "Move {turn} ({glyph}) grew the snake to length {length}"
                );
            }
            Event::CurrencyCollected { .. } => {
                let _ = writeln!(text, "Move {turn} ({glyph}) collected currency");
            }
            Event::GameEnded {
                state: GameState::Lost,
            } => {
                let _ = writeln!(text, "Move {turn} ({glyph}) ended the game in a collision");
            }
            Event::GameEnded {
                state: GameState::Won,
            } => {
                let _ = writeln!(
                    text,
                    "Move {turn} ({glyph}) ended the game with every food eaten"
                );
            }
            _ => {}
        }
    }
    text
}

/// Renders the move counters.
#[must_use]
pub fn render_statistics(statistics: &MoveStatistics) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Moves: {}", statistics.total_moves);
    let _ = writeln!(
        text,
        "Moves without score: {}",
        statistics.moves_without_score
    );
    for direction in Direction::ALL {
        let _ = writeln!(
            text,
            "Moves {}: {}",
            direction_label(direction),
            statistics.moves_toward(direction)
        );
    }
    text
}

/// Renders visit counts laid out like the board, space separated.
#[must_use]
pub fn render_heatmap(heatmap: HeatmapView<'_>) -> String {
    let (_, columns) = heatmap.dimensions();
    let width = usize::try_from(columns).unwrap_or(0).max(1);
    let visits: Vec<String> = heatmap.iter().map(|(_, visits)| visits.to_string()).collect();

    let mut text = String::new();
    for row in visits.chunks(width) {
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}

/// Renders one `(row, column - visits)` line per ranking entry.
#[must_use]
pub fn render_ranking(ranking: &[RankEntry]) -> String {
    let mut text = String::new();
    for entry in ranking {
        let _ = writeln!(
            text,
            "({}, {} - {})",
            entry.position.row(),
            entry.position.column(),
            entry.visits
        );
    }
    text
}

/// Renders the closing line printed when the game stops.
#[must_use]
pub fn render_outcome(state: GameState, score: u32) -> String {
    match state {
        GameState::Won => format!("You won! Final score: {score}\n"),
        GameState::Lost => format!("Game over! Final score: {score}\n"),
        GameState::Continuing => format!("Out of moves. Final score: {score}\n"),
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "north",
        Direction::East => "east",
        Direction::South => "south",
        Direction::West => "west",
    }
}
