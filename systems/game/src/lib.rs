#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn state machine that drives the map, scoring, and statistics.

use log::{debug, info, warn};
use snake_tunnel_core::{
    Board, Cell, Event, GameState, HeatmapView, MoveStatistics, Movement, RankEntry,
    SimulationError, SnakeSnapshot, CURRENCY_VALUE, FOOD_VALUE,
};
use snake_tunnel_system_ranking::rank;
use snake_tunnel_system_statistics::Statistics;
use snake_tunnel_world::{self as world, query, Map};

/// A single game played on one map.
#[derive(Debug, Clone)]
pub struct Game {
    map: Map,
    score: u32,
    state: GameState,
    statistics: Statistics,
    turn: u32,
}

impl Game {
    /// Starts a game on the provided map with no score and no recorded moves.
    #[must_use]
    pub fn new(map: Map) -> Self {
        Self {
            map,
            score: 0,
            state: GameState::Continuing,
            statistics: Statistics::new(),
            turn: 0,
        }
    }

    /// Plays one turn and returns the resulting state.
    ///
    /// Events produced by the map, followed by the score and end-of-game
    /// events, are appended to `out_events`. Once the game has ended further
    /// calls leave it untouched.
    pub fn play_turn(
        &mut self,
        movement: Movement,
        out_events: &mut Vec<Event>,
    ) -> Result<GameState, SimulationError> {
        if self.state.is_terminal() {
            warn!(
                "ignoring {movement:?} after the game ended in {:?}",
                self.state
            );
            return Ok(self.state);
        }

        world::execute_move(&mut self.map, movement, out_events)?;
        self.turn += 1;

        let snake = query::snake_snapshot(&self.map);
        let gained = match snake.last_eaten {
            Some(Cell::Currency) => CURRENCY_VALUE,
            Some(Cell::Food) => FOOD_VALUE,
            _ => 0,
        };
        if gained > 0 {
            self.score += gained;
            out_events.push(Event::ScoreChanged { score: self.score });
        }

        self.state = if !snake.alive {
            GameState::Lost
        } else if query::remaining_food(&self.map) == 0 {
            GameState::Won
        } else {
            GameState::Continuing
        };
        self.statistics.record(&snake);

        debug!(
            "turn {} ({movement:?}): score {}, state {:?}",
            self.turn, self.score, self.state
        );
        if self.state.is_terminal() {
            info!(
                "game ended on turn {} with {:?} and score {}",
                self.turn, self.state, self.score
            );
            out_events.push(Event::GameEnded { state: self.state });
        }
        Ok(self.state)
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Number of turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Move counters accumulated so far.
    #[must_use]
    pub fn statistics(&self) -> MoveStatistics {
        self.statistics.snapshot()
    }

    /// Renders the visible board.
    #[must_use]
    pub fn board(&self) -> Board {
        query::board(&self.map)
    }

    /// Snapshot of the snake after the latest turn.
    #[must_use]
    pub fn snake(&self) -> SnakeSnapshot {
        query::snake_snapshot(&self.map)
    }

    /// Read-only view of the visit heatmap.
    #[must_use]
    pub fn heatmap(&self) -> HeatmapView<'_> {
        query::heatmap_view(&self.map)
    }

    /// Visited positions ordered by heat, computed from the current heatmap.
    #[must_use]
    pub fn ranking(&self) -> Vec<RankEntry> {
        rank(self.heatmap())
    }

    /// Provides read-only access to the underlying map.
    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }
}
