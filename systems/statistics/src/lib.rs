#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure statistics system that counts moves by outcome and heading.

use snake_tunnel_core::{Direction, MoveStatistics, SnakeSnapshot};

/// Accumulates per-turn move counters.
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    counters: MoveStatistics,
}

impl Statistics {
    /// Creates a statistics system with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed turn using the snake's state after the move.
    ///
    /// The turn counts toward the snake's resulting heading, and toward the
    /// no-score counter unless food or currency was consumed.
    pub fn record(&mut self, snake: &SnakeSnapshot) {
        let counters = &mut self.counters;
        counters.total_moves += 1;

        let heading = match snake.direction {
            Direction::North => &mut counters.north,
            Direction::East => &mut counters.east,
            Direction::South => &mut counters.south,
            Direction::West => &mut counters.west,
        };
        *heading += 1;

        if !snake.last_eaten.is_some_and(|cell| cell.is_scoring()) {
            counters.moves_without_score += 1;
        }
    }

    /// Returns a copy of the accumulated counters.
    #[must_use]
    pub fn snapshot(&self) -> MoveStatistics {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;
    use snake_tunnel_core::{Cell, Direction, Position, SnakeSnapshot};

    fn snake(direction: Direction, last_eaten: Option<Cell>) -> SnakeSnapshot {
        SnakeSnapshot {
            head: Position::new(0, 0),
            direction,
            alive: true,
            length: 1,
            last_eaten,
        }
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(Statistics::new().snapshot().total_moves, 0);
    }

    #[test]
    fn wall_hits_count_as_moves_without_score() {
        let mut statistics = Statistics::new();
        let mut dead = snake(Direction::South, Some(Cell::Wall));
        dead.alive = false;
        statistics.record(&dead);

        let counters = statistics.snapshot();
        assert_eq!(counters.moves_without_score, 1);
        assert_eq!(counters.south, 1);
    }
}
