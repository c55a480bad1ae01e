//! Snake state machine owned by the map.

use snake_tunnel_core::{Cell, Direction, Movement, OverflowError, Position, SnakeSnapshot};

use crate::PositionDeque;

/// Ordered snake body together with its heading and liveness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: PositionDeque,
    head: Position,
    direction: Direction,
    alive: bool,
    last_eaten: Option<Cell>,
}

impl Snake {
    /// Creates a single-segment snake whose body holds at most `capacity` segments.
    pub fn new(
        head: Position,
        direction: Direction,
        capacity: usize,
    ) -> Result<Self, OverflowError> {
        let mut body = PositionDeque::with_capacity(capacity);
        body.push_front(head)?;
        Ok(Self {
            body,
            head,
            direction,
            alive: true,
            last_eaten: None,
        })
    }

    /// Position of the head segment.
    #[must_use]
    pub const fn head(&self) -> Position {
        self.head
    }

    /// Heading of the head segment.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Reports whether the snake is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Cell consumed on the most recent move.
    #[must_use]
    pub const fn last_eaten(&self) -> Option<Cell> {
        self.last_eaten
    }

    /// Number of segments, head included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Iterates over the segments from head to tail.
    pub fn segments(
        &self,
    ) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator + '_ {
        self.body.iter()
    }

    /// Rotates the heading according to the movement command.
    pub fn turn(&mut self, movement: Movement) {
        self.direction = self.direction.turned(movement.delta());
    }

    /// Moves the head onto `destination` after consuming `eaten`.
    ///
    /// The tail follows unless food was eaten. The snake dies when it runs into
    /// a wall or when the new head overlaps any other segment; a dead snake
    /// keeps its full body. Growing past the body capacity fails and leaves
    /// the snake untouched.
    pub fn advance(&mut self, destination: Position, eaten: Cell) -> Result<(), OverflowError> {
        if eaten == Cell::Food {
            self.body.push_front(destination)?;
        } else {
            // The tail leaves first, so a full body can still move.
            let _ = self.body.pop_back();
            self.body.push_front(destination)?;
        }
        self.head = destination;
        self.last_eaten = Some(eaten);

        let bitten = self.body.iter().skip(1).any(|segment| segment == destination);
        if eaten == Cell::Wall || bitten {
            self.alive = false;
        }
        Ok(())
    }

    /// Captures an immutable snapshot for systems and adapters.
    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            head: self.head,
            direction: self.direction,
            alive: self.alive,
            length: self.body.len(),
            last_eaten: self.last_eaten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(row: i32, column: i32, direction: Direction) -> Snake {
        Snake::new(Position::new(row, column), direction, 16).expect("snake fits")
    }

    #[test]
    fn moving_without_food_keeps_length() {
        let mut snake = snake_at(2, 2, Direction::East);
        snake.advance(Position::new(2, 3), Cell::Empty).expect("advance");

        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), Position::new(2, 3));
        assert_eq!(snake.last_eaten(), Some(Cell::Empty));
        assert!(snake.is_alive());
    }

    #[test]
    fn eating_food_grows_by_one_segment() {
        let mut snake = snake_at(2, 2, Direction::East);
        snake.advance(Position::new(2, 3), Cell::Food).expect("advance");
        snake.advance(Position::new(2, 4), Cell::Currency).expect("advance");

        assert_eq!(snake.length(), 2);
        let segments: Vec<Position> = snake.segments().collect();
        assert_eq!(segments, vec![Position::new(2, 4), Position::new(2, 3)]);
    }

    #[test]
    fn walls_kill_but_keep_the_body() {
        let mut snake = snake_at(1, 1, Direction::North);
        snake.advance(Position::new(1, 2), Cell::Food).expect("advance");
        snake.advance(Position::new(0, 2), Cell::Wall).expect("advance");

        assert!(!snake.is_alive());
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.head(), Position::new(0, 2));
    }

    #[test]
    fn biting_own_body_kills() {
        let mut snake = snake_at(2, 0, Direction::East);
        for column in 1..=4 {
            snake
                .advance(Position::new(2, column), Cell::Food)
                .expect("advance");
        }
        assert_eq!(snake.length(), 5);

        snake.advance(Position::new(1, 4), Cell::Empty).expect("advance");
        snake.advance(Position::new(1, 3), Cell::Empty).expect("advance");
        assert!(snake.is_alive());

        snake.advance(Position::new(2, 3), Cell::Empty).expect("advance");
        assert!(!snake.is_alive());
        assert_eq!(snake.length(), 5);
    }

    #[test]
    fn following_the_vacated_tail_cell_is_safe() {
        let mut snake = snake_at(1, 1, Direction::East);
        for destination in [Position::new(1, 2), Position::new(2, 2), Position::new(2, 1)] {
            snake.advance(destination, Cell::Food).expect("advance");
        }
        assert_eq!(snake.length(), 4);

        snake.advance(Position::new(1, 1), Cell::Empty).expect("advance");
        assert!(snake.is_alive());
    }

    #[test]
    fn turning_updates_the_heading() {
        let mut snake = snake_at(0, 0, Direction::North);
        snake.turn(Movement::CounterClockwise);
        assert_eq!(snake.direction(), Direction::West);
        snake.turn(Movement::Clockwise);
        snake.turn(Movement::Clockwise);
        assert_eq!(snake.direction(), Direction::East);
    }

    #[test]
    fn growth_beyond_capacity_overflows() {
        let mut snake =
            Snake::new(Position::new(0, 0), Direction::East, 2).expect("snake fits");
        snake.advance(Position::new(0, 1), Cell::Food).expect("advance");
        let before = snake.clone();
        assert_eq!(
            snake.advance(Position::new(0, 2), Cell::Food),
            Err(OverflowError { capacity: 2 })
        );
        assert_eq!(snake, before);
    }

    #[test]
    fn full_body_still_moves_without_growing() {
        let mut snake =
            Snake::new(Position::new(0, 0), Direction::East, 2).expect("snake fits");
        snake.advance(Position::new(0, 1), Cell::Food).expect("advance");
        assert_eq!(snake.length(), 2);

        snake.advance(Position::new(0, 2), Cell::Empty).expect("advance");
        snake.advance(Position::new(0, 3), Cell::Currency).expect("advance");

        assert!(snake.is_alive());
        let segments: Vec<Position> = snake.segments().collect();
        assert_eq!(segments, vec![Position::new(0, 3), Position::new(0, 2)]);
    }
}
