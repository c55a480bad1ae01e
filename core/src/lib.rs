#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Tunnel engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! map, and pure systems. The world executes one [`Movement`] per turn and
//! broadcasts [`Event`] values describing what happened; systems consume the
//! resulting [`SnakeSnapshot`] and [`HeatmapView`] values to accumulate
//! statistics and rankings, and adapters present [`Board`] snapshots using the
//! glyph vocabulary exposed by [`Cell`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points awarded for consuming a food cell.
pub const FOOD_VALUE: u32 = 1;

/// Points awarded for collecting a currency cell.
pub const CURRENCY_VALUE: u32 = 10;

/// Number of entries a tunnel pair may hold.
pub const TUNNEL_PAIR_CAPACITY: usize = 2;

const DEFAULT_MAX_DIMENSION: u32 = 100;
const DEFAULT_BODY_CAPACITY: usize = 10_000;
const DEFAULT_MAX_RESOLUTION_DEPTH: u32 = 64;

/// Cardinal directions a snake head may face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    const fn index(self) -> i8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Returns the direction reached after rotating by `delta` quarter turns.
    ///
    /// Positive deltas rotate clockwise, negative deltas counter-clockwise.
    #[must_use]
    pub const fn turned(self, delta: i8) -> Self {
        match (self.index() + delta + 4).rem_euclid(4) {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Unit `(row, column)` offset travelled by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }
}

/// Movement command applied to the snake on a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Keep travelling in the current direction.
    Continue,
    /// Rotate a quarter turn clockwise before stepping.
    Clockwise,
    /// Rotate a quarter turn counter-clockwise before stepping.
    CounterClockwise,
}

impl Movement {
    /// Quarter-turn delta applied to the snake's heading.
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Self::Continue => 0,
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }

    /// Character used to encode the movement in input streams.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Continue => 'c',
            Self::Clockwise => 'h',
            Self::CounterClockwise => 'a',
        }
    }

    /// Decodes a movement from its input character.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'c' => Some(Self::Continue),
            'h' => Some(Self::Clockwise),
            'a' => Some(Self::CounterClockwise),
            _ => None,
        }
    }
}

/// Location on the map expressed as row and column coordinates.
///
/// Coordinates are signed so that candidate positions one step past an edge
/// can be represented before they are wrapped back onto the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    column: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Returns the position shifted by the provided row and column offsets.
    #[must_use]
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }

    /// Returns the neighbouring position one step toward `direction`.
    #[must_use]
    pub const fn advance(self, direction: Direction) -> Self {
        let (rows, columns) = direction.delta();
        self.offset(rows, columns)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Contents of a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Free floor.
    Empty,
    /// Impassable wall; running into it kills the snake.
    Wall,
    /// One end of a teleporting tunnel pair.
    Tunnel,
    /// Food that grows the snake and counts toward victory.
    Food,
    /// Currency that awards bonus points.
    Currency,
    /// Living snake head facing the contained direction.
    SnakeHead(Direction),
    /// Living snake body segment.
    SnakeBody,
    /// Segment of a snake that has died.
    SnakeDead,
}

impl Cell {
    /// Character used to represent the cell in map files and reports.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Tunnel => '@',
            Self::Food => '*',
            Self::Currency => '$',
            Self::SnakeHead(Direction::North) => '^',
            Self::SnakeHead(Direction::East) => '>',
            Self::SnakeHead(Direction::South) => 'v',
            Self::SnakeHead(Direction::West) => '<',
            Self::SnakeBody => 'o',
            Self::SnakeDead => 'X',
        }
    }

    /// Decodes a cell from its map-file character.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        let cell = match glyph {
            ' ' => Self::Empty,
            '#' => Self::Wall,
            '@' => Self::Tunnel,
            '*' => Self::Food,
            '$' => Self::Currency,
            '^' => Self::SnakeHead(Direction::North),
            '>' => Self::SnakeHead(Direction::East),
            'v' => Self::SnakeHead(Direction::South),
            '<' => Self::SnakeHead(Direction::West),
            'o' => Self::SnakeBody,
            'X' => Self::SnakeDead,
            _ => return None,
        };
        Some(cell)
    }

    /// Reports whether the cell belongs to a snake overlay.
    #[must_use]
    pub const fn is_snake(self) -> bool {
        matches!(self, Self::SnakeHead(_) | Self::SnakeBody | Self::SnakeDead)
    }

    /// Reports whether consuming the cell awards points.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        matches!(self, Self::Food | Self::Currency)
    }
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The game accepts further turns.
    Continuing,
    /// Every food cell was consumed.
    Won,
    /// The snake died.
    Lost,
}

impl GameState {
    /// Reports whether no further turns are processed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continuing)
    }
}

/// Events broadcast after the world and the game process a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The snake rotated before stepping.
    SnakeTurned {
        /// Heading before the rotation.
        from: Direction,
        /// Heading after the rotation.
        to: Direction,
    },
    /// The snake head moved between two cells.
    SnakeAdvanced {
        /// Head position before the move.
        from: Position,
        /// Head position after wrapping and tunnel resolution.
        to: Position,
        /// Heading the snake travelled in.
        direction: Direction,
    },
    /// The head entered a tunnel and left through its pair.
    Teleported {
        /// Tunnel cell the head entered.
        entry: Position,
        /// Paired tunnel cell the head left through.
        exit: Position,
    },
    /// A food cell was consumed.
    FoodConsumed {
        /// Cell that held the food.
        cell: Position,
        /// Food cells left on the map.
        remaining: u32,
    },
    /// A currency cell was collected.
    CurrencyCollected {
        /// Cell that held the currency.
        cell: Position,
    },
    /// The snake grew after eating.
    SnakeGrew {
        /// Body length after growing.
        length: usize,
    },
    /// The snake hit a wall or its own body.
    SnakeDied {
        /// Cell the head occupied when it died.
        cell: Position,
    },
    /// The score changed after a turn.
    ScoreChanged {
        /// Total score after the turn.
        score: u32,
    },
    /// The game reached a terminal state.
    GameEnded {
        /// Terminal state that was reached.
        state: GameState,
    },
}

/// Immutable representation of the snake used by systems and adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    /// Current head position.
    pub head: Position,
    /// Heading of the head.
    pub direction: Direction,
    /// Whether the snake is still alive.
    pub alive: bool,
    /// Number of body segments, including the head.
    pub length: usize,
    /// Cell consumed on the most recent move, if any move happened yet.
    pub last_eaten: Option<Cell>,
}

/// Move counters accumulated over a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStatistics {
    /// Number of completed turns.
    pub total_moves: u32,
    /// Turns that neither consumed food nor collected currency.
    pub moves_without_score: u32,
    /// Turns that ended facing north.
    pub north: u32,
    /// Turns that ended facing east.
    pub east: u32,
    /// Turns that ended facing south.
    pub south: u32,
    /// Turns that ended facing west.
    pub west: u32,
}

impl MoveStatistics {
    /// Number of turns that ended facing `direction`.
    #[must_use]
    pub const fn moves_toward(&self, direction: Direction) -> u32 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Visit count recorded for a single position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankEntry {
    /// Position that was visited.
    pub position: Position,
    /// Number of turns that ended with the head on the position.
    pub visits: u32,
}

impl RankEntry {
    /// Creates a new ranking entry.
    #[must_use]
    pub const fn new(position: Position, visits: u32) -> Self {
        Self { position, visits }
    }
}

/// Read-only view into a dense, row-major visit heatmap.
#[derive(Clone, Copy, Debug)]
pub struct HeatmapView<'a> {
    cells: &'a [u32],
    rows: u32,
    columns: u32,
}

impl<'a> HeatmapView<'a> {
    /// Captures a new heatmap view backed by the provided row-major slice.
    #[must_use]
    pub fn new(cells: &'a [u32], rows: u32, columns: u32) -> Self {
        Self {
            cells,
            rows,
            columns,
        }
    }

    /// Number of visits recorded for the position, if it lies on the map.
    #[must_use]
    pub fn visits(&self, position: Position) -> Option<u32> {
        let index = dense_index(position, self.rows, self.columns)?;
        self.cells.get(index).copied()
    }

    /// Provides the `(rows, columns)` dimensions of the heatmap.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Iterates over every position together with its visit count in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + 'a {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, visits)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            let row = i32::try_from(index / columns).unwrap_or(i32::MAX);
            let column = i32::try_from(index % columns).unwrap_or(i32::MAX);
            (Position::new(row, column), *visits)
        })
    }

    /// Sum of all recorded visits.
    #[must_use]
    pub fn total_visits(&self) -> u64 {
        self.cells.iter().map(|visits| u64::from(*visits)).sum()
    }
}

/// Rendered snapshot of every map cell, snake overlay included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board from a row-major cell vector.
    #[must_use]
    pub fn new(rows: u32, columns: u32, cells: Vec<Cell>) -> Self {
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at the provided position, if it lies on the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let index = dense_index(position, self.rows, self.columns)?;
        self.cells.get(index).copied()
    }

    /// Iterates over the board one row at a time.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    /// Counts the cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }
}

/// Bounds applied when building and simulating a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapLimits {
    /// Largest accepted number of rows or columns.
    pub max_dimension: u32,
    /// Maximum number of segments the snake body may hold.
    pub body_capacity: usize,
    /// Maximum wrap and tunnel hops taken while resolving a single step.
    pub max_resolution_depth: u32,
}

impl Default for MapLimits {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            body_capacity: DEFAULT_BODY_CAPACITY,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

/// Reasons a map definition is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The declared map has no rows or no columns.
    #[error("map dimensions must be non-zero, got {rows}x{columns}")]
    ZeroDimensions {
        /// Declared rows.
        rows: u32,
        /// Declared columns.
        columns: u32,
    },
    /// The declared map exceeds the configured maximum dimension.
    #[error("map dimensions {rows}x{columns} exceed the maximum of {max}")]
    TooLarge {
        /// Declared rows.
        rows: u32,
        /// Declared columns.
        columns: u32,
        /// Largest accepted dimension.
        max: u32,
    },
    /// The number of supplied rows differs from the declared row count.
    #[error("map declares {expected} rows but {found} were supplied")]
    RowCountMismatch {
        /// Declared rows.
        expected: u32,
        /// Supplied rows.
        found: usize,
    },
    /// A supplied row differs in length from the declared column count.
    #[error("map row {row} holds {found} cells but {expected} columns were declared")]
    ColumnCountMismatch {
        /// Zero-based row index.
        row: usize,
        /// Declared columns.
        expected: u32,
        /// Cells supplied on the row.
        found: usize,
    },
    /// The map header could not be read as `rows columns`.
    #[error("malformed map header '{line}'")]
    MalformedHeader {
        /// Offending header line.
        line: String,
    },
    /// A map character does not belong to the cell vocabulary.
    #[error("unknown map glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// No snake head marker was found.
    #[error("map contains no snake head")]
    MissingSnakeHead,
    /// More than one snake head marker was found.
    #[error("map contains more than one snake head, at {first} and {second}")]
    MultipleSnakeHeads {
        /// First head found in row-major order.
        first: Position,
        /// Second head found in row-major order.
        second: Position,
    },
    /// A body or dead-body marker appeared in a fresh map.
    #[error("map contains a snake segment at {position} without a snake to own it")]
    UnexpectedSnakeSegment {
        /// Position of the segment.
        position: Position,
    },
    /// The map holds a tunnel without a partner.
    #[error("map contains {count} tunnel cell(s); tunnels must come in pairs")]
    OddTunnelCount {
        /// Tunnel cells found.
        count: usize,
    },
    /// Wrapping and tunnel hops never settled on a valid cell.
    #[error("position {position} did not resolve within {depth} wrap or tunnel hops")]
    UnresolvablePosition {
        /// Candidate position that was being resolved.
        position: Position,
        /// Hop limit that was exceeded.
        depth: u32,
    },
}

/// A bounded position queue ran out of room.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("position queue exceeded its capacity of {capacity} entries")]
pub struct OverflowError {
    /// Capacity of the queue that overflowed.
    pub capacity: usize,
}

/// Any failure raised while building or simulating a map.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The map definition is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A bounded queue overflowed.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

fn dense_index(position: Position, rows: u32, columns: u32) -> Option<usize> {
    let row = u32::try_from(position.row()).ok()?;
    let column = u32::try_from(position.column()).ok()?;
    if row < rows && column < columns {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        let width = usize::try_from(columns).ok()?;
        Some(row * width + column)
    } else {
        None
    }
}
