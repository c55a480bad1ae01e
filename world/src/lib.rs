#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for Snake Tunnel.
//!
//! The [`Map`] owns the terrain grid, the snake, the tunnel pair, and the visit
//! heatmap. Adapters build it with [`parse_map`] or [`parse_map_text`], advance
//! it one turn at a time through [`execute_move`], and read it back through the
//! [`query`] module.

mod deque;
mod map_text;
mod snake;

use log::{debug, trace};
use snake_tunnel_core::{
    Board, Cell, ConfigError, Direction, Event, MapLimits, Movement, Position, SimulationError,
    TUNNEL_PAIR_CAPACITY,
};

pub use deque::PositionDeque;
pub use snake::Snake;

/// Represents the authoritative Snake Tunnel map state.
#[derive(Clone, Debug)]
pub struct Map {
    rows: u32,
    columns: u32,
    terrain: Vec<Cell>,
    snake: Snake,
    tunnels: PositionDeque,
    remaining_food: u32,
    heatmap: Vec<u32>,
    start: Position,
    limits: MapLimits,
}

impl Map {
    /// Normalises a candidate head position until it lands on a valid cell.
    ///
    /// Positions past an edge wrap to the opposite edge. Landing on a tunnel
    /// continues from the paired tunnel, one step further in `direction`. The
    /// walk fails once it exceeds the configured hop limit, which only happens
    /// on maps whose tunnels feed into each other.
    pub fn resolve_position(
        &self,
        position: Position,
        direction: Direction,
    ) -> Result<Position, ConfigError> {
        self.resolve(position, direction, |_, _| {})
    }

    fn resolve<F>(
        &self,
        position: Position,
        direction: Direction,
        mut on_teleport: F,
    ) -> Result<Position, ConfigError>
    where
        F: FnMut(Position, Position),
    {
        let depth = self.limits.max_resolution_depth;
        let mut current = position;
        let mut hops = 0;
        loop {
            if self.is_valid(current) {
                return Ok(current);
            }
            if hops >= depth {
                return Err(ConfigError::UnresolvablePosition { position, depth });
            }
            hops += 1;

            let wrapped = self.wrap(current);
            current = if self.terrain_at(wrapped) == Some(Cell::Tunnel) {
                let exit = self.tunnel_pair(wrapped);
                on_teleport(wrapped, exit);
                exit.advance(direction)
            } else {
                wrapped
            };
        }
    }

    fn is_valid(&self, position: Position) -> bool {
        matches!(self.terrain_at(position), Some(cell) if cell != Cell::Tunnel)
    }

    fn wrap(&self, position: Position) -> Position {
        let rows = signed(self.rows);
        let columns = signed(self.columns);
        Position::new(
            (rows + position.row()) % rows,
            (columns + position.column()) % columns,
        )
    }

    fn tunnel_pair(&self, entry: Position) -> Position {
        let pair = if self.tunnels.at(0) == Some(entry) {
            self.tunnels.at(1)
        } else {
            self.tunnels.at(0)
        };
        pair.unwrap_or(entry)
    }

    fn terrain_at(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.terrain.get(index).copied())
    }

    fn index(&self, position: Position) -> Option<usize> {
        let row = u32::try_from(position.row()).ok()?;
        let column = u32::try_from(position.column()).ok()?;
        if row < self.rows && column < self.columns {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    /// Produces the visible board: terrain with the snake stamped on top.
    ///
    /// Segments are stamped tail first so the head always wins. A dead snake is
    /// drawn entirely with [`Cell::SnakeDead`].
    #[must_use]
    pub fn render(&self) -> Board {
        let mut cells = self.terrain.clone();
        let alive = self.snake.is_alive();
        let segment = if alive { Cell::SnakeBody } else { Cell::SnakeDead };

        for position in self.snake.segments().skip(1).rev() {
            if let Some(index) = self.index(position) {
                cells[index] = segment;
            }
        }
        if let Some(index) = self.index(self.snake.head()) {
            cells[index] = if alive {
                Cell::SnakeHead(self.snake.direction())
            } else {
                Cell::SnakeDead
            };
        }

        Board::new(self.rows, self.columns, cells)
    }
}

/// Builds a map from a grid of cells.
///
/// The grid must match the declared dimensions, contain exactly one snake head,
/// and hold either zero or two tunnels. Every other cell becomes terrain; the
/// heatmap starts with a single visit on the snake's starting cell.
pub fn parse_map(
    rows: u32,
    columns: u32,
    cells: Vec<Vec<Cell>>,
    limits: MapLimits,
) -> Result<Map, SimulationError> {
    if rows == 0 || columns == 0 {
        return Err(ConfigError::ZeroDimensions { rows, columns }.into());
    }
    if rows > limits.max_dimension || columns > limits.max_dimension {
        return Err(ConfigError::TooLarge {
            rows,
            columns,
            max: limits.max_dimension,
        }
        .into());
    }
    if usize::try_from(rows).ok() != Some(cells.len()) {
        return Err(ConfigError::RowCountMismatch {
            expected: rows,
            found: cells.len(),
        }
        .into());
    }

    let mut terrain = Vec::with_capacity(cells.len() * cells.first().map_or(0, Vec::len));
    let mut tunnels = PositionDeque::with_capacity(TUNNEL_PAIR_CAPACITY);
    let mut head: Option<(Position, Direction)> = None;
    let mut remaining_food = 0;

    for (row, line) in cells.into_iter().enumerate() {
        if usize::try_from(columns).ok() != Some(line.len()) {
            return Err(ConfigError::ColumnCountMismatch {
                row,
                expected: columns,
                found: line.len(),
            }
            .into());
        }

        for (column, cell) in line.into_iter().enumerate() {
            let position = Position::new(signed_index(row), signed_index(column));
            match cell {
                Cell::SnakeHead(direction) => {
                    if let Some((first, _)) = head {
                        return Err(ConfigError::MultipleSnakeHeads {
                            first,
                            second: position,
                        }
                        .into());
                    }
                    head = Some((position, direction));
                    terrain.push(Cell::Empty);
                    continue;
                }
                Cell::SnakeBody | Cell::SnakeDead => {
                    return Err(ConfigError::UnexpectedSnakeSegment { position }.into());
                }
                Cell::Tunnel => tunnels.push_front(position)?,
                Cell::Food => remaining_food += 1,
                Cell::Empty | Cell::Wall | Cell::Currency => {}
            }
            terrain.push(cell);
        }
    }

    if tunnels.len() % 2 != 0 {
        return Err(ConfigError::OddTunnelCount {
            count: tunnels.len(),
        }
        .into());
    }
    let (start, direction) = head.ok_or(ConfigError::MissingSnakeHead)?;
    let snake = Snake::new(start, direction, limits.body_capacity)?;

    let mut map = Map {
        rows,
        columns,
        heatmap: vec![0; terrain.len()],
        terrain,
        snake,
        tunnels,
        remaining_food,
        start,
        limits,
    };
    if let Some(index) = map.index(start) {
        map.heatmap[index] = 1;
    }

    debug!(
        "parsed {rows}x{columns} map: snake at {start} facing {direction:?}, {remaining_food} food, {} tunnel(s)",
        map.tunnels.len()
    );
    Ok(map)
}

/// Builds a map from the plain-text map format.
///
/// The first line holds `rows columns`; each following line holds one row of
/// cell glyphs.
pub fn parse_map_text(text: &str, limits: MapLimits) -> Result<Map, SimulationError> {
    let decoded = map_text::decode(text)?;
    parse_map(decoded.rows, decoded.columns, decoded.cells, limits)
}

/// Executes a single movement, mutating the map deterministically.
///
/// The snake turns, steps, resolves wraps and tunnels, consumes whatever lies
/// on the destination cell, and the destination's heatmap counter increases by
/// one, even when the move kills the snake. A failed move leaves the map and
/// `out_events` untouched.
pub fn execute_move(
    map: &mut Map,
    movement: Movement,
    out_events: &mut Vec<Event>,
) -> Result<(), SimulationError> {
    let previous_direction = map.snake.direction();
    let direction = previous_direction.turned(movement.delta());

    let from = map.snake.head();
    let mut teleports = Vec::new();
    let destination = map.resolve(from.advance(direction), direction, |entry, exit| {
        teleports.push((entry, exit));
    })?;
    let index = map
        .index(destination)
        .ok_or(ConfigError::UnresolvablePosition {
            position: destination,
            depth: map.limits.max_resolution_depth,
        })?;

    let eaten = map.terrain[index];
    let length_before = map.snake.length();
    map.snake.advance(destination, eaten)?;
    map.snake.turn(movement);

    if direction != previous_direction {
        out_events.push(Event::SnakeTurned {
            from: previous_direction,
            to: direction,
        });
    }
    for (entry, exit) in teleports {
        trace!("teleported from tunnel {entry} to tunnel {exit}");
        out_events.push(Event::Teleported { entry, exit });
    }
    match eaten {
        Cell::Food => {
            map.remaining_food = map.remaining_food.saturating_sub(1);
            map.terrain[index] = Cell::Empty;
            out_events.push(Event::FoodConsumed {
                cell: destination,
                remaining: map.remaining_food,
            });
        }
        Cell::Currency => {
            map.terrain[index] = Cell::Empty;
            out_events.push(Event::CurrencyCollected { cell: destination });
        }
        _ => {}
    }

    out_events.push(Event::SnakeAdvanced {
        from,
        to: destination,
        direction,
    });
    if map.snake.length() > length_before {
        out_events.push(Event::SnakeGrew {
            length: map.snake.length(),
        });
    }
    if !map.snake.is_alive() {
        out_events.push(Event::SnakeDied { cell: destination });
    }

    map.heatmap[index] = map.heatmap[index].saturating_add(1);
    debug!("snake moved {from} -> {destination} facing {direction:?}, ate {eaten:?}");
    Ok(())
}

/// Query functions that provide read-only access to the map state.
pub mod query {
    use snake_tunnel_core::{Board, HeatmapView, MapLimits, Position, SnakeSnapshot};

    use super::{Map, Snake};

    /// Renders the visible board, snake included.
    #[must_use]
    pub fn board(map: &Map) -> Board {
        map.render()
    }

    /// Exposes a read-only view of the visit heatmap.
    #[must_use]
    pub fn heatmap_view(map: &Map) -> HeatmapView<'_> {
        HeatmapView::new(&map.heatmap, map.rows, map.columns)
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(map: &Map) -> &Snake {
        &map.snake
    }

    /// Captures an immutable snapshot of the snake.
    #[must_use]
    pub fn snake_snapshot(map: &Map) -> SnakeSnapshot {
        map.snake.snapshot()
    }

    /// Number of food cells left on the map.
    #[must_use]
    pub fn remaining_food(map: &Map) -> u32 {
        map.remaining_food
    }

    /// Provides the `(rows, columns)` dimensions of the map.
    #[must_use]
    pub fn dimensions(map: &Map) -> (u32, u32) {
        (map.rows, map.columns)
    }

    /// Positions of the tunnel cells, in no particular order.
    #[must_use]
    pub fn tunnels(map: &Map) -> Vec<Position> {
        map.tunnels.iter().collect()
    }

    /// Cell the snake's head occupied when the map was parsed.
    #[must_use]
    pub fn starting_head(map: &Map) -> Position {
        map.start
    }

    /// Limits the map was built with.
    #[must_use]
    pub fn limits(map: &Map) -> MapLimits {
        map.limits
    }
}

fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn signed_index(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Vec<Vec<Cell>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|glyph| Cell::from_glyph(glyph).expect("known glyph"))
                    .collect()
            })
            .collect()
    }

    fn map(rows: &[&str]) -> Result<Map, SimulationError> {
        let columns = rows.first().map_or(0, |row| row.chars().count());
        parse_map(
            u32::try_from(rows.len()).expect("rows fit"),
            u32::try_from(columns).expect("columns fit"),
            grid(rows),
            MapLimits::default(),
        )
    }

    #[test]
    fn parse_counts_food_and_locates_the_snake() {
        let map = map(&["#####", "#>**#", "#  $#", "#####"]).expect("valid map");

        assert_eq!(query::remaining_food(&map), 2);
        assert_eq!(query::starting_head(&map), Position::new(1, 1));
        assert_eq!(query::snake_snapshot(&map).direction, Direction::East);
        assert_eq!(
            query::heatmap_view(&map).visits(Position::new(1, 1)),
            Some(1)
        );
        assert_eq!(query::heatmap_view(&map).total_visits(), 1);
    }

    #[test]
    fn parse_rejects_missing_and_duplicate_heads() {
        assert_eq!(
            map(&["###", "# #", "###"]).unwrap_err(),
            SimulationError::from(ConfigError::MissingSnakeHead)
        );
        assert_eq!(
            map(&["#^#", "# #", "#v#"]).unwrap_err(),
            SimulationError::from(ConfigError::MultipleSnakeHeads {
                first: Position::new(0, 1),
                second: Position::new(2, 1),
            })
        );
    }

    #[test]
    fn parse_rejects_mismatched_dimensions() {
        assert_eq!(
            parse_map(3, 2, grid(&[">*", "  "]), MapLimits::default()).unwrap_err(),
            SimulationError::from(ConfigError::RowCountMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_map(2, 2, grid(&[">*", " "]), MapLimits::default()).unwrap_err(),
            SimulationError::from(ConfigError::ColumnCountMismatch {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_map(0, 2, Vec::new(), MapLimits::default()).unwrap_err(),
            SimulationError::from(ConfigError::ZeroDimensions {
                rows: 0,
                columns: 2
            })
        );
    }

    #[test]
    fn parse_enforces_configured_maximum_dimension() {
        let limits = MapLimits {
            max_dimension: 2,
            ..MapLimits::default()
        };
        assert!(matches!(
            parse_map(3, 1, grid(&[">", "*", " "]), limits),
            Err(SimulationError::Config(ConfigError::TooLarge { max: 2, .. }))
        ));
    }

    #[test]
    fn parse_requires_tunnels_in_pairs() {
        assert_eq!(
            map(&["@>*"]).unwrap_err(),
            SimulationError::from(ConfigError::OddTunnelCount { count: 1 })
        );
        assert!(matches!(
            map(&["@@>@*"]),
            Err(SimulationError::Overflow(_))
        ));
    }

    #[test]
    fn parse_rejects_stray_snake_segments() {
        assert_eq!(
            map(&[">o*"]).unwrap_err(),
            SimulationError::from(ConfigError::UnexpectedSnakeSegment {
                position: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn render_stamps_head_over_terrain() {
        let map = map(&["###", "#<#", "#*#"]).expect("valid map");
        let board = map.render();

        assert_eq!(
            board.cell(Position::new(1, 1)),
            Some(Cell::SnakeHead(Direction::West))
        );
        assert_eq!(board.count(Cell::Wall), 7);
        assert_eq!(board.count(Cell::Food), 1);
    }

    #[test]
    fn render_draws_every_body_segment_behind_the_head() {
        let mut map =
            parse_map_text("1 4\n>** \n", MapLimits::default()).expect("valid map text");
        let mut events = Vec::new();
        execute_move(&mut map, Movement::Continue, &mut events).expect("first step");
        execute_move(&mut map, Movement::Continue, &mut events).expect("second step");

        let board = map.render();
        let row: Vec<Cell> = board.iter_rows().flat_map(|row| row.iter().copied()).collect();
        assert_eq!(
            row,
            vec![
                Cell::SnakeBody,
                Cell::SnakeBody,
                Cell::SnakeHead(Direction::East),
                Cell::Empty,
            ]
        );
    }

    #[test]
    fn text_maps_use_the_same_rules() {
        let map = parse_map_text("3 3\n###\n#v#\n#*#\n", MapLimits::default())
            .expect("valid map text");
        assert_eq!(query::dimensions(&map), (3, 3));
        assert_eq!(query::remaining_food(&map), 1);
    }
}
