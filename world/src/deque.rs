//! Bounded double-ended position queue backing the snake body and tunnel pair.

use std::collections::VecDeque;

use snake_tunnel_core::{OverflowError, Position};

/// Fixed-capacity double-ended queue of positions.
///
/// Index `0` is the front. Entries enter at the front and leave from the back,
/// so the back always holds the oldest position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionDeque {
    entries: VecDeque<Position>,
    capacity: usize,
}

impl PositionDeque {
    /// Creates an empty queue that holds at most `capacity` positions.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Inserts a position at index `0`, shifting existing entries back.
    pub fn push_front(&mut self, position: Position) -> Result<(), OverflowError> {
        if self.entries.len() >= self.capacity {
            return Err(OverflowError {
                capacity: self.capacity,
            });
        }
        self.entries.push_front(position);
        Ok(())
    }

    /// Removes and returns the last position.
    pub fn pop_back(&mut self) -> Option<Position> {
        self.entries.pop_back()
    }

    /// Returns the entry at `index`, clamping out-of-range indices.
    ///
    /// Negative indices and indices past the end resolve to the last entry.
    /// Only an empty queue yields `None`.
    #[must_use]
    pub fn at(&self, index: i64) -> Option<Position> {
        let last = self.entries.len().checked_sub(1)?;
        let index = usize::try_from(index)
            .ok()
            .filter(|index| *index <= last)
            .unwrap_or(last);
        self.entries.get(index).copied()
    }

    /// Returns the entry at index `0`.
    #[must_use]
    pub fn front(&self) -> Option<Position> {
        self.entries.front().copied()
    }

    /// Number of stored positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the queue holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of positions the queue accepts.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the front to the back.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(positions: &[Position], capacity: usize) -> PositionDeque {
        let mut deque = PositionDeque::with_capacity(capacity);
        for position in positions.iter().rev() {
            deque.push_front(*position).expect("within capacity");
        }
        deque
    }

    #[test]
    fn push_front_places_newest_entry_at_index_zero() {
        let mut deque = PositionDeque::with_capacity(3);
        deque.push_front(Position::new(0, 0)).expect("push");
        deque.push_front(Position::new(0, 1)).expect("push");

        assert_eq!(deque.at(0), Some(Position::new(0, 1)));
        assert_eq!(deque.at(1), Some(Position::new(0, 0)));
        assert_eq!(deque.pop_back(), Some(Position::new(0, 0)));
        assert_eq!(deque.len(), 1);
    }

    #[test]
    fn out_of_range_access_clamps_to_last_entry() {
        let deque = filled(&[Position::new(1, 1), Position::new(2, 2)], 4);

        assert_eq!(deque.at(-1), Some(Position::new(2, 2)));
        assert_eq!(deque.at(2), Some(Position::new(2, 2)));
        assert_eq!(deque.at(99), Some(Position::new(2, 2)));
    }

    #[test]
    fn single_entry_pair_lookup_resolves_to_itself() {
        let deque = filled(&[Position::new(3, 4)], 2);
        assert_eq!(deque.at(1), deque.at(0));
    }

    #[test]
    fn empty_queue_has_no_entries_to_clamp_to() {
        let mut deque = PositionDeque::with_capacity(1);
        assert_eq!(deque.at(0), None);
        assert_eq!(deque.pop_back(), None);
        assert!(deque.is_empty());
    }

    #[test]
    fn pushing_past_capacity_overflows() {
        let mut deque = filled(&[Position::new(0, 0), Position::new(0, 1)], 2);
        assert_eq!(
            deque.push_front(Position::new(0, 2)),
            Err(OverflowError { capacity: 2 })
        );
        assert_eq!(deque.len(), 2);
    }
}
