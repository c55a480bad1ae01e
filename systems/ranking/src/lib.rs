#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure ranking system that orders visited positions by heat.

use std::cmp::Ordering;

use snake_tunnel_core::{HeatmapView, RankEntry};

/// Flattens the heatmap into entries for every visited position, hottest first.
///
/// Ties on visit count are broken by the higher row first, then the higher
/// column, so positions later in the grid precede earlier ones.
#[must_use]
pub fn rank(heatmap: HeatmapView<'_>) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = heatmap
        .iter()
        .filter(|(_, visits)| *visits > 0)
        .map(|(position, visits)| RankEntry::new(position, visits))
        .collect();
    entries.sort_by(compare);
    entries
}

/// Ordering used by [`rank`]: descending visits, then descending row, then descending column.
#[must_use]
pub fn compare(left: &RankEntry, right: &RankEntry) -> Ordering {
    right
        .visits
        .cmp(&left.visits)
        .then_with(|| right.position.row().cmp(&left.position.row()))
        .then_with(|| right.position.column().cmp(&left.position.column()))
}
