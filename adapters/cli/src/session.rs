//! Input loop that feeds movement glyphs into a game.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::warn;
use snake_tunnel_core::Movement;
use snake_tunnel_rendering::{render_turn_frame, render_turn_summary};
use snake_tunnel_system_game::Game;

/// Plays movements read from `input` until the game ends or input runs out.
///
/// Each recognised glyph plays one turn and prints the resulting board to
/// `console`. Whitespace is skipped; any other glyph is reported on `errors`
/// and ignored. Returns the text of the summary report.
pub(crate) fn play<R, W, E>(
    game: &mut Game,
    input: R,
    console: &mut W,
    errors: &mut E,
) -> Result<String>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = String::new();
    let mut events = Vec::new();

    for line in input.lines() {
        let line = line.context("failed to read movement input")?;
        for glyph in line.chars().filter(|glyph| !glyph.is_whitespace()) {
            let Some(movement) = Movement::from_glyph(glyph) else {
                warn!("ignoring unknown movement {glyph:?}");
                writeln!(errors, "Unknown move '{glyph}', use c, h or a.")?;
                continue;
            };

            events.clear();
            let state = game
                .play_turn(movement, &mut events)
                .with_context(|| format!("turn {} failed", game.turn() + 1))?;
            summary.push_str(&render_turn_summary(game.turn(), movement, &events));
            write!(
                console,
                "{}",
                render_turn_frame(movement, &game.board(), game.score())
            )?;

            if state.is_terminal() {
                return Ok(summary);
            }
        }
    }

    Ok(summary)
}
