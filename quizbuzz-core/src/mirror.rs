//! Local display mirror
//!
//! Renders a [`Snapshot`] at fixed positions. Each field is padded to the
//! display width so a shorter value overwrites a longer one left behind by
//! the previous frame without clearing the screen.

use core::fmt::{self, Write};

use heapless::String;

use crate::session::Snapshot;
use crate::state::Phase;
use crate::traits::TextDisplay;

/// Row of the round counter
pub const ROUND_ROW: u8 = 0;
/// Row of team A's score
pub const SCORE_A_ROW: u8 = 2;
/// Row of team B's score
pub const SCORE_B_ROW: u8 = 3;
/// Row of the status line
pub const STATUS_ROW: u8 = 5;

/// Longest line the mirror formats
const LINE_LEN: usize = 32;

/// Status line text for a snapshot
pub fn status_line(snapshot: &Snapshot) -> String<LINE_LEN> {
    let mut line = String::new();
    // Longest status is well under LINE_LEN
    let _ = match (snapshot.phase, snapshot.winner, snapshot.buzzed_team) {
        (Phase::GameOver, Some(team), _) => write!(line, "Winner: {}", team),
        (Phase::AwaitingTeamChoice | Phase::AwaitingScore, _, Some(team)) => {
            write!(line, "{} buzzed", team)
        }
        (phase, _, _) => line.push_str(phase.label()).map_err(|_| fmt::Error),
    };
    line
}

/// Draw one frame
pub fn render<D: TextDisplay>(snapshot: &Snapshot, display: &mut D) -> fmt::Result {
    let (cols, _) = display.dimensions();
    let width = usize::from(cols);

    put(display, ROUND_ROW, width, format_args!("Round {}", snapshot.round_number))?;
    put(display, SCORE_A_ROW, width, format_args!("Team A: {}", snapshot.score_a))?;
    put(display, SCORE_B_ROW, width, format_args!("Team B: {}", snapshot.score_b))?;
    put(display, STATUS_ROW, width, format_args!("{}", status_line(snapshot)))
}

/// Write a line at column 0, padded with spaces to `width`
fn put<D: TextDisplay>(display: &mut D, row: u8, width: usize, args: fmt::Arguments) -> fmt::Result {
    let mut line: String<LINE_LEN> = String::new();
    line.write_fmt(args)?;
    display.locate(row, 0);
    write!(display, "{:<width$}", line.as_str(), width = width.min(LINE_LEN))
}
