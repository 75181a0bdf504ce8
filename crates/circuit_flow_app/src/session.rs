// SPDX-License-Identifier: MIT OR Apache-2.0
//! Line-driven game session.
//!
//! Reads commands from any buffered reader (a terminal or a script file),
//! applies them to the controller and writes the resulting board. Command
//! errors are reported to the player and never end the session.

use crate::commands::{CommandError, Feedback, GameCommand};
use crate::render::{render_board, render_levels, BoardSnapshot, HELP};
use crate::settings::GameSettings;
use circuit_flow_graph::{PuzzleController, RotateOutcome};
use std::io::{self, BufRead, Write};

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands that parsed and executed
    pub commands: u32,
    /// Lines rejected with an error
    pub errors: u32,
    /// Whether the active level ended connected
    pub solved: bool,
}

/// Whether the session should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// A running game: controller plus display preferences
pub struct Session {
    controller: PuzzleController,
    settings: GameSettings,
    json: bool,
}

impl Session {
    /// Create a session; `json` prints every board as a JSON line
    pub fn new(controller: PuzzleController, settings: GameSettings, json: bool) -> Self {
        Self {
            controller,
            settings,
            json,
        }
    }

    /// The controller driven by this session
    pub fn controller(&self) -> &PuzzleController {
        &self.controller
    }

    /// Print the starting board, then process lines until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        self.write_board(out)?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match self.handle_line(trimmed, out) {
                Ok(flow) => {
                    summary.commands += 1;
                    if flow == Flow::Stop {
                        break;
                    }
                }
                Err(SessionError::Command(e)) => {
                    summary.errors += 1;
                    tracing::debug!("Rejected {trimmed:?}: {e}");
                    writeln!(out, "error: {e}")?;
                }
                Err(SessionError::Io(e)) => return Err(e),
            }
        }

        summary.solved = self.controller.is_connected();
        tracing::info!(
            commands = summary.commands,
            errors = summary.errors,
            solved = summary.solved,
            "Session ended"
        );
        Ok(summary)
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, SessionError> {
        let command: GameCommand = line.parse()?;
        let was_connected = self.controller.is_connected();

        match command.execute(&mut self.controller)? {
            Feedback::Rotated(outcome) => {
                match outcome {
                    RotateOutcome::Rotated { .. } => {}
                    RotateOutcome::Fixed(id) => writeln!(out, "Piece {id} cannot be rotated")?,
                    RotateOutcome::UnknownNode(id) => writeln!(out, "No piece with id {id}")?,
                }
                if !was_connected && self.controller.is_connected() {
                    tracing::info!(
                        "Level {} solved in {} moves",
                        self.controller.level(),
                        self.controller.moves()
                    );
                }
                self.write_board(out)?;
            }
            Feedback::LevelLoaded(level) => {
                tracing::debug!("Showing level {level}");
                self.write_board(out)?;
            }
            Feedback::Board => self.write_board(out)?,
            Feedback::BoardJson => self.write_json(out)?,
            Feedback::LevelList => {
                let levels = render_levels(self.controller.catalog(), self.controller.level());
                out.write_all(levels.as_bytes())?;
            }
            Feedback::Help => out.write_all(HELP.as_bytes())?,
            Feedback::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn write_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.json {
            return self.write_json(out);
        }
        let snapshot = BoardSnapshot::capture(&self.controller, self.settings.spacing);
        out.write_all(render_board(&snapshot, self.settings.show_base_ports).as_bytes())
    }

    fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = BoardSnapshot::capture(&self.controller, self.settings.spacing);
        let json = snapshot.to_json().map_err(io::Error::other)?;
        writeln!(out, "{json}")
    }
}

#[derive(Debug, thiserror::Error)]
enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_flow_graph::LevelCatalog;
    use std::io::Cursor;

    fn session(json: bool) -> Session {
        let controller = PuzzleController::new(LevelCatalog::builtin().unwrap()).unwrap();
        Session::new(controller, GameSettings::default(), json)
    }

    fn play(session: &mut Session, script: &str) -> (SessionSummary, String) {
        let mut out = Vec::new();
        let summary = session.run(Cursor::new(script), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_script_solves_first_level() {
        let mut session = session(false);
        let (summary, out) = play(&mut session, "# solve level one\n\nrotate 2\nquit\nrotate 2\n");

        assert_eq!(summary.commands, 2);
        assert_eq!(summary.errors, 0);
        assert!(summary.solved);
        assert!(out.contains("Circuit open"));
        assert!(out.contains("Circuit closed! Current flows 1 -> 2 -> 3"));
        assert_eq!(session.controller().moves(), 1);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = session(false);
        let (summary, out) = play(&mut session, "jump\nlevel 99\nrotate 1\nrotate 42\nlevel 2\n");

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.commands, 3);
        assert!(out.contains("error: Unknown command: jump"));
        assert!(out.contains("Piece 1 cannot be rotated"));
        assert!(out.contains("No piece with id 42"));
        assert_eq!(session.controller().level(), 2);
    }

    #[test]
    fn test_json_mode_prints_one_line_per_board() {
        let mut session = session(true);
        let (_, out) = play(&mut session, "rotate 2\n");

        let boards: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0]["connected"], false);
        assert_eq!(boards[1]["connected"], true);
        assert_eq!(boards[1]["path"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_levels_and_help() {
        let mut session = session(false);
        let (_, out) = play(&mut session, "levels\nhelp\n");
        assert!(out.contains(">  1. Straight Line"));
        assert!(out.contains("Commands:"));
    }
}
