// SPDX-License-Identifier: MIT OR Apache-2.0
//! Player commands.
//!
//! A command is one line of input: a verb and at most one numeric argument.
//! Parsing never touches the game; [`GameCommand::execute`] is the only path
//! from input to the controller.

use circuit_flow_graph::{ControllerError, NodeId, PuzzleController, RotateOutcome};
use std::num::ParseIntError;
use std::str::FromStr;

/// A parsed player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Turn a wire
    Rotate(NodeId),
    /// Restore the active level
    Reset,
    /// Switch to a level
    Level(u32),
    /// Next level
    Next,
    /// Previous level
    Previous,
    /// Print the board
    Show,
    /// Print the board as JSON
    Json,
    /// List levels
    Levels,
    /// Print the command reference
    Help,
    /// Leave the game
    Quit,
}

/// What executing a command produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Result of a rotate command
    Rotated(RotateOutcome),
    /// A level was (re)loaded
    LevelLoaded(u32),
    /// Board requested as text
    Board,
    /// Board requested as JSON
    BoardJson,
    /// Level list requested
    LevelList,
    /// Help requested
    Help,
    /// Session should end
    Quit,
}

impl GameCommand {
    /// Apply the command to the controller
    pub fn execute(self, controller: &mut PuzzleController) -> Result<Feedback, CommandError> {
        let feedback = match self {
            Self::Rotate(id) => Feedback::Rotated(controller.rotate(id)),
            Self::Reset => {
                controller.restart();
                Feedback::LevelLoaded(controller.level())
            }
            Self::Level(n) => {
                controller.load_level(n)?;
                Feedback::LevelLoaded(n)
            }
            Self::Next => {
                controller.next_level()?;
                Feedback::LevelLoaded(controller.level())
            }
            Self::Previous => {
                controller.previous_level()?;
                Feedback::LevelLoaded(controller.level())
            }
            Self::Show => Feedback::Board,
            Self::Json => Feedback::BoardJson,
            Self::Levels => Feedback::LevelList,
            Self::Help => Feedback::Help,
            Self::Quit => Feedback::Quit,
        };
        Ok(feedback)
    }
}

impl FromStr for GameCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        let command = match verb.to_ascii_lowercase().as_str() {
            "rotate" | "r" => Self::Rotate(NodeId(number(argument, "node id")?)),
            "level" | "l" => Self::Level(number(argument, "level number")?),
            verb => {
                if let Some(extra) = argument {
                    return Err(CommandError::UnexpectedArgument(extra.to_string()));
                }
                match verb {
                    "reset" => Self::Reset,
                    "next" | "n" => Self::Next,
                    "prev" | "previous" | "p" => Self::Previous,
                    "show" | "s" => Self::Show,
                    "json" => Self::Json,
                    "levels" => Self::Levels,
                    "help" | "h" | "?" => Self::Help,
                    "quit" | "exit" | "q" => Self::Quit,
                    other => return Err(CommandError::Unknown(other.to_string())),
                }
            }
        };
        Ok(command)
    }
}

fn number(argument: Option<&str>, what: &'static str) -> Result<u32, CommandError> {
    let text = argument.ok_or(CommandError::MissingArgument(what))?;
    text.parse().map_err(|source| CommandError::InvalidNumber {
        text: text.to_string(),
        source,
    })
}

/// Error parsing or executing a command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Blank line
    #[error("Empty command")]
    Empty,

    /// Unrecognized verb
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    /// Verb needs an argument
    #[error("Missing {0}")]
    MissingArgument(&'static str),

    /// Argument is not a number
    #[error("Not a number: {text}")]
    InvalidNumber {
        /// Offending text
        text: String,
        /// Parse failure
        source: ParseIntError,
    },

    /// Trailing input
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Level command rejected
    #[error(transparent)]
    Level(#[from] ControllerError),
}
