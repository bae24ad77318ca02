use std::num::ParseIntError;
use std::str::FromStr;

use sapper_core::Coord2;
use thiserror::Error;

/// A command typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Starts the game on the first use, reveals afterwards.
    Open(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntentError {
    #[error("Type a command, h for help")]
    Empty,
    #[error("Unknown command {0:?}, h for help")]
    UnknownCommand(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("Unexpected trailing input {0:?}")]
    TrailingInput(String),
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(IntentError::Empty)?;

        let intent = match command.to_ascii_lowercase().as_str() {
            "r" | "reveal" | "o" | "open" => Intent::Open(parse_coords(&mut words)?),
            "f" | "flag" => Intent::Flag(parse_coords(&mut words)?),
            "c" | "chord" => Intent::Chord(parse_coords(&mut words)?),
            "n" | "new" | "reset" => Intent::Reset,
            "h" | "help" | "?" => Intent::Help,
            "q" | "quit" | "exit" => Intent::Quit,
            _ => return Err(IntentError::UnknownCommand(command.to_string())),
        };

        match words.next() {
            Some(extra) => Err(IntentError::TrailingInput(extra.to_string())),
            None => Ok(intent),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, IntentError> {
    let row = words.next().ok_or(IntentError::MissingCoords)?.parse()?;
    let col = words.next().ok_or(IntentError::MissingCoords)?.parse()?;
    Ok((row, col))
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell (the first one starts the game)
  f ROW COL   toggle a flag
  c ROW COL   reveal the hidden neighbors of a revealed cell
  n           new game
  h           this help
  q           quit";
