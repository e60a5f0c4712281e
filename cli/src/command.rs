use minefield_core::{CellCount, Coord, Coord2, Difficulty};
use thiserror::Error;

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    ChangeDifficulty(Difficulty),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum ParseError {
    #[error("Empty command, type h for help")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("{0} needs {1} argument(s)")]
    Arity(&'static str, usize),
    #[error("Not a number: {0:?}")]
    Number(String),
    #[error("Unknown difficulty {0:?}, expected beginner, intermediate or expert")]
    Difficulty(String),
}

pub(crate) const HELP: &str = "\
commands:
  r X Y    reveal the cell at column X, row Y
  f X Y    flag or unflag the cell at column X, row Y
  n        new game with the current difficulty
  d NAME   new game on a preset: beginner, intermediate, expert
  c W H M  new custom game, W x H cells with M mines
  h        show this help
  q        quit";

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Self::Reveal(coords("reveal", &args)?)),
            "f" | "flag" => Ok(Self::Flag(coords("flag", &args)?)),
            "n" | "new" => expect_args::<0>("new", &args).map(|_| Self::NewGame),
            "d" | "difficulty" => {
                let [preset] = expect_args("difficulty", &args)?;
                preset
                    .parse()
                    .map(Self::ChangeDifficulty)
                    .map_err(|_| ParseError::Difficulty(preset.to_string()))
            }
            "c" | "custom" => {
                let [width, height, mines] = expect_args("custom", &args)?;
                Ok(Self::ChangeDifficulty(Difficulty::Custom {
                    width: number::<Coord>(width)?,
                    height: number::<Coord>(height)?,
                    mines: number::<CellCount>(mines)?,
                }))
            }
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn expect_args<'a, const N: usize>(
    name: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    args.try_into().map_err(|_| ParseError::Arity(name, N))
}

fn coords(name: &'static str, args: &[&str]) -> Result<Coord2, ParseError> {
    let [x, y] = expect_args(name, args)?;
    Ok((number(x)?, number(y)?))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::Number(word.to_string()))
}
