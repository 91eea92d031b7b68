//! Board-level value types
//!
//! Colors, squares and directions on the 8×8 Turkish-draughts board. A
//! [`Coord`] can only be built for a square that exists, so any `Coord`
//! reaching the rules engine is on the board.

use crate::{DamaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the board
pub const BOARD_SIZE: i32 = 8;

/// Side of the board a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Direction a man of this color advances in
    pub fn forward(self) -> Direction {
        match self {
            Color::Black => Direction::Up,
            Color::White => Direction::Down,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = DamaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "black" | "b" => Ok(Color::Black),
            "white" | "w" => Ok(Color::White),
            _ => Err(DamaError::ParseError(format!(
                "invalid color '{s}' (expected: black or white)"
            ))),
        }
    }
}

/// Orthogonal direction on the board (row 0 is the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) delta of a single step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A square on the board
///
/// Ordering is row-major, which is also the order the rules engine
/// enumerates squares in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, failing if it is off the board
    pub fn new(row: i32, col: i32) -> Result<Self> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Ok(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(DamaError::InvalidCoordinate { row, col })
        }
    }

    pub fn row(&self) -> i32 {
        self.row as i32
    }

    pub fn col(&self) -> i32 {
        self.col as i32
    }

    /// Rows 0 and 7: reaching either one crowns a piece
    pub fn is_back_rank(&self) -> bool {
        self.row == 0 || self.row as i32 == BOARD_SIZE - 1
    }

    /// The square `steps` squares away in `dir`, if still on the board
    pub fn offset(&self, dir: Direction, steps: i32) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        Coord::new(self.row() + dr * steps, self.col() + dc * steps).ok()
    }

    /// Direction and distance from `self` to `other` when both share a row or column
    pub fn line_to(&self, other: Coord) -> Option<(Direction, i32)> {
        let (dr, dc) = (other.row() - self.row(), other.col() - self.col());
        match (dr, dc) {
            (0, 0) => None,
            (0, c) if c > 0 => Some((Direction::Right, c)),
            (0, c) => Some((Direction::Left, -c)),
            (r, 0) if r > 0 => Some((Direction::Down, r)),
            (r, 0) => Some((Direction::Up, -r)),
            _ => None,
        }
    }

    /// All squares in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = DamaError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DamaError::ParseError(format!("invalid coordinate '{s}' (expected: row-col, e.g. 5-2)"));
        let (row, col) = s.trim().split_once('-').ok_or_else(invalid)?;
        let row = row.trim().parse::<i32>().map_err(|_| invalid())?;
        let col = col.trim().parse::<i32>().map_err(|_| invalid())?;
        Coord::new(row, col)
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_string()
    }
}

impl TryFrom<String> for Coord {
    type Error = DamaError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
