//! Rules engine contract
//!
//! The turn controller never decides what is legal. It asks an engine
//! implementing [`RulesEngine`] and applies the answers. Any call that
//! needs a piece on a square that is empty returns
//! [`DamaError::EmptySquare`](crate::DamaError::EmptySquare): that is a
//! controller bug, not user input.

pub mod turkish;

pub use turkish::TurkishBoard;

use crate::core::{Color, Coord, Movement, Piece, BOARD_SIZE};
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Squares whose occupants are removed when a move completes, in jump order
pub type CaptureList = SmallVec<[Coord; 4]>;

/// A move suggested by the engine's autoplay facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveProposal {
    pub from: Coord,
    pub to: Coord,
}

/// One square of a [`BoardSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Square {
    pub coord: Coord,
    pub piece: Option<Piece>,
    pub selected: bool,
}

/// Read-only copy of the engine board, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    squares: Vec<Square>,
}

impl BoardSnapshot {
    pub fn new(squares: Vec<Square>) -> Self {
        debug_assert_eq!(squares.len(), (BOARD_SIZE * BOARD_SIZE) as usize);
        BoardSnapshot { squares }
    }

    pub fn square(&self, coord: Coord) -> &Square {
        &self.squares[(coord.row() * BOARD_SIZE + coord.col()) as usize]
    }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.square(coord).piece
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(BOARD_SIZE as usize)
    }

    pub fn count(&self, color: Color) -> usize {
        self.squares
            .iter()
            .filter(|sq| sq.piece.map(|p| p.color) == Some(color))
            .count()
    }
}

/// Semantic surface of a Turkish-draughts rules engine
pub trait RulesEngine {
    /// Piece on a square, if any
    fn piece_at(&self, coord: Coord) -> Option<Piece>;

    /// Squares holding pieces of `color`, in enumeration order
    fn pieces_of(&self, color: Color) -> Vec<Coord>;

    /// Every square the piece at `from` can reach with `movement`,
    /// capturing landings included
    fn legal_destinations(&self, from: Coord, movement: Movement) -> Result<Vec<Coord>>;

    /// Squares of `color` pieces that have a capture available, in
    /// enumeration order
    fn forced_capture_origins(&self, color: Color) -> Vec<Coord>;

    /// Enemy squares jumped when the piece at `from` moves to `to`
    fn captured_squares_between(&self, from: Coord, to: Coord) -> Result<CaptureList>;

    fn apply_move(&mut self, from: Coord, to: Coord) -> Result<()>;

    fn remove_piece(&mut self, coord: Coord) -> Result<()>;

    fn promote_to_king(&mut self, coord: Coord) -> Result<()>;

    fn select(&mut self, coord: Coord) -> Result<()>;

    fn deselect_all(&mut self);

    fn snapshot(&self) -> BoardSnapshot;

    /// Autoplay: pick a move for `color`, restricted to `origin` when given
    fn propose_move(&mut self, color: Color, origin: Option<Coord>) -> Option<MoveProposal>;
}
