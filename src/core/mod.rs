//! Core board types

pub mod piece;
pub mod types;

pub use piece::{Movement, Piece};
pub use types::{Color, Coord, Direction, BOARD_SIZE};
