//! Pieces and their movement capability

use crate::core::{Color, Direction};
use serde::{Deserialize, Serialize};

/// A piece on the board
///
/// Owned by the rules engine; the turn controller only ever reads it or
/// asks the engine to crown it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Piece { color, king: false }
    }

    pub fn king(color: Color) -> Self {
        Piece { color, king: true }
    }

    pub fn movement(&self) -> Movement {
        if self.king {
            Movement::King
        } else {
            Movement::Man {
                forward: self.color.forward(),
            }
        }
    }
}

/// How far and in which directions a piece may travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// One square forward or sideways
    Man { forward: Direction },
    /// Any distance along rows and columns
    King,
}

impl Movement {
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |dir| match self {
            Movement::Man { forward } => *dir != forward.reverse(),
            Movement::King => true,
        })
    }

    /// Maximum number of squares a non-capturing step can cover
    pub fn range(&self) -> i32 {
        match self {
            Movement::Man { .. } => 1,
            Movement::King => crate::core::BOARD_SIZE - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_never_moves_backward() {
        let black = Piece::man(Color::Black).movement();
        let dirs: Vec<Direction> = black.directions().collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Left, Direction::Right]);
        assert_eq!(black.range(), 1);

        let white = Piece::man(Color::White).movement();
        assert!(!white.directions().any(|d| d == Direction::Up));
    }

    #[test]
    fn test_king_moves_everywhere() {
        let king = Piece::king(Color::White).movement();
        assert_eq!(king, Movement::King);
        assert_eq!(king.directions().count(), 4);
        assert_eq!(king.range(), 7);
    }
}
