//! Authoritative game state owned by the turn controller

use crate::core::{Color, Coord};
use crate::engine::BoardSnapshot;
use serde::Serialize;
use smallvec::SmallVec;

/// Destinations highlighted for the selected piece
pub type Destinations = SmallVec<[Coord; 8]>;

/// Where the current turn stands
///
/// A selection always carries its destinations, and a chain capture can
/// only exist with the piece that just captured as its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    /// Nothing selected
    Idle,
    /// A piece of the active color is selected
    Selected { origin: Coord, destinations: Destinations },
    /// The piece that just captured must capture again
    ChainCapture { origin: Coord, destinations: Destinations },
}

impl TurnPhase {
    pub fn selection(&self) -> Option<Coord> {
        match self {
            TurnPhase::Idle => None,
            TurnPhase::Selected { origin, .. } | TurnPhase::ChainCapture { origin, .. } => Some(*origin),
        }
    }

    pub fn destinations(&self) -> &[Coord] {
        match self {
            TurnPhase::Idle => &[],
            TurnPhase::Selected { destinations, .. } | TurnPhase::ChainCapture { destinations, .. } => destinations.as_slice(),
        }
    }

    /// Origin of an unfinished capture chain
    pub fn chain_origin(&self) -> Option<Coord> {
        match self {
            TurnPhase::ChainCapture { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, TurnPhase::ChainCapture { .. })
    }
}

/// Turn counters, active side, current phase and the last board snapshot
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub(super) turn_number: u32,
    pub(super) move_counter: u64,
    pub(super) active_color: Color,
    pub(super) phase: TurnPhase,
    pub(super) board: BoardSnapshot,
}

impl GameState {
    /// Fresh game: black to move, nothing selected
    pub fn new(board: BoardSnapshot) -> Self {
        GameState {
            turn_number: 0,
            move_counter: 0,
            active_color: Color::Black,
            phase: TurnPhase::Idle,
            board,
        }
    }

    /// Completed turns
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Applied moves, chain links included
    pub fn move_counter(&self) -> u64 {
        self.move_counter
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn selection(&self) -> Option<Coord> {
        self.phase.selection()
    }

    pub fn available_destinations(&self) -> &[Coord] {
        self.phase.destinations()
    }

    pub fn board(&self) -> &BoardSnapshot {
        &self.board
    }
}
