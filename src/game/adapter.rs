//! Call surface over the rules engine
//!
//! The adapter owns the single engine instance for the session and
//! forwards to it. It adds no game policy; it only gives the controller a
//! stable surface and turns "expected a piece here" into an error.

use crate::core::{Color, Coord, Movement, Piece};
use crate::engine::{BoardSnapshot, CaptureList, MoveProposal, RulesEngine};
use crate::game::state::Destinations;
use crate::{DamaError, Result};

pub struct EngineAdapter<E: RulesEngine> {
    engine: E,
}

impl<E: RulesEngine> EngineAdapter<E> {
    pub fn new(engine: E) -> Self {
        EngineAdapter { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.engine.piece_at(coord)
    }

    /// Piece that must be on `coord`; its absence is a controller bug
    pub fn require_piece(&self, coord: Coord) -> Result<Piece> {
        self.engine.piece_at(coord).ok_or(DamaError::EmptySquare(coord))
    }

    pub fn pieces_of(&self, color: Color) -> Vec<Coord> {
        self.engine.pieces_of(color)
    }

    pub fn legal_destinations(&self, coord: Coord, movement: Movement) -> Result<Destinations> {
        Ok(self.engine.legal_destinations(coord, movement)?.into_iter().collect())
    }

    pub fn forced_capture_origins(&self, color: Color) -> Vec<Coord> {
        self.engine.forced_capture_origins(color)
    }

    pub fn captured_squares_between(&self, from: Coord, to: Coord) -> Result<CaptureList> {
        self.engine.captured_squares_between(from, to)
    }

    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<()> {
        self.engine.apply_move(from, to)
    }

    pub fn remove_piece(&mut self, coord: Coord) -> Result<()> {
        self.engine.remove_piece(coord)
    }

    pub fn promote_to_king(&mut self, coord: Coord) -> Result<()> {
        self.engine.promote_to_king(coord)
    }

    pub fn select(&mut self, coord: Coord) -> Result<()> {
        self.engine.select(coord)
    }

    pub fn deselect_all(&mut self) {
        self.engine.deselect_all()
    }

    pub fn snapshot_board(&self) -> BoardSnapshot {
        self.engine.snapshot()
    }

    pub fn propose_move(&mut self, color: Color, origin: Option<Coord>) -> Option<MoveProposal> {
        self.engine.propose_move(color, origin)
    }
}
