//! Reference Turkish-draughts board
//!
//! Men step one square forward or sideways and capture by jumping an
//! adjacent enemy in those directions. Kings travel any distance along
//! rows and columns and capture flying. Captures are mandatory; the
//! majority-capture rule is not enforced.

use crate::core::{Color, Coord, Direction, Movement, Piece, BOARD_SIZE};
use crate::engine::{BoardSnapshot, CaptureList, MoveProposal, RulesEngine, Square};
use crate::{DamaError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;

const SIZE: usize = BOARD_SIZE as usize;

/// 8×8 Turkish-draughts board with a seeded autoplay
#[derive(Debug, Clone)]
pub struct TurkishBoard {
    squares: [[Option<Piece>; SIZE]; SIZE],
    selected: [[bool; SIZE]; SIZE],
    rng: ChaCha12Rng,
}

impl TurkishBoard {
    /// Standard opening: white men on rows 1-2, black men on rows 5-6
    pub fn new(seed: u64) -> Self {
        let mut board = TurkishBoard::empty(seed);
        for col in 0..SIZE {
            for row in [1, 2] {
                board.squares[row][col] = Some(Piece::man(Color::White));
            }
            for row in [5, 6] {
                board.squares[row][col] = Some(Piece::man(Color::Black));
            }
        }
        board
    }

    /// A board with no pieces, for composing positions
    pub fn empty(seed: u64) -> Self {
        TurkishBoard {
            squares: [[None; SIZE]; SIZE],
            selected: [[false; SIZE]; SIZE],
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Put a piece on a square, replacing whatever was there
    pub fn place(&mut self, coord: Coord, piece: Piece) -> &mut Self {
        *self.slot_mut(coord) = Some(piece);
        self
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selected[coord.row() as usize][coord.col() as usize]
    }

    fn slot(&self, coord: Coord) -> &Option<Piece> {
        &self.squares[coord.row() as usize][coord.col() as usize]
    }

    fn slot_mut(&mut self, coord: Coord) -> &mut Option<Piece> {
        &mut self.squares[coord.row() as usize][coord.col() as usize]
    }

    fn require(&self, coord: Coord) -> Result<Piece> {
        self.slot(coord).ok_or(DamaError::EmptySquare(coord))
    }

    /// Landing squares of every capture open to the piece at `from`
    fn jumps(&self, from: Coord, color: Color, movement: Movement) -> SmallVec<[Coord; 8]> {
        let mut jumps = SmallVec::new();
        for dir in movement.directions() {
            match movement {
                Movement::Man { .. } => {
                    let (Some(victim), Some(landing)) = (from.offset(dir, 1), from.offset(dir, 2)) else {
                        continue;
                    };
                    if self.is_enemy(victim, color) && self.slot(landing).is_none() {
                        jumps.push(landing);
                    }
                }
                Movement::King => self.king_jumps(from, color, dir, &mut jumps),
            }
        }
        jumps
    }

    fn king_jumps(&self, from: Coord, color: Color, dir: Direction, out: &mut SmallVec<[Coord; 8]>) {
        let mut step = 1;
        while let Some(square) = from.offset(dir, step) {
            match self.slot(square) {
                None => step += 1,
                Some(piece) if piece.color == color => return,
                Some(_) => {
                    // Fly over the single enemy, land on any empty square behind it
                    let mut beyond = step + 1;
                    while let Some(landing) = from.offset(dir, beyond) {
                        if self.slot(landing).is_some() {
                            break;
                        }
                        out.push(landing);
                        beyond += 1;
                    }
                    return;
                }
            }
        }
    }

    fn steps(&self, from: Coord, movement: Movement) -> Vec<Coord> {
        let mut steps = Vec::new();
        for dir in movement.directions() {
            for distance in 1..=movement.range() {
                match from.offset(dir, distance) {
                    Some(square) if self.slot(square).is_none() => steps.push(square),
                    _ => break,
                }
            }
        }
        steps
    }

    fn is_enemy(&self, coord: Coord, color: Color) -> bool {
        matches!(self.slot(coord), Some(piece) if piece.color != color)
    }
}

impl RulesEngine for TurkishBoard {
    fn piece_at(&self, coord: Coord) -> Option<Piece> {
        *self.slot(coord)
    }

    fn pieces_of(&self, color: Color) -> Vec<Coord> {
        Coord::all()
            .filter(|c| matches!(self.slot(*c), Some(p) if p.color == color))
            .collect()
    }

    fn legal_destinations(&self, from: Coord, movement: Movement) -> Result<Vec<Coord>> {
        let piece = self.require(from)?;
        let mut destinations = self.jumps(from, piece.color, movement).into_vec();
        destinations.extend(self.steps(from, movement));
        Ok(destinations)
    }

    fn forced_capture_origins(&self, color: Color) -> Vec<Coord> {
        Coord::all()
            .filter(|&c| match *self.slot(c) {
                Some(piece) if piece.color == color => !self.jumps(c, color, piece.movement()).is_empty(),
                _ => false,
            })
            .collect()
    }

    fn captured_squares_between(&self, from: Coord, to: Coord) -> Result<CaptureList> {
        let piece = self.require(from)?;
        let mut captured = CaptureList::new();
        if let Some((dir, distance)) = from.line_to(to) {
            for step in 1..distance {
                if let Some(square) = from.offset(dir, step) {
                    if self.is_enemy(square, piece.color) {
                        captured.push(square);
                    }
                }
            }
        }
        Ok(captured)
    }

    fn apply_move(&mut self, from: Coord, to: Coord) -> Result<()> {
        let piece = self.require(from)?;
        if self.slot(to).is_some() {
            return Err(DamaError::IllegalMove(format!("{from} -> {to}: destination occupied")));
        }
        *self.slot_mut(from) = None;
        *self.slot_mut(to) = Some(piece);
        let was_selected = std::mem::replace(&mut self.selected[from.row() as usize][from.col() as usize], false);
        self.selected[to.row() as usize][to.col() as usize] = was_selected;
        Ok(())
    }

    fn remove_piece(&mut self, coord: Coord) -> Result<()> {
        self.require(coord)?;
        *self.slot_mut(coord) = None;
        self.selected[coord.row() as usize][coord.col() as usize] = false;
        Ok(())
    }

    fn promote_to_king(&mut self, coord: Coord) -> Result<()> {
        let piece = self.require(coord)?;
        *self.slot_mut(coord) = Some(Piece::king(piece.color));
        Ok(())
    }

    fn select(&mut self, coord: Coord) -> Result<()> {
        self.require(coord)?;
        self.selected[coord.row() as usize][coord.col() as usize] = true;
        Ok(())
    }

    fn deselect_all(&mut self) {
        self.selected = [[false; SIZE]; SIZE];
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(
            Coord::all()
                .map(|coord| Square {
                    coord,
                    piece: *self.slot(coord),
                    selected: self.is_selected(coord),
                })
                .collect(),
        )
    }

    fn propose_move(&mut self, color: Color, origin: Option<Coord>) -> Option<MoveProposal> {
        let capturing = self.forced_capture_origins(color);
        let origins: Vec<Coord> = match origin {
            Some(coord) => vec![coord],
            None if !capturing.is_empty() => capturing.clone(),
            None => self.pieces_of(color),
        };

        let mut candidates: Vec<MoveProposal> = Vec::new();
        for from in origins {
            let Some(piece) = *self.slot(from) else {
                continue;
            };
            if piece.color != color {
                continue;
            }
            if capturing.is_empty() {
                candidates.extend(self.steps(from, piece.movement()).into_iter().map(|to| MoveProposal { from, to }));
            } else {
                candidates.extend(
                    self.jumps(from, color, piece.movement())
                        .into_iter()
                        .map(|to| MoveProposal { from, to }),
                );
            }
        }

        candidates.choose(&mut self.rng).copied()
    }
}
