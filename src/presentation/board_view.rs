//! Clickable-grid projection of the game state
//!
//! One [`CellView`] per square carrying exactly what the board surface
//! needs: coordinate, occupant color, selected/king flags and whether the
//! cell is a highlighted destination.

use crate::core::{Color, Coord};
use crate::game::GameState;
use crate::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub coord: Coord,
    pub occupant: Option<Color>,
    pub king: bool,
    pub selected: bool,
    pub available: bool,
}

impl CellView {
    fn glyph(&self) -> char {
        match (self.occupant, self.king) {
            (Some(Color::Black), false) => 'b',
            (Some(Color::Black), true) => 'B',
            (Some(Color::White), false) => 'w',
            (Some(Color::White), true) => 'W',
            (None, _) if self.available => '*',
            (None, _) => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub turn: u32,
    pub active_color: Color,
    pub rows: Vec<Vec<CellView>>,
}

impl BoardView {
    pub fn from_state(state: &GameState) -> Self {
        let available = state.available_destinations();
        let rows = state
            .board()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|square| CellView {
                        coord: square.coord,
                        occupant: square.piece.map(|p| p.color),
                        king: square.piece.map(|p| p.king).unwrap_or(false),
                        selected: square.selected,
                        available: available.contains(&square.coord),
                    })
                    .collect()
            })
            .collect();

        BoardView {
            turn: state.turn_number(),
            active_color: state.active_color(),
            rows,
        }
    }

    pub fn cell(&self, coord: Coord) -> &CellView {
        &self.rows[coord.row() as usize][coord.col() as usize]
    }

    /// Text grid: `b`/`w` men, `B`/`W` kings, `*` destinations,
    /// brackets around the selected piece
    pub fn render_text(&self) -> String {
        let mut lines = vec![format!("turn {} - {} to move", self.turn, self.active_color)];

        let header: String = (0..self.rows.len()).map(|col| format!(" {col} ")).collect();
        lines.push(format!("  {header}").trim_end().to_string());

        for (row, cells) in self.rows.iter().enumerate() {
            let body: String = cells
                .iter()
                .map(|cell| {
                    if cell.selected {
                        format!("[{}]", cell.glyph())
                    } else {
                        format!(" {} ", cell.glyph())
                    }
                })
                .collect();
            lines.push(format!("{row} {body}").trim_end().to_string());
        }

        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
