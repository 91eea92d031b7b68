//! Turn controller
//!
//! Turns raw clicks into game transitions. The controller owns the rules
//! engine (through [`EngineAdapter`]) and the authoritative [`GameState`];
//! nothing else mutates either. Every transition runs to completion and
//! reports what changed as a [`Transition`].
//!
//! Policy enforced here rather than in the engine:
//! - forced capture: if any piece of the active color can capture, a
//!   selection is redirected to the first such piece and only capturing
//!   destinations are offered
//! - promotion on rows 0 and 7, granted before the move is applied
//! - chain captures: a capture that lands where the same piece can
//!   capture again keeps the turn open
//! - a side reduced to one piece has that piece crowned

use crate::core::{Color, Coord};
use crate::engine::{MoveProposal, RulesEngine};
use crate::game::adapter::EngineAdapter;
use crate::game::driver::{AutoplayStep, AutoplayTicket};
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::state::{Destinations, GameState, TurnPhase};
use crate::game::transition::{Cue, Outcome, SideEffect, Transition, UiEvent};
use crate::Result;

pub struct TurnController<E: RulesEngine> {
    adapter: EngineAdapter<E>,
    state: GameState,
    /// Side played by the automated opponent, if any
    auto_side: Option<Color>,
    pub logger: GameLogger,
}

impl<E: RulesEngine> TurnController<E> {
    /// Take ownership of an initialized engine; black moves first
    pub fn new(engine: E, auto_side: Option<Color>) -> Self {
        let adapter = EngineAdapter::new(engine);
        let state = GameState::new(adapter.snapshot_board());
        TurnController {
            adapter,
            state,
            auto_side,
            logger: GameLogger::new(),
        }
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        self.adapter.engine()
    }

    pub fn auto_side(&self) -> Option<Color> {
        self.auto_side
    }

    /// Ticket for the automated side when it opens the game
    pub fn start(&self) -> Option<AutoplayTicket> {
        self.autoplay_ticket()
    }

    /// Dispatch a board click
    pub fn handle(&mut self, event: UiEvent) -> Result<Transition> {
        match event {
            UiEvent::SelectPiece(coord) => self.select(coord),
            UiEvent::MoveTo(coord) => self.move_to(coord),
        }
    }

    /// Select the piece on `coord`, or the forced capturer instead
    pub fn select(&mut self, coord: Coord) -> Result<Transition> {
        if let Some(origin) = self.state.phase.chain_origin() {
            self.log_ignored(&format!("select {coord}: {origin} must keep capturing"));
            return Ok(Transition::ignored());
        }

        let color = self.state.active_color;
        let forced = self.adapter.forced_capture_origins(color);
        let resolved = match forced.first() {
            Some(&first) if !forced.contains(&coord) => first,
            _ => coord,
        };

        let piece = match self.adapter.piece_at(resolved) {
            Some(piece) if piece.color == color => piece,
            _ => {
                self.log_ignored(&format!("select {coord}: no {color} piece there"));
                return Ok(Transition::ignored());
            }
        };

        let mut destinations = self.adapter.legal_destinations(resolved, piece.movement())?;
        if !forced.is_empty() {
            destinations = self.capturing_only(resolved, destinations)?;
        }

        self.adapter.deselect_all();
        self.adapter.select(resolved)?;
        self.state.phase = TurnPhase::Selected {
            origin: resolved,
            destinations,
        };
        self.refresh_board();

        let redirected_from = (resolved != coord).then_some(coord);
        match redirected_from {
            Some(clicked) => self.log_transition(&format!("{color} must capture: {clicked} -> selected {resolved}")),
            None => self.log_transition(&format!("{color} selects {resolved}")),
        }

        Ok(Transition {
            outcome: Outcome::Selected {
                coord: resolved,
                redirected_from,
            },
            effects: vec![SideEffect::PlayCue(Cue::Select), SideEffect::RefreshBoard],
            autoplay: None,
        })
    }

    /// Move the selected piece to `to` if it is one of the highlighted squares
    pub fn move_to(&mut self, to: Coord) -> Result<Transition> {
        let origin = match self.state.phase.selection() {
            Some(origin) if self.state.phase.destinations().contains(&to) => origin,
            _ => {
                self.log_ignored(&format!("move to {to}: not an available destination"));
                return Ok(Transition::ignored());
            }
        };
        let color = self.state.active_color;
        let mut effects = Vec::new();

        let piece = self.adapter.require_piece(origin)?;
        if to.is_back_rank() && !piece.king {
            self.adapter.promote_to_king(origin)?;
            self.log_transition(&format!("{color} piece from {origin} crowned on {to}"));
        }

        let captured = self.adapter.captured_squares_between(origin, to)?;
        self.adapter.apply_move(origin, to)?;
        for square in &captured {
            self.adapter.remove_piece(*square)?;
            effects.push(SideEffect::PlayCue(Cue::Destroy));
        }
        self.adapter.deselect_all();
        self.state.move_counter += 1;

        if captured.is_empty() {
            self.log_transition(&format!("{color} {origin} -> {to}"));
        } else {
            let taken: Vec<String> = captured.iter().map(Coord::to_string).collect();
            self.log_transition(&format!("{color} {origin} x {to} (takes {})", taken.join(", ")));
        }

        let chains = !captured.is_empty() && self.adapter.forced_capture_origins(color).contains(&to);
        let outcome = if chains {
            let piece = self.adapter.require_piece(to)?;
            let destinations = self.adapter.legal_destinations(to, piece.movement())?;
            let destinations = self.capturing_only(to, destinations)?;
            self.adapter.select(to)?;
            self.state.phase = TurnPhase::ChainCapture {
                origin: to,
                destinations,
            };
            self.refresh_board();
            effects.push(SideEffect::RefreshBoard);
            self.log_transition(&format!("{color} continues capturing from {to}"));
            Outcome::ChainContinues { at: to }
        } else {
            let next = color.opposite();
            self.state.phase = TurnPhase::Idle;
            self.state.active_color = next;
            self.state.turn_number += 1;
            self.crown_last_piece(next)?;
            self.refresh_board();
            effects.push(SideEffect::RefreshBoard);
            effects.push(SideEffect::PlayCue(Cue::Move));
            self.logger.categorized(
                VerbosityLevel::Minimal,
                "turn",
                &format!("turn {}: {next} to move", self.state.turn_number),
            );
            Outcome::TurnEnded { next }
        };

        Ok(Transition {
            outcome,
            effects,
            autoplay: self.autoplay_ticket(),
        })
    }

    /// Whether a ticket was issued for the state the controller is still in
    pub fn accepts(&self, ticket: &AutoplayTicket) -> bool {
        ticket.color == self.state.active_color
            && ticket.turn_number == self.state.turn_number
            && ticket.move_counter == self.state.move_counter
    }

    /// Ask the engine's autoplay for a move, constrained to an open chain
    pub fn propose_move(&mut self, color: Color) -> Option<MoveProposal> {
        let origin = self.state.phase.chain_origin();
        self.adapter.propose_move(color, origin)
    }

    fn autoplay_ticket(&self) -> Option<AutoplayTicket> {
        (self.auto_side == Some(self.state.active_color)).then(|| AutoplayTicket {
            color: self.state.active_color,
            turn_number: self.state.turn_number,
            move_counter: self.state.move_counter,
            step: AutoplayStep::Select,
        })
    }

    fn capturing_only(&self, from: Coord, destinations: Destinations) -> Result<Destinations> {
        let mut capturing = Destinations::new();
        for to in destinations {
            if !self.adapter.captured_squares_between(from, to)?.is_empty() {
                capturing.push(to);
            }
        }
        Ok(capturing)
    }

    fn crown_last_piece(&mut self, color: Color) -> Result<()> {
        if let [last] = self.adapter.pieces_of(color).as_slice() {
            if !self.adapter.require_piece(*last)?.king {
                self.adapter.promote_to_king(*last)?;
                self.log_transition(&format!("{color} is down to one piece: {last} crowned"));
            }
        }
        Ok(())
    }

    fn refresh_board(&mut self) {
        self.state.board = self.adapter.snapshot_board();
    }

    fn log_transition(&self, message: &str) {
        self.logger.categorized(VerbosityLevel::Normal, "transition", message);
    }

    fn log_ignored(&self, message: &str) {
        self.logger.categorized(VerbosityLevel::Verbose, "ignored", message);
    }
}
