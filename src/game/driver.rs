//! Automated opponent driver
//!
//! The driver acts only through the controller's public `select` and
//! `move_to`, so the automated side is bound by exactly the same rules as
//! a human. Each action is keyed to an [`AutoplayTicket`] stamped with the
//! controller counters at the time it was issued; a ticket the controller
//! no longer accepts is dropped without touching the game.

use crate::core::Color;
use crate::engine::{MoveProposal, RulesEngine};
use crate::game::controller::TurnController;
use crate::game::logger::VerbosityLevel;
use crate::game::transition::Transition;
use crate::Result;
use serde::Serialize;

/// Which half of an automated move a ticket performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AutoplayStep {
    /// Ask the engine for a move and select its origin
    Select,
    /// Complete a move whose origin is already selected
    Move(MoveProposal),
}

/// Permission for the driver to act on one specific game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoplayTicket {
    pub color: Color,
    pub turn_number: u32,
    pub move_counter: u64,
    pub step: AutoplayStep,
}

impl AutoplayTicket {
    /// Same state, next step
    pub fn then(self, step: AutoplayStep) -> Self {
        AutoplayTicket { step, ..self }
    }
}

/// What happened when a ticket was performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutcome {
    /// The game moved on since the ticket was issued
    Stale,
    /// The engine had nothing to propose
    NoMove,
    Acted(Transition),
}

/// Plays one color through the turn controller
#[derive(Debug, Clone)]
pub struct OpponentDriver {
    color: Color,
}

impl OpponentDriver {
    pub fn new(color: Color) -> Self {
        OpponentDriver { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn perform<E: RulesEngine>(
        &mut self,
        ticket: AutoplayTicket,
        controller: &mut TurnController<E>,
    ) -> Result<DriverOutcome> {
        if ticket.color != self.color || !controller.accepts(&ticket) {
            controller.logger.categorized(
                VerbosityLevel::Verbose,
                "autoplay",
                &format!(
                    "discarding stale {} ticket (move {}, now {})",
                    self.color,
                    ticket.move_counter,
                    controller.state().move_counter()
                ),
            );
            return Ok(DriverOutcome::Stale);
        }

        match ticket.step {
            AutoplayStep::Select => {
                let Some(proposal) = controller.propose_move(self.color) else {
                    controller.logger.categorized(
                        VerbosityLevel::Minimal,
                        "autoplay",
                        &format!("{} has no legal move", self.color),
                    );
                    return Ok(DriverOutcome::NoMove);
                };
                let mut transition = controller.select(proposal.from)?;
                transition.autoplay = Some(ticket.then(AutoplayStep::Move(proposal)));
                Ok(DriverOutcome::Acted(transition))
            }
            AutoplayStep::Move(proposal) => {
                if controller.state().selection() != Some(proposal.from) {
                    let reselect = controller.select(proposal.from)?;
                    if reselect.is_ignored() {
                        return Ok(DriverOutcome::Stale);
                    }
                }
                Ok(DriverOutcome::Acted(controller.move_to(proposal.to)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;
    use crate::engine::TurkishBoard;
    use crate::game::logger::GameLogger;
    use crate::game::transition::Outcome;

    fn controller(auto_side: Color) -> TurnController<TurkishBoard> {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        TurnController::new(TurkishBoard::new(3), Some(auto_side)).with_logger(logger)
    }

    #[test]
    fn test_select_then_move() {
        let mut controller = controller(Color::Black);
        let mut driver = OpponentDriver::new(Color::Black);
        let ticket = controller.start().unwrap();

        let DriverOutcome::Acted(selected) = driver.perform(ticket, &mut controller).unwrap() else {
            panic!("expected the driver to select");
        };
        assert!(matches!(selected.outcome, Outcome::Selected { .. }));
        let move_ticket = selected.autoplay.unwrap();
        assert!(matches!(move_ticket.step, AutoplayStep::Move(_)));
        assert_eq!(controller.state().move_counter(), 0);

        let DriverOutcome::Acted(moved) = driver.perform(move_ticket, &mut controller).unwrap() else {
            panic!("expected the driver to move");
        };
        assert_eq!(moved.outcome, Outcome::TurnEnded { next: Color::White });
        assert_eq!(controller.state().move_counter(), 1);
        assert_eq!(moved.autoplay, None);
    }

    #[test]
    fn test_wrong_color_ticket_is_stale() {
        let mut controller = controller(Color::Black);
        let mut driver = OpponentDriver::new(Color::White);
        let ticket = controller.start().unwrap();
        assert_eq!(driver.perform(ticket, &mut controller).unwrap(), DriverOutcome::Stale);
    }

    #[test]
    fn test_stale_after_counter_advances() {
        let mut controller = controller(Color::White);
        let mut driver = OpponentDriver::new(Color::White);

        let ticket = AutoplayTicket {
            color: Color::White,
            turn_number: 1,
            move_counter: 1,
            step: AutoplayStep::Select,
        };
        controller.select(Coord::new(5, 0).unwrap()).unwrap();
        controller.move_to(Coord::new(4, 0).unwrap()).unwrap();
        assert!(controller.accepts(&ticket));

        controller.select(Coord::new(2, 0).unwrap()).unwrap();
        controller.move_to(Coord::new(3, 0).unwrap()).unwrap();
        assert_eq!(driver.perform(ticket, &mut controller).unwrap(), DriverOutcome::Stale);
        assert_eq!(controller.logger.logs_in("autoplay").len(), 1);
    }

    #[test]
    fn test_no_move_when_side_is_empty() {
        let mut board = TurkishBoard::empty(0);
        board.place(Coord::new(0, 0).unwrap(), crate::core::Piece::man(Color::White));
        let mut controller = TurnController::new(board, Some(Color::Black));
        controller.logger.enable_capture();
        let mut driver = OpponentDriver::new(Color::Black);

        let ticket = controller.start().unwrap();
        assert_eq!(driver.perform(ticket, &mut controller).unwrap(), DriverOutcome::NoMove);
    }
}
