//! Interactive session: input lines in, transitions out
//!
//! The session is the event loop of the front end. It reads board clicks
//! from a line-oriented input, forwards them to the turn controller, hands
//! each transition to the presenter and arms the autoplay timer when the
//! automated side is due. Input and timer are awaited together on one
//! task, so a transition always finishes before the next event is seen.

use crate::config::GameConfig;
use crate::core::Coord;
use crate::engine::RulesEngine;
use crate::game::{AutoplayScheduler, AutoplayTicket, DriverOutcome, OpponentDriver, TurnController, UiEvent};
use crate::presentation::{AudioSink, Presenter};
use crate::{DamaError, Result};
use std::io::{self, Write};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  <row-col>        click a square (select a piece, or move to an empty cell)
  s, select <r-c>  select the piece on a square
  m, move <r-c>    move the selected piece
  b, board         show the board
  ?, help          show this help
  q, quit          leave the game
Board: b/w men, B/W kings, * available destination, [x] selected piece";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    /// A bare coordinate: resolved against the board like a DOM click
    Click(Coord),
    Board,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = DamaError;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let Some(first) = words.next() else {
            return Err(DamaError::ParseError("empty command".to_string()));
        };
        let coord_arg = |words: &mut std::str::SplitWhitespace<'_>| -> Result<Coord> {
            words
                .next()
                .ok_or_else(|| DamaError::ParseError(format!("'{first}' needs a square, e.g. {first} 5-2")))?
                .parse()
        };

        let command = match first.to_lowercase().as_str() {
            "s" | "select" => Command::Event(UiEvent::SelectPiece(coord_arg(&mut words)?)),
            "m" | "move" => Command::Event(UiEvent::MoveTo(coord_arg(&mut words)?)),
            "b" | "board" => Command::Board,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::Click(other.parse()?),
        };

        if let Some(extra) = words.next() {
            return Err(DamaError::ParseError(format!("unexpected '{extra}'")));
        }
        Ok(command)
    }
}

/// Whether the loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

enum Wake {
    Input(io::Result<Option<String>>),
    Autoplay(AutoplayTicket),
}

pub struct Session<E: RulesEngine, A: AudioSink, W: Write = io::Stdout> {
    controller: TurnController<E>,
    driver: Option<OpponentDriver>,
    scheduler: AutoplayScheduler,
    presenter: Presenter<A, W>,
}

impl<E: RulesEngine, A: AudioSink, W: Write> Session<E, A, W> {
    pub fn new(controller: TurnController<E>, presenter: Presenter<A, W>, config: &GameConfig) -> Self {
        let driver = controller.auto_side().map(OpponentDriver::new);
        Session {
            controller,
            driver,
            scheduler: AutoplayScheduler::new(config.select_delay(), config.move_delay()),
            presenter,
        }
    }

    pub fn controller(&self) -> &TurnController<E> {
        &self.controller
    }

    pub fn scheduler(&self) -> &AutoplayScheduler {
        &self.scheduler
    }

    pub fn presenter(&self) -> &Presenter<A, W> {
        &self.presenter
    }

    /// Show the opening board and arm the timer if the automated side opens
    pub fn start(&mut self) -> Result<()> {
        self.presenter.render(self.controller.state())?;
        if let Some(ticket) = self.controller.start() {
            self.scheduler.schedule(ticket);
        }
        Ok(())
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        let transition = self.controller.handle(event)?;
        self.presenter
            .present(&transition, self.controller.state(), &self.controller.logger)?;
        if let Some(ticket) = transition.autoplay {
            self.scheduler.schedule(ticket);
        }
        Ok(())
    }

    pub fn command(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Event(event) => self.dispatch(event)?,
            Command::Click(coord) => {
                // The click bubbles to the cell too, but an occupied cell is
                // never an available destination, so selecting is all it does
                let event = if self.controller.state().board().piece_at(coord).is_some() {
                    UiEvent::SelectPiece(coord)
                } else {
                    UiEvent::MoveTo(coord)
                };
                self.dispatch(event)?;
            }
            Command::Board => self.presenter.render(self.controller.state())?,
            Command::Help => self.presenter.message(HELP)?,
            Command::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    /// Run a ticket whose delay has elapsed
    pub fn on_autoplay(&mut self, ticket: AutoplayTicket) -> Result<Flow> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(Flow::Continue);
        };
        match driver.perform(ticket, &mut self.controller)? {
            DriverOutcome::Stale => {}
            DriverOutcome::NoMove => {
                self.scheduler.cancel();
                self.presenter
                    .message(&format!("{} cannot move; game over", ticket.color))?;
                return Ok(Flow::Stop);
            }
            DriverOutcome::Acted(transition) => {
                self.presenter
                    .present(&transition, self.controller.state(), &self.controller.logger)?;
                if let Some(next) = transition.autoplay {
                    self.scheduler.schedule(next);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Wait for the pending ticket and perform it
    ///
    /// Never completes while nothing is scheduled.
    pub async fn next_autoplay(&mut self) -> Result<Flow> {
        let ticket = self.scheduler.next_due().await;
        self.on_autoplay(ticket)
    }

    /// Drive the game from `input` until it ends or the user quits
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.start()?;
        let mut lines = input.lines();

        loop {
            let wake = tokio::select! {
                line = lines.next_line() => Wake::Input(line),
                ticket = self.scheduler.next_due() => Wake::Autoplay(ticket),
            };

            let flow = match wake {
                Wake::Input(line) => match line? {
                    None => Flow::Stop,
                    Some(line) if line.trim().is_empty() => Flow::Continue,
                    Some(line) => match line.parse::<Command>() {
                        Ok(command) => self.command(command)?,
                        Err(err) => {
                            self.presenter.message(&err.to_string())?;
                            Flow::Continue
                        }
                    },
                },
                Wake::Autoplay(ticket) => self.on_autoplay(ticket)?,
            };

            if flow == Flow::Stop {
                return Ok(());
            }
        }
    }
}
