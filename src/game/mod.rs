//! Turn sequencing: state, controller, automated opponent

pub mod adapter;
pub mod controller;
pub mod driver;
pub mod logger;
pub mod scheduler;
pub mod state;
pub mod transition;

pub use adapter::EngineAdapter;
pub use controller::TurnController;
pub use driver::{AutoplayStep, AutoplayTicket, DriverOutcome, OpponentDriver};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use scheduler::AutoplayScheduler;
pub use state::{Destinations, GameState, TurnPhase};
pub use transition::{Cue, Outcome, SideEffect, Transition, UiEvent};
