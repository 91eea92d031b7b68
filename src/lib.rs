//! Dama - Turkish draughts turn controller
//!
//! Sequences an interactive game of Turkish draughts: piece selection with
//! forced-capture redirect, moves, chain captures, promotion, and an
//! automated opponent playing one side on a timer.

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod game;
pub mod presentation;
pub mod session;

pub use error::{DamaError, Result};
