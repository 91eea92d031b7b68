//! Presentation side effects
//!
//! Reacts to controller output and never feeds anything back: renders the
//! board when asked to refresh, plays cues in the order they were emitted.

pub mod audio;
pub mod board_view;

pub use audio::{AudioKind, AudioSink, CueLog, MutedAudio, TerminalBell};
pub use board_view::{BoardView, CellView};

use crate::game::{GameLogger, GameState, OutputFormat, SideEffect, Transition, VerbosityLevel};
use crate::Result;
use std::io::{self, Write};

pub struct Presenter<A: AudioSink, W: Write = io::Stdout> {
    audio: A,
    format: OutputFormat,
    out: W,
}

impl<A: AudioSink> Presenter<A, io::Stdout> {
    pub fn stdout(audio: A, format: OutputFormat) -> Self {
        Presenter::new(audio, format, io::stdout())
    }
}

impl<A: AudioSink, W: Write> Presenter<A, W> {
    pub fn new(audio: A, format: OutputFormat, out: W) -> Self {
        Presenter { audio, format, out }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Draw the board as it stands in `state`
    pub fn render(&mut self, state: &GameState) -> Result<()> {
        let view = BoardView::from_state(state);
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", view.render_text())?,
            OutputFormat::Json => writeln!(self.out, "{}", view.to_json()?)?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Write a line of free text (help, notices); `{"message": ..}` in JSON mode
    pub fn message(&mut self, text: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}")?,
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::json!({ "message": text }))?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Carry out a transition's side effects in order
    ///
    /// Only a failed board render is reported; cue failures are logged.
    pub fn present(&mut self, transition: &Transition, state: &GameState, logger: &GameLogger) -> Result<()> {
        for effect in &transition.effects {
            match effect {
                SideEffect::RefreshBoard => self.render(state)?,
                SideEffect::PlayCue(cue) => {
                    if let Err(err) = self.audio.play(*cue) {
                        logger.categorized(VerbosityLevel::Verbose, "audio", &format!("{cue} cue failed: {err}"));
                    }
                }
            }
        }
        Ok(())
    }
}
