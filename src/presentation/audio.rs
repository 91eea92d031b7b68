//! Audio cue playback
//!
//! Playback is fire-and-forget. A sink may fail; the presenter logs the
//! failure and carries on.

use crate::game::{Cue, OutputFormat, VerbosityLevel};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Something that can play a cue
pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> Result<()>;
}

/// Which sink the front end uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    /// Print the cue and its sound file
    #[default]
    Log,
    /// Ring the terminal bell
    Bell,
    /// No sound
    Mute,
}

impl AudioKind {
    /// Cue lines are only printed at normal verbosity or above
    pub fn effective(self, verbosity: VerbosityLevel) -> AudioKind {
        match self {
            AudioKind::Log if verbosity < VerbosityLevel::Normal => AudioKind::Mute,
            kind => kind,
        }
    }

    pub fn into_sink(self, verbosity: VerbosityLevel, format: OutputFormat) -> Box<dyn AudioSink> {
        match self.effective(verbosity) {
            AudioKind::Log => Box::new(CueLog::stdout(format)),
            AudioKind::Bell => Box::new(TerminalBell),
            AudioKind::Mute => Box::new(MutedAudio),
        }
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, cue: Cue) -> Result<()> {
        (**self).play(cue)
    }
}

/// Prints `♪ <cue> (<asset>)`, or `{"cue":..,"asset":..}` in JSON mode
#[derive(Debug)]
pub struct CueLog<W: Write = io::Stdout> {
    out: W,
    format: OutputFormat,
}

impl CueLog<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        CueLog::new(io::stdout(), format)
    }
}

impl<W: Write> CueLog<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        CueLog { out, format }
    }
}

impl<W: Write> AudioSink for CueLog<W> {
    fn play(&mut self, cue: Cue) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "  \u{266a} {} ({})", cue, cue.asset_path())?,
            OutputFormat::Json => writeln!(
                self.out,
                "{}",
                serde_json::json!({ "cue": cue, "asset": cue.asset_path() })
            )?,
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Writes BEL to stderr for every cue
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _cue: Cue) -> Result<()> {
        let mut out = io::stderr();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MutedAudio;

impl AudioSink for MutedAudio {
    fn play(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }
}
