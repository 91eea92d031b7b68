//! Inbound UI events and what a controller transition produces

use crate::core::{Color, Coord};
use crate::game::driver::AutoplayTicket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two clicks the board surface can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Click on a piece
    SelectPiece(Coord),
    /// Click on a cell
    MoveTo(Coord),
}

/// Audio cue names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Select,
    Move,
    Destroy,
}

impl Cue {
    /// Sound file played for the cue
    pub fn asset_path(&self) -> &'static str {
        match self {
            Cue::Select => "assets/voices/wood-hard-hit.wav",
            Cue::Move => "assets/voices/move-sound.mp3",
            Cue::Destroy => "assets/voices/knife-thrust-into-wall.mp3",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Select => write!(f, "select"),
            Cue::Move => write!(f, "move"),
            Cue::Destroy => write!(f, "destroy"),
        }
    }
}

/// Non-authoritative reactions the presentation layer performs, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SideEffect {
    PlayCue(Cue),
    RefreshBoard,
}

/// What a transition did to the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Input that does not apply to the current state
    Ignored,
    /// A piece was selected; `redirected_from` is the clicked square when a
    /// forced capture moved the selection elsewhere
    Selected {
        coord: Coord,
        redirected_from: Option<Coord>,
    },
    /// A capture landed where the same piece can capture again
    ChainContinues { at: Coord },
    /// The turn passed to `next`
    TurnEnded { next: Color },
}

/// Result of one controller transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub outcome: Outcome,
    pub effects: Vec<SideEffect>,
    /// Set when the automated side has to act next
    pub autoplay: Option<AutoplayTicket>,
}

impl Transition {
    pub fn ignored() -> Self {
        Transition {
            outcome: Outcome::Ignored,
            effects: Vec::new(),
            autoplay: None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.outcome == Outcome::Ignored
    }

    pub fn cues(&self) -> impl Iterator<Item = Cue> + '_ {
        self.effects.iter().filter_map(|effect| match effect {
            SideEffect::PlayCue(cue) => Some(*cue),
            SideEffect::RefreshBoard => None,
        })
    }

    pub fn cue_count(&self, cue: Cue) -> usize {
        self.cues().filter(|c| *c == cue).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_transition_has_no_effects() {
        let t = Transition::ignored();
        assert!(t.is_ignored());
        assert!(t.effects.is_empty());
        assert_eq!(t.autoplay, None);
    }

    #[test]
    fn test_cue_filtering() {
        let t = Transition {
            outcome: Outcome::TurnEnded { next: Color::White },
            effects: vec![
                SideEffect::PlayCue(Cue::Destroy),
                SideEffect::PlayCue(Cue::Destroy),
                SideEffect::RefreshBoard,
                SideEffect::PlayCue(Cue::Move),
            ],
            autoplay: None,
        };
        assert_eq!(t.cues().collect::<Vec<_>>(), vec![Cue::Destroy, Cue::Destroy, Cue::Move]);
        assert_eq!(t.cue_count(Cue::Destroy), 2);
        assert_eq!(t.cue_count(Cue::Select), 0);
    }

    #[test]
    fn test_cue_assets() {
        assert!(Cue::Select.asset_path().ends_with("wood-hard-hit.wav"));
        assert_eq!(Cue::Destroy.to_string(), "destroy");
    }
}
