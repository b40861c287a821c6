use super::EPSILON;
use crate::input::Action;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum Phase {
    #[default]
    Closed,
    /// Items are interactive as soon as the menu starts opening, so this also covers the
    /// fully open menu.
    Opening,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub phase: Phase,
    pub progress: f64,
    pub confirmed: bool,
}

impl Transition {
    fn new(phase: Phase, progress: f64, confirmed: bool) -> Self {
        Self {
            phase,
            progress,
            confirmed,
        }
    }
}

impl Phase {
    /// Where `action` leads from this phase. `None` when the action is ignored here.
    /// Rotations never change the phase.
    pub fn on(self, action: Action) -> Option<Transition> {
        match (self, action) {
            (Self::Closed, Action::Open) => Some(Transition::new(Self::Opening, 0.0, false)),
            (Self::Opening, Action::Close) => Some(Transition::new(Self::Closing, 1.0, false)),
            (Self::Opening, Action::Confirm) => Some(Transition::new(Self::Closing, 1.0, true)),
            _ => None,
        }
    }

    pub fn accepts_rotation(self) -> bool {
        self != Self::Closed
    }

    /// Moves `progress` by `step` in this phase's direction. A closing menu that ran out of
    /// progress becomes closed.
    pub fn advance(self, progress: f64, step: f64) -> (Self, f64) {
        match self {
            Self::Closed => (Self::Closed, 0.0),
            Self::Opening => (Self::Opening, (progress + step).clamp(0.0, 1.0)),
            Self::Closing => {
                let progress = (progress - step).clamp(0.0, 1.0);
                if progress <= EPSILON {
                    (Self::Closed, 0.0)
                } else {
                    (Self::Closing, progress)
                }
            }
        }
    }
}
