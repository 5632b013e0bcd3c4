//! UI lifecycle phase

use maison_protocol::Outcome;

/// The whole-UI state machine: `Setup → InProgress → Finished`.
///
/// Setup moves to InProgress on a successful session-setup response.
/// InProgress stays put while move responses arrive with
/// `finished = false` and moves to Finished on any response with
/// `finished = true`. Finished is terminal: no further moves are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Setup,
    InProgress,
    Finished,
}

impl Phase {
    /// Whether a battle has been set up (successfully or not, a
    /// finished battle still counts as started).
    pub fn battle_started(&self) -> bool {
        !matches!(self, Phase::Setup)
    }

    /// Whether move submissions are currently legal.
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Phase::InProgress)
    }

    /// Transition on a successful server response. Finished is
    /// terminal and never regresses.
    pub fn advance(&mut self, outcome: &Outcome) {
        if *self == Phase::Finished {
            return;
        }
        *self = if outcome.finished {
            Phase::Finished
        } else {
            Phase::InProgress
        };
    }
}
