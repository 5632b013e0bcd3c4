//! Battle log formatting
//!
//! Turn-outcome records become human-readable log entries here. The
//! log is strictly append-only: one entry per move response, never
//! rewritten.

use maison_protocol::{Outcome, TurnEvent};

/// Append-only battle log. Each entry is one formatted paragraph,
/// lines separated by `\n`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BattleLog {
    entries: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Only used when a new session starts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append one entry for a turn: one line per event plus the
    /// terminal line when the outcome is final. A turn with nothing
    /// to report (no events, battle still running) appends nothing.
    pub fn append_turn(&mut self, events: &[TurnEvent], outcome: &Outcome) {
        let mut lines: Vec<String> = events.iter().map(format_event).collect();
        if let Some(line) = outcome_line(outcome) {
            lines.push(line);
        }
        if !lines.is_empty() {
            self.entries.push(lines.join("\n"));
        }
    }
}

/// Format one turn event as a log line.
///
/// Raw damage is only disclosed when the attacker is the opponent:
/// damage dealt *to* the opponent would reveal its true HP, which is
/// hidden information.
pub fn format_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Switch(switch) => {
            format!("{} switched to {}.", switch.player, switch.name)
        }
        TurnEvent::Attack(attack) => {
            if attack.attacker.is_opponent() {
                format!(
                    "{}'s {} attacked {} with {}. It did {:.1}% ({}) damage.",
                    attack.attacker,
                    attack.atk_poke,
                    attack.def_poke,
                    attack.move_name,
                    attack.pct_damage,
                    attack.damage,
                )
            } else {
                format!(
                    "{}'s {} attacked {} with {}. It did {:.1}% damage.",
                    attack.attacker,
                    attack.atk_poke,
                    attack.def_poke,
                    attack.move_name,
                    attack.pct_damage,
                )
            }
        }
    }
}

/// Terminal win/lose/draw line, present only for finished outcomes.
pub fn outcome_line(outcome: &Outcome) -> Option<String> {
    if !outcome.finished {
        return None;
    }
    let line = if outcome.player_won() {
        "You won the battle!"
    } else if outcome.player_lost() {
        "You lost the battle!"
    } else {
        "The battle ended in a draw."
    };
    Some(line.to_string())
}
