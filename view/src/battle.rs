//! Battle view
//!
//! The full battle view, rebuilt from scratch on every server
//! response. A finished response is never re-rendered: the view only
//! degrades in place (HP zeroed, move controls removed).

use maison_protocol::{ActivePokemon, BoostBlock, Outcome, Snapshot};

use crate::moves::MovePanel;
use crate::roster::Roster;

/// How a combatant's HP is displayed. The opponent's raw numbers are
/// hidden information and never shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HpDisplay {
    /// Player side: raw numbers plus the derived percentage.
    Exact { current: i32, max: i32 },

    /// Opponent side: percentage only.
    Percent(f64),
}

impl HpDisplay {
    pub fn percent(&self) -> f64 {
        match self {
            HpDisplay::Exact { current, max } => {
                if *max <= 0 {
                    0.0
                } else {
                    (*current as f64 * 100.0 / *max as f64).clamp(0.0, 100.0)
                }
            }
            HpDisplay::Percent(pct) => *pct,
        }
    }

    /// End-of-battle degradation: display drops to zero without a
    /// fresh snapshot.
    pub fn zero(&mut self) {
        match self {
            HpDisplay::Exact { current, .. } => *current = 0,
            HpDisplay::Percent(pct) => *pct = 0.0,
        }
    }
}

/// One active combatant's panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePanel {
    pub species: String,
    pub dex: u16,
    pub hp: HpDisplay,
    pub boosts: BoostBlock,
}

impl ActivePanel {
    fn player(active: &ActivePokemon) -> Self {
        Self {
            species: active.name.clone(),
            dex: active.dex,
            hp: HpDisplay::Exact {
                current: active.current_hp.max(0),
                max: active.max_hp,
            },
            boosts: active.boosts,
        }
    }

    fn opponent(active: &ActivePokemon) -> Self {
        Self {
            species: active.name.clone(),
            dex: active.dex,
            hp: HpDisplay::Percent(active.hp_percent()),
            boosts: active.boosts,
        }
    }
}

/// The complete battle view for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleView {
    pub player: ActivePanel,
    pub opponent: ActivePanel,

    /// `None` once the battle has finished and the controls have
    /// been removed.
    pub moves: Option<MovePanel>,

    pub player_roster: Roster,
    pub opponent_roster: Roster,

    pub outcome: Outcome,
}

impl BattleView {
    /// Build a fresh view from a snapshot. Returns `None` when the
    /// snapshot does not carry a renderable state (finished
    /// responses may omit it).
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        let player_active = snapshot.player_active.as_ref()?;
        let opp_active = snapshot.opp_active.as_ref()?;
        let gamestate = snapshot.gamestate.as_ref()?;

        Some(Self {
            player: ActivePanel::player(player_active),
            opponent: ActivePanel::opponent(opp_active),
            moves: Some(MovePanel::partition(&snapshot.player_opts)),
            player_roster: Roster::player(&gamestate.player),
            opponent_roster: Roster::opponent(&gamestate.opponent),
            outcome: snapshot.outcome,
        })
    }

    /// Reconcile a fresh server response into this view.
    ///
    /// A running snapshot replaces the view wholesale. A finished
    /// snapshot triggers only the end-of-battle degradation; the
    /// combatant panels are left as they were. Returns `false` when
    /// a running snapshot was unusable (the view is left untouched).
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.outcome.finished {
            self.finish(&snapshot.outcome);
            return true;
        }
        match Self::from_snapshot(snapshot) {
            Some(view) => {
                *self = view;
                true
            }
            None => false,
        }
    }

    /// End-of-battle degradation: remove the move controls and zero
    /// the losing side's HP display. On a draw both sides drop.
    fn finish(&mut self, outcome: &Outcome) {
        self.moves = None;
        self.outcome = *outcome;
        if outcome.player_lost() || outcome.draw() {
            self.player.hp.zero();
        }
        if outcome.player_won() || outcome.draw() {
            self.opponent.hp.zero();
        }
    }

    pub fn finished(&self) -> bool {
        self.outcome.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn running_snapshot() -> Snapshot {
        let body = json!({
            "outcome": {"finished": false},
            "player_active": {
                "name": "spinda",
                "dex": 327,
                "current_hp": 210,
                "max_hp": 280,
                "boosts": {"atk": 2}
            },
            "opp_active": {
                "name": "floatzel",
                "dex": 419,
                "current_hp": 150,
                "max_hp": 300
            },
            "player_opts": [
                ["ATTACK", 0, "Tackle"],
                ["SWITCH", 1, "Ivysaur"]
            ],
            "gamestate": {
                "player": {
                    "active": {"name": "spinda", "dex": 327},
                    "team": [{"name": "ivysaur", "dex": 2}]
                },
                "opponent": {
                    "data": {"active": {"name": "floatzel", "dex": 419}, "team": []},
                    "moves": {},
                    "investment": {}
                }
            }
        });
        serde_json::from_value(body).unwrap()
    }

    fn finished_snapshot(winner: i32) -> Snapshot {
        serde_json::from_value(json!({
            "outcome": {"finished": true, "winner": winner}
        }))
        .unwrap()
    }

    #[test]
    fn builds_full_view() {
        let view = BattleView::from_snapshot(&running_snapshot()).unwrap();

        assert_eq!(view.player.species, "spinda");
        assert_eq!(
            view.player.hp,
            HpDisplay::Exact {
                current: 210,
                max: 280
            }
        );
        assert_eq!(view.player.boosts.atk, 2);

        // Opponent HP is percentage only.
        assert_eq!(view.opponent.hp, HpDisplay::Percent(50.0));

        let moves = view.moves.as_ref().unwrap();
        assert_eq!(moves.attacks.len(), 1);
        assert_eq!(moves.switches.len(), 1);

        // One visible detail panel per side, the active Pokemon's.
        assert_eq!(view.player_roster.visible_index(), 0);
        assert_eq!(view.opponent_roster.visible_index(), 0);
        assert_eq!(
            view.player_roster.visible_entry().unwrap().species,
            "spinda"
        );
    }

    #[test]
    fn running_snapshot_replaces_wholesale() {
        let mut view = BattleView::from_snapshot(&running_snapshot()).unwrap();
        view.player_roster.reveal(1);

        assert!(view.apply_snapshot(&running_snapshot()));
        // Rebuilt from scratch: panel selection reset to the active.
        assert_eq!(view.player_roster.visible_index(), 0);
    }

    #[test]
    fn finished_loss_degrades_in_place() {
        let mut view = BattleView::from_snapshot(&running_snapshot()).unwrap();

        assert!(view.apply_snapshot(&finished_snapshot(0)));
        assert!(view.finished());
        assert!(view.moves.is_none());
        assert_eq!(view.player.hp.percent(), 0.0);
        // The winner's display is untouched.
        assert_eq!(view.opponent.hp, HpDisplay::Percent(50.0));
        // Combatant identity was not re-rendered.
        assert_eq!(view.player.species, "spinda");
    }

    #[test]
    fn finished_win_zeroes_opponent() {
        let mut view = BattleView::from_snapshot(&running_snapshot()).unwrap();

        view.apply_snapshot(&finished_snapshot(1));
        assert_eq!(view.opponent.hp.percent(), 0.0);
        assert_eq!(
            view.player.hp,
            HpDisplay::Exact {
                current: 210,
                max: 280
            }
        );
    }

    #[test]
    fn unusable_running_snapshot_leaves_view_alone() {
        let mut view = BattleView::from_snapshot(&running_snapshot()).unwrap();
        let empty: Snapshot = serde_json::from_value(json!({
            "outcome": {"finished": false}
        }))
        .unwrap();

        assert!(!view.apply_snapshot(&empty));
        assert_eq!(view.player.species, "spinda");
        assert!(view.moves.is_some());
    }
}
