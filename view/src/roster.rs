//! Roster views and detail panels
//!
//! Each side's roster renders as a row of selectable icons with one
//! detail panel per member. Exactly one panel is visible at a time
//! per side; selecting a member hides all of its siblings.

use maison_protocol::{BoostBlock, OpponentInvestment, OpponentSide, PlayerSide, StatBlock};

/// One side's roster.
///
/// Entry 0 is always the active Pokemon, followed by the bench in
/// server order. The visibility invariant holds for any non-empty
/// roster: exactly one entry's detail panel is visible, initially
/// the active Pokemon's.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    visible: usize,
}

/// One roster member: icon identity plus its detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub species: String,

    /// Dex number keying the icon URL.
    pub dex: u16,

    pub detail: DetailPanel,
}

/// Contents of a roster member's detail panel. The two sides show
/// different things: the player sees exact numbers, the opponent
/// side only what the engine has inferred.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    Player {
        stats: StatBlock,
        moves: Vec<String>,
        boosts: BoostBlock,
    },
    Opponent {
        /// Moves this Pokemon has revealed so far.
        revealed_moves: Vec<String>,

        /// Verbatim engine output; absent until the engine has seen
        /// enough to hypothesize.
        investment: Option<OpponentInvestment>,
    },
}

impl Roster {
    /// Build the player's roster from their side of the game state.
    pub fn player(side: &PlayerSide) -> Self {
        let entries = std::iter::once(&side.active)
            .chain(side.team.iter())
            .map(|member| RosterEntry {
                species: member.name.clone(),
                dex: member.dex,
                detail: DetailPanel::Player {
                    stats: member.stats.unwrap_or_default(),
                    moves: member.moves.clone(),
                    boosts: member.boosts,
                },
            })
            .collect();
        Self {
            entries,
            visible: 0,
        }
    }

    /// Build the opponent's roster from the anonymized side data,
    /// attaching revealed moves and investment hypotheses by species.
    pub fn opponent(side: &OpponentSide) -> Self {
        let entries = std::iter::once(&side.data.active)
            .chain(side.data.team.iter())
            .map(|member| RosterEntry {
                species: member.name.clone(),
                dex: member.dex,
                detail: DetailPanel::Opponent {
                    revealed_moves: side.moves.get(&member.name).cloned().unwrap_or_default(),
                    investment: side.investment.get(&member.name).cloned(),
                },
            })
            .collect();
        Self {
            entries,
            visible: 0,
        }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reveal `index`'s detail panel, hiding all siblings. Out of
    /// range indices leave the roster unchanged.
    pub fn reveal(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.visible = index;
        true
    }

    /// Index of the one visible detail panel.
    pub fn visible_index(&self) -> usize {
        self.visible
    }

    pub fn visible_entry(&self) -> Option<&RosterEntry> {
        self.entries.get(self.visible)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        !self.entries.is_empty() && index == self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maison_protocol::Snapshot;
    use serde_json::json;

    fn side_fixture() -> PlayerSide {
        let body = json!({
            "outcome": {"finished": false},
            "gamestate": {
                "player": {
                    "active": {
                        "name": "spinda",
                        "dex": 327,
                        "stats": {"atk": 156, "def": 156, "spa": 156, "spd": 156, "spe": 156},
                        "moves": ["tackle"]
                    },
                    "team": [
                        {"name": "ivysaur", "dex": 2, "moves": ["vinewhip"]},
                        {"name": "floatzel", "dex": 419, "moves": ["aquajet"]}
                    ]
                },
                "opponent": {
                    "data": {"active": {"name": "spinda", "dex": 327}, "team": []},
                    "moves": {},
                    "investment": {}
                }
            }
        });
        let snapshot: Snapshot = serde_json::from_value(body).unwrap();
        snapshot.gamestate.unwrap().player
    }

    #[test]
    fn active_panel_visible_initially() {
        let roster = Roster::player(&side_fixture());

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.visible_index(), 0);
        assert_eq!(roster.visible_entry().unwrap().species, "spinda");
        assert!(roster.is_visible(0));
        assert!(!roster.is_visible(1));
    }

    #[test]
    fn reveal_hides_siblings() {
        let mut roster = Roster::player(&side_fixture());

        assert!(roster.reveal(2));
        assert_eq!(roster.visible_entry().unwrap().species, "floatzel");

        // Exactly one visible panel, always.
        let visible: Vec<usize> = (0..roster.len()).filter(|&i| roster.is_visible(i)).collect();
        assert_eq!(visible, vec![2]);
    }

    #[test]
    fn reveal_out_of_range_is_ignored() {
        let mut roster = Roster::player(&side_fixture());
        roster.reveal(1);

        assert!(!roster.reveal(99));
        assert_eq!(roster.visible_index(), 1);
    }

    #[test]
    fn opponent_roster_attaches_inferred_data() {
        let body = json!({
            "data": {
                "active": {"name": "floatzel", "dex": 419},
                "team": [{"name": "ivysaur", "dex": 2}]
            },
            "moves": {"floatzel": ["aquajet", "icebeam"]},
            "investment": {
                "floatzel": {
                    "hypotheses": {"atk": [{"evs": 252, "positive_nature": true}]},
                    "spe_range": [180.0, 361.9]
                }
            }
        });
        let side: OpponentSide = serde_json::from_value(body).unwrap();
        let roster = Roster::opponent(&side);

        let DetailPanel::Opponent {
            revealed_moves,
            investment,
        } = &roster.entries()[0].detail
        else {
            panic!("expected opponent panel");
        };
        assert_eq!(revealed_moves, &["aquajet", "icebeam"]);
        assert!(investment.is_some());

        // Nothing revealed for the benched member yet.
        let DetailPanel::Opponent {
            revealed_moves,
            investment,
        } = &roster.entries()[1].detail
        else {
            panic!("expected opponent panel");
        };
        assert!(revealed_moves.is_empty());
        assert!(investment.is_none());
    }
}
