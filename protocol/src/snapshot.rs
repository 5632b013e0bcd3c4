//! Snapshot types
//!
//! The server answers `/set_parameters` and `/make_move` with a full
//! snapshot of the client-visible game state. Nothing here is
//! incremental: every response carries the whole picture and the
//! previous one is discarded.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::turn::TurnEvent;

/// Whether the battle has finished, and who won.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Outcome {
    pub finished: bool,

    /// `1` = the player won, `0` = the player lost. Absent on a draw
    /// and while the battle is still running.
    #[serde(default)]
    pub winner: Option<i32>,
}

impl Outcome {
    pub fn player_won(&self) -> bool {
        self.finished && self.winner == Some(1)
    }

    pub fn player_lost(&self) -> bool {
        self.finished && self.winner == Some(0)
    }

    pub fn draw(&self) -> bool {
        self.finished && self.winner.is_none()
    }
}

/// Battle stat identifier, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    /// All stats, in display order.
    pub const ALL: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact stat values for one Pokemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct StatBlock {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl StatBlock {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }
}

/// Temporary stat-boost stages active during a battle.
///
/// Zero is neutral; the engine clamps each stage to -6..=+6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BoostBlock {
    #[serde(default)]
    pub atk: i8,
    #[serde(default)]
    pub def: i8,
    #[serde(default)]
    pub spa: i8,
    #[serde(default)]
    pub spd: i8,
    #[serde(default)]
    pub spe: i8,
}

impl BoostBlock {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    /// True when every stage is zero.
    pub fn is_neutral(&self) -> bool {
        Stat::ALL.iter().all(|&stat| self.get(stat) == 0)
    }
}

/// An active combatant as the server presents it.
///
/// The opponent's copy still carries raw HP numbers on the wire for
/// percentage math; presentation layers must only ever show the
/// percentage for the opponent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivePokemon {
    pub name: String,

    /// Species dex number, used to key sprite and icon URLs.
    #[serde(default)]
    pub dex: u16,

    pub current_hp: i32,
    pub max_hp: i32,

    #[serde(default)]
    pub stats: Option<StatBlock>,

    #[serde(default)]
    pub boosts: BoostBlock,
}

impl ActivePokemon {
    /// Current HP as a percentage of max, clamped to 0..=100.
    pub fn hp_percent(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        let pct = self.current_hp as f64 * 100.0 / self.max_hp as f64;
        pct.clamp(0.0, 100.0)
    }
}

/// One roster member inside `gamestate`.
///
/// Player-side members carry exact stats and known moves; opponent
/// members arrive anonymized, with stats omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamMember {
    pub name: String,

    #[serde(default)]
    pub dex: u16,

    #[serde(default)]
    pub stats: Option<StatBlock>,

    #[serde(default)]
    pub moves: Vec<String>,

    #[serde(default)]
    pub boosts: BoostBlock,
}

/// Category of a player option: attack with the active Pokemon, or
/// switch to a teammate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    #[serde(rename = "ATTACK")]
    Attack,
    #[serde(rename = "SWITCH")]
    Switch,
}

impl MoveCategory {
    /// Wire string, as it appears in option triples and `move_class`.
    pub fn wire(&self) -> &'static str {
        match self {
            MoveCategory::Attack => "ATTACK",
            MoveCategory::Switch => "SWITCH",
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire())
    }
}

impl FromStr for MoveCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTACK" => Ok(MoveCategory::Attack),
            "SWITCH" => Ok(MoveCategory::Switch),
            other => Err(ParseError::UnknownCategory(other.to_string())),
        }
    }
}

/// One `[category, key, label]` triple from `player_opts`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMoveOption")]
pub struct MoveOption {
    pub category: MoveCategory,

    /// Opaque choice key, echoed back verbatim in `POST /make_move`.
    /// Attack keys are move indices, switch keys team positions; the
    /// server may send either numbers or strings.
    pub key: String,

    /// Display label for the option's button.
    pub label: String,
}

#[derive(Deserialize)]
struct RawMoveOption(String, serde_json::Value, String);

impl TryFrom<RawMoveOption> for MoveOption {
    type Error = ParseError;

    fn try_from(raw: RawMoveOption) -> Result<Self, Self::Error> {
        let category = raw.0.parse()?;
        let key = match raw.1 {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(ParseError::BadChoiceKey(other.to_string())),
        };
        Ok(Self {
            category,
            key,
            label: raw.2,
        })
    }
}

/// One stat-investment hypothesis for an opponent Pokemon.
///
/// Computed server-side and passed through verbatim; the client
/// never recomputes these.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct InvestmentHypothesis {
    /// Max-EV-equivalent amount assumed invested (0..=252).
    pub evs: u16,

    /// Whether the hypothesis assumes a stat-boosting nature.
    #[serde(default)]
    pub positive_nature: bool,
}

/// Display-ready speed range, sent on the wire as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl From<[f64; 2]> for SpeedRange {
    fn from(range: [f64; 2]) -> Self {
        Self {
            min: range[0],
            max: range[1],
        }
    }
}

/// Key of an investment-hypothesis list. Unlike battle boosts,
/// investment covers HP, so this is a wider key set than [`Stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl InvestmentStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStat::Hp => "hp",
            InvestmentStat::Atk => "atk",
            InvestmentStat::Def => "def",
            InvestmentStat::Spa => "spa",
            InvestmentStat::Spd => "spd",
            InvestmentStat::Spe => "spe",
        }
    }
}

impl fmt::Display for InvestmentStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine has inferred about one opponent Pokemon's
/// hidden stat allocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpponentInvestment {
    /// Hypothesis lists per stat, HP included.
    #[serde(default)]
    pub hypotheses: BTreeMap<InvestmentStat, Vec<InvestmentHypothesis>>,

    pub spe_range: SpeedRange,
}

/// One side's roster: the active Pokemon plus the bench.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSide {
    pub active: TeamMember,

    #[serde(default)]
    pub team: Vec<TeamMember>,
}

/// The opponent's side as anonymized by the engine, plus what the
/// engine has learned about it so far.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpponentSide {
    pub data: PlayerSide,

    /// Moves revealed so far, keyed by species name.
    #[serde(default)]
    pub moves: BTreeMap<String, Vec<String>>,

    /// Investment hypotheses, keyed by species name.
    #[serde(default)]
    pub investment: BTreeMap<String, OpponentInvestment>,
}

/// Full client-visible game state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameState {
    pub player: PlayerSide,
    pub opponent: OpponentSide,
}

/// A full response body from `/set_parameters` or `/make_move`.
///
/// Finished battles may omit the active combatants and game state;
/// consumers check `outcome.finished` before touching them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    pub outcome: Outcome,

    #[serde(default)]
    pub player_active: Option<ActivePokemon>,

    #[serde(default)]
    pub opp_active: Option<ActivePokemon>,

    #[serde(default)]
    pub player_opts: Vec<MoveOption>,

    #[serde(default)]
    pub gamestate: Option<GameState>,

    /// Present only on move responses.
    #[serde(default)]
    pub turn_info: Vec<TurnEvent>,
}

/// Parse a snapshot response body.
pub fn parse_snapshot(body: &str) -> Result<Snapshot, ParseError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(name: &str, dex: u16) -> serde_json::Value {
        json!({
            "name": name,
            "dex": dex,
            "stats": {"atk": 120, "def": 100, "spa": 90, "spd": 95, "spe": 110},
            "moves": ["tackle", "watergun"]
        })
    }

    fn snapshot_body() -> serde_json::Value {
        json!({
            "outcome": {"finished": false, "winner": null},
            "player_active": {
                "name": "spinda",
                "dex": 327,
                "current_hp": 210,
                "max_hp": 280,
                "stats": {"atk": 156, "def": 156, "spa": 156, "spd": 156, "spe": 156},
                "boosts": {"atk": 1, "spe": -2}
            },
            "opp_active": {
                "name": "floatzel",
                "dex": 419,
                "current_hp": 150,
                "max_hp": 300
            },
            "player_opts": [
                ["ATTACK", 0, "Tackle"],
                ["ATTACK", "1", "Water Gun"],
                ["SWITCH", 1, "Ivysaur"]
            ],
            "gamestate": {
                "player": {
                    "active": member("spinda", 327),
                    "team": [member("ivysaur", 2)]
                },
                "opponent": {
                    "data": {
                        "active": {"name": "floatzel", "dex": 419},
                        "team": []
                    },
                    "moves": {"floatzel": ["aquajet"]},
                    "investment": {
                        "floatzel": {
                            "hypotheses": {
                                "hp": [{"evs": 0, "positive_nature": false}],
                                "atk": [
                                    {"evs": 0, "positive_nature": false},
                                    {"evs": 252, "positive_nature": true}
                                ]
                            },
                            "spe_range": [180.0, 361.9]
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn parses_full_snapshot() {
        let snapshot = parse_snapshot(&snapshot_body().to_string()).unwrap();

        assert!(!snapshot.outcome.finished);
        let player = snapshot.player_active.unwrap();
        assert_eq!(player.name, "spinda");
        assert_eq!(player.dex, 327);
        assert_eq!(player.boosts.atk, 1);
        assert_eq!(player.boosts.spe, -2);
        assert_eq!(player.boosts.def, 0);

        let opp = snapshot.opp_active.unwrap();
        assert!(opp.stats.is_none());
        assert_eq!(opp.hp_percent(), 50.0);
    }

    #[test]
    fn option_keys_normalize_to_strings() {
        let snapshot = parse_snapshot(&snapshot_body().to_string()).unwrap();
        let opts = &snapshot.player_opts;

        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0].category, MoveCategory::Attack);
        assert_eq!(opts[0].key, "0");
        assert_eq!(opts[1].key, "1");
        assert_eq!(opts[2].category, MoveCategory::Switch);
        assert_eq!(opts[2].label, "Ivysaur");
    }

    #[test]
    fn rejects_unknown_category() {
        let body = json!({
            "outcome": {"finished": false},
            "player_opts": [["DANCE", 0, "Teeter Dance"]]
        });
        assert!(parse_snapshot(&body.to_string()).is_err());
    }

    #[test]
    fn investment_passes_through() {
        let snapshot = parse_snapshot(&snapshot_body().to_string()).unwrap();
        let gamestate = snapshot.gamestate.unwrap();
        let investment = &gamestate.opponent.investment["floatzel"];

        let atk = &investment.hypotheses[&InvestmentStat::Atk];
        assert_eq!(atk.len(), 2);
        assert_eq!(atk[1].evs, 252);
        assert!(atk[1].positive_nature);

        // The engine hypothesizes HP investment too; HP is a valid
        // key here even though it can never be boosted.
        let hp = &investment.hypotheses[&InvestmentStat::Hp];
        assert_eq!(hp.len(), 1);
        assert_eq!(hp[0].evs, 0);

        assert_eq!(investment.spe_range.min, 180.0);
        assert_eq!(investment.spe_range.max, 361.9);
    }

    #[test]
    fn finished_snapshot_may_omit_state() {
        let body = json!({"outcome": {"finished": true, "winner": 1}});
        let snapshot = parse_snapshot(&body.to_string()).unwrap();

        assert!(snapshot.outcome.player_won());
        assert!(snapshot.player_active.is_none());
        assert!(snapshot.gamestate.is_none());
        assert!(snapshot.turn_info.is_empty());
    }

    #[test]
    fn hp_percent_clamps() {
        let overkill = ActivePokemon {
            name: "spinda".to_string(),
            dex: 327,
            current_hp: -40,
            max_hp: 280,
            stats: None,
            boosts: BoostBlock::default(),
        };
        assert_eq!(overkill.hp_percent(), 0.0);
    }

    #[test]
    fn outcome_winner_semantics() {
        let won = Outcome {
            finished: true,
            winner: Some(1),
        };
        let lost = Outcome {
            finished: true,
            winner: Some(0),
        };
        let draw = Outcome {
            finished: true,
            winner: None,
        };

        assert!(won.player_won() && !won.player_lost());
        assert!(lost.player_lost() && !lost.player_won());
        assert!(draw.draw() && !draw.player_won() && !draw.player_lost());
    }
}
