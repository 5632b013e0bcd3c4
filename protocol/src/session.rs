//! Session-setup types
//!
//! These types model the selector form that starts a battle: the
//! game mode, the AI opponent (a fixed list per mode), and the team
//! choices, plus the request bodies built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::snapshot::MoveCategory;

/// Placeholder shown in both team selectors when the mode has no
/// team concept.
pub const TEAM_NOT_APPLICABLE: &str = "N/A";

/// Game mode offered by the simulator server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Pokemon singles battle.
    #[serde(rename = "pkmn")]
    Pkmn,

    /// Rock-paper-scissors. Selectable, but sessions cannot be
    /// started in this mode yet.
    #[serde(rename = "rps")]
    Rps,
}

impl GameMode {
    /// All modes, in the order the mode selector lists them.
    pub const ALL: [GameMode; 2] = [GameMode::Pkmn, GameMode::Rps];

    /// Wire string sent as `game_choice`.
    pub fn wire(&self) -> &'static str {
        match self {
            GameMode::Pkmn => "pkmn",
            GameMode::Rps => "rps",
        }
    }

    /// Human-readable selector label.
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Pkmn => "Pokemon",
            GameMode::Rps => "Rock Paper Scissors",
        }
    }

    /// The fixed list of AI opponents available in this mode.
    pub fn opponent_kinds(&self) -> &'static [OpponentKind] {
        match self {
            GameMode::Pkmn => &[OpponentKind::RandomPkmn, OpponentKind::BasicPlanningPkmn],
            GameMode::Rps => &[
                OpponentKind::RandomRps,
                OpponentKind::CounterRps,
                OpponentKind::RockRps,
                OpponentKind::PaperRps,
                OpponentKind::ScissorsRps,
                OpponentKind::UniformRps,
            ],
        }
    }

    /// Whether team selection applies to this mode.
    pub fn uses_teams(&self) -> bool {
        !matches!(self, GameMode::Rps)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pkmn" => Ok(GameMode::Pkmn),
            "rps" => Ok(GameMode::Rps),
            other => Err(ParseError::UnknownMode(other.to_string())),
        }
    }
}

/// An AI opponent selectable for a given game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentKind {
    #[serde(rename = "random_rps")]
    RandomRps,
    #[serde(rename = "counter_rps")]
    CounterRps,
    #[serde(rename = "rock_rps")]
    RockRps,
    #[serde(rename = "paper_rps")]
    PaperRps,
    #[serde(rename = "scissors_rps")]
    ScissorsRps,
    #[serde(rename = "uniform_rps")]
    UniformRps,
    #[serde(rename = "random_pkmn")]
    RandomPkmn,
    #[serde(rename = "basic_planning_pkmn")]
    BasicPlanningPkmn,
}

impl OpponentKind {
    /// Wire string sent as `opp_choice`.
    pub fn wire(&self) -> &'static str {
        match self {
            OpponentKind::RandomRps => "random_rps",
            OpponentKind::CounterRps => "counter_rps",
            OpponentKind::RockRps => "rock_rps",
            OpponentKind::PaperRps => "paper_rps",
            OpponentKind::ScissorsRps => "scissors_rps",
            OpponentKind::UniformRps => "uniform_rps",
            OpponentKind::RandomPkmn => "random_pkmn",
            OpponentKind::BasicPlanningPkmn => "basic_planning_pkmn",
        }
    }

    /// Human-readable selector label.
    pub fn label(&self) -> &'static str {
        match self {
            OpponentKind::RandomRps | OpponentKind::RandomPkmn => "Random",
            OpponentKind::CounterRps => "Counter",
            OpponentKind::RockRps => "Rock",
            OpponentKind::PaperRps => "Paper",
            OpponentKind::ScissorsRps => "Scissors",
            OpponentKind::UniformRps => "Uniform",
            OpponentKind::BasicPlanningPkmn => "Basic Planning",
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /set_parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub game_choice: String,
    pub opp_choice: String,
    pub player_team_choice: String,
    pub opp_team_choice: String,
}

impl SessionConfig {
    /// Build a config from typed selections.
    pub fn new(
        mode: GameMode,
        opponent: OpponentKind,
        player_team: impl Into<String>,
        opp_team: impl Into<String>,
    ) -> Self {
        Self {
            game_choice: mode.wire().to_string(),
            opp_choice: opponent.wire().to_string(),
            player_team_choice: player_team.into(),
            opp_team_choice: opp_team.into(),
        }
    }

    /// The typed game mode this config selects.
    pub fn mode(&self) -> Result<GameMode, ParseError> {
        self.game_choice.parse()
    }
}

/// Response body of `GET /team_options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOptions {
    pub teams: Vec<String>,
}

/// Body of `POST /make_move`: the selected option's category plus
/// its opaque choice key, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSubmission {
    pub move_class: MoveCategory,
    pub move_choice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rps_has_six_opponents() {
        let kinds = GameMode::Rps.opponent_kinds();
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[0].wire(), "random_rps");
        assert_eq!(kinds[5].wire(), "uniform_rps");
    }

    #[test]
    fn pkmn_has_two_opponents() {
        let kinds = GameMode::Pkmn.opponent_kinds();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0].label(), "Random");
        assert_eq!(kinds[1].wire(), "basic_planning_pkmn");
    }

    #[test]
    fn rps_has_no_teams() {
        assert!(!GameMode::Rps.uses_teams());
        assert!(GameMode::Pkmn.uses_teams());
    }

    #[test]
    fn session_config_body_keys() {
        let config = SessionConfig::new(
            GameMode::Pkmn,
            OpponentKind::BasicPlanningPkmn,
            "spinda",
            "floatzel",
        );
        let body = serde_json::to_value(&config).unwrap();
        assert_eq!(body["game_choice"], "pkmn");
        assert_eq!(body["opp_choice"], "basic_planning_pkmn");
        assert_eq!(body["player_team_choice"], "spinda");
        assert_eq!(body["opp_team_choice"], "floatzel");
    }

    #[test]
    fn move_submission_body() {
        let submission = MoveSubmission {
            move_class: MoveCategory::Attack,
            move_choice: "0".to_string(),
        };
        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["move_class"], "ATTACK");
        assert_eq!(body["move_choice"], "0");
    }

    #[test]
    fn mode_round_trip() {
        for mode in GameMode::ALL {
            assert_eq!(mode.wire().parse::<GameMode>().unwrap(), mode);
        }
        assert!("checkers".parse::<GameMode>().is_err());
    }
}
