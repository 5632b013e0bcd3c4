//! Turn-outcome events
//!
//! `POST /make_move` responses carry a `turn_info` array describing
//! what happened during the turn, in resolution order. The shapes
//! mirror the engine's per-event result dicts.

use std::fmt;

use serde::Deserialize;

/// Which seat an event refers to.
///
/// The wire keeps the engine's seat naming; `player1` is always this
/// client's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Side {
    #[serde(rename = "player1")]
    Player,
    #[serde(rename = "player2")]
    Opponent,
}

impl Side {
    pub fn is_opponent(&self) -> bool {
        matches!(self, Side::Opponent)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Opponent => f.write_str("Opponent"),
        }
    }
}

/// One entry of `turn_info`.
///
/// The wire carries no type tag; the two shapes share no field
/// names, so untagged deserialization is unambiguous.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TurnEvent {
    /// An attack resolved against the defender's active Pokemon.
    Attack(AttackEvent),

    /// A side swapped in a new active Pokemon.
    Switch(SwitchEvent),
}

/// Fields of an attack event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttackEvent {
    pub attacker: Side,
    pub defender: Side,

    /// Attacking species name.
    pub atk_poke: String,

    /// Defending species name.
    pub def_poke: String,

    #[serde(rename = "move")]
    pub move_name: String,

    /// Raw damage dealt, against the defender's true max HP.
    pub damage: u32,

    /// Damage as a percentage of the defender's max HP.
    pub pct_damage: f64,
}

/// Fields of a switch event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchEvent {
    pub player: Side,

    /// Species switched in.
    pub name: String,
}
