use thiserror::Error;

pub mod session;
pub mod snapshot;
pub mod turn;

pub use session::{GameMode, MoveSubmission, OpponentKind, SessionConfig, TeamOptions};
pub use snapshot::{
    ActivePokemon, BoostBlock, GameState, InvestmentHypothesis, InvestmentStat, MoveCategory,
    MoveOption, OpponentInvestment, OpponentSide, Outcome, PlayerSide, Snapshot, SpeedRange, Stat,
    StatBlock, TeamMember, parse_snapshot,
};
pub use turn::{AttackEvent, Side, SwitchEvent, TurnEvent};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Unknown move category: {0}")]
    UnknownCategory(String),

    #[error("Unsupported choice key: {0}")]
    BadChoiceKey(String),

    #[error("Unknown game mode: {0}")]
    UnknownMode(String),
}
