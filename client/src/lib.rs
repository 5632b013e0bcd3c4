//! Async HTTP client and session driver for the battle simulator
//! server.
//!
//! The server owns every bit of game logic; this crate only issues
//! the three requests the interface needs and keeps the resulting
//! view state coherent:
//!
//! - [`BattleClient`] - typed wrapper over the HTTP endpoints
//!   (`/team_options`, `/set_parameters`, `/make_move`)
//! - [`Session`] - the whole-UI state machine (phase, battle view,
//!   battle log) with a single-flight guard on submissions
//!
//! # Example
//!
//! ```ignore
//! use maison_client::{BattleClient, Session};
//! use maison_protocol::{GameMode, MoveCategory, OpponentKind, SessionConfig};
//!
//! let mut session = Session::new(BattleClient::new("http://localhost:5000"));
//! let teams = session.team_choices(GameMode::Pkmn).await?;
//!
//! let config = SessionConfig::new(
//!     GameMode::Pkmn,
//!     OpponentKind::BasicPlanningPkmn,
//!     &teams[0],
//!     &teams[0],
//! );
//! session.start(&config).await?;
//!
//! let option = session.view().unwrap().moves.as_ref().unwrap().attacks[0].clone();
//! session.choose(option.category, option.key).await?;
//! ```

mod error;
mod session;

pub use error::ClientError;
pub use session::{PendingRequest, Session};

pub use maison_protocol::{
    GameMode, MoveCategory, MoveOption, MoveSubmission, OpponentKind, SessionConfig, Snapshot,
    TeamOptions,
};
pub use maison_view::{BattleLog, BattleView, Phase};

use maison_protocol::parse_snapshot;

/// Typed HTTP client for the simulator endpoints.
///
/// Cheap to clone; clones share the underlying connection pool, so
/// front-ends can hand copies to spawned request tasks.
#[derive(Clone)]
pub struct BattleClient {
    http: reqwest::Client,
    base: String,
}

impl BattleClient {
    /// Create a client for a server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /team_options` - the team identifiers available for
    /// team-based modes.
    pub async fn team_options(&self) -> Result<TeamOptions, ClientError> {
        let url = self.url("/team_options");
        tracing::debug!(%url, "fetching team options");

        let response = self.http.get(&url).send().await?;
        let response = Self::check_status(response)?;
        Ok(response.json().await?)
    }

    /// `POST /set_parameters` - start a session from the form
    /// selections; the response is the initial snapshot.
    pub async fn set_parameters(&self, config: &SessionConfig) -> Result<Snapshot, ClientError> {
        let url = self.url("/set_parameters");
        tracing::debug!(%url, game = %config.game_choice, opponent = %config.opp_choice, "starting session");

        let response = self.http.post(&url).json(config).send().await?;
        Self::snapshot_body(response).await
    }

    /// `POST /make_move` - submit the selected option; the response
    /// is the next snapshot plus the turn's events.
    pub async fn make_move(&self, submission: &MoveSubmission) -> Result<Snapshot, ClientError> {
        let url = self.url("/make_move");
        tracing::debug!(%url, class = %submission.move_class, choice = %submission.move_choice, "submitting move");

        let response = self.http.post(&url).json(submission).send().await?;
        Self::snapshot_body(response).await
    }

    async fn snapshot_body(response: reqwest::Response) -> Result<Snapshot, ClientError> {
        let response = Self::check_status(response)?;
        let body = response.text().await?;
        Ok(parse_snapshot(&body)?)
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "server rejected request");
            return Err(ClientError::Status(status));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = BattleClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/make_move"), "http://localhost:5000/make_move");
    }
}
