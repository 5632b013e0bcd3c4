//! Session driver
//!
//! [`Session`] owns the whole-UI state machine: the lifecycle phase,
//! the current battle view, and the append-only log. The state
//! transitions are a synchronous core (`begin_*` / `complete_*` /
//! `fail_request`) so front-ends that run requests on spawned tasks
//! can claim the single-flight slot before spawning and apply the
//! result when it lands. The async methods ([`Session::start`],
//! [`Session::choose`]) wrap the same core around a request for
//! callers that can hold the session across the await.

use maison_protocol::session::TEAM_NOT_APPLICABLE;
use maison_protocol::{GameMode, MoveCategory, MoveSubmission, SessionConfig, Snapshot};
use maison_view::{BattleLog, BattleView, Phase};

use crate::{BattleClient, ClientError};

/// Which kind of request currently holds the single-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Setup,
    Move,
}

/// One user's session against the simulator server.
pub struct Session {
    client: BattleClient,
    phase: Phase,
    view: Option<BattleView>,
    log: BattleLog,
    pending: Option<PendingRequest>,
}

impl Session {
    pub fn new(client: BattleClient) -> Self {
        Self {
            client,
            phase: Phase::default(),
            view: None,
            log: BattleLog::new(),
            pending: None,
        }
    }

    pub fn client(&self) -> &BattleClient {
        &self.client
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current battle view, present once a battle has started.
    pub fn view(&self) -> Option<&BattleView> {
        self.view.as_ref()
    }

    /// Mutable view access, for roster panel selection.
    pub fn view_mut(&mut self) -> Option<&mut BattleView> {
        self.view.as_mut()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Whether a request currently holds the single-flight slot.
    pub fn request_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Team selector contents for a mode. Modes without a team
    /// concept get the single placeholder without touching the
    /// network; the rest fetch the server's list, which is used
    /// identically for both the player and opponent selectors.
    pub async fn team_choices(&self, mode: GameMode) -> Result<Vec<String>, ClientError> {
        Self::fetch_team_choices(self.client.clone(), mode).await
    }

    /// Same as [`Session::team_choices`], for callers that run the
    /// request on a spawned task and cannot borrow the session.
    pub async fn fetch_team_choices(
        client: BattleClient,
        mode: GameMode,
    ) -> Result<Vec<String>, ClientError> {
        if !mode.uses_teams() {
            return Ok(vec![TEAM_NOT_APPLICABLE.to_string()]);
        }
        Ok(client.team_options().await?.teams)
    }

    /// Guard a setup submission before any request is sent.
    ///
    /// Rejecting rps here is the known incomplete-feature notice,
    /// not a failure path: the request must never leave the process.
    pub fn validate_config(config: &SessionConfig) -> Result<(), ClientError> {
        match config.mode()? {
            GameMode::Rps => Err(ClientError::UnsupportedMode),
            _ => Ok(()),
        }
    }

    /// Validate the config and claim the single-flight slot for a
    /// setup request.
    pub fn begin_setup(&mut self, config: &SessionConfig) -> Result<(), ClientError> {
        Self::validate_config(config)?;
        self.claim(PendingRequest::Setup)
    }

    /// Claim the single-flight slot for a move submission. Only
    /// legal while a battle is in progress.
    pub fn begin_move(&mut self) -> Result<(), ClientError> {
        if !self.phase.accepts_moves() {
            return Err(ClientError::NotInBattle);
        }
        self.claim(PendingRequest::Move)
    }

    fn claim(&mut self, kind: PendingRequest) -> Result<(), ClientError> {
        if self.pending.is_some() {
            return Err(ClientError::RequestInFlight);
        }
        self.pending = Some(kind);
        Ok(())
    }

    /// Apply a successful setup response: any prior log is cleared,
    /// the view is built fresh, and the phase leaves Setup.
    pub fn complete_setup(&mut self, snapshot: &Snapshot) -> Result<(), ClientError> {
        self.pending = None;
        let view =
            BattleView::from_snapshot(snapshot).ok_or(ClientError::UnrenderableSnapshot)?;

        self.log.clear();
        self.view = Some(view);
        self.phase = Phase::default();
        self.phase.advance(&snapshot.outcome);
        Ok(())
    }

    /// Apply a successful move response: the view is reconciled, one
    /// log entry appended, and the phase advanced.
    pub fn complete_move(&mut self, snapshot: &Snapshot) -> Result<(), ClientError> {
        self.pending = None;
        let Some(view) = self.view.as_mut() else {
            return Err(ClientError::NotInBattle);
        };
        if !view.apply_snapshot(snapshot) {
            return Err(ClientError::UnrenderableSnapshot);
        }

        self.log.append_turn(&snapshot.turn_info, &snapshot.outcome);
        self.phase.advance(&snapshot.outcome);
        Ok(())
    }

    /// Release the single-flight slot after a failed request. No
    /// other state changes: the UI reports the failure and the user
    /// retries manually.
    pub fn fail_request(&mut self) {
        self.pending = None;
    }

    /// Validate, send `/set_parameters`, and apply the response.
    pub async fn start(&mut self, config: &SessionConfig) -> Result<(), ClientError> {
        self.begin_setup(config)?;
        match self.client.set_parameters(config).await {
            Ok(snapshot) => self.complete_setup(&snapshot),
            Err(err) => {
                self.fail_request();
                Err(err)
            }
        }
    }

    /// Send the selected option to `/make_move` and apply the
    /// result.
    pub async fn choose(
        &mut self,
        category: MoveCategory,
        key: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.begin_move()?;
        let submission = MoveSubmission {
            move_class: category,
            move_choice: key.into(),
        };
        match self.client.make_move(&submission).await {
            Ok(snapshot) => self.complete_move(&snapshot),
            Err(err) => {
                self.fail_request();
                Err(err)
            }
        }
    }
}
