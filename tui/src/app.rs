//! Application state and event handling
//!
//! All state lives here; requests run on spawned tasks that own a
//! [`BattleClient`] clone and report back through an mpsc channel,
//! so the UI loop never blocks on the network. The session's
//! single-flight guard is claimed before a task is spawned and
//! released when its message lands.

use maison_client::{BattleClient, ClientError, Session, Snapshot};
use maison_protocol::{GameMode, OpponentKind, SessionConfig};
use maison_view::Phase;
use tokio::sync::mpsc;

/// The notice shown for any server-side failure. Matches the failure
/// model: report, change nothing, let the user retry.
const GENERIC_FAILURE: &str = "Something went wrong...";

/// A completed background request.
///
/// Team loads carry the generation of the reload that issued them:
/// cycling the mode reloads the selectors, and a slow response from
/// an earlier mode must not overwrite the current one.
#[derive(Debug)]
pub enum Msg {
    TeamsLoaded(u64, Result<Vec<String>, ClientError>),
    SetupDone(Box<Result<Snapshot, ClientError>>),
    MoveDone(Box<Result<Snapshot, ClientError>>),
}

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Battle,
}

/// Rows of the setup form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Mode,
    Opponent,
    PlayerTeam,
    OppTeam,
    Submit,
}

impl FormRow {
    pub const ALL: [FormRow; 5] = [
        FormRow::Mode,
        FormRow::Opponent,
        FormRow::PlayerTeam,
        FormRow::OppTeam,
        FormRow::Submit,
    ];

    fn position(&self) -> usize {
        Self::ALL.iter().position(|row| row == self).unwrap_or(0)
    }

    fn next(&self) -> FormRow {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> FormRow {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Step a wrapping selector index.
pub fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// The session-setup form: selections mirror the original interface's
/// four dropdowns plus a submit button.
#[derive(Debug)]
pub struct SetupForm {
    pub row: FormRow,
    pub mode_idx: usize,
    pub opp_idx: usize,
    pub teams: Vec<String>,
    pub player_team_idx: usize,
    pub opp_team_idx: usize,
    pub loading_teams: bool,
}

impl SetupForm {
    fn new() -> Self {
        Self {
            row: FormRow::Mode,
            mode_idx: 0,
            opp_idx: 0,
            teams: Vec::new(),
            player_team_idx: 0,
            opp_team_idx: 0,
            loading_teams: true,
        }
    }

    pub fn mode(&self) -> GameMode {
        GameMode::ALL[self.mode_idx]
    }

    pub fn opponents(&self) -> &'static [OpponentKind] {
        self.mode().opponent_kinds()
    }

    pub fn opponent(&self) -> OpponentKind {
        self.opponents()[self.opp_idx]
    }

    /// Build the request body once every selector has a value.
    pub fn config(&self) -> Option<SessionConfig> {
        let player_team = self.teams.get(self.player_team_idx)?;
        let opp_team = self.teams.get(self.opp_team_idx)?;
        Some(SessionConfig::new(
            self.mode(),
            self.opponent(),
            player_team,
            opp_team,
        ))
    }
}

/// Which battle pane takes arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleFocus {
    Moves,
    PlayerRoster,
    OppRoster,
}

impl BattleFocus {
    fn next(&self) -> BattleFocus {
        match self {
            BattleFocus::Moves => BattleFocus::PlayerRoster,
            BattleFocus::PlayerRoster => BattleFocus::OppRoster,
            BattleFocus::OppRoster => BattleFocus::Moves,
        }
    }
}

pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub form: SetupForm,
    pub focus: BattleFocus,
    pub move_idx: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
    teams_generation: u64,
    tx: mpsc::UnboundedSender<Msg>,
}

impl App {
    pub fn new(session: Session, tx: mpsc::UnboundedSender<Msg>) -> Self {
        let mut app = Self {
            session,
            screen: Screen::Setup,
            form: SetupForm::new(),
            focus: BattleFocus::Moves,
            move_idx: 0,
            notice: None,
            should_quit: false,
            teams_generation: 0,
            tx,
        };
        app.reload_teams();
        app
    }

    fn client(&self) -> BattleClient {
        self.session.client().clone()
    }

    /// Repopulate the team selectors for the current mode. Mirrors
    /// the original interface: changing the mode always rebuilds
    /// both team lists.
    fn reload_teams(&mut self) {
        self.form.teams.clear();
        self.form.player_team_idx = 0;
        self.form.opp_team_idx = 0;
        self.form.loading_teams = true;
        self.teams_generation += 1;

        let generation = self.teams_generation;
        let mode = self.form.mode();
        let client = self.client();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = Session::fetch_team_choices(client, mode).await;
            let _ = tx.send(Msg::TeamsLoaded(generation, result));
        });
    }

    fn submit_setup(&mut self) {
        if self.form.loading_teams {
            self.notice = Some("Teams are still loading...".to_string());
            return;
        }
        let Some(config) = self.form.config() else {
            self.notice = Some("No team available to select".to_string());
            return;
        };
        if let Err(err) = self.session.begin_setup(&config) {
            self.notice = Some(err.to_string());
            return;
        }

        self.notice = None;
        let client = self.client();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.set_parameters(&config).await;
            let _ = tx.send(Msg::SetupDone(Box::new(result)));
        });
    }

    fn submit_move(&mut self) {
        let Some(option) = self
            .session
            .view()
            .and_then(|view| view.moves.as_ref())
            .and_then(|moves| moves.get(self.move_idx))
            .cloned()
        else {
            return;
        };
        if let Err(err) = self.session.begin_move() {
            self.notice = Some(err.to_string());
            return;
        }

        self.notice = None;
        let submission = maison_protocol::MoveSubmission {
            move_class: option.category,
            move_choice: option.key,
        };
        let client = self.client();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.make_move(&submission).await;
            let _ = tx.send(Msg::MoveDone(Box::new(result)));
        });
    }

    pub fn on_msg(&mut self, msg: Msg) {
        match msg {
            // A response from a superseded reload is dropped: only
            // the latest generation may fill the selectors.
            Msg::TeamsLoaded(generation, _) if generation != self.teams_generation => {}
            Msg::TeamsLoaded(_, Ok(teams)) => {
                self.form.teams = teams;
                self.form.loading_teams = false;
            }
            Msg::TeamsLoaded(_, Err(err)) => {
                tracing::warn!(%err, "team options request failed");
                self.form.loading_teams = false;
                self.notice = Some(GENERIC_FAILURE.to_string());
            }
            Msg::SetupDone(result) => match *result {
                Ok(snapshot) => match self.session.complete_setup(&snapshot) {
                    Ok(()) => {
                        self.screen = Screen::Battle;
                        self.focus = BattleFocus::Moves;
                        self.move_idx = 0;
                    }
                    Err(err) => {
                        tracing::warn!(%err, "setup response unusable");
                        self.notice = Some(GENERIC_FAILURE.to_string());
                    }
                },
                Err(err) => {
                    tracing::warn!(%err, "setup request failed");
                    self.session.fail_request();
                    self.notice = Some(GENERIC_FAILURE.to_string());
                }
            },
            Msg::MoveDone(result) => match *result {
                Ok(snapshot) => match self.session.complete_move(&snapshot) {
                    Ok(()) => {
                        let len = self
                            .session
                            .view()
                            .and_then(|view| view.moves.as_ref())
                            .map(|moves| moves.len())
                            .unwrap_or(0);
                        self.move_idx = self.move_idx.min(len.saturating_sub(1));
                    }
                    Err(err) => {
                        tracing::warn!(%err, "move response unusable");
                        self.notice = Some(GENERIC_FAILURE.to_string());
                    }
                },
                Err(err) => {
                    tracing::warn!(%err, "move request failed");
                    self.session.fail_request();
                    self.notice = Some(GENERIC_FAILURE.to_string());
                }
            },
        }
    }

    pub fn on_key(&mut self, code: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Setup => self.on_setup_key(code),
            Screen::Battle => self.on_battle_key(code),
        }
    }

    fn on_setup_key(&mut self, code: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        match code {
            KeyCode::Up => self.form.row = self.form.row.prev(),
            KeyCode::Down | KeyCode::Tab => self.form.row = self.form.row.next(),
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match self.form.row {
                    FormRow::Mode => {
                        self.form.mode_idx = step(self.form.mode_idx, GameMode::ALL.len(), forward);
                        // Dependent selectors reset with the mode.
                        self.form.opp_idx = 0;
                        self.reload_teams();
                    }
                    FormRow::Opponent => {
                        self.form.opp_idx =
                            step(self.form.opp_idx, self.form.opponents().len(), forward);
                    }
                    FormRow::PlayerTeam => {
                        self.form.player_team_idx =
                            step(self.form.player_team_idx, self.form.teams.len(), forward);
                    }
                    FormRow::OppTeam => {
                        self.form.opp_team_idx =
                            step(self.form.opp_team_idx, self.form.teams.len(), forward);
                    }
                    FormRow::Submit => {}
                }
            }
            KeyCode::Enter => {
                if self.form.row == FormRow::Submit {
                    self.submit_setup();
                }
            }
            _ => {}
        }
    }

    fn on_battle_key(&mut self, code: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        match code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Char('n') => {
                // Back to the setup form for a fresh battle.
                self.screen = Screen::Setup;
                self.form.row = FormRow::Mode;
                self.notice = None;
                self.reload_teams();
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match self.focus {
                    BattleFocus::Moves => {
                        let len = self
                            .session
                            .view()
                            .and_then(|view| view.moves.as_ref())
                            .map(|moves| moves.len())
                            .unwrap_or(0);
                        self.move_idx = step(self.move_idx, len, forward);
                    }
                    BattleFocus::PlayerRoster | BattleFocus::OppRoster => {
                        let player_side = self.focus == BattleFocus::PlayerRoster;
                        if let Some(view) = self.session.view_mut() {
                            let roster = if player_side {
                                &mut view.player_roster
                            } else {
                                &mut view.opponent_roster
                            };
                            let next = step(roster.visible_index(), roster.len(), forward);
                            roster.reveal(next);
                        }
                    }
                }
            }
            KeyCode::Enter => {
                if self.focus == BattleFocus::Moves && self.session.phase() == Phase::InProgress {
                    self.submit_move();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = Session::new(BattleClient::new("http://127.0.0.1:1"));
        App {
            session,
            screen: Screen::Setup,
            form: SetupForm::new(),
            focus: BattleFocus::Moves,
            move_idx: 0,
            notice: None,
            should_quit: false,
            teams_generation: 0,
            tx,
        }
    }

    fn setup_snapshot() -> Snapshot {
        serde_json::from_value(json!({
            "outcome": {"finished": false},
            "player_active": {"name": "spinda", "dex": 327, "current_hp": 280, "max_hp": 280},
            "opp_active": {"name": "floatzel", "dex": 419, "current_hp": 300, "max_hp": 300},
            "player_opts": [["ATTACK", 0, "Tackle"], ["SWITCH", 1, "Ivysaur"]],
            "gamestate": {
                "player": {"active": {"name": "spinda", "dex": 327}, "team": []},
                "opponent": {
                    "data": {"active": {"name": "floatzel", "dex": 419}, "team": []},
                    "moves": {}, "investment": {}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(0, 3, true), 1);
        assert_eq!(step(2, 3, true), 0);
        assert_eq!(step(0, 3, false), 2);
        assert_eq!(step(0, 0, true), 0);
    }

    #[test]
    fn successful_setup_switches_to_battle_screen() {
        let mut app = app();
        app.session
            .begin_setup(&SessionConfig::new(
                GameMode::Pkmn,
                OpponentKind::RandomPkmn,
                "spinda",
                "spinda",
            ))
            .unwrap();

        app.on_msg(Msg::SetupDone(Box::new(Ok(setup_snapshot()))));

        assert_eq!(app.screen, Screen::Battle);
        assert_eq!(app.move_idx, 0);
        assert!(app.session.view().is_some());
    }

    #[test]
    fn failed_setup_keeps_setup_screen() {
        let mut app = app();
        app.session
            .begin_setup(&SessionConfig::new(
                GameMode::Pkmn,
                OpponentKind::RandomPkmn,
                "spinda",
                "spinda",
            ))
            .unwrap();

        app.on_msg(Msg::SetupDone(Box::new(Err(
            ClientError::UnrenderableSnapshot,
        ))));

        assert_eq!(app.screen, Screen::Setup);
        assert_eq!(app.notice.as_deref(), Some("Something went wrong..."));
        assert!(!app.session.request_pending());
    }

    #[test]
    fn stale_team_load_is_dropped() {
        let mut app = app();
        // Two reloads issued back to back (Pkmn, then Rps); the Rps
        // placeholder resolves first.
        app.teams_generation = 2;
        app.on_msg(Msg::TeamsLoaded(2, Ok(vec!["N/A".to_string()])));
        assert_eq!(app.form.teams, vec!["N/A".to_string()]);

        // The slower Pkmn response lands afterwards and must not
        // clobber the current selectors.
        app.on_msg(Msg::TeamsLoaded(
            1,
            Ok(vec!["spinda".to_string(), "floatzel".to_string()]),
        ));
        assert_eq!(app.form.teams, vec!["N/A".to_string()]);
        assert!(!app.form.loading_teams);
    }

    #[test]
    fn mode_cycle_resets_dependent_selectors() {
        let mut app = app();
        app.form.opp_idx = 1;
        app.form.loading_teams = false;
        app.form.teams = vec!["spinda".to_string()];

        // Cycling the mode on the mode row resets the opponent and
        // team selections and kicks off a team reload.
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();
        app.form.row = FormRow::Mode;
        app.on_setup_key(crossterm::event::KeyCode::Right);

        assert_eq!(app.form.mode(), GameMode::Rps);
        assert_eq!(app.form.opp_idx, 0);
        assert!(app.form.teams.is_empty());
        assert!(app.form.loading_teams);
    }
}
