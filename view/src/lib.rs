//! View-model layer for the battle simulator client.
//!
//! This crate turns the wire snapshots of `maison-protocol` into the
//! structures a front-end renders, and owns the presentation rules
//! that are not the server's business:
//!
//! ```text
//! maison-protocol (wire format)
//!        │
//!        ▼
//! maison-view (view models + log formatting) ← THIS CRATE
//!        │
//!        ├─> maison-client (session driver)
//!        └─> maison-tui (terminal front-end)
//! ```
//!
//! Everything here is rebuilt wholesale from each server response.
//! There is no diffing and no identity carried across requests; the
//! previous view is simply discarded.
//!
//! # Main Types
//!
//! - [`Phase`] - UI lifecycle (`Setup → InProgress → Finished`)
//! - [`BattleView`] - full battle view built from one snapshot
//! - [`Roster`] - per-side roster with the one-visible-panel rule
//! - [`MovePanel`] - player options partitioned by category
//! - [`BattleLog`] - append-only formatted battle log

pub mod battle;
pub mod log;
pub mod moves;
pub mod phase;
pub mod roster;
pub mod sprite;

pub use battle::{ActivePanel, BattleView, HpDisplay};
pub use log::{BattleLog, format_event, outcome_line};
pub use moves::MovePanel;
pub use phase::Phase;
pub use roster::{DetailPanel, Roster, RosterEntry};
pub use sprite::{icon_url, sprite_url};
