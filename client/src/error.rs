use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// There is no retry, backoff, or partial recovery anywhere in this
/// crate: every failure leaves session state exactly as it was, and
/// the user retries manually.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rock-paper-scissors is selectable but not playable yet; the
    /// guard fires before any request is sent.
    #[error("Rock-paper-scissors battles are not supported yet")]
    UnsupportedMode,

    /// The single-flight guard rejected a submission because one is
    /// already outstanding.
    #[error("A request is already in flight")]
    RequestInFlight,

    /// A move was submitted outside an in-progress battle.
    #[error("No battle is in progress")]
    NotInBattle,

    /// The server answered with a non-success status.
    #[error("Server returned {0}")]
    Status(StatusCode),

    /// The server answered 200 but the snapshot was missing the
    /// state needed to render it.
    #[error("Server response was not renderable")]
    UnrenderableSnapshot,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Protocol(#[from] maison_protocol::ParseError),
}
