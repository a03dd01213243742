//! Rejection kinds for mutating intents.
//!
//! Every mutating operation validates fully before touching state; a
//! rejected intent leaves the match untouched and is reported as one of
//! these recoverable values. Nothing here is ever a process-fatal
//! condition. Edge cases with a defined game outcome (a President dying
//! with no pawn left to succeed it) are game events, not errors.

use thiserror::Error;

use super::faction::Faction;
use super::position::Position;

/// Why a mutating intent was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The source tile is empty, or the destination is not in the
    /// currently computed legal set.
    #[error("illegal move involving {0}")]
    InvalidMove(Position),

    /// The acting piece does not belong to the faction whose turn it is.
    #[error("it is not {0}'s turn")]
    WrongTurn(Faction),

    /// A faction name outside the two valid factions.
    #[error("unknown faction `{0}`")]
    UnknownFaction(String),

    /// Coordinates outside the 10×10 grid, or on a removed tile.
    #[error("{0} is off the board or removed")]
    OutOfBounds(Position),

    /// An action that requires a selected piece was issued with none.
    #[error("no piece is selected")]
    NoSelection,

    /// The match already has a winner; no further intents are accepted.
    #[error("the match is over, {0} won")]
    MatchOver(Faction),
}
