//! Core types: coordinates, factions, randomness, and error kinds.

pub mod error;
pub mod faction;
pub mod position;
pub mod rng;

pub use error::GameError;
pub use faction::Faction;
pub use position::{Position, ADJACENT, BOARD_SIZE, DIAGONAL, KNIGHT_LEAPS, ORTHOGONAL};
pub use rng::{GameRng, GameRngState};
