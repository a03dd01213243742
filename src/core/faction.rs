//! The two playing factions.
//!
//! Factions are asymmetric: red fields a President and a Finance Minister
//! and marches its pawns down the board; blue fields two Queens and marches
//! up. Win conditions differ per faction (see the match controller).

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Faction color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Red,
    Blue,
}

impl Faction {
    /// Both factions, in red-first order.
    pub const BOTH: [Faction; 2] = [Faction::Red, Faction::Blue];

    /// The opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Red => Faction::Blue,
            Faction::Blue => Faction::Red,
        }
    }

    /// Row direction this faction's pawns advance in.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Faction::Red => 1,
            Faction::Blue => -1,
        }
    }

    /// The row this faction's pawns start on.
    #[must_use]
    pub const fn home_row(self) -> u8 {
        match self {
            Faction::Red => 1,
            Faction::Blue => 8,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Faction::Red => 0,
            Faction::Blue => 1,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Red => write!(f, "red"),
            Faction::Blue => write!(f, "blue"),
        }
    }
}

impl std::str::FromStr for Faction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Faction::Red),
            "blue" => Ok(Faction::Blue),
            other => Err(GameError::UnknownFaction(other.to_string())),
        }
    }
}
