//! Piece variants and per-piece state.
//!
//! The ten variants share one plain struct; everything variant-specific is
//! dispatched on [`PieceKind`] - movement rules in [`moves`], selection
//! affordances and death behavior in the match controller. There is no
//! trait object or inheritance chain anywhere: a `match` on the kind is the
//! behavior table.

pub mod moves;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Faction;
use crate::shop::Upgrade;

/// Turns an archer sits out after firing. Decremented on every turn
/// transition, so a fresh shot leaves exactly one own turn of reloading.
pub const ARCHER_COOLDOWN: u32 = 3;

/// Piece variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Rook,
    Elephant,
    Archer,
    Wizard,
    /// Immobile; exists purely as blue's win-condition sentinel.
    Queen,
    Pope,
    /// Red's leader. Its death triggers succession.
    President,
    FinanceMinister,
    Pawn,
}

impl PieceKind {
    /// Variants with no movement of their own.
    #[must_use]
    pub const fn is_immobile(self) -> bool {
        matches!(
            self,
            PieceKind::Archer | PieceKind::Queen | PieceKind::FinanceMinister
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Rook => "Rook",
            PieceKind::Elephant => "Elephant",
            PieceKind::Archer => "Archer",
            PieceKind::Wizard => "Wizard",
            PieceKind::Queen => "Queen",
            PieceKind::Pope => "Pope",
            PieceKind::President => "President",
            PieceKind::FinanceMinister => "FinanceMinister",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{name}")
    }
}

/// A piece on a board.
///
/// Owned by the tile it stands on. The upgrade list is ordered: overlays
/// and death hooks run in attachment order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub faction: Faction,
    /// Absorbs archer shots, one point per hit.
    pub shield: u32,
    /// Reload counter; meaningful for archers only.
    pub cooldown: u32,
    /// Attached upgrades, in purchase order.
    pub upgrades: SmallVec<[Upgrade; 2]>,
}

impl Piece {
    /// Create a fresh piece with no shield, no cooldown, no upgrades.
    #[must_use]
    pub fn new(kind: PieceKind, faction: Faction) -> Self {
        Self {
            kind,
            faction,
            shield: 0,
            cooldown: 0,
            upgrades: SmallVec::new(),
        }
    }

    /// Whether this piece belongs to the other faction.
    #[must_use]
    pub fn is_enemy_of(&self, faction: Faction) -> bool {
        self.faction != faction
    }
}
