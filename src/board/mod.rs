//! Tiles, affordance annotations, and the per-plane board grid.
//!
//! ## Annotations
//!
//! An [`Annotation`] is a capability tag describing a currently legal
//! interaction with a tile for the selected piece. The engine repaints the
//! full set on every selection cycle and clears it on every turn
//! transition; the presentation layer derives visuals from it and never
//! writes it back.
//!
//! ## Ownership
//!
//! A tile exclusively owns its occupant. Pieces carry no position or board
//! field: where a piece *is* is where it sits in a grid, and transfers
//! between planes move the value from one tile to another.

use serde::{Deserialize, Serialize};

use crate::core::{Position, BOARD_SIZE};
use crate::pieces::{Piece, PieceKind};

/// Which plane a board is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardId {
    Primary,
    Underworld,
}

impl BoardId {
    /// Both planes, primary first.
    pub const ALL: [BoardId; 2] = [BoardId::Primary, BoardId::Underworld];

    /// The other plane.
    #[must_use]
    pub const fn other(self) -> BoardId {
        match self {
            BoardId::Primary => BoardId::Underworld,
            BoardId::Underworld => BoardId::Primary,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            BoardId::Primary => 0,
            BoardId::Underworld => 1,
        }
    }
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardId::Primary => write!(f, "primary"),
            BoardId::Underworld => write!(f, "underworld"),
        }
    }
}

/// Tile category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    #[default]
    Normal,
    /// Standing here lets a piece open the plane's item catalog.
    Shop,
}

/// A currently legal interaction with a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Annotation {
    /// The selected piece may move here.
    Move,
    /// The selected piece may capture the occupant.
    Capture,
    /// The selected piece stands on a shop tile and may buy.
    Shop,
    /// A tax-raising action is available on this tile.
    Finance,
    /// An adjacent friendly piece that can receive the selection's upgrades.
    Gift,
    /// Within archer range, nothing to hit.
    ArcherEmpty,
    /// Within archer range, enemy-occupied.
    ArcherHit,
    /// The selected archer cannot fire this turn.
    Reloading,
}

/// One square of a plane.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Occupant, exclusively owned by this tile.
    pub piece: Option<Piece>,
    /// Permanently unplayable.
    pub removed: bool,
    /// Tile category.
    pub kind: TileKind,
    /// Transient affordance, cleared every selection cycle.
    pub annotation: Option<Annotation>,
}

/// A 10×10 plane of tiles.
#[derive(Clone, Debug, Serialize)]
pub struct Board {
    id: BoardId,
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an empty plane of normal tiles.
    #[must_use]
    pub fn new(id: BoardId) -> Self {
        let count = usize::from(BOARD_SIZE) * usize::from(BOARD_SIZE);
        Self {
            id,
            tiles: vec![Tile::default(); count],
        }
    }

    /// Which plane this is.
    #[must_use]
    pub fn id(&self) -> BoardId {
        self.id
    }

    fn index(pos: Position) -> Option<usize> {
        if pos.row < BOARD_SIZE && pos.col < BOARD_SIZE {
            Some(usize::from(pos.row) * usize::from(BOARD_SIZE) + usize::from(pos.col))
        } else {
            None
        }
    }

    /// Look up a tile. `None` when off the grid.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        Self::index(pos).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        Self::index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Look up a tile a piece could stand on. `None` when off the grid or
    /// removed.
    #[must_use]
    pub fn playable(&self, pos: Position) -> Option<&Tile> {
        self.tile(pos).filter(|t| !t.removed)
    }

    /// Whether any tile holds a piece.
    #[must_use]
    pub fn has_any_piece(&self) -> bool {
        self.tiles.iter().any(|t| t.piece.is_some())
    }

    /// Whether any tile holds a living Queen.
    #[must_use]
    pub fn has_living_queen(&self) -> bool {
        self.tiles
            .iter()
            .any(|t| t.piece.as_ref().is_some_and(|p| p.kind == PieceKind::Queen))
    }

    /// Iterate every occupied tile as `(position, piece)`.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> {
        Position::all()
            .zip(self.tiles.iter())
            .filter_map(|(pos, t)| t.piece.as_ref().map(|p| (pos, p)))
    }

    /// Reset every tile's affordance to none.
    pub(crate) fn clear_annotations(&mut self) {
        for tile in &mut self.tiles {
            tile.annotation = None;
        }
    }

    pub(crate) fn annotate(&mut self, pos: Position, annotation: Annotation) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.annotation = Some(annotation);
        }
    }

    pub(crate) fn take_piece(&mut self, pos: Position) -> Option<Piece> {
        self.tile_mut(pos).and_then(|t| t.piece.take())
    }

    pub(crate) fn put_piece(&mut self, pos: Position, piece: Piece) {
        if let Some(tile) = self.tile_mut(pos).filter(|t| !t.removed) {
            tile.piece = Some(piece);
        }
    }

    pub(crate) fn mark_removed(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.removed = true;
        }
    }

    pub(crate) fn mark_shop(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.kind = TileKind::Shop;
        }
    }
}
