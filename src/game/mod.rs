//! The match controller.
//!
//! [`Game`] owns all shared mutable state - both board planes, both
//! factions' finances, the selection cursor, the winner slot and the RNG -
//! and exposes it to external callers only through the operations in this
//! module tree: the selection cycle, the mutating intents and the turn
//! transition. The presentation layer reads resulting state through the
//! accessors here and never mutates directly.
//!
//! Every accepted mutating intent runs to completion - validation, effect,
//! side effects, turn transition - before another may begin, and calls the
//! turn transition exactly once as its final step. There are no
//! multi-action turns.

mod intents;
mod select;
mod setup;
mod turn;

pub use intents::PurchaseOutcome;
pub use setup::{GameBuilder, Layout};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardId, Tile, TileKind};
use crate::core::{Faction, GameError, GameRng, Position};
use crate::economy::FinancialSituation;
use crate::shop::{Catalog, ItemId};

/// An accepted mutating intent, as recorded in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    Move {
        board: BoardId,
        from: Position,
        to: Position,
    },
    FireArcher {
        board: BoardId,
        from: Position,
        target: Position,
    },
    Travel {
        from_board: BoardId,
        to_board: BoardId,
        pos: Position,
    },
    Buy {
        item: ItemId,
        board: BoardId,
        pos: Position,
    },
    ForceTaxIncrease,
    FinanceAction {
        board: BoardId,
        pos: Position,
    },
    GiveUpgrades {
        board: BoardId,
        from: Position,
        to: Position,
    },
}

/// History entry: who did what, on which turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub faction: Faction,
    pub turn: u32,
    pub intent: Intent,
}

/// A running (or finished) match.
pub struct Game {
    boards: [Board; 2],
    finances: [FinancialSituation; 2],
    catalogs: [Catalog; 2],
    turn: Faction,
    turn_number: u32,
    selected: Option<(BoardId, Position)>,
    winner: Option<Faction>,
    rng: GameRng,
    history: Vector<IntentRecord>,
}

impl Game {
    /// Start configuring a match.
    #[must_use]
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    // === Read surface ===

    /// One board plane.
    #[must_use]
    pub fn board(&self, id: BoardId) -> &Board {
        &self.boards[id.index()]
    }

    /// A tile on a plane. `None` when off the grid.
    #[must_use]
    pub fn tile(&self, board: BoardId, pos: Position) -> Option<&Tile> {
        self.board(board).tile(pos)
    }

    /// One faction's finances.
    #[must_use]
    pub fn finances(&self, faction: Faction) -> &FinancialSituation {
        &self.finances[faction.index()]
    }

    /// The faction whose turn it is.
    #[must_use]
    pub fn active_faction(&self) -> Faction {
        self.turn
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The winning faction, once the match is decided.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    /// The currently selected piece, as a board/position pair.
    #[must_use]
    pub fn selected(&self) -> Option<(BoardId, Position)> {
        self.selected
    }

    /// The item catalog a plane offers.
    #[must_use]
    pub fn catalog(&self, board: BoardId) -> &Catalog {
        &self.catalogs[board.index()]
    }

    /// Open the shop under a piece: the plane's catalog, if `pos` is a shop
    /// tile.
    pub fn open_shop(&self, board: BoardId, pos: Position) -> Result<&Catalog, GameError> {
        let tile = self.tile(board, pos).ok_or(GameError::OutOfBounds(pos))?;
        if tile.kind != TileKind::Shop {
            return Err(GameError::InvalidMove(pos));
        }
        Ok(self.catalog(board))
    }

    /// Every accepted intent so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    // === Internals shared by the operation modules ===

    pub(crate) fn board_mut(&mut self, id: BoardId) -> &mut Board {
        &mut self.boards[id.index()]
    }

    pub(crate) fn finances_mut(&mut self, faction: Faction) -> &mut FinancialSituation {
        &mut self.finances[faction.index()]
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Reject the intent if the match already has a winner.
    pub(crate) fn ensure_active(&self) -> Result<(), GameError> {
        match self.winner {
            Some(winner) => Err(GameError::MatchOver(winner)),
            None => Ok(()),
        }
    }

    pub(crate) fn set_winner(&mut self, faction: Faction) {
        self.winner = Some(faction);
    }

    pub(crate) fn record(&mut self, intent: Intent) {
        self.history.push_back(IntentRecord {
            faction: self.turn,
            turn: self.turn_number,
            intent,
        });
    }

    pub(crate) fn clear_all_annotations(&mut self) {
        for board in &mut self.boards {
            board.clear_annotations();
        }
    }

    pub(crate) fn set_selected(&mut self, selected: Option<(BoardId, Position)>) {
        self.selected = selected;
    }

    pub(crate) fn set_turn(&mut self, faction: Faction) {
        self.turn = faction;
    }

    pub(crate) fn bump_turn_number(&mut self) {
        self.turn_number += 1;
    }
}
