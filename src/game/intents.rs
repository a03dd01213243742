//! Mutating intents.
//!
//! Every operation here validates fully against the current selection and
//! annotation state before touching anything, applies its effect and side
//! effects, and finalizes with the turn transition. A rejected intent
//! leaves the match byte-for-byte unchanged.

use smallvec::SmallVec;

use crate::board::{Annotation, BoardId, TileKind};
use crate::core::{Faction, GameError, Position, ADJACENT, BOARD_SIZE};
use crate::pieces::{Piece, PieceKind, ARCHER_COOLDOWN};
use crate::shop::{ActionKind, ItemId, ItemKind, Upgrade};

use super::{Game, Intent};

/// What a purchase did, reported back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchaseOutcome {
    /// The item took effect with no random component.
    Applied,
    /// The gamble resolved: whether the bet paid out.
    Gamble { won: bool },
}

impl Game {
    /// Move the selected piece to `to`.
    ///
    /// `to` must carry a move or capture annotation on the selection's own
    /// plane. An occupied destination is captured first.
    pub fn commit_move(&mut self, to: Position) -> Result<(), GameError> {
        self.ensure_active()?;
        let (board_id, from) = self.selected().ok_or(GameError::NoSelection)?;

        let annotation = self.board(board_id).tile(to).and_then(|t| t.annotation);
        if !matches!(annotation, Some(Annotation::Move | Annotation::Capture)) {
            return Err(GameError::InvalidMove(to));
        }

        let Some(mover) = self.board_mut(board_id).take_piece(from) else {
            return Err(GameError::InvalidMove(from));
        };
        if self.board(board_id).tile(to).is_some_and(|t| t.piece.is_some()) {
            self.capture(board_id, to);
        }
        self.board_mut(board_id).put_piece(to, mover);

        self.record(Intent::Move { board: board_id, from, to });
        self.end_turn();
        Ok(())
    }

    /// Fire the selected archer at `target`.
    ///
    /// A shield absorbs the shot one point per hit; an unshielded target
    /// dies. Either way the archer starts reloading and the turn ends.
    pub fn fire_archer(&mut self, target: Position) -> Result<(), GameError> {
        self.ensure_active()?;
        let (board_id, from) = self.selected().ok_or(GameError::NoSelection)?;

        let is_archer = self
            .board(board_id)
            .tile(from)
            .and_then(|t| t.piece.as_ref())
            .is_some_and(|p| p.kind == PieceKind::Archer);
        if !is_archer {
            return Err(GameError::InvalidMove(target));
        }
        if self.board(board_id).tile(target).and_then(|t| t.annotation) != Some(Annotation::ArcherHit) {
            return Err(GameError::InvalidMove(target));
        }

        let shielded = self
            .board(board_id)
            .tile(target)
            .and_then(|t| t.piece.as_ref())
            .is_some_and(|p| p.shield > 0);
        if shielded {
            if let Some(piece) = self
                .board_mut(board_id)
                .tile_mut(target)
                .and_then(|t| t.piece.as_mut())
            {
                piece.shield -= 1;
            }
        } else {
            self.capture(board_id, target);
        }

        if let Some(archer) = self
            .board_mut(board_id)
            .tile_mut(from)
            .and_then(|t| t.piece.as_mut())
        {
            archer.cooldown = ARCHER_COOLDOWN;
        }

        self.record(Intent::FireArcher { board: board_id, from, target });
        self.end_turn();
        Ok(())
    }

    /// Carry the selected wizard to the same coordinates on another plane.
    pub fn travel(&mut self, to_board: BoardId, pos: Position) -> Result<(), GameError> {
        self.ensure_active()?;
        let (board_id, from) = self.selected().ok_or(GameError::NoSelection)?;

        if to_board == board_id {
            return Err(GameError::InvalidMove(pos));
        }
        let annotation = self.board(to_board).tile(pos).and_then(|t| t.annotation);
        if !matches!(annotation, Some(Annotation::Move | Annotation::Capture)) {
            return Err(GameError::InvalidMove(pos));
        }

        let Some(wizard) = self.board_mut(board_id).take_piece(from) else {
            return Err(GameError::InvalidMove(from));
        };
        if self.board(to_board).tile(pos).is_some_and(|t| t.piece.is_some()) {
            self.capture(to_board, pos);
        }
        self.board_mut(to_board).put_piece(pos, wizard);

        self.record(Intent::Travel { from_board: board_id, to_board, pos });
        self.end_turn();
        Ok(())
    }

    /// Buy `item` from the plane's catalog for the piece at `pos`.
    ///
    /// The bank may go negative; debt has consequences at turn's end, not
    /// at the till.
    pub fn buy(
        &mut self,
        item: ItemId,
        board_id: BoardId,
        pos: Position,
    ) -> Result<PurchaseOutcome, GameError> {
        self.ensure_active()?;

        let tile = self.board(board_id).tile(pos).ok_or(GameError::OutOfBounds(pos))?;
        if tile.kind != TileKind::Shop {
            return Err(GameError::InvalidMove(pos));
        }
        let Some(buyer) = tile.piece.as_ref() else {
            return Err(GameError::InvalidMove(pos));
        };
        let faction = buyer.faction;
        if faction != self.active_faction() {
            return Err(GameError::WrongTurn(faction));
        }
        let Some(entry) = self.catalog(board_id).get(item) else {
            return Err(GameError::InvalidMove(pos));
        };
        let (cost, kind) = (entry.cost, entry.kind);

        let outcome = match kind {
            ItemKind::Upgrade(upgrade) => {
                self.attach_upgrade(board_id, pos, upgrade);
                PurchaseOutcome::Applied
            }
            ItemKind::Action(action) => self.run_action(action, faction, board_id, pos),
        };
        self.finances_mut(faction).bank -= cost;
        tracing::debug!(%item, %faction, cost, "item purchased");

        self.record(Intent::Buy { item, board: board_id, pos });
        self.end_turn();
        Ok(outcome)
    }

    /// Raise the active faction's taxes by decree: +10 tax, -0.05 opinion,
    /// and the turn is spent.
    pub fn force_tax_increase(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        let faction = self.active_faction();

        self.finances_mut(faction).tax += 10;
        self.finances_mut(faction).decrease_opinion(0.05);

        self.record(Intent::ForceTaxIncrease);
        self.end_turn();
        Ok(())
    }

    /// Use the finance affordance at `pos`: a tax bump (+20 from the
    /// finance minister itself, +10 from a financially educated piece) and
    /// an even chance of an opinion boost.
    pub fn finance_action(&mut self, board_id: BoardId, pos: Position) -> Result<(), GameError> {
        self.ensure_active()?;

        let tile = self.board(board_id).tile(pos).ok_or(GameError::OutOfBounds(pos))?;
        if tile.annotation != Some(Annotation::Finance) {
            return Err(GameError::InvalidMove(pos));
        }
        let Some(piece) = tile.piece.as_ref() else {
            return Err(GameError::InvalidMove(pos));
        };
        let faction = piece.faction;
        let bump = if piece.kind == PieceKind::FinanceMinister { 20 } else { 10 };

        if self.rng_mut().gen_bool(0.5) {
            self.finances_mut(faction).increase_opinion(0.1);
        }
        self.finances_mut(faction).tax += bump;

        self.record(Intent::FinanceAction { board: board_id, pos });
        self.end_turn();
        Ok(())
    }

    /// Hand the selected piece's entire upgrade list to the adjacent
    /// friendly piece at `to`.
    pub fn give_upgrades(&mut self, from: Position, to: Position) -> Result<(), GameError> {
        self.ensure_active()?;
        let (board_id, selected) = self.selected().ok_or(GameError::NoSelection)?;

        if from != selected {
            return Err(GameError::InvalidMove(from));
        }
        if self.board(board_id).tile(to).and_then(|t| t.annotation) != Some(Annotation::Gift) {
            return Err(GameError::InvalidMove(to));
        }

        let moved: SmallVec<[Upgrade; 2]> = match self
            .board_mut(board_id)
            .tile_mut(from)
            .and_then(|t| t.piece.as_mut())
        {
            Some(piece) => std::mem::take(&mut piece.upgrades),
            None => return Err(GameError::InvalidMove(from)),
        };
        if let Some(piece) = self
            .board_mut(board_id)
            .tile_mut(to)
            .and_then(|t| t.piece.as_mut())
        {
            piece.upgrades.extend(moved);
        }

        self.record(Intent::GiveUpgrades { board: board_id, from, to });
        self.end_turn();
        Ok(())
    }

    // === Capture resolution ===

    /// Kill the occupant at `pos`.
    ///
    /// Death hooks run first, while the victim still stands. On the primary
    /// plane a non-wizard victim then transfers to the underworld at the
    /// same coordinates - unless a Queen holds that tile, which destroys
    /// the victim outright - and the opinion penalties land. Death on the
    /// underworld is permanent.
    pub(crate) fn capture(&mut self, board_id: BoardId, pos: Position) {
        let Some(victim_ref) = self.board(board_id).tile(pos).and_then(|t| t.piece.as_ref()) else {
            return;
        };
        let hooks = victim_ref.upgrades.clone();

        for upgrade in hooks {
            self.run_death_hook(upgrade, board_id, pos);
        }

        let Some(victim) = self.board_mut(board_id).take_piece(pos) else {
            return;
        };
        let (kind, faction) = (victim.kind, victim.faction);
        tracing::debug!(board = %board_id, %pos, piece = %kind, %faction, "piece killed");

        if board_id != BoardId::Primary {
            return;
        }

        // Wizards never cross over; everyone else lands on the underworld
        // unless a Queen already claims the tile.
        if kind != PieceKind::Wizard {
            let queen_below = self
                .board(BoardId::Underworld)
                .tile(pos)
                .and_then(|t| t.piece.as_ref())
                .is_some_and(|p| p.kind == PieceKind::Queen);
            if !queen_below {
                self.board_mut(BoardId::Underworld).put_piece(pos, victim);
            }
        }

        match faction {
            Faction::Blue => {
                if kind == PieceKind::Queen {
                    self.finances_mut(Faction::Blue).decrease_opinion(0.2);
                    self.finances_mut(Faction::Red).increase_opinion(0.2);
                } else if kind != PieceKind::Pawn {
                    self.finances_mut(Faction::Blue).decrease_opinion(0.05);
                }
            }
            Faction::Red => {
                if kind == PieceKind::President {
                    self.promote_random_pawn();
                    self.finances_mut(Faction::Red).decrease_opinion(0.35);
                } else if kind == PieceKind::FinanceMinister {
                    self.finances_mut(Faction::Red).decrease_opinion(0.15);
                } else {
                    self.finances_mut(Faction::Red).decrease_opinion(0.07);
                }
            }
        }
    }

    fn run_death_hook(&mut self, upgrade: Upgrade, board_id: BoardId, pos: Position) {
        match upgrade {
            Upgrade::Bomb => {
                // Neighbours are destroyed for good, with no transfer, no
                // hooks and no penalties. The bearer sheds its upgrades and
                // dies plain.
                for (d_row, d_col) in ADJACENT {
                    if let Some(adjacent) = pos.offset(d_row, d_col) {
                        self.board_mut(board_id).take_piece(adjacent);
                    }
                }
                if let Some(bearer) = self
                    .board_mut(board_id)
                    .tile_mut(pos)
                    .and_then(|t| t.piece.as_mut())
                {
                    bearer.upgrades.clear();
                }
            }
            Upgrade::FinancialEducation => {
                let faction = self
                    .board(board_id)
                    .tile(pos)
                    .and_then(|t| t.piece.as_ref())
                    .map(|p| p.faction);
                if let Some(faction) = faction {
                    self.finances_mut(faction).decrease_opinion(0.1);
                }
            }
            Upgrade::WalkingStick | Upgrade::Shield => {}
        }
    }

    // === Shop effects ===

    fn attach_upgrade(&mut self, board_id: BoardId, pos: Position, upgrade: Upgrade) {
        if let Some(piece) = self
            .board_mut(board_id)
            .tile_mut(pos)
            .and_then(|t| t.piece.as_mut())
        {
            piece.upgrades.push(upgrade);
            if upgrade == Upgrade::Shield {
                piece.shield += 2;
            }
        }
    }

    fn run_action(
        &mut self,
        action: ActionKind,
        faction: Faction,
        board_id: BoardId,
        pos: Position,
    ) -> PurchaseOutcome {
        match action {
            ActionKind::Conscription => {
                self.conscript(faction, board_id);
                PurchaseOutcome::Applied
            }
            ActionKind::Revive => {
                self.revive(board_id, pos);
                PurchaseOutcome::Applied
            }
            ActionKind::Gamble => {
                let won = self.rng_mut().gen_bool(0.5);
                if won {
                    self.finances_mut(faction).bank += 2000;
                }
                tracing::debug!(%faction, won, "gamble resolved");
                PurchaseOutcome::Gamble { won }
            }
            ActionKind::MassRevive => {
                for target in Position::all() {
                    let ours = self
                        .board(board_id)
                        .tile(target)
                        .and_then(|t| t.piece.as_ref())
                        .is_some_and(|p| p.faction == faction);
                    if ours {
                        self.revive(board_id, target);
                    }
                }
                PurchaseOutcome::Applied
            }
        }
    }

    /// A fresh pawn on the buyer's home row, first free tile from the left.
    /// The opinion cost applies even when the row is full and nothing
    /// appears.
    fn conscript(&mut self, faction: Faction, board_id: BoardId) {
        self.finances_mut(faction).decrease_opinion(0.15);

        let row = faction.home_row();
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            if self.board(board_id).playable(pos).is_some_and(|t| t.piece.is_none()) {
                self.board_mut(board_id).put_piece(pos, Piece::new(PieceKind::Pawn, faction));
                return;
            }
        }
    }

    /// Return the piece at an underworld tile to the primary plane at the
    /// same coordinates, killing whatever stands there. A President has
    /// been replaced in the meantime and returns as a pawn.
    fn revive(&mut self, board_id: BoardId, pos: Position) {
        let Some(piece) = self.board_mut(board_id).take_piece(pos) else {
            return;
        };
        if self.board(BoardId::Primary).tile(pos).is_some_and(|t| t.piece.is_some()) {
            self.capture(BoardId::Primary, pos);
        }
        let returned = if piece.kind == PieceKind::President {
            Piece::new(PieceKind::Pawn, piece.faction)
        } else {
            piece
        };
        self.board_mut(BoardId::Primary).put_piece(pos, returned);
    }
}
