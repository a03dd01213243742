//! The selection cycle.
//!
//! Selecting a piece computes its full legal-interaction set - movement,
//! upgrade overlays, shop entry, gift targets, and the variant-specific
//! affordances (wizard travel, finance action, archer targeting) - as a
//! capability-tagged list, then paints it onto the tiles in order. Later
//! entries overwrite earlier ones on the same tile, which is load-bearing:
//! a finance minister on a shop tile shows the shop, not the finance
//! action, until it steps off.
//!
//! Selection is a cursor operation: it never ends the turn, and
//! re-selecting the selected piece clears the cursor instead.

use crate::board::{Annotation, BoardId, TileKind};
use crate::core::{Faction, GameError, Position, ADJACENT};
use crate::pieces::{moves, PieceKind};
use crate::shop::Upgrade;

use super::Game;

/// One entry of the computed interaction set.
type Paint = (BoardId, Position, Annotation);

impl Game {
    /// Select the piece at `pos`, painting its legal interactions.
    ///
    /// Re-selecting the currently selected piece clears the selection.
    /// Selecting an empty tile is rejected, as is selecting out of turn.
    pub fn select(&mut self, board: BoardId, pos: Position) -> Result<(), GameError> {
        self.ensure_active()?;

        let tile = self.board(board).tile(pos).ok_or(GameError::OutOfBounds(pos))?;
        if tile.removed {
            return Err(GameError::OutOfBounds(pos));
        }
        let Some(piece) = tile.piece.as_ref() else {
            return Err(GameError::InvalidMove(pos));
        };
        let faction = piece.faction;

        if self.selected() == Some((board, pos)) {
            self.clear_selection();
            return Ok(());
        }
        if faction != self.active_faction() {
            return Err(GameError::WrongTurn(faction));
        }

        let paints = self.interactions(board, pos);
        self.clear_all_annotations();
        self.set_selected(Some((board, pos)));
        for (b, p, annotation) in paints {
            self.board_mut(b).annotate(p, annotation);
        }
        Ok(())
    }

    /// Drop the selection cursor and all annotations.
    pub fn clear_selection(&mut self) {
        self.set_selected(None);
        self.clear_all_annotations();
    }

    /// Compute the full interaction set for the piece at `pos`.
    ///
    /// Pure with respect to annotations: nothing is painted here.
    fn interactions(&self, board_id: BoardId, pos: Position) -> Vec<Paint> {
        let board = self.board(board_id);
        let Some(piece) = board.tile(pos).and_then(|t| t.piece.as_ref()) else {
            return Vec::new();
        };
        let mut set: Vec<Paint> = Vec::new();

        // Base movement.
        for target in moves::destinations(board, pos, piece) {
            let annotation = if target.capture {
                Annotation::Capture
            } else {
                Annotation::Move
            };
            set.push((board_id, target.to, annotation));
        }

        // Upgrade overlays, in attachment order.
        for upgrade in &piece.upgrades {
            match upgrade {
                Upgrade::WalkingStick => {
                    self.walking_stick_overlay(board_id, pos, piece.faction, &mut set);
                }
                Upgrade::FinancialEducation => set.push((board_id, pos, Annotation::Finance)),
                Upgrade::Shield | Upgrade::Bomb => {}
            }
        }

        // Shop entry.
        if board.tile(pos).is_some_and(|t| t.kind == TileKind::Shop) {
            set.push((board_id, pos, Annotation::Shop));
        }

        // Gift targets: adjacent friendly pieces, only when there is
        // something to hand over.
        if !piece.upgrades.is_empty() {
            for (d_row, d_col) in ADJACENT {
                let Some(adjacent) = pos.offset(d_row, d_col) else { continue };
                let Some(tile) = board.playable(adjacent) else { continue };
                if tile.piece.as_ref().is_some_and(|p| p.faction == piece.faction) {
                    set.push((board_id, adjacent, Annotation::Gift));
                }
            }
        }

        // Variant-specific affordances.
        match piece.kind {
            PieceKind::Wizard => {
                let other = board_id.other();
                if let Some(tile) = self.board(other).playable(pos) {
                    let annotation = if tile.piece.is_some() {
                        Annotation::Capture
                    } else {
                        Annotation::Move
                    };
                    set.push((other, pos, annotation));
                }
            }
            PieceKind::FinanceMinister => set.push((board_id, pos, Annotation::Finance)),
            PieceKind::Archer => self.archer_overlay(board_id, pos, piece.faction, piece.cooldown, &mut set),
            _ => {}
        }

        set
    }

    /// Forward-reach extension: one more tile past the contiguous run of
    /// already-annotated forward destinations, if that tile is free.
    fn walking_stick_overlay(
        &self,
        board_id: BoardId,
        pos: Position,
        faction: Faction,
        set: &mut Vec<Paint>,
    ) {
        let board = self.board(board_id);
        let direction = faction.pawn_direction();

        let mut front = pos.offset(direction, 0);
        while let Some(p) = front {
            if board.playable(p).is_none() {
                return;
            }
            let annotated_move = set
                .iter()
                .any(|&(b, q, a)| b == board_id && q == p && a == Annotation::Move);
            if annotated_move {
                front = p.offset(direction, 0);
            } else {
                break;
            }
        }

        let Some(reach) = front else { return };
        let Some(tile) = board.playable(reach) else { return };
        if tile.piece.is_some() {
            return;
        }
        set.push((board_id, reach, Annotation::Move));
    }

    /// Ranged targeting within Manhattan distance 3, split into hits and
    /// empty range markers; a cooling-down archer marks itself reloading
    /// instead. Runs last and leaves earlier overlays in place.
    fn archer_overlay(
        &self,
        board_id: BoardId,
        pos: Position,
        faction: Faction,
        cooldown: u32,
        set: &mut Vec<Paint>,
    ) {
        if cooldown > 0 {
            set.push((board_id, pos, Annotation::Reloading));
            return;
        }

        let board = self.board(board_id);
        for target in Position::all() {
            if target == pos || pos.manhattan(target) >= 4 {
                continue;
            }
            if set.iter().any(|&(b, p, _)| b == board_id && p == target) {
                continue;
            }
            let Some(tile) = board.playable(target) else { continue };
            let hit = tile.piece.as_ref().is_some_and(|p| p.faction != faction);
            let annotation = if hit {
                Annotation::ArcherHit
            } else {
                Annotation::ArcherEmpty
            };
            set.push((board_id, target, annotation));
        }
    }
}
