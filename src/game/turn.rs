//! The turn transition and win-condition evaluation.
//!
//! `end_turn` is the sole state transition of the match and runs exactly
//! once as the final step of every accepted mutating intent. The win rules
//! evaluate in a fixed order on current state, and a later rule may
//! overwrite a winner assigned by an earlier one within the same call -
//! the factions' victory conditions are asymmetric and the ordering is
//! part of the rules.

use crate::board::BoardId;
use crate::core::Faction;
use crate::pieces::{Piece, PieceKind};

use super::Game;

/// Opinion a faction bleeds every turn its bank is empty or negative.
const DEBT_OPINION_PENALTY: f64 = 0.1;

/// Red's opinion floor; below it the republic collapses.
const RED_OPINION_FLOOR: f64 = 0.25;

impl Game {
    /// Finalize the current intent: clear the cursor, flip the turn, pay
    /// upkeep, and evaluate the win conditions.
    pub(crate) fn end_turn(&mut self) {
        self.set_selected(None);
        self.clear_all_annotations();

        let next = self.active_faction().opponent();
        self.set_turn(next);
        self.bump_turn_number();

        // Every archer reloads a little on every transition.
        for board in BoardId::ALL {
            self.tick_archers(board);
        }

        // Upkeep for the faction about to move.
        let income = self.finances(next).upkeep();
        self.finances_mut(next).bank += income;
        tracing::trace!(faction = %next, income, "turn upkeep credited");

        self.evaluate_win_conditions();

        if let Some(winner) = self.winner() {
            tracing::debug!(winner = %winner, "match decided");
        }
    }

    fn tick_archers(&mut self, board: BoardId) {
        let board = self.board_mut(board);
        for pos in crate::core::Position::all() {
            if let Some(tile) = board.tile_mut(pos) {
                if let Some(piece) = tile.piece.as_mut() {
                    if piece.kind == PieceKind::Archer {
                        piece.cooldown = piece.cooldown.saturating_sub(1);
                    }
                }
            }
        }
    }

    /// The four win rules, in order. Later rules overwrite earlier ones.
    fn evaluate_win_conditions(&mut self) {
        // 1. No living Queen on any plane: the empire has fallen.
        let queens_alive = BoardId::ALL.iter().any(|&b| self.board(b).has_living_queen());
        if !queens_alive {
            self.set_winner(Faction::Red);
        }

        // 2. The republic collapses when its people turn on the war.
        if self.finances(Faction::Red).popular_opinion() < RED_OPINION_FLOOR {
            self.set_winner(Faction::Blue);
        }

        // 3. Debt bleeds opinion, for both factions independently.
        for faction in Faction::BOTH {
            if self.finances(faction).bank <= 0 {
                self.finances_mut(faction).decrease_opinion(DEBT_OPINION_PENALTY);
            }
        }

        // 4. A bankrupt empire with no popular support is finished.
        let blue = self.finances(Faction::Blue);
        if blue.bank < 0 && blue.popular_opinion() <= 0.0 {
            self.set_winner(Faction::Red);
        }
    }

    /// Succession: replace a uniformly chosen surviving red pawn with a new
    /// President, in place. With no pawn left, blue wins on the spot.
    pub(crate) fn promote_random_pawn(&mut self) {
        let pawns: Vec<_> = self
            .board(BoardId::Primary)
            .pieces()
            .filter(|(_, p)| p.kind == PieceKind::Pawn && p.faction == Faction::Red)
            .map(|(pos, _)| pos)
            .collect();

        if pawns.is_empty() {
            tracing::debug!("no pawn available for succession");
            self.set_winner(Faction::Blue);
            return;
        }

        let index = self.rng_mut().gen_range_usize(0..pawns.len());
        let pos = pawns[index];
        self.board_mut(BoardId::Primary)
            .put_piece(pos, Piece::new(PieceKind::President, Faction::Red));
        tracing::debug!(%pos, "pawn promoted to president");
    }
}
