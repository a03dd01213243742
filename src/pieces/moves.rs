//! Per-variant movement computation.
//!
//! [`destinations`] is a pure function from a board and an occupied square
//! to the set of legal movement targets, each tagged as a plain relocation
//! or a capture. Ranged targeting (archer), interplanar travel (wizard) and
//! tile affordances (shop, finance, gift) are not movement; the selection
//! cycle layers those on top.

use crate::board::Board;
use crate::core::{Faction, Position, ADJACENT, DIAGONAL, KNIGHT_LEAPS, ORTHOGONAL};

use super::{Piece, PieceKind};

/// A legal movement target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub to: Position,
    /// Whether the destination holds an enemy piece to capture.
    pub capture: bool,
}

/// Compute the movement targets for `piece` standing at `from`.
///
/// Immobile variants (Archer, Queen, FinanceMinister) produce an empty set.
#[must_use]
pub fn destinations(board: &Board, from: Position, piece: &Piece) -> Vec<Target> {
    let mut out = Vec::new();
    match piece.kind {
        PieceKind::Rook => slide(board, from, piece.faction, &ORTHOGONAL, &mut out),
        PieceKind::Wizard => slide(board, from, piece.faction, &DIAGONAL, &mut out),
        PieceKind::Pope => {
            slide(board, from, piece.faction, &ORTHOGONAL, &mut out);
            slide(board, from, piece.faction, &DIAGONAL, &mut out);
        }
        PieceKind::Elephant => elephant(board, from, piece.faction, &mut out),
        PieceKind::President => steps(board, from, piece.faction, &mut out),
        PieceKind::Pawn => pawn(board, from, piece.faction, &mut out),
        PieceKind::Archer | PieceKind::Queen | PieceKind::FinanceMinister => {}
    }
    out
}

/// Slide along each direction until blocked; the first enemy tile is a
/// capture target, a friendly tile just blocks.
fn slide(
    board: &Board,
    from: Position,
    faction: Faction,
    directions: &[(i8, i8)],
    out: &mut Vec<Target>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(pos) = cursor {
            let Some(tile) = board.playable(pos) else { break };
            match &tile.piece {
                None => {
                    out.push(Target {
                        to: pos,
                        capture: false,
                    });
                    cursor = pos.offset(d_row, d_col);
                }
                Some(occupant) => {
                    if occupant.faction != faction {
                        out.push(Target {
                            to: pos,
                            capture: true,
                        });
                    }
                    break;
                }
            }
        }
    }
}

/// One-step king moves onto empty or enemy tiles.
fn steps(board: &Board, from: Position, faction: Faction, out: &mut Vec<Target>) {
    for &(d_row, d_col) in &ADJACENT {
        let Some(pos) = from.offset(d_row, d_col) else { continue };
        let Some(tile) = board.playable(pos) else { continue };
        match &tile.piece {
            None => out.push(Target {
                to: pos,
                capture: false,
            }),
            Some(occupant) if occupant.faction != faction => out.push(Target {
                to: pos,
                capture: true,
            }),
            Some(_) => {}
        }
    }
}

/// Knight leaps onto empty or enemy tiles, plus capture-only strikes on all
/// eight adjacent tiles.
fn elephant(board: &Board, from: Position, faction: Faction, out: &mut Vec<Target>) {
    for &(d_row, d_col) in &ADJACENT {
        let Some(pos) = from.offset(d_row, d_col) else { continue };
        let Some(tile) = board.playable(pos) else { continue };
        if tile.piece.as_ref().is_some_and(|p| p.faction != faction) {
            out.push(Target {
                to: pos,
                capture: true,
            });
        }
    }
    for &(d_row, d_col) in &KNIGHT_LEAPS {
        let Some(pos) = from.offset(d_row, d_col) else { continue };
        let Some(tile) = board.playable(pos) else { continue };
        match &tile.piece {
            None => out.push(Target {
                to: pos,
                capture: false,
            }),
            Some(occupant) if occupant.faction != faction => out.push(Target {
                to: pos,
                capture: true,
            }),
            Some(_) => {}
        }
    }
}

/// One step forward; a two-step option from the home row when both tiles
/// are empty; diagonal one-step captures onto enemy tiles only.
fn pawn(board: &Board, from: Position, faction: Faction, out: &mut Vec<Target>) {
    let direction = faction.pawn_direction();

    if let Some(front) = from.offset(direction, 0) {
        if board.playable(front).is_some_and(|t| t.piece.is_none()) {
            out.push(Target {
                to: front,
                capture: false,
            });

            if from.row == faction.home_row() {
                if let Some(two) = from.offset(2 * direction, 0) {
                    if board.playable(two).is_some_and(|t| t.piece.is_none()) {
                        out.push(Target {
                            to: two,
                            capture: false,
                        });
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(diag) = from.offset(direction, d_col) else { continue };
        let Some(tile) = board.playable(diag) else { continue };
        if tile.piece.as_ref().is_some_and(|p| p.faction != faction) {
            out.push(Target {
                to: diag,
                capture: true,
            });
        }
    }
}
