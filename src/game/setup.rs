//! Match construction.
//!
//! A match is built explicitly from a layout descriptor and a seed - no
//! module-level singletons, no ambient randomness. The default layout is
//! the standard opening position; tests hand in sparse layouts to set up
//! exact situations.

use im::Vector;

use crate::board::{Board, BoardId};
use crate::core::{Faction, GameRng, Position, BOARD_SIZE};
use crate::economy::FinancialSituation;
use crate::pieces::{Piece, PieceKind};
use crate::shop::Catalog;

use super::Game;

/// Initial board contents.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pieces: Vec<(BoardId, Position, Piece)>,
    removed: Vec<(BoardId, Position)>,
    shops: Vec<(BoardId, Position)>,
}

impl Layout {
    /// A layout with no pieces, no shops, no removed tiles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard opening position.
    ///
    /// Back ranks mirror each other except for the leader pair: red fields
    /// a President and a Finance Minister where blue fields its two Queens.
    /// Pawns fill each faction's home row. The primary plane loses one
    /// historical square at (4, 7) and gains a 2×2 central shop; the
    /// underworld starts empty apart from its own shop.
    #[must_use]
    pub fn standard() -> Self {
        let mut layout = Self::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Elephant,
            PieceKind::Archer,
            PieceKind::Wizard,
            PieceKind::President,
            PieceKind::FinanceMinister,
            PieceKind::Pope,
            PieceKind::Archer,
            PieceKind::Elephant,
            PieceKind::Rook,
        ];

        for (col, &kind) in back_rank.iter().enumerate() {
            let col = col as u8;
            layout = layout.with_piece(BoardId::Primary, Position::new(0, col), Piece::new(kind, Faction::Red));

            let blue_kind = match kind {
                PieceKind::President | PieceKind::FinanceMinister => PieceKind::Queen,
                other => other,
            };
            layout = layout.with_piece(
                BoardId::Primary,
                Position::new(9, col),
                Piece::new(blue_kind, Faction::Blue),
            );
        }

        for col in 0..BOARD_SIZE {
            layout = layout
                .with_piece(
                    BoardId::Primary,
                    Position::new(Faction::Red.home_row(), col),
                    Piece::new(PieceKind::Pawn, Faction::Red),
                )
                .with_piece(
                    BoardId::Primary,
                    Position::new(Faction::Blue.home_row(), col),
                    Piece::new(PieceKind::Pawn, Faction::Blue),
                );
        }

        // The square that was removed from the game.
        layout = layout.with_removed(BoardId::Primary, Position::new(4, 7));

        for board in BoardId::ALL {
            for row in [4, 5] {
                for col in [4, 5] {
                    layout = layout.with_shop(board, Position::new(row, col));
                }
            }
        }

        layout
    }

    /// Place a piece.
    #[must_use]
    pub fn with_piece(mut self, board: BoardId, pos: Position, piece: Piece) -> Self {
        self.pieces.push((board, pos, piece));
        self
    }

    /// Mark a tile permanently unplayable.
    #[must_use]
    pub fn with_removed(mut self, board: BoardId, pos: Position) -> Self {
        self.removed.push((board, pos));
        self
    }

    /// Mark a tile as a shop entrance.
    #[must_use]
    pub fn with_shop(mut self, board: BoardId, pos: Position) -> Self {
        self.shops.push((board, pos));
        self
    }
}

/// Builder for a [`Game`].
///
/// ```
/// use planechess::game::Game;
///
/// let game = Game::builder().starting_bank(500).build(42);
/// assert!(game.winner().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    layout: Layout,
    starting_bank: i64,
    starting_tax: u32,
    starting_opinion: f64,
    finance_overrides: [Option<FinancialSituation>; 2],
    first_turn: Option<Faction>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            layout: Layout::standard(),
            starting_bank: 1000,
            starting_tax: 10,
            starting_opinion: 1.0,
            finance_overrides: [None, None],
            first_turn: None,
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the initial layout.
    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Starting bank balance for both factions.
    #[must_use]
    pub fn starting_bank(mut self, bank: i64) -> Self {
        self.starting_bank = bank;
        self
    }

    /// Starting tax for both factions.
    #[must_use]
    pub fn starting_tax(mut self, tax: u32) -> Self {
        self.starting_tax = tax;
        self
    }

    /// Starting popular opinion for both factions.
    #[must_use]
    pub fn starting_opinion(mut self, opinion: f64) -> Self {
        self.starting_opinion = opinion;
        self
    }

    /// Override one faction's starting finances entirely.
    #[must_use]
    pub fn faction_finances(mut self, faction: Faction, finances: FinancialSituation) -> Self {
        self.finance_overrides[faction.index()] = Some(finances);
        self
    }

    /// Force the opening faction instead of drawing it from the RNG.
    #[must_use]
    pub fn first_turn(mut self, faction: Faction) -> Self {
        self.first_turn = Some(faction);
        self
    }

    /// Build the match. The seed fixes every random draw of the playout.
    #[must_use]
    pub fn build(self, seed: u64) -> Game {
        let mut rng = GameRng::new(seed);
        let turn = self.first_turn.unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                Faction::Red
            } else {
                Faction::Blue
            }
        });

        let mut boards = [Board::new(BoardId::Primary), Board::new(BoardId::Underworld)];
        for (board, pos) in &self.layout.removed {
            boards[board.index()].mark_removed(*pos);
        }
        for (board, pos) in &self.layout.shops {
            boards[board.index()].mark_shop(*pos);
        }
        for (board, pos, piece) in self.layout.pieces {
            if boards[board.index()].playable(pos).is_some() {
                boards[board.index()].put_piece(pos, piece);
            }
        }

        let default_finances =
            FinancialSituation::new(self.starting_bank, self.starting_tax, self.starting_opinion);
        let [red_override, blue_override] = self.finance_overrides;
        let finances = [
            red_override.unwrap_or_else(|| default_finances.clone()),
            blue_override.unwrap_or(default_finances),
        ];

        Game {
            boards,
            finances,
            catalogs: [
                Catalog::for_plane(BoardId::Primary),
                Catalog::for_plane(BoardId::Underworld),
            ],
            turn,
            turn_number: 1,
            selected: None,
            winner: None,
            rng,
            history: Vector::new(),
        }
    }
}
