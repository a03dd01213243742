//! # planechess
//!
//! The rules engine of a two-faction, turn-based strategy game played
//! across two parallel 10×10 board planes, with an attached economy and an
//! item/upgrade shop.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: no rendering, input handling, routing or assets.
//!    A presentation layer reads state through the accessors on
//!    [`game::Game`] and submits intents through its mutating operations.
//!
//! 2. **Deterministic**: every random draw - the opening turn pick,
//!    succession, gambles, finance bonuses - comes from one seeded
//!    [`core::GameRng`]. Same seed, same intents, same match.
//!
//! 3. **One turn per intent**: every accepted mutating intent finalizes by
//!    ending the turn exactly once. There are no multi-action turns and no
//!    partially applied intents.
//!
//! 4. **Variants without inheritance**: the ten piece variants and the shop
//!    items are discriminated enums dispatched through `match` - behavior
//!    tables, not class hierarchies.
//!
//! ## Modules
//!
//! - `core`: coordinates, factions, RNG, error kinds
//! - `board`: tiles, affordance annotations, the per-plane grid
//! - `pieces`: piece variants and movement computation
//! - `economy`: per-faction bank, tax and popular opinion
//! - `shop`: per-plane item catalogs
//! - `game`: the match controller - setup, selection, intents, turns

pub mod board;
pub mod core;
pub mod economy;
pub mod game;
pub mod pieces;
pub mod shop;

// Re-export commonly used types
pub use crate::core::{Faction, GameError, GameRng, GameRngState, Position, BOARD_SIZE};

pub use crate::board::{Annotation, Board, BoardId, Tile, TileKind};

pub use crate::pieces::{Piece, PieceKind, ARCHER_COOLDOWN};

pub use crate::economy::FinancialSituation;

pub use crate::shop::{ActionKind, Catalog, ItemId, ItemKind, ShopItem, Upgrade};

pub use crate::game::{Game, GameBuilder, Intent, IntentRecord, Layout, PurchaseOutcome};
