//! Shop catalogs: purchasable upgrades and one-shot actions.
//!
//! Each plane carries its own fixed catalog. Items come in two kinds:
//! upgrades attach to the buying piece and modify its behavior for the rest
//! of its life, actions execute once at purchase time. The catalog is pure
//! data - attach hooks, overlays and death effects are dispatched on
//! [`Upgrade`] / [`ActionKind`] by the match controller.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::BoardId;

/// Unique identifier for a shop item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub const WALKING_STICK: ItemId = ItemId(0);
    pub const SHIELD: ItemId = ItemId(1);
    pub const BOMB: ItemId = ItemId(2);
    pub const CONSCRIPTION: ItemId = ItemId(3);
    pub const REVIVE: ItemId = ItemId(4);
    pub const GAMBLE: ItemId = ItemId(5);
    pub const FINANCIAL_EDUCATION: ItemId = ItemId(6);
    pub const MASS_REVIVE: ItemId = ItemId(7);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// An upgrade attachable to a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Upgrade {
    /// Extends forward reach one tile past the annotated run.
    WalkingStick,
    /// Grants +2 shield on attach.
    Shield,
    /// On death, destroys every adjacent piece outright.
    Bomb,
    /// Grants the finance affordance; costs opinion on death.
    FinancialEducation,
}

/// A one-shot purchasable action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Summon a pawn on the buyer's home row.
    Conscription,
    /// Return the buying piece to the primary plane.
    Revive,
    /// Coin flip for 2000.
    Gamble,
    /// Revive every same-faction piece on the buyer's plane.
    MassRevive,
}

/// What buying an item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Upgrade(Upgrade),
    Action(ActionKind),
}

/// A catalog entry.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: &'static str,
    pub cost: i64,
    pub description: &'static str,
    pub kind: ItemKind,
}

/// The items one plane offers.
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<ShopItem>,
    index: FxHashMap<ItemId, usize>,
}

impl Catalog {
    fn new(items: Vec<ShopItem>) -> Self {
        let index = items.iter().enumerate().map(|(i, item)| (item.id, i)).collect();
        Self { items, index }
    }

    /// The catalog a plane offers.
    #[must_use]
    pub fn for_plane(board: BoardId) -> Self {
        match board {
            BoardId::Primary => Self::new(vec![
                ShopItem {
                    id: ItemId::WALKING_STICK,
                    name: "Walking Stick",
                    cost: 100,
                    description: "Lets the piece move one tile further forward than \
                                  usually permitted. This includes immobile pieces.",
                    kind: ItemKind::Upgrade(Upgrade::WalkingStick),
                },
                ShopItem {
                    id: ItemId::SHIELD,
                    name: "Shield",
                    cost: 250,
                    description: "Protects the wearer from 2 archer shots.",
                    kind: ItemKind::Upgrade(Upgrade::Shield),
                },
                ShopItem {
                    id: ItemId::BOMB,
                    name: "Bomb",
                    cost: 500,
                    description: "When this piece dies, every piece adjacent to it is \
                                  destroyed for good. The attacker survives.",
                    kind: ItemKind::Upgrade(Upgrade::Bomb),
                },
                ShopItem {
                    id: ItemId::CONSCRIPTION,
                    name: "Conscription",
                    cost: 1000,
                    description: "Summons a pawn on your starting row. Does nothing if \
                                  the row is full. Hurts popular opinion either way.",
                    kind: ItemKind::Action(ActionKind::Conscription),
                },
            ]),
            BoardId::Underworld => Self::new(vec![
                ShopItem {
                    id: ItemId::REVIVE,
                    name: "Revive",
                    cost: 666,
                    description: "Brings the buying piece back to the position it died \
                                  in. Whatever stands there now dies instead. A revived \
                                  President returns as a pawn.",
                    kind: ItemKind::Action(ActionKind::Revive),
                },
                ShopItem {
                    id: ItemId::GAMBLE,
                    name: "Gamble",
                    cost: 1000,
                    description: "Double or nothing!",
                    kind: ItemKind::Action(ActionKind::Gamble),
                },
                ShopItem {
                    id: ItemId::FINANCIAL_EDUCATION,
                    name: "Financial Education",
                    cost: 6666,
                    description: "Lets the piece be used like the finance minister. You \
                                  will need to leave the shop before using it.",
                    kind: ItemKind::Upgrade(Upgrade::FinancialEducation),
                },
                ShopItem {
                    id: ItemId::MASS_REVIVE,
                    name: "Mass Revive",
                    cost: 66666,
                    description: "Revive all pieces of your color.",
                    kind: ItemKind::Action(ActionKind::MassRevive),
                },
            ]),
        }
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ShopItem> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    /// Check if an item ID is offered here.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate the items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ShopItem> {
        self.items.iter()
    }

    /// Number of items offered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_catalog() {
        let catalog = Catalog::for_plane(BoardId::Primary);
        assert_eq!(catalog.len(), 4);

        let shield = catalog.get(ItemId::SHIELD).unwrap();
        assert_eq!(shield.cost, 250);
        assert_eq!(shield.kind, ItemKind::Upgrade(Upgrade::Shield));

        assert!(catalog.contains(ItemId::CONSCRIPTION));
        assert!(!catalog.contains(ItemId::REVIVE));
    }

    #[test]
    fn test_underworld_catalog() {
        let catalog = Catalog::for_plane(BoardId::Underworld);
        assert_eq!(catalog.len(), 4);

        let revive = catalog.get(ItemId::REVIVE).unwrap();
        assert_eq!(revive.cost, 666);
        assert_eq!(revive.kind, ItemKind::Action(ActionKind::Revive));

        assert_eq!(catalog.get(ItemId::MASS_REVIVE).unwrap().cost, 66666);
        assert!(!catalog.contains(ItemId::BOMB));
    }

    #[test]
    fn test_upgrades_and_actions_split() {
        for board in BoardId::ALL {
            let catalog = Catalog::for_plane(board);
            for item in catalog.iter() {
                match item.kind {
                    ItemKind::Upgrade(_) | ItemKind::Action(_) => {}
                }
                assert!(item.cost > 0);
                assert!(!item.name.is_empty());
            }
        }
    }

    #[test]
    fn test_item_display() {
        assert_eq!(format!("{}", ItemId::GAMBLE), "Item(5)");
    }
}
