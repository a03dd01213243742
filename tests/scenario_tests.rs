//! End-to-end scenarios driven through the public intent API.

use planechess::{
    Annotation, BoardId, Faction, FinancialSituation, Game, GameError, ItemId, Layout, Piece,
    PieceKind, Position, Upgrade,
};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn annotation(game: &Game, board: BoardId, p: Position) -> Option<Annotation> {
    game.tile(board, p).unwrap().annotation
}

fn piece_at(game: &Game, board: BoardId, p: Position) -> Option<Piece> {
    game.tile(board, p).unwrap().piece.clone()
}

/// A red pawn on its home row has the two-step option exactly once.
#[test]
fn test_pawn_two_step_disappears_after_first_move() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(1, 0), Piece::new(PieceKind::Pawn, Faction::Red))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue))
        .with_piece(BoardId::Primary, pos(8, 9), Piece::new(PieceKind::Pawn, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(3);

    game.select(BoardId::Primary, pos(1, 0)).unwrap();
    assert_eq!(annotation(&game, BoardId::Primary, pos(2, 0)), Some(Annotation::Move));
    assert_eq!(annotation(&game, BoardId::Primary, pos(3, 0)), Some(Annotation::Move));
    assert_eq!(annotation(&game, BoardId::Primary, pos(4, 0)), None);

    game.commit_move(pos(2, 0)).unwrap();
    assert_eq!(game.active_faction(), Faction::Blue);

    // Blue spends its turn elsewhere.
    game.select(BoardId::Primary, pos(8, 9)).unwrap();
    game.commit_move(pos(7, 9)).unwrap();

    game.select(BoardId::Primary, pos(2, 0)).unwrap();
    assert_eq!(annotation(&game, BoardId::Primary, pos(3, 0)), Some(Annotation::Move));
    assert_eq!(annotation(&game, BoardId::Primary, pos(4, 0)), None);
}

/// An archer grinds a shielded pawn down over two shots, with a reload in
/// between, and the kill lands the pawn in the underworld.
#[test]
fn test_archer_shield_then_kill() {
    let mut shielded_pawn = Piece::new(PieceKind::Pawn, Faction::Blue);
    shielded_pawn.shield = 1;

    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(5, 5), Piece::new(PieceKind::Archer, Faction::Red))
        .with_piece(BoardId::Primary, pos(5, 2), shielded_pawn)
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue))
        .with_piece(BoardId::Primary, pos(8, 0), Piece::new(PieceKind::Pawn, Faction::Blue))
        .with_piece(BoardId::Primary, pos(1, 9), Piece::new(PieceKind::Pawn, Faction::Red));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(3);

    // Manhattan distance 3: a hit target.
    game.select(BoardId::Primary, pos(5, 5)).unwrap();
    assert_eq!(annotation(&game, BoardId::Primary, pos(5, 2)), Some(Annotation::ArcherHit));

    // First shot burns the shield, nobody dies.
    game.fire_archer(pos(5, 2)).unwrap();
    let pawn = piece_at(&game, BoardId::Primary, pos(5, 2)).unwrap();
    assert_eq!(pawn.shield, 0);

    // Blue moves; the archer is still reloading on red's next turn.
    game.select(BoardId::Primary, pos(8, 0)).unwrap();
    game.commit_move(pos(7, 0)).unwrap();

    game.select(BoardId::Primary, pos(5, 5)).unwrap();
    assert_eq!(annotation(&game, BoardId::Primary, pos(5, 5)), Some(Annotation::Reloading));
    assert_eq!(annotation(&game, BoardId::Primary, pos(5, 2)), None);

    // Red and blue each spend a turn; the archer finishes reloading.
    game.select(BoardId::Primary, pos(1, 9)).unwrap();
    game.commit_move(pos(2, 9)).unwrap();
    game.select(BoardId::Primary, pos(7, 0)).unwrap();
    game.commit_move(pos(6, 0)).unwrap();

    // Second shot kills; the pawn crosses over at the same coordinates.
    game.select(BoardId::Primary, pos(5, 5)).unwrap();
    game.fire_archer(pos(5, 2)).unwrap();

    assert!(piece_at(&game, BoardId::Primary, pos(5, 2)).is_none());
    let fallen = piece_at(&game, BoardId::Underworld, pos(5, 2)).unwrap();
    assert_eq!(fallen.kind, PieceKind::Pawn);
    assert_eq!(fallen.faction, Faction::Blue);
    assert_eq!(fallen.shield, 0);
    assert_eq!(game.winner(), None);
}

/// Capturing the President promotes a surviving pawn in place and costs red
/// dearly in popular opinion.
#[test]
fn test_president_succession_with_pawn() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(0, 4), Piece::new(PieceKind::President, Faction::Red))
        .with_piece(BoardId::Primary, pos(1, 0), Piece::new(PieceKind::Pawn, Faction::Red))
        .with_piece(BoardId::Primary, pos(5, 4), Piece::new(PieceKind::Rook, Faction::Blue))
        .with_piece(BoardId::Primary, pos(9, 9), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Blue).build(7);

    game.select(BoardId::Primary, pos(5, 4)).unwrap();
    game.commit_move(pos(0, 4)).unwrap();

    let successor = piece_at(&game, BoardId::Primary, pos(1, 0)).unwrap();
    assert_eq!(successor.kind, PieceKind::President);
    assert_eq!(successor.faction, Faction::Red);

    assert!((game.finances(Faction::Red).popular_opinion() - 0.65).abs() < 1e-9);
    assert_eq!(game.winner(), None);

    // The fallen President waits in the underworld.
    let fallen = piece_at(&game, BoardId::Underworld, pos(0, 4)).unwrap();
    assert_eq!(fallen.kind, PieceKind::President);
}

/// With no pawn to promote, the republic is decapitated and blue wins on
/// the spot.
#[test]
fn test_president_death_without_pawns_ends_match() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(0, 4), Piece::new(PieceKind::President, Faction::Red))
        .with_piece(BoardId::Primary, pos(5, 4), Piece::new(PieceKind::Rook, Faction::Blue))
        .with_piece(BoardId::Primary, pos(9, 9), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Blue).build(7);

    game.select(BoardId::Primary, pos(5, 4)).unwrap();
    game.commit_move(pos(0, 4)).unwrap();

    assert_eq!(game.winner(), Some(Faction::Blue));
}

/// Red opinion slipping under a quarter during turn resolution loses the
/// match, even when red itself caused the slip.
#[test]
fn test_red_opinion_collapse_on_own_action() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue))
        .with_piece(BoardId::Primary, pos(0, 0), Piece::new(PieceKind::Rook, Faction::Red));
    let mut game = Game::builder()
        .layout(layout)
        .faction_finances(Faction::Red, FinancialSituation::new(1000, 10, 0.26))
        .first_turn(Faction::Red)
        .build(5);

    game.force_tax_increase().unwrap();

    assert!(game.finances(Faction::Red).popular_opinion() < 0.25);
    assert_eq!(game.winner(), Some(Faction::Blue));
}

/// Shield purchase arithmetic: +2 shield, cost deducted, turn spent.
#[test]
fn test_shield_purchase() {
    let mut veteran = Piece::new(PieceKind::Pawn, Faction::Red);
    veteran.shield = 1;

    let layout = Layout::empty()
        .with_shop(BoardId::Primary, pos(4, 4))
        .with_piece(BoardId::Primary, pos(4, 4), veteran)
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder()
        .layout(layout)
        .faction_finances(Faction::Red, FinancialSituation::new(300, 10, 1.0))
        .first_turn(Faction::Red)
        .build(5);

    game.buy(ItemId::SHIELD, BoardId::Primary, pos(4, 4)).unwrap();

    let buyer = piece_at(&game, BoardId::Primary, pos(4, 4)).unwrap();
    assert_eq!(buyer.shield, 3);
    assert_eq!(buyer.upgrades.as_slice(), &[Upgrade::Shield]);
    assert_eq!(game.finances(Faction::Red).bank, 50);
    assert_eq!(game.active_faction(), Faction::Blue);
    assert_eq!(game.winner(), None);
}

/// A captured piece crosses over unchanged: kind, faction, shield and
/// upgrades all intact.
#[test]
fn test_capture_round_trips_to_underworld() {
    let mut rook = Piece::new(PieceKind::Rook, Faction::Red);
    rook.shield = 2;
    rook.upgrades.push(Upgrade::Shield);
    let expected = rook.clone();

    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(3, 3), rook)
        .with_piece(BoardId::Primary, pos(4, 4), Piece::new(PieceKind::Elephant, Faction::Blue))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Blue).build(2);

    game.select(BoardId::Primary, pos(4, 4)).unwrap();
    game.commit_move(pos(3, 3)).unwrap();

    assert_eq!(piece_at(&game, BoardId::Underworld, pos(3, 3)), Some(expected));
    let attacker = piece_at(&game, BoardId::Primary, pos(3, 3)).unwrap();
    assert_eq!(attacker.kind, PieceKind::Elephant);
}

/// A Queen holding the underworld tile blocks the transfer; the victim is
/// destroyed outright.
#[test]
fn test_queen_below_blocks_transfer() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(3, 3), Piece::new(PieceKind::Rook, Faction::Red))
        .with_piece(BoardId::Primary, pos(4, 4), Piece::new(PieceKind::Elephant, Faction::Blue))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue))
        .with_piece(BoardId::Underworld, pos(3, 3), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Blue).build(2);

    game.select(BoardId::Primary, pos(4, 4)).unwrap();
    game.commit_move(pos(3, 3)).unwrap();

    let below = piece_at(&game, BoardId::Underworld, pos(3, 3)).unwrap();
    assert_eq!(below.kind, PieceKind::Queen);

    let rooks = BoardId::ALL
        .iter()
        .flat_map(|&b| game.board(b).pieces().map(|(_, p)| p.kind).collect::<Vec<_>>())
        .filter(|&k| k == PieceKind::Rook)
        .count();
    assert_eq!(rooks, 0);
}

/// Wizards never cross over; their first death is final.
#[test]
fn test_wizard_dies_for_good() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(3, 3), Piece::new(PieceKind::Wizard, Faction::Blue))
        .with_piece(BoardId::Primary, pos(4, 4), Piece::new(PieceKind::Elephant, Faction::Red))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(2);

    game.select(BoardId::Primary, pos(4, 4)).unwrap();
    game.commit_move(pos(3, 3)).unwrap();

    assert!(piece_at(&game, BoardId::Underworld, pos(3, 3)).is_none());
    // Blue loses opinion for a non-pawn piece.
    assert!((game.finances(Faction::Blue).popular_opinion() - 0.95).abs() < 1e-9);
}

/// A wizard hops planes at matching coordinates, capturing whatever is in
/// the way, and can later be inspected on the other side.
#[test]
fn test_wizard_interplanar_travel() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(2, 2), Piece::new(PieceKind::Wizard, Faction::Red))
        .with_piece(BoardId::Underworld, pos(2, 2), Piece::new(PieceKind::Pawn, Faction::Blue))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(2);

    game.select(BoardId::Primary, pos(2, 2)).unwrap();
    assert_eq!(annotation(&game, BoardId::Underworld, pos(2, 2)), Some(Annotation::Capture));

    game.travel(BoardId::Underworld, pos(2, 2)).unwrap();

    let wizard = piece_at(&game, BoardId::Underworld, pos(2, 2)).unwrap();
    assert_eq!(wizard.kind, PieceKind::Wizard);
    assert!(piece_at(&game, BoardId::Primary, pos(2, 2)).is_none());
    // The bystander died on the underworld: gone for good.
    assert_eq!(
        game.board(BoardId::Underworld).pieces().count(),
        1,
        "only the wizard remains below"
    );
}

/// Once a winner is assigned, every mutating intent is rejected.
#[test]
fn test_match_over_rejects_intents() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(4, 4), Piece::new(PieceKind::Rook, Faction::Red))
        .with_piece(BoardId::Primary, pos(8, 8), Piece::new(PieceKind::Pawn, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(2);

    // No queens anywhere: red wins at the first turn transition.
    game.select(BoardId::Primary, pos(4, 4)).unwrap();
    game.commit_move(pos(4, 5)).unwrap();
    assert_eq!(game.winner(), Some(Faction::Red));

    assert_eq!(
        game.select(BoardId::Primary, pos(8, 8)).unwrap_err(),
        GameError::MatchOver(Faction::Red)
    );
    assert_eq!(game.force_tax_increase().unwrap_err(), GameError::MatchOver(Faction::Red));
    assert_eq!(game.commit_move(pos(7, 8)).unwrap_err(), GameError::MatchOver(Faction::Red));
}

/// Rejected intents leave the match untouched.
#[test]
fn test_rejection_mutates_nothing() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(4, 4), Piece::new(PieceKind::Rook, Faction::Red))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(2);

    game.select(BoardId::Primary, pos(4, 4)).unwrap();
    let before = serde_json::to_string(game.board(BoardId::Primary)).unwrap();

    // Destination not in the legal set.
    assert_eq!(
        game.commit_move(pos(0, 7)).unwrap_err(),
        GameError::InvalidMove(pos(0, 7))
    );
    assert_eq!(serde_json::to_string(game.board(BoardId::Primary)).unwrap(), before);
    assert_eq!(game.active_faction(), Faction::Red);
    assert!(game.history().is_empty());
}

/// Every accepted intent lands in the history with its acting faction.
#[test]
fn test_history_records_intents() {
    let layout = Layout::empty()
        .with_piece(BoardId::Primary, pos(1, 0), Piece::new(PieceKind::Pawn, Faction::Red))
        .with_piece(BoardId::Primary, pos(9, 4), Piece::new(PieceKind::Queen, Faction::Blue));
    let mut game = Game::builder().layout(layout).first_turn(Faction::Red).build(2);

    game.select(BoardId::Primary, pos(1, 0)).unwrap();
    game.commit_move(pos(2, 0)).unwrap();
    game.force_tax_increase().unwrap();

    assert_eq!(game.history().len(), 2);
    let first = &game.history()[0];
    assert_eq!(first.faction, Faction::Red);
    assert_eq!(first.turn, 1);
    let second = &game.history()[1];
    assert_eq!(second.faction, Faction::Blue);
    assert_eq!(second.turn, 2);
}
