//! Shared fixtures for the in-crate test modules.
use super::*;

/// A dealt n-player game with deterministic shuffling, plus the seat ids in
/// turn order.
pub fn fresh(n: usize) -> (Game, Vec<PlayerId>) {
    let ids = (0..n).map(|_| PlayerId::default()).collect::<Vec<_>>();
    let mut game = Game::seeded(MatchSettings::default(), 0xC0FFEE);
    for (i, &id) in ids.iter().enumerate() {
        game.seat(id, format!("P{}", i)).unwrap();
    }
    game.start().unwrap();
    (game, ids)
}

/// Same, with the Inquisitor variant on.
pub fn fresh_inquisitor(n: usize) -> (Game, Vec<PlayerId>) {
    let ids = (0..n).map(|_| PlayerId::default()).collect::<Vec<_>>();
    let mut game = Game::seeded(
        MatchSettings {
            use_inquisitor: true,
        },
        0xC0FFEE,
    );
    for (i, &id) in ids.iter().enumerate() {
        game.seat(id, format!("P{}", i)).unwrap();
    }
    game.start().unwrap();
    (game, ids)
}

/// Token conservation: every role token is either in the deck or in a hand.
pub fn conserved(game: &Game) -> bool {
    game.deck().len() + game.roster().cards_held() == Deck::copies(game.roster().len()) * 5
}

/// First unrevealed card in a player's hand.
pub fn influence_card(game: &Game, id: PlayerId) -> CardId {
    game.roster()
        .get(id)
        .and_then(|p| p.hand().iter().find(|c| c.is_influence()))
        .map(Card::id)
        .expect("influence remains")
}

/// Resolves the open penalty by flipping the victim's first influence.
pub fn concede(game: &mut Game, id: PlayerId) {
    let card = influence_card(game, id);
    game.resolve_penalty(id, card).unwrap();
}
