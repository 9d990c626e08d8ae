use super::Card;
use super::CardId;
use super::Role;
use coup_core::Coins;
use coup_core::ID;
use coup_core::Unique;
use serde::Serialize;

/// Stable player identity, supplied by the session collaborator.
pub type PlayerId = ID<Player>;

/// Canonical per-player record: treasury, hand, and derived liveness.
///
/// Hand order is draw order. A player is alive exactly while some card in
/// their hand is unrevealed; there is no stored flag to drift out of sync.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    coins: Coins,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coins: 0,
            hand: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn coins(&self) -> Coins {
        self.coins
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    /// Alive exactly while some card is still face down.
    pub fn alive(&self) -> bool {
        self.hand.iter().any(Card::is_influence)
    }
    /// Unrevealed cards remaining.
    pub fn influence(&self) -> usize {
        self.hand.iter().filter(|c| c.is_influence()).count()
    }
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id() == id)
    }
    /// First unrevealed card of the given role, if any.
    pub fn influence_of(&self, role: Role) -> Option<CardId> {
        self.hand
            .iter()
            .find(|c| c.is_influence() && c.role() == role)
            .map(|c| c.id())
    }

    pub(crate) fn pay(&mut self, cost: Coins) {
        self.coins -= cost;
    }
    pub(crate) fn earn(&mut self, gain: Coins) {
        self.coins += gain;
    }
    /// Wipes the record back to lobby state.
    pub(crate) fn muster(&mut self) {
        self.coins = 0;
        self.hand.clear();
    }
    /// Appends freshly drawn tokens to the hand, in draw order.
    pub(crate) fn deal(&mut self, tokens: impl IntoIterator<Item = Role>) {
        self.hand.extend(tokens.into_iter().map(Card::new));
    }
    /// Flips the targeted card face up. Returns its role, or None if the id
    /// names no unrevealed card in this hand.
    pub(crate) fn forfeit(&mut self, id: CardId) -> Option<Role> {
        self.hand
            .iter_mut()
            .find(|c| c.id() == id && c.is_influence())
            .map(|c| {
                c.reveal();
                c.role()
            })
    }
    /// Forfeits every remaining influence (voluntary exit).
    pub(crate) fn strip(&mut self) {
        self.hand.iter_mut().for_each(Card::reveal);
    }
    /// Swaps the targeted card for a fresh instance of `role` in the same
    /// slot. Returns the outgoing role, or None if the id is absent.
    pub(crate) fn replace(&mut self, id: CardId, role: Role) -> Option<Role> {
        self.hand
            .iter_mut()
            .find(|c| c.id() == id && c.is_influence())
            .map(|c| std::mem::replace(c, Card::new(role)).role())
    }
    /// Rebuilds the hand as revealed cards plus the kept set, returning the
    /// unrevealed complement to the caller.
    pub(crate) fn retain(&mut self, kept: &[CardId]) -> Vec<Role> {
        let (stay, leave): (Vec<Card>, Vec<Card>) = std::mem::take(&mut self.hand)
            .into_iter()
            .partition(|c| !c.is_influence() || kept.contains(&c.id()));
        self.hand = stay;
        leave.into_iter().map(|c| c.role()).collect()
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
impl Player {
    /// Replaces the hand outright with fresh face-down cards.
    pub(crate) fn rig(&mut self, roles: Vec<Role>) {
        self.hand = roles.into_iter().map(Card::new).collect();
    }
}
