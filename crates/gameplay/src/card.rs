use super::Role;
use coup_core::ID;
use serde::Deserialize;
use serde::Serialize;

/// Instance identity for a dealt card.
pub type CardId = ID<Card>;

/// A dealt influence card.
///
/// The instance id lets intents target a specific card without relying on
/// hand position, which shifts during exchanges. Once `revealed` flips true
/// it never reverts; a swap replaces the whole card with a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    role: Role,
    revealed: bool,
    id: CardId,
}

impl Card {
    /// Deals a fresh face-down card of the given role.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            revealed: false,
            id: CardId::default(),
        }
    }
    pub fn id(&self) -> CardId {
        self.id
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn revealed(&self) -> bool {
        self.revealed
    }
    /// One unrevealed card is one influence.
    pub fn is_influence(&self) -> bool {
        !self.revealed
    }
    /// Flips the card face up. Irreversible.
    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.revealed {
            write!(f, "{} (revealed)", self.role)
        } else {
            write!(f, "{}", self.role)
        }
    }
}
