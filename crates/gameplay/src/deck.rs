use super::Role;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// The court deck: a bag-as-stack of role tokens.
///
/// Built once per match at `copies(player_count) × 5` tokens and conserved
/// thereafter — tokens only ever move between the deck and hands, never get
/// created or destroyed. Draws pop from the tail; returns reshuffle the whole
/// stack so nobody can track a returned card by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck(Vec<Role>);

impl Deck {
    /// Copies of each role for the given table size.
    pub fn copies(player_count: usize) -> usize {
        match player_count {
            0..=6 => 3,
            7..=8 => 4,
            _ => 5,
        }
    }
    /// Builds and shuffles the full court deck for a match.
    pub fn build(player_count: usize, use_inquisitor: bool, rng: &mut SmallRng) -> Self {
        let copies = Self::copies(player_count);
        let mut tokens = Role::lineup(use_inquisitor)
            .iter()
            .flat_map(|&role| std::iter::repeat_n(role, copies))
            .collect::<Vec<_>>();
        tokens.shuffle(rng);
        Self(tokens)
    }
    /// Pops up to `n` tokens from the tail.
    ///
    /// Deck exhaustion degrades to drawing whatever remains rather than
    /// aborting mid-resolution; the shortfall is logged.
    pub fn draw(&mut self, n: usize) -> Vec<Role> {
        if n > self.0.len() {
            log::warn!(
                "[deck] short draw: wanted {}, only {} remain",
                n,
                self.0.len()
            );
        }
        let take = n.min(self.0.len());
        self.0.split_off(self.0.len() - take)
    }
    /// Returns tokens to the deck and reshuffles the entire stack.
    pub fn restock(&mut self, tokens: impl IntoIterator<Item = Role>, rng: &mut SmallRng) {
        self.0.extend(tokens);
        self.0.shuffle(rng);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// How many tokens of a role remain (hidden information; test/diagnostic use).
    pub fn count(&self, role: Role) -> usize {
        self.0.iter().filter(|&&r| r == role).count()
    }
}
