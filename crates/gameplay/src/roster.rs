use super::Player;
use super::PlayerId;
use coup_core::Unique;
use serde::Serialize;

/// Fixed-order player registry.
///
/// Seating order is insertion order and never changes; eliminated players
/// keep their seat so the turn walk and the public roster stay stable.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<Player>);

impl Roster {
    pub fn seat(&mut self, player: Player) {
        self.0.push(player);
    }
    /// Removes a seat entirely (lobby departures only).
    pub fn unseat(&mut self, id: PlayerId) {
        self.0.retain(|p| p.id() != id);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.0.iter().find(|p| p.id() == id)
    }
    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.0.iter_mut().find(|p| p.id() == id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.0.iter_mut()
    }
    /// Seating order as ids.
    pub fn order(&self) -> Vec<PlayerId> {
        self.0.iter().map(|p| p.id()).collect()
    }
    pub fn alive_count(&self) -> usize {
        self.0.iter().filter(|p| p.alive()).count()
    }
    /// The sole survivor, once only one remains.
    pub fn survivor(&self) -> Option<&Player> {
        match self.alive_count() {
            1 => self.0.iter().find(|p| p.alive()),
            _ => None,
        }
    }
    /// Cards held across all hands (token conservation partner to the deck).
    pub fn cards_held(&self) -> usize {
        self.0.iter().map(|p| p.hand().len()).sum()
    }
    /// Walks seating order starting after `from`, skipping dead players and
    /// `exclude` (a player eliminated in the current transaction whose hand
    /// write may not be observed yet). Returns `from` unchanged when no other
    /// candidate exists, which signals the match should already be over.
    pub fn next_alive_after(&self, from: PlayerId, exclude: Option<PlayerId>) -> PlayerId {
        let order = self.order();
        let Some(start) = order.iter().position(|&id| id == from) else {
            return from;
        };
        (1..order.len())
            .map(|step| order[(start + step) % order.len()])
            .find(|&id| {
                Some(id) != exclude && self.get(id).map(Player::alive).unwrap_or(false)
            })
            .unwrap_or(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn roster(n: usize) -> (Roster, Vec<PlayerId>) {
        let mut roster = Roster::default();
        let ids = (0..n).map(|_| PlayerId::default()).collect::<Vec<_>>();
        for (i, &id) in ids.iter().enumerate() {
            let mut player = Player::new(id, format!("P{}", i));
            player.deal([Role::Duke, Role::Contessa]);
            roster.seat(player);
        }
        (roster, ids)
    }

    fn eliminate(roster: &mut Roster, id: PlayerId) {
        roster.get_mut(id).unwrap().strip();
    }

    #[test]
    fn rotation_follows_seating_order() {
        let (roster, ids) = roster(4);
        assert_eq!(roster.next_alive_after(ids[0], None), ids[1]);
        assert_eq!(roster.next_alive_after(ids[3], None), ids[0]);
    }
    #[test]
    fn rotation_skips_the_dead() {
        let (mut roster, ids) = roster(4);
        eliminate(&mut roster, ids[1]);
        assert_eq!(roster.next_alive_after(ids[0], None), ids[2]);
    }
    #[test]
    fn rotation_skips_the_excluded() {
        let (roster, ids) = roster(3);
        assert_eq!(roster.next_alive_after(ids[0], Some(ids[1])), ids[2]);
    }
    #[test]
    fn rotation_returns_from_when_alone() {
        let (mut roster, ids) = roster(3);
        eliminate(&mut roster, ids[1]);
        eliminate(&mut roster, ids[2]);
        assert_eq!(roster.next_alive_after(ids[0], None), ids[0]);
    }
    #[test]
    fn survivor_requires_exactly_one_alive() {
        let (mut roster, ids) = roster(3);
        assert!(roster.survivor().is_none());
        eliminate(&mut roster, ids[0]);
        eliminate(&mut roster, ids[2]);
        assert_eq!(roster.survivor().map(|p| p.id()), Some(ids[1]));
    }
}
