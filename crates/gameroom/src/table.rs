use super::Bulletin;
use coup_gameplay::PlayerId;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Per-player outbound channels for a room.
///
/// Purely about presence and delivery; who is seated in the game is the
/// roster's business. A closed channel is logged and skipped, never fatal.
#[derive(Debug, Default)]
pub struct Table {
    seats: HashMap<PlayerId, UnboundedSender<Bulletin>>,
}

impl Table {
    /// Attaches (or re-attaches) a player's outbound channel.
    pub fn seat(&mut self, player: PlayerId, sender: UnboundedSender<Bulletin>) {
        self.seats.insert(player, sender);
    }
    pub fn unseat(&mut self, player: PlayerId) {
        self.seats.remove(&player);
    }
    pub fn contains(&self, player: PlayerId) -> bool {
        self.seats.contains_key(&player)
    }
    pub fn len(&self) -> usize {
        self.seats.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
    /// Sends a bulletin to one player.
    pub fn unicast(&self, player: PlayerId, bulletin: Bulletin) {
        log::debug!("[table] unicast to {}: {}", player, bulletin);
        match self.seats.get(&player).map(|inbox| inbox.send(bulletin)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[table] unicast to {} failed: {:?}", player, e),
            None => log::warn!("[table] unicast to {}: no such seat", player),
        }
    }
    /// Sends a bulletin to every connected player.
    pub fn broadcast(&self, bulletin: Bulletin) {
        log::debug!("[table] broadcast: {}", bulletin);
        self.seats.iter().for_each(|(player, inbox)| {
            if let Err(e) = inbox.send(bulletin.clone()) {
                log::warn!("[table] broadcast to {} failed: {:?}", player, e);
            }
        });
    }
}
