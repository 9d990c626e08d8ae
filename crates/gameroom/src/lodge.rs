use super::*;
use coup_core::ID;
use coup_gameplay::MatchSettings;
use coup_gameplay::PlayerId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Manages active game rooms and their lifecycles.
pub struct Lodge {
    rooms: RwLock<HashMap<ID<Room>, RoomHandle>>,
}

impl Default for Lodge {
    fn default() -> Self {
        Self::new()
    }
}

impl Lodge {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
    /// Opens a room, spawns its actor, and registers a cleanup watcher.
    pub async fn open(self: &Arc<Self>, settings: MatchSettings) -> ID<Room> {
        let id = ID::default();
        let (room, handle) = Room::open(id, settings);
        let (done_tx, done_rx) = oneshot::channel();
        self.rooms.write().await.insert(id, handle);
        tokio::spawn(room.run(done_tx));
        let lodge = self.clone();
        tokio::spawn(async move {
            let _ = done_rx.await;
            let _ = lodge.close(id).await;
            log::info!("[lodge] room {} cleaned up", id);
        });
        log::debug!("[lodge] created room {}", id);
        id
    }
    /// Seats a player and returns their bulletin stream.
    pub async fn join(
        &self,
        id: ID<Room>,
        player: PlayerId,
        name: &str,
    ) -> anyhow::Result<UnboundedReceiver<Bulletin>> {
        let (tx, rx) = unbounded_channel();
        self.post(
            id,
            Post::Join {
                player,
                name: name.to_string(),
                sender: tx,
            },
        )
        .await?;
        Ok(rx)
    }
    /// Delivers a post to a room.
    pub async fn post(&self, id: ID<Room>, post: Post) -> anyhow::Result<()> {
        self.rooms
            .read()
            .await
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("room not found"))?
            .post(post)
            .then_some(())
            .ok_or_else(|| anyhow::anyhow!("room closed"))
    }
    /// Convenience wrapper for a player-scoped intent.
    pub async fn intend(
        &self,
        id: ID<Room>,
        player: PlayerId,
        intent: Intent,
    ) -> anyhow::Result<()> {
        self.post(id, Post::Intent { player, intent }).await
    }
    pub async fn leave(&self, id: ID<Room>, player: PlayerId) -> anyhow::Result<()> {
        self.post(id, Post::Leave { player }).await
    }
    /// Closes a room and removes it from the lodge.
    pub async fn close(&self, id: ID<Room>) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }
    /// Drops rooms idle beyond the cutoff. Dropping the handle closes the
    /// room's inbox, which ends its task.
    pub async fn sweep(&self, max_idle: Duration) -> usize {
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();
        rooms.retain(|id, handle| {
            let keep = handle.idle() <= max_idle;
            if !keep {
                log::info!("[lodge] sweeping idle room {}", id);
            }
            keep
        });
        before - rooms.len()
    }
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coup_gameplay::ActionKind;
    use coup_gameplay::Phase;

    /// Drains bulletins until a snapshot in the wanted phase shows up.
    async fn until_phase(
        rx: &mut UnboundedReceiver<Bulletin>,
        phase: Phase,
    ) -> serde_json::Value {
        let tag = serde_json::to_value(phase).unwrap();
        loop {
            match rx.recv().await.expect("room alive") {
                Bulletin::Snapshot { state } if state["phase"] == tag => return state,
                _ => continue,
            }
        }
    }

    #[tokio::test]
    async fn room_runs_a_turn_end_to_end() {
        let lodge = Arc::new(Lodge::new());
        let id = lodge.open(MatchSettings::default()).await;
        let (alice, bob) = (PlayerId::default(), PlayerId::default());
        let mut a_rx = lodge.join(id, alice, "alice").await.unwrap();
        let mut b_rx = lodge.join(id, bob, "bob").await.unwrap();
        lodge.intend(id, alice, Intent::Start).await.unwrap();
        let state = until_phase(&mut b_rx, Phase::ActionSelect).await;
        assert_eq!(state["turn"], serde_json::to_value(alice).unwrap());
        lodge
            .intend(
                id,
                alice,
                Intent::DeclareAction {
                    kind: ActionKind::Income,
                    target: None,
                },
            )
            .await
            .unwrap();
        loop {
            let state = until_phase(&mut a_rx, Phase::ActionSelect).await;
            if state["turn"] == serde_json::to_value(bob).unwrap() {
                let coins = state["roster"][0]["coins"].as_u64().unwrap();
                assert_eq!(coins, 3);
                break;
            }
        }
    }

    #[tokio::test]
    async fn only_the_host_starts_the_game() {
        let lodge = Arc::new(Lodge::new());
        let id = lodge.open(MatchSettings::default()).await;
        let (alice, bob) = (PlayerId::default(), PlayerId::default());
        let _a_rx = lodge.join(id, alice, "alice").await.unwrap();
        let mut b_rx = lodge.join(id, bob, "bob").await.unwrap();
        lodge.intend(id, bob, Intent::Start).await.unwrap();
        loop {
            match b_rx.recv().await.expect("room alive") {
                Bulletin::Rejected { reason } => {
                    assert!(reason.contains("host"));
                    break;
                }
                _ => continue,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unanswered_tax_resolves_on_timeout() {
        let lodge = Arc::new(Lodge::new());
        let id = lodge.open(MatchSettings::default()).await;
        let (alice, bob) = (PlayerId::default(), PlayerId::default());
        let mut a_rx = lodge.join(id, alice, "alice").await.unwrap();
        let _b_rx = lodge.join(id, bob, "bob").await.unwrap();
        lodge.intend(id, alice, Intent::Start).await.unwrap();
        until_phase(&mut a_rx, Phase::ActionSelect).await;
        lodge
            .intend(
                id,
                alice,
                Intent::DeclareAction {
                    kind: ActionKind::Tax,
                    target: None,
                },
            )
            .await
            .unwrap();
        until_phase(&mut a_rx, Phase::ChallengeWindow).await;
        // Nobody reacts; the countdown runs the window out.
        let state = until_phase(&mut a_rx, Phase::ActionSelect).await;
        assert_eq!(state["roster"][0]["coins"].as_u64().unwrap(), 5);
        assert_eq!(state["turn"], serde_json::to_value(bob).unwrap());
    }

    #[tokio::test]
    async fn leaving_mid_game_awards_the_walkover() {
        let lodge = Arc::new(Lodge::new());
        let id = lodge.open(MatchSettings::default()).await;
        let (alice, bob) = (PlayerId::default(), PlayerId::default());
        let mut a_rx = lodge.join(id, alice, "alice").await.unwrap();
        let mut b_rx = lodge.join(id, bob, "bob").await.unwrap();
        lodge.intend(id, alice, Intent::Start).await.unwrap();
        until_phase(&mut b_rx, Phase::ActionSelect).await;
        lodge.leave(id, alice).await.unwrap();
        let state = until_phase(&mut b_rx, Phase::GameOver).await;
        assert_eq!(state["winner"], serde_json::to_value(bob).unwrap());
        drop(a_rx);
    }

    #[tokio::test]
    async fn last_leave_closes_the_room() {
        let lodge = Arc::new(Lodge::new());
        let id = lodge.open(MatchSettings::default()).await;
        let alice = PlayerId::default();
        let _rx = lodge.join(id, alice, "alice").await.unwrap();
        lodge.leave(id, alice).await.unwrap();
        // The cleanup watcher unregisters the room once its task ends.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(lodge.len().await, 0);
        assert!(lodge.join(id, alice, "alice").await.is_err());
    }

    #[tokio::test]
    async fn sweep_reaps_idle_rooms() {
        let lodge = Arc::new(Lodge::new());
        let _id = lodge.open(MatchSettings::default()).await;
        assert_eq!(lodge.sweep(Duration::from_secs(600)).await, 0);
        assert_eq!(lodge.sweep(Duration::ZERO).await, 1);
        assert_eq!(lodge.len().await, 0);
    }
}
