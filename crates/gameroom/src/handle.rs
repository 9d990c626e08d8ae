use super::Post;
use super::Room;
use coup_core::ID;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to communicate with a running room.
///
/// Dropping the last handle closes the room's inbox, which ends its task.
pub struct RoomHandle {
    pub(crate) id: ID<Room>,
    pub(crate) tx: UnboundedSender<Post>,
    pub(crate) active: Arc<RwLock<Instant>>,
}

impl RoomHandle {
    /// Delivers a post to the room. False once the room has shut down.
    pub fn post(&self, post: Post) -> bool {
        self.tx.send(post).is_ok()
    }
    pub fn id(&self) -> ID<Room> {
        self.id
    }
    /// Time since the room last handled traffic.
    pub fn idle(&self) -> Duration {
        self.active
            .read()
            .map(|touched| touched.elapsed())
            .unwrap_or_default()
    }
}
