use super::Bulletin;
use super::Intent;
use coup_gameplay::PlayerId;
use tokio::sync::mpsc::UnboundedSender;

/// In-process envelope into a room task.
///
/// The transport attaches the authenticated player id here; intents never
/// carry their own identity.
#[derive(Debug)]
pub enum Post {
    /// Seat a player (or re-attach a reconnecting one) with their outbound
    /// channel.
    Join {
        player: PlayerId,
        name: String,
        sender: UnboundedSender<Bulletin>,
    },
    /// Player left the room.
    Leave { player: PlayerId },
    /// A gameplay or lobby command from a seated player.
    Intent { player: PlayerId, intent: Intent },
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Post::Join { player, name, .. } => write!(f, "join {} ({})", player, name),
            Post::Leave { player } => write!(f, "leave {}", player),
            Post::Intent { player, intent } => write!(f, "{} from {}", intent, player),
        }
    }
}
