use coup_gameplay::Game;
use coup_gameplay::PlayerId;
use serde::Serialize;

/// Messages sent from room to client.
///
/// The room is snapshot-driven: after every accepted transition the whole
/// state document goes out and clients re-derive their view from it; there
/// is no client-local authoritative copy. Rejections are unicast back to
/// the offender only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Bulletin {
    /// Connection acknowledged with seat and current host.
    Joined {
        room: String,
        player: PlayerId,
        host: Option<PlayerId>,
    },
    /// The full room document after a transition.
    Snapshot { state: serde_json::Value },
    /// An intent bounced off the rules; state unchanged.
    Rejected { reason: String },
}

impl Bulletin {
    pub fn joined(room: &str, player: PlayerId, host: Option<PlayerId>) -> Self {
        Self::Joined {
            room: room.to_string(),
            player,
            host,
        }
    }
    pub fn snapshot(game: &Game) -> Self {
        Self::Snapshot {
            state: serde_json::to_value(game).expect("serialize room state"),
        }
    }
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize bulletin")
    }
}

impl std::fmt::Display for Bulletin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Bulletin::Joined { player, .. } => write!(f, "joined: {}", player),
            Bulletin::Snapshot { .. } => write!(f, "snapshot"),
            Bulletin::Rejected { reason } => write!(f, "rejected: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coup_gameplay::MatchSettings;

    #[test]
    fn snapshot_carries_the_phase() {
        let game = Game::seeded(MatchSettings::default(), 7);
        let Bulletin::Snapshot { state } = Bulletin::snapshot(&game) else {
            panic!("expected snapshot");
        };
        assert_eq!(state["phase"], "WAITING");
        assert_eq!(state["timer"], 0);
    }
    #[test]
    fn rejection_serializes_with_tag() {
        let json = Bulletin::rejected("not your turn").to_json();
        assert!(json.contains(r#""type":"rejected""#));
        assert!(json.contains("not your turn"));
    }
}
