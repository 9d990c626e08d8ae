use serde::Deserialize;
use serde::Serialize;

/// The turn state machine.
///
/// Initial state is `Waiting`; `GameOver` is terminal until the host resets
/// the room. `ResolveChallenge` is pass-through: arbitration runs
/// synchronously to completion, so clients only ever observe it in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Waiting,
    ActionSelect,
    ChallengeWindow,
    BlockResponse,
    ResolveChallenge,
    Penalty,
    Exchange,
    InquisitorVictimSelect,
    InquisitorDecision,
    GameOver,
}

impl Phase {
    /// Phases with a live countdown.
    pub fn counts_down(&self) -> bool {
        matches!(self, Phase::ChallengeWindow | Phase::BlockResponse)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Waiting => write!(f, "waiting"),
            Phase::ActionSelect => write!(f, "action select"),
            Phase::ChallengeWindow => write!(f, "challenge window"),
            Phase::BlockResponse => write!(f, "block response"),
            Phase::ResolveChallenge => write!(f, "resolving challenge"),
            Phase::Penalty => write!(f, "penalty"),
            Phase::Exchange => write!(f, "exchange"),
            Phase::InquisitorVictimSelect => write!(f, "inquisitor victim select"),
            Phase::InquisitorDecision => write!(f, "inquisitor decision"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}
