/// Local rejections surfaced to the intent's sender.
///
/// Every variant leaves the room state untouched — operations validate
/// against the fresh state before their first write. There is no fatal
/// engine error: deck exhaustion degrades inside [`crate::Deck::draw`], and
/// anything else worth abandoning a match over belongs to room lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Operation invoked outside its required phase.
    IllegalPhase(String),
    /// Wrong player invoking a player-scoped operation.
    IllegalActor(String),
    /// Declared cost exceeds the actor's coins.
    InsufficientFunds(String),
    /// Missing, dead, or self target; or a steal against an empty treasury.
    InvalidTarget(String),
    /// Referenced card instance absent from the expected hand.
    CardNotFound(String),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalPhase(s) => write!(f, "illegal phase: {}", s),
            Self::IllegalActor(s) => write!(f, "illegal actor: {}", s),
            Self::InsufficientFunds(s) => write!(f, "insufficient funds: {}", s),
            Self::InvalidTarget(s) => write!(f, "invalid target: {}", s),
            Self::CardNotFound(s) => write!(f, "card not found: {}", s),
        }
    }
}

impl std::error::Error for RulesError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn display_prefixes_the_class() {
        let e = RulesError::IllegalPhase("tax during penalty".into());
        assert_eq!(e.to_string(), "illegal phase: tax during penalty");
    }
}
