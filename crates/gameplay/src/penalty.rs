use super::*;
use coup_core::Unique;
use serde::Serialize;

/// Work queued behind a pending influence loss.
///
/// Attached to the PENALTY transition instead of loose optional fields, so
/// the arbiter states exactly one follow-up and the resolver drains it
/// exhaustively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continuation {
    #[default]
    None,
    /// A second elimination lands once the current one resolves: a failed
    /// block challenge followed by the assassination itself.
    Eliminate { target: PlayerId },
    /// A deferred exchange re-enters its success path once the challenger's
    /// penalty resolves, without rotating the turn.
    Resume { action: Action },
}

/// Influence loss.
impl Game {
    /// The penalty victim flips one of their own unrevealed cards.
    ///
    /// After the flip the survivor set is recomputed with the fresh hand
    /// (never a stale liveness read). One survivor ends the match on the
    /// spot; otherwise any queued continuation fires before the turn
    /// rotates past the freshly eliminated.
    pub fn resolve_penalty(&mut self, player: PlayerId, card: CardId) -> Result<(), RulesError> {
        if self.phase != Phase::Penalty {
            return Err(RulesError::IllegalPhase(format!(
                "penalty resolved during {}",
                self.phase
            )));
        }
        if self.penalty_victim != Some(player) {
            return Err(RulesError::IllegalActor(
                "only the penalty victim may choose".into(),
            ));
        }
        let role = self
            .fetch(player)?
            .card(card)
            .filter(|c| c.is_influence())
            .map(Card::role)
            .ok_or_else(|| RulesError::CardNotFound(format!("card {} not in hand", card)))?;
        if let Some(victim) = self.roster.get_mut(player) {
            victim.forfeit(card);
        }
        let fallen = !self.fetch(player)?.alive();
        self.note(format!("{} loses influence: {}.", self.name(player), role));
        if fallen {
            self.note(format!("{} is out of the game.", self.name(player)));
        }
        if let Some(winner) = self.roster.survivor().map(Unique::id) {
            self.crown(winner);
            return Ok(());
        }
        match std::mem::take(&mut self.continuation) {
            Continuation::Eliminate { target }
                if self.roster.get(target).map(Player::alive).unwrap_or(false) =>
            {
                self.note(format!(
                    "The assassin still collects: {} must pay again.",
                    self.name(target)
                ));
                self.penalty_victim = Some(target);
            }
            // Target of the chained elimination already fell.
            Continuation::Eliminate { .. } | Continuation::None => {
                self.rotate(fallen.then_some(player));
            }
            Continuation::Resume { action } => {
                self.penalty_victim = None;
                self.resolve_success(action);
            }
        }
        Ok(())
    }
}
