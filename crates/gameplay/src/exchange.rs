use super::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashSet;

/// The inquisitor's verdict on a disclosed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    Keep,
    Swap,
}

/// Exchange and investigation sub-flows.
impl Game {
    /// Commits the kept-card set of an open exchange.
    ///
    /// The kept set must hold exactly the actor's pre-draw influence count,
    /// chosen from the union of previously-unrevealed and freshly-drawn
    /// cards. The complement goes back to the deck and the whole stack
    /// reshuffles; revealed cards are untouched.
    pub fn finalize_exchange(
        &mut self,
        player: PlayerId,
        kept: &[CardId],
    ) -> Result<(), RulesError> {
        if self.phase != Phase::Exchange {
            return Err(RulesError::IllegalPhase(format!(
                "exchange finalized during {}",
                self.phase
            )));
        }
        if self.turn != Some(player) {
            return Err(RulesError::IllegalActor(
                "only the exchanging player may choose".into(),
            ));
        }
        let keep = self
            .exchange_keep
            .ok_or_else(|| RulesError::IllegalPhase("no exchange in flight".into()))?;
        if kept.len() != keep || kept.iter().collect::<HashSet<_>>().len() != keep {
            return Err(RulesError::InvalidTarget(format!(
                "must keep exactly {} distinct cards",
                keep
            )));
        }
        let hand = self.fetch(player)?;
        for &card in kept {
            if hand.card(card).filter(|c| c.is_influence()).is_none() {
                return Err(RulesError::CardNotFound(format!(
                    "card {} not among the offered",
                    card
                )));
            }
        }
        let returned = self
            .roster
            .get_mut(player)
            .map(|p| p.retain(kept))
            .unwrap_or_default();
        let count = returned.len();
        self.deck.restock(returned, &mut self.rng);
        self.note(format!(
            "{} finishes the exchange, returning {} cards.",
            self.name(player),
            count
        ));
        self.rotate(None);
        Ok(())
    }
    /// The investigated player discloses one unrevealed card to the actor.
    pub fn submit_investigation_card(
        &mut self,
        player: PlayerId,
        card: CardId,
    ) -> Result<(), RulesError> {
        if self.phase != Phase::InquisitorVictimSelect {
            return Err(RulesError::IllegalPhase(format!(
                "card submitted during {}",
                self.phase
            )));
        }
        if self.penalty_victim != Some(player) {
            return Err(RulesError::IllegalActor(
                "only the investigated player may disclose".into(),
            ));
        }
        let disclosed = self
            .fetch(player)?
            .card(card)
            .filter(|c| c.is_influence())
            .cloned()
            .ok_or_else(|| RulesError::CardNotFound(format!("card {} not in hand", card)))?;
        self.note(format!(
            "{} shows a card to the Inquisitor.",
            self.name(player)
        ));
        self.investigated = Some(disclosed);
        self.phase = Phase::InquisitorDecision;
        Ok(())
    }
    /// The actor rules on the disclosed card: keep it, or force it back
    /// into the deck for a random replacement in the same slot.
    pub fn finalize_investigation(
        &mut self,
        player: PlayerId,
        disposition: Disposition,
    ) -> Result<(), RulesError> {
        if self.phase != Phase::InquisitorDecision {
            return Err(RulesError::IllegalPhase(format!(
                "verdict during {}",
                self.phase
            )));
        }
        if self.turn != Some(player) {
            return Err(RulesError::IllegalActor(
                "only the investigating player may decide".into(),
            ));
        }
        let victim = self
            .penalty_victim
            .ok_or_else(|| RulesError::IllegalPhase("no investigation in flight".into()))?;
        let card = self
            .investigated
            .as_ref()
            .map(Card::id)
            .ok_or_else(|| RulesError::IllegalPhase("no disclosed card".into()))?;
        match disposition {
            Disposition::Keep => {
                self.note("The Inquisitor lets the card stay.".to_string());
            }
            Disposition::Swap => {
                self.launder(victim, card)?;
                self.note("The Inquisitor forces a swap!".to_string());
            }
        }
        self.rotate(None);
        Ok(())
    }
}
