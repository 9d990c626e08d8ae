use super::*;
use coup_core::BLOCK_RESPONSE_SECS;
use coup_core::FOREIGN_AID_GAIN;
use coup_core::TAX_GAIN;

/// Reactions to an open declaration: blocks, accepts, and contests.
impl Game {
    /// Raises a counter-claim against the open action.
    ///
    /// Targeted actions may only be blocked by their victim; foreign aid by
    /// anyone but the actor. The claim must be a role the table accepts as
    /// blocking this action, though whether the blocker holds it is exactly
    /// what a later contest would find out.
    pub fn declare_block(&mut self, player: PlayerId, claim: Role) -> Result<(), RulesError> {
        if self.phase != Phase::ChallengeWindow {
            return Err(RulesError::IllegalPhase(format!(
                "block raised during {}",
                self.phase
            )));
        }
        let action = self
            .current_action
            .clone()
            .ok_or_else(|| RulesError::IllegalPhase("no open action to block".into()))?;
        if !self.fetch(player)?.alive() {
            return Err(RulesError::IllegalActor("eliminated players cannot block".into()));
        }
        if player == action.actor {
            return Err(RulesError::IllegalActor("cannot block your own action".into()));
        }
        let allowed = action.kind.block_roles(self.settings().use_inquisitor);
        if allowed.is_empty() {
            return Err(RulesError::IllegalActor(format!(
                "{} cannot be blocked",
                action.kind
            )));
        }
        if action.kind.targeted() && action.target != Some(player) {
            return Err(RulesError::IllegalActor(
                "only the target may block this action".into(),
            ));
        }
        if !allowed.contains(&claim) {
            return Err(RulesError::IllegalActor(format!(
                "{} does not block {}",
                claim, action.kind
            )));
        }
        self.note(format!("{} blocks with {}!", self.name(player), claim));
        if let Some(action) = self.current_action.as_mut() {
            action.status = Status::Blocked;
            action.blocker = Some(player);
            action.block_claim = Some(claim);
        }
        self.phase = Phase::BlockResponse;
        self.timer = BLOCK_RESPONSE_SECS;
        Ok(())
    }
    /// Waives the objection window: the open action succeeds now.
    ///
    /// For targeted actions only the victim can concede early; for foreign
    /// aid any other player can wave it through.
    pub fn accept_action(&mut self, player: PlayerId) -> Result<(), RulesError> {
        if self.phase != Phase::ChallengeWindow {
            return Err(RulesError::IllegalPhase(format!(
                "accept during {}",
                self.phase
            )));
        }
        let action = self
            .current_action
            .clone()
            .ok_or_else(|| RulesError::IllegalPhase("no open action to accept".into()))?;
        if !self.fetch(player)?.alive() {
            return Err(RulesError::IllegalActor("eliminated players cannot react".into()));
        }
        match (action.kind.targeted(), action.kind) {
            (true, _) if action.target == Some(player) => {}
            (false, ActionKind::ForeignAid) if player != action.actor => {}
            _ => {
                return Err(RulesError::IllegalActor(
                    "only the target may accept this action".into(),
                ));
            }
        }
        self.note(format!("{} does not object.", self.name(player)));
        self.resolve_success(action);
        Ok(())
    }
    /// The actor concedes the block: the action is cancelled, turn over.
    pub fn accept_block(&mut self, player: PlayerId) -> Result<(), RulesError> {
        if self.phase != Phase::BlockResponse {
            return Err(RulesError::IllegalPhase(format!(
                "block accepted during {}",
                self.phase
            )));
        }
        let action = self
            .current_action
            .clone()
            .ok_or_else(|| RulesError::IllegalPhase("no blocked action".into()))?;
        if player != action.actor {
            return Err(RulesError::IllegalActor(
                "only the actor may accept the block".into(),
            ));
        }
        self.note(format!("{} accepts the block.", self.name(player)));
        self.rotate(None);
        Ok(())
    }
    /// Accuses the open claim of being a bluff and arbitrates immediately.
    ///
    /// In the challenge window any non-actor may contest the action itself
    /// (foreign aid claims no character, so only its block is contestable).
    /// Once a block is up, contesting is the actor's move.
    pub fn contest_action(&mut self, player: PlayerId) -> Result<(), RulesError> {
        let action = self
            .current_action
            .clone()
            .ok_or_else(|| RulesError::IllegalPhase("no open action to contest".into()))?;
        match self.phase {
            Phase::ChallengeWindow => {
                if !action.kind.contestable() {
                    return Err(RulesError::IllegalActor(format!(
                        "{} cannot be contested, only blocked",
                        action.kind
                    )));
                }
                if player == action.actor {
                    return Err(RulesError::IllegalActor(
                        "cannot contest your own action".into(),
                    ));
                }
            }
            Phase::BlockResponse => {
                if player != action.actor {
                    return Err(RulesError::IllegalActor(
                        "only the actor may contest the block".into(),
                    ));
                }
            }
            phase => {
                return Err(RulesError::IllegalPhase(format!(
                    "contest during {}",
                    phase
                )));
            }
        }
        if !self.fetch(player)?.alive() {
            return Err(RulesError::IllegalActor("eliminated players cannot contest".into()));
        }
        self.phase = Phase::ResolveChallenge;
        self.note(format!("{} contests!", self.name(player)));
        self.judge(action, player);
        Ok(())
    }
    /// Arbitration: checks the accused's hidden hand against the claimed
    /// role and runs synchronously to the penalty transition.
    fn judge(&mut self, action: Action, challenger: PlayerId) {
        let block_challenge = action.status == Status::Blocked;
        let accused = action.accused();
        let required = match action.block_claim {
            Some(claim) if block_challenge => Some(claim),
            _ => action.kind.required_role(self.settings().use_inquisitor),
        };
        let proof = required.and_then(|role| {
            self.roster
                .get(accused)
                .and_then(|p| p.influence_of(role))
                .map(|card| (role, card))
        });
        match proof {
            Some((role, card)) => {
                // Truth: the proven card goes back to the deck unseen and a
                // fresh draw takes its slot, so nothing is learned about it.
                self.note(format!(
                    "The court confirms: {} holds {}.",
                    self.name(accused),
                    role
                ));
                self.launder(accused, card).expect("proven card is in hand");
                self.penalty_victim = Some(challenger);
                self.phase = Phase::Penalty;
                if !block_challenge {
                    // The upheld action still lands, once the challenger
                    // has paid for the accusation.
                    match action.kind {
                        ActionKind::Assassinate => {
                            self.continuation = Continuation::Eliminate {
                                target: action.target.expect("assassinate is targeted"),
                            };
                        }
                        ActionKind::Steal => {
                            self.plunder(action.actor, action.target.expect("steal is targeted"));
                        }
                        ActionKind::Tax => {
                            if let Some(actor) = self.roster.get_mut(action.actor) {
                                actor.earn(TAX_GAIN);
                            }
                        }
                        ActionKind::Exchange => {
                            self.continuation = Continuation::Resume {
                                action: Action::declare(action.kind, action.actor, action.target),
                            };
                        }
                        // An upheld investigation is simply lost to the
                        // interruption.
                        _ => {}
                    }
                }
            }
            None => {
                self.note(format!(
                    "{} was caught bluffing!",
                    self.name(accused)
                ));
                self.penalty_victim = Some(accused);
                self.phase = Phase::Penalty;
                if block_challenge {
                    // The block was a lie, so the original action proceeds.
                    match action.kind {
                        ActionKind::Assassinate => {
                            self.continuation = Continuation::Eliminate {
                                target: action.blocker.expect("blocked action has a blocker"),
                            };
                        }
                        ActionKind::Steal => {
                            self.plunder(action.actor, action.target.expect("steal is targeted"));
                        }
                        ActionKind::ForeignAid => {
                            if let Some(actor) = self.roster.get_mut(action.actor) {
                                actor.earn(FOREIGN_AID_GAIN);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        self.current_action = None;
        self.timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::*;

    #[test]
    fn truthful_tax_punishes_the_challenger_and_pays() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[0], &[Role::Duke, Role::Assassin]);
        let proven = game.roster().get(ids[0]).unwrap().hand()[0].id();
        game.declare_action(ids[0], ActionKind::Tax, None).unwrap();
        game.contest_action(ids[1]).unwrap();
        assert_eq!(game.phase(), Phase::Penalty);
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 5);
        // The proven card was replaced, never revealed.
        let holder = game.roster().get(ids[0]).unwrap();
        assert!(holder.card(proven).is_none());
        assert_eq!(holder.influence(), 2);
        assert!(conserved(&game));
        concede(&mut game, ids[1]);
        assert_eq!(game.turn(), Some(ids[1]));
        assert_eq!(game.phase(), Phase::ActionSelect);
    }
    #[test]
    fn bluffed_tax_punishes_the_actor_and_pays_nothing() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[0], &[Role::Captain, Role::Assassin]);
        game.declare_action(ids[0], ActionKind::Tax, None).unwrap();
        game.contest_action(ids[2]).unwrap();
        assert_eq!(game.penalty_victim(), Some(ids[0]));
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 2);
        concede(&mut game, ids[0]);
        assert_eq!(game.turn(), Some(ids[1]));
    }
    #[test]
    fn assassinate_blocked_by_missing_contessa_kills_twice() {
        // Scenario C: paid blade, bluffed Contessa, double loss.
        let (mut game, ids) = fresh(3);
        game.rig_coins(ids[0], 3);
        game.rig_hand(ids[0], &[Role::Assassin, Role::Duke]);
        game.rig_hand(ids[1], &[Role::Duke, Role::Duke]);
        game.declare_action(ids[0], ActionKind::Assassinate, Some(ids[1])).unwrap();
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 0);
        game.declare_block(ids[1], Role::Contessa).unwrap();
        game.contest_action(ids[0]).unwrap();
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        assert!(matches!(
            game.continuation(),
            Continuation::Eliminate { target } if *target == ids[1]
        ));
        concede(&mut game, ids[1]);
        // Still alive, so the assassination itself lands next.
        assert_eq!(game.phase(), Phase::Penalty);
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        concede(&mut game, ids[1]);
        assert!(!game.roster().get(ids[1]).unwrap().alive());
        assert_eq!(game.turn(), Some(ids[2]));
    }
    #[test]
    fn truthful_contessa_voids_the_assassination() {
        let (mut game, ids) = fresh(3);
        game.rig_coins(ids[0], 3);
        game.rig_hand(ids[1], &[Role::Contessa, Role::Duke]);
        game.declare_action(ids[0], ActionKind::Assassinate, Some(ids[1])).unwrap();
        game.declare_block(ids[1], Role::Contessa).unwrap();
        game.contest_action(ids[0]).unwrap();
        // The blocker proved it; only the challenger pays, coins stay spent.
        assert_eq!(game.penalty_victim(), Some(ids[0]));
        assert_eq!(game.continuation(), &Continuation::None);
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 0);
        concede(&mut game, ids[0]);
        assert_eq!(game.roster().get(ids[1]).unwrap().influence(), 2);
        assert_eq!(game.turn(), Some(ids[1]));
    }
    #[test]
    fn steal_challenge_upheld_transfers_immediately() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[0], &[Role::Captain, Role::Duke]);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[2])).unwrap();
        game.contest_action(ids[1]).unwrap();
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 4);
        assert_eq!(game.roster().get(ids[2]).unwrap().coins(), 0);
        assert_eq!(game.penalty_victim(), Some(ids[1]));
    }
    #[test]
    fn steal_never_overdraws_the_victim() {
        let (mut game, ids) = fresh(3);
        game.rig_coins(ids[1], 1);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        game.accept_action(ids[1]).unwrap();
        assert_eq!(game.roster().get(ids[1]).unwrap().coins(), 0);
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 3);
    }
    #[test]
    fn bluffed_steal_block_lets_the_steal_through() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[0], &[Role::Captain, Role::Duke]);
        game.rig_hand(ids[1], &[Role::Duke, Role::Duke]);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        game.declare_block(ids[1], Role::Captain).unwrap();
        game.contest_action(ids[0]).unwrap();
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 4);
        assert_eq!(game.roster().get(ids[1]).unwrap().coins(), 0);
    }
    #[test]
    fn bluffed_foreign_aid_block_still_pays_the_actor() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[1], &[Role::Captain, Role::Captain]);
        game.declare_action(ids[0], ActionKind::ForeignAid, None).unwrap();
        game.declare_block(ids[1], Role::Duke).unwrap();
        game.contest_action(ids[0]).unwrap();
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 4);
    }
    #[test]
    fn foreign_aid_itself_cannot_be_contested() {
        let (mut game, ids) = fresh(3);
        game.declare_action(ids[0], ActionKind::ForeignAid, None).unwrap();
        let err = game.contest_action(ids[1]);
        assert!(matches!(err, Err(RulesError::IllegalActor(_))));
        assert_eq!(game.phase(), Phase::ChallengeWindow);
    }
    #[test]
    fn anyone_may_block_foreign_aid() {
        let (mut game, ids) = fresh(4);
        game.declare_action(ids[0], ActionKind::ForeignAid, None).unwrap();
        game.declare_block(ids[3], Role::Duke).unwrap();
        assert_eq!(game.phase(), Phase::BlockResponse);
        assert_eq!(
            game.current_action().and_then(|a| a.blocker),
            Some(ids[3])
        );
    }
    #[test]
    fn only_the_target_blocks_a_steal() {
        let (mut game, ids) = fresh(3);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        let err = game.declare_block(ids[2], Role::Captain);
        assert!(matches!(err, Err(RulesError::IllegalActor(_))));
    }
    #[test]
    fn block_claim_must_match_the_action() {
        let (mut game, ids) = fresh(3);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        let err = game.declare_block(ids[1], Role::Contessa);
        assert!(matches!(err, Err(RulesError::IllegalActor(_))));
    }
    #[test]
    fn bystanders_may_not_contest_a_block() {
        let (mut game, ids) = fresh(3);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        game.declare_block(ids[1], Role::Captain).unwrap();
        let err = game.contest_action(ids[2]);
        assert!(matches!(err, Err(RulesError::IllegalActor(_))));
    }
    #[test]
    fn accept_block_cancels_and_rotates() {
        let (mut game, ids) = fresh(3);
        game.declare_action(ids[0], ActionKind::Steal, Some(ids[1])).unwrap();
        game.declare_block(ids[1], Role::Captain).unwrap();
        game.accept_block(ids[0]).unwrap();
        assert_eq!(game.phase(), Phase::ActionSelect);
        assert_eq!(game.turn(), Some(ids[1]));
        assert_eq!(game.roster().get(ids[0]).unwrap().coins(), 2);
        assert_eq!(game.roster().get(ids[1]).unwrap().coins(), 2);
    }
    #[test]
    fn challenged_exchange_resumes_after_the_penalty() {
        let (mut game, ids) = fresh(3);
        game.rig_hand(ids[0], &[Role::Ambassador, Role::Duke]);
        game.declare_action(ids[0], ActionKind::Exchange, None).unwrap();
        game.contest_action(ids[1]).unwrap();
        assert_eq!(game.penalty_victim(), Some(ids[1]));
        assert!(matches!(game.continuation(), Continuation::Resume { .. }));
        concede(&mut game, ids[1]);
        // The exchange re-enters without rotating the turn.
        assert_eq!(game.phase(), Phase::Exchange);
        assert_eq!(game.turn(), Some(ids[0]));
        assert_eq!(game.roster().get(ids[0]).unwrap().hand().len(), 4);
        assert!(conserved(&game));
    }
}
