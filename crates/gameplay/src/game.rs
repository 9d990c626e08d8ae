use super::*;
use coup_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;

/// Immutable per-match configuration, resolved once at room creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Swap the Ambassador for the Inquisitor for the whole match.
    pub use_inquisitor: bool,
}

/// The authoritative room document and its state machine.
///
/// `Game` owns everything the table can see or dispute: the roster, the
/// court deck, the phase, and whatever declaration is currently open. Every
/// operation validates against the live state before its first write, so a
/// rejected intent leaves the document untouched, and every accepted intent
/// runs synchronously to a single terminal state.
///
/// Scheduling lives elsewhere: the gameroom actor serializes intents and
/// drives [`tick`](Self::tick) while a reaction window is open.
#[derive(Debug, Serialize)]
pub struct Game {
    settings: MatchSettings,
    pub(crate) phase: Phase,
    pub(crate) roster: Roster,
    pub(crate) deck: Deck,
    pub(crate) turn: Option<PlayerId>,
    pub(crate) current_action: Option<Action>,
    pub(crate) penalty_victim: Option<PlayerId>,
    pub(crate) continuation: Continuation,
    pub(crate) investigated: Option<Card>,
    pub(crate) exchange_keep: Option<usize>,
    pub(crate) timer: Seconds,
    pub(crate) winner: Option<PlayerId>,
    log: Vec<String>,
    #[serde(skip)]
    pub(crate) rng: SmallRng,
}

/// Lifecycle: seating, dealing, restarting, leaving.
impl Game {
    pub fn new(settings: MatchSettings) -> Self {
        Self::with_rng(settings, SmallRng::from_os_rng())
    }
    /// Deterministic construction for tests and replays.
    pub fn seeded(settings: MatchSettings, seed: u64) -> Self {
        Self::with_rng(settings, SmallRng::seed_from_u64(seed))
    }
    fn with_rng(settings: MatchSettings, rng: SmallRng) -> Self {
        Self {
            settings,
            phase: Phase::Waiting,
            roster: Roster::default(),
            deck: Deck::default(),
            turn: None,
            current_action: None,
            penalty_victim: None,
            continuation: Continuation::None,
            investigated: None,
            exchange_keep: None,
            timer: 0,
            winner: None,
            log: Vec::new(),
            rng,
        }
    }
    /// Seats and deals in one step, for embedders that assemble the roster
    /// up front.
    pub fn create(
        settings: MatchSettings,
        players: impl IntoIterator<Item = (PlayerId, String)>,
    ) -> Result<Self, RulesError> {
        let mut game = Self::new(settings);
        for (id, name) in players {
            game.seat(id, name)?;
        }
        game.start()?;
        Ok(game)
    }
    /// Adds a player to the lobby.
    pub fn seat(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), RulesError> {
        if self.phase != Phase::Waiting {
            return Err(RulesError::IllegalPhase(
                "cannot join once the game has started".into(),
            ));
        }
        if self.roster.contains(id) {
            return Err(RulesError::IllegalActor("already seated".into()));
        }
        if self.roster.len() >= MAX_PLAYERS {
            return Err(RulesError::IllegalActor("room is full".into()));
        }
        let player = Player::new(id, name);
        self.note(format!("{} joined the court.", player.name()));
        self.roster.seat(player);
        Ok(())
    }
    /// Deals the match: fresh deck, two cards and two coins each, first seat
    /// to act.
    pub fn start(&mut self) -> Result<(), RulesError> {
        if self.phase != Phase::Waiting {
            return Err(RulesError::IllegalPhase("game already started".into()));
        }
        if self.roster.len() < MIN_PLAYERS {
            return Err(RulesError::IllegalActor(format!(
                "need at least {} players",
                MIN_PLAYERS
            )));
        }
        self.deck = Deck::build(
            self.roster.len(),
            self.settings.use_inquisitor,
            &mut self.rng,
        );
        for player in self.roster.iter_mut() {
            player.muster();
            player.earn(STARTING_COINS);
        }
        for id in self.roster.order() {
            let hand = self.deck.draw(HAND_SIZE);
            if let Some(player) = self.roster.get_mut(id) {
                player.deal(hand);
            }
        }
        self.turn = self.roster.order().first().copied();
        self.phase = Phase::ActionSelect;
        self.winner = None;
        self.log.clear();
        self.note("Game on. Good luck.");
        Ok(())
    }
    /// Host restart after a win: back to the lobby with a clean slate.
    pub fn reset(&mut self) -> Result<(), RulesError> {
        if self.phase != Phase::GameOver {
            return Err(RulesError::IllegalPhase(
                "reset only once the game is over".into(),
            ));
        }
        for player in self.roster.iter_mut() {
            player.muster();
        }
        self.deck = Deck::default();
        self.phase = Phase::Waiting;
        self.turn = None;
        self.current_action = None;
        self.penalty_victim = None;
        self.continuation = Continuation::None;
        self.investigated = None;
        self.exchange_keep = None;
        self.timer = 0;
        self.winner = None;
        self.log.clear();
        Ok(())
    }
    /// Voluntary exit. Mid-match the leaver forfeits all influence; if that
    /// leaves a sole survivor the match ends as a walkover, and if the
    /// leaver was holding up the current flow the open action is voided and
    /// the turn rotates past them.
    pub fn withdraw(&mut self, id: PlayerId) -> Result<(), RulesError> {
        self.fetch(id)?;
        match self.phase {
            Phase::Waiting | Phase::GameOver => {
                self.roster.unseat(id);
                Ok(())
            }
            _ => {
                let involved = self.involves(id);
                let name = self.name(id);
                if let Some(player) = self.roster.get_mut(id) {
                    player.strip();
                }
                self.note(format!("{} fled the court.", name));
                if let Some(winner) = self.roster.survivor().map(Unique::id) {
                    let name = self.name(winner);
                    self.crown(winner);
                    self.note(format!("Everyone else fled. {} wins by walkover!", name));
                } else if involved {
                    self.current_action = None;
                    self.penalty_victim = None;
                    self.continuation = Continuation::None;
                    self.investigated = None;
                    self.exchange_keep = None;
                    self.rotate(Some(id));
                }
                Ok(())
            }
        }
    }
}

/// Public state accessors.
impl Game {
    pub fn settings(&self) -> MatchSettings {
        self.settings
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    /// The seat to act. None before the deal.
    pub fn turn(&self) -> Option<PlayerId> {
        self.turn
    }
    pub fn current_action(&self) -> Option<&Action> {
        self.current_action.as_ref()
    }
    /// The player compelled to act: penalty victim, or the card-discloser
    /// during an investigation.
    pub fn penalty_victim(&self) -> Option<PlayerId> {
        self.penalty_victim
    }
    pub fn continuation(&self) -> &Continuation {
        &self.continuation
    }
    pub fn investigated(&self) -> Option<&Card> {
        self.investigated.as_ref()
    }
    pub fn timer(&self) -> Seconds {
        self.timer
    }
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }
    pub fn log(&self) -> &[String] {
        &self.log
    }
}

/// Turn actions.
impl Game {
    /// Declares an action for the current turn.
    ///
    /// Income resolves on the spot and a coup goes straight to the penalty;
    /// everything else opens the challenge window with a fresh countdown.
    pub fn declare_action(
        &mut self,
        actor: PlayerId,
        kind: ActionKind,
        target: Option<PlayerId>,
    ) -> Result<(), RulesError> {
        if self.phase != Phase::ActionSelect {
            return Err(RulesError::IllegalPhase(format!(
                "{} declared during {}",
                kind, self.phase
            )));
        }
        if self.turn != Some(actor) {
            return Err(RulesError::IllegalActor("not your turn".into()));
        }
        if kind == ActionKind::Investigate && !self.settings.use_inquisitor {
            return Err(RulesError::IllegalActor(
                "no Inquisitor in this match".into(),
            ));
        }
        let coins = self.fetch(actor)?.coins();
        if coins >= FORCED_COUP_AT && kind != ActionKind::Coup {
            return Err(RulesError::IllegalActor(format!(
                "{} coins or more leaves only the coup",
                FORCED_COUP_AT
            )));
        }
        if coins < kind.cost() {
            return Err(RulesError::InsufficientFunds(format!(
                "{} costs {}, you hold {}",
                kind,
                kind.cost(),
                coins
            )));
        }
        let target = self.vet_target(actor, kind, target)?;
        if let Some(player) = self.roster.get_mut(actor) {
            player.pay(kind.cost());
        }
        match kind {
            ActionKind::Income => {
                if let Some(player) = self.roster.get_mut(actor) {
                    player.earn(INCOME_GAIN);
                }
                self.note(format!("{} takes income.", self.name(actor)));
                self.rotate(None);
            }
            ActionKind::Coup => {
                let victim = target.expect("coup is targeted");
                self.note(format!(
                    "{} launches a coup against {}!",
                    self.name(actor),
                    self.name(victim)
                ));
                self.penalty_victim = Some(victim);
                self.phase = Phase::Penalty;
                self.timer = 0;
            }
            _ => {
                self.note(match target {
                    Some(victim) => format!(
                        "{} wants to use {} on {}...",
                        self.name(actor),
                        kind,
                        self.name(victim)
                    ),
                    None => format!("{} wants to use {}...", self.name(actor), kind),
                });
                self.current_action = Some(Action::declare(kind, actor, target));
                self.phase = Phase::ChallengeWindow;
                self.timer = CHALLENGE_WINDOW_SECS;
            }
        }
        Ok(())
    }
    fn vet_target(
        &self,
        actor: PlayerId,
        kind: ActionKind,
        target: Option<PlayerId>,
    ) -> Result<Option<PlayerId>, RulesError> {
        if !kind.targeted() {
            return match target {
                Some(_) => Err(RulesError::InvalidTarget(format!("{} takes no target", kind))),
                None => Ok(None),
            };
        }
        let target =
            target.ok_or_else(|| RulesError::InvalidTarget(format!("{} requires a target", kind)))?;
        if target == actor {
            return Err(RulesError::InvalidTarget("cannot target yourself".into()));
        }
        let victim = self
            .roster
            .get(target)
            .ok_or_else(|| RulesError::InvalidTarget("no such player".into()))?;
        if !victim.alive() {
            return Err(RulesError::InvalidTarget("target already eliminated".into()));
        }
        if kind == ActionKind::Steal && victim.coins() == 0 {
            return Err(RulesError::InvalidTarget("nothing to steal".into()));
        }
        Ok(Some(target))
    }
}

/// Countdown authority.
impl Game {
    /// Advances the reaction countdown by one second. At zero, performs the
    /// same resolution the waited-on party would have performed manually:
    /// the challenge window accepts the action, the block response accepts
    /// the block.
    pub fn tick(&mut self) {
        if !self.phase.counts_down() {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            return;
        }
        match self.phase {
            Phase::ChallengeWindow => {
                if let Some(action) = self.current_action.take() {
                    self.note(format!("Nobody objected. {} goes through.", action.kind));
                    self.resolve_success(action);
                }
            }
            Phase::BlockResponse => {
                self.note("No response. The block stands.".to_string());
                self.rotate(None);
            }
            _ => {}
        }
    }
}

/// Shared transition helpers.
impl Game {
    pub(crate) fn fetch(&self, id: PlayerId) -> Result<&Player, RulesError> {
        self.roster
            .get(id)
            .ok_or_else(|| RulesError::IllegalActor(format!("unknown player {}", id)))
    }
    pub(crate) fn name(&self, id: PlayerId) -> String {
        self.roster
            .get(id)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
    pub(crate) fn note(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        log::debug!("[game] {}", entry);
        self.log.push(entry);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }
    /// Ends the current turn: next alive seat, back to action select.
    /// `exclude` skips a player eliminated in this same transaction.
    pub(crate) fn rotate(&mut self, exclude: Option<PlayerId>) {
        if let Some(from) = self.turn {
            self.turn = Some(self.roster.next_alive_after(from, exclude));
        }
        self.phase = Phase::ActionSelect;
        self.timer = 0;
        self.current_action = None;
        self.penalty_victim = None;
        self.continuation = Continuation::None;
        self.investigated = None;
        self.exchange_keep = None;
    }
    /// Seals the match.
    pub(crate) fn crown(&mut self, winner: PlayerId) {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.turn = None;
        self.timer = 0;
        self.current_action = None;
        self.penalty_victim = None;
        self.continuation = Continuation::None;
        self.investigated = None;
        self.exchange_keep = None;
        self.note(format!("Game over! {} controls the court.", self.name(winner)));
    }
    /// Moves up to the steal cap from victim to thief.
    pub(crate) fn plunder(&mut self, thief: PlayerId, victim: PlayerId) {
        let loot = self
            .roster
            .get(victim)
            .map(|p| p.coins().min(STEAL_CAP))
            .unwrap_or(0);
        if let Some(player) = self.roster.get_mut(victim) {
            player.pay(loot);
        }
        if let Some(player) = self.roster.get_mut(thief) {
            player.earn(loot);
        }
        self.note(format!(
            "{} steals {} coins from {}.",
            self.name(thief),
            loot,
            self.name(victim)
        ));
    }
    /// Runs an uncontested (or upheld) action to its effect.
    pub(crate) fn resolve_success(&mut self, action: Action) {
        self.current_action = None;
        self.timer = 0;
        match action.kind {
            // Never windowed; nothing deferred can reach here.
            ActionKind::Income | ActionKind::Coup => self.rotate(None),
            ActionKind::ForeignAid => {
                if let Some(player) = self.roster.get_mut(action.actor) {
                    player.earn(FOREIGN_AID_GAIN);
                }
                self.note(format!("{} takes foreign aid.", self.name(action.actor)));
                self.rotate(None);
            }
            ActionKind::Tax => {
                if let Some(player) = self.roster.get_mut(action.actor) {
                    player.earn(TAX_GAIN);
                }
                self.note(format!("{} collects tax.", self.name(action.actor)));
                self.rotate(None);
            }
            ActionKind::Steal => {
                let victim = action.target.expect("steal is targeted");
                self.plunder(action.actor, victim);
                self.rotate(None);
            }
            ActionKind::Assassinate => {
                match action
                    .target
                    .filter(|&t| self.roster.get(t).map(Player::alive).unwrap_or(false))
                {
                    Some(victim) => {
                        self.note(format!("The blade reaches {}.", self.name(victim)));
                        self.penalty_victim = Some(victim);
                        self.phase = Phase::Penalty;
                    }
                    // Victim already fell to a lost challenge on the way here.
                    None => self.rotate(None),
                }
            }
            ActionKind::Exchange => {
                let keep = self.fetch(action.actor).map(Player::influence).unwrap_or(0);
                let n = if self.settings.use_inquisitor { 1 } else { 2 };
                let drawn = self.deck.draw(n);
                if let Some(player) = self.roster.get_mut(action.actor) {
                    player.deal(drawn);
                }
                self.note(format!("{} consults the court deck.", self.name(action.actor)));
                self.exchange_keep = Some(keep);
                self.phase = Phase::Exchange;
            }
            ActionKind::Investigate => {
                match action
                    .target
                    .filter(|&t| self.roster.get(t).map(Player::alive).unwrap_or(false))
                {
                    Some(victim) => {
                        self.note(format!(
                            "{} must show a card to the Inquisitor.",
                            self.name(victim)
                        ));
                        self.penalty_victim = Some(victim);
                        self.phase = Phase::InquisitorVictimSelect;
                    }
                    None => self.rotate(None),
                }
            }
        }
    }
    fn involves(&self, id: PlayerId) -> bool {
        self.turn == Some(id)
            || self.penalty_victim == Some(id)
            || self
                .current_action
                .as_ref()
                .map(|a| a.actor == id || a.target == Some(id) || a.blocker == Some(id))
                .unwrap_or(false)
    }
    /// Swaps a proven or disclosed card back into the deck for a fresh draw.
    /// Restock-then-draw, so the replacement always exists.
    pub(crate) fn launder(&mut self, holder: PlayerId, card: CardId) -> Result<(), RulesError> {
        let role = self
            .fetch(holder)?
            .card(card)
            .filter(|c| c.is_influence())
            .map(Card::role)
            .ok_or_else(|| RulesError::CardNotFound(format!("card {} not in hand", card)))?;
        self.deck.restock([role], &mut self.rng);
        let replacement = self.deck.draw(1);
        let fresh = replacement.first().copied().unwrap_or(role);
        if let Some(player) = self.roster.get_mut(holder) {
            player.replace(card, fresh);
        }
        Ok(())
    }
}

#[cfg(test)]
impl Game {
    /// Overwrites a player's hand with face-down cards of the given roles.
    /// Same hand size in, same hand size out keeps token counts honest.
    pub(crate) fn rig_hand(&mut self, id: PlayerId, roles: &[Role]) {
        let player = self.roster.get_mut(id).expect("rigged player exists");
        assert_eq!(player.hand().len(), roles.len());
        player.rig(roles.to_vec());
    }
    pub(crate) fn rig_coins(&mut self, id: PlayerId, coins: Coins) {
        let player = self.roster.get_mut(id).expect("rigged player exists");
        player.pay(player.coins());
        player.earn(coins);
    }
}
