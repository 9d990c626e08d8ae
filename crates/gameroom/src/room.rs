use super::*;
use coup_core::ID;
use coup_core::Unique;
use coup_gameplay::Game;
use coup_gameplay::MatchSettings;
use coup_gameplay::PlayerId;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Live room actor.
///
/// Exclusively owns its [`Game`] and serializes every join, leave, and
/// intent through one inbox, so concurrent callers can never interleave
/// half-applied transitions on the shared document. The reaction countdown
/// is a deadline on the same task: whoever is hosting, windows expire.
///
/// After every accepted transition the full state snapshot is broadcast;
/// rejected intents bounce back to their sender alone.
pub struct Room {
    id: ID<Self>,
    game: Game,
    table: Table,
    host: Option<PlayerId>,
    inbox: UnboundedReceiver<Post>,
    countdown: Countdown,
    active: Arc<RwLock<Instant>>,
}

impl Room {
    /// Builds a room and the handle used to reach it.
    pub fn open(id: ID<Self>, settings: MatchSettings) -> (Self, RoomHandle) {
        let (tx, rx) = unbounded_channel();
        let active = Arc::new(RwLock::new(Instant::now()));
        let room = Self {
            id,
            game: Game::new(settings),
            table: Table::default(),
            host: None,
            inbox: rx,
            countdown: Countdown::default(),
            active: active.clone(),
        };
        let handle = RoomHandle { id, tx, active };
        (room, handle)
    }
    /// The actor loop: drain posts, fire countdown deadlines, broadcast.
    /// Ends when the inbox closes or the last player leaves.
    pub async fn run(mut self, done: oneshot::Sender<()>) {
        log::debug!("[room {}] open", self.id);
        loop {
            let deadline = self.countdown.fire_at();
            tokio::select! {
                biased;
                post = self.inbox.recv() => match post {
                    Some(post) => {
                        if !self.handle(post) {
                            break;
                        }
                    }
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline), if self.countdown.armed() => {
                    self.game.tick();
                    self.broadcast();
                }
            }
            self.rearm();
        }
        log::debug!("[room {}] closed", self.id);
        let _ = done.send(());
    }
    /// Handles one post. False once the room should shut down.
    fn handle(&mut self, post: Post) -> bool {
        log::debug!("[room {}] {}", self.id, post);
        self.touch();
        match post {
            Post::Join {
                player,
                name,
                sender,
            } => {
                if self.game.roster().contains(player) {
                    // Reconnection: re-attach the channel, restate the world.
                    self.table.seat(player, sender);
                    self.table
                        .unicast(player, Bulletin::joined(&self.id.to_string(), player, self.host));
                    self.table.unicast(player, Bulletin::snapshot(&self.game));
                } else {
                    match self.game.seat(player, name) {
                        Ok(()) => {
                            self.table.seat(player, sender);
                            self.host = self.host.or(Some(player));
                            self.table.unicast(
                                player,
                                Bulletin::joined(&self.id.to_string(), player, self.host),
                            );
                            self.broadcast();
                        }
                        Err(e) => {
                            log::warn!("[room {}] join refused for {}: {}", self.id, player, e);
                            let _ = sender.send(Bulletin::rejected(e.to_string()));
                        }
                    }
                }
                true
            }
            Post::Leave { player } => {
                self.table.unseat(player);
                if let Err(e) = self.game.withdraw(player) {
                    log::warn!("[room {}] leave of {}: {}", self.id, player, e);
                }
                self.migrate_host(player);
                self.broadcast();
                if self.table.is_empty() {
                    log::info!("[room {}] deserted", self.id);
                    return false;
                }
                true
            }
            Post::Intent { player, intent } => {
                match self.apply(player, intent) {
                    Ok(()) => self.broadcast(),
                    Err(reason) => {
                        log::warn!("[room {}] rejected {}: {}", self.id, player, reason);
                        self.table.unicast(player, Bulletin::rejected(reason));
                    }
                }
                true
            }
        }
    }
    /// Routes an intent into the rules engine. Host-gated commands are
    /// checked here; everything else is the engine's call.
    fn apply(&mut self, player: PlayerId, intent: Intent) -> Result<(), String> {
        match intent {
            Intent::Start => {
                self.gate_host(player)?;
                self.game.start().map_err(|e| e.to_string())
            }
            Intent::Reset => {
                self.gate_host(player)?;
                self.game.reset().map_err(|e| e.to_string())
            }
            Intent::DeclareAction { kind, target } => self
                .game
                .declare_action(player, kind, target)
                .map_err(|e| e.to_string()),
            Intent::DeclareBlock { claim } => self
                .game
                .declare_block(player, claim)
                .map_err(|e| e.to_string()),
            Intent::AcceptAction => self.game.accept_action(player).map_err(|e| e.to_string()),
            Intent::AcceptBlock => self.game.accept_block(player).map_err(|e| e.to_string()),
            Intent::ContestAction => self.game.contest_action(player).map_err(|e| e.to_string()),
            Intent::ResolvePenalty { card } => self
                .game
                .resolve_penalty(player, card)
                .map_err(|e| e.to_string()),
            Intent::FinalizeExchange { kept } => self
                .game
                .finalize_exchange(player, &kept)
                .map_err(|e| e.to_string()),
            Intent::SubmitInvestigationCard { card } => self
                .game
                .submit_investigation_card(player, card)
                .map_err(|e| e.to_string()),
            Intent::FinalizeInvestigation { decision } => self
                .game
                .finalize_investigation(player, decision)
                .map_err(|e| e.to_string()),
        }
    }
    fn gate_host(&self, player: PlayerId) -> Result<(), String> {
        match self.host {
            Some(host) if host == player => Ok(()),
            _ => Err("only the host may do that".to_string()),
        }
    }
    /// Passes the torch to the earliest remaining connected player.
    fn migrate_host(&mut self, leaver: PlayerId) {
        if self.host == Some(leaver) {
            self.host = self
                .game
                .roster()
                .iter()
                .map(Unique::id)
                .find(|&id| self.table.contains(id));
            if let Some(host) = self.host {
                log::info!("[room {}] host migrated to {}", self.id, host);
            }
        }
    }
    fn broadcast(&self) {
        self.table.broadcast(Bulletin::snapshot(&self.game));
    }
    /// Keeps the countdown aligned with the phase: armed while a window is
    /// live, re-armed once a tick elapses, cleared everywhere else.
    fn rearm(&mut self) {
        if self.game.phase().counts_down() && self.game.timer() > 0 {
            if self.countdown.spent() {
                self.countdown.arm();
            }
        } else {
            self.countdown.clear();
        }
    }
    fn touch(&self) {
        if let Ok(mut touched) = self.active.write() {
            *touched = Instant::now();
        }
    }
}

impl Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
