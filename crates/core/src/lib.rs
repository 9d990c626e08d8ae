//! Core type aliases, identity types, and constants for the coup workspace.
//!
//! This crate provides the foundational types and rule parameters used
//! throughout the workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Treasury coins held by a player.
pub type Coins = u16;
/// Whole seconds remaining on a reaction countdown.
pub type Seconds = u64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
///
/// Identity is supplied by external collaborators (session management hands
/// out player ids) or minted locally (card instances, rooms); either way the
/// marker type keeps an `ID<Card>` from being passed where an `ID<Player>`
/// belongs.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// Ids cross the wire inside snapshots and intents, so they serialize as the
// bare UUID. Manual impls keep the marker type free of serde bounds.
impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Minimum players to start a match.
pub const MIN_PLAYERS: usize = 2;
/// Maximum players sharing a room.
pub const MAX_PLAYERS: usize = 10;
/// Cards dealt to each player at match start.
pub const HAND_SIZE: usize = 2;
/// Coins dealt to each player at match start.
pub const STARTING_COINS: Coins = 2;

// ============================================================================
// ACTION ECONOMY
// ============================================================================
/// Upfront cost of an assassination, non-refundable even if blocked.
pub const ASSASSINATE_COST: Coins = 3;
/// Upfront cost of a coup.
pub const COUP_COST: Coins = 7;
/// Treasury size at which a coup becomes the only legal declaration.
pub const FORCED_COUP_AT: Coins = 10;
/// Most coins a single steal can transfer.
pub const STEAL_CAP: Coins = 2;
/// Coins granted by income.
pub const INCOME_GAIN: Coins = 1;
/// Coins granted by foreign aid.
pub const FOREIGN_AID_GAIN: Coins = 2;
/// Coins granted by tax.
pub const TAX_GAIN: Coins = 3;

// ============================================================================
// REACTION WINDOWS
// ============================================================================
/// Countdown for objections after an interruptible declaration.
pub const CHALLENGE_WINDOW_SECS: Seconds = 7;
/// Countdown for the actor's response once their action is blocked.
pub const BLOCK_RESPONSE_SECS: Seconds = 30;

// ============================================================================
// ROOM BOOKKEEPING
// ============================================================================
/// Rolling cap on the room log.
pub const LOG_CAPACITY: usize = 50;
