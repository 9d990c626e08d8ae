use super::PlayerId;
use super::Role;
use coup_core::ASSASSINATE_COST;
use coup_core::COUP_COST;
use coup_core::Coins;
use serde::Deserialize;
use serde::Serialize;

/// A declarable turn action.
///
/// The legality tables live here as exhaustive matches so adding an action
/// is a compile-time-checked change: cost, targeting, which role backs the
/// claim, which roles may block, and whether a reaction window opens at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Income,
    ForeignAid,
    Tax,
    Steal,
    Assassinate,
    Coup,
    Exchange,
    Investigate,
}

impl ActionKind {
    /// Coins paid at declaration. Non-refundable even if blocked.
    pub fn cost(&self) -> Coins {
        match self {
            ActionKind::Assassinate => ASSASSINATE_COST,
            ActionKind::Coup => COUP_COST,
            _ => 0,
        }
    }
    /// Whether the declaration names a victim.
    pub fn targeted(&self) -> bool {
        matches!(
            self,
            ActionKind::Steal | ActionKind::Assassinate | ActionKind::Coup | ActionKind::Investigate
        )
    }
    /// The role a truthful declaration is backed by. None for actions that
    /// claim no character (income, foreign aid, coup).
    pub fn required_role(&self, use_inquisitor: bool) -> Option<Role> {
        match self {
            ActionKind::Tax => Some(Role::Duke),
            ActionKind::Steal => Some(Role::Captain),
            ActionKind::Assassinate => Some(Role::Assassin),
            ActionKind::Exchange => Some(Role::exchanger(use_inquisitor)),
            ActionKind::Investigate => Some(Role::Inquisitor),
            ActionKind::Income | ActionKind::ForeignAid | ActionKind::Coup => None,
        }
    }
    /// Roles that may claim to block this action.
    pub fn block_roles(&self, use_inquisitor: bool) -> &'static [Role] {
        const FOREIGN_AID: [Role; 1] = [Role::Duke];
        const ASSASSINATE: [Role; 1] = [Role::Contessa];
        const STEAL: [Role; 2] = [Role::Captain, Role::Ambassador];
        const STEAL_INQ: [Role; 2] = [Role::Captain, Role::Inquisitor];
        match self {
            ActionKind::ForeignAid => &FOREIGN_AID,
            ActionKind::Assassinate => &ASSASSINATE,
            ActionKind::Steal if use_inquisitor => &STEAL_INQ,
            ActionKind::Steal => &STEAL,
            _ => &[],
        }
    }
    /// Whether declaring opens a reaction window. Income resolves on the
    /// spot; a coup goes straight to the penalty.
    pub fn interruptible(&self) -> bool {
        !matches!(self, ActionKind::Income | ActionKind::Coup)
    }
    /// Whether the declaration itself can be contested. Foreign aid claims
    /// no character, so only its block is contestable.
    pub fn contestable(&self) -> bool {
        self.interruptible() && !matches!(self, ActionKind::ForeignAid)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ActionKind::Income => write!(f, "Income"),
            ActionKind::ForeignAid => write!(f, "Foreign Aid"),
            ActionKind::Tax => write!(f, "Tax"),
            ActionKind::Steal => write!(f, "Steal"),
            ActionKind::Assassinate => write!(f, "Assassinate"),
            ActionKind::Coup => write!(f, "Coup"),
            ActionKind::Exchange => write!(f, "Exchange"),
            ActionKind::Investigate => write!(f, "Investigate"),
        }
    }
}

/// Where an open declaration stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Blocked,
    Challenged,
    Resolved,
}

/// An open declaration: who did what to whom, and who objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub actor: PlayerId,
    pub target: Option<PlayerId>,
    pub status: Status,
    pub blocker: Option<PlayerId>,
    pub block_claim: Option<Role>,
}

impl Action {
    pub fn declare(kind: ActionKind, actor: PlayerId, target: Option<PlayerId>) -> Self {
        Self {
            kind,
            actor,
            target,
            status: Status::Pending,
            blocker: None,
            block_claim: None,
        }
    }
    /// The player a contest accuses of bluffing: the blocker once a block is
    /// up, otherwise the actor.
    pub fn accused(&self) -> PlayerId {
        match self.status {
            Status::Blocked => self.blocker.unwrap_or(self.actor),
            _ => self.actor,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.target {
            Some(target) => write!(f, "{} by {} on {}", self.kind, self.actor, target),
            None => write!(f, "{} by {}", self.kind, self.actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn costs_match_the_table() {
        assert_eq!(ActionKind::Income.cost(), 0);
        assert_eq!(ActionKind::Assassinate.cost(), 3);
        assert_eq!(ActionKind::Coup.cost(), 7);
    }
    #[test]
    fn only_income_and_coup_skip_the_window() {
        assert!(!ActionKind::Income.interruptible());
        assert!(!ActionKind::Coup.interruptible());
        assert!(ActionKind::ForeignAid.interruptible());
        assert!(ActionKind::Tax.interruptible());
    }
    #[test]
    fn foreign_aid_is_blockable_but_not_contestable() {
        assert!(!ActionKind::ForeignAid.contestable());
        assert_eq!(ActionKind::ForeignAid.block_roles(false), &[Role::Duke]);
    }
    #[test]
    fn steal_block_follows_the_variant() {
        assert!(ActionKind::Steal.block_roles(false).contains(&Role::Ambassador));
        assert!(ActionKind::Steal.block_roles(true).contains(&Role::Inquisitor));
        assert!(ActionKind::Steal.block_roles(true).contains(&Role::Captain));
    }
    #[test]
    fn exchange_claim_follows_the_variant() {
        assert_eq!(ActionKind::Exchange.required_role(false), Some(Role::Ambassador));
        assert_eq!(ActionKind::Exchange.required_role(true), Some(Role::Inquisitor));
    }
    #[test]
    fn accused_is_blocker_once_blocked() {
        let actor = PlayerId::default();
        let blocker = PlayerId::default();
        let mut action = Action::declare(ActionKind::Steal, actor, Some(blocker));
        assert_eq!(action.accused(), actor);
        action.status = Status::Blocked;
        action.blocker = Some(blocker);
        assert_eq!(action.accused(), blocker);
    }
}
