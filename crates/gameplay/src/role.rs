use coup_core::Arbitrary;
use serde::Deserialize;
use serde::Serialize;

/// A character role printed on an influence card.
///
/// Every match fields five roles. The Inquisitor is a variant character that
/// replaces the Ambassador for the whole match when the room setting asks for
/// it; the two never coexist in one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Inquisitor,
    Contessa,
}

impl Role {
    /// The five roles in play for a match.
    pub fn lineup(use_inquisitor: bool) -> [Role; 5] {
        [
            Role::Duke,
            Role::Assassin,
            Role::Captain,
            if use_inquisitor {
                Role::Inquisitor
            } else {
                Role::Ambassador
            },
            Role::Contessa,
        ]
    }
    /// The role that trades cards with the deck (variant-dependent).
    pub fn exchanger(use_inquisitor: bool) -> Role {
        if use_inquisitor {
            Role::Inquisitor
        } else {
            Role::Ambassador
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::Duke => write!(f, "Duke"),
            Role::Assassin => write!(f, "Assassin"),
            Role::Captain => write!(f, "Captain"),
            Role::Ambassador => write!(f, "Ambassador"),
            Role::Inquisitor => write!(f, "Inquisitor"),
            Role::Contessa => write!(f, "Contessa"),
        }
    }
}

impl Arbitrary for Role {
    fn random() -> Self {
        match rand::random_range(0..6) {
            0 => Role::Duke,
            1 => Role::Assassin,
            2 => Role::Captain,
            3 => Role::Ambassador,
            4 => Role::Inquisitor,
            _ => Role::Contessa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn lineup_swaps_exactly_one_role() {
        let standard = Role::lineup(false);
        let variant = Role::lineup(true);
        assert!(standard.contains(&Role::Ambassador));
        assert!(!standard.contains(&Role::Inquisitor));
        assert!(variant.contains(&Role::Inquisitor));
        assert!(!variant.contains(&Role::Ambassador));
        assert_eq!(
            standard.iter().filter(|r| variant.contains(r)).count(),
            4
        );
    }
    #[test]
    fn random_roles_cover_every_character() {
        let seen = (0..256).map(|_| Role::random()).collect::<std::collections::HashSet<_>>();
        assert_eq!(seen.len(), 6);
    }
}
