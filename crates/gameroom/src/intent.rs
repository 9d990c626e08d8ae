use coup_gameplay::ActionKind;
use coup_gameplay::CardId;
use coup_gameplay::Disposition;
use coup_gameplay::PlayerId;
use coup_gameplay::Role;
use serde::Deserialize;
use serde::Serialize;

/// Client-to-room commands.
///
/// Tagged for the wire; the sender's identity is attached by the transport
/// when the intent is wrapped in a [`crate::Post`], never trusted from the
/// payload. `Start` and `Reset` are host-gated inside the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Start,
    Reset,
    DeclareAction {
        kind: ActionKind,
        target: Option<PlayerId>,
    },
    DeclareBlock {
        claim: Role,
    },
    AcceptAction,
    AcceptBlock,
    ContestAction,
    ResolvePenalty {
        card: CardId,
    },
    FinalizeExchange {
        kept: Vec<CardId>,
    },
    SubmitInvestigationCard {
        card: CardId,
    },
    FinalizeInvestigation {
        decision: Disposition,
    },
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Intent::Start => write!(f, "start"),
            Intent::Reset => write!(f, "reset"),
            Intent::DeclareAction { kind, .. } => write!(f, "declare {}", kind),
            Intent::DeclareBlock { claim } => write!(f, "block with {}", claim),
            Intent::AcceptAction => write!(f, "accept action"),
            Intent::AcceptBlock => write!(f, "accept block"),
            Intent::ContestAction => write!(f, "contest"),
            Intent::ResolvePenalty { .. } => write!(f, "resolve penalty"),
            Intent::FinalizeExchange { .. } => write!(f, "finalize exchange"),
            Intent::SubmitInvestigationCard { .. } => write!(f, "submit investigation card"),
            Intent::FinalizeInvestigation { .. } => write!(f, "finalize investigation"),
        }
    }
}
