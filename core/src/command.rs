use serde::{Deserialize, Serialize};
use crate::types::{EventId, PolicyId};

/// All player-issued commands.
/// Variants are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    EnactPolicy {
        policy_id: PolicyId,
    },
    AdvanceYear,
    ChooseOption {
        event_id:     EventId,
        option_index: usize,
    },
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnactPolicy { .. }  => "enact_policy",
            Self::AdvanceYear         => "advance_year",
            Self::ChooseOption { .. } => "choose_option",
        }
    }
}
