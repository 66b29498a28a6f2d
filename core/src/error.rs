use crate::types::EventId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No event is awaiting a response")]
    NoActiveEvent,

    #[error("Event '{requested}' is not active (active: '{active}')")]
    StaleEvent { requested: EventId, active: EventId },

    #[error("Event '{event_id}' has no option {index} ({count} options)")]
    OptionOutOfRange {
        event_id: EventId,
        index:    usize,
        count:    usize,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    /// True for player mistakes that leave the city untouched.
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            Self::NoActiveEvent | Self::StaleEvent { .. } | Self::OptionOutOfRange { .. }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
