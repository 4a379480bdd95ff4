use thiserror::Error;

use erpdesk_client::ApiError;

use crate::action::Action;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The record's current status does not offer the action.
    #[error("cannot {action} while {status}")]
    ActionUnavailable { action: Action, status: String },
}

impl RecordError {
    /// Text the UI shows inline.
    pub fn message(&self) -> String {
        match self {
            Self::Api(err) => err.message(),
            other => other.to_string(),
        }
    }
}
