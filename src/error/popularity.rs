use thiserror::Error;

use crate::model::popularity::SearchSubject;

#[derive(Error, Debug)]
pub enum PopularityError {
    #[error("[Popularity] Failed to record search for {subject} {key}: {reason}")]
    Increment {
        subject: SearchSubject,
        key:     String,
        reason:  String,
    },

    #[error("[Popularity] Failed to read top {subject} searches: {reason}")]
    Top { subject: SearchSubject, reason: String },
}
