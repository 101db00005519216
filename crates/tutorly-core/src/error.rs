//! Error types for tutorly-core operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{SessionId, StudentId};
use crate::unique_list::ListError;

/// Errors that can occur while validating, parsing, executing or persisting.
#[derive(Error, Debug)]
pub enum TutorlyError {
    /// A uniqueness violation or missing element reported by a `UniqueList`.
    #[error(transparent)]
    List(#[from] ListError),

    /// A field value failed its format rule.
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A command line could not be parsed.
    #[error("Invalid command format: {0}")]
    Parse(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No student with id {0}")]
    StudentNotFound(StudentId),

    #[error("No session with id {0}")]
    SessionNotFound(SessionId),

    #[error("Student {student} is not enrolled in session {session}")]
    NotEnrolled {
        student: StudentId,
        session: SessionId,
    },

    #[error("Student {student} is already enrolled in session {session}")]
    AlreadyEnrolled {
        student: StudentId,
        session: SessionId,
    },

    /// The timeslot of a new or edited session overlaps an existing one.
    #[error("Timeslot overlaps with session {0}")]
    ScheduleConflict(SessionId),

    /// A data file contained references or ids that cannot be reconciled.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TutorlyError {
    /// Shorthand for a [`TutorlyError::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout tutorly-core.
pub type Result<T> = std::result::Result<T, TutorlyError>;
