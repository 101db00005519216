//! JSON persistence for the address book.
//!
//! The file holds two top-level arrays, `persons` and `sessions`. Attendance
//! records are nested under the session they belong to and reference
//! students by numeric id:
//!
//! ```json
//! {
//!   "persons": [{ "id": 1, "name": "Alice Tan", "phone": "91234567", "memo": "", "tags": [] }],
//!   "sessions": [{
//!     "id": 1,
//!     "timeslot": { "start": "2025-03-01T10:00:00", "end": "2025-03-01T12:00:00" },
//!     "subject": "Math",
//!     "attendanceRecords": [{ "studentId": 1, "sessionId": 1, "isPresent": true, "feedback": "" }]
//!   }]
//! }
//! ```
//!
//! Every save rewrites the whole file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::address_book::AddressBook;
use crate::error::{Result, TutorlyError};
use crate::model::{AttendanceRecord, Feedback, Session, SessionId, Student, StudentId, Subject, Timeslot};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonAddressBook {
    #[serde(default)]
    persons: Vec<Student>,
    #[serde(default)]
    sessions: Vec<JsonSession>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSession {
    id: SessionId,
    timeslot: Timeslot,
    subject: Subject,
    #[serde(default)]
    attendance_records: Vec<JsonAttendanceRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonAttendanceRecord {
    student_id: StudentId,
    session_id: SessionId,
    #[serde(default)]
    is_present: bool,
    #[serde(default)]
    feedback: Feedback,
}

impl JsonAddressBook {
    fn from_book(book: &AddressBook) -> Self {
        let sessions = book
            .sessions()
            .iter()
            .map(|session| JsonSession {
                id: session.id,
                timeslot: session.timeslot,
                subject: session.subject.clone(),
                attendance_records: book
                    .records_for_session(session.id)
                    .into_iter()
                    .map(|r| JsonAttendanceRecord {
                        student_id: r.student_id,
                        session_id: r.session_id,
                        is_present: r.is_present,
                        feedback: r.feedback.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            persons: book.students().to_vec(),
            sessions,
        }
    }

    fn into_book(self) -> Result<AddressBook> {
        let mut sessions = Vec::with_capacity(self.sessions.len());
        let mut records = Vec::new();

        for json in self.sessions {
            for record in json.attendance_records {
                if record.session_id != json.id {
                    return Err(TutorlyError::CorruptData(format!(
                        "attendance record for session {} is stored under session {}",
                        record.session_id, json.id
                    )));
                }
                records.push(
                    AttendanceRecord::new(record.student_id, record.session_id)
                        .with_presence(record.is_present)
                        .with_feedback(record.feedback),
                );
            }
            sessions.push(Session::new(json.id, json.timeslot, json.subject));
        }

        AddressBook::from_parts(self.persons, sessions, records)
    }
}

/// Parses an address book from its JSON text.
pub fn from_json(json: &str) -> Result<AddressBook> {
    let data: JsonAddressBook = serde_json::from_str(json)?;
    data.into_book()
}

/// Renders an address book as pretty-printed JSON.
pub fn to_json(book: &AddressBook) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonAddressBook::from_book(book))?)
}

/// Loads the book stored at `path`.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, holds
/// values that fail validation, or breaks a book invariant.
pub fn load(path: &Path) -> Result<Option<AddressBook>> {
    if !path.exists() {
        debug!(path = %path.display(), "data file not found");
        return Ok(None);
    }
    let json = fs::read_to_string(path).map_err(|source| TutorlyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let book = from_json(&json).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "data file could not be loaded");
    })?;
    debug!(
        path = %path.display(),
        students = book.students().len(),
        sessions = book.sessions().len(),
        "loaded address book"
    );
    Ok(Some(book))
}

/// Writes `book` to `path`, creating parent directories as needed.
pub fn save(path: &Path, book: &AddressBook) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| TutorlyError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = to_json(book)?;
    fs::write(path, json).map_err(|source| TutorlyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "saved address book");
    Ok(())
}
