//! Commands and their execution against an [`AddressBook`].
//!
//! - [`parser`] turns a line of text into a [`Command`].
//! - [`Command::execute`] applies it and reports a [`CommandResult`].

pub mod args;
pub mod parser;

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tracing::info;

use crate::address_book::AddressBook;
use crate::error::Result;
use crate::filter::{any, any_of, SessionFilter, StudentFilter};
use crate::model::{
    Address, Email, Feedback, Memo, Name, Phone, Session, SessionId, Student, StudentId, Subject,
    Tag, Timeslot,
};

pub use parser::parse_command;

pub const HELP_TEXT: &str = "\
Commands:
  student add n/NAME p/PHONE [e/EMAIL] [a/ADDRESS] [m/MEMO] [t/TAG]...
  student edit STUDENT_ID [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [m/MEMO] [t/TAG]...
  student delete STUDENT_ID
  student list
  student search [n/KEYWORDS] [p/KEYWORDS] [e/KEYWORDS] [a/KEYWORDS] [t/KEYWORDS] [ses/SESSION_ID]...
  session add ts/TIMESLOT sub/SUBJECT
  session edit SESSION_ID [ts/TIMESLOT] [sub/SUBJECT]
  session delete SESSION_ID
  session list
  session search [ses/SESSION_ID]... [on/DATE]... [sub/KEYWORDS] [sid/STUDENT_ID]...
  session enrol STUDENT_ID ses/SESSION_ID
  session unenrol STUDENT_ID ses/SESSION_ID
  session mark STUDENT_ID ses/SESSION_ID
  session unmark STUDENT_ID ses/SESSION_ID
  session feedback STUDENT_ID ses/SESSION_ID f/FEEDBACK
  clear
  help
  exit

TIMESLOT is 'yyyy-MM-dd HH:mm - HH:mm' or 'yyyy-MM-dd HH:mm - yyyy-MM-dd HH:mm'.
DATE is 'yyyy-MM-dd'.
In student edit, an empty e/, a/ or t/ clears that field.";

/// Fields of a student that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: Name,
    pub phone: Phone,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub memo: Memo,
    pub tags: BTreeSet<Tag>,
}

impl StudentDraft {
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            memo: self.memo,
            tags: self.tags,
        }
    }
}

/// Fields to overwrite on an existing student. `None` keeps the old value;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentEdit {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Option<Email>>,
    pub address: Option<Option<Address>>,
    pub memo: Option<Memo>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl StudentEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, student: &Student) -> Student {
        let mut edited = student.clone();
        if let Some(name) = &self.name {
            edited.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            edited.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            edited.email = email.clone();
        }
        if let Some(address) = &self.address {
            edited.address = address.clone();
        }
        if let Some(memo) = &self.memo {
            edited.memo = memo.clone();
        }
        if let Some(tags) = &self.tags {
            edited.tags = tags.clone();
        }
        edited
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStudent(StudentDraft),
    EditStudent {
        id: StudentId,
        edit: StudentEdit,
    },
    DeleteStudent(StudentId),
    ListStudents,
    /// Students matching any of the filters.
    SearchStudents(Vec<StudentFilter>),
    AddSession {
        timeslot: Timeslot,
        subject: Subject,
    },
    EditSession {
        id: SessionId,
        timeslot: Option<Timeslot>,
        subject: Option<Subject>,
    },
    DeleteSession(SessionId),
    ListSessions,
    /// Sessions matching any of the filters.
    SearchSessions(Vec<SessionFilter>),
    Enrol {
        student: StudentId,
        session: SessionId,
    },
    Unenrol {
        student: StudentId,
        session: SessionId,
    },
    MarkAttendance {
        student: StudentId,
        session: SessionId,
        is_present: bool,
    },
    Feedback {
        student: StudentId,
        session: SessionId,
        feedback: Feedback,
    },
    Clear,
    Help,
    Exit,
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Text to show the user.
    pub feedback: String,
    /// The book changed and should be saved.
    pub modified: bool,
    pub exit: bool,
}

impl CommandResult {
    fn read(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            modified: false,
            exit: false,
        }
    }

    fn changed(feedback: impl Into<String>) -> Self {
        Self {
            modified: true,
            ..Self::read(feedback)
        }
    }
}

impl Command {
    /// Applies the command to `book`.
    ///
    /// On error the book is left as it was before the call.
    pub fn execute(self, book: &mut AddressBook) -> Result<CommandResult> {
        let result = match self {
            Command::AddStudent(draft) => {
                let student = draft.into_student(book.next_student_id()?);
                let feedback = format!("New student added: {student}");
                book.add_student(student)?;
                CommandResult::changed(feedback)
            }
            Command::EditStudent { id, edit } => {
                let target = book.student(id)?.clone();
                let edited = edit.apply(&target);
                let feedback = format!("Edited student: {edited}");
                book.set_student(&target, edited)?;
                CommandResult::changed(feedback)
            }
            Command::DeleteStudent(id) => {
                let removed = book.remove_student(id)?;
                CommandResult::changed(format!("Deleted student: {removed}"))
            }
            Command::ListStudents => {
                let students = book.filtered_students(&any::<Student>(Vec::new()));
                CommandResult::read(render_list("student", &students))
            }
            Command::SearchStudents(filters) => {
                let students = book.filtered_students(&any_of::<Student, _>(filters));
                CommandResult::read(render_list("student", &students))
            }
            Command::AddSession { timeslot, subject } => {
                let session = Session::new(book.next_session_id()?, timeslot, subject);
                let feedback = format!("New session added: {session}");
                book.add_session(session)?;
                CommandResult::changed(feedback)
            }
            Command::EditSession {
                id,
                timeslot,
                subject,
            } => {
                let target = book.session(id)?.clone();
                let mut edited = target.clone();
                if let Some(timeslot) = timeslot {
                    edited.timeslot = timeslot;
                }
                if let Some(subject) = subject {
                    edited.subject = subject;
                }
                let feedback = format!("Edited session: {edited}");
                book.set_session(&target, edited)?;
                CommandResult::changed(feedback)
            }
            Command::DeleteSession(id) => {
                let removed = book.remove_session(id)?;
                CommandResult::changed(format!("Deleted session: {removed}"))
            }
            Command::ListSessions => {
                let sessions = book.filtered_sessions(&any::<Session>(Vec::new()));
                CommandResult::read(render_sessions(book, &sessions))
            }
            Command::SearchSessions(filters) => {
                let sessions = book.filtered_sessions(&any_of::<Session, _>(filters));
                CommandResult::read(render_sessions(book, &sessions))
            }
            Command::Enrol { student, session } => {
                book.enrol(student, session)?;
                CommandResult::changed(format!(
                    "Enrolled student {student} in session {session}"
                ))
            }
            Command::Unenrol { student, session } => {
                book.unenrol(student, session)?;
                CommandResult::changed(format!(
                    "Unenrolled student {student} from session {session}"
                ))
            }
            Command::MarkAttendance {
                student,
                session,
                is_present,
            } => {
                book.mark_attendance(student, session, is_present)?;
                let status = if is_present { "present" } else { "absent" };
                CommandResult::changed(format!(
                    "Marked student {student} as {status} for session {session}"
                ))
            }
            Command::Feedback {
                student,
                session,
                feedback,
            } => {
                book.set_feedback(student, session, feedback)?;
                CommandResult::changed(format!(
                    "Recorded feedback for student {student} in session {session}"
                ))
            }
            Command::Clear => {
                book.clear();
                CommandResult::changed("Address book has been cleared!")
            }
            Command::Help => CommandResult::read(HELP_TEXT),
            Command::Exit => CommandResult {
                exit: true,
                ..CommandResult::read("Goodbye!")
            },
        };

        if result.modified {
            info!(feedback = %result.feedback, "book modified");
        }
        Ok(result)
    }
}

fn render_list<T: std::fmt::Display>(noun: &str, items: &[&T]) -> String {
    let mut out = format!("{} {noun}(s) listed", items.len());
    for item in items {
        let _ = write!(out, "\n  {item}");
    }
    out
}

/// Lists sessions with each enrolled student's attendance underneath.
fn render_sessions(book: &AddressBook, sessions: &[&Session]) -> String {
    let mut out = format!("{} session(s) listed", sessions.len());
    for session in sessions {
        let _ = write!(out, "\n  {session}");
        for record in book.records_for_session(session.id) {
            let name = book
                .student(record.student_id)
                .map(|s| s.name.to_string())
                .unwrap_or_default();
            let status = if record.is_present { "present" } else { "absent" };
            let _ = write!(out, "\n    #{} {name}: {status}", record.student_id);
            if !record.feedback.as_str().is_empty() {
                let _ = write!(out, " ({})", record.feedback);
            }
        }
    }
    out
}
