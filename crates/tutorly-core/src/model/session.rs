//! Tutoring sessions and the attendance records that tie students to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::fields::{Feedback, Subject};
use crate::model::ids::{SessionId, StudentId};
use crate::model::timeslot::Timeslot;
use crate::unique_list::Identity;

/// A scheduled session. Identity is the session id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub timeslot: Timeslot,
    pub subject: Subject,
}

impl Session {
    pub fn new(id: SessionId, timeslot: Timeslot, subject: Subject) -> Self {
        Self {
            id,
            timeslot,
            subject,
        }
    }
}

impl Identity for Session {
    fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.subject, self.timeslot)
    }
}

/// Enrolment of one student in one session, with attendance and feedback.
///
/// At most one record exists per `(student_id, session_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub session_id: SessionId,
    pub is_present: bool,
    pub feedback: Feedback,
}

impl AttendanceRecord {
    /// A fresh enrolment: absent, no feedback.
    pub fn new(student_id: StudentId, session_id: SessionId) -> Self {
        Self {
            student_id,
            session_id,
            is_present: false,
            feedback: Feedback::default(),
        }
    }

    pub fn with_presence(mut self, is_present: bool) -> Self {
        self.is_present = is_present;
        self
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }
}

impl Identity for AttendanceRecord {
    fn is_same(&self, other: &Self) -> bool {
        self.student_id == other.student_id && self.session_id == other.session_id
    }
}

impl fmt::Display for AttendanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_present { "present" } else { "absent" };
        write!(
            f,
            "student #{} in session #{}: {status}",
            self.student_id, self.session_id
        )?;
        if !self.feedback.as_str().is_empty() {
            write!(f, "; Feedback: {}", self.feedback)?;
        }
        Ok(())
    }
}
