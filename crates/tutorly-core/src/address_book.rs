//! The in-memory book of students, sessions and attendance records.
//!
//! Each collection is a [`UniqueList`]; this type layers the cross-collection
//! rules on top: id allocation, schedule conflicts, enrolment checks and
//! cascading deletes of attendance records.

use tracing::debug;

use crate::error::{Result, TutorlyError};
use crate::filter::Filter;
use crate::model::{AttendanceRecord, Feedback, Session, SessionId, Student, StudentId, Timeslot};
use crate::unique_list::{ListError, UniqueList};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressBook {
    students: UniqueList<Student>,
    sessions: UniqueList<Session>,
    records: UniqueList<AttendanceRecord>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from already-identified data, checking every invariant
    /// the incremental operations would.
    ///
    /// # Errors
    ///
    /// - [`ListError::DuplicateElement`] if a list contains duplicates.
    /// - [`TutorlyError::CorruptData`] for repeated student ids, sessions
    ///   with overlapping timeslots, or records pointing at unknown ids.
    pub fn from_parts(
        students: Vec<Student>,
        sessions: Vec<Session>,
        records: Vec<AttendanceRecord>,
    ) -> Result<Self> {
        let mut book = Self::new();
        book.reset(students, sessions, records)?;
        Ok(book)
    }

    /// Replaces all three lists at once. On error the book is unchanged.
    pub fn reset(
        &mut self,
        students: Vec<Student>,
        sessions: Vec<Session>,
        records: Vec<AttendanceRecord>,
    ) -> Result<()> {
        for (i, a) in students.iter().enumerate() {
            if students[i + 1..].iter().any(|b| a.id == b.id) {
                return Err(TutorlyError::CorruptData(format!(
                    "student id {} is used more than once",
                    a.id
                )));
            }
        }
        for (i, a) in sessions.iter().enumerate() {
            if let Some(b) = sessions[i + 1..]
                .iter()
                .find(|b| a.id != b.id && a.timeslot.is_overlapping(&b.timeslot))
            {
                return Err(TutorlyError::CorruptData(format!(
                    "sessions {} and {} overlap",
                    a.id, b.id
                )));
            }
        }
        for record in &records {
            if !students.iter().any(|s| s.id == record.student_id) {
                return Err(TutorlyError::CorruptData(format!(
                    "attendance record refers to missing student {}",
                    record.student_id
                )));
            }
            if !sessions.iter().any(|s| s.id == record.session_id) {
                return Err(TutorlyError::CorruptData(format!(
                    "attendance record refers to missing session {}",
                    record.session_id
                )));
            }
        }

        let mut next = Self::new();
        next.students.set_all(students)?;
        next.sessions.set_all(sessions)?;
        next.records.set_all(records)?;
        *self = next;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.students.clear();
        self.sessions.clear();
        self.records.clear();
    }

    pub fn students(&self) -> &[Student] {
        self.students.as_slice()
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.as_slice()
    }

    pub fn attendance_records(&self) -> &[AttendanceRecord] {
        self.records.as_slice()
    }

    // ── Students ────────────────────────────────────────────────────────────

    pub fn student(&self, id: StudentId) -> Result<&Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or(TutorlyError::StudentNotFound(id))
    }

    /// One past the largest student id in use.
    ///
    /// Fails when the largest id in use is `u32::MAX`.
    pub fn next_student_id(&self) -> Result<StudentId> {
        match self.students.iter().map(|s| s.id).max() {
            Some(max) => max.next(),
            None => Ok(StudentId::FIRST),
        }
    }

    /// Adds a student. The id must not already be taken.
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.students.iter().any(|s| s.id == student.id) {
            return Err(ListError::DuplicateElement.into());
        }
        debug!(id = %student.id, name = %student.name, "adding student");
        self.students.add(student)?;
        Ok(())
    }

    /// Replaces `target` with `edited`. The id may not change.
    pub fn set_student(&mut self, target: &Student, edited: Student) -> Result<()> {
        if target.id != edited.id {
            return Err(TutorlyError::validation(
                "student id",
                "the id of an existing student cannot change",
            ));
        }
        debug!(id = %edited.id, "editing student");
        self.students.set(target, edited)?;
        Ok(())
    }

    /// Removes the student and every attendance record that refers to them.
    pub fn remove_student(&mut self, id: StudentId) -> Result<Student> {
        let target = self.student(id)?.clone();
        let removed = self.students.remove(&target)?;
        let dropped = self.records.remove_if(|r| r.student_id == id);
        debug!(%id, dropped_records = dropped, "removed student");
        Ok(removed)
    }

    pub fn filtered_students<F>(&self, filter: &F) -> Vec<&Student>
    where
        F: Filter<Student> + ?Sized,
    {
        let predicate = filter.to_predicate(self);
        self.students.iter().filter(|s| predicate(s)).collect()
    }

    // ── Sessions ────────────────────────────────────────────────────────────

    pub fn session(&self, id: SessionId) -> Result<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(TutorlyError::SessionNotFound(id))
    }

    pub fn next_session_id(&self) -> Result<SessionId> {
        match self.sessions.iter().map(|s| s.id).max() {
            Some(max) => max.next(),
            None => Ok(SessionId::FIRST),
        }
    }

    /// First session other than `exclude` whose timeslot overlaps `timeslot`.
    pub fn conflicting_session(
        &self,
        timeslot: &Timeslot,
        exclude: Option<SessionId>,
    ) -> Option<&Session> {
        self.sessions
            .iter()
            .filter(|s| Some(s.id) != exclude)
            .find(|s| s.timeslot.is_overlapping(timeslot))
    }

    /// Adds a session, rejecting timeslots that overlap an existing one.
    pub fn add_session(&mut self, session: Session) -> Result<()> {
        if let Some(other) = self.conflicting_session(&session.timeslot, None) {
            return Err(TutorlyError::ScheduleConflict(other.id));
        }
        debug!(id = %session.id, timeslot = %session.timeslot, "adding session");
        self.sessions.add(session)?;
        Ok(())
    }

    pub fn set_session(&mut self, target: &Session, edited: Session) -> Result<()> {
        if target.id != edited.id {
            return Err(TutorlyError::validation(
                "session id",
                "the id of an existing session cannot change",
            ));
        }
        if let Some(other) = self.conflicting_session(&edited.timeslot, Some(target.id)) {
            return Err(TutorlyError::ScheduleConflict(other.id));
        }
        debug!(id = %edited.id, "editing session");
        self.sessions.set(target, edited)?;
        Ok(())
    }

    /// Removes the session and every attendance record that refers to it.
    pub fn remove_session(&mut self, id: SessionId) -> Result<Session> {
        let target = self.session(id)?.clone();
        let removed = self.sessions.remove(&target)?;
        let dropped = self.records.remove_if(|r| r.session_id == id);
        debug!(%id, dropped_records = dropped, "removed session");
        Ok(removed)
    }

    pub fn filtered_sessions<F>(&self, filter: &F) -> Vec<&Session>
    where
        F: Filter<Session> + ?Sized,
    {
        let predicate = filter.to_predicate(self);
        self.sessions.iter().filter(|s| predicate(s)).collect()
    }

    // ── Attendance ──────────────────────────────────────────────────────────

    pub fn record(&self, student: StudentId, session: SessionId) -> Result<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.student_id == student && r.session_id == session)
            .ok_or(TutorlyError::NotEnrolled { student, session })
    }

    pub fn is_enrolled(&self, student: StudentId, session: SessionId) -> bool {
        self.record(student, session).is_ok()
    }

    pub fn records_for_session(&self, session: SessionId) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| r.session_id == session)
            .collect()
    }

    pub fn records_for_student(&self, student: StudentId) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| r.student_id == student)
            .collect()
    }

    /// Enrols a student in a session as absent with no feedback.
    pub fn enrol(&mut self, student: StudentId, session: SessionId) -> Result<()> {
        self.student(student)?;
        self.session(session)?;
        let record = AttendanceRecord::new(student, session);
        if self.records.contains(&record) {
            return Err(TutorlyError::AlreadyEnrolled { student, session });
        }
        debug!(%student, %session, "enrolling");
        self.records.add(record)?;
        Ok(())
    }

    pub fn unenrol(&mut self, student: StudentId, session: SessionId) -> Result<AttendanceRecord> {
        let target = self.existing_record(student, session)?;
        debug!(%student, %session, "unenrolling");
        Ok(self.records.remove(&target)?)
    }

    pub fn mark_attendance(
        &mut self,
        student: StudentId,
        session: SessionId,
        is_present: bool,
    ) -> Result<()> {
        let target = self.existing_record(student, session)?;
        let edited = target.clone().with_presence(is_present);
        debug!(%student, %session, is_present, "marking attendance");
        self.records.set(&target, edited)?;
        Ok(())
    }

    pub fn set_feedback(
        &mut self,
        student: StudentId,
        session: SessionId,
        feedback: Feedback,
    ) -> Result<()> {
        let target = self.existing_record(student, session)?;
        let edited = target.clone().with_feedback(feedback);
        debug!(%student, %session, "recording feedback");
        self.records.set(&target, edited)?;
        Ok(())
    }

    /// The record for the pair. Unknown ids fail before `NotEnrolled`.
    fn existing_record(&self, student: StudentId, session: SessionId) -> Result<AttendanceRecord> {
        self.student(student)?;
        self.session(session)?;
        self.record(student, session).cloned()
    }
}
