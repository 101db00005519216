//! Tests for `AddressBook`: id allocation, schedule conflicts, enrolment and
//! cascading deletes.

use tutorly_core::model::{Feedback, Name, Phone, Subject};
use tutorly_core::storage::from_json;
use tutorly_core::{
    parse_command, AddressBook, AttendanceRecord, ListError, Session, SessionId, Student,
    StudentId, Timeslot, TutorlyError,
};

fn student(id: u32, name: &str) -> Student {
    Student::new(
        StudentId::new(id).unwrap(),
        Name::parse(name).unwrap(),
        Phone::parse("91234567").unwrap(),
    )
}

fn session(id: u32, timeslot: &str) -> Session {
    Session::new(
        SessionId::new(id).unwrap(),
        Timeslot::parse(timeslot).unwrap(),
        Subject::parse("Math").unwrap(),
    )
}

fn sid(id: u32) -> StudentId {
    StudentId::new(id).unwrap()
}

fn ses(id: u32) -> SessionId {
    SessionId::new(id).unwrap()
}

fn enrolled_book() -> AddressBook {
    let mut book = AddressBook::new();
    book.add_student(student(1, "Alice")).unwrap();
    book.add_student(student(2, "Bob")).unwrap();
    book.add_session(session(1, "2025-03-01 10:00 - 12:00")).unwrap();
    book.add_session(session(2, "2025-03-02 10:00 - 12:00")).unwrap();
    book.enrol(sid(1), ses(1)).unwrap();
    book.enrol(sid(2), ses(1)).unwrap();
    book.enrol(sid(1), ses(2)).unwrap();
    book
}

// ─────────────────────────────────────────────────────────────────────────────
// Students
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn next_student_id_starts_at_one_and_follows_max() {
    let mut book = AddressBook::new();
    assert_eq!(book.next_student_id().unwrap(), sid(1));
    book.add_student(student(5, "Alice")).unwrap();
    assert_eq!(book.next_student_id().unwrap(), sid(6));
}

#[test]
fn adding_past_the_largest_id_fails_without_changes() {
    let mut book = from_json(
        r#"{
            "persons": [{ "id": 4294967295, "name": "Alice", "phone": "123" }],
            "sessions": [{
                "id": 4294967295,
                "timeslot": { "start": "2025-03-01T10:00:00", "end": "2025-03-01T12:00:00" },
                "subject": "Math",
                "attendanceRecords": []
            }]
        }"#,
    )
    .unwrap();
    let before = book.clone();

    assert!(matches!(
        book.next_student_id(),
        Err(TutorlyError::Validation { field: "student id", .. })
    ));
    assert!(parse_command("student add n/Bob p/456")
        .unwrap()
        .execute(&mut book)
        .is_err());

    assert!(book.next_session_id().is_err());
    assert!(parse_command("session add ts/2025-03-02 10:00 - 12:00 sub/Physics")
        .unwrap()
        .execute(&mut book)
        .is_err());

    assert_eq!(book, before);
}

#[test]
fn duplicate_name_is_rejected_case_insensitively() {
    let mut book = AddressBook::new();
    book.add_student(student(1, "Alice Tan")).unwrap();
    let err = book.add_student(student(2, "alice tan")).unwrap_err();
    assert!(matches!(err, TutorlyError::List(ListError::DuplicateElement)));
    assert_eq!(book.students().len(), 1);
}

#[test]
fn duplicate_id_is_rejected() {
    let mut book = AddressBook::new();
    book.add_student(student(1, "Alice")).unwrap();
    let err = book.add_student(student(1, "Bob")).unwrap_err();
    assert!(matches!(err, TutorlyError::List(ListError::DuplicateElement)));
}

#[test]
fn set_student_keeps_position() {
    let mut book = enrolled_book();
    let target = book.student(sid(1)).unwrap().clone();
    let mut edited = target.clone();
    edited.phone = Phone::parse("88887777").unwrap();
    book.set_student(&target, edited.clone()).unwrap();
    assert_eq!(book.students()[0], edited);
}

#[test]
fn set_student_to_taken_name_fails() {
    let mut book = enrolled_book();
    let target = book.student(sid(1)).unwrap().clone();
    let mut edited = target.clone();
    edited.name = Name::parse("BOB").unwrap();
    let err = book.set_student(&target, edited).unwrap_err();
    assert!(matches!(err, TutorlyError::List(ListError::DuplicateElement)));
}

#[test]
fn set_student_cannot_change_id() {
    let mut book = enrolled_book();
    let target = book.student(sid(1)).unwrap().clone();
    let mut edited = target.clone();
    edited.id = sid(9);
    assert!(book.set_student(&target, edited).is_err());
}

#[test]
fn remove_student_cascades_to_records() {
    let mut book = enrolled_book();
    let removed = book.remove_student(sid(1)).unwrap();
    assert_eq!(removed.id, sid(1));
    assert!(book.records_for_student(sid(1)).is_empty());
    assert_eq!(book.attendance_records().len(), 1, "Bob's record survives");
}

#[test]
fn remove_unknown_student_fails() {
    let mut book = enrolled_book();
    let err = book.remove_student(sid(42)).unwrap_err();
    assert!(matches!(err, TutorlyError::StudentNotFound(id) if id == sid(42)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overlapping_session_is_a_schedule_conflict() {
    let mut book = enrolled_book();
    let err = book
        .add_session(session(3, "2025-03-01 11:00 - 13:00"))
        .unwrap_err();
    assert!(matches!(err, TutorlyError::ScheduleConflict(id) if id == ses(1)));
    assert_eq!(book.sessions().len(), 2);
}

#[test]
fn back_to_back_sessions_are_allowed() {
    let mut book = enrolled_book();
    book.add_session(session(3, "2025-03-01 12:00 - 13:00")).unwrap();
    book.add_session(session(4, "2025-03-01 09:00 - 10:00")).unwrap();
    assert_eq!(book.sessions().len(), 4);
}

#[test]
fn editing_a_session_ignores_its_own_timeslot() {
    let mut book = enrolled_book();
    let target = book.session(ses(1)).unwrap().clone();
    let mut edited = target.clone();
    edited.timeslot = Timeslot::parse("2025-03-01 11:00 - 12:30").unwrap();
    book.set_session(&target, edited.clone()).unwrap();
    assert_eq!(book.sessions()[0], edited);
}

#[test]
fn editing_a_session_into_another_is_a_conflict() {
    let mut book = enrolled_book();
    let target = book.session(ses(1)).unwrap().clone();
    let mut edited = target.clone();
    edited.timeslot = Timeslot::parse("2025-03-02 11:00 - 13:00").unwrap();
    let err = book.set_session(&target, edited).unwrap_err();
    assert!(matches!(err, TutorlyError::ScheduleConflict(id) if id == ses(2)));
}

#[test]
fn remove_session_cascades_to_records() {
    let mut book = enrolled_book();
    book.remove_session(ses(1)).unwrap();
    assert!(book.records_for_session(ses(1)).is_empty());
    assert_eq!(book.attendance_records().len(), 1);
    assert_eq!(book.next_session_id().unwrap(), ses(3));
}

// ─────────────────────────────────────────────────────────────────────────────
// Attendance
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn enrol_creates_absent_record_without_feedback() {
    let book = enrolled_book();
    let record = book.record(sid(2), ses(1)).unwrap();
    assert!(!record.is_present);
    assert!(record.feedback.as_str().is_empty());
}

#[test]
fn enrol_twice_fails() {
    let mut book = enrolled_book();
    let err = book.enrol(sid(1), ses(1)).unwrap_err();
    assert!(matches!(err, TutorlyError::AlreadyEnrolled { .. }));
}

#[test]
fn enrol_unknown_ids_fail() {
    let mut book = enrolled_book();
    assert!(matches!(
        book.enrol(sid(9), ses(1)).unwrap_err(),
        TutorlyError::StudentNotFound(_)
    ));
    assert!(matches!(
        book.enrol(sid(1), ses(9)).unwrap_err(),
        TutorlyError::SessionNotFound(_)
    ));
}

#[test]
fn mark_and_unmark_attendance() {
    let mut book = enrolled_book();
    book.mark_attendance(sid(1), ses(1), true).unwrap();
    assert!(book.record(sid(1), ses(1)).unwrap().is_present);
    book.mark_attendance(sid(1), ses(1), false).unwrap();
    assert!(!book.record(sid(1), ses(1)).unwrap().is_present);
}

#[test]
fn marking_keeps_record_order() {
    let mut book = enrolled_book();
    let before: Vec<(StudentId, SessionId)> = book
        .attendance_records()
        .iter()
        .map(|r| (r.student_id, r.session_id))
        .collect();
    book.mark_attendance(sid(2), ses(1), true).unwrap();
    let after: Vec<(StudentId, SessionId)> = book
        .attendance_records()
        .iter()
        .map(|r| (r.student_id, r.session_id))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn mark_without_enrolment_fails() {
    let mut book = enrolled_book();
    let err = book.mark_attendance(sid(2), ses(2), true).unwrap_err();
    assert!(matches!(err, TutorlyError::NotEnrolled { .. }));
}

#[test]
fn feedback_is_recorded() {
    let mut book = enrolled_book();
    book.set_feedback(sid(1), ses(2), Feedback::parse("Great progress").unwrap())
        .unwrap();
    assert_eq!(
        book.record(sid(1), ses(2)).unwrap().feedback.as_str(),
        "Great progress"
    );
}

#[test]
fn unenrol_removes_record() {
    let mut book = enrolled_book();
    let removed = book.unenrol(sid(1), ses(2)).unwrap();
    assert_eq!(removed, AttendanceRecord::new(sid(1), ses(2)));
    assert!(!book.is_enrolled(sid(1), ses(2)));
    assert!(book.unenrol(sid(1), ses(2)).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Bulk replacement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn from_parts_rejects_dangling_records() {
    let err = AddressBook::from_parts(
        vec![student(1, "Alice")],
        vec![session(1, "2025-03-01 10:00 - 12:00")],
        vec![AttendanceRecord::new(sid(2), ses(1))],
    )
    .unwrap_err();
    assert!(matches!(err, TutorlyError::CorruptData(_)));
}

#[test]
fn from_parts_rejects_repeated_student_ids() {
    let err = AddressBook::from_parts(
        vec![student(1, "Alice"), student(1, "Bob")],
        Vec::new(),
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, TutorlyError::CorruptData(_)));
}

#[test]
fn from_parts_rejects_overlapping_sessions() {
    let err = AddressBook::from_parts(
        Vec::new(),
        vec![
            session(1, "2025-03-01 10:00 - 12:00"),
            session(2, "2025-03-01 11:00 - 12:00"),
        ],
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, TutorlyError::CorruptData(_)));
}

#[test]
fn reset_failure_leaves_book_unchanged() {
    let mut book = enrolled_book();
    let before = book.clone();
    let err = book
        .reset(
            vec![student(1, "Alice"), student(2, "ALICE")],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
    assert!(matches!(err, TutorlyError::List(ListError::DuplicateElement)));
    assert_eq!(book, before);
}

#[test]
fn clear_empties_all_lists() {
    let mut book = enrolled_book();
    book.clear();
    assert!(book.students().is_empty());
    assert!(book.sessions().is_empty());
    assert!(book.attendance_records().is_empty());
}
