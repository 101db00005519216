//! Tests for text command parsing and argument tokenization.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tutorly_core::command::args::{ArgumentMap, PREFIX_MEMO, PREFIX_NAME, PREFIX_TAG};
use tutorly_core::command::{Command, StudentEdit};
use tutorly_core::filter::{SessionFilter, StudentFilter};
use tutorly_core::model::{Email, Feedback, Name, Phone, Subject, Tag};
use tutorly_core::{parse_command, Keyword, SessionId, StudentId, Timeslot, TutorlyError};

fn sid(id: u32) -> StudentId {
    StudentId::new(id).unwrap()
}

fn ses(id: u32) -> SessionId {
    SessionId::new(id).unwrap()
}

fn kw(word: &str) -> Keyword {
    Keyword::parse(word).unwrap()
}

fn assert_parse_error(input: &str) {
    match parse_command(input) {
        Err(TutorlyError::Parse(_)) => {}
        other => panic!("expected parse error for {input:?}, got {other:?}"),
    }
}

fn assert_validation_error(input: &str, expected_field: &str) {
    match parse_command(input) {
        Err(TutorlyError::Validation { field, .. }) if field == expected_field => {}
        other => panic!("expected {expected_field} validation error for {input:?}, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tokenize_splits_preamble_and_values() {
    let args = ArgumentMap::tokenize("1 n/Alice Tan t/math t/sec3", &[PREFIX_NAME, PREFIX_TAG]);
    assert_eq!(args.preamble(), "1");
    assert_eq!(args.value(PREFIX_NAME), Some("Alice Tan"));
    assert_eq!(args.all_values(PREFIX_TAG), vec!["math", "sec3"]);
}

#[test]
fn tokenize_ignores_prefix_inside_a_word() {
    let args = ArgumentMap::tokenize("m/see https://a/b n/x", &[PREFIX_MEMO, PREFIX_NAME]);
    assert_eq!(args.value(PREFIX_MEMO), Some("see https://a/b"));
    assert_eq!(args.value(PREFIX_NAME), Some("x"));
}

#[test]
fn tokenize_ignores_unregistered_prefixes() {
    let args = ArgumentMap::tokenize("n/Alice p/123", &[PREFIX_NAME]);
    assert_eq!(args.value(PREFIX_NAME), Some("Alice p/123"));
}

#[test]
fn tokenize_empty_input() {
    let args = ArgumentMap::tokenize("", &[PREFIX_NAME]);
    assert_eq!(args.preamble(), "");
    assert!(!args.has_any_values());
}

// ─────────────────────────────────────────────────────────────────────────────
// Top level
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn simple_commands() {
    assert_eq!(parse_command("clear").unwrap(), Command::Clear);
    assert_eq!(parse_command("  help  ").unwrap(), Command::Help);
    assert_eq!(parse_command("exit").unwrap(), Command::Exit);
    assert_eq!(parse_command("student list").unwrap(), Command::ListStudents);
    assert_eq!(parse_command("session list").unwrap(), Command::ListSessions);
}

#[test]
fn simple_commands_reject_arguments() {
    assert_parse_error("exit now");
    assert_parse_error("student list all");
}

#[test]
fn unknown_commands() {
    for input in ["tutor add", "student fly", "session dance 1"] {
        assert!(
            matches!(parse_command(input), Err(TutorlyError::UnknownCommand(_))),
            "{input:?} should be unknown"
        );
    }
}

#[test]
fn empty_input_and_missing_action() {
    assert_parse_error("");
    assert_parse_error("student");
    assert_parse_error("session");
}

// ─────────────────────────────────────────────────────────────────────────────
// student
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn student_add_with_all_fields() {
    let command = parse_command(
        "student add n/Alice Tan p/91234567 e/alice@example.com a/Blk 1 m/Needs help t/sec3 t/math",
    )
    .unwrap();
    let Command::AddStudent(draft) = command else {
        panic!("expected AddStudent, got {command:?}");
    };
    assert_eq!(draft.name.as_str(), "Alice Tan");
    assert_eq!(draft.phone.as_str(), "91234567");
    assert_eq!(draft.email.unwrap().as_str(), "alice@example.com");
    assert_eq!(draft.address.unwrap().as_str(), "Blk 1");
    assert_eq!(draft.memo.as_str(), "Needs help");
    let tags: Vec<&str> = draft.tags.iter().map(Tag::as_str).collect();
    assert_eq!(tags, vec!["math", "sec3"]);
}

#[test]
fn student_add_requires_name_and_phone() {
    assert_parse_error("student add p/91234567");
    assert_parse_error("student add n/Alice");
}

#[test]
fn student_add_rejects_preamble_and_repeats() {
    assert_parse_error("student add junk n/Alice p/123");
    assert_parse_error("student add n/Alice n/Bob p/123");
}

#[test]
fn student_add_validates_fields() {
    assert_validation_error("student add n/Al!ce p/123", "name");
    assert_validation_error("student add n/Alice p/12", "phone");
    assert_validation_error("student add n/Alice p/123 e/nope", "email");
    assert_validation_error("student add n/Alice p/123 t/two words", "tag");
}

#[test]
fn student_edit_collects_given_fields() {
    let command = parse_command("student edit 3 p/88887777 t/").unwrap();
    assert_eq!(
        command,
        Command::EditStudent {
            id: sid(3),
            edit: StudentEdit {
                phone: Some(Phone::parse("88887777").unwrap()),
                tags: Some(BTreeSet::new()),
                ..StudentEdit::default()
            },
        }
    );
}

#[test]
fn student_edit_empty_email_or_address_clears_it() {
    let command = parse_command("student edit 2 e/ a/").unwrap();
    assert_eq!(
        command,
        Command::EditStudent {
            id: sid(2),
            edit: StudentEdit {
                email: Some(None),
                address: Some(None),
                ..StudentEdit::default()
            },
        }
    );
    let command = parse_command("student edit 2 e/bob@example.com").unwrap();
    let Command::EditStudent { edit, .. } = command else {
        panic!("expected EditStudent, got {command:?}");
    };
    assert_eq!(edit.email, Some(Some(Email::parse("bob@example.com").unwrap())));
    assert_eq!(edit.address, None);
}

#[test]
fn student_add_still_rejects_empty_email() {
    assert_validation_error("student add n/Alice p/123 e/", "email");
}

#[test]
fn student_edit_needs_id_and_a_field() {
    assert_parse_error("student edit n/Alice");
    assert_parse_error("student edit 3");
    assert_validation_error("student edit 0 n/Alice", "student id");
    assert_validation_error("student edit x n/Alice", "student id");
}

#[test]
fn student_delete() {
    assert_eq!(
        parse_command("student delete 7").unwrap(),
        Command::DeleteStudent(sid(7))
    );
    assert_parse_error("student delete");
}

#[test]
fn student_search_builds_one_leaf_per_keyword() {
    let command = parse_command("student search n/alice bob t/sec3 ses/2").unwrap();
    assert_eq!(
        command,
        Command::SearchStudents(vec![
            StudentFilter::NameContains(kw("alice")),
            StudentFilter::NameContains(kw("bob")),
            StudentFilter::TagContains(kw("sec3")),
            StudentFilter::AttendsSession(ses(2)),
        ])
    );
}

#[test]
fn student_search_needs_criteria() {
    assert_parse_error("student search");
    assert_parse_error("student search alice");
    assert_validation_error("student search n/", "keyword");
}

// ─────────────────────────────────────────────────────────────────────────────
// session
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn session_add() {
    let command = parse_command("session add ts/2025-03-01 10:00 - 12:00 sub/Math").unwrap();
    assert_eq!(
        command,
        Command::AddSession {
            timeslot: Timeslot::parse("2025-03-01 10:00 - 12:00").unwrap(),
            subject: Subject::parse("Math").unwrap(),
        }
    );
}

#[test]
fn session_add_errors() {
    assert_parse_error("session add sub/Math");
    assert_parse_error("session add ts/2025-03-01 10:00 - 12:00");
    assert_validation_error("session add ts/2025-03-01 12:00 - 10:00 sub/Math", "timeslot");
    assert_validation_error("session add ts/yesterday sub/Math", "timeslot");
    assert_validation_error("session add ts/2025-03-01 10:00 - 12:00 sub/M@th", "subject");
}

#[test]
fn session_edit() {
    assert_eq!(
        parse_command("session edit 2 sub/Physics").unwrap(),
        Command::EditSession {
            id: ses(2),
            timeslot: None,
            subject: Some(Subject::parse("Physics").unwrap()),
        }
    );
    assert_parse_error("session edit 2");
}

#[test]
fn session_search() {
    let command =
        parse_command("session search ses/1 on/2025-03-01 sub/math physics sid/4").unwrap();
    assert_eq!(
        command,
        Command::SearchSessions(vec![
            SessionFilter::IdEquals(ses(1)),
            SessionFilter::OnDate(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            SessionFilter::SubjectContains(kw("math")),
            SessionFilter::SubjectContains(kw("physics")),
            SessionFilter::AttendedBy(sid(4)),
        ])
    );
    assert_validation_error("session search on/March", "date");
    assert_parse_error("session search");
}

#[test]
fn attendance_commands() {
    assert_eq!(
        parse_command("session enrol 1 ses/2").unwrap(),
        Command::Enrol {
            student: sid(1),
            session: ses(2)
        }
    );
    assert_eq!(
        parse_command("session unenrol 1 ses/2").unwrap(),
        Command::Unenrol {
            student: sid(1),
            session: ses(2)
        }
    );
    assert_eq!(
        parse_command("session mark 1 ses/2").unwrap(),
        Command::MarkAttendance {
            student: sid(1),
            session: ses(2),
            is_present: true
        }
    );
    assert_eq!(
        parse_command("session unmark 1 ses/2").unwrap(),
        Command::MarkAttendance {
            student: sid(1),
            session: ses(2),
            is_present: false
        }
    );
    assert_parse_error("session enrol 1");
    assert_parse_error("session enrol ses/2");
    assert_parse_error("session mark 1 ses/2 ses/3");
}

#[test]
fn feedback_command() {
    assert_eq!(
        parse_command("session feedback 1 ses/2 f/Good work today").unwrap(),
        Command::Feedback {
            student: sid(1),
            session: ses(2),
            feedback: Feedback::parse("Good work today").unwrap(),
        }
    );
    assert_parse_error("session feedback 1 ses/2");
}

#[test]
fn names_may_contain_digits_and_unicode_letters() {
    let Command::AddStudent(draft) = parse_command("student add n/Zoë 2nd p/123").unwrap() else {
        panic!("expected AddStudent");
    };
    assert_eq!(draft.name, Name::parse("Zoë 2nd").unwrap());
}
