//! Text command parsing.
//!
//! A command line is `<domain> <action> [preamble] [prefix/value]...`, e.g.
//! `student add n/Alice p/91234567` or `session mark 3 ses/2`. `clear`,
//! `help` and `exit` take no arguments.

use std::collections::BTreeSet;

use crate::command::args::*;
use crate::command::{Command, StudentDraft, StudentEdit};
use crate::error::{Result, TutorlyError};
use crate::filter::{SessionFilter, StudentFilter};
use crate::keyword::Keyword;
use crate::model::timeslot::parse_date;
use crate::model::{
    Address, Email, Feedback, Memo, Name, Phone, SessionId, StudentId, Subject, Tag, Timeslot,
};

const STUDENT_ADD_USAGE: &str =
    "student add n/NAME p/PHONE [e/EMAIL] [a/ADDRESS] [m/MEMO] [t/TAG]...";
const STUDENT_EDIT_USAGE: &str = "\
student edit STUDENT_ID [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [m/MEMO] [t/TAG]...
An empty e/, a/ or t/ clears that field.";
const STUDENT_DELETE_USAGE: &str = "student delete STUDENT_ID";
const STUDENT_SEARCH_USAGE: &str =
    "student search [n/KEYWORDS] [p/KEYWORDS] [e/KEYWORDS] [a/KEYWORDS] [t/KEYWORDS] [ses/SESSION_ID]...";
const SESSION_ADD_USAGE: &str = "session add ts/TIMESLOT sub/SUBJECT";
const SESSION_EDIT_USAGE: &str = "session edit SESSION_ID [ts/TIMESLOT] [sub/SUBJECT]";
const SESSION_DELETE_USAGE: &str = "session delete SESSION_ID";
const SESSION_SEARCH_USAGE: &str =
    "session search [ses/SESSION_ID]... [on/DATE]... [sub/KEYWORDS] [sid/STUDENT_ID]...";
const ATTENDANCE_USAGE: &str = "session <enrol|unenrol|mark|unmark> STUDENT_ID ses/SESSION_ID";
const FEEDBACK_USAGE: &str = "session feedback STUDENT_ID ses/SESSION_ID f/FEEDBACK";

/// Parses one line of user input into a [`Command`].
///
/// # Errors
///
/// - [`TutorlyError::UnknownCommand`] for an unrecognised command word.
/// - [`TutorlyError::Parse`] for a malformed argument list.
/// - [`TutorlyError::Validation`] for a field value that breaks its rule.
pub fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim();
    let (word, rest) = split_word(input);

    match word {
        "" => Err(TutorlyError::Parse("empty command; try 'help'".to_string())),
        "student" => parse_student(rest),
        "session" => parse_session(rest),
        "clear" => no_arguments(rest, Command::Clear),
        "help" => no_arguments(rest, Command::Help),
        "exit" => no_arguments(rest, Command::Exit),
        other => Err(TutorlyError::UnknownCommand(other.to_string())),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(i) => (&input[..i], input[i..].trim_start()),
        None => (input, ""),
    }
}

fn no_arguments(rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(TutorlyError::Parse(format!("unexpected arguments: {rest}")))
    }
}

// ── student ─────────────────────────────────────────────────────────────────

fn parse_student(input: &str) -> Result<Command> {
    let (action, rest) = split_word(input);
    match action {
        "add" => parse_student_add(rest),
        "edit" => parse_student_edit(rest),
        "delete" => {
            let args = ArgumentMap::tokenize(rest, &[]);
            Ok(Command::DeleteStudent(student_id(args.preamble(), STUDENT_DELETE_USAGE)?))
        }
        "list" => no_arguments(rest, Command::ListStudents),
        "search" => parse_student_search(rest),
        "" => Err(TutorlyError::Parse(
            "missing action; expected one of add, edit, delete, list, search".to_string(),
        )),
        other => Err(TutorlyError::UnknownCommand(format!("student {other}"))),
    }
}

const STUDENT_FIELDS: [&str; 6] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_MEMO,
    PREFIX_TAG,
];

fn parse_student_add(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(input, &STUDENT_FIELDS);
    if !args.preamble().is_empty() {
        return Err(TutorlyError::Parse(format!(
            "unexpected text '{}'\n{STUDENT_ADD_USAGE}",
            args.preamble()
        )));
    }
    args.verify_no_duplicates(&[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_MEMO])?;

    let name = Name::parse(args.required(PREFIX_NAME, STUDENT_ADD_USAGE)?)?;
    let phone = Phone::parse(args.required(PREFIX_PHONE, STUDENT_ADD_USAGE)?)?;
    let email = args.value(PREFIX_EMAIL).map(Email::parse).transpose()?;
    let address = args.value(PREFIX_ADDRESS).map(Address::parse).transpose()?;
    let memo = args
        .value(PREFIX_MEMO)
        .map(Memo::parse)
        .transpose()?
        .unwrap_or_default();
    let tags = parse_tags(&args.all_values(PREFIX_TAG))?;

    Ok(Command::AddStudent(StudentDraft {
        name,
        phone,
        email,
        address,
        memo,
        tags,
    }))
}

fn parse_student_edit(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(input, &STUDENT_FIELDS);
    let id = student_id(args.preamble(), STUDENT_EDIT_USAGE)?;
    args.verify_no_duplicates(&[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_MEMO])?;

    let edit = StudentEdit {
        name: args.value(PREFIX_NAME).map(Name::parse).transpose()?,
        phone: args.value(PREFIX_PHONE).map(Phone::parse).transpose()?,
        email: clearable(args.value(PREFIX_EMAIL), Email::parse)?,
        address: clearable(args.value(PREFIX_ADDRESS), Address::parse)?,
        memo: args.value(PREFIX_MEMO).map(Memo::parse).transpose()?,
        tags: if args.has(PREFIX_TAG) {
            Some(parse_tags(&args.all_values(PREFIX_TAG))?)
        } else {
            None
        },
    };

    if edit.is_empty() {
        return Err(TutorlyError::Parse(format!(
            "at least one field to edit must be provided\n{STUDENT_EDIT_USAGE}"
        )));
    }
    Ok(Command::EditStudent { id, edit })
}

/// An empty value clears an optional field.
fn clearable<T>(
    value: Option<&str>,
    parse: fn(&str) -> Result<T>,
) -> Result<Option<Option<T>>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(Some(None)),
        Some(raw) => parse(raw).map(|v| Some(Some(v))),
    }
}

/// A lone empty `t/` clears the tags.
fn parse_tags(values: &[&str]) -> Result<BTreeSet<Tag>> {
    if let [only] = values {
        if only.is_empty() {
            return Ok(BTreeSet::new());
        }
    }
    values.iter().map(|v| Tag::parse(v)).collect()
}

fn parse_student_search(input: &str) -> Result<Command> {
    let prefixes = [
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_TAG,
        PREFIX_SESSION,
    ];
    let args = ArgumentMap::tokenize(input, &prefixes);
    if !args.preamble().is_empty() || !args.has_any_values() {
        return Err(TutorlyError::Parse(format!(
            "at least one search criterion must be provided\n{STUDENT_SEARCH_USAGE}"
        )));
    }

    let mut filters = Vec::new();
    let keyword_fields: [(&str, fn(Keyword) -> StudentFilter); 5] = [
        (PREFIX_NAME, StudentFilter::NameContains),
        (PREFIX_PHONE, StudentFilter::PhoneContains),
        (PREFIX_EMAIL, StudentFilter::EmailContains),
        (PREFIX_ADDRESS, StudentFilter::AddressContains),
        (PREFIX_TAG, StudentFilter::TagContains),
    ];
    for (prefix, leaf) in keyword_fields {
        for value in args.all_values(prefix) {
            filters.extend(Keyword::parse_all(value)?.into_iter().map(leaf));
        }
    }
    for value in args.all_values(PREFIX_SESSION) {
        filters.push(StudentFilter::AttendsSession(SessionId::parse(value)?));
    }

    Ok(Command::SearchStudents(filters))
}

// ── session ─────────────────────────────────────────────────────────────────

fn parse_session(input: &str) -> Result<Command> {
    let (action, rest) = split_word(input);
    match action {
        "add" => parse_session_add(rest),
        "edit" => parse_session_edit(rest),
        "delete" => {
            let args = ArgumentMap::tokenize(rest, &[]);
            Ok(Command::DeleteSession(session_id(args.preamble(), SESSION_DELETE_USAGE)?))
        }
        "list" => no_arguments(rest, Command::ListSessions),
        "search" => parse_session_search(rest),
        "enrol" => {
            let (student, session) = parse_attendance_target(rest)?;
            Ok(Command::Enrol { student, session })
        }
        "unenrol" => {
            let (student, session) = parse_attendance_target(rest)?;
            Ok(Command::Unenrol { student, session })
        }
        "mark" | "unmark" => {
            let (student, session) = parse_attendance_target(rest)?;
            Ok(Command::MarkAttendance {
                student,
                session,
                is_present: action == "mark",
            })
        }
        "feedback" => parse_feedback(rest),
        "" => Err(TutorlyError::Parse(
            "missing action; expected one of add, edit, delete, list, search, enrol, unenrol, mark, unmark, feedback"
                .to_string(),
        )),
        other => Err(TutorlyError::UnknownCommand(format!("session {other}"))),
    }
}

fn parse_session_add(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(input, &[PREFIX_TIMESLOT, PREFIX_SUBJECT]);
    if !args.preamble().is_empty() {
        return Err(TutorlyError::Parse(format!(
            "unexpected text '{}'\n{SESSION_ADD_USAGE}",
            args.preamble()
        )));
    }
    args.verify_no_duplicates(&[PREFIX_TIMESLOT, PREFIX_SUBJECT])?;

    let timeslot = Timeslot::parse(args.required(PREFIX_TIMESLOT, SESSION_ADD_USAGE)?)?;
    let subject = Subject::parse(args.required(PREFIX_SUBJECT, SESSION_ADD_USAGE)?)?;
    Ok(Command::AddSession { timeslot, subject })
}

fn parse_session_edit(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(input, &[PREFIX_TIMESLOT, PREFIX_SUBJECT]);
    let id = session_id(args.preamble(), SESSION_EDIT_USAGE)?;
    args.verify_no_duplicates(&[PREFIX_TIMESLOT, PREFIX_SUBJECT])?;

    let timeslot = args.value(PREFIX_TIMESLOT).map(Timeslot::parse).transpose()?;
    let subject = args.value(PREFIX_SUBJECT).map(Subject::parse).transpose()?;
    if timeslot.is_none() && subject.is_none() {
        return Err(TutorlyError::Parse(format!(
            "at least one field to edit must be provided\n{SESSION_EDIT_USAGE}"
        )));
    }
    Ok(Command::EditSession {
        id,
        timeslot,
        subject,
    })
}

fn parse_session_search(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(
        input,
        &[PREFIX_SESSION, PREFIX_DATE, PREFIX_SUBJECT, PREFIX_STUDENT],
    );
    if !args.preamble().is_empty() || !args.has_any_values() {
        return Err(TutorlyError::Parse(format!(
            "at least one search criterion must be provided\n{SESSION_SEARCH_USAGE}"
        )));
    }

    let mut filters = Vec::new();
    for value in args.all_values(PREFIX_SESSION) {
        filters.push(SessionFilter::IdEquals(SessionId::parse(value)?));
    }
    for value in args.all_values(PREFIX_DATE) {
        filters.push(SessionFilter::OnDate(parse_date(value)?));
    }
    for value in args.all_values(PREFIX_SUBJECT) {
        filters.extend(
            Keyword::parse_all(value)?
                .into_iter()
                .map(SessionFilter::SubjectContains),
        );
    }
    for value in args.all_values(PREFIX_STUDENT) {
        filters.push(SessionFilter::AttendedBy(StudentId::parse(value)?));
    }

    Ok(Command::SearchSessions(filters))
}

fn parse_attendance_target(input: &str) -> Result<(StudentId, SessionId)> {
    let args = ArgumentMap::tokenize(input, &[PREFIX_SESSION]);
    args.verify_no_duplicates(&[PREFIX_SESSION])?;
    let student = student_id(args.preamble(), ATTENDANCE_USAGE)?;
    let session = session_id(args.required(PREFIX_SESSION, ATTENDANCE_USAGE)?, ATTENDANCE_USAGE)?;
    Ok((student, session))
}

fn parse_feedback(input: &str) -> Result<Command> {
    let args = ArgumentMap::tokenize(input, &[PREFIX_SESSION, PREFIX_FEEDBACK]);
    args.verify_no_duplicates(&[PREFIX_SESSION, PREFIX_FEEDBACK])?;
    let student = student_id(args.preamble(), FEEDBACK_USAGE)?;
    let session = session_id(args.required(PREFIX_SESSION, FEEDBACK_USAGE)?, FEEDBACK_USAGE)?;
    let feedback = Feedback::parse(args.required(PREFIX_FEEDBACK, FEEDBACK_USAGE)?)?;
    Ok(Command::Feedback {
        student,
        session,
        feedback,
    })
}

// ── ids ─────────────────────────────────────────────────────────────────────

fn student_id(raw: &str, usage: &str) -> Result<StudentId> {
    if raw.is_empty() {
        return Err(TutorlyError::Parse(format!("missing STUDENT_ID\n{usage}")));
    }
    StudentId::parse(raw)
}

fn session_id(raw: &str, usage: &str) -> Result<SessionId> {
    if raw.is_empty() {
        return Err(TutorlyError::Parse(format!("missing SESSION_ID\n{usage}")));
    }
    SessionId::parse(raw)
}
