//! Composable search predicates over students and sessions.
//!
//! A [`Filter`] is turned into a plain predicate against a read-only
//! [`AddressBook`]. The book is passed in because some filters have to look
//! across collections: "students attending session 3" is answered by the
//! attendance records, not by the student itself.
//!
//! Leaf filters are the variants of [`StudentFilter`] and [`SessionFilter`].
//! [`any`] combines filters with logical OR. An empty combination matches
//! everything, which is how the `list` commands are expressed.

use chrono::NaiveDate;

use crate::address_book::AddressBook;
use crate::keyword::Keyword;
use crate::model::{Session, SessionId, Student, StudentId};

/// A predicate over `T` borrowing whatever it needs from the book.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A predicate factory evaluated against a snapshot of the book.
pub trait Filter<T> {
    fn to_predicate<'a>(&'a self, book: &'a AddressBook) -> Predicate<'a, T>;
}

/// Logical OR of child filters, evaluated in order.
pub struct AnyFilter<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

/// Combines `filters` with logical OR.
///
/// With no filters the result matches every element.
pub fn any<T>(filters: Vec<Box<dyn Filter<T>>>) -> AnyFilter<T> {
    AnyFilter { filters }
}

impl<T> AnyFilter<T> {
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T> Filter<T> for AnyFilter<T> {
    fn to_predicate<'a>(&'a self, book: &'a AddressBook) -> Predicate<'a, T> {
        if self.filters.is_empty() {
            return Box::new(|_: &T| true);
        }
        let predicates: Vec<Predicate<'a, T>> = self
            .filters
            .iter()
            .map(|f| f.to_predicate(book))
            .collect();
        Box::new(move |item: &T| predicates.iter().any(|p| p(item)))
    }
}

/// Leaf filters over students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    NameContains(Keyword),
    PhoneContains(Keyword),
    EmailContains(Keyword),
    AddressContains(Keyword),
    TagContains(Keyword),
    IdEquals(StudentId),
    /// Students with an attendance record for the session.
    AttendsSession(SessionId),
}

impl Filter<Student> for StudentFilter {
    fn to_predicate<'a>(&'a self, book: &'a AddressBook) -> Predicate<'a, Student> {
        match self {
            Self::NameContains(keyword) => {
                Box::new(move |s: &Student| keyword.matches(s.name.as_str()))
            }
            Self::PhoneContains(keyword) => {
                Box::new(move |s: &Student| keyword.matches(s.phone.as_str()))
            }
            Self::EmailContains(keyword) => Box::new(move |s: &Student| {
                s.email.as_ref().is_some_and(|e| keyword.matches(e.as_str()))
            }),
            Self::AddressContains(keyword) => Box::new(move |s: &Student| {
                s.address
                    .as_ref()
                    .is_some_and(|a| keyword.matches(a.as_str()))
            }),
            Self::TagContains(keyword) => Box::new(move |s: &Student| {
                s.tags.iter().any(|t| keyword.matches(t.as_str()))
            }),
            Self::IdEquals(id) => Box::new(move |s: &Student| s.id == *id),
            Self::AttendsSession(session) => {
                Box::new(move |s: &Student| book.is_enrolled(s.id, *session))
            }
        }
    }
}

/// Leaf filters over sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFilter {
    SubjectContains(Keyword),
    /// Sessions whose timeslot touches the given calendar date.
    OnDate(NaiveDate),
    IdEquals(SessionId),
    /// Sessions the student is enrolled in.
    AttendedBy(StudentId),
}

impl Filter<Session> for SessionFilter {
    fn to_predicate<'a>(&'a self, book: &'a AddressBook) -> Predicate<'a, Session> {
        match self {
            Self::SubjectContains(keyword) => {
                Box::new(move |s: &Session| keyword.matches(s.subject.as_str()))
            }
            Self::OnDate(date) => Box::new(move |s: &Session| s.timeslot.contains_date(*date)),
            Self::IdEquals(id) => Box::new(move |s: &Session| s.id == *id),
            Self::AttendedBy(student) => {
                Box::new(move |s: &Session| book.is_enrolled(*student, s.id))
            }
        }
    }
}

/// Boxes each leaf and ORs them together.
pub fn any_of<T, F>(leaves: impl IntoIterator<Item = F>) -> AnyFilter<T>
where
    F: Filter<T> + 'static,
{
    any(leaves
        .into_iter()
        .map(|f| Box::new(f) as Box<dyn Filter<T>>)
        .collect())
}
