//! # tutorly-core
//!
//! Bookkeeping for tutors: students, tutoring sessions and attendance.
//!
//! ## Quick start
//!
//! ```rust
//! use tutorly_core::{parse_command, AddressBook};
//!
//! let mut book = AddressBook::new();
//! parse_command("student add n/Alice Tan p/91234567")
//!     .unwrap()
//!     .execute(&mut book)
//!     .unwrap();
//! parse_command("session add ts/2025-03-01 10:00 - 12:00 sub/Math")
//!     .unwrap()
//!     .execute(&mut book)
//!     .unwrap();
//! parse_command("session enrol 1 ses/1").unwrap().execute(&mut book).unwrap();
//!
//! let result = parse_command("student search ses/1").unwrap().execute(&mut book).unwrap();
//! assert!(result.feedback.contains("Alice Tan"));
//! ```
//!
//! ## Modules
//!
//! - [`unique_list`]: ordered list that rejects logically duplicate elements
//! - [`filter`]: composable search predicates (`any`, student/session leaves)
//! - [`keyword`]: case-insensitive partial word matching
//! - [`model`]: validated fields, ids, students, sessions, `Timeslot`
//! - [`address_book`]: the three lists plus cross-collection rules
//! - [`command`]: text command parsing and execution
//! - [`storage`]: JSON load/save
//! - [`error`]: Error types

pub mod address_book;
pub mod command;
pub mod error;
pub mod filter;
pub mod keyword;
pub mod model;
pub mod storage;
pub mod unique_list;

pub use address_book::AddressBook;
pub use command::{parse_command, Command, CommandResult};
pub use error::TutorlyError;
pub use filter::{any, Filter, SessionFilter, StudentFilter};
pub use keyword::{contains_word_ignore_case, Keyword};
pub use model::{AttendanceRecord, Session, SessionId, Student, StudentId, Timeslot};
pub use unique_list::{Identity, ListError, UniqueList};
