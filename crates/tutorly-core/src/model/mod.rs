//! Domain model: validated fields, ids, students, sessions and attendance.

pub mod fields;
pub mod ids;
pub mod session;
pub mod student;
pub mod timeslot;

pub use fields::{Address, Email, Feedback, Memo, Name, Phone, Subject, Tag};
pub use ids::{SessionId, StudentId};
pub use session::{AttendanceRecord, Session};
pub use student::Student;
pub use timeslot::Timeslot;
