//! Numeric identifiers for students and sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorlyError};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            /// # Errors
            ///
            /// Returns [`TutorlyError::Validation`] for zero.
            pub fn new(value: u32) -> Result<Self> {
                if value == 0 {
                    return Err(TutorlyError::validation($field, "ids must be positive integers"));
                }
                Ok(Self(value))
            }

            pub fn parse(raw: &str) -> Result<Self> {
                let value = raw.trim().parse::<u32>().map_err(|_| {
                    TutorlyError::validation(
                        $field,
                        format!("'{}' is not a positive integer", raw.trim()),
                    )
                })?;
                Self::new(value)
            }

            pub fn value(self) -> u32 {
                self.0
            }

            /// The id following `self`.
            ///
            /// # Errors
            ///
            /// Returns [`TutorlyError::Validation`] once `u32::MAX` is reached.
            pub fn next(self) -> Result<Self> {
                self.0
                    .checked_add(1)
                    .map(Self)
                    .ok_or_else(|| TutorlyError::validation($field, "no more ids are available"))
            }

            pub const FIRST: Self = Self(1);
        }

        impl TryFrom<u32> for $name {
            type Error = TutorlyError;

            fn try_from(value: u32) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(StudentId, "student id");
numeric_id!(SessionId, "session id");
