//! Validated field values shared by students and sessions.
//!
//! Every type here trims its input and checks a format rule on construction,
//! and deserializes through the same check (`try_from = "String"`), so an
//! instance in memory always satisfies its rule.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorlyError};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}\p{N}][\p{Alphabetic}\p{N} ]*$").expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9+_.\-]*[A-Za-z0-9])?@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));
static SUBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid subject regex"));

pub const FEEDBACK_MAX_LEN: usize = 500;

/// Declares a `String` newtype with `parse`, `as_str`, `Display` and serde
/// support routed through `parse`.
macro_rules! validated_string {
    ($(#[$meta:meta])* $name:ident, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self> {
                let value = raw.trim();
                let check: fn(&str) -> Result<()> = $check;
                check(value)?;
                Ok(Self(value.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TutorlyError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_string!(
    /// A student's full name: letters, digits and spaces.
    Name,
    |v| {
        if NAME_RE.is_match(v) {
            Ok(())
        } else {
            Err(TutorlyError::validation(
                "name",
                "names should only contain alphanumeric characters and spaces, and it should not be blank",
            ))
        }
    }
);

validated_string!(
    Phone,
    |v| {
        if PHONE_RE.is_match(v) {
            Ok(())
        } else {
            Err(TutorlyError::validation(
                "phone",
                "phone numbers should only contain digits, and be at least 3 digits long",
            ))
        }
    }
);

validated_string!(
    Email,
    |v| {
        let valid = EMAIL_RE.is_match(v)
            && v
                .rsplit_once('@')
                .and_then(|(_, domain)| domain.rsplit('.').next())
                .is_some_and(|last| last.len() >= 2);
        if valid {
            Ok(())
        } else {
            Err(TutorlyError::validation(
                "email",
                "emails should be of the format local-part@domain, where the domain ends with a label of at least 2 characters",
            ))
        }
    }
);

validated_string!(
    Address,
    |v| {
        if v.is_empty() {
            Err(TutorlyError::validation("address", "addresses can take any value, but must not be blank"))
        } else {
            Ok(())
        }
    }
);

validated_string!(
    /// Free-form notes about a student. May be empty.
    Memo,
    |_| Ok(())
);

validated_string!(
    Tag,
    |v| {
        if TAG_RE.is_match(v) {
            Ok(())
        } else {
            Err(TutorlyError::validation("tag", "tag names should be alphanumeric"))
        }
    }
);

validated_string!(
    /// What a session teaches, e.g. `Math` or `Physics 2`.
    Subject,
    |v| {
        if SUBJECT_RE.is_match(v) {
            Ok(())
        } else {
            Err(TutorlyError::validation(
                "subject",
                "subjects should only contain alphanumeric characters and spaces, and it should not be blank",
            ))
        }
    }
);

validated_string!(
    /// Tutor feedback on a student's attendance. May be empty.
    Feedback,
    |v| {
        if v.chars().count() > FEEDBACK_MAX_LEN {
            Err(TutorlyError::validation(
                "feedback",
                format!("feedback must be at most {FEEDBACK_MAX_LEN} characters"),
            ))
        } else {
            Ok(())
        }
    }
);

impl Default for Memo {
    fn default() -> Self {
        Self(String::new())
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self(String::new())
    }
}
