//! Splits command arguments into a preamble and `prefix/value` pairs.
//!
//! `1 n/Alice Tan t/math t/sec3` with prefixes `n/` and `t/` becomes the
//! preamble `1` and the values `n/ -> ["Alice Tan"]`, `t/ -> ["math", "sec3"]`.
//! A prefix only counts when it starts the input or follows whitespace, so
//! `https://a/b` inside a memo is not split.

use crate::error::{Result, TutorlyError};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_ADDRESS: &str = "a/";
pub const PREFIX_MEMO: &str = "m/";
pub const PREFIX_TAG: &str = "t/";
pub const PREFIX_TIMESLOT: &str = "ts/";
pub const PREFIX_SUBJECT: &str = "sub/";
pub const PREFIX_SESSION: &str = "ses/";
pub const PREFIX_DATE: &str = "on/";
pub const PREFIX_STUDENT: &str = "sid/";
pub const PREFIX_FEEDBACK: &str = "f/";

/// Tokenized arguments of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: Vec<(&'static str, String)>,
}

impl ArgumentMap {
    /// Tokenizes `args`, recognising only the given prefixes.
    pub fn tokenize(args: &str, prefixes: &[&'static str]) -> Self {
        let mut positions: Vec<(usize, &'static str)> = Vec::new();
        for (index, _) in args.char_indices() {
            let at_word_start = index == 0
                || args[..index]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_whitespace);
            if !at_word_start {
                continue;
            }
            if let Some(prefix) = prefixes
                .iter()
                .find(|prefix| args[index..].starts_with(**prefix))
            {
                positions.push((index, *prefix));
            }
        }

        let preamble_end = positions.first().map_or(args.len(), |(i, _)| *i);
        let mut values = Vec::with_capacity(positions.len());
        for (n, (start, prefix)) in positions.iter().enumerate() {
            let value_start = start + prefix.len();
            let value_end = positions.get(n + 1).map_or(args.len(), |(i, _)| *i);
            values.push((*prefix, args[value_start..value_end].trim().to_string()));
        }

        Self {
            preamble: args[..preamble_end].trim().to_string(),
            values,
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// All values given for `prefix`, in order.
    pub fn all_values(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(p, _)| *p == prefix)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The value for a single-valued prefix, if given.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.values.iter().any(|(p, _)| *p == prefix)
    }

    pub fn has_any_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Fails if a single-valued prefix appears more than once.
    pub fn verify_no_duplicates(&self, prefixes: &[&str]) -> Result<()> {
        let repeated: Vec<&str> = prefixes
            .iter()
            .copied()
            .filter(|prefix| self.values.iter().filter(|(p, _)| p == prefix).count() > 1)
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(TutorlyError::Parse(format!(
                "multiple values specified for the single-valued field(s): {}",
                repeated.join(" ")
            )))
        }
    }

    /// The value for a prefix the command cannot run without.
    pub fn required(&self, prefix: &str, usage: &str) -> Result<&str> {
        self.value(prefix)
            .ok_or_else(|| TutorlyError::Parse(format!("missing {prefix}\n{usage}")))
    }
}
