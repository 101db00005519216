//! Student records.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::fields::{Address, Email, Memo, Name, Phone, Tag};
use crate::model::ids::StudentId;
use crate::unique_list::Identity;

/// A student in the book.
///
/// Two students are the same record when their names match ignoring case;
/// every other field only matters for full equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: Name,
    pub phone: Phone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub memo: Memo,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl Student {
    pub fn new(id: StudentId, name: Name, phone: Phone) -> Self {
        Self {
            id,
            name,
            phone,
            email: None,
            address: None,
            memo: Memo::default(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

impl Identity for Student {
    fn is_same(&self, other: &Self) -> bool {
        self.name.as_str().to_lowercase() == other.name.as_str().to_lowercase()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}; Phone: {}", self.id, self.name, self.phone)?;
        if let Some(email) = &self.email {
            write!(f, "; Email: {email}")?;
        }
        if let Some(address) = &self.address {
            write!(f, "; Address: {address}")?;
        }
        if !self.memo.as_str().is_empty() {
            write!(f, "; Memo: {}", self.memo)?;
        }
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("[{t}]")).collect();
            write!(f, "; Tags: {}", tags.join(""))?;
        }
        Ok(())
    }
}
