//! Ordered list that refuses logically duplicate elements.
//!
//! Two relations are in play:
//!
//! - **identity** ([`Identity::is_same`]) decides whether two elements are
//!   duplicates of each other. `contains`, `add`, `set` and `set_all` use it.
//! - **full equality** (`PartialEq`) locates the exact element to replace or
//!   remove. `set` and `remove` use it.
//!
//! A session edited to a new subject is still "the same" session (same id)
//! but no longer equal to its old value, so `set` finds the old value by
//! equality and keeps its position.

use std::slice::Iter;

use thiserror::Error;

/// Identity relation used by [`UniqueList`] to detect duplicates.
pub trait Identity {
    /// Returns `true` if `self` and `other` describe the same logical record.
    fn is_same(&self, other: &Self) -> bool;

    /// Negation of [`Identity::is_same`].
    fn is_distinct(&self, other: &Self) -> bool {
        !self.is_same(other)
    }
}

/// Errors raised by [`UniqueList`] mutations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("Operation would result in duplicate elements")]
    DuplicateElement,

    #[error("Element not found in list")]
    ElementNotFound,
}

/// An ordered collection with no two non-distinct elements.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identity + PartialEq> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if some stored element is not distinct from `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|e| e.is_same(item))
    }

    /// Appends `item`, failing if a non-distinct element is already stored.
    pub fn add(&mut self, item: T) -> Result<(), ListError> {
        if self.contains(&item) {
            return Err(ListError::DuplicateElement);
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces the element equal to `target` with `edited`, in place.
    ///
    /// `target` is located by full equality. The duplicate check only runs
    /// when `edited` is distinct from `target`, so an edit that keeps the
    /// identity of the record never collides with itself.
    pub fn set(&mut self, target: &T, edited: T) -> Result<(), ListError> {
        let index = self
            .items
            .iter()
            .position(|e| e == target)
            .ok_or(ListError::ElementNotFound)?;

        if target.is_distinct(&edited) && self.contains(&edited) {
            return Err(ListError::DuplicateElement);
        }

        self.items[index] = edited;
        Ok(())
    }

    /// Removes the first element equal to `item` and returns it.
    pub fn remove(&mut self, item: &T) -> Result<T, ListError> {
        let index = self
            .items
            .iter()
            .position(|e| e == item)
            .ok_or(ListError::ElementNotFound)?;
        Ok(self.items.remove(index))
    }

    /// Removes every element matching `pred`, returning how many were dropped.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|e| !pred(e));
        before - self.items.len()
    }

    /// Replaces the whole contents with `items`.
    ///
    /// Fails without touching the list if any two inputs are non-distinct.
    pub fn set_all(&mut self, items: Vec<T>) -> Result<(), ListError> {
        if !elements_are_unique(&items) {
            return Err(ListError::DuplicateElement);
        }
        self.items = items;
        Ok(())
    }
}

impl<T> UniqueList<T> {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only view of the elements in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pairwise check that no two elements of `items` are non-distinct.
fn elements_are_unique<T: Identity>(items: &[T]) -> bool {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if a.is_same(b) {
                return false;
            }
        }
    }
    true
}
