//! Fixed-capacity histories.
//!
//! [`push`] keeps a most-recent-first log (activity feeds), [`append_window`]
//! keeps an oldest-first rolling window (chart series).

use serde::{Deserialize, Serialize};

/// Prepend `entry` and truncate to `capacity`, dropping from the tail.
///
/// `len(result) == min(len(log) + 1, capacity)`.
pub fn push<T: Clone>(log: &[T], entry: T, capacity: usize) -> Vec<T> {
    if capacity == 0 {
        return Vec::new();
    }
    let keep = log.len().min(capacity - 1);
    let mut next = Vec::with_capacity(keep + 1);
    next.push(entry);
    next.extend_from_slice(&log[..keep]);
    next
}

/// Append `entry` and keep only the newest `capacity` items, oldest first.
pub fn append_window<T: Clone>(window: &[T], entry: T, capacity: usize) -> Vec<T> {
    if capacity == 0 {
        return Vec::new();
    }
    let keep = window.len().min(capacity - 1);
    let mut next = Vec::with_capacity(keep + 1);
    next.extend_from_slice(&window[window.len() - keep..]);
    next.push(entry);
    next
}

/// Most-recent-first log with a fixed capacity.
///
/// Deserializing truncates to `capacity`, same as [`BoundedLog::seeded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LogRepr<T>")]
pub struct BoundedLog<T> {
    entries: Vec<T>,
    capacity: usize,
}

#[derive(Deserialize)]
struct LogRepr<T> {
    entries: Vec<T>,
    capacity: usize,
}

impl<T> From<LogRepr<T>> for BoundedLog<T> {
    fn from(mut repr: LogRepr<T>) -> Self {
        repr.entries.truncate(repr.capacity);
        Self {
            entries: repr.entries,
            capacity: repr.capacity,
        }
    }
}

impl<T: Clone> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Seed with entries given most recent first; extras beyond capacity are dropped.
    pub fn seeded(entries: Vec<T>, capacity: usize) -> Self {
        LogRepr { entries, capacity }.into()
    }

    /// Pure push: returns the next log and leaves `self` untouched.
    pub fn pushed(&self, entry: T) -> Self {
        Self {
            entries: push(&self.entries, entry, self.capacity),
            capacity: self.capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.truncate(self.capacity - 1);
        }
        self.entries.insert(0, entry);
    }

    /// Most recent entry.
    pub fn head(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a, T> IntoIterator for &'a BoundedLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
