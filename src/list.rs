//! Append-only ordered record container.
//!
//! [`RecordList`] owns its records and keeps them in append order. Succession
//! is positional: the successor of the record at index `i` is the record at
//! `i + 1`, and the tail has none. Following the chain from the head reaches
//! the tail after `len - 1` steps and can never cycle. A single shared cursor drives
//! [`RecordList::next`]; [`RecordList::iter`] walks the records without
//! touching it.

use std::slice;

use crate::record::{Fields, Record};

#[derive(Debug, Clone, Default)]
pub struct RecordList {
    records: Vec<Record>,
    /// Position of the record the next call to `next` yields.
    cursor: Option<usize>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record after the tail. `None` stores a record without data.
    ///
    /// The cursor is placed on the first record ever appended. An exhausted
    /// cursor stays exhausted until [`RecordList::reset_iterator`].
    pub fn append(&mut self, fields: Option<Fields>) {
        if self.records.is_empty() {
            self.cursor = Some(0);
        }
        self.records.push(Record::new(fields));
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn reset_iterator(&mut self) {
        self.cursor = if self.records.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    /// Yields the record under the cursor and advances it.
    ///
    /// Returns `None` on every call once the cursor has passed the tail.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Record> {
        let position = self.cursor?;
        let successor = position + 1;
        self.cursor = (successor < self.records.len()).then_some(successor);
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowing iterator from head to tail, independent of the shared cursor.
    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Option<Fields>> for RecordList {
    fn extend<I: IntoIterator<Item = Option<Fields>>>(&mut self, iter: I) {
        for fields in iter {
            self.append(fields);
        }
    }
}

impl FromIterator<Option<Fields>> for RecordList {
    fn from_iter<I: IntoIterator<Item = Option<Fields>>>(iter: I) -> Self {
        let mut list = RecordList::new();
        list.extend(iter);
        list
    }
}
