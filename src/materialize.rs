//! Bulk loading and materialization.
//!
//! Neither operation is transactional. [`load_rows`] keeps the rows it
//! appended before a failure and [`materialize_all`] keeps the elements it
//! pushed. [`collect_all`] is the all-or-nothing variant.

use log::debug;

use crate::{
    bind::{bind, struct_fields},
    error::{MapError, Result},
    list::RecordList,
    rows::{RowCursor, flatten_row},
    shape::Bindable,
};

/// Appends every remaining row of `cursor` to `list`.
///
/// Returns the number of rows appended. Stops at the first flattening error;
/// once the cursor is exhausted its terminal error, if any, is returned.
pub fn load_rows<C: RowCursor + ?Sized>(list: &mut RecordList, cursor: &mut C) -> Result<usize> {
    let mut appended = 0usize;
    while cursor.next_row() {
        let fields = flatten_row(cursor)?;
        list.append(Some(fields));
        appended += 1;
    }
    cursor.err().map_err(MapError::Cursor)?;
    debug!("Loaded {appended} row(s); list now holds {}", list.len());
    Ok(appended)
}

/// Binds every record of `list`, head to tail, into fresh `T` values pushed
/// onto `out`.
///
/// The list's shared cursor is reset first and left exhausted on success.
pub fn materialize_all<T>(list: &mut RecordList, out: &mut Vec<T>) -> Result<()>
where
    T: Bindable + Default,
{
    struct_fields::<T>()?;
    let start = out.len();
    list.reset_iterator();
    while let Some(record) = list.next() {
        let mut element = T::default();
        bind(record, &mut element)?;
        out.push(element);
    }
    debug!("Materialized {} record(s)", out.len() - start);
    Ok(())
}

/// Like [`materialize_all`] but returns nothing unless every record binds.
pub fn collect_all<T>(list: &mut RecordList) -> Result<Vec<T>>
where
    T: Bindable + Default,
{
    let mut out = Vec::with_capacity(list.len());
    materialize_all(list, &mut out)?;
    Ok(out)
}

impl RecordList {
    /// Loads `cursor` into this list. See [`load_rows`].
    pub fn load_from<C: RowCursor + ?Sized>(&mut self, cursor: &mut C) -> Result<usize> {
        load_rows(self, cursor)
    }

    /// Binds every record into `out`. See [`materialize_all`].
    pub fn to_vec_into<T: Bindable + Default>(&mut self, out: &mut Vec<T>) -> Result<()> {
        materialize_all(self, out)
    }
}
