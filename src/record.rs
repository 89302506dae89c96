use std::collections::HashMap;

use crate::value::Value;

/// Field name to value mapping held by one record.
pub type Fields = HashMap<String, Value>;

/// One stored row.
///
/// `fields` is `None` when the row was appended without data, which is
/// distinct from an empty mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Option<Fields>,
}

impl Record {
    pub(crate) fn new(fields: Option<Fields>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.fields.is_some()
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.as_ref()?.get(name)
    }

    /// Exact-name lookup, then a case-insensitive scan of every key.
    ///
    /// When several keys fold to the same name the first one found in map
    /// order wins.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let fields = self.fields.as_ref()?;
        fields.get(name).or_else(|| {
            fields
                .iter()
                .find(|(key, _)| fold_eq(key, name))
                .map(|(_, value)| value)
        })
    }
}

pub(crate) fn fold_eq(left: &str, right: &str) -> bool {
    if left.is_ascii() && right.is_ascii() {
        return left.eq_ignore_ascii_case(right);
    }
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
