//! Binding of a record into a destination shape.
//!
//! Each settable field is resolved by name (primary tag, secondary tag, then
//! the field's own name), looked up exactly and then case-insensitively, and
//! coerced into place. Missing keys and null values leave the field at its
//! default. Binding is not transactional: when a field fails to convert, the
//! fields assigned before it keep their new values.

use log::trace;

use crate::{
    error::{MapError, Result},
    record::Record,
    shape::{Bindable, FieldSpec, Shape},
};

/// Returns the field table of `T`, rejecting non-struct destinations.
pub fn struct_fields<T: Bindable>() -> Result<&'static [FieldSpec]> {
    match T::shape() {
        Shape::Struct(fields) => Ok(fields),
        Shape::Scalar(name) => Err(MapError::InvalidDestination(name)),
    }
}

pub fn bind<T: Bindable>(record: &Record, dest: &mut T) -> Result<()> {
    let specs = struct_fields::<T>()?;
    let fields = record.fields().ok_or(MapError::NoData)?;

    for spec in specs.iter().filter(|spec| spec.settable) {
        let name = spec.lookup_name();
        let Some(value) = record.lookup(name) else {
            trace!("No key matches field '{}' (looked up as '{name}')", spec.name);
            continue;
        };
        if value.is_null() {
            continue;
        }
        dest.assign(spec.name, value)
            .map_err(|err| MapError::field_conversion(spec.name, err))?;
    }
    trace!(
        "Bound record with {} key(s) into {} field(s)",
        fields.len(),
        specs.len()
    );
    Ok(())
}

impl Record {
    /// Binds this record into `dest`. See [`bind`].
    pub fn scan_into<T: Bindable>(&self, dest: &mut T) -> Result<()> {
        bind(self, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::Fields, value::Value};

    crate::bindable! {
        #[derive(Debug, Default, PartialEq)]
        struct Account {
            pub id: i32,
            #[json = "display_name,omitempty"]
            pub name: String,
            pub active: bool,
        }
    }

    fn record(pairs: &[(&str, Value)]) -> Record {
        Record::new(Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<Fields>(),
        ))
    }

    #[test]
    fn secondary_tag_modifiers_are_ignored() {
        let row = record(&[("display_name", Value::from("Ada")), ("id", Value::Int(3))]);
        let mut account = Account::default();
        bind(&row, &mut account).unwrap();
        assert_eq!(account.name, "Ada");
        assert_eq!(account.id, 3);
    }

    #[test]
    fn missing_keys_leave_defaults() {
        let row = record(&[("unrelated", Value::Int(1))]);
        let mut account = Account {
            id: 5,
            ..Account::default()
        };
        bind(&row, &mut account).unwrap();
        assert_eq!(account.id, 5);
    }

    #[test]
    fn scalar_destination_is_rejected() {
        let row = record(&[("id", Value::Int(1))]);
        let mut scalar = 0i64;
        let err = bind(&row, &mut scalar).unwrap_err();
        assert!(matches!(err, MapError::InvalidDestination("i64")));
    }

    #[test]
    fn destination_is_checked_before_data() {
        let mut scalar = String::new();
        let err = bind(&Record::new(None), &mut scalar).unwrap_err();
        assert!(matches!(err, MapError::InvalidDestination(_)));
    }

    #[test]
    fn conversion_error_names_the_field() {
        let row = record(&[("active", Value::from("yes"))]);
        let err = Record::scan_into(&row, &mut Account::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot convert text to bool for field 'active'"
        );
    }
}
