//! Destination shapes.
//!
//! A destination shape is a struct that describes its fields through
//! [`Bindable`]. The [`bindable!`](crate::bindable) macro declares the struct
//! and generates the implementation in one go:
//!
//! ```
//! use rowbind::bindable;
//!
//! bindable! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         #[db = "user_id"]
//!         pub id: i64,
//!         #[json = "full_name,omitempty"]
//!         pub name: String,
//!         pub email: Option<String>,
//!         secret: String,
//!     }
//! }
//! ```
//!
//! Public fields are settable; private fields (like `secret` above) are
//! described but never written by the binder.

use crate::{error::ConversionError, value::Value};

/// Static description of one destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Primary external name.
    pub db: Option<&'static str>,
    /// Secondary external name; anything after the first comma is a modifier.
    pub json: Option<&'static str>,
    pub settable: bool,
}

impl FieldSpec {
    /// Name used to look the field up in a record.
    pub fn lookup_name(&self) -> &'static str {
        if let Some(db) = self.db.filter(|tag| !tag.is_empty()) {
            return db;
        }
        match self.json.map(|tag| tag.split(',').next().unwrap_or(tag)) {
            Some(json) if !json.is_empty() => json,
            _ => self.name,
        }
    }
}

/// What kind of destination a type is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Struct(&'static [FieldSpec]),
    /// Not a struct; binding into it is rejected.
    Scalar(&'static str),
}

/// A type records can be bound into.
pub trait Bindable {
    fn shape() -> Shape;

    /// Coerces `value` into the field named `field` and stores it.
    ///
    /// Unknown field names are ignored. Types with a [`Shape::Scalar`] shape
    /// have no fields and reject every assignment.
    fn assign(&mut self, field: &str, value: &Value) -> Result<(), ConversionError>;
}

/// Declares a struct together with its [`Bindable`] implementation.
///
/// Fields accept `#[db = "..."]` and `#[json = "..."]` naming attributes.
/// Every other field attribute, doc comments included, is kept on the
/// emitted struct. Every field type must implement
/// [`FromValue`](crate::coerce::FromValue).
#[macro_export]
macro_rules! bindable {
    (@tag db; [db = $value:literal] $($rest:tt)*) => {
        ::core::option::Option::Some($value)
    };
    (@tag json; [json = $value:literal] $($rest:tt)*) => {
        ::core::option::Option::Some($value)
    };
    (@tag $want:ident; [$($other:tt)*] $($rest:tt)*) => {
        $crate::bindable!(@tag $want; $($rest)*)
    };
    (@tag $want:ident;) => {
        ::core::option::Option::None
    };

    // Rebuilds the struct one field at a time, stripping naming tags.
    (@emit [$($head:tt)*] [$($done:tt)*]) => {
        $($head)* { $($done)* }
    };
    (@emit $head:tt $done:tt [$attrs:tt $vis:tt $field:ident $ty:tt] $($rest:tt)*) => {
        $crate::bindable!(@field $head $done [] $attrs $vis $field $ty $($rest)*);
    };
    (@field $head:tt $done:tt $kept:tt [#[db = $tag:literal] $($attrs:tt)*] $($rest:tt)*) => {
        $crate::bindable!(@field $head $done $kept [$($attrs)*] $($rest)*);
    };
    (@field $head:tt $done:tt $kept:tt [#[json = $tag:literal] $($attrs:tt)*] $($rest:tt)*) => {
        $crate::bindable!(@field $head $done $kept [$($attrs)*] $($rest)*);
    };
    (@field $head:tt $done:tt [$($kept:tt)*] [#[$($attr:tt)*] $($attrs:tt)*] $($rest:tt)*) => {
        $crate::bindable!(@field $head $done [$($kept)* #[$($attr)*]] [$($attrs)*] $($rest)*);
    };
    (
        @field $head:tt [$($done:tt)*] [$($kept:tt)*] []
        [$vis:vis] $field:ident [$ty:ty] $($rest:tt)*
    ) => {
        $crate::bindable!(@emit $head [$($done)* $($kept)* $vis $field: $ty,] $($rest)*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($attr:tt)*])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::bindable!(
            @emit [$(#[$meta])* $vis struct $name] []
            $([[$(#[$($attr)*])*] [$field_vis] $field [$ty]])*
        );

        impl $crate::shape::Bindable for $name {
            fn shape() -> $crate::shape::Shape {
                const FIELDS: &[$crate::shape::FieldSpec] = &[
                    $(
                        $crate::shape::FieldSpec {
                            name: stringify!($field),
                            db: $crate::bindable!(@tag db; $([$($attr)*])*),
                            json: $crate::bindable!(@tag json; $([$($attr)*])*),
                            settable: !stringify!($field_vis).is_empty(),
                        },
                    )*
                ];
                $crate::shape::Shape::Struct(FIELDS)
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &str,
                value: &$crate::value::Value,
            ) -> ::core::result::Result<(), $crate::error::ConversionError> {
                $(
                    if field == stringify!($field) {
                        self.$field = <$ty as $crate::coerce::FromValue>::from_value(value)?;
                        return ::core::result::Result::Ok(());
                    }
                )*
                ::core::result::Result::Ok(())
            }
        }
    };
}

macro_rules! scalar_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(stringify!($ty))
                }

                fn assign(&mut self, _field: &str, value: &Value) -> Result<(), ConversionError> {
                    Err(ConversionError::new(value.type_name(), stringify!($ty)))
                }
            }
        )*
    };
}

scalar_shape!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    Value,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(db: Option<&'static str>, json: Option<&'static str>) -> FieldSpec {
        FieldSpec {
            name: "FullName",
            db,
            json,
            settable: true,
        }
    }

    #[test]
    fn lookup_name_prefers_primary_tag() {
        assert_eq!(spec(Some("full"), Some("name")).lookup_name(), "full");
        assert_eq!(spec(None, Some("full_name,omitempty")).lookup_name(), "full_name");
        assert_eq!(spec(None, None).lookup_name(), "FullName");
    }

    #[test]
    fn empty_tags_fall_through() {
        assert_eq!(spec(Some(""), Some(",omitempty")).lookup_name(), "FullName");
        assert_eq!(spec(Some(""), Some("alias")).lookup_name(), "alias");
    }

    crate::bindable! {
        #[derive(Debug, Default)]
        struct Tagged {
            #[db = "user_id"]
            pub user_id: i64,
            #[json = "full_name"]
            #[db = "name"]
            pub full_name: String,
            hidden: bool,
        }
    }

    #[test]
    fn macro_records_tags_and_visibility() {
        let Shape::Struct(fields) = Tagged::shape() else {
            panic!("expected struct shape");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].db, Some("user_id"));
        assert_eq!(fields[1].db, Some("name"));
        assert_eq!(fields[1].json, Some("full_name"));
        assert!(fields[1].settable);
        assert!(!fields[2].settable);
        assert_eq!(fields[2].lookup_name(), "hidden");
    }

    #[test]
    fn macro_assign_coerces_into_field() {
        let mut tagged = Tagged::default();
        tagged.assign("user_id", &Value::Int(9)).unwrap();
        tagged.assign("unknown", &Value::Int(1)).unwrap();
        assert_eq!(tagged.user_id, 9);
        assert!(tagged.assign("full_name", &Value::Int(1)).is_err());
        assert!(!tagged.hidden);
    }

    #[test]
    fn scalars_are_not_struct_shaped() {
        assert_eq!(i64::shape(), Shape::Scalar("i64"));
        assert_eq!(Value::shape(), Shape::Scalar("Value"));
    }

    #[test]
    fn scalars_reject_direct_assignment() {
        let mut count = 0i64;
        let err = count.assign("count", &Value::Int(3)).unwrap_err();
        assert_eq!(err, ConversionError::new("int", "i64"));
        assert_eq!(count, 0);
    }

    crate::bindable! {
        /// Row of the audit log.
        #[derive(Debug, Default)]
        struct Documented {
            /// Surrogate key.
            #[db = "audit_id"]
            pub id: i64,
            #[allow(dead_code)]
            #[json = "who,omitempty"]
            /// Actor that made the change.
            pub actor: String,
            #[allow(dead_code)]
            note: Option<String>,
        }
    }

    #[test]
    fn macro_keeps_other_field_attributes() {
        let Shape::Struct(fields) = Documented::shape() else {
            panic!("expected struct shape");
        };
        assert_eq!(fields[0].db, Some("audit_id"));
        assert_eq!(fields[0].json, None);
        assert_eq!(fields[1].lookup_name(), "who");
        assert_eq!(fields[2].lookup_name(), "note");
        assert!(!fields[2].settable);

        let mut row = Documented::default();
        row.assign("actor", &Value::from("ops")).unwrap();
        assert_eq!(row.actor, "ops");
    }
}
