//! Conversion of parsed values into Rust types.
//!
//! Structs with named fields can `#[derive(FromValue)]`, which reads each field from an object by
//! name using [`FromValue::from_field`].

mod arrays;
mod json_value;
mod objects;
mod options;
mod primitives;
mod strings;

use crate::{error::ConvertErr, json_value::JsonValue};

pub trait FromValue: Sized {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr>;

    /// Convert the value stored under `name` in an object, `None` if the key was absent.
    fn from_field(value: Option<&JsonValue>, name: &'static str) -> Result<Self, ConvertErr> {
        let value = value.ok_or(ConvertErr::MissingField(name))?;
        Self::from_value(value).map_err(|err| in_field(name, err))
    }
}

pub(crate) fn mismatch(expected: &'static str, value: &JsonValue) -> ConvertErr {
    ConvertErr::TypeMismatch {
        expected,
        found: value.type_name(),
    }
}

pub(crate) fn in_field(name: &'static str, err: ConvertErr) -> ConvertErr {
    ConvertErr::Field {
        name,
        source: Box::new(err),
    }
}
