use super::{FromValue, mismatch};
use crate::{error::ConvertErr, json_value::JsonValue};

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        value
            .as_array()
            .ok_or_else(|| mismatch("array", value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}
