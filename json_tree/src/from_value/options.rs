use super::{FromValue, in_field};
use crate::{error::ConvertErr, json_value::JsonValue};

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        match value {
            JsonValue::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }

    // A missing key is the same as an explicit null
    fn from_field(value: Option<&JsonValue>, name: &'static str) -> Result<Self, ConvertErr> {
        match value {
            Some(value) => Self::from_value(value).map_err(|err| in_field(name, err)),
            None => Ok(None),
        }
    }
}
