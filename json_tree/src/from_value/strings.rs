use super::{FromValue, mismatch};
use crate::{error::ConvertErr, json_value::JsonValue};

impl FromValue for String {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}
