use super::FromValue;
use crate::{error::ConvertErr, json_value::JsonValue};

impl FromValue for JsonValue {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        Ok(value.clone())
    }
}
