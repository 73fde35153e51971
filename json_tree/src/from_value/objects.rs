use std::collections::HashMap;

use super::{FromValue, mismatch};
use crate::{error::ConvertErr, json_value::JsonValue};

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        value
            .as_object()
            .ok_or_else(|| mismatch("object", value))?
            .iter()
            .map(|(key, value)| match T::from_value(value) {
                Ok(value) => Ok((key.clone(), value)),
                Err(err) => Err(ConvertErr::Entry {
                    key: key.clone(),
                    source: Box::new(err),
                }),
            })
            .collect()
    }
}
