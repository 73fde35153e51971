use super::{FromValue, mismatch};
use crate::{error::ConvertErr, json_value::JsonValue};

// Integers go through `i64` and are range checked for the target type
macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
                    let int = value.as_i64().ok_or_else(|| mismatch("integer", value))?;
                    <$ty>::try_from(int).map_err(|_| ConvertErr::OutOfRange {
                        target: stringify!($ty),
                        value: int,
                    })
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        value.as_f64().ok_or_else(|| mismatch("number", value))
    }
}

impl FromValue for f32 {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &JsonValue) -> Result<Self, ConvertErr> {
        value.as_bool().ok_or_else(|| mismatch("boolean", value))
    }
}
