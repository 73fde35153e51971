use std::{collections::HashMap, ops::Index};

pub type Object = HashMap<String, JsonValue>;
pub type Array = Vec<JsonValue>;

static NULL: JsonValue = JsonValue::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Object(Object),
    Array(Array),

    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl JsonValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(elems) => Some(elems),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats, so any number can be read this way.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|props| props.get(key))
    }
}

// Missing keys and out of range indices read as null, so lookups can be chained
impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_array()
            .and_then(|elems| elems.get(index))
            .unwrap_or(&NULL)
    }
}

impl From<Object> for JsonValue {
    fn from(props: Object) -> Self {
        Self::Object(props)
    }
}
