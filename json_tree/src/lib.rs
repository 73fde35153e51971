mod error;
mod from_value;
mod json_value;
mod parser;
mod scanner;
mod token;

pub use error::{ConvertErr, Error, ErrorKind};
pub use from_value::FromValue;
pub use json_tree_macros::FromValue;
pub use json_value::{Array, JsonValue, Object};
pub use parser::{MAX_DEPTH, Parser, parse, parse_str, parse_value_str};
pub use scanner::{Scanner, tokenize};
pub use token::{Token, TokenKind, TokenSequence};
