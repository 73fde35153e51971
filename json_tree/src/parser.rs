use std::str::Chars;

use log::debug;

use crate::{
    error::{Error, ErrorKind},
    json_value::{Array, JsonValue, Object},
    scanner::tokenize,
    token::{Token, TokenKind, TokenSequence},
};

/// Objects and arrays nested deeper than this are rejected before the recursion exhausts the stack.
pub const MAX_DEPTH: usize = 128;

/// Parse a token sequence made of one or more top-level objects, merging them into one mapping.
/// Keys from later objects overwrite earlier ones.
pub fn parse(tokens: &TokenSequence) -> Result<Object, Error> {
    let mut parser = Parser::init(tokens);
    let mut result = Object::new();

    while !parser.is_at_end() {
        result.extend(parser.parse_object()?);
    }

    debug!("parsed {} top-level keys", result.len());
    Ok(result)
}

/// Scan and parse `source` in one go.
pub fn parse_str(source: &str) -> Result<Object, Error> {
    parse(&tokenize(source)?)
}

/// Scan and parse a single value, which doesn't have to be an object.
pub fn parse_value_str(source: &str) -> Result<JsonValue, Error> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::init(&tokens);

    let value = parser.parse_value()?;
    if !parser.is_at_end() {
        return Err(parser.make_err(ErrorKind::UnexpectedToken));
    }

    Ok(value)
}

#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn init(tokens: &'a TokenSequence) -> Self {
        Self {
            tokens: tokens.as_slice(),
            current: 0,
            depth: 0,
        }
    }

    fn make_err(&self, kind: ErrorKind) -> Error {
        // Report the current token, falling back to the last one once we've run off the end
        match self.tokens.get(self.current).or(self.tokens.last()) {
            Some(token) => Self::make_err_at(kind, token),
            None => Error {
                kind,
                line: 1,
                lexeme: String::new(),
            },
        }
    }

    fn make_err_at(kind: ErrorKind, token: &Token) -> Error {
        Error {
            kind,
            line: token.line,
            lexeme: token.lexeme.clone(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    pub fn peek(&self, offset: usize) -> Result<&'a Token, Error> {
        self.tokens
            .get(self.current.saturating_add(offset))
            .ok_or_else(|| self.make_err(ErrorKind::UnexpectedEndOfInput))
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        matches!(self.tokens.get(self.current), Some(token) if token.kind == kind)
    }

    pub fn consume(&mut self, kind: TokenKind, message: &'static str) -> Result<&'a Token, Error> {
        if self.check(kind) {
            return self.advance();
        }

        Err(self.make_err(ErrorKind::ExpectedToken {
            expected: kind,
            message,
        }))
    }

    fn advance(&mut self) -> Result<&'a Token, Error> {
        let token = self.peek(0)?;
        self.current += 1;

        Ok(token)
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(self.make_err(ErrorKind::NestingTooDeep));
        }

        self.depth += 1;
        Ok(())
    }

    // After an element, expect either a `,` followed by another element, or the closing token
    fn separator(&mut self, close: TokenKind) -> Result<(), Error> {
        if self.check(TokenKind::Comma) {
            if matches!(self.tokens.get(self.current + 1), Some(token) if token.kind == close) {
                return Err(self.make_err(ErrorKind::TrailingComma));
            }

            self.advance()?;
            return Ok(());
        }

        if self.check(close) {
            return Ok(());
        }

        // Running out of tokens is reported as such rather than as a missing comma
        self.peek(0)?;
        Err(self.make_err(ErrorKind::MissingSeparator))
    }

    pub fn parse_object(&mut self) -> Result<Object, Error> {
        self.enter()?;
        self.consume(TokenKind::LeftBrace, "expected '{' at the start of an object")?;

        let mut props = Object::new();

        // Loop through all properties, until reaching closing brace
        while !self.check(TokenKind::RightBrace) {
            let key = self.consume(TokenKind::String, "expected a string key")?;
            let key = decode_string(key)?;
            self.consume(TokenKind::Colon, "expected ':' after a key")?;

            let value = self.parse_value()?;
            props.insert(key, value);

            self.separator(TokenKind::RightBrace)?;
        }

        self.consume(TokenKind::RightBrace, "expected '}' at the end of an object")?;
        self.depth -= 1;

        Ok(props)
    }

    pub fn parse_array(&mut self) -> Result<Array, Error> {
        self.enter()?;
        self.consume(TokenKind::LeftBracket, "expected '[' at the start of an array")?;

        let mut elems = Array::new();

        // Loop through all elements, until reaching closing bracket
        while !self.check(TokenKind::RightBracket) {
            elems.push(self.parse_value()?);
            self.separator(TokenKind::RightBracket)?;
        }

        self.consume(TokenKind::RightBracket, "expected ']' at the end of an array")?;
        self.depth -= 1;

        Ok(elems)
    }

    pub fn parse_value(&mut self) -> Result<JsonValue, Error> {
        let token = self.peek(0)?;
        let value = match token.kind {
            TokenKind::LeftBrace => JsonValue::Object(self.parse_object()?),
            TokenKind::LeftBracket => JsonValue::Array(self.parse_array()?),
            TokenKind::String => {
                self.advance()?;
                JsonValue::String(decode_string(token)?)
            }
            TokenKind::Number => {
                self.advance()?;
                parse_number(token, false)?
            }
            TokenKind::Minus => {
                self.advance()?;
                let number = self.consume(TokenKind::Number, "expected a number after '-'")?;
                parse_number(number, true)?
            }
            TokenKind::Bool => {
                self.advance()?;
                // NOTE: the scanner only produces "true" or "false"
                JsonValue::Bool(token.lexeme == "true")
            }
            TokenKind::Null => {
                self.advance()?;
                JsonValue::Null
            }
            TokenKind::RightBrace
            | TokenKind::RightBracket
            | TokenKind::Colon
            | TokenKind::Comma => return Err(self.make_err(ErrorKind::UnexpectedToken)),
        };

        Ok(value)
    }
}

fn parse_number(token: &Token, negative: bool) -> Result<JsonValue, Error> {
    let lexeme = token.lexeme.as_str();
    let bytes = lexeme.as_bytes();

    if !bytes.first().is_some_and(u8::is_ascii_digit) {
        return Err(Parser::make_err_at(ErrorKind::InvalidNumber, token));
    }

    if bytes[0] == b'0' && bytes.get(1).is_some_and(u8::is_ascii_digit) {
        return Err(Parser::make_err_at(ErrorKind::LeadingZero, token));
    }

    // Apply the sign before parsing so the most negative integer still fits
    let signed = if negative {
        format!("-{lexeme}")
    } else {
        lexeme.to_string()
    };

    if let Ok(int) = signed.parse::<i64>() {
        return Ok(JsonValue::Integer(int));
    }

    signed
        .parse::<f64>()
        .map(JsonValue::Float)
        .map_err(|_| Parser::make_err_at(ErrorKind::InvalidNumber, token))
}

fn decode_string(token: &Token) -> Result<String, Error> {
    let invalid = || Parser::make_err_at(ErrorKind::InvalidEscape, token);

    let mut str_val = String::with_capacity(token.lexeme.len());
    let mut chars = token.lexeme.chars();

    while let Some(chr) = chars.next() {
        if chr != '\\' {
            str_val.push(chr);
            continue;
        }

        let value = match chars.next().ok_or_else(invalid)? {
            '"' => '"',
            '/' => '/',
            'b' => '\x08',
            'f' => '\x0C',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '\\' => '\\',
            'u' => {
                let high = hex_escape(&mut chars).ok_or_else(invalid)?;

                // A high surrogate has to be followed by an escaped low surrogate
                let code = if (0xD800..0xDC00).contains(&high) {
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(invalid());
                    }

                    let low = hex_escape(&mut chars).ok_or_else(invalid)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(invalid());
                    }

                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };

                char::from_u32(code).ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };

        str_val.push(value);
    }

    Ok(str_val)
}

// Read the 4 hex digits of a `\u` escape
fn hex_escape(chars: &mut Chars<'_>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }

    Some(code)
}
