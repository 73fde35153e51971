use log::{debug, trace};

use crate::{
    error::{Error, ErrorKind},
    token::{Token, TokenKind, TokenSequence},
};

/// Scan the whole source into a token sequence, failing on the first
/// character that cannot start a token.
pub fn tokenize(source: &str) -> Result<TokenSequence, Error> {
    let mut scanner = Scanner::init(source);
    let mut tokens = TokenSequence::new();

    while let Some(token) = scanner.next_token()? {
        trace!("{token}");
        tokens.push(token);
    }

    debug!("scanned {} tokens from {} bytes", tokens.len(), source.len());
    Ok(tokens)
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    token_start: usize,
    token_line: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn init(source: &'a str) -> Self {
        Self {
            source,
            token_start: 0,
            token_line: 1,
            current: 0,
            line: 1,
        }
    }

    fn make_token(&mut self, kind: TokenKind) -> Token {
        self.make_token_from(kind, self.token_start, self.current)
    }

    fn make_token_from(&mut self, kind: TokenKind, start: usize, end: usize) -> Token {
        let token = Token::init(kind, self.token_line, &self.source[start..end]);
        self.token_start = self.current;

        token
    }

    fn make_err(&self, kind: ErrorKind) -> Error {
        Error {
            kind,
            line: self.token_line,
            lexeme: self.source[self.token_start..self.current].to_string(),
        }
    }

    fn advance(&mut self) -> Option<char> {
        // A character such as an emoji may be more than 1 byte, so move `current` past all of
        // its bytes
        let c = self.source[self.current..].chars().next()?;
        self.current += c.len_utf8();

        if c == '\n' {
            self.line += 1;
        }

        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.current..].chars().nth(n)
    }

    fn peek_is_digit(&self, n: usize) -> bool {
        matches!(self.peek_nth(n), Some(c) if c.is_ascii_digit())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    fn digits(&mut self) {
        while self.peek_is_digit(0) {
            self.advance();
        }
    }

    fn number(&mut self) -> Token {
        // Consume digits - we already know we've got an initial one
        self.digits();

        // A `.` only belongs to the number when a digit follows it
        if self.peek() == Some('.') && self.peek_is_digit(1) {
            self.advance();
            self.digits();
        }

        // Allow scientific notation e.g. 10e5, 10E-5, as long as the exponent has digits
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign_len = usize::from(matches!(self.peek_nth(1), Some('+' | '-')));
            if self.peek_is_digit(1 + sign_len) {
                for _ in 0..=sign_len {
                    self.advance();
                }
                self.digits();
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Result<Token, Error> {
        loop {
            match self.advance() {
                Some('"') => break,
                // Skip whatever follows a backslash so `\"` doesn't end the string
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(self.make_err(ErrorKind::UnterminatedString));
                    }
                }
                Some(_) => {}
                None => return Err(self.make_err(ErrorKind::UnterminatedString)),
            }
        }

        // Lexeme excludes the quotes, escapes are left as written
        Ok(self.make_token_from(TokenKind::String, self.token_start + 1, self.current - 1))
    }

    fn minus(&mut self) -> Result<Token, Error> {
        if self.peek_is_digit(0) {
            return Ok(self.make_token(TokenKind::Minus));
        }

        Err(self.make_err(ErrorKind::UnexpectedSymbol('-')))
    }

    fn literal(&mut self, first: char) -> Result<Token, Error> {
        let remaining = &self.source[self.token_start..];
        let literals = [
            ("true", TokenKind::Bool),
            ("false", TokenKind::Bool),
            ("null", TokenKind::Null),
        ];

        for (word, kind) in literals {
            if remaining.starts_with(word) {
                self.current = self.token_start + word.len();
                return Ok(self.make_token(kind));
            }
        }

        Err(self.make_err(ErrorKind::UnexpectedSymbol(first)))
    }

    fn symbol(&mut self, c: char) -> Result<Token, Error> {
        let kind = match c {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            't' | 'f' | 'n' => return self.literal(c),
            _ => return Err(self.make_err(ErrorKind::UnexpectedSymbol(c))),
        };

        Ok(self.make_token(kind))
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        self.skip_whitespace();

        self.token_start = self.current;
        self.token_line = self.line;

        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let token = match c {
            '0'..='9' => self.number(),
            '-' => self.minus()?,
            '"' => self.string()?,
            _ => self.symbol(c)?,
        };

        Ok(Some(token))
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_lexemes(source: &str) -> Result<Vec<(TokenKind, String)>, ErrorKind> {
        tokenize(source)
            .map(|tokens| tokens.iter().map(|t| (t.kind, t.lexeme.clone())).collect())
            .map_err(|e| e.kind)
    }

    #[test]
    fn test_individual_tokens() {
        let cases = vec![
            ("[", TokenKind::LeftBracket, "["),
            ("]", TokenKind::RightBracket, "]"),
            ("{", TokenKind::LeftBrace, "{"),
            ("}", TokenKind::RightBrace, "}"),
            (":", TokenKind::Colon, ":"),
            (",", TokenKind::Comma, ","),
            ("1234", TokenKind::Number, "1234"),
            ("0", TokenKind::Number, "0"),
            ("1234e5", TokenKind::Number, "1234e5"),
            ("1234E5", TokenKind::Number, "1234E5"),
            ("1234.567", TokenKind::Number, "1234.567"),
            ("1234.567e5", TokenKind::Number, "1234.567e5"),
            ("1234.567e+5", TokenKind::Number, "1234.567e+5"),
            ("1234.567e-5", TokenKind::Number, "1234.567e-5"),
            ("\"str a_b\"", TokenKind::String, "str a_b"),
            ("\"\"", TokenKind::String, ""),
            ("true", TokenKind::Bool, "true"),
            ("false", TokenKind::Bool, "false"),
            ("null", TokenKind::Null, "null"),
        ];

        for (source, kind, lexeme) in cases {
            let mut scanner = Scanner::init(source);
            assert_eq!(
                Ok(Some((kind, lexeme.to_string()))),
                scanner.next_token().map(|x| x.map(|y| (y.kind, y.lexeme))),
                "Scanning {source}"
            );
            assert_eq!(Ok(None), scanner.next_token());
        }
    }

    #[test]
    fn test_multiple_tokens() {
        let tokens = tokenize("{ 1234 12.34 \"hi\" true false null [] }").unwrap();
        let expected = vec![
            TokenKind::LeftBrace,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::String,
            TokenKind::Bool,
            TokenKind::Bool,
            TokenKind::Null,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::RightBrace,
        ];

        assert_eq!(expected, tokens.kinds());
    }

    #[test]
    fn test_whitespace() {
        let tokens =
            tokenize("{\t\n1234 12.34 \"hi\"\n   \t  \n true \r\n false \rnull [] }").unwrap();
        let expected = vec![
            TokenKind::LeftBrace,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::String,
            TokenKind::Bool,
            TokenKind::Bool,
            TokenKind::Null,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::RightBrace,
        ];

        assert_eq!(expected, tokens.kinds());
    }

    #[test]
    fn test_minus_is_separate_token() {
        assert_eq!(
            Ok(vec![
                (TokenKind::Minus, "-".to_string()),
                (TokenKind::Number, "7".to_string()),
            ]),
            kinds_and_lexemes("-7")
        );

        assert_eq!(
            Ok(vec![
                (TokenKind::Minus, "-".to_string()),
                (TokenKind::Number, "5.1e-10".to_string()),
            ]),
            kinds_and_lexemes("-5.1e-10")
        );
    }

    #[test]
    fn test_number_boundaries() {
        let cases = vec![
            // Dangling `.` and exponent markers are left for the next token
            ("1.", ErrorKind::UnexpectedSymbol('.')),
            ("1.e5", ErrorKind::UnexpectedSymbol('.')),
            ("1e", ErrorKind::UnexpectedSymbol('e')),
            ("1e+", ErrorKind::UnexpectedSymbol('e')),
            ("1234a", ErrorKind::UnexpectedSymbol('a')),
            (".5", ErrorKind::UnexpectedSymbol('.')),
            ("+1", ErrorKind::UnexpectedSymbol('+')),
        ];

        for (source, expected) in cases {
            assert_eq!(Err(expected), kinds_and_lexemes(source), "Scanning {source}");
        }
    }

    #[test]
    fn test_invalid_tokens() {
        let cases = vec![
            ("\"end of source", ErrorKind::UnterminatedString),
            ("\"ends in escape\\", ErrorKind::UnterminatedString),
            ("notkeyword", ErrorKind::UnexpectedSymbol('n')),
            ("tru", ErrorKind::UnexpectedSymbol('t')),
            ("xyz", ErrorKind::UnexpectedSymbol('x')),
            ("_", ErrorKind::UnexpectedSymbol('_')),
            ("^", ErrorKind::UnexpectedSymbol('^')),
            ("-", ErrorKind::UnexpectedSymbol('-')),
            ("--1", ErrorKind::UnexpectedSymbol('-')),
            ("- 1", ErrorKind::UnexpectedSymbol('-')),
        ];

        for (source, expected) in cases {
            let mut scanner = Scanner::init(source);
            assert_eq!(
                Err(expected),
                scanner.next_token().map_err(|x| x.kind),
                "Scanning {source}"
            );
        }
    }

    #[test]
    fn test_escapes_left_undecoded() {
        let cases = vec![
            (r#""©""#, r#"©"#),
            (r#""\n""#, r#"\n"#),
            (r#""say \"hi\"""#, r#"say \"hi\""#),
            (r#""\\""#, r#"\\"#),
        ];

        for (source, expected) in cases {
            let mut scanner = Scanner::init(source);
            let token = scanner.next_token();

            assert!(
                matches!(
                    token,
                    Ok(Some(Token { kind: TokenKind::String, ref lexeme, .. })) if lexeme == expected
                ),
                "Scanning {source}, got {token:?}"
            );
        }
    }

    #[test]
    fn test_literals_matched_by_prefix() {
        // `true` is matched, then `x` is left over
        assert_eq!(
            Err(ErrorKind::UnexpectedSymbol('x')),
            kinds_and_lexemes("truex")
        );
        assert_eq!(
            Ok(vec![
                (TokenKind::Bool, "true".to_string()),
                (TokenKind::Comma, ",".to_string()),
                (TokenKind::Null, "null".to_string()),
            ]),
            kinds_and_lexemes("true,null")
        );
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(
            Ok(vec![(TokenKind::String, "emoji 😄 中文".to_string())]),
            kinds_and_lexemes("\"emoji 😄 中文\"")
        );
        assert_eq!(Err(ErrorKind::UnexpectedSymbol('é')), kinds_and_lexemes("é"));
    }

    #[test]
    fn test_lines() {
        let tokens = tokenize("{\n  \"a\": \"multi\nline\",\n  \"b\": 1\n}").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(vec![1, 2, 2, 2, 3, 4, 4, 4, 5], lines);

        let err = tokenize("{\n\n  @").unwrap_err();
        assert_eq!(
            Error {
                kind: ErrorKind::UnexpectedSymbol('@'),
                line: 3,
                lexeme: "@".to_string(),
            },
            err
        );
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let source = r#"{"k": [1, -2.5e3, "s\"", true, false, null, {}]}"#;
        assert_eq!(tokenize(source), tokenize(source));
    }

    #[test]
    fn test_next_token_at_end() {
        let mut scanner = Scanner::init("\"one_token\"  ");
        assert!(matches!(scanner.next_token(), Ok(Some(_))));
        assert!(matches!(scanner.next_token(), Ok(None)));
        assert!(scanner.is_at_end());
        assert_eq!(1, scanner.line());
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(Ok(TokenSequence::new()), tokenize(""));
        assert_eq!(Ok(TokenSequence::new()), tokenize(" \n\t "));
    }
}
