//! Scanner for the JavaScript literals embedded in chart scripts.
//!
//! Chart rows are written as JS array literals: strings may use either quote
//! style, object keys are usually bare (`{v: 1, f: '1'}`) and trailing commas
//! are legal. The scanner reads that dialect directly into a JSON value, so
//! quotes of one kind inside a string of the other kind are kept verbatim.
//!
//! Supported:
//! - Single- and double-quoted strings with backslash escapes
//! - Bare (`v`) and quoted (`'v'`, `"v"`) object keys
//! - Integers, decimals and exponents
//! - `true`, `false`, `null` and `undefined` (read as null)
//! - Trailing commas in arrays and objects

use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::{Map, Number, Value};

use crate::error::ExtractError;

/// Reads JS literal values from a source string.
pub struct Scanner<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.src.len())
    }

    fn error(&mut self, message: impl Into<String>) -> ExtractError {
        ExtractError::Syntax {
            offset: self.offset(),
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Skips whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes `expected` (after whitespace) or fails.
    pub fn expect(&mut self, expected: char) -> Result<(), ExtractError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Reads one value.
    pub fn parse_value(&mut self) -> Result<Value, ExtractError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                self.collect_quoted(quote).map(Value::String)
            }
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if is_ident_char(c) => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, ExtractError> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, ExtractError> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ExtractError> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                self.collect_quoted(quote)
            }
            Some(c) if is_ident_char(c) => Ok(self.collect_ident()),
            Some(c) => Err(self.error(format!("invalid object key start '{c}'"))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn collect_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_char(c)) {
            ident.push(c);
            self.bump();
        }
        ident
    }

    fn parse_keyword(&mut self) -> Result<Value, ExtractError> {
        let start = self.offset();
        match self.collect_ident().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            other => Err(ExtractError::Syntax {
                offset: start,
                message: format!("unsupported bare word '{other}'"),
            }),
        }
    }

    fn parse_number(&mut self) -> Result<Value, ExtractError> {
        let start = self.offset();
        let mut text = String::new();
        while let Some(c) = self
            .peek()
            .filter(|&c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            text.push(c);
            self.bump();
        }

        let text = text.strip_prefix('+').unwrap_or(&text);
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(i.into()));
        }

        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ExtractError::Syntax {
                offset: start,
                message: format!("invalid number '{text}'"),
            })
    }

    /// Collects characters inside quotes, handling escape sequences.
    fn collect_quoted(&mut self, quote: char) -> Result<String, ExtractError> {
        let mut result = String::new();
        let mut escaped = false;

        while let Some(c) = self.bump() {
            if escaped {
                match c {
                    'n' => result.push('\n'),
                    't' => result.push('\t'),
                    'r' => result.push('\r'),
                    '\\' | '"' | '\'' | '/' => result.push(c),
                    'u' => result.push(self.collect_unicode_escape()?),
                    _ => {
                        // Unknown escape, keep as-is
                        result.push('\\');
                        result.push(c);
                    }
                }
                escaped = false;
                continue;
            }

            if c == '\\' {
                escaped = true;
                continue;
            }

            if c == quote {
                return Ok(result);
            }

            result.push(c);
        }

        Err(self.error("unterminated string"))
    }

    fn collect_unicode_escape(&mut self) -> Result<char, ExtractError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(self.error("invalid \\u escape")),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid code point \\u{hex}")))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Rewrites a JS literal as JSON text.
///
/// The whole input must be one value (surrounding whitespace allowed). Valid
/// JSON comes back unchanged apart from formatting.
pub fn normalize_literal(src: &str) -> Result<String, ExtractError> {
    let mut scanner = Scanner::new(src);
    let value = scanner.parse_value()?;

    scanner.skip_whitespace();
    if scanner.offset() != src.len() {
        return Err(scanner.error("trailing characters after literal"));
    }

    serde_json::to_string(&value).map_err(|e| ExtractError::Syntax {
        offset: 0,
        message: e.to_string(),
    })
}

/// Decodes normalized JSON text.
pub fn decode(json: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(json).map_err(|e| ExtractError::Syntax {
        offset: e.column().saturating_sub(1),
        message: e.to_string(),
    })
}
