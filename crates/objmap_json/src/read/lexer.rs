use core::iter::Peekable;
use core::str::Chars;

use crate::MapError;

// -----------------------------------------------------------------------------
// Token

#[derive(Debug, PartialEq)]
pub(crate) enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Str(String),
    Int(i64),
    Float(f64),
    True,
    False,
    Null,
    Eof,
}

/// A token and the 1-based position of its first character.
#[derive(Debug)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
}

// -----------------------------------------------------------------------------
// Lexer

/// A hand-written tokenizer over an in-memory string.
///
/// Numbers follow the strict grammar: no leading zeros, and a fraction or
/// exponent must carry at least one digit. A literal without a fraction or
/// exponent decodes as an integer; an integer too large for `i64` falls
/// back to floating point.
pub(crate) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.bump();
        }
    }

    pub fn next_token(&mut self) -> Result<Token, MapError> {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);
        let token = move |kind| Token { kind, line, column };

        let Some(c) = self.bump() else {
            return Ok(token(TokenKind::Eof));
        };
        match c {
            '{' => Ok(token(TokenKind::LBrace)),
            '}' => Ok(token(TokenKind::RBrace)),
            '[' => Ok(token(TokenKind::LBracket)),
            ']' => Ok(token(TokenKind::RBracket)),
            ':' => Ok(token(TokenKind::Colon)),
            ',' => Ok(token(TokenKind::Comma)),
            '"' => Ok(token(self.lex_string(line, column)?)),
            c if c == '-' || c.is_ascii_digit() => Ok(token(self.lex_number(c, line, column)?)),
            c if c.is_ascii_alphabetic() => Ok(token(self.lex_word(c, line, column)?)),
            other => Err(MapError::malformed(
                format!("unexpected character `{other}`"),
                line,
                column,
            )),
        }
    }

    fn lex_word(&mut self, first: char, line: u32, column: u32) -> Result<TokenKind, MapError> {
        let mut word = String::from(first);
        while let Some(&c) = self.chars.peek().filter(|c| c.is_ascii_alphabetic()) {
            word.push(c);
            self.bump();
        }
        match word.as_str() {
            "true" => Ok(TokenKind::True),
            "false" => Ok(TokenKind::False),
            "null" => Ok(TokenKind::Null),
            other => Err(MapError::malformed(
                format!("unexpected word `{other}`"),
                line,
                column,
            )),
        }
    }

    fn lex_number(&mut self, first: char, line: u32, column: u32) -> Result<TokenKind, MapError> {
        let invalid =
            |literal: String| MapError::malformed(format!("invalid number `{literal}`"), line, column);
        let mut literal = String::from(first);

        // Integer part: an optional minus, then `0` alone or a nonzero
        // digit run.
        let lead = if first == '-' {
            match self.chars.peek() {
                Some(&c) if c.is_ascii_digit() => {
                    literal.push(c);
                    self.bump();
                    c
                }
                _ => return Err(invalid(literal)),
            }
        } else {
            first
        };
        if lead == '0' {
            if matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(invalid(literal));
            }
        } else {
            self.take_digits(&mut literal);
        }

        let mut is_float = false;
        if self.chars.peek() == Some(&'.') {
            literal.push('.');
            self.bump();
            is_float = true;
            if self.take_digits(&mut literal) == 0 {
                return Err(invalid(literal));
            }
        }
        if let Some(&e) = self.chars.peek().filter(|&&c| c == 'e' || c == 'E') {
            literal.push(e);
            self.bump();
            is_float = true;
            if let Some(&sign) = self.chars.peek().filter(|&&c| c == '+' || c == '-') {
                literal.push(sign);
                self.bump();
            }
            if self.take_digits(&mut literal) == 0 {
                return Err(invalid(literal));
            }
        }

        if !is_float {
            if let Ok(value) = literal.parse::<i64>() {
                return Ok(TokenKind::Int(value));
            }
            // Magnitude beyond i64; keep it as floating point.
        }
        match literal.parse::<f64>() {
            Ok(value) => Ok(TokenKind::Float(value)),
            Err(_) => Err(invalid(literal)),
        }
    }

    fn take_digits(&mut self, literal: &mut String) -> usize {
        let mut count = 0;
        while let Some(&c) = self.chars.peek().filter(|c| c.is_ascii_digit()) {
            literal.push(c);
            self.bump();
            count += 1;
        }
        count
    }

    fn lex_string(&mut self, line: u32, column: u32) -> Result<TokenKind, MapError> {
        let mut text = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(MapError::malformed("unterminated string", line, column));
            };
            match c {
                '"' => return Ok(TokenKind::Str(text)),
                '\\' => text.push(self.lex_escape(line, column)?),
                c if (c as u32) < 0x20 => {
                    return Err(MapError::malformed(
                        "unescaped control character in string",
                        self.line,
                        self.column,
                    ));
                }
                c => text.push(c),
            }
        }
    }

    fn lex_escape(&mut self, line: u32, column: u32) -> Result<char, MapError> {
        let Some(c) = self.bump() else {
            return Err(MapError::malformed("unterminated string", line, column));
        };
        match c {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{8}'),
            'f' => Ok('\u{c}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.lex_unicode_escape(),
            other => Err(MapError::malformed(
                format!("invalid escape `\\{other}`"),
                self.line,
                self.column,
            )),
        }
    }

    fn lex_unicode_escape(&mut self) -> Result<char, MapError> {
        let (line, column) = (self.line, self.column);
        let unit = self.lex_hex_unit()?;

        let code = match unit {
            // High surrogate: a low surrogate escape must follow.
            0xD800..=0xDBFF => {
                if self.bump() != Some('\\') || self.bump() != Some('u') {
                    return Err(MapError::malformed("unpaired surrogate", line, column));
                }
                let low = self.lex_hex_unit()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(MapError::malformed("unpaired surrogate", line, column));
                }
                0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(MapError::malformed("unpaired surrogate", line, column));
            }
            unit => unit as u32,
        };

        char::from_u32(code)
            .ok_or_else(|| MapError::malformed("invalid unicode escape", line, column))
    }

    fn lex_hex_unit(&mut self) -> Result<u16, MapError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let (line, column) = (self.line, self.column);
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| MapError::malformed("invalid unicode escape", line, column))?;
            unit = unit << 4 | digit as u16;
        }
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(text);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                return kinds;
            }
        }
    }

    #[test]
    fn structural_tokens() {
        assert_eq!(
            kinds(r#"{"a": [1, -2.5]}"#),
            vec![
                TokenKind::LBrace,
                TokenKind::Str("a".to_owned()),
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::Int(1),
                TokenKind::Comma,
                TokenKind::Float(-2.5),
                TokenKind::RBracket,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c\ndA""#),
            vec![TokenKind::Str("a\"b\\c\ndA".to_owned()), TokenKind::Eof]
        );
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(
            kinds(r#""\u0041 \ud83d\ude00""#),
            vec![TokenKind::Str("A \u{1F600}".to_owned()), TokenKind::Eof]
        );
    }

    #[test]
    fn unpaired_surrogate_is_rejected() {
        let mut lexer = Lexer::new(r#""\ud83d""#);
        assert!(matches!(
            lexer.next_token(),
            Err(MapError::MalformedText { .. })
        ));
    }

    #[test]
    fn positions_track_lines() {
        let mut lexer = Lexer::new("{\n  oops");
        lexer.next_token().unwrap();
        let error = lexer.next_token().unwrap_err();
        assert_eq!(
            error,
            MapError::malformed("unexpected word `oops`", 2, 3)
        );
    }

    #[test]
    fn fraction_and_exponent_forms() {
        assert_eq!(
            kinds("0 10.25 1e3 -0.5E+1 2e-2"),
            vec![
                TokenKind::Int(0),
                TokenKind::Float(10.25),
                TokenKind::Float(1000.0),
                TokenKind::Float(-5.0),
                TokenKind::Float(0.02),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn loose_number_forms_are_rejected() {
        for text in ["01", "-012", "1.", "2e", "3E+", "-"] {
            let mut lexer = Lexer::new(text);
            assert!(
                matches!(lexer.next_token(), Err(MapError::MalformedText { .. })),
                "`{text}` should be rejected"
            );
        }
    }

    #[test]
    fn huge_integer_falls_back_to_float() {
        assert_eq!(
            kinds("123456789012345678901234567890"),
            vec![TokenKind::Float(1.2345678901234568e29), TokenKind::Eof]
        );
    }
}
