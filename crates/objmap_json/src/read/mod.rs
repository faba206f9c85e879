//! The read path: tokenizer, visitor protocol and the parse driver.
//!
//! [`parse_text`] walks the grammar and replays five visitor events into a
//! [`JsonVisitor`]. The events carry the member key under which the value
//! lives in its parent; the key is `""` for the document root and for array
//! elements.

mod driver;
mod lexer;

pub use driver::ParseDriver;

use lexer::{Lexer, Token, TokenKind};
use objmap_reflect::Value;

use crate::MapError;

// -----------------------------------------------------------------------------
// JsonVisitor

/// The push-based event protocol between the tokenizer and a consumer.
///
/// Array boundaries may be handled by delegating to the object boundary
/// methods; the stack discipline is identical.
pub trait JsonVisitor {
    /// A scalar member was read, already decoded.
    fn value(&mut self, key: &str, value: Value) -> Result<(), MapError>;

    /// An object opens under `key`.
    fn start_object(&mut self, key: &str) -> Result<(), MapError>;

    /// The object started under `key` closes.
    fn end_object(&mut self, key: &str) -> Result<(), MapError>;

    /// An array opens under `key`.
    fn start_array(&mut self, key: &str) -> Result<(), MapError>;

    /// The array started under `key` closes.
    fn end_array(&mut self, key: &str) -> Result<(), MapError>;
}

// -----------------------------------------------------------------------------
// Grammar

/// Parses `text` and replays its structure into `visitor`.
///
/// Exactly one top-level value is accepted; trailing non-whitespace content
/// is an error.
pub fn parse_text<V: JsonVisitor>(text: &str, visitor: &mut V) -> Result<(), MapError> {
    let mut lexer = Lexer::new(text);

    let token = lexer.next_token()?;
    parse_value(&mut lexer, token, "", visitor)?;

    let token = lexer.next_token()?;
    match token.kind {
        TokenKind::Eof => Ok(()),
        _ => Err(MapError::malformed(
            "unexpected trailing content",
            token.line,
            token.column,
        )),
    }
}

fn parse_value<V: JsonVisitor>(
    lexer: &mut Lexer<'_>,
    token: Token,
    key: &str,
    visitor: &mut V,
) -> Result<(), MapError> {
    match token.kind {
        TokenKind::LBrace => {
            visitor.start_object(key)?;
            parse_members(lexer, visitor)?;
            visitor.end_object(key)
        }
        TokenKind::LBracket => {
            visitor.start_array(key)?;
            parse_elements(lexer, visitor)?;
            visitor.end_array(key)
        }
        TokenKind::Str(text) => visitor.value(key, Value::Str(text)),
        TokenKind::Int(value) => visitor.value(key, Value::Int(value)),
        TokenKind::Float(value) => visitor.value(key, Value::Float(value)),
        TokenKind::True => visitor.value(key, Value::Bool(true)),
        TokenKind::False => visitor.value(key, Value::Bool(false)),
        TokenKind::Null => visitor.value(key, Value::Null),
        _ => Err(MapError::malformed(
            "expected a value",
            token.line,
            token.column,
        )),
    }
}

fn parse_members<V: JsonVisitor>(lexer: &mut Lexer<'_>, visitor: &mut V) -> Result<(), MapError> {
    let mut token = lexer.next_token()?;
    if token.kind == TokenKind::RBrace {
        return Ok(());
    }

    loop {
        let key = match token.kind {
            TokenKind::Str(key) => key,
            _ => {
                return Err(MapError::malformed(
                    "expected a member name",
                    token.line,
                    token.column,
                ));
            }
        };

        let colon = lexer.next_token()?;
        if colon.kind != TokenKind::Colon {
            return Err(MapError::malformed("expected `:`", colon.line, colon.column));
        }

        let value = lexer.next_token()?;
        parse_value(lexer, value, &key, visitor)?;

        let separator = lexer.next_token()?;
        match separator.kind {
            TokenKind::Comma => token = lexer.next_token()?,
            TokenKind::RBrace => return Ok(()),
            _ => {
                return Err(MapError::malformed(
                    "expected `,` or `}`",
                    separator.line,
                    separator.column,
                ));
            }
        }
    }
}

fn parse_elements<V: JsonVisitor>(lexer: &mut Lexer<'_>, visitor: &mut V) -> Result<(), MapError> {
    let mut token = lexer.next_token()?;
    if token.kind == TokenKind::RBracket {
        return Ok(());
    }

    loop {
        parse_value(lexer, token, "", visitor)?;

        let separator = lexer.next_token()?;
        match separator.kind {
            TokenKind::Comma => token = lexer.next_token()?,
            TokenKind::RBracket => return Ok(()),
            _ => {
                return Err(MapError::malformed(
                    "expected `,` or `]`",
                    separator.line,
                    separator.column,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as readable strings.
    struct Recorder(Vec<String>);

    impl JsonVisitor for Recorder {
        fn value(&mut self, key: &str, value: Value) -> Result<(), MapError> {
            self.0.push(format!("value({key}, {value:?})"));
            Ok(())
        }

        fn start_object(&mut self, key: &str) -> Result<(), MapError> {
            self.0.push(format!("start_object({key})"));
            Ok(())
        }

        fn end_object(&mut self, key: &str) -> Result<(), MapError> {
            self.0.push(format!("end_object({key})"));
            Ok(())
        }

        fn start_array(&mut self, key: &str) -> Result<(), MapError> {
            self.0.push(format!("start_array({key})"));
            Ok(())
        }

        fn end_array(&mut self, key: &str) -> Result<(), MapError> {
            self.0.push(format!("end_array({key})"));
            Ok(())
        }
    }

    #[test]
    fn events_carry_member_keys() {
        let mut recorder = Recorder(Vec::new());
        parse_text(r#"{"a": 1, "b": [true, null]}"#, &mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![
                "start_object()",
                "value(a, Int(1))",
                "start_array(b)",
                "value(, Bool(true))",
                "value(, Null)",
                "end_array(b)",
                "end_object()",
            ]
        );
    }

    #[test]
    fn trailing_content_is_rejected() {
        let mut recorder = Recorder(Vec::new());
        let error = parse_text("{} {}", &mut recorder).unwrap_err();
        assert_eq!(error, MapError::malformed("unexpected trailing content", 1, 4));
    }

    #[test]
    fn missing_colon_is_rejected() {
        let mut recorder = Recorder(Vec::new());
        let error = parse_text(r#"{"a" 1}"#, &mut recorder).unwrap_err();
        assert_eq!(error, MapError::malformed("expected `:`", 1, 6));
    }

    #[test]
    fn empty_composites() {
        let mut recorder = Recorder(Vec::new());
        parse_text(r#"{"xs": []}"#, &mut recorder).unwrap();
        assert_eq!(
            recorder.0,
            vec![
                "start_object()",
                "start_array(xs)",
                "end_array(xs)",
                "end_object()",
            ]
        );
    }
}
