//! S-expression values and the reader that builds them from tokens.

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{ParseError, ParseResult};
use std::sync::Arc;
use tydl_core::SourceLocation;

/// A value read from source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SExp {
    pub kind: SExpKind,
    /// `a::b::value` yields annotations `["a", "b"]`.
    pub annotations: Vec<String>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SExpKind {
    Symbol(String),
    Int(i64),
    String(String),
    List(Vec<SExp>),
}

impl SExp {
    /// Short description of the value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SExpKind::Symbol(_) => "symbol",
            SExpKind::Int(_) => "integer",
            SExpKind::String(_) => "string",
            SExpKind::List(items) if items.is_empty() => "empty s-expression",
            SExpKind::List(_) => "s-expression",
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            SExpKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match &self.kind {
            SExpKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// The head symbol of a non-empty s-expression.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.first())
            .and_then(SExp::as_symbol)
    }
}

/// Reader state.
struct Reader {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof, and `advance`
        // never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn read_all(&mut self) -> ParseResult<Vec<SExp>> {
        let mut values = Vec::new();
        while !self.check(&TokenKind::Eof) {
            values.push(self.read_value()?);
        }
        Ok(values)
    }

    fn read_value(&mut self) -> ParseResult<SExp> {
        let location = self.peek().location.clone();
        let annotations = self.read_annotations();

        let token = self.advance();
        let kind = match token.kind {
            TokenKind::Symbol(s) | TokenKind::QuotedSymbol(s) | TokenKind::Operator(s) => {
                SExpKind::Symbol(s)
            }
            TokenKind::Int(n) => SExpKind::Int(n),
            TokenKind::String(s) => SExpKind::String(s),
            TokenKind::LParen => {
                let mut items = Vec::new();
                loop {
                    if self.check(&TokenKind::RParen) {
                        self.advance();
                        break;
                    }
                    if self.check(&TokenKind::Eof) {
                        return Err(ParseError::syntax(
                            "unterminated s-expression",
                            token.location,
                        ));
                    }
                    items.push(self.read_value()?);
                }
                SExpKind::List(items)
            }
            TokenKind::RParen => {
                return Err(ParseError::syntax("unexpected ')'", token.location));
            }
            TokenKind::DoubleColon => {
                return Err(ParseError::syntax("unexpected '::'", token.location));
            }
            TokenKind::Eof => {
                return Err(ParseError::syntax(
                    "annotation is not followed by a value",
                    token.location,
                ));
            }
        };

        Ok(SExp {
            kind,
            annotations,
            location,
        })
    }

    /// Consume `name::` prefixes.
    fn read_annotations(&mut self) -> Vec<String> {
        let mut annotations = Vec::new();
        loop {
            let name = match &self.peek().kind {
                TokenKind::Symbol(s) | TokenKind::QuotedSymbol(s) => s.clone(),
                _ => return annotations,
            };
            let followed_by_colons = matches!(
                self.tokens.get(self.pos + 1).map(|t| &t.kind),
                Some(TokenKind::DoubleColon)
            );
            if !followed_by_colons {
                return annotations;
            }
            self.advance();
            self.advance();
            annotations.push(name);
        }
    }
}

/// Read every top-level value of `input`.
pub fn read_sexps(input: &str, file: Option<Arc<str>>) -> ParseResult<Vec<SExp>> {
    let tokens = Lexer::new(input, file).tokenize()?;
    Reader { tokens, pos: 0 }.read_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(input: &str) -> SExp {
        let mut values = read_sexps(input, None).unwrap();
        assert_eq!(values.len(), 1);
        values.remove(0)
    }

    #[test]
    fn test_read_nested_list() {
        let value = read_one("(product pair x::int y::(? int))");
        let items = value.as_list().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(value.head_symbol(), Some("product"));
        assert_eq!(items[2].annotations, vec!["x".to_string()]);
        assert_eq!(items[2].as_symbol(), Some("int"));
        assert_eq!(items[3].annotations, vec!["y".to_string()]);
        assert_eq!(items[3].head_symbol(), Some("?"));
    }

    #[test]
    fn test_annotation_location_is_value_start() {
        let value = read_one("(a\n   id::(b int))");
        let inner = &value.as_list().unwrap()[1];
        assert_eq!((inner.location.line, inner.location.column), (2, 4));
    }

    #[test]
    fn test_multiple_annotations() {
        let value = read_one("a::'b c'::x");
        assert_eq!(value.annotations, vec!["a".to_string(), "b c".to_string()]);
    }

    #[test]
    fn test_unbalanced_parens() {
        let err = read_sexps("(define x (domain)", None).unwrap_err();
        assert!(err.to_string().contains("unterminated s-expression"));

        let err = read_sexps("(a))", None).unwrap_err();
        assert!(err.to_string().contains("unexpected ')'"));
    }

    #[test]
    fn test_dangling_annotation() {
        let err = read_sexps("x::", None).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_file_name_in_location() {
        let values = read_sexps("\n(a)", Some(Arc::from("toy.tydl"))).unwrap();
        assert_eq!(values[0].location.to_string(), "toy.tydl:2:1");
    }
}
