//! Lexer (tokenizer) for s-expression source text.

use crate::{ParseError, ParseResult};
use std::sync::Arc;
use tydl_core::SourceLocation;

/// Characters that make up operator symbols such as `?` and `*`.
const OPERATOR_CHARS: &str = "!#%&*+-./;<=>?@^`|~";

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,      // (
    RParen,      // )
    DoubleColon, // ::

    /// Identifier symbol: `[A-Za-z_$][A-Za-z0-9_$]*`.
    Symbol(String),
    /// Quoted symbol: `'...'`.
    QuotedSymbol(String),
    /// Run of operator characters, e.g. `?` or `*`.
    Operator(String),
    Int(i64),
    String(String),

    Eof,
}

/// A token with its location.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    input: &'a str,
    file: Option<Arc<str>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, file: Option<Arc<str>>) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            input,
            file,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn location(&self, line: usize, column: usize) -> SourceLocation {
        SourceLocation::in_file(self.file.clone(), line, column)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second_char(&self) -> Option<char> {
        self.chars.clone().nth(1).map(|(_, c)| c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
                continue;
            }
            if c != '/' {
                break;
            }
            match self.peek_second_char() {
                Some('/') => {
                    while let Some(c) = self.next_char() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.next_char();
                    self.next_char();
                    let mut closed = false;
                    while let Some(c) = self.next_char() {
                        if c == '*' && self.peek_char() == Some('/') {
                            self.next_char();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(ParseError::syntax(
                            "unterminated block comment",
                            self.location(line, column),
                        ));
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_trivia()?;

        let start = self.pos;
        let line = self.line;
        let column = self.column;
        let location = self.location(line, column);

        let Some(c) = self.next_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                location,
            });
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => {
                if self.peek_char() == Some(':') {
                    self.next_char();
                    TokenKind::DoubleColon
                } else {
                    return Err(ParseError::syntax("unexpected character ':'", location));
                }
            }
            '"' => TokenKind::String(self.read_quoted('"', &location)?),
            '\'' => TokenKind::QuotedSymbol(self.read_quoted('\'', &location)?),
            c if c.is_ascii_digit() => self.read_int(start, &location)?,
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => {
                self.read_int(start, &location)?
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                while let Some(c) = self.peek_char() {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                        self.next_char();
                    } else {
                        break;
                    }
                }
                TokenKind::Symbol(self.input[start..self.pos].to_string())
            }
            c if OPERATOR_CHARS.contains(c) => {
                while let Some(c) = self.peek_char() {
                    if OPERATOR_CHARS.contains(c) {
                        self.next_char();
                    } else {
                        break;
                    }
                }
                TokenKind::Operator(self.input[start..self.pos].to_string())
            }
            other => {
                return Err(ParseError::syntax(
                    format!("unexpected character '{}'", other),
                    location,
                ));
            }
        };

        Ok(Token { kind, location })
    }

    /// Read the rest of a string or quoted symbol after its opening quote.
    fn read_quoted(&mut self, quote: char, location: &SourceLocation) -> ParseResult<String> {
        let mut value = String::new();
        loop {
            match self.next_char() {
                None | Some('\n') => {
                    let what = if quote == '"' { "string" } else { "quoted symbol" };
                    return Err(ParseError::syntax(
                        format!("unterminated {}", what),
                        location.clone(),
                    ));
                }
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some(c @ ('"' | '\'' | '\\' | '/')) => c,
                        Some(c) => {
                            return Err(ParseError::syntax(
                                format!("invalid escape sequence '\\{}'", c),
                                self.location(self.line, self.column.saturating_sub(2)),
                            ));
                        }
                        None => {
                            return Err(ParseError::syntax(
                                "unterminated escape sequence",
                                location.clone(),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn read_int(&mut self, start: usize, location: &SourceLocation) -> ParseResult<TokenKind> {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '_' {
                self.next_char();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];

        if self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '$' || c == '.')
        {
            return Err(ParseError::syntax(
                format!("invalid numeric literal starting with '{}'", text),
                location.clone(),
            ));
        }
        if text.ends_with('_')
            || text.contains("__")
            || text.trim_start_matches('-').starts_with('_')
        {
            return Err(ParseError::syntax(
                format!("misplaced '_' in integer '{}'", text),
                location.clone(),
            ));
        }

        text.replace('_', "")
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| {
                ParseError::syntax(
                    format!("integer '{}' is out of range", text),
                    location.clone(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input, None)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_annotated_element() {
        assert_eq!(
            kinds("x::(* int 2)"),
            vec![
                TokenKind::Symbol("x".into()),
                TokenKind::DoubleColon,
                TokenKind::LParen,
                TokenKind::Operator("*".into()),
                TokenKind::Symbol("int".into()),
                TokenKind::Int(2),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_strings_and_quoted_symbols() {
        assert_eq!(
            kinds(r#"(include_file "a/b.tydl") 'odd name'"#),
            vec![
                TokenKind::LParen,
                TokenKind::Symbol("include_file".into()),
                TokenKind::String("a/b.tydl".into()),
                TokenKind::RParen,
                TokenKind::QuotedSymbol("odd name".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "// leading\n(a /* inner\n comment */ b) // trailing";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::LParen,
                TokenKind::Symbol("a".into()),
                TokenKind::Symbol("b".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(kinds("-3 1_000")[..2], [TokenKind::Int(-3), TokenKind::Int(1000)]);
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = Lexer::new("(a\n  b)", None).tokenize().unwrap();
        assert_eq!((tokens[2].location.line, tokens[2].location.column), (2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"abc", None).tokenize().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("(a) /* never closed", None).tokenize().unwrap_err();
        assert_eq!(err.location().column, 5);
    }

    #[test]
    fn test_single_colon_is_rejected() {
        let err = Lexer::new("x:int", None).tokenize().unwrap_err();
        assert!(err.to_string().contains("':'"));
    }

    #[test]
    fn test_integer_overflow() {
        let err = Lexer::new("99999999999999999999", None)
            .tokenize()
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
