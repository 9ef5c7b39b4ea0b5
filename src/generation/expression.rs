//! Directive expression parsing.
//!
//! A directive body is a small expression over the capability vocabulary:
//!
//! ```text
//! expr   := term ('+' term)*
//! term   := string | number | true | false | nil | list | range | call | offset
//! list   := '[' (expr (',' expr)*)? ']'
//! range  := integer '..' integer
//! call   := ident ('(' (expr (',' expr)*)? ')')?
//! offset := integer '.' ident ('(' (expr (',' expr)*)? ')')?
//! ```
//!
//! Parsing never executes anything; evaluation happens against the closed
//! vocabulary in [`crate::generation::vocabulary`].

use crate::error::ParseError;
use crate::value::Value;
use std::fmt;

/// Deepest allowed nesting of lists and call arguments.
pub const MAX_NESTING: usize = 64;

/// Parsed directive expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    List(Vec<Expr>),
    /// Inclusive integer range, e.g. `1..10`
    Range(i64, i64),
    /// Capability call, e.g. `words(4)` or bare `city`
    Call { name: String, args: Vec<Expr> },
    /// Capability called on an integer receiver, e.g. `5.days_ago`
    Method {
        receiver: i64,
        name: String,
        args: Vec<Expr>,
    },
    /// `a + b + ...`
    Concat(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Integer(i64),
    Float(f64),
    Str(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Plus,
    Dot,
    DotDot,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Integer(n) => write!(f, "number {}", n),
            Token::Float(x) => write!(f, "number {}", x),
            Token::Str(s) => write!(f, "string '{}'", s),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::LBracket => f.write_str("'['"),
            Token::RBracket => f.write_str("']'"),
            Token::Comma => f.write_str("','"),
            Token::Plus => f.write_str("'+'"),
            Token::Dot => f.write_str("'.'"),
            Token::DotDot => f.write_str("'..'"),
        }
    }
}

/// Parse a directive body (the text after the `~` marker).
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    let mut stream = TokenStream::new(&tokens, source.len());
    let expr = parse_expr(&mut stream)?;
    if let Some(token) = stream.peek() {
        return Err(ParseError::new(
            stream.offset(),
            format!("unexpected {} after expression", token),
        ));
    }
    Ok(expr)
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' | ')' | '[' | ']' | ',' | '+' => {
                chars.next();
                let token = match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ',' => Token::Comma,
                    _ => Token::Plus,
                };
                tokens.push((token, offset));
            }
            '.' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '.'))) {
                    chars.next();
                    tokens.push((Token::DotDot, offset));
                } else {
                    tokens.push((Token::Dot, offset));
                }
            }
            '\'' | '"' => {
                chars.next();
                tokens.push((Token::Str(lex_string(source, offset, c, &mut chars)?), offset));
            }
            c if c.is_ascii_digit() || c == '-' => {
                tokens.push((lex_number(source, offset)?, offset));
                // lex_number works on the raw slice; skip what it consumed
                let consumed = number_len(&source[offset..]);
                for _ in 0..consumed {
                    chars.next();
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '?' || c == '!' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(name), offset));
            }
            other => {
                return Err(ParseError::new(
                    offset,
                    format!("unexpected character '{}'", other),
                ))
            }
        }
    }

    Ok(tokens)
}

fn lex_string(
    source: &str,
    start: usize,
    quote: char,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, ParseError> {
    let mut value = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            c if c == quote => return Ok(value),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            c => value.push(c),
        }
    }
    Err(ParseError::new(
        start,
        format!("unterminated string starting with {}", &source[start..]),
    ))
}

/// Byte length of the numeric literal at the start of `text`.
///
/// A `.` only continues the number when a digit follows, so `5.days_ago`
/// lexes as `5` `.` `days_ago` and `1..3` as `1` `..` `3`.
fn number_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut len = 0;
    if bytes.first() == Some(&b'-') {
        len += 1;
    }
    while len < bytes.len() && (bytes[len].is_ascii_digit() || bytes[len] == b'_') {
        len += 1;
    }
    if len + 1 < bytes.len() && bytes[len] == b'.' && bytes[len + 1].is_ascii_digit() {
        len += 1;
        while len < bytes.len() && bytes[len].is_ascii_digit() {
            len += 1;
        }
    }
    len
}

fn lex_number(source: &str, offset: usize) -> Result<Token, ParseError> {
    let len = number_len(&source[offset..]);
    let text: String = source[offset..offset + len]
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if text == "-" || text.is_empty() {
        return Err(ParseError::new(offset, "expected a number after '-'"));
    }
    if text.contains('.') {
        text.parse::<f64>()
            .map(Token::Float)
            .map_err(|e| ParseError::new(offset, format!("invalid number '{}': {}", text, e)))
    } else {
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|e| ParseError::new(offset, format!("invalid number '{}': {}", text, e)))
    }
}

/// Token cursor with single-token lookahead.
struct TokenStream<'t> {
    tokens: &'t [(Token, usize)],
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'t> TokenStream<'t> {
    fn new(tokens: &'t [(Token, usize)], end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek() == Some(expected)
    }

    /// Byte offset of the current token, or end of input.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, offset)| *offset)
            .unwrap_or(self.end)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn unexpected(&self, wanted: &str) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::new(
                self.offset(),
                format!("expected {}, found {}", wanted, found),
            ),
            None => ParseError::new(
                self.offset(),
                format!("expected {}, found end of input", wanted),
            ),
        }
    }
}

fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let first = parse_term(stream)?;
    if !stream.check(&Token::Plus) {
        return Ok(first);
    }

    let mut parts = vec![first];
    while stream.check(&Token::Plus) {
        stream.advance();
        parts.push(parse_term(stream)?);
    }
    Ok(Expr::Concat(parts))
}

fn parse_term(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let offset = stream.offset();
    let token = stream.advance().cloned();

    match token {
        Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
        Some(Token::Float(x)) => Ok(Expr::Literal(Value::Float(x))),
        Some(Token::Integer(n)) => parse_integer_suffix(stream, n),
        Some(Token::LBracket) => {
            let items = parse_list(stream, Token::RBracket)?;
            Ok(Expr::List(items))
        }
        Some(Token::Ident(name)) => match name.as_str() {
            "true" => Ok(Expr::Literal(Value::Bool(true))),
            "false" => Ok(Expr::Literal(Value::Bool(false))),
            "nil" | "null" => Ok(Expr::Literal(Value::Null)),
            _ => {
                let args = parse_call_args(stream)?;
                Ok(Expr::Call { name, args })
            }
        },
        Some(other) => Err(ParseError::new(
            offset,
            format!("expected a value or generator, found {}", other),
        )),
        None => Err(ParseError::new(
            offset,
            "expected a value or generator, found end of input",
        )),
    }
}

/// After an integer: a range (`1..5`), a method call (`5.days_ago`) or the bare number.
fn parse_integer_suffix(stream: &mut TokenStream, n: i64) -> Result<Expr, ParseError> {
    match stream.peek() {
        Some(Token::DotDot) => {
            stream.advance();
            let offset = stream.offset();
            match stream.advance().cloned() {
                Some(Token::Integer(end)) => Ok(Expr::Range(n, end)),
                _ => Err(ParseError::new(offset, "expected an integer to close the range")),
            }
        }
        Some(Token::Dot) => {
            stream.advance();
            let offset = stream.offset();
            match stream.advance().cloned() {
                Some(Token::Ident(name)) => {
                    let args = parse_call_args(stream)?;
                    Ok(Expr::Method {
                        receiver: n,
                        name,
                        args,
                    })
                }
                _ => Err(ParseError::new(offset, "expected a generator name after '.'")),
            }
        }
        _ => Ok(Expr::Literal(Value::Integer(n))),
    }
}

fn parse_call_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
    if stream.check(&Token::LParen) {
        stream.advance();
        parse_list(stream, Token::RParen)
    } else {
        Ok(Vec::new())
    }
}

/// Comma-separated expressions up to and including `close`.
fn parse_list(stream: &mut TokenStream, close: Token) -> Result<Vec<Expr>, ParseError> {
    if stream.depth >= MAX_NESTING {
        return Err(ParseError::new(stream.offset(), "expression nested too deeply"));
    }
    stream.depth += 1;
    let items = parse_items(stream, close);
    stream.depth -= 1;
    items
}

fn parse_items(stream: &mut TokenStream, close: Token) -> Result<Vec<Expr>, ParseError> {
    let mut items = Vec::new();
    if stream.check(&close) {
        stream.advance();
        return Ok(items);
    }

    loop {
        items.push(parse_expr(stream)?);
        if stream.check(&Token::Comma) {
            stream.advance();
            continue;
        }
        stream.expect(close.clone())?;
        return Ok(items);
    }
}
