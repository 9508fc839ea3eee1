//! Lexer (tokenizer) for quill source code
//!
//! Converts raw source text into a lazy [`Token`] stream consumed by the
//! parser one token at a time. The stream always ends with exactly one
//! [`TokenKind::Eof`]; after that the iterator is exhausted.
//!
//! Identifiers are scanned with maximal munch and then looked up in the
//! keyword table, so `variable` is a single identifier rather than `var`
//! followed by `iable`.
//!
//! Inside a string literal, `\"` stands for a quote: the backslash is
//! dropped from the token's value, so `"say \"hi\""` holds `say "hi"`. Any
//! other backslash is kept as written.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Ident(String),
    Number(String),
    Str(String),

    // Keywords
    Var,
    If,
    While,
    Break,
    Continue,
    Fn,
    Return,
    True,
    False,
    And,
    Or,
    Not,

    // Operators
    Assign, // =
    EqEq,   // ==
    NotEq,  // !=
    Ge,     // >=
    Le,     // <=
    Gt,     // >
    Lt,     // <
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    // End of input
    Eof,
}

impl TokenKind {
    /// Short name used by the token dump: the lexeme for fixed tokens, a
    /// class name for literals.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "id",
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Var => "var",
            TokenKind::If => "if",
            TokenKind::While => "while",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Ge => ">=",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "eof",
        }
    }

    /// The literal payload, present only for identifiers, numbers and strings.
    pub fn literal(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Number(s) => write!(f, "number {}", s),
            TokenKind::Str(s) => write!(f, "string \"{}\"", s),
            TokenKind::Eof => write!(f, "end of input"),
            other => write!(f, "'{}'", other.name()),
        }
    }
}

/// One lexical unit with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Renders the token-dump line: `kind line column [literal]`.
///
/// Only identifiers, numbers and strings carry a literal. Keywords,
/// operators and punctuation are fully named by their kind, so `var x = 1`
/// dumps as `var 1 1`, `id 1 5 x`, `= 1 7`, `number 1 9 1`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind.name(),
            self.location.line,
            self.location.column
        )?;
        if let Some(literal) = self.kind.literal() {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized char '{ch}' at {location}")]
    UnrecognizedChar { ch: char, location: SourceLocation },

    #[error("unterminated string literal starting at {location}")]
    UnterminatedString { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnrecognizedChar { location, .. }
            | LexError::UnterminatedString { location } => *location,
        }
    }
}

/// Lexer for quill source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    /// Index of the first character of the current line
    line_start: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            line_start: 0,
            finished: false,
        }
    }

    /// Tokenize the entire input, stopping at the first error.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Produce the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, loc)),
        };

        let kind = match ch {
            '"' => self.string_literal(loc)?,
            '0'..='9' => self.number_literal(ch),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '=' => self.either('=', TokenKind::EqEq, TokenKind::Assign),
            '>' => self.either('=', TokenKind::Ge, TokenKind::Gt),
            '<' => self.either('=', TokenKind::Le, TokenKind::Lt),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    return Err(LexError::UnrecognizedChar { ch, location: loc });
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,

            _ => return Err(LexError::UnrecognizedChar { ch, location: loc }),
        };

        Ok(Token::new(kind, loc))
    }

    /// Two-character operator if `next` follows, otherwise the single one.
    fn either(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Accumulate a string body up to the closing quote. A quote preceded by a
    /// backslash is part of the string and the backslash is dropped.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(TokenKind::Str(string)),
                '\\' if self.peek() == Some('"') => {
                    self.advance();
                    string.push('"');
                }
                _ => string.push(ch),
            }
        }

        Err(LexError::UnterminatedString { location: loc })
    }

    fn number_literal(&mut self, first_digit: char) -> TokenKind {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::Number(digits)
    }

    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "fn" => TokenKind::Fn,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => TokenKind::Ident(ident),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character, keeping line bookkeeping current
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.line_start = self.position;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.position - self.line_start + 1)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        // Stop after end of input or the first error
        match &result {
            Ok(token) if token.kind != TokenKind::Eof => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_fixed_tokens_dump_without_literal() {
        let dump: Vec<String> = Lexer::new("var x = 1")
            .tokenize()
            .unwrap()
            .iter()
            .map(Token::to_string)
            .collect();
        assert_eq!(dump, vec!["var 1 1", "id 1 5 x", "= 1 7", "number 1 9 1", "eof 1 10"]);
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("var x = 1;"),
            vec![
                TokenKind::Var,
                TokenKind::Ident("x".to_string()),
                TokenKind::Assign,
                TokenKind::Number("1".to_string()),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != >= <= > < = + - * / ( ) { } ,"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Ge,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_need_word_boundary() {
        assert_eq!(
            kinds("variable iffy notice and"),
            vec![
                TokenKind::Ident("variable".to_string()),
                TokenKind::Ident("iffy".to_string()),
                TokenKind::Ident("notice".to_string()),
                TokenKind::And,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_and_column() {
        let tokens = Lexer::new("var a = 1;\n  print(a);").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[7].location, SourceLocation::new(2, 9));
    }

    #[test]
    fn test_string_literal_escapes_quote_only() {
        let tokens = Lexer::new(r#""say \"hi\" \n""#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str(r#"say "hi" \n"#.to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("var s = \"open").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                location: SourceLocation::new(1, 9)
            }
        );
    }

    #[test]
    fn test_unrecognized_char() {
        let err = Lexer::new("var x = 1;\nx = x % 2;").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedChar {
                ch: '%',
                location: SourceLocation::new(2, 7)
            }
        );
        assert_eq!(err.to_string(), "unrecognized char '%' at line 2, column 7");
    }

    #[test]
    fn test_stream_ends_after_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Eof);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_dump_format() {
        let tokens = Lexer::new("fn f(a) { return \"x y\"; }").tokenize().unwrap();
        let dump: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(dump[0], "fn 1 1");
        assert_eq!(dump[1], "id 1 4 f");
        assert_eq!(dump[7], "string 1 18 x y");
        assert_eq!(dump.last().unwrap(), "eof 1 26");
    }
}
