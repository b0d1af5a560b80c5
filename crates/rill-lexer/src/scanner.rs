use rill_common::{Diagnostic, DiagnosticBag, Position};

use super::cursor::Cursor;
use super::token::{Token, TokenKind};

/// Hand-written scanner for the rill language.
///
/// Single forward pass with fixed one/two-character lookahead. Handles
/// multi-character operators, line comments, string and number literals,
/// keyword recognition, and line tracking for diagnostics.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    diagnostics: DiagnosticBag,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::new(source, file),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and diagnostics.
    ///
    /// The token stream always ends with exactly one `Eof` token. A
    /// malformed character never aborts the scan; each one is reported
    /// and skipped, so the stream is the best effort over the whole input.
    pub fn tokenize(mut self) -> (Vec<Token>, DiagnosticBag) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    /// Scan the next token.
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            if self.cursor.is_eof() {
                let pos = self.cursor.position();
                return Token::eof(self.cursor.span_from(pos));
            }

            let start = self.cursor.position();
            let ch = self.cursor.advance().unwrap();

            match ch {
                // === Delimiters ===
                '(' => return self.make_token(TokenKind::LeftParen, start),
                ')' => return self.make_token(TokenKind::RightParen, start),
                '{' => return self.make_token(TokenKind::LeftBrace, start),
                '}' => return self.make_token(TokenKind::RightBrace, start),
                ',' => return self.make_token(TokenKind::Comma, start),
                '.' => return self.make_token(TokenKind::Dot, start),
                ';' => return self.make_token(TokenKind::Semicolon, start),

                // === Operators (longest match wins) ===
                '-' => return self.make_token(TokenKind::Minus, start),
                '+' => return self.make_token(TokenKind::Plus, start),
                '*' => return self.make_token(TokenKind::Star, start),
                // A `//` comment never reaches here; see skip_whitespace_and_comments.
                '/' => return self.make_token(TokenKind::Slash, start),
                '!' => {
                    return if self.cursor.eat('=') {
                        self.make_token(TokenKind::BangEqual, start)
                    } else {
                        self.make_token(TokenKind::Bang, start)
                    }
                }
                '=' => {
                    return if self.cursor.eat('=') {
                        self.make_token(TokenKind::EqualEqual, start)
                    } else {
                        self.make_token(TokenKind::Equal, start)
                    }
                }
                '<' => {
                    return if self.cursor.eat('=') {
                        self.make_token(TokenKind::LessEqual, start)
                    } else {
                        self.make_token(TokenKind::Less, start)
                    }
                }
                '>' => {
                    return if self.cursor.eat('=') {
                        self.make_token(TokenKind::GreaterEqual, start)
                    } else {
                        self.make_token(TokenKind::Greater, start)
                    }
                }

                // === String literals ===
                '"' => match self.scan_string(start) {
                    Some(token) => return token,
                    // Unterminated: no token for this attempt, resume at EOF.
                    None => continue,
                },

                // === Number literals ===
                c if c.is_ascii_digit() => return self.scan_number(start),

                // === Identifiers and keywords ===
                c if is_ident_start(c) => return self.scan_identifier(start),

                _ => {
                    let span = self.cursor.span_from(start);
                    self.diagnostics
                        .error(format!("unexpected character '{}'", ch), span);
                    // Recover by skipping the character.
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Whitespace & comments
    // ---------------------------------------------------------------

    /// Skip whitespace and `//` line comments.
    ///
    /// A comment runs to the end of the line or the end of input,
    /// whichever comes first; the terminating newline is left for the
    /// whitespace pass so line accounting stays inside the cursor.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor
                .eat_while(|c| matches!(c, ' ' | '\r' | '\t' | '\n'));

            if self.cursor.peek() == Some('/') && self.cursor.peek_second() == Some('/') {
                self.cursor.advance(); // first /
                self.cursor.advance(); // second /
                self.cursor.eat_while(|c| c != '\n');
                continue;
            }

            break;
        }
    }

    // ---------------------------------------------------------------
    // String scanning
    // ---------------------------------------------------------------

    /// Scan a string literal after the opening `"` was consumed.
    ///
    /// There is no escape processing; the literal value is the text
    /// strictly between the quotes. Embedded newlines are permitted and
    /// counted. Returns `None` for an unterminated string, which is
    /// reported at the opening quote and yields no token.
    fn scan_string(&mut self, start: Position) -> Option<Token> {
        loop {
            match self.cursor.advance() {
                Some('"') => {
                    let close = self.cursor.position();
                    let value = self.cursor.slice(start.offset + 1, close.offset - 1);
                    let lexeme = self.cursor.slice_from(start.offset);
                    return Some(Token::string(lexeme, value, self.cursor.span_from(start)));
                }
                Some(_) => {}
                None => {
                    self.diagnostics
                        .error("unterminated string literal", self.cursor.span_from(start));
                    return None;
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Number scanning
    // ---------------------------------------------------------------

    /// Scan a number literal: a digit run with an optional fractional part.
    ///
    /// The dot is consumed only when a digit follows it, so `1.` lexes as
    /// a number followed by a dot token.
    fn scan_number(&mut self, start: Position) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self
                .cursor
                .peek_second()
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let lexeme = self.cursor.slice_from(start.offset);
        // Digit runs with an optional fraction always parse as f64.
        let value: f64 = lexeme.parse().unwrap_or_default();
        Token::number(lexeme, value, self.cursor.span_from(start))
    }

    // ---------------------------------------------------------------
    // Identifier / keyword scanning
    // ---------------------------------------------------------------

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Position) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let lexeme = self.cursor.slice_from(start.offset);
        let kind = TokenKind::keyword_from_str(lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, self.cursor.span_from(start))
    }

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    /// Create a token using the slice from `start` to the current position.
    fn make_token(&self, kind: TokenKind, start: Position) -> Token {
        let lexeme = self.cursor.slice_from(start.offset);
        Token::new(kind, lexeme, self.cursor.span_from(start))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Error for callers that treat any lexical error as fatal.
#[derive(Debug, thiserror::Error)]
#[error("source contains {} lexical error(s)", .diagnostics.len())]
pub struct LexError {
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize `source`, failing if any lexical error was reported.
///
/// The relaxed entry point is [`Lexer::tokenize`], which always returns
/// the best-effort token stream together with the collected diagnostics.
pub fn lex(source: &str, file: impl Into<String>) -> Result<Vec<Token>, LexError> {
    let (tokens, diagnostics) = Lexer::new(source, file).tokenize();
    if diagnostics.has_errors() {
        Err(LexError {
            diagnostics: diagnostics.into_diagnostics(),
        })
    } else {
        Ok(tokens)
    }
}
