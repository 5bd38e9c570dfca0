use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

use log::{debug, trace};

use super::{Keywords, Literal, Token, TokenKind};
use crate::report::{Reporter, ScanError, ScanErrorKind};
use crate::span::Span;

/// Single-use scanning engine. [`Scanner::scan`] consumes it, so cursor state
/// lives exactly as long as one pass over one source.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    keywords: &'a Keywords,
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
    /// `start..current` of the lexeme being scanned
    cursor: Range<usize>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, keywords: &'a Keywords) -> Self {
        Self {
            source,
            keywords,
            chars: source.char_indices().peekable(),
            tokens: vec![],
            cursor: 0..0,
            line: 1,
        }
    }

    /// Scans the whole source. The result always ends with exactly one `EOF`
    /// token; lexical errors go to `reporter` and the scan carries on.
    pub fn scan<R>(mut self, reporter: &mut R) -> Vec<Token>
    where
        R: Reporter + ?Sized,
    {
        while !self.is_end() {
            self.cursor.start = self.cursor.end;
            self.scan_token(reporter);
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: "".into(),
            literal: Literal::None,
            span: Span::empty(self.source.len(), self.line),
        });

        debug!(
            "scanned {} tokens over {} lines",
            self.tokens.len(),
            self.line
        );

        self.tokens
    }
}

impl<'a> Scanner<'a> {
    const fn is_end(&self) -> bool {
        self.cursor.end >= self.source.len()
    }

    fn span(&self) -> Span {
        Span::new(self.cursor.clone(), self.line)
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.cursor.clone()]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, Literal::None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Literal) {
        let token = Token {
            kind,
            lexeme: self.lexeme().into(),
            literal,
            span: self.span(),
        };
        trace!("{token}");
        self.tokens.push(token);
    }

    fn error<R>(&mut self, reporter: &mut R, kind: ScanErrorKind)
    where
        R: Reporter + ?Sized,
    {
        reporter.report_error(&ScanError {
            kind,
            span: self.span(),
        });
    }

    fn scan_token<R>(&mut self, reporter: &mut R)
    where
        R: Reporter + ?Sized,
    {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => {
                let tk = if self.expect_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(tk)
            }
            '=' => {
                let tk = if self.expect_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(tk)
            }
            '<' => {
                let tk = if self.expect_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(tk)
            }
            '>' => {
                let tk = if self.expect_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(tk)
            }
            '/' => {
                if self.expect_char('/') {
                    // The newline is left for the main loop so it bumps `line`.
                    while self.expect_pred(|c| c != '\n') {}
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => (),
            '\n' => self.line += 1,
            '"' => self.string(reporter),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier_or_keyword(),
            c => self.error(reporter, ScanErrorKind::UnexpectedCharacter(c)),
        }
    }

    fn string<R>(&mut self, reporter: &mut R)
    where
        R: Reporter + ?Sized,
    {
        loop {
            let Some(c) = self.advance() else {
                self.error(reporter, ScanErrorKind::UnterminatedString);
                return;
            };

            match c {
                '"' => break,
                '\n' => self.line += 1,
                _ => (),
            }
        }

        // No escape sequences: the value is the raw text between the quotes.
        let value = &self.source[self.cursor.start + 1..self.cursor.end - 1];
        self.add_literal(TokenKind::String, Literal::String(value.into()));
    }

    fn number(&mut self) {
        while self.expect_pred(|c| c.is_ascii_digit()) {}

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.advance();

            while self.expect_pred(|c| c.is_ascii_digit()) {}
        }

        let x = self
            .lexeme()
            .parse::<f64>()
            .expect("DIGIT+ ( \".\" DIGIT+ )? is a valid f64");
        self.add_literal(TokenKind::Number, Literal::Number(x));
    }

    fn identifier_or_keyword(&mut self) {
        while self.expect_pred(is_alpha_numeric) {}

        let kind = self
            .keywords
            .lookup(self.lexeme())
            .unwrap_or(TokenKind::Identifier);

        self.add_token(kind)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.cursor.end = self
            .chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.source.len());
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// The character after [`Self::peek`].
    fn peek_next(&self) -> Option<char> {
        let mut rest = self.source[self.cursor.end..].chars();
        rest.next()?;
        rest.next()
    }

    fn expect_char(&mut self, expected: char) -> bool {
        self.expect_pred(|c| c == expected)
    }

    fn expect_pred<F>(&mut self, pred: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        if self.peek().is_some_and(pred) {
            let _ = self.advance().is_some();
            true
        } else {
            false
        }
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Diagnostics;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let keywords = Keywords::new();
        let mut diags = Diagnostics::new();
        let tokens = Scanner::new(source, &keywords).scan(&mut diags);
        (tokens, diags)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).0.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_characters() {
        use TokenKind::*;

        for (src, kind) in [
            ("(", LeftParen),
            (")", RightParen),
            ("{", LeftBrace),
            ("}", RightBrace),
            (",", Comma),
            (".", Dot),
            ("-", Minus),
            ("+", Plus),
            (";", Semicolon),
            ("*", Star),
            ("/", Slash),
            ("!", Bang),
            ("=", Equal),
            ("<", Less),
            (">", Greater),
        ] {
            assert_eq!(kinds(src), vec![kind, Eof], "{src}");
        }
    }

    #[test]
    fn two_character_operators() {
        use TokenKind::*;

        assert_eq!(kinds("!="), vec![BangEqual, Eof]);
        assert_eq!(kinds("=="), vec![EqualEqual, Eof]);
        assert_eq!(kinds("<="), vec![LessEqual, Eof]);
        assert_eq!(kinds(">="), vec![GreaterEqual, Eof]);
        assert_eq!(kinds("==="), vec![EqualEqual, Equal, Eof]);
        assert_eq!(kinds("! ="), vec![Bang, Equal, Eof]);

        let (tokens, _) = scan("!a");
        assert_eq!(tokens[0].kind, Bang);
        assert_eq!(tokens[1].kind, Identifier);
        assert_eq!(tokens[1].lexeme, "a");
    }

    #[test]
    fn maximal_munch() {
        use TokenKind::*;

        assert_eq!(kinds("or"), vec![Or, Eof]);

        let (tokens, _) = scan("orchid _x1 nil_");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Identifier, Identifier, Identifier, Eof]
        );
        assert_eq!(tokens[0].lexeme, "orchid");
        assert_eq!(tokens[1].lexeme, "_x1");
        assert_eq!(tokens[2].lexeme, "nil_");
    }

    #[test]
    fn numbers() {
        use TokenKind::*;

        let (tokens, _) = scan("1234");
        assert_eq!(tokens[0].literal, Literal::Number(1234.0));

        let (tokens, _) = scan("12.34");
        assert_eq!(tokens[0].literal, Literal::Number(12.34));
        assert_eq!(tokens[0].lexeme, "12.34");

        let (tokens, _) = scan("1234.");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Number, Dot, Eof]
        );
        assert_eq!(tokens[0].literal, Literal::Number(1234.0));
        assert_eq!(tokens[0].lexeme, "1234");

        assert_eq!(kinds(".5"), vec![Dot, Number, Eof]);
        assert_eq!(kinds("1.a"), vec![Number, Dot, Identifier, Eof]);
        assert_eq!(kinds("1.2.3"), vec![Number, Dot, Number, Eof]);
    }

    #[test]
    fn comments() {
        use TokenKind::*;

        let (tokens, diags) = scan("// anything @ \"\n123");
        assert!(!diags.has_errors());
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Number, Eof]
        );
        assert_eq!(tokens[0].literal, Literal::Number(123.0));
        assert_eq!(tokens[0].line(), 2);

        assert_eq!(kinds("1 // trailing"), vec![Number, Eof]);
        assert_eq!(kinds("6 / 3"), vec![Number, Slash, Number, Eof]);
    }

    #[test]
    fn strings() {
        let (tokens, diags) = scan("\"hello world\"");
        assert!(!diags.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");
        assert_eq!(tokens[0].literal, Literal::String("hello world".into()));

        let (tokens, _) = scan("\"\"");
        assert_eq!(tokens[0].literal, Literal::String("".into()));

        let (tokens, _) = scan(r#""a\nb""#);
        assert_eq!(tokens[0].literal, Literal::String(r"a\nb".into()));
    }

    #[test]
    fn multi_line_string() {
        let (tokens, diags) = scan("\"ab\ncd\"");
        assert!(!diags.has_errors());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].literal, Literal::String("ab\ncd".into()));
        assert_eq!(tokens[0].line(), 2);
        assert_eq!(tokens[1].line(), 2);
    }

    #[test]
    fn unterminated_string() {
        let (tokens, diags) = scan("\"abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.to_string(), "[line 1] Error: Unexpected end of string.");
        assert_eq!(diag.span.as_ref().map(|s| s.range.clone()), Some(0..4));
    }

    #[test]
    fn unexpected_characters_are_dropped() {
        use TokenKind::*;

        let (tokens, diags) = scan("1 @ 2\n#é");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Number, Number, Eof]
        );
        let messages: Vec<_> = diags.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character '@'",
                "[line 2] Error: Unexpected character '#'",
                "[line 2] Error: Unexpected character 'é'",
            ]
        );
        let last = diags.iter().last().unwrap();
        assert_eq!(last.span.as_ref().map(|s| s.range.clone()), Some(7..9));
    }

    #[test]
    fn whitespace_and_lines() {
        let (tokens, _) = scan(" \t\r\n\n  x");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].line(), 3);
        assert_eq!(tokens[0].span.range, 7..8);
        assert_eq!(tokens[1].line(), 3);
        assert_eq!(tokens[1].span, Span::empty(8, 3));
    }

    #[test]
    fn empty_source() {
        let (tokens, diags) = scan("");
        assert!(diags.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "");
        assert_eq!(tokens[0].line(), 1);
    }

    #[test]
    fn uses_the_given_table() {
        let keywords = Keywords::new();
        let mut diags = Diagnostics::new();
        let tokens = Scanner::new("function fn func fun", &keywords).scan(&mut diags);
        assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Fun));
    }
}
