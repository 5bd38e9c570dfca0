use std::collections::HashMap;
use std::sync::OnceLock;

use super::TokenKind;

const RESERVED: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("class", TokenKind::Class),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("for", TokenKind::For),
    ("fn", TokenKind::Fun),
    ("fun", TokenKind::Fun),
    ("func", TokenKind::Fun),
    ("function", TokenKind::Fun),
    ("if", TokenKind::If),
    ("nil", TokenKind::Nil),
    ("or", TokenKind::Or),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("true", TokenKind::True),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
];

/// Reserved-word table. Read-only once built.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: HashMap<&'static str, TokenKind>,
}

impl Keywords {
    pub fn new() -> Self {
        Self {
            table: RESERVED.iter().copied().collect(),
        }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static Self {
        static KEYWORDS: OnceLock<Keywords> = OnceLock::new();
        KEYWORDS.get_or_init(Self::new)
    }

    pub fn lookup(&self, text: &str) -> Option<TokenKind> {
        self.table.get(text).copied()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}
