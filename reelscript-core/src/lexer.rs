//! Line lexer for animation files.
//!
//! Animation files are line oriented: every command lives on its own line and
//! its arguments are separated by whitespace. The lexer keeps the original
//! spelling of every token; case folding is left to the parser because `print`
//! text and button labels keep their case.

/// Source location of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// 1-based line number.
    pub line: usize,
}

impl Span {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// One physical line, split into tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub span: Span,
    pub raw: &'a str,
    pub tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn token(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx).copied()
    }

    /// Token `idx` folded to lowercase.
    pub fn lower(&self, idx: usize) -> Option<String> {
        self.token(idx).map(str::to_lowercase)
    }

    /// The lowercased first token, if any.
    pub fn command(&self) -> Option<String> {
        self.lower(0)
    }

    /// Every token from `idx` on.
    pub fn rest(&self, idx: usize) -> &[&'a str] {
        self.tokens.get(idx..).unwrap_or(&[])
    }
}

pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src: src.strip_prefix('\u{feff}').unwrap_or(src) }
    }

    pub fn run(&mut self) -> Vec<Line<'a>> {
        self.src
            .lines()
            .enumerate()
            .map(|(idx, raw)| Line {
                span: Span::new(idx + 1),
                raw,
                tokens: raw.split_whitespace().collect(),
            })
            .collect()
    }
}
