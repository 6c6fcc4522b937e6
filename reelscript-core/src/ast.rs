//! Statement tree for animation files.
//!
//! All statements carry the [`Span`] of the line they were parsed from. Jumps
//! resolve labels through [`Program::resume_index`], which reproduces a scan
//! from the top of the file: the first `id <n>` line wins and execution picks
//! up at the first statement after it.

use std::fmt;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::lexer::Span;

/// First line of every animation file: `ANIMATION <id> [<background>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub scene_id: u32,
    /// Lowercased background name, if the header names one.
    pub background: Option<String>,
}

/// A parsed animation file.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub header: Header,
    pub body: Vec<Stmt>,
    /// Label id to the line it is declared on.
    pub labels: FxHashMap<u32, usize>,
}

impl Program {
    /// Index into `body` where execution resumes after jumping to `label`.
    pub fn resume_index(&self, label: i64) -> Option<usize> {
        let label = u32::try_from(label).ok()?;
        let line = *self.labels.get(&label)?;
        Some(self.body.partition_point(|stmt| stmt.span().line <= line))
    }
}

/// A single command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `add <global|local> <name> <id> [x] [y] [size] [relative|absolute]`
    Add {
        span: Span,
        scope: Scope,
        name: String,
        id: String,
        x: f64,
        y: f64,
        size: f64,
        mode: SizeMode,
    },
    /// `remove <all|id>`
    Remove {
        span: Span,
        target: RemoveTarget,
    },
    /// `move <id> <x> <y> <speed>`
    Move {
        span: Span,
        id: String,
        x: f64,
        y: f64,
        speed: f64,
    },
    /// `set character <id> <state>`
    SetCharacter {
        span: Span,
        id: String,
        state: String,
    },
    /// `set background <name>`
    SetBackground {
        span: Span,
        name: String,
    },
    /// `set opacity <0-100|none|full>`, already mapped onto 0..=255.
    SetOpacity {
        span: Span,
        alpha: u8,
    },
    /// `set size <id> <size> [relative|absolute]`
    SetSize {
        span: Span,
        id: String,
        size: f64,
        mode: SizeMode,
    },
    /// `print <text...>`
    Print {
        span: Span,
        text: String,
    },
    ClearText {
        span: Span,
    },
    /// `wait <time>`
    Wait {
        span: Span,
        duration: Duration,
    },
    /// `goto <label> [if counter <op> <n>]`
    Goto {
        span: Span,
        label: i64,
        condition: Option<Condition>,
    },
    /// `*` followed by `<label> <target>` lines.
    Buttons {
        span: Span,
        buttons: Vec<ButtonDecl>,
    },
    /// `return <scene-id>`
    Return {
        span: Span,
        scene: i64,
    },
    /// `transition <in|out> <time>`
    Transition {
        span: Span,
        direction: Direction,
        duration: Duration,
    },
    /// `increment`, `decrement` or `reset`.
    Counter {
        span: Span,
        op: CounterOp,
    },
    /// `id <n>`
    Label {
        span: Span,
        id: u32,
    },
    /// A recognised command whose arguments did not parse.
    Error {
        span: Span,
        error: SyntaxError,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Add { span, .. }
            | Stmt::Remove { span, .. }
            | Stmt::Move { span, .. }
            | Stmt::SetCharacter { span, .. }
            | Stmt::SetBackground { span, .. }
            | Stmt::SetOpacity { span, .. }
            | Stmt::SetSize { span, .. }
            | Stmt::Print { span, .. }
            | Stmt::ClearText { span }
            | Stmt::Wait { span, .. }
            | Stmt::Goto { span, .. }
            | Stmt::Buttons { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Transition { span, .. }
            | Stmt::Counter { span, .. }
            | Stmt::Label { span, .. }
            | Stmt::Error { span, .. } => *span,
        }
    }
}

/// Sprite scope keyword. Parsed and kept as metadata; both behave alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local,
}

impl Scope {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "global" => Some(Scope::Global),
            "local" => Some(Scope::Local),
            _ => None,
        }
    }
}

/// How a size argument combines with the current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    Relative,
    #[default]
    Absolute,
}

impl SizeMode {
    /// `relative` selects [`SizeMode::Relative`]; anything else, or nothing,
    /// is absolute.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if t.eq_ignore_ascii_case("relative") => SizeMode::Relative,
            _ => SizeMode::Absolute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    All,
    Id(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Cover fades from opaque to clear.
    In,
    /// Cover fades from clear to opaque.
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    Increment,
    Decrement,
    Reset,
}

impl CounterOp {
    pub fn apply(self, counter: i64) -> i64 {
        match self {
            CounterOp::Increment => counter.wrapping_add(1),
            CounterOp::Decrement => counter.wrapping_sub(1),
            CounterOp::Reset => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "<" | "is-less-than" => Some(Comparison::Less),
            "<=" | "is-less-than-or-equal-to" => Some(Comparison::LessOrEqual),
            ">" | "is-greater-than" => Some(Comparison::Greater),
            ">=" | "is-greater-than-or-equal-to" => Some(Comparison::GreaterOrEqual),
            _ => None,
        }
    }
}

/// `if counter <op> <value>` tail of a `goto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub op: Comparison,
    pub value: i64,
}

impl Condition {
    pub fn holds(&self, counter: i64) -> bool {
        match self.op {
            Comparison::Less => counter < self.value,
            Comparison::LessOrEqual => counter <= self.value,
            Comparison::Greater => counter > self.value,
            Comparison::GreaterOrEqual => counter >= self.value,
        }
    }
}

/// One `<label> <target>` line of a button block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonDecl {
    /// Display text with `_` rewritten to spaces.
    pub label: String,
    pub target: u32,
}

/// Diagnostic for a malformed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Capitalised command name, e.g. `Add`.
    pub command: &'static str,
    pub reason: SyntaxReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxReason {
    ArgumentCount,
    ArgumentFormat,
    InvalidSubcommand,
    InvalidScope,
    InvalidTransition,
    InvalidComparison,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            SyntaxReason::ArgumentCount => "Invalid argument count.",
            SyntaxReason::ArgumentFormat => "Invalid argument format.",
            SyntaxReason::InvalidSubcommand => "Second token was invalid.",
            SyntaxReason::InvalidScope => "Invalid scope.",
            SyntaxReason::InvalidTransition => "Invalid transition type.",
            SyntaxReason::InvalidComparison => "Invalid comparison operator.",
        };
        write!(f, "{} failed: {}", self.command, reason)
    }
}
