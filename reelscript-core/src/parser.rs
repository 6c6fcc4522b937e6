use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::ast::{
    ButtonDecl, Comparison, Condition, CounterOp, Direction, Header, Program, RemoveTarget, Scope,
    SizeMode, Stmt, SyntaxError, SyntaxReason,
};
use crate::lexer::{Lexer, Line};

static NATURAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*\.?\d+)([a-z]*)$").unwrap());

/// Why a first line is not an animation header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("file is empty")]
    Empty,
    #[error("expected `ANIMATION`, found `{0}`")]
    NotAnimation(String),
    #[error("header takes 2 or 3 tokens, found {0}")]
    ArgumentCount(usize),
    #[error("scene id `{0}` is not a natural number")]
    InvalidSceneId(String),
}

/// Checks a first line against `ANIMATION <natural> [<background>]`.
pub fn parse_header(line: &str) -> Result<Header, HeaderError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Err(HeaderError::NotAnimation(String::new()));
    };
    if !first.eq_ignore_ascii_case("animation") {
        return Err(HeaderError::NotAnimation(first.to_string()));
    }
    if !(2..=3).contains(&tokens.len()) {
        return Err(HeaderError::ArgumentCount(tokens.len()));
    }
    let scene_id = natural(tokens[1]).ok_or_else(|| HeaderError::InvalidSceneId(tokens[1].into()))?;
    Ok(Header {
        scene_id,
        background: tokens.get(2).map(|bg| bg.to_lowercase()),
    })
}

/// Lexes and parses a whole animation file.
pub fn parse_program(src: &str) -> Result<Program, HeaderError> {
    let lines = Lexer::new(src).run();
    Parser::new(&lines).parse()
}

/// Evaluates a duration token to milliseconds.
///
/// `2s`, `2sec`, `2second` and `2seconds` are seconds; a bare number or any
/// other unit is milliseconds. A unit may also follow as its own token
/// (`2.5 seconds`), which is what `unit` carries.
pub fn parse_duration(token: &str, unit: Option<&str>) -> Option<Duration> {
    let lowered = token.to_lowercase();
    let caps = DURATION.captures(&lowered)?;
    let value: f64 = caps[1].parse().ok()?;
    let attached = &caps[2];
    let seconds = if attached.is_empty() {
        unit.is_some_and(|u| is_seconds(&u.to_lowercase()))
    } else {
        is_seconds(attached)
    };
    let millis = if seconds { value * 1000.0 } else { value };
    Some(Duration::from_millis(millis as u64))
}

fn is_seconds(unit: &str) -> bool {
    matches!(unit, "s" | "sec" | "second" | "seconds")
}

fn natural(token: &str) -> Option<u32> {
    if NATURAL.is_match(token) { token.parse().ok() } else { None }
}

fn number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Maps a `set opacity` percentage onto a cover alpha. Halves round up, so
/// 50 lands on 128.
pub fn opacity_from_percent(percent: i64) -> u8 {
    let percent = percent.clamp(0, 100);
    ((percent * 255 + 50) / 100) as u8
}

/// `id <n>` declares label `n`.
fn label_of(line: &Line) -> Option<u32> {
    if line.command().as_deref() != Some("id") {
        return None;
    }
    line.token(1).and_then(natural)
}

/// First tokens that start a command line, labels included.
const COMMANDS: &[&str] = &[
    "add", "remove", "move", "set", "print", "clear-text", "wait", "goto", "*", "return",
    "transition", "increment", "decrement", "reset", "id",
];

/// A button declaration needs a label and a natural target. A label that is
/// a command word starts the code after the block instead. Target 0 is
/// reserved for "nothing clicked", so it does not count.
fn button_of(line: &Line) -> Option<ButtonDecl> {
    let label = line.token(0)?;
    if line.command().is_some_and(|c| COMMANDS.contains(&c.as_str())) {
        return None;
    }
    let target = line.token(1).and_then(natural)?;
    if target == 0 {
        log::warn!("line {}: button target 0 is reserved, ending button block", line.span.line);
        return None;
    }
    Some(ButtonDecl { label: label.replace('_', " "), target })
}

fn fail(command: &'static str, reason: SyntaxReason) -> SyntaxError {
    SyntaxError { command, reason }
}

pub struct Parser<'a> {
    lines: &'a [Line<'a>],
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lines: &'a [Line<'a>]) -> Self {
        Self { lines, cursor: 0 }
    }

    fn bump(&mut self) -> Option<&'a Line<'a>> {
        let line = self.lines.get(self.cursor)?;
        self.cursor += 1;
        Some(line)
    }

    pub fn parse(mut self) -> Result<Program, HeaderError> {
        let header = match self.bump() {
            Some(line) => parse_header(line.raw)?,
            None => return Err(HeaderError::Empty),
        };

        let mut labels = FxHashMap::default();
        for line in &self.lines[1..] {
            if let Some(id) = label_of(line) {
                labels.entry(id).or_insert(line.span.line);
            }
        }

        let mut body = Vec::new();
        while let Some(line) = self.bump() {
            if let Some(stmt) = self.stmt(line) {
                body.push(stmt);
            }
        }
        log::trace!("parsed {} statements, {} labels", body.len(), labels.len());
        Ok(Program { header, body, labels })
    }

    fn stmt(&mut self, line: &'a Line<'a>) -> Option<Stmt> {
        let span = line.span;
        let command = line.command()?;
        let parsed = match command.as_str() {
            "add" => Self::add(line),
            "remove" => Self::remove(line),
            "move" => Self::move_to(line),
            "set" => Self::set(line),
            "print" => Ok(Self::print(line)),
            "clear-text" => Ok(Stmt::ClearText { span }),
            "wait" => Self::wait(line),
            "goto" => Self::goto(line),
            "*" => Ok(self.buttons(line)),
            "return" => Self::ret(line),
            "transition" => Self::transition(line),
            "increment" => Ok(Stmt::Counter { span, op: CounterOp::Increment }),
            "decrement" => Ok(Stmt::Counter { span, op: CounterOp::Decrement }),
            "reset" => Ok(Stmt::Counter { span, op: CounterOp::Reset }),
            "id" => return label_of(line).map(|id| Stmt::Label { span, id }),
            _ => {
                log::trace!("line {}: ignoring `{}`", span.line, line.raw);
                return None;
            }
        };
        Some(parsed.unwrap_or_else(|error| Stmt::Error { span, error }))
    }

    fn add(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Add";
        if line.len() < 4 {
            return Err(fail(CMD, SyntaxReason::ArgumentCount));
        }
        let scope = Scope::from_token(line.tokens[1]).ok_or(fail(CMD, SyntaxReason::InvalidScope))?;
        Ok(Stmt::Add {
            span: line.span,
            scope,
            name: line.tokens[2].to_lowercase(),
            id: line.tokens[3].to_lowercase(),
            x: line.token(4).and_then(number).unwrap_or(0.0),
            y: line.token(5).and_then(number).unwrap_or(0.0),
            size: line.token(6).and_then(number).unwrap_or(1.0),
            mode: SizeMode::from_token(line.token(7)),
        })
    }

    fn remove(line: &Line) -> Result<Stmt, SyntaxError> {
        let target = line.lower(1).ok_or(fail("Remove", SyntaxReason::ArgumentCount))?;
        let target = if target == "all" { RemoveTarget::All } else { RemoveTarget::Id(target) };
        Ok(Stmt::Remove { span: line.span, target })
    }

    fn move_to(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Move";
        if line.len() < 5 {
            return Err(fail(CMD, SyntaxReason::ArgumentCount));
        }
        let arg = |idx: usize| number(line.tokens[idx]).ok_or(fail(CMD, SyntaxReason::ArgumentFormat));
        Ok(Stmt::Move {
            span: line.span,
            id: line.tokens[1].to_lowercase(),
            x: arg(2)?,
            y: arg(3)?,
            speed: arg(4)?,
        })
    }

    fn set(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Set";
        let count = || fail(CMD, SyntaxReason::ArgumentCount);
        let format = || fail(CMD, SyntaxReason::ArgumentFormat);
        let span = line.span;
        let request = line.lower(1).ok_or_else(count)?;
        match request.as_str() {
            "character" => Ok(Stmt::SetCharacter {
                span,
                id: line.lower(2).ok_or_else(count)?,
                state: line.lower(3).ok_or_else(count)?,
            }),
            "background" => Ok(Stmt::SetBackground { span, name: line.lower(2).ok_or_else(count)? }),
            "opacity" => {
                let level = line.lower(2).ok_or_else(count)?;
                let alpha = match level.as_str() {
                    "none" => 0,
                    "full" => 255,
                    other => opacity_from_percent(other.parse().map_err(|_| format())?),
                };
                Ok(Stmt::SetOpacity { span, alpha })
            }
            "size" => {
                let id = line.lower(2).ok_or_else(count)?;
                let size = line.token(3).ok_or_else(count)?;
                Ok(Stmt::SetSize {
                    span,
                    id,
                    size: number(size).ok_or_else(format)?,
                    mode: SizeMode::from_token(line.token(4)),
                })
            }
            _ => Err(fail(CMD, SyntaxReason::InvalidSubcommand)),
        }
    }

    fn print(line: &Line) -> Stmt {
        let text: String = line.rest(1).iter().map(|t| format!("{t} ")).collect();
        Stmt::Print { span: line.span, text }
    }

    fn wait(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Wait";
        let token = line.token(1).ok_or(fail(CMD, SyntaxReason::ArgumentCount))?;
        let duration =
            parse_duration(token, line.token(2)).ok_or(fail(CMD, SyntaxReason::ArgumentFormat))?;
        Ok(Stmt::Wait { span: line.span, duration })
    }

    fn goto(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Goto";
        let label = line.token(1).ok_or(fail(CMD, SyntaxReason::ArgumentCount))?;
        let label: i64 = label.parse().map_err(|_| fail(CMD, SyntaxReason::ArgumentFormat))?;
        let condition = if line.lower(2).as_deref() == Some("if") {
            let (Some(op), Some(value)) = (line.token(4), line.token(5)) else {
                return Err(fail(CMD, SyntaxReason::ArgumentCount));
            };
            let value = value.parse().map_err(|_| fail(CMD, SyntaxReason::ArgumentFormat))?;
            let op = Comparison::from_token(op).ok_or(fail(CMD, SyntaxReason::InvalidComparison))?;
            Some(Condition { op, value })
        } else {
            None
        };
        Ok(Stmt::Goto { span: line.span, label, condition })
    }

    /// Collects the declarations following a `*` line, up to the first line
    /// that is not one (blank lines included). The lines are left in place:
    /// a declaration is no command, so it yields no statement of its own,
    /// and every line after it stays reachable by a jump.
    fn buttons(&self, line: &Line) -> Stmt {
        let buttons = self.lines[self.cursor..].iter().map_while(button_of).collect();
        Stmt::Buttons { span: line.span, buttons }
    }

    fn ret(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Return";
        let scene = line.token(1).ok_or(fail(CMD, SyntaxReason::ArgumentCount))?;
        let scene = scene.parse().map_err(|_| fail(CMD, SyntaxReason::ArgumentFormat))?;
        Ok(Stmt::Return { span: line.span, scene })
    }

    fn transition(line: &Line) -> Result<Stmt, SyntaxError> {
        const CMD: &str = "Transition";
        if line.len() < 3 {
            return Err(fail(CMD, SyntaxReason::ArgumentCount));
        }
        let duration = parse_duration(line.tokens[2], line.token(3))
            .ok_or(fail(CMD, SyntaxReason::ArgumentFormat))?;
        let direction = match line.tokens[1].to_lowercase().as_str() {
            "in" => Direction::In,
            "out" => Direction::Out,
            _ => return Err(fail(CMD, SyntaxReason::InvalidTransition)),
        };
        Ok(Stmt::Transition { span: line.span, direction, duration })
    }
}
