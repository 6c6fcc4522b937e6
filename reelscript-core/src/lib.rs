pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Header, Program, Stmt};
pub use parser::{HeaderError, parse_duration, parse_header, parse_program};
