use std::sync::Arc;

use reelscript_core::ast::Stmt;

/// Read position inside one script body.
#[derive(Debug, Clone)]
pub struct Frame {
    pub stmts: Arc<[Stmt]>,
    pub pc: usize,
}

impl Frame {
    pub fn new(stmts: impl Into<Arc<[Stmt]>>, pc: usize) -> Self {
        Self { stmts: stmts.into(), pc }
    }

    pub fn current(&self) -> Option<&Stmt> {
        self.stmts.get(self.pc)
    }

    pub fn advance(&mut self) {
        self.pc += 1;
    }

    pub fn jump(&mut self, pc: usize) {
        self.pc = pc;
    }
}
