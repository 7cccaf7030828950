//! Three-address code
//!
//! A linear, human-readable IR: one copy, branch, jump or label per line.
//! Labels come from a single counter owned by the generator, so every loop
//! gets its own `Ln` / `ENDLn` pair no matter how deeply it is nested.

use crate::ast::{Loop, Program, Stmt};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Instr {
    /// `dst = src`
    Copy { dst: String, src: String },
    /// `dst = ?`
    Uninit { dst: String },
    /// `print name`
    Print { name: String },
    /// `L1: if i > 9 goto ENDL1`
    LoopTest { label: String, var: String, bound: String, exit: String },
    /// `i = i + 1`
    Increment { var: String },
    /// `goto L1`
    Goto { label: String },
    /// `ENDL1:`
    Label { name: String },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Copy { dst, src } => write!(f, "{} = {}", dst, src),
            Instr::Uninit { dst } => write!(f, "{} = ?", dst),
            Instr::Print { name } => write!(f, "print {}", name),
            Instr::LoopTest { label, var, bound, exit } => {
                write!(f, "{}: if {} > {} goto {}", label, var, bound, exit)
            }
            Instr::Increment { var } => write!(f, "{var} = {var} + 1"),
            Instr::Goto { label } => write!(f, "goto {}", label),
            Instr::Label { name } => write!(f, "{}:", name),
        }
    }
}

/// Generate three-address code for a whole program.
pub fn generate(program: &Program) -> Vec<Instr> {
    let mut gen = TacGenerator::new();
    let code = gen.generate_block(&program.statements);
    log::debug!("generated {} TAC instructions, {} loop labels", code.len(), gen.labels_used());
    code
}

/// Render instructions as text lines.
pub fn render(code: &[Instr]) -> Vec<String> {
    code.iter().map(|instr| instr.to_string()).collect()
}

#[derive(Debug)]
pub struct TacGenerator {
    next_label: usize,
}

impl Default for TacGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TacGenerator {
    pub fn new() -> Self {
        Self { next_label: 1 }
    }

    pub fn labels_used(&self) -> usize {
        self.next_label - 1
    }

    pub fn generate_block(&mut self, stmts: &[Stmt]) -> Vec<Instr> {
        let mut code = Vec::new();
        for stmt in stmts {
            match stmt {
                Stmt::VariableDeclaration(decl) => match &decl.value {
                    Some(value) => code.push(Instr::Copy { dst: decl.name.clone(), src: value.clone() }),
                    None => code.push(Instr::Uninit { dst: decl.name.clone() }),
                },
                Stmt::Assignment(assign) => {
                    code.push(Instr::Copy { dst: assign.name.clone(), src: assign.expression.clone() })
                }
                Stmt::Print(print) => code.push(Instr::Print { name: print.name.clone() }),
                Stmt::Loop(l) => self.generate_loop(l, &mut code),
            }
        }
        code
    }

    fn generate_loop(&mut self, l: &Loop, code: &mut Vec<Instr>) {
        let label = self.fresh_label();
        let exit = format!("END{}", label);

        code.push(Instr::Copy { dst: l.var.clone(), src: l.start.clone() });
        code.push(Instr::LoopTest {
            label: label.clone(),
            var: l.var.clone(),
            bound: l.end.clone(),
            exit: exit.clone(),
        });
        let body = self.generate_block(&l.body);
        code.extend(body);
        code.push(Instr::Increment { var: l.var.clone() });
        code.push(Instr::Goto { label });
        code.push(Instr::Label { name: exit });
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("L{}", self.next_label);
        self.next_label += 1;
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn tac_lines(source: &str) -> Vec<String> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let (program, _) = parse(&tokens).unwrap();
        render(&generate(&program))
    }

    #[test]
    fn test_straight_line_code() {
        assert_eq!(
            tac_lines("poorna x = 5 ; samuha arr [ 4 ] ; x = x * 2 ; helu x ;"),
            vec!["x = 5", "arr = ?", "x = x * 2", "print x"]
        );
    }

    #[test]
    fn test_loop_shape() {
        assert_eq!(
            tac_lines("ella i = 0 ; i <= 2 helu i ; hagiddare"),
            vec!["i = 0", "L1: if i > 2 goto ENDL1", "print i", "i = i + 1", "goto L1", "ENDL1:"]
        );
    }

    #[test]
    fn test_nested_loop_labels_are_unique() {
        assert_eq!(
            tac_lines("ella i = 1 ; i <= 2 ella j = 1 ; j <= 3 helu j ; hagiddare hagiddare ella k = 0 ; k <= 1 hagiddare"),
            vec![
                "i = 1",
                "L1: if i > 2 goto ENDL1",
                "j = 1",
                "L2: if j > 3 goto ENDL2",
                "print j",
                "j = j + 1",
                "goto L2",
                "ENDL2:",
                "i = i + 1",
                "goto L1",
                "ENDL1:",
                "k = 0",
                "L3: if k > 1 goto ENDL3",
                "k = k + 1",
                "goto L3",
                "ENDL3:",
            ]
        );
    }

    #[test]
    fn test_fresh_generator_restarts_labels() {
        let mut gen = TacGenerator::new();
        assert_eq!(gen.fresh_label(), "L1");
        assert_eq!(gen.fresh_label(), "L2");
        assert_eq!(gen.labels_used(), 2);
        assert_eq!(TacGenerator::default().fresh_label(), "L1");
    }
}
