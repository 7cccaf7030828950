//! C Code Generation
//!
//! Emits one C statement per line, indented four spaces per nesting level.
//! The declared-name set decides whether a declaration is a real C
//! declaration or a later update of an existing variable. Loop bodies get a
//! copy of the caller's set, so their declarations stay inside the `for`.
//! Print formats come from the type the parser resolved at each `helu`.

use crate::ast::{Loop, Program, Stmt, TypeTag, VariableDeclaration};
use std::collections::HashSet;

const INDENT: &str = "    ";

/// Generate the body lines of `main` for a parsed program.
pub fn generate(program: &Program) -> Vec<String> {
    let lines = CGenerator.generate_block(&program.statements, 1, &mut HashSet::new());
    log::debug!("generated {} lines of C", lines.len());
    lines
}

/// Wrap generated body lines in the fixed program skeleton.
pub fn wrap_program(lines: &[String]) -> String {
    let mut source = String::from("#include <stdio.h>\nint main() {\n");
    for line in lines {
        source.push_str(line);
        source.push('\n');
    }
    source.push_str(INDENT);
    source.push_str("return 0;\n}\n");
    source
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CGenerator;

impl CGenerator {
    pub fn generate_block(&self, stmts: &[Stmt], level: usize, declared: &mut HashSet<String>) -> Vec<String> {
        let mut lines = Vec::new();
        let indent = INDENT.repeat(level);

        for stmt in stmts {
            match stmt {
                Stmt::VariableDeclaration(decl) => {
                    if let Some(line) = self.emit_declaration(decl, declared) {
                        lines.push(format!("{}{}", indent, line));
                    }
                }
                Stmt::Assignment(assign) => {
                    lines.push(format!("{}{} = {};", indent, assign.name, assign.expression));
                }
                Stmt::Print(print) => {
                    let fmt = print.ty.format_specifier();
                    lines.push(format!("{}printf(\"{}\\n\", {});", indent, fmt, print.name));
                }
                Stmt::Loop(l) => self.emit_loop(l, level, &indent, declared, &mut lines),
            }
        }

        lines
    }

    fn emit_declaration(&self, decl: &VariableDeclaration, declared: &mut HashSet<String>) -> Option<String> {
        // A repeated declaration is an update of the existing variable
        if declared.contains(&decl.name) {
            return decl.value.as_ref().map(|value| format!("{} = {};", decl.name, value));
        }
        declared.insert(decl.name.clone());

        let c_type = decl.ty.c_type();
        let line = match (&decl.size, &decl.value) {
            (Some(size), _) => format!("{} {}[{}];", c_type, decl.name, size),
            (None, Some(value)) if decl.ty == TypeTag::Sutra => format!("{} {}[] = {};", c_type, decl.name, value),
            (None, Some(value)) => format!("{} {} = {};", c_type, decl.name, value),
            (None, None) => format!("{} {};", c_type, decl.name),
        };
        Some(line)
    }

    fn emit_loop(&self, l: &Loop, level: usize, indent: &str, declared: &HashSet<String>, lines: &mut Vec<String>) {
        lines.push(format!(
            "{}for (int {var} = {}; {var} <= {}; {var}++) {{",
            indent,
            l.start,
            l.end,
            var = l.var
        ));
        let mut inner = declared.clone();
        inner.insert(l.var.clone());
        lines.extend(self.generate_block(&l.body, level + 1, &mut inner));
        lines.push(format!("{}}}", indent));
    }
}
