//! Kannada Parser - cursor-based recursive descent over the token list
//!
//! ```text
//! stmt    := decl | print | loop | assign
//! decl    := TYPE IDENT ( '[' NUMBER ']' | '=' expr )? ';'
//! print   := 'helu' IDENT ';'
//! loop    := 'ella' IDENT '=' operand ';' IDENT '<=' operand stmt* 'hagiddare'
//! assign  := IDENT '=' expr ';'
//! ```
//!
//! `expr` is every token up to the terminating `;`, joined by single spaces.

use crate::ast::*;
use crate::error::{KannadaError, KannadaResult};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use crate::symbols::SymbolTable;

/// Parse a token list into a program and the symbol table built alongside it.
pub fn parse(tokens: &[Token]) -> KannadaResult<(Program, SymbolTable)> {
    Parser::new(tokens).parse()
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0, symbols: SymbolTable::new() }
    }

    pub fn parse(mut self) -> KannadaResult<(Program, SymbolTable)> {
        let mut statements = Vec::new();
        while !self.at_end() {
            statements.push(self.parse_stmt()?);
        }
        log::debug!("parsed {} top-level statements, {} symbols", statements.len(), self.symbols.len());
        Ok((Program { statements }, self.symbols))
    }

    fn parse_stmt(&mut self) -> KannadaResult<Stmt> {
        match self.peek_kind() {
            Some(TokenKind::Type(_)) => self.parse_declaration(),
            Some(TokenKind::Print) => self.parse_print(),
            Some(TokenKind::Loop) => self.parse_loop(),
            Some(TokenKind::Ident) => self.parse_assignment(),
            Some(other) => Err(KannadaError::parser(
                format!("Expected statement, got {}", other),
                self.current_span(),
            )),
            None => Err(KannadaError::parser("Expected statement, got end of input", self.current_span())),
        }
    }

    fn parse_declaration(&mut self) -> KannadaResult<Stmt> {
        let start = self.current_span();
        let ty = self.expect_type()?;
        let name = self.expect_ident()?;

        let (value, size) = match self.peek_kind() {
            Some(TokenKind::LBracket) => {
                self.advance();
                let size = self.expect(TokenKind::Number)?.lexeme.clone();
                self.expect(TokenKind::RBracket)?;
                (None, Some(size))
            }
            Some(TokenKind::Assign) => {
                self.advance();
                (Some(self.parse_expression_text()?), None)
            }
            _ => (None, None),
        };
        self.expect(TokenKind::Semi)?;

        self.symbols.declare(name.clone(), ty);
        Ok(Stmt::VariableDeclaration(VariableDeclaration {
            ty,
            name,
            value,
            size,
            span: start.merge(self.previous_span()),
        }))
    }

    fn parse_print(&mut self) -> KannadaResult<Stmt> {
        let start = self.current_span();
        self.expect(TokenKind::Print)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Semi)?;
        let ty = self.symbols.type_of(&name);
        Ok(Stmt::Print(Print { name, ty, span: start.merge(self.previous_span()) }))
    }

    fn parse_loop(&mut self) -> KannadaResult<Stmt> {
        let start = self.current_span();
        self.expect(TokenKind::Loop)?;
        let var = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let from = self.parse_operand()?;
        self.expect(TokenKind::Semi)?;

        let tested = self.expect(TokenKind::Ident)?;
        if tested.lexeme != var {
            return Err(KannadaError::parser(
                format!("Loop condition must test `{}`, found `{}`", var, tested.lexeme),
                tested.span,
            ));
        }
        self.expect(TokenKind::LtEq)?;
        let to = self.parse_operand()?;

        self.symbols.enter_scope();
        self.symbols.bind_loop_var(var.clone());
        let mut body = Vec::new();
        while !self.check(TokenKind::EndLoop) {
            if self.at_end() {
                return Err(KannadaError::parser("Unterminated loop: expected `hagiddare`", start));
            }
            body.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::EndLoop)?;
        self.symbols.exit_scope();

        Ok(Stmt::Loop(Loop {
            var,
            start: from,
            end: to,
            body,
            span: start.merge(self.previous_span()),
        }))
    }

    fn parse_assignment(&mut self) -> KannadaResult<Stmt> {
        let start = self.current_span();
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let expression = self.parse_expression_text()?;
        self.expect(TokenKind::Semi)?;
        Ok(Stmt::Assignment(Assignment { name, expression, span: start.merge(self.previous_span()) }))
    }

    /// Collect the raw text of an expression, stopping before `;`.
    fn parse_expression_text(&mut self) -> KannadaResult<String> {
        let mut parts: Vec<&str> = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Semi {
                break;
            }
            if token.kind.starts_statement() || token.kind == TokenKind::EndLoop {
                return Err(KannadaError::parser(
                    format!("Expected `;` before {}", token.kind),
                    token.span,
                ));
            }
            parts.push(&token.lexeme);
            self.advance();
        }
        if parts.is_empty() {
            return Err(KannadaError::parser("Expected expression", self.current_span()));
        }
        Ok(parts.join(" "))
    }

    fn parse_operand(&mut self) -> KannadaResult<String> {
        match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::Number | TokenKind::Float | TokenKind::Ident) => {
                self.advance();
                Ok(token.lexeme.clone())
            }
            Some(token) => Err(KannadaError::parser(
                format!("Expected loop bound, got {}", token.kind),
                token.span,
            )),
            None => Err(KannadaError::parser("Expected loop bound, got end of input", self.current_span())),
        }
    }

    // === Cursor helpers ===

    fn peek(&self) -> Option<&'a Token> { self.tokens.get(self.pos) }
    fn peek_kind(&self) -> Option<TokenKind> { self.peek().map(|t| t.kind) }
    fn at_end(&self) -> bool { self.pos >= self.tokens.len() }
    fn check(&self, k: TokenKind) -> bool {
        self.peek_kind().map_or(false, |kind| std::mem::discriminant(&kind) == std::mem::discriminant(&k))
    }
    fn advance(&mut self) { if !self.at_end() { self.pos += 1; } }

    fn current_span(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                Span::new(end, end)
            }
        }
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or_else(|| self.current_span(), |t| t.span)
    }

    fn expect(&mut self, k: TokenKind) -> KannadaResult<&'a Token> {
        match self.peek() {
            Some(token) if self.check(k) => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(KannadaError::parser(
                format!("Expected {}, got {}", k, token.kind),
                token.span,
            )),
            None => Err(KannadaError::parser(
                format!("Expected {}, got end of input", k),
                self.current_span(),
            )),
        }
    }

    fn expect_ident(&mut self) -> KannadaResult<String> {
        Ok(self.expect(TokenKind::Ident)?.lexeme.clone())
    }

    fn expect_type(&mut self) -> KannadaResult<TypeTag> {
        let token = self.expect(TokenKind::Type(TypeTag::default()))?;
        match token.kind {
            TokenKind::Type(tag) => Ok(tag),
            _ => Err(KannadaError::parser(format!("Expected type keyword, got {}", token.kind), token.span)),
        }
    }
}
