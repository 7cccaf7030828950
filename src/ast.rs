//! Kannada Abstract Syntax Tree
//!
//! A program is a flat list of statements. Loops nest their bodies directly;
//! there is no separate scope node. Expressions are never parsed, they are
//! kept as the space-joined token text and copied verbatim into the output.

use serde::Serialize;
use crate::span::Span;

/// A complete Kannada program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `poorna x ;` / `poorna x = 5 ;` / `samuha arr [ 5 ] ;`
    VariableDeclaration(VariableDeclaration),

    /// `x = x + 1 ;`
    Assignment(Assignment),

    /// `helu x ;`
    Print(Print),

    /// `ella i = 0 ; i <= 9 ... hagiddare`
    Loop(Loop),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub ty: TypeTag,
    pub name: String,
    pub value: Option<String>,
    pub size: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub name: String,
    pub expression: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Print {
    pub name: String,
    /// Type of `name` where the print appears; `poorna` when undeclared
    pub ty: TypeTag,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loop {
    pub var: String,
    pub start: String,
    pub end: String,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// === TYPES ===

/// Declared type keyword of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TypeTag {
    /// `poorna` - whole number
    #[default]
    Poorna,
    /// `taran` - floating point
    Taran,
    /// `akshara` - single character
    Akshara,
    /// `sutra` - text
    Sutra,
    /// `samuha` - integer collection
    Samuha,
}

impl TypeTag {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeTag::Poorna => "poorna",
            TypeTag::Taran => "taran",
            TypeTag::Akshara => "akshara",
            TypeTag::Sutra => "sutra",
            TypeTag::Samuha => "samuha",
        }
    }

    /// Scalar C type used for declarations.
    pub fn c_type(&self) -> &'static str {
        match self {
            TypeTag::Poorna | TypeTag::Samuha => "int",
            TypeTag::Taran => "float",
            TypeTag::Akshara | TypeTag::Sutra => "char",
        }
    }

    /// `printf` conversion used by `helu`.
    pub fn format_specifier(&self) -> &'static str {
        match self {
            TypeTag::Poorna | TypeTag::Samuha => "%d",
            TypeTag::Taran => "%f",
            TypeTag::Akshara => "%c",
            TypeTag::Sutra => "%s",
        }
    }
}
