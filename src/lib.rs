//! # Kannada - a keyword-substituted teaching language
//!
//! Programs use Kannada keywords for types (`poorna`, `taran`, `akshara`,
//! `sutra`, `samuha`), counting loops (`ella` ... `hagiddare`) and printing
//! (`helu`). The compiler translates them to C for a native toolchain and,
//! alongside, to a three-address intermediate form for inspection.
//!
//! ## Example
//! ```text
//! poorna sum = 0 ;
//! ella i = 1 ; i <= 10
//!     poorna sum = sum + i ;
//! hagiddare
//! helu sum ;
//! ```

pub mod lexer;
pub mod ast;
pub mod parser;
pub mod symbols;
pub mod codegen;
pub mod toolchain;
pub mod config;
pub mod error;
pub mod span;
pub mod diagnostics;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use ast::*;
pub use symbols::SymbolTable;
pub use codegen::tac::Instr;
pub use config::Config;
pub use toolchain::Toolchain;
pub use error::{KannadaError, KannadaResult};
pub use span::Span;

/// Every artifact produced by one pass over a source file
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub symbols: SymbolTable,
    pub c_lines: Vec<String>,
    pub tac: Vec<Instr>,
}

impl Compilation {
    /// Full C translation unit, ready for the toolchain.
    pub fn c_source(&self) -> String {
        codegen::c::wrap_program(&self.c_lines)
    }

    pub fn tac_lines(&self) -> Vec<String> {
        codegen::tac::render(&self.tac)
    }
}

/// Compile Kannada source with default settings
pub fn compile(source: &str) -> KannadaResult<Compilation> {
    compile_with(source, &Config::default())
}

pub fn compile_with(source: &str, config: &Config) -> KannadaResult<Compilation> {
    // 1. Lex
    let tokens = Lexer::new(source).strict(config.lexer.strict).tokenize()?;

    // 2. Parse
    let (program, symbols) = parser::parse(&tokens)?;

    // 3. Generate code; the two backends are independent passes
    let c_lines = codegen::generate_c(&program);
    let tac = codegen::generate_tac(&program);

    Ok(Compilation { tokens, program, symbols, c_lines, tac })
}

/// Compile, build with the native toolchain, run, and return the program's output
pub fn run(source: &str, toolchain: &Toolchain) -> KannadaResult<String> {
    let compilation = compile(source)?;
    toolchain.compile_and_run(&compilation.c_source())
}

/// Like [`run`], honouring every setting in `config` (lexer mode and toolchain).
pub fn run_with(source: &str, config: &Config) -> KannadaResult<String> {
    let compilation = compile_with(source, config)?;
    config.toolchain.compile_and_run(&compilation.c_source())
}

/// Version of the Kannada compiler
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LANGUAGE_NAME: &str = "Kannada";
