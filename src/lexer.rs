//! Kannada Lexer - keyword-substituted imperative tokens
//!
//! Key features:
//! - Kannada type keywords (`poorna`, `taran`, `akshara`, `sutra`, `samuha`)
//! - Counting loops (`ella` ... `hagiddare`) and `helu` for printing
//! - Maximal munch: the longest match wins, keywords beat identifiers on ties,
//!   so `poornank` is an identifier and `<=` never splits into `<` `=`
//! - Whitespace is skipped, never surfaced as a token

use logos::Logos;
use serde::Serialize;
use std::fmt;
use crate::ast::TypeTag;
use crate::span::Span;
use crate::error::{KannadaError, KannadaResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // === Keywords ===
    #[token("poorna", |_| TypeTag::Poorna)]
    #[token("taran", |_| TypeTag::Taran)]
    #[token("akshara", |_| TypeTag::Akshara)]
    #[token("sutra", |_| TypeTag::Sutra)]
    #[token("samuha", |_| TypeTag::Samuha)]
    Type(TypeTag),
    #[token("ella")]
    Loop,
    #[token("hagiddare")]
    EndLoop,
    #[token("helu")]
    Print,

    // === Literals ===
    #[regex(r#""[^"]*""#)]
    String,
    #[regex(r"'[a-zA-Z0-9]'")]
    Char,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Number,

    // === Identifiers ===
    // ASCII start, any Unicode word character after (`sumಮೊತ್ತ`)
    #[regex(r"[a-zA-Z_]\w*")]
    Ident,

    // === Operators ===
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,

    // === Punctuation ===
    #[token(";")]
    Semi,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl TokenKind {
    /// True for tokens that can only start a statement.
    pub fn starts_statement(&self) -> bool {
        matches!(self, TokenKind::Type(_) | TokenKind::Loop | TokenKind::Print)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Type(tag) => return write!(f, "type keyword `{}`", tag.keyword()),
            TokenKind::Loop => "`ella`",
            TokenKind::EndLoop => "`hagiddare`",
            TokenKind::Print => "`helu`",
            TokenKind::String => "string literal",
            TokenKind::Char => "character literal",
            TokenKind::Float => "float literal",
            TokenKind::Number => "number literal",
            TokenKind::Ident => "identifier",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::EqEq => "`==`",
            TokenKind::Semi => "`;`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    strict: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, strict: false }
    }

    /// Reject characters that match no token instead of dropping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn tokenize(&self) -> KannadaResult<Vec<Token>> {
        let mut lex = TokenKind::lexer(self.source);
        let mut tokens = Vec::new();

        while let Some(result) = lex.next() {
            let span = Span::new(lex.span().start, lex.span().end);
            match result {
                Ok(kind) => tokens.push(Token::new(kind, lex.slice(), span)),
                Err(_) if self.strict => {
                    return Err(KannadaError::lexer(
                        format!("Unexpected character: '{}'", lex.slice()),
                        span,
                    ));
                }
                Err(_) => {
                    log::warn!("dropping unrecognised input {:?} at {}..{}", lex.slice(), span.start, span.end);
                }
            }
        }

        log::debug!("tokenized {} bytes into {} tokens", self.source.len(), tokens.len());
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_initialized_declaration() {
        assert_eq!(
            kinds("poorna x = 5 ;"),
            vec![
                TokenKind::Type(TypeTag::Poorna),
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn test_float_is_not_split() {
        let tokens = Lexer::new("taran pi = 3.14;").tokenize().unwrap();
        assert_eq!(tokens[3].kind, TokenKind::Float);
        assert_eq!(tokens[3].lexeme, "3.14");
        assert_eq!(tokens[3].span, Span::new(11, 15));
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("a <= b >= c == d < e > f"),
            vec![
                TokenKind::Ident,
                TokenKind::LtEq,
                TokenKind::Ident,
                TokenKind::GtEq,
                TokenKind::Ident,
                TokenKind::EqEq,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = Lexer::new("poornank ellaa helu").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "poornank");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[2].kind, TokenKind::Print);
    }

    #[test]
    fn test_identifier_continues_with_unicode_word_characters() {
        let tokens = Lexer::new("poorna sumಮೊತ್ತ = 1 ;").tokenize().unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "sumಮೊತ್ತ");
        assert_eq!(tokens[1].span, Span::new(7, 7 + "sumಮೊತ್ತ".len()));
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"sutra s = "namaskara"; akshara c = 'k';"#),
            vec![
                TokenKind::Type(TypeTag::Sutra),
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::String,
                TokenKind::Semi,
                TokenKind::Type(TypeTag::Akshara),
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Char,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(kinds("x @= 1;"), vec![TokenKind::Ident, TokenKind::Assign, TokenKind::Number, TokenKind::Semi]);
    }

    #[test]
    fn test_strict_mode_reports_unknown_characters() {
        let err = Lexer::new("x @= 1;").strict(true).tokenize().unwrap_err();
        match err {
            KannadaError::Lexer { span, .. } => assert_eq!(span, Span::new(2, 3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lexemes_reconstruct_source() {
        let source = "samuha arr[5];\nella i = 0; i <= 4\n  arr[i] = i * 2;\nhagiddare\nhelu i;";
        let tokens = Lexer::new(source).tokenize().unwrap();
        let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        let expected: String = source.split_whitespace().collect();
        assert_eq!(joined, expected);
    }
}
