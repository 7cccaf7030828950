//  tests/pipeline.rs
//
//  End-to-end checks over the public `compile` / `run` entry points.
//  Execution tests skip themselves when no C compiler is installed.

use kannada::{compile, run, run_with, Config, KannadaError, Stmt, Toolchain, TokenKind, TypeTag};
use pretty_assertions::assert_eq;

const SUM_PROGRAM: &str = "\
poorna sum = 0 ;
ella i = 1 ; i <= 5
    poorna sum = sum + i ;
hagiddare
helu sum ;
";

fn toolchain_or_skip() -> Option<Toolchain> {
    let _ = env_logger::builder().is_test(true).try_init();
    let toolchain = Toolchain::default();
    if toolchain.is_available() {
        Some(toolchain)
    } else {
        eprintln!("{} not found - skipping execution test", toolchain.cc);
        None
    }
}

#[test]
fn declaration_tokenizes_to_five_tokens() {
    let compilation = compile("poorna x = 5 ;").unwrap();
    let kinds: Vec<TokenKind> = compilation.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
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
fn bare_declaration_generates_bare_int() {
    let compilation = compile("poorna x ;").unwrap();
    match &compilation.program.statements[..] {
        [Stmt::VariableDeclaration(d)] => {
            assert_eq!(d.value, None);
            assert_eq!(d.size, None);
        }
        other => panic!("unexpected program {other:?}"),
    }
    assert_eq!(compilation.c_lines, vec!["    int x;"]);
    assert_eq!(compilation.tac_lines(), vec!["x = ?"]);
}

#[test]
fn sized_declaration_generates_array() {
    let compilation = compile("samuha arr [ 5 ] ;").unwrap();
    assert_eq!(compilation.c_lines, vec!["    int arr[5];"]);
}

#[test]
fn loop_carried_update_is_an_assignment() {
    let compilation = compile(SUM_PROGRAM).unwrap();
    assert_eq!(
        compilation.c_source(),
        "#include <stdio.h>\n\
         int main() {\n    \
         int sum = 0;\n    \
         for (int i = 1; i <= 5; i++) {\n        \
         sum = sum + i;\n    \
         }\n    \
         printf(\"%d\\n\", sum);\n    \
         return 0;\n\
         }\n"
    );
    assert_eq!(
        compilation.tac_lines(),
        vec![
            "sum = 0",
            "i = 1",
            "L1: if i > 5 goto ENDL1",
            "sum = sum + i",
            "i = i + 1",
            "goto L1",
            "ENDL1:",
            "print sum",
        ]
    );
}

#[test]
fn generation_is_repeatable() {
    let first = compile(SUM_PROGRAM).unwrap();
    let second = compile(SUM_PROGRAM).unwrap();
    assert_eq!(first.c_lines, second.c_lines);
    assert_eq!(first.tac, second.tac);
    assert_eq!(
        kannada::codegen::generate_c(&first.program),
        first.c_lines
    );
}

#[test]
fn malformed_input_is_a_located_error() {
    let err = compile("poorna x = 5 ;\nhelu ;").unwrap_err();
    match err {
        KannadaError::Parser { message, span } => {
            assert_eq!(message, "Expected identifier, got `;`");
            assert_eq!(&"poorna x = 5 ;\nhelu ;"[span.range()], ";");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn loop_prints_its_own_counter() {
    let Some(toolchain) = toolchain_or_skip() else { return };
    let output = run("ella i = 0 ; i <= 2\n    helu i ;\nhagiddare\n", &toolchain).unwrap();
    assert_eq!(output, "0\n1\n2");
}

#[test]
fn program_output_uses_declared_formats() {
    let Some(toolchain) = toolchain_or_skip() else { return };
    assert_eq!(run(SUM_PROGRAM, &toolchain).unwrap(), "15");

    let source = "taran half = 0.5 ;\nsutra name = \"kannada\" ;\nakshara c = 'k' ;\nhelu half ;\nhelu name ;\nhelu c ;\n";
    assert_eq!(run(source, &toolchain).unwrap(), "0.500000\nkannada\nk");
}

#[test]
fn run_with_honours_strict_lexing() {
    let mut config = Config::default();
    config.lexer.strict = true;
    config.toolchain = Toolchain::new("kannada-no-such-cc");
    // Lexing fails before the toolchain is ever touched
    match run_with("poorna x = 1 ; @ helu x ;", &config).unwrap_err() {
        KannadaError::Lexer { span, .. } => assert_eq!(span.range(), 14..15),
        other => panic!("unexpected error {other:?}"),
    }
    // Lenient lexing gets as far as the configured compiler
    config.lexer.strict = false;
    assert!(matches!(
        run_with("poorna x = 1 ; @ helu x ;", &config).unwrap_err(),
        KannadaError::Toolchain { .. }
    ));
}

#[test]
fn scoped_print_formats_run_correctly() {
    let Some(toolchain) = toolchain_or_skip() else { return };
    let siblings = "ella i = 0 ; i <= 0 taran y = 1.5 ; helu y ; hagiddare\n\
                    ella j = 0 ; j <= 0 sutra y = \"hi\" ; helu y ; hagiddare\n";
    assert_eq!(run(siblings, &toolchain).unwrap(), "1.500000\nhi");

    let shadowed = "taran i = 1.5 ;\nella i = 0 ; i <= 2\n    helu i ;\nhagiddare\n";
    assert_eq!(run(shadowed, &toolchain).unwrap(), "0\n1\n2");
}
