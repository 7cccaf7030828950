//! Kannada Compiler CLI

use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use kannada::{compile_with, Compilation, Config, KannadaError, VERSION, LANGUAGE_NAME};
use kannada::diagnostics::Diagnostics;

#[derive(ClapParser, Debug)]
#[command(name = "kannada")]
#[command(version = VERSION)]
#[command(about = "Translate Kannada programs to C, then build and run them", long_about = None)]
struct Args {
    /// Source file to compile
    input: PathBuf,

    /// Configuration file (defaults to ./kannada.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// C compiler to use
    #[arg(long)]
    cc: Option<String>,

    /// Also write the generated C translation unit to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after code generation
    #[arg(long)]
    no_run: bool,

    /// Reject characters that are not part of any token
    #[arg(long)]
    strict: bool,

    /// Print tokens and AST as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn print_stages(compilation: &Compilation, config: &Config, json: bool) -> Result<(), KannadaError> {
    if config.emit.tokens {
        println!("\n=== Step 1: Lexical Analysis ===");
        if json {
            println!("{}", to_json(&compilation.tokens)?);
        } else {
            for token in &compilation.tokens {
                println!("{:?} {:?}", token.kind, token.lexeme);
            }
        }
    }

    if config.emit.ast {
        println!("\n=== Step 2: Syntax Analysis (AST) ===");
        if json {
            println!("{}", to_json(&compilation.program)?);
        } else {
            for stmt in &compilation.program.statements {
                println!("{:?}", stmt);
            }
        }
    }

    if config.emit.c {
        println!("\n=== Step 3: Generated C Code ===");
        for line in &compilation.c_lines {
            println!("{}", line);
        }
    }

    if config.emit.tac {
        println!("\n=== Step 3.5: Intermediate Code (Three Address Code) ===");
        for line in compilation.tac_lines() {
            println!("{}", line);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, KannadaError> {
    serde_json::to_string_pretty(value).map_err(|e| KannadaError::config(format!("JSON output failed: {}", e)))
}

fn run_compile(args: &Args) -> bool {
    let mut config = match Config::discover(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(" {}", e);
            return false;
        }
    };
    if let Some(cc) = &args.cc {
        config.toolchain.cc = cc.clone();
    }
    config.lexer.strict |= args.strict;

    // Read source
    let source = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(" Failed to read {}: {}", args.input.display(), e);
            return false;
        }
    };
    log::info!("compiling {} ({} bytes, {} lines)", args.input.display(), source.len(), source.lines().count());

    let filename = args.input.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input.knd");
    let diag = Diagnostics::new(&source, filename);

    let compilation = match compile_with(&source, &config) {
        Ok(c) => c,
        Err(e) => {
            eprint!("{}", diag.format_error(&e));
            return false;
        }
    };

    if let Err(e) = print_stages(&compilation, &config, args.json) {
        eprint!("{}", diag.format_error(&e));
        return false;
    }

    let c_source = compilation.c_source();
    if let Some(out) = &args.output {
        if let Err(e) = fs::write(out, &c_source) {
            eprintln!(" Failed to write {}: {}", out.display(), e);
            return false;
        }
        println!("\n Wrote C source to {}", out.display());
    }

    if args.no_run {
        return true;
    }

    println!("\n=== Step 4: Compilation & Execution ===");
    match config.toolchain.compile_and_run(&c_source) {
        Ok(output) => {
            println!("Output of Program:");
            println!("{}", output);
            true
        }
        Err(e) => {
            eprint!("{}", diag.format_error(&e));
            false
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::debug!("{} compiler v{}", LANGUAGE_NAME, VERSION);

    // Parsing and code generation recurse once per loop nesting level
    let builder = std::thread::Builder::new()
        .name("main-thread".into())
        .stack_size(8 * 1024 * 1024); // 8MB

    let handler = match builder.spawn(move || run_compile(&args)) {
        Ok(h) => h,
        Err(e) => {
            eprintln!(" Failed to start compiler thread: {}", e);
            std::process::exit(1);
        }
    };

    match handler.join() {
        Ok(true) => {}
        _ => std::process::exit(1),
    }
}
