// Quill: command-line driver

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser;

use quill::interpreter::config::{
    stack_size_for, CallScoping, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH_LIMIT,
};
use quill::parser::lexer::Lexer;
use quill::terminal::Terminal;

/// Run a Quill script, or dump its tokens or syntax tree.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print one token per line to stderr instead of running the script.
    #[arg(long, conflicts_with = "parse")]
    lex: bool,

    /// Print the syntax tree to stderr instead of running the script.
    #[arg(long)]
    parse: bool,

    /// Parent function call frames to the caller's scope instead of the
    /// top level, letting functions see their caller's locals.
    #[arg(long)]
    caller_scoping: bool,

    /// Maximum depth of nested function calls (1 to 4096).
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_CALL_DEPTH,
        value_parser = parse_call_depth
    )]
    max_call_depth: usize,

    /// Script to run.
    file: PathBuf,
}

fn main() {
    let args = Args::parse();
    init_tracing();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|err| {
        eprintln!(
            "error: could not read '{}': {}",
            args.file.display(),
            err
        );
        process::exit(2);
    });

    // Deep recursion in the script is deep recursion here, so the work runs
    // on a thread whose stack is sized for the call limit
    let worker = thread::Builder::new()
        .name("quill".to_string())
        .stack_size(stack_size_for(args.max_call_depth))
        .spawn(move || {
            if args.lex {
                dump_tokens(&source)
            } else if args.parse {
                dump_ast(&source)
            } else {
                execute(&source, &args)
            }
        });

    let code = match worker.map(|handle| handle.join()) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => {
            eprintln!("error: interpreter thread panicked");
            1
        }
        Err(err) => {
            eprintln!("error: could not start interpreter thread: {}", err);
            1
        }
    };
    process::exit(code);
}

fn parse_call_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (1..=MAX_CALL_DEPTH_LIMIT).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("must be between 1 and {}", MAX_CALL_DEPTH_LIMIT))
    }
}

/// Enable with `RUST_LOG=quill=debug` or `RUST_LOG=quill=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Tokens are printed as they are produced, so everything before a lex
/// error is still shown.
fn dump_tokens(source: &str) -> i32 {
    let mut err_out = io::stderr().lock();
    for token in Lexer::new(source) {
        match token {
            Ok(token) => {
                let _ = writeln!(err_out, "{}", token);
            }
            Err(err) => {
                let _ = writeln!(err_out, "error: {}", quill::Error::from(err));
                return 1;
            }
        }
    }
    0
}

fn dump_ast(source: &str) -> i32 {
    match quill::parse(source) {
        Ok(program) => {
            eprintln!("{}", program);
            0
        }
        Err(err) => {
            eprintln!("error: {}", quill::Error::from_parse(err));
            1
        }
    }
}

fn execute(source: &str, args: &Args) -> i32 {
    let config = InterpreterConfig {
        call_scoping: if args.caller_scoping {
            CallScoping::Caller
        } else {
            CallScoping::Global
        },
        max_call_depth: args.max_call_depth,
    };

    match quill::run(source, config, Terminal::stdout()) {
        Ok(_) => 0,
        Err(err) => {
            tracing::debug!(location = %err.location(), "run failed");
            eprintln!("error: {}", err);
            err.exit_code()
        }
    }
}
