use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;

use rill_common::Diagnostic;
use rill_lexer::{Lexer, Literal, Token};

/// rill language front end.
///
/// Tokenizes .rill source files and prints the token stream.
#[derive(Parser)]
#[command(
    name = "rill",
    version,
    about,
    long_about = "rill language front end.\n\nTokenizes a .rill source file, or reads lines interactively when no file\nis given, and prints the resulting token stream.\n\nExamples:\n  rill hello.rill           Tokenize a script\n  rill hello.rill --json    Emit the token stream as JSON\n  rill                      Start the REPL"
)]
struct Cli {
    /// Input .rill source file; starts the REPL when omitted.
    script: Option<PathBuf>,

    /// Emit the token stream as JSON to stdout.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.script {
        Some(path) => run_file(&path, cli.json),
        None => repl(cli.json),
    }
}

/// Tokenize a script file. Lexical errors are fatal here: diagnostics are
/// rendered and the process exits with code 65.
fn run_file(path: &Path, json: bool) {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let (tokens, diags) = Lexer::new(&source, &file_name).tokenize();

    if diags.has_errors() {
        for diag in diags.diagnostics() {
            print_diagnostic(diag, &source, &file_name);
        }
        process::exit(65);
    }

    emit_tokens(&tokens, json);
}

/// Interactive mode: one scan per line, an empty line or EOF exits.
///
/// Errors never terminate the session; every line gets a fresh scanner
/// and a fresh diagnostic bag, so no error state carries over.
fn repl(json: bool) {
    println!("-- empty line to exit --");
    let stdin = io::stdin();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: could not read input: {}", e);
                break;
            }
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }

        let (tokens, diags) = Lexer::new(line, "<repl>").tokenize();
        for diag in diags.diagnostics() {
            print_diagnostic(diag, line, "<repl>");
        }
        emit_tokens(&tokens, json);
    }
}

fn emit_tokens(tokens: &[Token], json: bool) {
    if json {
        match serde_json::to_string_pretty(tokens) {
            Ok(j) => println!("{}", j),
            Err(e) => {
                eprintln!("error: failed to serialize tokens: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for token in tokens {
        match &token.literal {
            Literal::None => println!(
                "{:>4}:{:<3} {:?} {:?}",
                token.span.start.line, token.span.start.column, token.kind, token.lexeme,
            ),
            literal => println!(
                "{:>4}:{:<3} {:?} {:?} {}",
                token.span.start.line, token.span.start.column, token.kind, token.lexeme, literal,
            ),
        }
    }
}

fn print_diagnostic(diag: &Diagnostic, source: &str, file_name: &str) {
    let start = diag.span.start.offset as usize;
    let end = (diag.span.end.offset as usize).max(start + 1);

    Report::build(ReportKind::Error, file_name, start)
        .with_message(&diag.message)
        .with_label(
            Label::new((file_name, start..end))
                .with_message(&diag.message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((file_name, Source::from(source)))
        .unwrap();
}
