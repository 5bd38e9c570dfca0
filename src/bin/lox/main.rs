mod repl;

use std::fs;
use std::io::{self, IsTerminal};
use std::process::exit;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use loxscan::cli::Cli;
use loxscan::{render, scan, DiagnosticStyle};
use repl::Repl;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Bad command line.
const EXIT_USAGE: i32 = 64;
/// The input had lexical errors.
const EXIT_DATA: i32 = 65;

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            exit(EXIT_USAGE);
        }
    };

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Some(script) = &cli.script {
        let code =
            fs::read_to_string(script).with_context(|| format!("script `{}`", script.display()))?;
        if !run_file(&script.to_string_lossy(), &code, cli.diagnostics)? {
            exit(EXIT_DATA);
        }
    } else {
        repl(cli.diagnostics)?;
    }

    Ok(())
}

/// Returns `false` if any lexical error was reported.
fn run_file(path: &str, code: &str, style: DiagnosticStyle) -> anyhow::Result<bool> {
    let outcome = scan(code);

    for token in &outcome.tokens {
        println!("{token}");
    }

    let stderr = io::stderr();
    let color = stderr.is_terminal();
    render(stderr.lock(), style, color, path, code, &outcome.diagnostics)?;
    log::debug!("{path}: {} diagnostics", outcome.diagnostics.len());

    Ok(!outcome.had_error())
}

fn repl(style: DiagnosticStyle) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut state = Repl::new(style);
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                state.rep(&line)?;
            }
            Err(ReadlineError::Eof) => return Ok(()),
            Err(ReadlineError::Interrupted) => {
                eprintln!("user exit");
                exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    }
}
