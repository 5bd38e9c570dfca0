use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::DiagnosticStyle;

#[derive(Debug, Parser)]
#[command(name = "lox", version, about = "Tokenize Lox source")]
pub struct Cli {
    /// Scan a script instead of starting the prompt
    pub script: Option<PathBuf>,

    /// How lexical errors are displayed
    #[arg(long, value_enum, default_value_t = DiagnosticStyle::Plain)]
    pub diagnostics: DiagnosticStyle,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
