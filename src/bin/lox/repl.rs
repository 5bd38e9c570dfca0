use std::io::{self, IsTerminal};

use loxscan::{render, scan, DiagnosticStyle};

#[derive(Debug, Default)]
pub struct Repl {
    style: DiagnosticStyle,
}

impl Repl {
    pub fn new(style: DiagnosticStyle) -> Self {
        Self { style }
    }

    /// Scans one line on its own; errors never leak into the next line.
    pub fn rep(&mut self, input: &str) -> anyhow::Result<()> {
        let outcome = scan(input);

        for token in &outcome.tokens {
            println!("{token}");
        }

        let stderr = io::stderr();
        let color = stderr.is_terminal();
        render(stderr.lock(), self.style, color, "<stdin>", input, &outcome.diagnostics)?;

        Ok(())
    }
}
