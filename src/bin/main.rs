use clap::Parser;
use enigma::Scanner;
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

/// Prints the token stream of Enigma source text.
#[derive(Parser)]
#[command(name = "enigma", version)]
struct Cli {
    /// Script to scan. Starts a REPL when omitted.
    script: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

fn run_file(path: &Path) -> io::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let had_error = Enigma::new(io::stdout(), io::stderr()).run(&contents)?;
    if had_error {
        std::process::exit(65);
    }
    Ok(())
}

fn run_prompt() -> io::Result<()> {
    let mut buffer = String::new();
    let mut stdin = io::stdin().lock();
    let mut enigma = Enigma::new(io::stdout(), io::stderr());

    loop {
        write!(enigma.out, ">> ")?;
        enigma.out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        enigma.run(buffer.as_str())?;
    }

    Ok(())
}

struct Enigma<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
}

impl<Out: Write, ErrOut: Write> Enigma<Out, ErrOut> {
    fn new(out: Out, err_out: ErrOut) -> Self {
        Self { out, err_out }
    }

    /// Writes one token per line, then any lexical errors. Returns whether
    /// an error was reported.
    fn run(&mut self, source: &str) -> io::Result<bool> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();

        for token in tokens.iter() {
            writeln!(self.out, "[line {}] {}", token.line() + 1, token)?;
        }
        for e in errors.iter() {
            writeln!(self.err_out, "{}", e)?;
        }

        Ok(!errors.is_empty())
    }
}
