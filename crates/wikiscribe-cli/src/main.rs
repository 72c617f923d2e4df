//! md2confluence - convert markdown to Confluence wiki markup.

use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wikiscribe::{ConfluenceOptions, FidelityWarning, Severity, convert_bytes};

#[derive(Parser)]
#[command(name = "md2confluence")]
#[command(author, version, about = "Convert markdown to Confluence wiki markup", long_about = None)]
struct Cli {
    /// Input file (use - or omit for stdin)
    input: Option<PathBuf>,

    /// Output file (use - or omit for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number the lines of every code block
    #[arg(long)]
    linenumbers: bool,

    /// Log more (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ConfluenceOptions {
        ConfluenceOptions {
            linenumbers: self.linenumbers,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(cli.input.as_deref())?;
    let result = convert_bytes(&source, &cli.options())?;

    for warning in &result.warnings {
        report(warning);
    }

    write_output(cli.output.as_deref(), result.value.as_bytes())?;
    tracing::info!(
        bytes = result.value.len(),
        warnings = result.warnings.len(),
        "conversion finished"
    );
    Ok(())
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

fn read_input(input: Option<&Path>) -> io::Result<Vec<u8>> {
    match input {
        Some(path) if !is_stdio(input) => fs::read(path),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> io::Result<()> {
    match output {
        Some(path) if !is_stdio(output) => fs::write(path, bytes),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}

fn report(warning: &FidelityWarning) {
    match warning.severity {
        Severity::Info => tracing::info!("{warning}"),
        _ => tracing::warn!(kind = ?warning.kind, "{warning}"),
    }
}
