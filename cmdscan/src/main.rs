//! cmdscan: generate a string-argument command dispatcher from tagged C++
//! functions.
//!
//! `cmdscan src gen/commands.hpp CONSOLE_COMMAND init_commands command_`
//! scans `src` for functions marked with `CONSOLE_COMMAND` and writes one
//! wrapper per function plus an initializer that registers them all.

mod help;
mod render;
mod settings;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use settings::Settings;

/// Shipped next to the generated code via `--support-header`.
const SUPPORT_HEADER: &str = include_str!("../support/cmdscan.hpp");

#[derive(Parser)]
#[command(
    name = "cmdscan",
    version,
    about = "Generate a string-argument command dispatcher from tagged C++ functions"
)]
struct Cli {
    /// Source file, directory (scanned recursively) or glob pattern
    #[arg(required_unless_present_any = ["extensions", "example"])]
    source: Option<String>,

    /// File to write the generated code to
    #[arg(required_unless_present_any = ["extensions", "example"])]
    destination: Option<PathBuf>,

    /// Tag that marks a function as a command, e.g. CONSOLE_COMMAND
    #[arg(required_unless_present_any = ["extensions", "example"])]
    search_term: Option<String>,

    /// Name of the generated function that registers every command
    #[arg(required_unless_present_any = ["extensions", "example"])]
    init_function: Option<String>,

    /// Prefix of the generated wrapper functions
    #[arg(required_unless_present_any = ["extensions", "example"])]
    wrapper_prefix: Option<String>,

    /// Output format: cpp (default) or json
    #[arg(short = 'f', long, default_value = "cpp")]
    format: String,

    /// Also write the C++ support header to this path
    #[arg(long, value_name = "PATH")]
    support_header: Option<PathBuf>,

    /// Print the file extensions scanned in directories and exit
    #[arg(long)]
    extensions: bool,

    /// Print a usage example and exit
    #[arg(long)]
    example: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_settings(self) -> Result<Settings> {
        let settings = Settings {
            source: self.source.context("missing source")?,
            destination: self.destination.context("missing destination")?,
            search_term: self.search_term.context("missing search term")?,
            init_function_name: self.init_function.context("missing init function name")?,
            wrapper_prefix: self.wrapper_prefix.context("missing wrapper prefix")?,
            format: self.format,
            support_header: self.support_header,
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.extensions {
        print!("{}", help::extensions_text());
        return Ok(());
    }
    if cli.example {
        print!("{}", help::EXAMPLE);
        return Ok(());
    }

    let settings = cli.into_settings()?;
    run(&settings)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(settings: &Settings) -> Result<()> {
    let renderer = render::create_renderer(&settings.format)?;

    let files = source::collect_sources(&settings.source)?;
    if files.is_empty() {
        tracing::warn!("no source files found in {}", settings.source);
    }

    let report = source::scan_files(&files, &settings.search_term)?;
    let functions = source::remove_duplicates(report.functions);
    tracing::info!(
        files = files.len(),
        commands = functions.len(),
        skipped = report.failures.len(),
        format = renderer.name(),
        "scan finished"
    );

    let output = renderer.render(&render::Context {
        settings,
        functions: &functions,
    })?;
    write_file(&settings.destination, &output)?;

    if let Some(path) = &settings.support_header {
        write_file(path, SUPPORT_HEADER)?;
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote");
    Ok(())
}
