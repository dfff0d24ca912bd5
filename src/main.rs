//! repo-schema - Snapshot a directory tree as JSON.
//!
//! Usage:
//!   repo-schema <ROOT>                       Print the schema to stdout
//!   repo-schema <ROOT> -o repo_schema.json   Save the schema to a file
//!   repo-schema --help                       Show help

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use reposchema_core::{DEFAULT_INDENT, SchemaConfig, SchemaTree};
use reposchema_export::SchemaWriter;
use reposchema_scan::TreeWalker;

#[derive(Parser)]
#[command(
    name = "repo-schema",
    version,
    about = "Snapshot a directory tree as an indented JSON schema",
    long_about = "repo-schema walks ROOT and writes its structure as JSON.\n\n\
                  Directories become objects keyed by entry name, files become null."
)]
struct Cli {
    /// Root directory to walk
    root: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Walk into symlinked directories instead of recording them as files
    #[arg(long)]
    follow_symlinks: bool,

    /// Spaces per nesting level
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Suppress the summary printed after saving
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    let config = SchemaConfig::builder()
        .root(cli.root.clone())
        .follow_symlinks(cli.follow_symlinks)
        .indent(cli.indent)
        .build()
        .context("Invalid arguments")?;

    let tree = TreeWalker::new(config.clone())
        .walk()
        .with_context(|| format!("Failed to walk {}", cli.root.display()))?;

    let writer = SchemaWriter::new(config.indent);

    match cli.output {
        Some(output) => {
            writer
                .save(&tree.root, &output)
                .with_context(|| format!("Failed to save schema to {}", output.display()))?;
            if !cli.quiet {
                print_summary(&tree, &output);
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writer.write(&tree.root, &mut out).context("Failed to write schema")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays pure JSON.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_summary(tree: &SchemaTree, output: &Path) {
    eprintln!("Repository schema saved to {}", output.display());
    eprintln!(
        "{} files, {} directories, depth {} ({:.2}s)",
        tree.total_files(),
        tree.total_dirs(),
        tree.stats.max_depth,
        tree.scan_duration.as_secs_f64()
    );
}
