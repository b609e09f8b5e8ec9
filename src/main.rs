use std::path::PathBuf;

use clap::Parser;
use mocx::{Exporter, Vault};

#[derive(Debug, Parser)]
#[command(
    name = "mocx",
    version,
    about = "Export Obsidian notes reachable from a MOC into portable Markdown"
)]
struct Cli {
    /// Path to the Obsidian vault root.
    #[arg(long, env = "OBSIDIAN_VAULT")]
    vault: PathBuf,

    /// Root MOC note: a path relative to the vault root, or a bare note name.
    #[arg(long)]
    moc: String,

    /// Output directory for exported files (created if absent).
    #[arg(long)]
    output: PathBuf,

    /// Maximum link traversal depth.
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Print the export report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let vault = Vault::open(&cli.vault)?;
    let exporter = Exporter::new(vault, &cli.output, cli.depth);
    let report = exporter.export(&cli.moc)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("export complete");
        println!(
            "  notes: {}/{} exported",
            report.notes_exported, report.notes_collected
        );
        println!(
            "  attachments: {}/{} exported",
            report.attachments_exported, report.attachments_collected
        );
        println!("  output: {}", cli.output.display());
        if !report.skipped.is_empty() {
            println!("  skipped: {} (see warnings)", report.skipped.len());
        }
    }

    Ok(())
}
