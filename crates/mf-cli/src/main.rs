//! Command-line inspector and formatter for MapFile documents.
//!
//! Thin wrapper over `mf-core`: load a document, print its presentation
//! snapshot, or re-emit it in canonical form. Set `RUST_LOG=debug` to
//! see which unsupported blocks the parser drops.

use clap::{Parser, Subcommand};
use mf_core::Map;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mf", about = "Inspect and rewrite MapFile documents", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a document's summary: name, projection, extent, WMS state,
    /// and the layer table.
    Inspect {
        /// Path to the mapfile.
        path: PathBuf,
        /// Emit the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Parse a document and re-emit it in canonical form.
    Fmt {
        /// Path to the mapfile.
        path: PathBuf,
        /// Rewrite the file in place instead of printing to stdout.
        #[arg(long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> mf_core::Result<()> {
    match cli.command {
        Command::Inspect { path, json } => {
            let map = Map::open(&path)?;
            if json {
                let payload = serde_json::json!({
                    "summary": map.summary(),
                    "layers": map.layer_summaries(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("summary serializes")
                );
            } else {
                print_summary(&map);
            }
        }
        Command::Fmt { path, write } => {
            let map = Map::open(&path)?;
            if write {
                map.save(&path)?;
            } else {
                print!("{}", mf_core::emit_document(&map));
            }
        }
    }
    Ok(())
}

fn print_summary(map: &Map) {
    let summary = map.summary();
    println!("Name:       {}", summary.name);
    println!("Projection: {}", or_dash(&summary.projection));
    match summary.extent {
        Some([minx, miny, maxx, maxy]) => println!("Extent:     {minx} {miny} {maxx} {maxy}"),
        None => println!("Extent:     (unset)"),
    }
    if summary.wms.enabled {
        println!(
            "WMS:        enabled{}",
            summary
                .wms
                .title
                .as_deref()
                .map(|t| format!(" ({t})"))
                .unwrap_or_default()
        );
    } else {
        println!("WMS:        disabled");
    }

    let layers = map.layer_summaries();
    println!("Layers:     {}", layers.len());
    for (i, layer) in layers.iter().enumerate() {
        println!(
            "  [{i}] {:<20} {:<9} {:<7} group={} projection={}",
            layer.name,
            layer.kind.token(),
            layer.status.token(),
            layer.group.as_deref().unwrap_or("-"),
            or_dash(&layer.projection),
        );
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
