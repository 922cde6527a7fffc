//! treeflow CLI: convert JSON documents into positioned node-link graphs.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use treeflow::convert::{ConvertConfig, DEFAULT_MAX_DEPTH, convert_with};
use treeflow::graph::FlowGraph;
use treeflow::layout::{DEFAULT_X_SPACING, DEFAULT_Y_SPACING};
use treeflow::value::ValueKind;

#[derive(Parser)]
#[command(
    name = "treeflow",
    version,
    about = "Convert hierarchical data into positioned node-link graphs"
)]
struct Cli {
    /// Horizontal pixels between sibling nodes.
    #[arg(long, global = true, default_value_t = DEFAULT_X_SPACING)]
    x_spacing: f32,

    /// Vertical pixels between depth levels.
    #[arg(long, global = true, default_value_t = DEFAULT_Y_SPACING)]
    y_spacing: f32,

    /// Maximum structural depth before conversion is aborted.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document and print the graph as JSON.
    Convert {
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },

    /// Convert a JSON document and print graph statistics.
    Stats {
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConvertConfig {
        x_spacing: cli.x_spacing,
        y_spacing: cli.y_spacing,
        max_depth: cli.max_depth,
    };

    match cli.command {
        Commands::Convert { file, pretty } => {
            let graph = load_and_convert(file.as_deref(), &config)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&graph)
            } else {
                serde_json::to_string(&graph)
            }
            .into_diagnostic()?;
            println!("{rendered}");
        }
        Commands::Stats { file } => {
            let graph = load_and_convert(file.as_deref(), &config)?;
            println!("nodes:     {}", graph.node_count());
            println!("edges:     {}", graph.edge_count());
            println!("max depth: {}", graph.max_depth());
            println!("mappings:  {}", graph.count_kind(ValueKind::Mapping));
            println!("sequences: {}", graph.count_kind(ValueKind::Sequence));
            println!("scalars:   {}", graph.count_kind(ValueKind::Scalar));
        }
    }

    Ok(())
}

/// Read a JSON document from a file or stdin and convert it.
///
/// Text parsing happens here, in the CLI glue; the engine itself only ever
/// sees already-parsed values.
fn load_and_convert(file: Option<&Path>, config: &ConvertConfig) -> Result<FlowGraph> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path).into_diagnostic()?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
            buf
        }
    };
    let value: serde_json::Value = serde_json::from_str(&text).into_diagnostic()?;
    tracing::debug!(bytes = text.len(), "parsed input document");
    Ok(convert_with(&value, config)?)
}
