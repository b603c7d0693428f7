//! Waterfall - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use waterfall::config::CliOverrides;
use waterfall::view::{ColorConfig, ItemStyles};

/// Waterfall - masonry layout previewer for JSONL items
#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(version)]
#[command(about = "Lay out JSONL items as a scrollable masonry grid")]
pub struct Args {
    /// Path to JSONL item file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Fixed column count (overrides the responsive breakpoints)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub columns: Option<u16>,

    /// Space between columns and between stacked items
    #[arg(long)]
    pub gap: Option<f64>,

    /// Space around the grid
    #[arg(long)]
    pub padding: Option<f64>,

    /// Placeholder height for items not yet measured
    #[arg(long = "estimate")]
    pub estimate: Option<f64>,

    /// Extra rows laid out above and below the viewport
    #[arg(long)]
    pub overscan: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the laid-out frame as JSON instead of starting the TUI
    #[arg(long)]
    pub dump: bool,

    /// Container width for --dump
    #[arg(long, default_value = "80")]
    pub width: u16,

    /// Viewport height for --dump
    #[arg(long, default_value = "24")]
    pub height: u16,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            columns: self.columns.map(usize::from),
            gap: self.gap,
            padding: self.padding,
            estimate_height: self.estimate,
            overscan: self.overscan,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = waterfall::config::resolve_config(args.config.clone(), &args.overrides())?;

    waterfall::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let items = waterfall::source::load_items(args.file.clone())?;

    if args.dump {
        let frame = waterfall::view::dump_frame(&items, &config, args.width, args.height);
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    let styles = ItemStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    waterfall::view::run_with_items(items, &config, styles)?;

    Ok(())
}
