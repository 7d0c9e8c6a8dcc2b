use anyhow::{Context, Result};
use clap::Parser;
use reelcat::export::{export_csv, Column};
use reelcat::{CatalogBuilder, Config, FacetKind, FacetSelection, FilterEngine, VideoRecord};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Library root to scan
    #[arg()]
    root: PathBuf,

    /// Configuration file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "reelcat.toml")]
    config: PathBuf,

    /// Decade to show, e.g. 1990s
    #[arg(long, default_value = "All")]
    decade: String,

    /// Aspect ratio to show, e.g. 1.85, or the band label (UltraWide)
    #[arg(long, default_value = "All")]
    aspect_ratio: String,

    /// Quality tier to show: 4K, 1080p, 720p or Unknown
    #[arg(long, default_value = "All")]
    quality: String,

    /// Write the filtered view to this CSV file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the available facet values
    #[arg(long)]
    facets: bool,

    /// Print the filtered view as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Maximum number of files probed at once
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Seconds before a single ffprobe call is abandoned
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to the ffprobe executable
    #[arg(long)]
    ffprobe: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the table or JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load {:?}", args.config))?;
    if let Some(jobs) = args.jobs {
        config.probe.max_concurrent = jobs;
    }
    if let Some(timeout) = args.timeout {
        config.probe.timeout_secs = timeout;
    }
    if let Some(ffprobe) = args.ffprobe.clone() {
        config.probe.ffprobe_path = ffprobe;
    }
    config.validate().context("Invalid configuration")?;

    let builder = CatalogBuilder::from_config(&config)?;
    let cancel = builder.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling scan");
            cancel.cancel();
        }
    });

    let catalog = builder
        .build(&args.root)
        .await
        .with_context(|| format!("Failed to catalog {:?}", args.root))?;

    let band = config.facets.band();
    let selection = FacetSelection {
        decade: args.decade,
        aspect_ratio: args.aspect_ratio,
        quality: args.quality,
    };
    for kind in FacetKind::ALL {
        let options = catalog.facet_options(kind, &band);
        let selected = selection.get(kind);
        if !options.iter().any(|o| o == selected) {
            warn!("{} '{}' is not among {:?}", kind, selected, options);
        }
        if args.facets {
            println!("{}: {}", kind, options.join(", "));
        }
    }

    let engine = FilterEngine::new(band);
    let visible = engine.filter(&catalog, &selection);
    info!("Showing {}/{} records", visible.len(), catalog.len());

    if let Some(path) = &args.export {
        export_csv(path, &Column::ALL, &visible)
            .with_context(|| format!("Failed to export to {:?}", path))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else if !args.facets {
        print_table(&visible);
    }

    Ok(())
}

fn print_table(records: &[&VideoRecord]) {
    let widths: Vec<usize> = Column::ALL
        .iter()
        .map(|column| {
            records
                .iter()
                .map(|r| column.value(r).chars().count())
                .chain(std::iter::once(column.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = Column::ALL
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header(), width = *width))
        .collect();
    println!("{}", header.join("  ").trim_end());

    for record in records {
        let row: Vec<String> = Column::ALL
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:<width$}", column.value(record), width = *width))
            .collect();
        println!("{}", row.join("  ").trim_end());
    }
}
