use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use plate_loader::{
    bar::Bar, config::Config, inventory::Inventory, loading::Loader, plate::PlateType,
    weight::Weight,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Works out which plates to put on each side of a barbell.
#[derive(Parser)]
struct Args {
    /// Total weights to load, bar included
    #[arg(value_parser = clap::value_parser!(Weight))]
    totals: Vec<Weight>,

    /// Bar weight, overriding the config
    #[arg(long)]
    bar: Option<Weight>,

    /// Plates as <weight>x<pairs>[:<tag>], replacing the configured inventory
    #[arg(long = "plate")]
    plates: Vec<PlateType>,

    /// Config file, defaults to $PLATE_LOADER_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = Config::discover(args.config.as_deref())?;

    let bar = args.bar.map_or_else(|| config.bar(), Bar::new);
    let inventory = match args.plates.is_empty() {
        true => config.inventory()?,
        false => Inventory::new(args.plates),
    };
    info!(%bar, plates = inventory.len(), "inventory ready");

    let loader = Loader::new(config.limits());

    let totals = match args.totals.is_empty() {
        true => vec![bar.weight() + inventory.total_per_side() * 2],
        false => args.totals,
    };

    let results = totals
        .iter()
        .map(|total| loader.compute(*total, &bar, &inventory))
        .collect::<Vec<_>>();

    match args.json {
        true => {
            let json = serde_json::to_string_pretty(&results).context("Cannot encode results")?;
            println!("{json}");
        }
        false => {
            for (total, result) in totals.iter().zip(&results) {
                println!("{total} => {result}");
            }
        }
    }

    Ok(())
}
