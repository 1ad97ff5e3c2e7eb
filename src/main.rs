use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use umkm_saw::config::AppConfig;
use umkm_saw::logging::init_logging;
use umkm_saw::{loader, visualization};
use umkm_saw::{recommendations, tier_counts, Category, SuitabilityPipeline};

#[derive(Parser, Debug)]
#[command(
    name = "umkm-saw",
    version,
    about = "Rank villages by suitability for a UMKM business category"
)]
struct Cli {
    /// Category key, e.g. `sembako` or `kuliner_nonis`
    #[arg(short, long, required_unless_present = "list_categories")]
    category: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Village CSV (overrides data.path)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Result CSV (overrides output.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Recommendation report HTML (overrides output.html)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Print the recommendation listing as JSON on stdout
    #[arg(long)]
    json: bool,

    /// List known categories and exit
    #[arg(long)]
    list_categories: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> umkm_saw::Result<()> {
    if cli.list_categories {
        for category in Category::ALL {
            println!("{:<16}{}", category.key(), category.description());
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    if cli.output.is_some() {
        config.output.csv = cli.output;
    }
    if cli.map.is_some() {
        config.output.html = cli.map;
    }

    let pipeline = SuitabilityPipeline::new()?;
    let category = cli.category.unwrap_or_default();

    let raw = loader::read_villages_csv(&config.data.path)?;
    let result = pipeline.run(&category, &raw)?;
    if result.height() == 0 {
        println!("No recommendations: '{category}' is not a recognized UMKM category");
        return Ok(());
    }

    if let Some(path) = &config.output.csv {
        loader::write_csv(&result, path)?;
        info!(path = %path.display(), "wrote result table");
    }
    if let Some(path) = &config.output.html {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let html = visualization::generate_recommendation_html(&result, &config.map)?;
        std::fs::write(path, html)?;
        info!(path = %path.display(), "wrote recommendation report");
    }

    let rows = recommendations(&result)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (tier, count) in tier_counts(&result)? {
            println!("{:<20}{count:<6}{}", tier.label(), tier.description());
        }
    }
    Ok(())
}
