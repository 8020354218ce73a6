use std::path::Path;
use tracing::Level;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::readers::read_dataset;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let settings = cli.source.apply(Settings::load(cli.config.as_deref())?);

    match cli.command.unwrap_or(Commands::Convert) {
        Commands::Convert => convert(settings).await,
        Commands::Summary { json } => summary(settings, json).await,
        Commands::Info { file, json } => info(&file, json),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    // A subscriber may already be installed when embedded in another program
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn convert(settings: Settings) -> Result<()> {
    println!("Converting CALM summary table...");
    println!("Source: {}", settings.source_url);
    println!("Output directory: {}", settings.output_dir.display());

    let conversion = Pipeline::new(settings).run().await?;

    println!("\n{}", conversion.report.generate_summary());
    println!("Wrote {}", conversion.output.display());

    Ok(())
}

async fn summary(settings: Settings, json: bool) -> Result<()> {
    let report = Pipeline::new(settings).with_silent(json).summarize().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.generate_summary());
    }

    Ok(())
}

fn info(file: &Path, json: bool) -> Result<()> {
    let summary = read_dataset(file)?.summary()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Analyzing NetCDF file: {}", file.display());
        println!("\n{}", summary.detailed_summary());
    }

    Ok(())
}
