use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "calm-processor")]
#[command(about = "Convert the CALM active layer summary table into a NetCDF archive")]
#[command(version)]
pub struct Cli {
    /// Defaults to `convert`
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: ./calm-processor.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Overrides for the configured settings
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, global = true, help = "URL of the CALM summary spreadsheet")]
    pub source_url: Option<String>,

    #[arg(long, global = true, help = "Directory holding the downloaded spreadsheet")]
    pub work_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Directory for the NetCDF output")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Output file name prefix [default: CALM]")]
    pub prefix: Option<String>,
}

impl SourceArgs {
    pub fn apply(&self, settings: Settings) -> Settings {
        settings
            .with_source_url(self.source_url.clone())
            .with_work_dir(self.work_dir.clone())
            .with_output_dir(self.output_dir.clone())
            .with_output_prefix(self.prefix.clone())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Download (if needed), clean and write the NetCDF archive
    Convert,

    /// Report what cleaning does to the source table without writing output
    Summary {
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Describe a NetCDF archive written by `convert`
    Info {
        #[arg(short, long, help = "NetCDF file to inspect")]
        file: PathBuf,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}
