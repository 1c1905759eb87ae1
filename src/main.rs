use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error};

use tess_no_planets::apis::exoplanet_archive::ExoplanetArchiveSource;
use tess_no_planets::apis::mast::MastSource;
use tess_no_planets::config::Config;
use tess_no_planets::constants::{DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH};
use tess_no_planets::logging;
use tess_no_planets::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "tess_no_planets")]
#[command(about = "Generate CSV of TESS TICs with light curves and no known planets")]
#[command(version)]
struct Cli {
    /// Output CSV filename
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// TOML configuration file (optional; defaults apply when absent)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    debug!(?config, "Configuration resolved");

    let archive = ExoplanetArchiveSource::new(config.exoplanet_archive);
    let mast = MastSource::new(config.mast);

    match Pipeline::run(&archive, &mast, &cli.output).await {
        Ok(summary) => {
            println!(
                "Wrote {} rows to {}",
                summary.written,
                summary.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e).context("building the no-planet target list")
        }
    }
}
