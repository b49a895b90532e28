use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use fishfinder_service::config::{self, Config};
use fishfinder_service::dev_mode::DevMode;
use fishfinder_service::logging::{self, LogLevel, Source};
use fishfinder_service::server;
use fishfinder_service::verify::{self, VerificationStatus};

#[derive(Parser, Debug)]
#[command(name = "fishfinder_service", about = "Fishing zone and catch advisory service")]
struct Args {
    /// TOML configuration file. Defaults apply when it does not exist.
    #[arg(short, long, default_value = "fishfinder.toml")]
    config: PathBuf,

    /// Run the classifier self-check, print the JSON report, and exit.
    #[arg(long)]
    verify: bool,

    /// Number of verification trials.
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// Seed override for deterministic responses (and verification).
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut loaded = Config::load(&args.config).map_err(|e| {
        anyhow::anyhow!("failed to load config from {}: {}", args.config.display(), e)
    })?;
    if args.seed.is_some() {
        loaded.pipeline.seed = args.seed;
    }
    let config = config::init(loaded);

    let level: LogLevel = config
        .logging
        .level
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    logging::init_logger(level, config.logging.file.as_deref(), config.logging.timestamps);

    if args.verify {
        let report = verify::verify_classifier(
            &verify::default_probe(),
            args.trials,
            config.pipeline.sample_count,
            DevMode::new(config.pipeline.seed),
        )?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.status == VerificationStatus::Failed {
            anyhow::bail!(
                "classifier agreed with the labeling rule in only {:.1}% of trials",
                report.agreement_rate * 100.0
            );
        }
        return Ok(());
    }

    if config.weather.api_key().is_none() {
        logging::warn(
            Source::Weather,
            None,
            &format!(
                "{} not set; requests without a temperature use {:.1} °C",
                config.weather.api_key_env, config.weather.fallback_temperature_c
            ),
        );
    }
    if let Some(seed) = config.pipeline.seed {
        logging::warn(Source::System, None, &format!("deterministic mode, seed {}", seed));
    }

    server::serve(config).await.context("server failed")?;
    Ok(())
}
