// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::Parser;

use mirrax::vision::{VisionClient, VisionConfig};

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Mirrax image analysis tool", long_about = None)]
struct Args {
    /// JPEG photograph to analyze.
    image: std::path::PathBuf,
    /// Analysis service endpoint.
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
    /// Generative model identifier.
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
    /// API key, falls back to the MIRRAX_VISION_KEY environment variable.
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
    /// Request timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();

    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);
    log_config.add_filter_ignore_str("hyper");
    log_config.add_filter_ignore_str("reqwest");
    log_config.add_filter_ignore_str("mio");

    let log_level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let api_key = match args.api_key {
        Some(api_key) => api_key,
        None => std::env::var("MIRRAX_VISION_KEY")
            .map_err(|_| anyhow::anyhow!("no API key given and MIRRAX_VISION_KEY is not set"))?,
    };

    let mut config = VisionConfig::new(api_key);

    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }

    log::debug!("Analyzing photograph: {}", args.image.display());

    let image = std::fs::read(&args.image)?;
    let client = VisionClient::new(&config)?;

    match client.analyze_jpeg(&image).await {
        Some(components) if components.is_empty() => {
            log::info!("No hardware components detected");
        }
        Some(components) => {
            for component in components {
                match component.description {
                    Some(description) => {
                        log::info!("{}: {} ({})", component.category, component.name, description);
                    }
                    None => {
                        log::info!("{}: {}", component.category, component.name);
                    }
                }
            }
        }
        None => {
            log::error!("Analysis unavailable");
        }
    }

    Ok(())
}
