// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::Parser;

mod config;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Mirrax digital twin daemon", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        default_value = "/etc/mirrax.conf",
        value_name = "FILE"
    )]
    config: std::path::PathBuf,
    /// Telemetry random seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Quiet output (no logging).
    #[arg(long)]
    quiet: bool,
    /// Daemonize the service.
    #[arg(short = 'D', long)]
    daemon: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let mut config: config::Config = mirrax::from_file(args.config)?;

    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    let mut log_config = simplelog::ConfigBuilder::new();
    if args.daemon {
        log_config.set_time_level(LevelFilter::Off);
        log_config.set_thread_level(LevelFilter::Off);
    }

    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);
    log_config.add_filter_ignore_str("hyper");
    log_config.add_filter_ignore_str("reqwest");
    log_config.add_filter_ignore_str("mio");

    let log_level = if args.daemon {
        LevelFilter::Info
    } else if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let color_choice = if args.daemon {
        simplelog::ColorChoice::Never
    } else {
        simplelog::ColorChoice::Auto
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        color_choice,
    )?;

    if args.daemon {
        log::debug!("Running service as daemon");
    }

    log::trace!("{:#?}", config);

    ////////////////////

    use std::time::Duration;

    let instance = config.instance.clone();

    log::debug!("Starting twin services");
    log::info!("Runtime version: {}", mirrax::consts::VERSION);
    log::info!("{}", instance);

    if instance.id().is_nil() {
        log::warn!("Instance ID is not set or invalid");
    }

    mirrax::global::set_instance(instance);

    let registry = mirrax::registry::HardwareRegistry::new(config.node.components.clone())?;
    let facility = mirrax::facility::Facility::new(&config.facility);

    log::info!(
        "Tracking {} components across {} server units",
        registry.len(),
        facility.unit_count()
    );

    if config.simulation.seed.is_some() {
        log::info!("Running with a fixed telemetry seed");
    }

    let runtime = mirrax::runtime::builder(registry, facility)
        .with_shutdown()
        .build();

    let simulator = runtime.schedule_service::<mirrax::service::Simulator, _>(
        config.simulation.clone(),
        Duration::from_millis(config.simulation.interval.clamp(100, 60_000)),
    );
    let reporter = runtime.schedule_service::<mirrax::service::Reporter, _>(
        mirrax::runtime::NullConfig {},
        mirrax::consts::SERVICE_REPORT_INTERVAL,
    );

    runtime.schedule_io_service::<mirrax::service::Server, _>(config.server.clone());

    runtime.wait_for_shutdown().await;

    simulator.cancel().await;
    reporter.cancel().await;

    std::thread::sleep(Duration::from_millis(50));

    log::debug!("{} was shutdown gracefully", env!("CARGO_BIN_NAME"));

    Ok(())
}
