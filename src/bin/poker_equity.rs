use clap::Parser;
use poker_equity::equity::SimulationConfig;
use poker_equity::server::{self, Config};

#[derive(Debug, Parser)]
#[command(version, about = "Poker hand evaluation and equity service")]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 5000)]
    port: u16,
    /// Monte Carlo trials per request.
    #[clap(long, default_value_t = SimulationConfig::DEFAULT_TRIALS, value_parser = clap::value_parser!(u64).range(1..))]
    trials: u64,
    /// Enumerate exactly when there are at most this many completions.
    #[clap(long, default_value_t = SimulationConfig::DEFAULT_EXACT_LIMIT)]
    exact_limit: u64,
    /// Simulation worker threads (defaults to the available parallelism).
    #[clap(long)]
    workers: Option<usize>,
    /// Fixed seed for reproducible Monte Carlo results.
    #[clap(long)]
    seed: Option<u64>,
    /// Log level filter.
    #[clap(long, default_value = "info")]
    log_level: log::LevelFilter,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(cli.log_level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let mut simulation = SimulationConfig::default().with_trials(cli.trials).with_exact_limit(cli.exact_limit);
    if let Some(workers) = cli.workers {
        simulation = simulation.with_workers(workers.max(1));
    }
    if let Some(seed) = cli.seed {
        simulation = simulation.with_seed(seed);
    }

    let config = Config { address: cli.address, port: cli.port, simulation };
    server::run(config).await?;
    Ok(())
}
