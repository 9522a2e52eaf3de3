//! hdseed - BIP39 / BIP32 key derivation CLI

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hdseed_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hdseed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    let report = run(cli)?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
