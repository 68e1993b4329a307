//! shopintent — Purchase-intent analysis for online shopping sessions

use clap::Parser;
use shopintent::cli::{cmd_predict, cmd_serve, cmd_train, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopintent=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            artifact,
            test_size,
            seed,
            trees,
        } => {
            cmd_train(&data, &artifact, test_size, seed, trees)?;
        }
        Commands::Predict { session, artifact } => {
            cmd_predict(&session, &artifact)?;
        }
        Commands::Serve {
            host,
            port,
            artifact,
        } => {
            cmd_serve(&host, port, &artifact).await?;
        }
    }

    Ok(())
}
