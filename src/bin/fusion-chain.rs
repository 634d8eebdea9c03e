use clap::{Parser, Subcommand};
use fusion_chain::{
    server::{self, create_dir_if_non_existent, handle_command_line_arguments},
    simulate,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "fusion-chain", author, version, about, long_about = Some("AiElon FusionHD chain\n\n\
In-memory hash-linked ledger with proof-of-work sealing"))]
struct Cli {
    #[command(subcommand)]
    command: ChainCommand,
}

#[derive(Subcommand, Debug)]
enum ChainCommand {
    /// Serve the ledger over REST
    Server(server::ServerArgs),
    /// Seal blocks in-process and print the chain info
    Simulate(simulate::SimulateArgs),
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        ChainCommand::Simulate(args) => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_filter(LevelFilter::WARN))
                .init();
            simulate::run(&args)
        }
        ChainCommand::Server(args) => {
            let config = handle_command_line_arguments(args).await?;

            // setup tracing
            if let Some(parent) = config.log_file.parent() {
                create_dir_if_non_existent(parent).await?;
            }

            let log_file = std::fs::File::create(config.log_file.clone())?;
            let file_layer = tracing_subscriber::fmt::layer().with_writer(log_file);

            let stdout_layer = tracing_subscriber::fmt::layer();
            tracing_subscriber::registry()
                .with(stdout_layer.with_filter(config.log_level_stdout))
                .with(file_layer.with_filter(config.log_level))
                .init();

            server::run(config).await
        }
    }
}
