use crate::{
    block::{digest::DigestAlgorithm, seal::SealOptions},
    constants::*,
    context::ChainContext,
    ledger::{amount::Amount, snapshot, Ledger, LedgerConfig, RewardPolicy},
    web,
};
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, instrument, level_filters::LevelFilter};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Web server hostname for REST
    #[arg(long, default_value = DEFAULT_WEB_HOSTNAME)]
    web_hostname: String,
    /// Web server port for REST
    #[arg(long, default_value_t = DEFAULT_WEB_PORT)]
    web_port: u16,
    /// Required count of leading zero characters in block digests
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: u32,
    /// Amount credited to whoever seals a block
    #[arg(long, default_value_t = DEFAULT_MINING_REWARD)]
    reward: u64,
    /// Block digest function
    #[arg(long, value_enum, default_value_t = DigestAlgorithm::Blake2b)]
    digest_algorithm: DigestAlgorithm,
    /// When sealing rewards become spendable
    #[arg(long, value_enum, default_value_t = RewardPolicy::Deferred)]
    reward_policy: RewardPolicy,
    /// Give up sealing after this many nonces
    #[arg(long)]
    max_seal_attempts: Option<u64>,
    /// Give up sealing after this many seconds
    #[arg(long)]
    seal_timeout_secs: Option<u64>,
    /// Validator names reported in chain info
    #[arg(long = "validator", default_values_t = [DEFAULT_VALIDATOR.to_string()])]
    validators: Vec<String>,
    /// Restore from and write to this snapshot file
    #[arg(long)]
    snapshot_path: Option<PathBuf>,
    /// Path to directory for logs
    #[arg(short, long, default_value = concat!(env!("HOME"), "/.fusion-chain/logs"))]
    log_dir: PathBuf,
    /// Max file log level
    #[arg(long, default_value_t = LevelFilter::DEBUG)]
    log_level: LevelFilter,
    /// Max stdout log level
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level_stdout: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct ChainConfiguration {
    pub ledger: LedgerConfig,
    pub seal_options: SealOptions,
    pub validators: Vec<String>,
    pub snapshot_path: Option<PathBuf>,
    pub web_hostname: String,
    pub web_port: u16,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub log_level_stdout: LevelFilter,
}

#[instrument]
pub async fn handle_command_line_arguments(
    args: ServerArgs,
) -> anyhow::Result<ChainConfiguration> {
    debug!("Parsing server args");
    create_dir_if_non_existent(&args.log_dir).await?;

    let mut log_number = 0;
    let mut log_fname = args.log_dir.join(format!("{LOG_FILE_PREFIX}-0.log"));
    while tokio::fs::metadata(&log_fname).await.is_ok() {
        log_number += 1;
        log_fname = args
            .log_dir
            .join(format!("{LOG_FILE_PREFIX}-{log_number}.log"));
    }

    Ok(ChainConfiguration {
        ledger: LedgerConfig {
            difficulty: args.difficulty,
            reward: Amount::from(args.reward),
            algorithm: args.digest_algorithm,
            reward_policy: args.reward_policy,
        },
        seal_options: SealOptions {
            max_attempts: args.max_seal_attempts,
            deadline: args.seal_timeout_secs.map(Duration::from_secs),
            cancel: None,
        },
        validators: args.validators,
        snapshot_path: args.snapshot_path,
        web_hostname: args.web_hostname,
        web_port: args.web_port,
        log_file: log_fname,
        log_level: args.log_level,
        log_level_stdout: args.log_level_stdout,
    })
}

/// Restore the ledger from the snapshot file when one exists
pub fn initialize_ledger(config: &ChainConfiguration) -> anyhow::Result<Ledger> {
    if let Some(path) = config.snapshot_path.as_ref().filter(|path| path.exists()) {
        info!("Restoring ledger from snapshot {}", path.display());
        let ledger = snapshot::parse_file(path)?;
        if ledger.config() != &config.ledger {
            info!("Snapshot ledger settings take precedence over command line settings");
        }
        return Ok(ledger);
    }

    info!(
        "Creating new ledger (difficulty {}, {} digests, {} rewards)",
        config.ledger.difficulty, config.ledger.algorithm, config.ledger.reward_policy
    );
    Ok(Ledger::new(config.ledger.clone())?)
}

#[instrument(skip_all)]
pub async fn run(config: ChainConfiguration) -> anyhow::Result<()> {
    info!("Starting fusion-chain server");
    let ledger = initialize_ledger(&config)?;
    let context = ChainContext::new(
        ledger,
        config.validators.clone(),
        config.seal_options.clone(),
    );

    web::start_web_server(
        context.clone(),
        (config.web_hostname.as_str(), config.web_port),
    )
    .await?;

    info!("Web server stopped");
    context.shutdown();
    if let Some(path) = config.snapshot_path.as_ref() {
        context.snapshot().await.write_file(path)?;
    }
    Ok(())
}

pub async fn create_dir_if_non_existent(path: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(path).await.is_err() {
        debug!("Creating directory {}", path.display());
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
