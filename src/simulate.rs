use crate::{
    block::digest::DigestAlgorithm,
    constants::*,
    ledger::{
        amount::Amount, party::Party, snapshot, summary::ChainInfo, transaction::TransactionDraft,
        Ledger, LedgerConfig, RewardPolicy,
    },
};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Args, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SimulateArgs {
    /// Number of blocks to seal after genesis
    #[arg(short, long, default_value_t = 3)]
    blocks: u32,
    /// Party credited with every sealing reward
    #[arg(short, long, default_value = "miner1")]
    miner: String,
    /// Party funded by the system before the first seal
    #[arg(long)]
    fund: Option<String>,
    /// Amount of the initial funding transfer
    #[arg(long, default_value_t = 1000.0)]
    fund_amount: f64,
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
    /// Write the resulting ledger to this snapshot file
    #[arg(short, long)]
    path: Option<PathBuf>,
    /// Output JSON data
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

/// Build a ledger in-process and seal `blocks` blocks into it
#[instrument(skip_all)]
pub fn simulate(args: &SimulateArgs) -> anyhow::Result<Ledger> {
    let mut ledger = Ledger::new(LedgerConfig {
        difficulty: args.difficulty,
        reward: Amount::from(args.reward),
        algorithm: args.digest_algorithm,
        reward_policy: args.reward_policy,
    })?;

    if let Some(party) = args.fund.as_ref() {
        ledger.submit(TransactionDraft::new(SYSTEM_PARTY, party.as_str(), args.fund_amount))?;
    }

    let miner = Party::new(args.miner.as_str());
    for _ in 0..args.blocks {
        let block = ledger.seal(&miner);
        info!("Sealed block {} with nonce {}", block.index, block.nonce);
    }
    Ok(ledger)
}

pub fn run(args: &SimulateArgs) -> anyhow::Result<()> {
    let ledger = simulate(args)?;
    let info: ChainInfo = ledger.chain_info(&[DEFAULT_VALIDATOR.to_string()]);
    let miner = ledger.balance_summary(&Party::new(args.miner.as_str()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{info}");
        println!("  Miner:        {miner}");
    }

    if let Some(path) = args.path.as_ref() {
        snapshot::write_file(&ledger, path)?;
    }
    Ok(())
}
