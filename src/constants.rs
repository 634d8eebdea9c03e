// chain constants

pub const CHAIN_ID: u32 = 338;
pub const NETWORK_NAME: &str = "AiElonChain338";
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";
pub const SYSTEM_PARTY: &str = "system";

// sealing

pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const DEFAULT_MINING_REWARD: u64 = 100;
pub const SEAL_REPORTING_FREQ: u64 = 250_000;

// server

pub const DEFAULT_VALIDATOR: &str = "aielon-node-1";
pub const DEFAULT_WEB_HOSTNAME: &str = "0.0.0.0";
pub const DEFAULT_WEB_PORT: u16 = 8080;
pub const LOG_FILE_PREFIX: &str = "fusion-chain";

/// Current wall clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
