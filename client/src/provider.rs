//! The RPC endpoint and signing identity used to talk to a cluster.

use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use solana_client::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_keypair::{
    read_keypair_file,
    Keypair,
};
use solana_sdk::signature::Signer;

pub const PROVIDER_URL_ENV: &str = "PROTECTOR_PROVIDER_URL";
pub const WALLET_ENV: &str = "PROTECTOR_WALLET";
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_WALLET_PATH: &str = "~/.config/solana/id.json";

pub struct Provider {
    pub rpc: RpcClient,
    pub payer: Keypair,
    pub commitment: CommitmentConfig,
}

impl Provider {
    pub fn new(url: impl ToString, payer: Keypair, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            payer,
            commitment,
        }
    }

    /// Builds a provider from `PROTECTOR_PROVIDER_URL` and `PROTECTOR_WALLET`, falling back to a
    /// local validator and the default Solana CLI keypair.
    pub fn env() -> anyhow::Result<Self> {
        let url = std::env::var(PROVIDER_URL_ENV).unwrap_or_else(|_| DEFAULT_PROVIDER_URL.into());
        let wallet = std::env::var(WALLET_ENV).unwrap_or_else(|_| DEFAULT_WALLET_PATH.into());
        Self::from_parts(&url, &wallet)
    }

    /// Builds a provider from an RPC url and a keypair path, expanding a leading `~`.
    pub fn from_parts(url: &str, wallet_path: &str) -> anyhow::Result<Self> {
        let payer = read_keypair(&expand_home(wallet_path)?)?;
        Ok(Self::new(url, payer, CommitmentConfig::confirmed()))
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }

    pub fn payer_pubkey(&self) -> solana_address::Address {
        self.payer.pubkey()
    }
}

/// Replaces a leading `~` with `$HOME`.
pub fn expand_home(path: &str) -> anyhow::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").context("HOME isn't set; can't expand `~`")?;
            Ok(PathBuf::from(home).join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Reads a keypair file written by `solana-keygen`.
pub fn read_keypair(path: &Path) -> anyhow::Result<Keypair> {
    read_keypair_file(path)
        .map_err(|e| anyhow::anyhow!("Couldn't read keypair file {}: {e}", path.display()))
}
