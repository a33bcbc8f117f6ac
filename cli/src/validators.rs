//! Validator sandwich statistics, as served by the validators JSON endpoint.

use std::{
    collections::HashSet,
    io::Read,
};

use anyhow::Context;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub blocks_produced: u64,
    pub blocks_with_sandwiches: u64,
    pub sandwich_rate: f64,
}

impl Stats {
    /// The share of produced blocks that carried a sandwich, or `None` if no blocks were produced.
    pub fn observed_rate(&self) -> Option<f64> {
        (self.blocks_produced > 0)
            .then(|| self.blocks_with_sandwiches as f64 / self.blocks_produced as f64)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorStat {
    pub vote_account: String,
    pub identity_account: String,
    pub active_stake: u64,
    pub active_stake_display: String,
    pub commission: f64,
    #[serde(rename = "stats30d")]
    pub stats_30d: Option<Stats>,
    #[serde(rename = "stats60d")]
    pub stats_60d: Option<Stats>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub icon_url: Option<String>,
}

impl ValidatorStat {
    /// Whether the validator's 30 day sandwich rate is at least `rate`.
    pub fn is_bad(&self, rate: f64) -> bool {
        self.stats_30d
            .as_ref()
            .and_then(Stats::observed_rate)
            .is_some_and(|observed| observed >= rate)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidatorsData {
    pub ok: bool,
    pub err: Option<String>,
    pub data: Vec<ValidatorStat>,
}

pub fn parse_validators(reader: impl Read) -> anyhow::Result<Vec<ValidatorStat>> {
    let json: ValidatorsData =
        serde_json::from_reader(reader).context("Couldn't parse the validators JSON")?;
    if !json.ok {
        anyhow::bail!(
            "Validators response reported an error: {}",
            json.err.as_deref().unwrap_or("unknown")
        );
    }
    Ok(json.data)
}

pub fn parse_validators_file(path: &str) -> anyhow::Result<Vec<ValidatorStat>> {
    let file = std::fs::File::open(path).with_context(|| format!("Couldn't open {path}"))?;
    parse_validators(std::io::BufReader::new(file))
}

/// Returns the validators whose 30 day sandwich rate is at least `rate`.
pub fn filter_validators(validators: &[ValidatorStat], rate: f64) -> Vec<&ValidatorStat> {
    validators.iter().filter(|v| v.is_bad(rate)).collect()
}

/// The vote accounts of the validators whose 30 day sandwich rate is at least `rate`.
pub fn bad_vote_accounts(validators: &[ValidatorStat], rate: f64) -> HashSet<String> {
    filter_validators(validators, rate)
        .into_iter()
        .map(|v| v.vote_account.clone())
        .collect()
}

/// Both the vote and identity accounts of bad validators. Leader schedules list identities.
pub fn bad_leader_keys(validators: &[ValidatorStat], rate: f64) -> HashSet<String> {
    filter_validators(validators, rate)
        .into_iter()
        .flat_map(|v| [v.vote_account.clone(), v.identity_account.clone()])
        .collect()
}

/// Sums the 30 day sandwiched blocks over the validators at or above `rate`.
pub fn count_bad_blocks(validators: &[ValidatorStat], rate: f64) -> u64 {
    filter_validators(validators, rate)
        .into_iter()
        .filter_map(|v| v.stats_30d.as_ref())
        .map(|stats| stats.blocks_with_sandwiches)
        .sum()
}
