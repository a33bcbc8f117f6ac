//! Builds the bad programs bloom filter off-chain with the same parameters the program uses.

use std::{
    io::BufRead,
    str::FromStr,
};

use anyhow::Context;
use protector_interface::state::bloom::{
    CountingBloomFilterMut,
    DEFAULT_NUM_COUNTERS,
    DEFAULT_NUM_HASHES,
};
use solana_address::Address;

pub struct BuiltFilter {
    pub counters: Vec<u8>,
    pub num_entries: usize,
    pub false_positive_rate: f64,
}

/// Reads one base58 program id per line, skipping blank lines and `#` comments.
pub fn read_program_ids(reader: impl BufRead) -> anyhow::Result<Vec<Address>> {
    let mut ids = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Couldn't read line {}", i + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let id = Address::from_str(trimmed)
            .map_err(|e| anyhow::anyhow!("Invalid program id on line {}: {trimmed}: {e}", i + 1))?;
        ids.push(id);
    }
    Ok(ids)
}

pub fn build_filter(program_ids: &[Address]) -> anyhow::Result<BuiltFilter> {
    let mut counters = vec![0u8; DEFAULT_NUM_COUNTERS as usize];
    let mut filter = CountingBloomFilterMut::new(DEFAULT_NUM_HASHES, &mut counters)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    for id in program_ids {
        filter.insert(id.as_ref());
    }
    let false_positive_rate = filter.as_view().estimated_false_positive_rate();

    Ok(BuiltFilter {
        counters,
        num_entries: program_ids.len(),
        false_positive_rate,
    })
}
