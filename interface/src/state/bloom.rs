//! A counting bloom filter laid over a borrowed byte buffer.
//!
//! Every byte of the buffer is one saturating `u8` counter. Counter indices are derived with
//! double hashing (`h1 + i * h2`) over two independently seeded FNV-1a hashes, so the exact same
//! indices are produced on-chain and off-chain. This lets a filter be built by a client and later
//! queried by the program, or vice versa.

use crate::error::ProtectorError;

/// The default number of counters in the on-chain filter.
pub const DEFAULT_NUM_COUNTERS: u32 = 7_000;

/// The default number of hash functions used by the on-chain filter.
pub const DEFAULT_NUM_HASHES: u8 = 5;

const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_ALT_OFFSET_BASIS: u64 = 0x8422_2325_cbf2_9ce4;

#[inline(always)]
fn fnv1a(basis: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(basis, |hash, b| (hash ^ *b as u64).wrapping_mul(FNV_PRIME))
}

/// Returns the `num_hashes` counter indices for `item`.
///
/// `h2` is forced odd so consecutive probes never collapse onto a single index when
/// `num_counters` is a power of two.
#[inline(always)]
fn counter_indices(
    item: &[u8],
    num_hashes: u8,
    num_counters: usize,
) -> impl Iterator<Item = usize> {
    let h1 = fnv1a(FNV_OFFSET_BASIS, item);
    let h2 = fnv1a(FNV_ALT_OFFSET_BASIS, item) | 1;
    (0..num_hashes as u64)
        .map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % num_counters as u64) as usize)
}

#[inline(always)]
fn validate_params(num_hashes: u8, num_counters: usize) -> Result<(), ProtectorError> {
    if num_hashes == 0 || num_counters == 0 {
        return Err(ProtectorError::InvalidBloomFilterParams);
    }
    Ok(())
}

#[inline(always)]
fn all_counters_set(counters: &[u8], num_hashes: u8, item: &[u8]) -> bool {
    counter_indices(item, num_hashes, counters.len()).all(|index| counters[index] > 0)
}

/// A read-only view of a counting bloom filter.
#[derive(Clone, Copy)]
pub struct CountingBloomFilter<'a> {
    num_hashes: u8,
    counters: &'a [u8],
}

impl<'a> CountingBloomFilter<'a> {
    pub fn new(num_hashes: u8, counters: &'a [u8]) -> Result<Self, ProtectorError> {
        validate_params(num_hashes, counters.len())?;
        Ok(Self {
            num_hashes,
            counters,
        })
    }

    #[inline(always)]
    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    #[inline(always)]
    pub fn num_counters(&self) -> usize {
        self.counters.len()
    }

    #[inline(always)]
    pub fn counters(&self) -> &'a [u8] {
        self.counters
    }

    /// Returns `true` if the item is possibly present and `false` if it's definitely absent.
    #[inline(always)]
    pub fn contains(&self, item: &[u8]) -> bool {
        all_counters_set(self.counters, self.num_hashes, item)
    }

    /// Estimates the current false positive probability from the fill level, using the standard
    /// approximation `(1 - e^(-k * n / m))^k` where `n` is estimated as `sum(counters) / k`.
    ///
    /// Saturated counters and removals of non-members make this less accurate.
    #[cfg(any(test, feature = "std"))]
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let m = self.counters.len() as f64;
        if m == 0.0 {
            return 1.0;
        }
        let k = self.num_hashes as f64;
        let sum: u64 = self.counters.iter().map(|c| *c as u64).sum();
        let n_eff = sum as f64 / k;

        (1.0 - (-k * n_eff / m).exp()).powf(k)
    }
}

/// A mutable view of a counting bloom filter.
pub struct CountingBloomFilterMut<'a> {
    num_hashes: u8,
    counters: &'a mut [u8],
}

impl<'a> CountingBloomFilterMut<'a> {
    pub fn new(num_hashes: u8, counters: &'a mut [u8]) -> Result<Self, ProtectorError> {
        validate_params(num_hashes, counters.len())?;
        Ok(Self {
            num_hashes,
            counters,
        })
    }

    #[inline(always)]
    pub fn as_view(&self) -> CountingBloomFilter<'_> {
        CountingBloomFilter {
            num_hashes: self.num_hashes,
            counters: self.counters,
        }
    }

    #[inline(always)]
    pub fn contains(&self, item: &[u8]) -> bool {
        all_counters_set(self.counters, self.num_hashes, item)
    }

    /// Adds an item to the filter. Counters saturate at `u8::MAX`.
    pub fn insert(&mut self, item: &[u8]) {
        for index in counter_indices(item, self.num_hashes, self.counters.len()) {
            self.counters[index] = self.counters[index].saturating_add(1);
        }
    }

    /// Removes an item from the filter, only decrementing counters that are non-zero.
    ///
    /// Removing an item that was never inserted can introduce false negatives for other items.
    pub fn remove(&mut self, item: &[u8]) {
        for index in counter_indices(item, self.num_hashes, self.counters.len()) {
            if self.counters[index] > 0 {
                self.counters[index] -= 1;
            }
        }
    }
}
