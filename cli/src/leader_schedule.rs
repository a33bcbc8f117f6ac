//! Reads `slot leader` lines into per-leader slot ranges.

use std::{
    collections::{
        BTreeMap,
        HashSet,
    },
    io::BufRead,
};

use anyhow::Context;
use protector_interface::{
    instructions::set_leader_schedule::MAX_SLOT_RANGES_PER_INSTRUCTION,
    state::leader_schedule::SlotRange,
};

/// Inclusive `(start, end)` slot ranges per leader, in schedule order.
pub type ValidatorSchedule = BTreeMap<String, Vec<(u64, u64)>>;

/// Groups consecutive slots led by the same leader into inclusive ranges.
///
/// A run ends when the leader changes or the next slot isn't `prev + 1`. A run of one slot is
/// `(s, s)`. Blank lines are skipped.
pub fn read_leader_schedule(reader: impl BufRead) -> anyhow::Result<ValidatorSchedule> {
    let mut groups = ValidatorSchedule::new();
    let mut current: Option<(String, u64, u64)> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Couldn't read line {}", i + 1))?;
        let mut parts = line.split_whitespace();
        let Some(slot) = parts.next() else {
            continue;
        };
        let slot = slot
            .parse::<u64>()
            .with_context(|| format!("Invalid slot on line {}: {slot}", i + 1))?;
        let leader = parts
            .next()
            .with_context(|| format!("Missing leader on line {}", i + 1))?;

        current = match current.take() {
            Some((prev, start, end)) if prev == leader && end.checked_add(1) == Some(slot) => {
                Some((prev, start, slot))
            }
            Some((prev, start, end)) => {
                groups.entry(prev).or_default().push((start, end));
                Some((leader.to_string(), slot, slot))
            }
            None => Some((leader.to_string(), slot, slot)),
        };
    }

    if let Some((leader, start, end)) = current {
        groups.entry(leader).or_default().push((start, end));
    }

    Ok(groups)
}

pub fn read_leader_schedule_file(path: &str) -> anyhow::Result<ValidatorSchedule> {
    let file = std::fs::File::open(path).with_context(|| format!("Couldn't open {path}"))?;
    read_leader_schedule(std::io::BufReader::new(file))
}

pub fn keep_only_bad_validators(bad_validators: &HashSet<String>, groups: &mut ValidatorSchedule) {
    groups.retain(|leader, _| bad_validators.contains(leader));
}

pub fn count_ranges(groups: &ValidatorSchedule) -> usize {
    groups.values().map(Vec::len).sum()
}

/// Flattens the groups into sorted slot ranges, merging ranges that touch.
pub fn to_slot_ranges(groups: &ValidatorSchedule) -> Vec<SlotRange> {
    let mut ranges = groups.values().flatten().copied().collect::<Vec<_>>();
    ranges.sort_unstable();

    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .map(|(start, end)| SlotRange::new(start, end))
        .collect()
}

/// Splits ranges into `SetLeaderSchedule` sized batches. An empty schedule is still one batch,
/// so the stored ranges get reset.
pub fn schedule_chunks(ranges: &[SlotRange]) -> Vec<&[SlotRange]> {
    if ranges.is_empty() {
        return vec![ranges];
    }
    ranges.chunks(MAX_SLOT_RANGES_PER_INSTRUCTION).collect()
}

/// Describes a failed batch. Only the first batch resets, so a failure after it leaves the
/// on-chain schedule partially written.
pub fn chunk_failure_context(index: usize, num_chunks: usize) -> String {
    format!(
        "Failed to push chunk {} of {num_chunks}; the on-chain leader schedule is incomplete, \
         re-run push-leader-schedule",
        index + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_reset_batches() {
        assert_eq!(schedule_chunks(&[]), vec![&[] as &[SlotRange]]);

        let ranges = (0..100u64)
            .map(|i| SlotRange::new(i * 10, i * 10 + 3))
            .collect::<Vec<_>>();
        let chunks = schedule_chunks(&ranges);
        assert_eq!(
            chunks.iter().map(|c| c.len()).collect::<Vec<_>>(),
            vec![
                MAX_SLOT_RANGES_PER_INSTRUCTION,
                MAX_SLOT_RANGES_PER_INSTRUCTION,
                100 - 2 * MAX_SLOT_RANGES_PER_INSTRUCTION
            ]
        );
        assert_eq!(chunks.concat(), ranges);
    }

    #[test]
    fn chunk_failure_names_the_chunk() {
        let msg = chunk_failure_context(1, 3);
        assert!(msg.contains("chunk 2 of 3"), "{msg}");
        assert!(msg.contains("re-run"), "{msg}");
    }

    const SCHEDULE: &str = "
        100 alice
        101 alice
        102 alice
        103 alice
        104 bob
        105 bob

        106 carol
        107 alice
        108 alice
        110 alice
    ";

    #[test]
    fn groups_consecutive_slots() {
        let groups = read_leader_schedule(SCHEDULE.as_bytes()).unwrap();
        assert_eq!(groups["alice"], vec![(100, 103), (107, 108), (110, 110)]);
        assert_eq!(groups["bob"], vec![(104, 105)]);
        assert_eq!(groups["carol"], vec![(106, 106)]);
        assert_eq!(count_ranges(&groups), 5);
    }

    #[test]
    fn keeps_bad_validators() {
        let mut groups = read_leader_schedule(SCHEDULE.as_bytes()).unwrap();
        keep_only_bad_validators(&HashSet::from(["bob".to_string()]), &mut groups);
        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("bob"));
    }

    #[test]
    fn merges_touching_ranges() {
        let mut groups = read_leader_schedule(SCHEDULE.as_bytes()).unwrap();
        keep_only_bad_validators(
            &HashSet::from(["alice".to_string(), "bob".to_string()]),
            &mut groups,
        );
        assert_eq!(
            to_slot_ranges(&groups),
            vec![
                SlotRange::new(100, 105),
                SlotRange::new(107, 108),
                SlotRange::new(110, 110),
            ]
        );
    }

    #[test]
    fn empty_schedule() {
        assert!(read_leader_schedule("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn malformed_lines() {
        assert!(read_leader_schedule("abc alice".as_bytes()).is_err());
        assert!(read_leader_schedule("100".as_bytes()).is_err());
    }
}
