//! Range-coalesced set over validated ledger sequences (spec §4.6).
//!
//! Grounded on `qc-02-block-storage::domain::storage::index::BlockIndex`'s
//! sorted-vec-plus-binary-search style, generalized from single-height
//! entries to merged `[start, end]` ranges.

/// How far `find_next_missing` scans forward before giving up.
const FIND_NEXT_MISSING_WINDOW: u32 = 1_000_000;

/// Sorted, non-overlapping, gap-closing set of `uint32` ledger sequences.
#[derive(Debug, Clone, Default)]
pub struct CompletenessSet {
    ranges: Vec<(u32, u32)>,
}

impl CompletenessSet {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn add(&mut self, seq: u32) {
        self.add_range(seq, seq);
    }

    /// Merges `[start, end]` into the set, coalescing any range whose start
    /// is within one of `end` (adjacency, not just overlap).
    pub fn add_range(&mut self, start: u32, end: u32) {
        assert!(start <= end, "range start must not exceed end");

        let mut lo = 0usize;
        while lo < self.ranges.len() && self.ranges[lo].1.saturating_add(1) < start {
            lo += 1;
        }

        let mut new_start = start;
        let mut new_end = end;
        let mut hi = lo;
        while hi < self.ranges.len() && self.ranges[hi].0 <= new_end.saturating_add(1) {
            new_start = new_start.min(self.ranges[hi].0);
            new_end = new_end.max(self.ranges[hi].1);
            hi += 1;
        }

        self.ranges.splice(lo..hi, std::iter::once((new_start, new_end)));
    }

    pub fn contains(&self, seq: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if seq < r.0 {
                    std::cmp::Ordering::Greater
                } else if seq > r.1 {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// All sequences in `[start, end]` that are not present.
    pub fn find_missing(&self, start: u32, end: u32) -> Vec<u32> {
        if start > end {
            return Vec::new();
        }
        let mut missing = Vec::new();
        let mut seq = start;
        while seq <= end {
            if !self.contains(seq) {
                missing.push(seq);
            }
            if seq == end {
                break;
            }
            seq += 1;
        }
        missing
    }

    /// The first missing sequence strictly after `after`, scanning no
    /// further than `FIND_NEXT_MISSING_WINDOW` sequences ahead.
    pub fn find_next_missing(&self, after: u32) -> Option<u32> {
        let mut seq = after.checked_add(1)?;
        let limit = seq.saturating_add(FIND_NEXT_MISSING_WINDOW);
        while seq < limit {
            if !self.contains(seq) {
                return Some(seq);
            }
            seq = seq.checked_add(1)?;
        }
        None
    }

    /// `(min, max, any_present)` across all ranges.
    pub fn range(&self) -> (Option<u32>, Option<u32>, bool) {
        (
            self.ranges.first().map(|r| r.0),
            self.ranges.last().map(|r| r.1),
            !self.ranges.is_empty(),
        )
    }

    pub fn count(&self) -> u64 {
        self.ranges
            .iter()
            .map(|(s, e)| u64::from(*e) - u64::from(*s) + 1)
            .sum()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Exposes the coalesced ranges in sorted order, for tests and
    /// diagnostics.
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }
}
