//! Probe sequence for the open-addressed table.
//!
//! From a cluster start `i` the sequence visits `i, i + 1, ..., i + window`
//! where `window` is the configured linear-probe length if the whole
//! cluster fits below `mask`, else zero. The next cluster starts at
//! `(i * 5 + 1 + perturb) & mask` after shifting `perturb` right by
//! `PERTURB_SHIFT`. Once `perturb` reaches zero the recurrence
//! `i -> 5i + 1 mod 2^k` visits every slot, so a table with at least one
//! empty slot always terminates a lookup.

/// Default number of extra slots scanned linearly after a cluster start.
pub const LINEAR_PROBES: usize = 9;

/// Right shift applied to the perturbation between clusters. Must be >= 1.
pub const PERTURB_SHIFT: u32 = 5;

#[derive(Clone, Debug)]
pub struct ProbeSeq {
    start: usize,
    offset: usize,
    window: usize,
    perturb: u64,
    mask: usize,
    linear_probes: usize,
}

impl ProbeSeq {
    pub fn new(hash: u64, mask: usize, linear_probes: usize) -> Self {
        debug_assert!((mask.wrapping_add(1)).is_power_of_two());
        let start = (hash as usize) & mask;
        Self {
            start,
            offset: 0,
            window: Self::window_for(start, mask, linear_probes),
            perturb: hash,
            mask,
            linear_probes,
        }
    }

    #[inline]
    fn window_for(start: usize, mask: usize, linear_probes: usize) -> usize {
        if start + linear_probes <= mask {
            linear_probes
        } else {
            0
        }
    }

    /// Index of the next slot to inspect.
    #[inline]
    pub fn next_index(&mut self) -> usize {
        if self.offset > self.window {
            self.perturb >>= PERTURB_SHIFT;
            self.start = self
                .start
                .wrapping_mul(5)
                .wrapping_add(1)
                .wrapping_add(self.perturb as usize)
                & self.mask;
            self.window = Self::window_for(self.start, self.mask, self.linear_probes);
            self.offset = 0;
        }
        let idx = self.start + self.offset;
        self.offset += 1;
        idx
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        Some(self.next_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Invariant: a cluster that fits below the mask is scanned linearly
    /// for `linear_probes + 1` slots before jumping.
    #[test]
    fn linear_window_then_jump() {
        let mask = 63;
        let seq: Vec<usize> = ProbeSeq::new(3, mask, LINEAR_PROBES).take(11).collect();
        assert_eq!(&seq[..10], &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        // perturb = 3 >> 5 = 0, so next start = 3 * 5 + 1.
        assert_eq!(seq[10], 16);
    }

    /// Invariant: a cluster that would cross the table end is truncated to
    /// its start slot only.
    #[test]
    fn truncated_window_at_table_end() {
        let mask = 15;
        let mut seq = ProbeSeq::new(10, mask, LINEAR_PROBES);
        assert_eq!(seq.next_index(), 10);
        // 10 * 5 + 1 = 51, & 15 = 3.
        assert_eq!(seq.next_index(), 3);
    }

    /// Invariant: the sequence is deterministic given (hash, mask, window).
    #[test]
    fn deterministic_for_same_inputs() {
        let a: Vec<usize> = ProbeSeq::new(0xdead_beef_cafe, 1023, 9).take(200).collect();
        let b: Vec<usize> = ProbeSeq::new(0xdead_beef_cafe, 1023, 9).take(200).collect();
        assert_eq!(a, b);
    }

    /// Invariant: every slot is eventually visited, for any hash.
    #[test]
    fn covers_every_slot() {
        for &hash in &[0u64, 1, 7, u64::MAX, 0x1234_5678_9abc_def0] {
            let mask = 31;
            let seen: BTreeSet<usize> = ProbeSeq::new(hash, mask, 9).take(4096).collect();
            assert_eq!(seen.len(), mask + 1, "hash {hash:#x}");
            assert!(seen.iter().all(|&i| i <= mask));
        }
    }

    /// Invariant: the perturbation feeds the full hash into later clusters,
    /// so hashes sharing low bits diverge after the first cluster.
    #[test]
    fn high_bits_spread_colliding_starts() {
        let mask = 255;
        let a: Vec<usize> = ProbeSeq::new(0x10, mask, 0).take(4).collect();
        let b: Vec<usize> = ProbeSeq::new(0x10 | (1 << 12), mask, 0).take(4).collect();
        assert_eq!(a[0], b[0]);
        assert_ne!(a, b);
    }
}
