//! Positional pairing of class entries with class-period slots.

/// Entry and slot counts of a plan that did not line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub entries: usize,
    pub slots: usize,
}

impl CountMismatch {
    /// First entry index left without a slot, if entries outnumber slots.
    pub fn first_unmatched_entry(&self) -> Option<usize> {
        (self.entries > self.slots).then_some(self.slots)
    }
}

/// One entry paired with the slot at the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair<'a, E, S> {
    pub index: usize,
    pub entry: &'a E,
    pub slot: &'a S,
}

/// Result of aligning a plan's entries against its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<'a, E, S> {
    pub pairs: Vec<Pair<'a, E, S>>,
    pub mismatch: Option<CountMismatch>,
}

/// Pair entries and slots by index up to the shorter length.
///
/// Surplus entries or slots are dropped and reported through `mismatch`.
pub fn align<'a, E, S>(entries: &'a [E], slots: &[&'a S]) -> Alignment<'a, E, S> {
    let pairs = entries
        .iter()
        .zip(slots.iter().copied())
        .enumerate()
        .map(|(index, (entry, slot))| Pair { index, entry, slot })
        .collect();

    let mismatch = (entries.len() != slots.len()).then_some(CountMismatch {
        entries: entries.len(),
        slots: slots.len(),
    });

    Alignment { pairs, mismatch }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_counts_pair_everything() {
        let entries = ["math", "art"];
        let slots = [1, 2];
        let slot_refs: Vec<&i32> = slots.iter().collect();

        let alignment = align(&entries, &slot_refs);
        assert_eq!(alignment.pairs.len(), 2);
        assert_eq!(alignment.mismatch, None);
        assert_eq!(*alignment.pairs[1].entry, "art");
        assert_eq!(*alignment.pairs[1].slot, 2);
        assert_eq!(alignment.pairs[1].index, 1);
    }

    #[test]
    fn surplus_entries_are_truncated() {
        let entries = ["math", "art", "pe"];
        let slots = [1];
        let slot_refs: Vec<&i32> = slots.iter().collect();

        let alignment = align(&entries, &slot_refs);
        assert_eq!(alignment.pairs.len(), 1);
        let mismatch = alignment.mismatch.unwrap();
        assert_eq!(mismatch, CountMismatch { entries: 3, slots: 1 });
        assert_eq!(mismatch.first_unmatched_entry(), Some(1));
    }

    #[test]
    fn surplus_slots_are_reported_but_harmless() {
        let entries = ["math"];
        let slots = [1, 2, 3];
        let slot_refs: Vec<&i32> = slots.iter().collect();

        let alignment = align(&entries, &slot_refs);
        assert_eq!(alignment.pairs.len(), 1);
        assert_eq!(alignment.mismatch.unwrap().first_unmatched_entry(), None);
    }

    #[test]
    fn pair_count_never_exceeds_shorter_side() {
        let pool = [0u8; 6];
        for n_entries in 0..=pool.len() {
            for n_slots in 0..=pool.len() {
                let slot_refs: Vec<&u8> = pool[..n_slots].iter().collect();
                let alignment = align(&pool[..n_entries], &slot_refs);
                assert!(alignment.pairs.len() <= n_entries.min(n_slots));
                assert_eq!(alignment.mismatch.is_some(), n_entries != n_slots);
            }
        }
    }
}
