use crate::SyntaxKind;

const SIZE: usize = 6;

/// Fixed-size bitset over [`SyntaxKind`], usable in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn slot_and_mask(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(slot < SIZE, "Index out of bounds. Increase the size of the bitset array.");

        (slot, 1 << (kind % Self::BITS_PER_SLOT))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] |= mask;
        self
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    const OPEN: SyntaxSet = SyntaxSet::new([L_PAREN, L_BRACE]);

    #[test]
    fn membership() {
        assert!(OPEN.contains(L_PAREN));
        assert!(!OPEN.contains(R_PAREN));
        assert!(OPEN.union(&SyntaxSet::new([TOMBSTONE])).contains(TOMBSTONE));
        assert!(SyntaxSet::EMPTY.with(YIELD_KW).contains(YIELD_KW));
    }
}
