//! Reading and writing bits by index and by mask.

use alloc::vec::Vec;

use crate::error::Result;
use crate::table::{self, single_bit_index};
use crate::FlagWord;

/// A bit-level write applied through a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BitOp {
    Set,
    Clear,
    Toggle,
}

impl BitOp {
    pub(crate) const fn apply(self, value: u64, mask: u64) -> u64 {
        match self {
            Self::Set => value | mask,
            Self::Clear => value & !mask,
            Self::Toggle => value ^ mask,
        }
    }
}

impl FlagWord {
    /// Returns whether the bit at `index` is set.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `index` is not in
    /// `0..=63`.
    pub fn get(&self, index: u32) -> Result<bool> {
        Ok(self.value & table::get_bit(index)? != 0)
    }

    /// Sets the bit at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `index` is not in
    /// `0..=63`.
    pub fn set(&mut self, index: u32) -> Result<()> {
        self.apply_index(BitOp::Set, index)
    }

    /// Clears the bit at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `index` is not in
    /// `0..=63`.
    pub fn clear(&mut self, index: u32) -> Result<()> {
        self.apply_index(BitOp::Clear, index)
    }

    /// Flips the bit at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `index` is not in
    /// `0..=63`.
    pub fn toggle(&mut self, index: u32) -> Result<()> {
        self.apply_index(BitOp::Toggle, index)
    }

    /// Returns whether the bit selected by a single-bit mask is set.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotSingleBit`](crate::Error::NotSingleBit) unless exactly one bit of
    /// `mask` is set.
    pub fn get_mask(&self, mask: u64) -> Result<bool> {
        single_bit_index(mask)?;
        Ok(self.value & mask != 0)
    }

    /// Sets every bit that is set in `mask`.
    pub fn set_mask(&mut self, mask: u64) {
        self.value = BitOp::Set.apply(self.value, mask);
    }

    /// Clears every bit that is set in `mask`.
    pub fn clear_mask(&mut self, mask: u64) {
        self.value = BitOp::Clear.apply(self.value, mask);
    }

    /// Flips every bit that is set in `mask`.
    pub fn toggle_mask(&mut self, mask: u64) {
        self.value = BitOp::Toggle.apply(self.value, mask);
    }

    /// Sets the bit at each index.
    ///
    /// Every index is checked before any bit changes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) at the first index not
    /// in `0..=63`. The word is left unchanged.
    pub fn set_indices<I: IntoIterator<Item = u32>>(&mut self, indices: I) -> Result<()> {
        self.apply_indices(BitOp::Set, indices)
    }

    /// Clears the bit at each index. See [`set_indices`](Self::set_indices).
    pub fn clear_indices<I: IntoIterator<Item = u32>>(&mut self, indices: I) -> Result<()> {
        self.apply_indices(BitOp::Clear, indices)
    }

    /// Flips the bit at each index. See [`set_indices`](Self::set_indices).
    ///
    /// An index that appears twice is flipped twice.
    pub fn toggle_indices<I: IntoIterator<Item = u32>>(&mut self, indices: I) -> Result<()> {
        self.apply_indices(BitOp::Toggle, indices)
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        self.value = u64::MAX;
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.value = 0;
    }

    fn apply_index(&mut self, op: BitOp, index: u32) -> Result<()> {
        self.value = op.apply(self.value, table::get_bit(index)?);
        Ok(())
    }

    fn apply_indices<I: IntoIterator<Item = u32>>(&mut self, op: BitOp, indices: I) -> Result<()> {
        let masks = indices
            .into_iter()
            .map(table::get_bit)
            .collect::<Result<Vec<_>>>()?;
        self.apply_each(op, masks);
        Ok(())
    }

    pub(crate) fn apply_each(&mut self, op: BitOp, masks: impl IntoIterator<Item = u64>) {
        self.value = masks
            .into_iter()
            .fold(self.value, |value, mask| op.apply(value, mask));
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ErrorKind, FlagWord};

    #[test]
    fn test_single_bit_round_trip() {
        let mut word = FlagWord::new();
        for index in 0..64 {
            word.set(index).unwrap();
            assert!(word.get(index).unwrap());
            word.clear(index).unwrap();
            assert!(!word.get(index).unwrap());
        }
        assert_eq!(word.value(), 0);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut word = FlagWord::from_value(0b1010);
        word.toggle(1).unwrap();
        assert_eq!(word.value(), 0b1000);
        word.toggle(1).unwrap();
        assert_eq!(word.value(), 0b1010);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut word = FlagWord::new();
        assert_eq!(word.get(64).unwrap_err(), Error::IndexOutOfRange { index: 64 });
        assert_eq!(word.set(100).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(word.clear(64).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(word.toggle(64).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(word.value(), 0);
    }

    #[test]
    fn test_get_mask_requires_single_bit() {
        let word = FlagWord::from_value(0b100);
        assert!(word.get_mask(0b100).unwrap());
        assert!(!word.get_mask(0b010).unwrap());
        assert_eq!(word.get_mask(0).unwrap_err(), Error::NotSingleBit { mask: 0 });
        assert_eq!(word.get_mask(0b110).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_mask_writes() {
        let mut word = FlagWord::from_value(0b1100);
        word.set_mask(0b0011);
        assert_eq!(word.value(), 0b1111);
        word.clear_mask(0b0110);
        assert_eq!(word.value(), 0b1001);
        word.toggle_mask(0b1111);
        assert_eq!(word.value(), 0b0110);
    }

    #[test]
    fn test_index_bulk_writes() {
        let mut word = FlagWord::new();
        word.set_indices([0, 2, 63]).unwrap();
        assert_eq!(word.value(), (1 << 63) | 0b101);
        word.clear_indices(vec![0, 63]).unwrap();
        assert_eq!(word.value(), 0b100);
        word.toggle_indices([2, 3, 3]).unwrap();
        assert_eq!(word.value(), 0);
    }

    #[test]
    fn test_index_bulk_validates_before_writing() {
        let mut word = FlagWord::new();
        let err = word.set_indices([1, 2, 64, 3]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 64 });
        assert_eq!(word.value(), 0);
    }

    #[test]
    fn test_set_all_clear_all() {
        let mut word = FlagWord::new();
        word.set_all();
        assert_eq!(word.value(), u64::MAX);
        word.clear_all();
        assert_eq!(word.value(), 0);
    }
}
