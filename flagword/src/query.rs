//! Queries derived from the value, and value-only bitwise combinators.

use core::iter::FusedIterator;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use crate::FlagWord;

impl FlagWord {
    /// Returns the number of set bits.
    pub const fn pop_count(&self) -> u32 {
        self.value.count_ones()
    }

    /// Returns the index of the lowest set bit, or `None` if no bit is set.
    ///
    /// ```
    /// # use flagword::FlagWord;
    /// assert_eq!(FlagWord::from_value(0b1100).first_set_bit_index(), Some(2));
    /// assert_eq!(FlagWord::new().first_set_bit_index(), None);
    /// ```
    pub const fn first_set_bit_index(&self) -> Option<u32> {
        if self.value == 0 {
            None
        } else {
            Some(self.value.trailing_zeros())
        }
    }

    /// Returns the index of the highest set bit, or `None` if no bit is set.
    pub const fn last_set_bit_index(&self) -> Option<u32> {
        if self.value == 0 {
            None
        } else {
            Some(u64::BITS - 1 - self.value.leading_zeros())
        }
    }

    /// Returns whether exactly one bit is set.
    pub const fn is_power_of_two(&self) -> bool {
        self.value.is_power_of_two()
    }

    /// Iterates over the indices of the set bits, lowest first.
    pub const fn set_bits(&self) -> SetBits {
        SetBits(self.value)
    }

    /// Returns a word holding `self | other`. Neither registry is carried over.
    pub const fn or_with(&self, other: &FlagWord) -> Self {
        Self::from_value(self.value | other.value)
    }

    /// Returns a word holding `self & other`. Neither registry is carried over.
    pub const fn and_with(&self, other: &FlagWord) -> Self {
        Self::from_value(self.value & other.value)
    }

    /// Returns a word holding `self ^ other`. Neither registry is carried over.
    pub const fn xor_with(&self, other: &FlagWord) -> Self {
        Self::from_value(self.value ^ other.value)
    }

    /// Returns a word holding `!self`. The registries are not carried over.
    pub const fn complement(&self) -> Self {
        Self::from_value(!self.value)
    }
}

/// Iterator over the set bit indices of a [`FlagWord`], returned by
/// [`FlagWord::set_bits`].
#[derive(Clone, Debug)]
pub struct SetBits(u64);

impl Iterator for SetBits {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SetBits {}

impl FusedIterator for SetBits {}

macro_rules! impl_bit_op {
    ($trait:ident::$method:ident => $with:ident) => {
        impl $trait for FlagWord {
            type Output = FlagWord;

            fn $method(self, rhs: FlagWord) -> FlagWord {
                self.$with(&rhs)
            }
        }

        impl $trait for &FlagWord {
            type Output = FlagWord;

            fn $method(self, rhs: &FlagWord) -> FlagWord {
                self.$with(rhs)
            }
        }
    };
}
impl_bit_op!(BitOr::bitor => or_with);
impl_bit_op!(BitAnd::bitand => and_with);
impl_bit_op!(BitXor::bitxor => xor_with);

impl Not for FlagWord {
    type Output = FlagWord;

    fn not(self) -> FlagWord {
        self.complement()
    }
}

impl Not for &FlagWord {
    type Output = FlagWord;

    fn not(self) -> FlagWord {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use crate::FlagWord;

    #[test]
    fn test_pop_count() {
        assert_eq!(FlagWord::from_value(u64::MAX).pop_count(), 64);
        assert_eq!(FlagWord::new().pop_count(), 0);
        assert_eq!(FlagWord::from_value(0b1011).pop_count(), 3);
    }

    #[test]
    fn test_set_bit_index_bounds() {
        let word = FlagWord::from_value(0x8000_0000_0000_0010);
        assert_eq!(word.first_set_bit_index(), Some(4));
        assert_eq!(word.last_set_bit_index(), Some(63));

        let word = FlagWord::from_value(1);
        assert_eq!(word.first_set_bit_index(), Some(0));
        assert_eq!(word.last_set_bit_index(), Some(0));

        // A zero word has no set bit at either end.
        let word = FlagWord::new();
        assert_eq!(word.first_set_bit_index(), None);
        assert_eq!(word.last_set_bit_index(), None);
    }

    #[test]
    fn test_is_power_of_two() {
        assert!(!FlagWord::new().is_power_of_two());
        assert!(FlagWord::from_value(1).is_power_of_two());
        assert!(FlagWord::from_value(1 << 63).is_power_of_two());
        assert!(!FlagWord::from_value(0b110).is_power_of_two());
    }

    #[test]
    fn test_set_bits() {
        let word = FlagWord::from_value((1 << 63) | 0b1001);
        let bits = word.set_bits();
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.collect::<Vec<_>>(), [0, 3, 63]);
        assert_eq!(FlagWord::new().set_bits().next(), None);
    }

    #[test]
    fn test_combinators_drop_registries() {
        let mut named = FlagWord::from_labels(["A", "B"]).unwrap();
        named.define_mask("Both", 0b11).unwrap();
        named.set_value(0b0110);
        let other = FlagWord::from_value(0b0011);

        let or = named.or_with(&other);
        assert_eq!(or.value(), 0b0111);
        assert_eq!(or.named_bits().count(), 0);
        assert_eq!(or.named_masks().count(), 0);

        assert_eq!(named.and_with(&other).value(), 0b0010);
        assert_eq!(named.xor_with(&other).value(), 0b0101);
        assert_eq!(named.complement().value(), !0b0110);
        assert_eq!(named.complement().named_bits().count(), 0);
    }

    #[test]
    fn test_operators() {
        let a = FlagWord::from_value(0b1100);
        let b = FlagWord::from_value(0b1010);
        assert_eq!(&a | &b, FlagWord::from_value(0b1110));
        assert_eq!(&a & &b, FlagWord::from_value(0b1000));
        assert_eq!(&a ^ &b, FlagWord::from_value(0b0110));
        assert_eq!(!&a, FlagWord::from_value(!0b1100));
        assert_eq!(a ^ b, FlagWord::from_value(0b0110));
    }
}
