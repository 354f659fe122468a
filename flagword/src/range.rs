//! Packed sub-fields addressed by an inclusive bit range.

use crate::error::Result;
use crate::table;
use crate::FlagWord;

impl FlagWord {
    /// Returns a mask with the bits `low..=high` set. Same as [`table::build_range_mask`].
    ///
    /// # Errors
    ///
    /// Fails with a range error if either endpoint is not in `0..=63` or if `low > high`.
    pub fn build_range_mask(low: u32, high: u32) -> Result<u64> {
        table::build_range_mask(low, high)
    }

    /// Returns the bits `low..=high`, shifted down so that bit `low` lands on bit 0.
    ///
    /// # Errors
    ///
    /// Fails with a range error if either endpoint is not in `0..=63` or if `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flagword::FlagWord;
    /// let word = FlagWord::from_value(0b1101_0110);
    /// assert_eq!(word.extract_range(4, 7)?, 0b1101);
    /// # Ok::<(), flagword::Error>(())
    /// ```
    pub fn extract_range(&self, low: u32, high: u32) -> Result<u64> {
        let region = table::build_range_mask(low, high)?;
        Ok((self.value & region) >> low)
    }

    /// Replaces the bits `low..=high` with the low bits of `input`.
    ///
    /// Bits of `input` beyond the width of the range are discarded rather than rejected, and bits
    /// outside the range are left untouched.
    ///
    /// # Errors
    ///
    /// Fails with a range error if either endpoint is not in `0..=63` or if `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flagword::FlagWord;
    /// let mut word = FlagWord::new();
    /// word.insert_range(0xff, 0, 3)?;
    /// assert_eq!(word.value(), 0b1111);
    /// # Ok::<(), flagword::Error>(())
    /// ```
    pub fn insert_range(&mut self, input: u64, low: u32, high: u32) -> Result<()> {
        let region = table::build_range_mask(low, high)?;
        let field = input & (region >> low);
        self.value = (self.value & !region) | (field << low);
        Ok(())
    }
}
