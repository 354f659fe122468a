//! The process-wide table of single-bit masks, and the range and shape checks built on it.

use seq_macro::seq;
use snafu::ensure;

use crate::error::{IndexOutOfRangeSnafu, InvalidRangeSnafu, NotSingleBitSnafu, Result};

/// The number of bits in a [`FlagWord`](crate::FlagWord).
pub const WIDTH: u32 = u64::BITS;

/// The largest valid bit index.
pub const MAX_INDEX: u32 = WIDTH - 1;

seq!(N in 0..64 {
    /// Single-bit masks indexed by bit position, so that `BITS[i] == 1 << i`.
    pub static BITS: [u64; 64] = [
        #(1 << N,)*
    ];
});

/// Returns the single-bit mask for a bit index.
///
/// # Errors
///
/// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `index` is not in
/// `0..=63`.
///
/// # Examples
///
/// ```
/// assert_eq!(flagword::table::get_bit(5).unwrap(), 0b10_0000);
/// assert!(flagword::table::get_bit(64).is_err());
/// ```
pub fn get_bit(index: u32) -> Result<u64> {
    ensure!(index <= MAX_INDEX, IndexOutOfRangeSnafu { index });
    Ok(BITS[index as usize])
}

/// Returns a mask with the bits `low..=high` set and every other bit clear.
///
/// # Errors
///
/// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if either endpoint is not
/// in `0..=63`, or with [`Error::InvalidRange`](crate::Error::InvalidRange) if `low > high`.
///
/// # Examples
///
/// ```
/// assert_eq!(flagword::table::build_range_mask(2, 5).unwrap(), 0b0011_1100);
/// assert_eq!(flagword::table::build_range_mask(0, 63).unwrap(), u64::MAX);
/// ```
pub fn build_range_mask(low: u32, high: u32) -> Result<u64> {
    check_range(low, high)?;
    let width = high - low + 1;
    let unshifted = if width == WIDTH {
        u64::MAX
    } else {
        BITS[width as usize] - 1
    };
    Ok(unshifted << low)
}

pub(crate) fn check_range(low: u32, high: u32) -> Result<()> {
    get_bit(low)?;
    get_bit(high)?;
    ensure!(low <= high, InvalidRangeSnafu { low, high });
    Ok(())
}

/// Returns the index of the only set bit in `mask`.
pub(crate) fn single_bit_index(mask: u64) -> Result<u32> {
    ensure!(mask.count_ones() == 1, NotSingleBitSnafu { mask });
    Ok(mask.trailing_zeros())
}
