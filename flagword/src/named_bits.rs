//! The named-bit registry.
//!
//! Every lookup here is strict: an unknown name is an error. The try-variants of registration are
//! the only calls that report a conflict without failing.

use alloc::string::ToString;
use alloc::vec::Vec;

use log::{debug, trace};
use snafu::{ensure, OptionExt};

use crate::bits::BitOp;
use crate::error::{
    BitAlreadyNamedSnafu, DuplicateNameSnafu, Error, Result, UnknownNameSnafu,
};
use crate::table::{self, single_bit_index};
use crate::FlagWord;

impl FlagWord {
    /// Binds `name` to the bit at `index`, or returns `false` if the name or the bit is already
    /// bound.
    ///
    /// # Errors
    ///
    /// The index is checked before the registry, so an `index` outside `0..=63` still fails with
    /// [`Error::IndexOutOfRange`].
    pub fn try_register_bit(&mut self, name: &str, index: u32) -> Result<bool> {
        let mask = table::get_bit(index)?;
        Ok(self.try_insert_named_bit(name, mask))
    }

    /// Binds `name` to the bit selected by a single-bit mask, or returns `false` if the name or the
    /// bit is already bound.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotSingleBit`] unless exactly one bit of `mask` is set.
    pub fn try_register_bit_mask(&mut self, name: &str, mask: u64) -> Result<bool> {
        single_bit_index(mask)?;
        Ok(self.try_insert_named_bit(name, mask))
    }

    /// Binds `name` to the bit at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] for a bad index, with [`Error::DuplicateName`] if
    /// `name` is taken, or with [`Error::BitAlreadyNamed`] if the bit already has a name.
    pub fn register_bit(&mut self, name: &str, index: u32) -> Result<()> {
        let mask = table::get_bit(index)?;
        self.insert_named_bit(name, mask)
    }

    /// Binds `name` to the bit selected by a single-bit mask.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotSingleBit`] for a bad mask, and otherwise as
    /// [`register_bit`](Self::register_bit).
    pub fn register_bit_mask(&mut self, name: &str, mask: u64) -> Result<()> {
        single_bit_index(mask)?;
        self.insert_named_bit(name, mask)
    }

    /// Returns whether the named bit is set.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownName`] if `name` is not a named bit.
    pub fn get_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.value & self.named_bit(name)? != 0)
    }

    /// Sets or clears the named bit.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownName`] if `name` is not a named bit.
    pub fn set_by_name(&mut self, name: &str, on: bool) -> Result<()> {
        let op = if on { BitOp::Set } else { BitOp::Clear };
        self.value = op.apply(self.value, self.named_bit(name)?);
        Ok(())
    }

    /// Flips the named bit.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownName`] if `name` is not a named bit.
    pub fn toggle_by_name(&mut self, name: &str) -> Result<()> {
        self.value = BitOp::Toggle.apply(self.value, self.named_bit(name)?);
        Ok(())
    }

    /// Returns the single-bit mask bound to `name`, if any.
    pub fn bitmask_for_name(&self, name: &str) -> Option<u64> {
        self.named_bits.get(name).copied()
    }

    /// Returns the name bound to the bit at `index`, if any.
    ///
    /// An index outside `0..=63` has no name.
    pub fn reverse_lookup(&self, index: u32) -> Option<&str> {
        let mask = table::get_bit(index).ok()?;
        self.name_of_bit(mask)
    }

    /// Sets each named bit.
    ///
    /// Every name is resolved before any bit changes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownName`] at the first name that is not a named bit. The word is
    /// left unchanged.
    pub fn set_names<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_names(BitOp::Set, names)
    }

    /// Clears each named bit. See [`set_names`](Self::set_names).
    pub fn clear_names<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_names(BitOp::Clear, names)
    }

    /// Flips each named bit. See [`set_names`](Self::set_names).
    ///
    /// A name that appears twice is flipped twice.
    pub fn toggle_names<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_names(BitOp::Toggle, names)
    }

    /// Iterates over the named bits as `(name, index)` pairs, ordered by name.
    pub fn named_bits(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.named_bits
            .iter()
            .map(|(name, mask)| (name.as_str(), mask.trailing_zeros()))
    }

    /// Iterates over the names of the named bits that are currently set, ordered by name.
    pub fn set_named_bits(&self) -> impl Iterator<Item = &str> + '_ {
        self.named_bits
            .iter()
            .filter(|(_, &mask)| self.value & mask != 0)
            .map(|(name, _)| name.as_str())
    }

    fn named_bit(&self, name: &str) -> Result<u64> {
        self.named_bits
            .get(name)
            .copied()
            .context(UnknownNameSnafu { name })
    }

    fn name_of_bit(&self, mask: u64) -> Option<&str> {
        self.named_bits
            .iter()
            .find(|(_, &bound)| bound == mask)
            .map(|(name, _)| name.as_str())
    }

    fn check_bit_available(&self, name: &str, mask: u64) -> Result<()> {
        ensure!(
            !self.named_bits.contains_key(name),
            DuplicateNameSnafu { name }
        );
        if let Some(existing) = self.name_of_bit(mask) {
            return BitAlreadyNamedSnafu {
                index: mask.trailing_zeros(),
                existing,
            }
            .fail();
        }
        Ok(())
    }

    fn insert_named_bit(&mut self, name: &str, mask: u64) -> Result<()> {
        self.check_bit_available(name, mask)?;
        self.named_bits.insert(name.to_string(), mask);
        trace!("registered bit {} as {:?}", mask.trailing_zeros(), name);
        Ok(())
    }

    fn try_insert_named_bit(&mut self, name: &str, mask: u64) -> bool {
        match self.insert_named_bit(name, mask) {
            Ok(()) => true,
            Err(e) => {
                debug!("declined to register {:?}: {}", name, e);
                false
            }
        }
    }

    fn apply_names<I>(&mut self, op: BitOp, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let masks = names
            .into_iter()
            .map(|name| self.named_bit(name.as_ref()))
            .collect::<Result<Vec<_>, Error>>()?;
        self.apply_each(op, masks);
        Ok(())
    }
}
