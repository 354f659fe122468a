//! Partial copies of a word, and moving a named-bit registry between words.
//!
//! A full copy is plain [`Clone`]. Every copy owns its own registries, so later changes on either
//! side are never observed by the other.

use alloc::collections::BTreeMap;

use log::trace;
use snafu::ensure;

use crate::error::{RegistryNotEmptySnafu, Result};
use crate::FlagWord;

impl FlagWord {
    /// Copies the value and the named bits, leaving the named masks behind.
    pub fn clone_without_masks(&self) -> Self {
        Self {
            value: self.value,
            named_bits: self.named_bits.clone(),
            named_masks: BTreeMap::new(),
        }
    }

    /// Copies only the value.
    pub fn clone_value_only(&self) -> Self {
        Self::from_value(self.value)
    }

    /// Copies the named bits into a word whose bits are all clear.
    pub fn clone_with_bits_unset(&self) -> Self {
        Self {
            value: 0,
            ..self.clone_without_masks()
        }
    }

    /// Copies the named bits of `other` into this word.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RegistryNotEmpty`](crate::Error::RegistryNotEmpty) if this word already
    /// has named bits. Existing names are never overwritten.
    pub fn attach_names_from(&mut self, other: &FlagWord) -> Result<()> {
        ensure!(self.named_bits.is_empty(), RegistryNotEmptySnafu);
        self.named_bits = other.named_bits.clone();
        trace!("attached {} named bits", self.named_bits.len());
        Ok(())
    }
}
