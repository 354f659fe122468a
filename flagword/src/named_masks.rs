//! The named-mask registry.
//!
//! Masks are looked up leniently. A single-name operation reports whether the name was found, and
//! a bulk operation skips unknown names without comment. Only definition and
//! [`extract_masked_value`](FlagWord::extract_masked_value) are strict.

use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::vec::Vec;

use log::{debug, trace};
use snafu::{ensure, OptionExt};

use crate::bits::BitOp;
use crate::error::{DuplicateNameSnafu, Result, UnknownNameSnafu};
use crate::label::LabelSet;
use crate::FlagWord;

impl FlagWord {
    /// Binds `name` to an arbitrary mask. Zero and all-ones masks are allowed.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateName`](crate::Error::DuplicateName) if `name` already names a
    /// mask.
    pub fn define_mask(&mut self, name: &str, mask: u64) -> Result<()> {
        ensure!(
            !self.named_masks.contains_key(name),
            DuplicateNameSnafu { name }
        );
        self.named_masks.insert(name.to_string(), mask);
        trace!("defined mask {:?} as {:#x}", name, mask);
        Ok(())
    }

    /// Binds `name` to an arbitrary mask, or returns `false` if `name` already names a mask.
    pub fn try_define_mask(&mut self, name: &str, mask: u64) -> bool {
        match self.define_mask(name, mask) {
            Ok(()) => true,
            Err(e) => {
                debug!("declined to define mask {:?}: {}", name, e);
                false
            }
        }
    }

    /// Defines one mask per `(name, mask)` pair.
    ///
    /// Every name is checked, against the registry and against the rest of the batch, before any
    /// mask is defined.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateName`](crate::Error::DuplicateName) at the first name that is
    /// already taken. No mask from the batch is defined.
    pub fn define_masks<I, S>(&mut self, masks: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let masks: Vec<_> = masks.into_iter().collect();
        let mut seen = BTreeSet::new();
        for (name, _) in &masks {
            let name = name.as_ref();
            ensure!(
                !self.named_masks.contains_key(name) && seen.insert(name),
                DuplicateNameSnafu { name }
            );
        }
        for (name, mask) in &masks {
            self.define_mask(name.as_ref(), *mask)?;
        }
        Ok(())
    }

    /// Defines one mask per label of `L`, using each label's value as the mask.
    ///
    /// See [`define_masks`](Self::define_masks) for the failure cases.
    pub fn define_masks_from_label_set<L: LabelSet>(&mut self) -> Result<()> {
        self.define_masks(L::LABELS.iter().map(|label| label.to_pair()))
    }

    /// Returns the mask bound to `name`, if any.
    pub fn mask_for_name(&self, name: &str) -> Option<u64> {
        self.named_masks.get(name).copied()
    }

    /// Iterates over the named masks as `(name, mask)` pairs, ordered by name.
    pub fn named_masks(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.named_masks
            .iter()
            .map(|(name, &mask)| (name.as_str(), mask))
    }

    /// Sets every bit of the named mask. Returns whether `name` names a mask.
    pub fn apply_mask(&mut self, name: &str) -> bool {
        self.apply_named_mask(BitOp::Set, name)
    }

    /// Clears every bit of the named mask. Returns whether `name` names a mask.
    pub fn clear_masked_bits(&mut self, name: &str) -> bool {
        self.apply_named_mask(BitOp::Clear, name)
    }

    /// Flips every bit of the named mask. Returns whether `name` names a mask.
    pub fn toggle_by_mask(&mut self, name: &str) -> bool {
        self.apply_named_mask(BitOp::Toggle, name)
    }

    /// Returns a copy of this word, registries included, with the named mask set, or `None` if
    /// `name` does not name a mask.
    pub fn with_mask_applied(&self, name: &str) -> Option<Self> {
        self.with_named_mask(BitOp::Set, name)
    }

    /// Returns a copy of this word, registries included, with the named mask cleared, or `None`
    /// if `name` does not name a mask.
    pub fn with_mask_cleared(&self, name: &str) -> Option<Self> {
        self.with_named_mask(BitOp::Clear, name)
    }

    /// Returns a copy of this word, registries included, with the named mask flipped, or `None`
    /// if `name` does not name a mask.
    pub fn with_mask_toggled(&self, name: &str) -> Option<Self> {
        self.with_named_mask(BitOp::Toggle, name)
    }

    /// Sets every bit of each named mask, skipping names that do not name a mask.
    pub fn apply_masks<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_named_masks(BitOp::Set, names);
    }

    /// Clears every bit of each named mask, skipping names that do not name a mask.
    pub fn clear_masks<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_named_masks(BitOp::Clear, names);
    }

    /// Flips every bit of each named mask, skipping names that do not name a mask.
    pub fn toggle_masks<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.apply_named_masks(BitOp::Toggle, names);
    }

    /// Returns a copy of this word with every bit of each named mask set. Unknown names are
    /// skipped.
    pub fn with_masks_applied<I>(&self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut word = self.clone();
        word.apply_masks(names);
        word
    }

    /// Returns a copy of this word with every bit of each named mask cleared. Unknown names are
    /// skipped.
    pub fn with_masks_cleared<I>(&self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut word = self.clone();
        word.clear_masks(names);
        word
    }

    /// Returns a copy of this word with every bit of each named mask flipped. Unknown names are
    /// skipped.
    pub fn with_masks_toggled<I>(&self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut word = self.clone();
        word.toggle_masks(names);
        word
    }

    /// Returns `value & mask` for the named mask.
    ///
    /// # Errors
    ///
    /// Unlike the other single-name mask operations, this fails with
    /// [`Error::UnknownName`](crate::Error::UnknownName) if `name` does not name a mask.
    pub fn extract_masked_value(&self, name: &str) -> Result<u64> {
        let mask = self
            .named_masks
            .get(name)
            .context(UnknownNameSnafu { name })?;
        Ok(self.value & mask)
    }

    fn apply_named_mask(&mut self, op: BitOp, name: &str) -> bool {
        match self.mask_for_name(name) {
            Some(mask) => {
                self.value = op.apply(self.value, mask);
                true
            }
            None => {
                debug!("no mask named {:?}; {:?} not applied", name, op);
                false
            }
        }
    }

    fn with_named_mask(&self, op: BitOp, name: &str) -> Option<Self> {
        let mask = self.mask_for_name(name)?;
        let mut word = self.clone();
        word.value = op.apply(word.value, mask);
        Some(word)
    }

    fn apply_named_masks<I>(&mut self, op: BitOp, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.apply_named_mask(op, name.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, FlagWord};

    fn word_with_masks() -> FlagWord {
        let mut word = FlagWord::from_labels(["Lo"]).unwrap();
        word.define_mask("Low", 0x0f).unwrap();
        word.define_mask("High", 0xf0).unwrap();
        word.define_mask("Empty", 0).unwrap();
        word
    }

    #[test]
    fn test_define_mask_duplicates() {
        let mut word = FlagWord::new();
        word.define_mask("Dup", 0xff).unwrap();
        assert_eq!(
            word.define_mask("Dup", 0xf0).unwrap_err(),
            Error::DuplicateName { name: "Dup".into() },
        );
        assert!(!word.try_define_mask("Dup", 0xf0));
        assert_eq!(word.mask_for_name("Dup"), Some(0xff));

        // Mask values may repeat under different names.
        assert!(word.try_define_mask("Same", 0xff));
        assert!(word.try_define_mask("All", u64::MAX));
        assert_eq!(word.named_masks().count(), 3);
    }

    #[test]
    fn test_define_masks_batch_is_all_or_nothing() {
        let mut word = FlagWord::new();
        word.define_mask("Taken", 1).unwrap();
        let err = word
            .define_masks([("A", 0x1), ("Taken", 0x2), ("B", 0x3)])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateName { name: "Taken".into() });
        assert_eq!(word.mask_for_name("A"), None);

        let err = word.define_masks([("C", 0x1), ("C", 0x2)]).unwrap_err();
        assert_eq!(err, Error::DuplicateName { name: "C".into() });
        assert_eq!(word.mask_for_name("C"), None);

        word.define_masks([("A", 0x1), ("B", 0x3)]).unwrap();
        assert_eq!(
            word.named_masks().collect::<Vec<_>>(),
            [("A", 0x1), ("B", 0x3), ("Taken", 0x1)],
        );
    }

    #[test]
    fn test_single_name_ops_report_found() {
        let mut word = word_with_masks();
        assert!(word.apply_mask("Low"));
        assert_eq!(word.value(), 0x0f);
        assert!(word.toggle_by_mask("High"));
        assert_eq!(word.value(), 0xff);
        assert!(word.clear_masked_bits("Low"));
        assert_eq!(word.value(), 0xf0);
        assert!(word.apply_mask("Empty"));
        assert_eq!(word.value(), 0xf0);

        assert!(!word.apply_mask("Unknown"));
        assert!(!word.clear_masked_bits("Unknown"));
        assert!(!word.toggle_by_mask("Unknown"));
        assert_eq!(word.value(), 0xf0);
    }

    #[test]
    fn test_bulk_ops_skip_unknown_names() {
        let mut word = word_with_masks();
        word.apply_masks(["Unknown"]);
        assert_eq!(word.value(), 0);

        word.apply_masks(["Low", "Unknown", "High"]);
        assert_eq!(word.value(), 0xff);
        word.clear_masks(vec!["High".to_string(), "Nope".to_string()]);
        assert_eq!(word.value(), 0x0f);
        word.toggle_masks(["Low", "High"]);
        assert_eq!(word.value(), 0xf0);
    }

    #[test]
    fn test_pure_ops_leave_receiver_alone() {
        let word = word_with_masks();

        let applied = word.with_mask_applied("High").unwrap();
        assert_eq!(applied.value(), 0xf0);
        assert_eq!(applied.mask_for_name("Low"), Some(0x0f));
        assert_eq!(applied.bitmask_for_name("Lo"), Some(1));
        assert_eq!(word.value(), 0);

        let toggled = applied.with_mask_toggled("Low").unwrap();
        assert_eq!(toggled.value(), 0xff);
        let cleared = toggled.with_mask_cleared("High").unwrap();
        assert_eq!(cleared.value(), 0x0f);
        assert_eq!(toggled.value(), 0xff);

        assert!(word.with_mask_applied("Unknown").is_none());
        assert!(word.with_mask_cleared("Unknown").is_none());
        assert!(word.with_mask_toggled("Unknown").is_none());

        let all = word.with_masks_applied(["Low", "High", "Unknown"]);
        assert_eq!(all.value(), 0xff);
        assert_eq!(all.with_masks_cleared(["High"]).value(), 0x0f);
        assert_eq!(all.with_masks_toggled(["Low", "Nope"]).value(), 0xf0);
        assert_eq!(all.named_masks().count(), 3);
        assert_eq!(word.value(), 0);
    }

    #[test]
    fn test_extract_masked_value_is_strict() {
        let mut word = word_with_masks();
        word.set_value(0x5a);
        assert_eq!(word.extract_masked_value("Low").unwrap(), 0x0a);
        assert_eq!(word.extract_masked_value("High").unwrap(), 0x50);
        assert_eq!(word.extract_masked_value("Empty").unwrap(), 0);
        assert_eq!(
            word.extract_masked_value("Unknown").unwrap_err(),
            Error::UnknownName {
                name: "Unknown".into()
            },
        );
    }
}
