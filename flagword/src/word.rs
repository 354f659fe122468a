//! The [`FlagWord`] type, its constructors, and its conversions.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};
use core::hash::{Hash, Hasher};

use log::trace;
use num_traits::{AsPrimitive, Unsigned};
use paste::paste;
use snafu::ensure;

use crate::error::{IndexOutOfRangeSnafu, Result, TooManyLabelsSnafu};
use crate::label::LabelSet;
use crate::table::{MAX_INDEX, WIDTH};

/// A 64-bit value with optional registries of named bits and named masks.
///
/// # Registries
///
/// - Named bits bind a name to exactly one bit. No two names share a bit.
/// - Named masks bind a name to any 64-bit pattern. Masks may repeat or overlap.
///
/// Registries are only ever populated by explicit registration, by label-driven construction, or
/// by copying from another word. They are never derived from the value.
///
/// # Equality
///
/// Equality and hashing consider the value only. Two words that hold the same value compare equal
/// regardless of what either has registered.
///
/// # Lookup policies
///
/// The registries deliberately expose three different failure policies:
///
/// - Named-bit lookups and named-bit bulk operations are strict and fail with
///   [`Error::UnknownName`](crate::Error::UnknownName).
/// - Single-name mask operations such as [`apply_mask`](Self::apply_mask) report whether the name
///   was found and never fail. [`extract_masked_value`](Self::extract_masked_value) is the
///   exception and is strict.
/// - Bulk mask operations such as [`apply_masks`](Self::apply_masks) skip unknown names silently.
///
/// # Sharing
///
/// A word has no interior mutability. To hand a configured word to several threads, build one
/// template and give each consumer its own [`clone`](Clone::clone).
#[derive(Clone, Debug, Default)]
pub struct FlagWord {
    pub(crate) value: u64,
    pub(crate) named_bits: BTreeMap<String, u64>,
    pub(crate) named_masks: BTreeMap<String, u64>,
}

impl FlagWord {
    /// Creates a word with every bit clear and empty registries.
    pub const fn new() -> Self {
        Self::from_value(0)
    }

    /// Creates a word holding `value`, with empty registries.
    pub const fn from_value(value: u64) -> Self {
        Self {
            value,
            named_bits: BTreeMap::new(),
            named_masks: BTreeMap::new(),
        }
    }

    /// Creates a word from any unsigned primitive, zero-extending it to 64 bits.
    pub fn from_unsigned<T: Unsigned + Into<u64>>(value: T) -> Self {
        Self::from_value(value.into())
    }

    /// Creates a zero word whose named bits are taken from an ordered list of labels.
    ///
    /// Each label is bound to the bit matching its position in the list.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TooManyLabels`](crate::Error::TooManyLabels) if more than 64 labels are
    /// given, or with [`Error::DuplicateName`](crate::Error::DuplicateName) if a label repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flagword::FlagWord;
    /// let mut word = FlagWord::from_labels(["A", "B", "C"])?;
    /// word.set_names(["A", "C"])?;
    /// assert_eq!(word.value(), 0b101);
    /// # Ok::<(), flagword::Error>(())
    /// ```
    pub fn from_labels<I>(labels: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let labels: Vec<_> = labels.into_iter().collect();
        ensure!(
            labels.len() <= WIDTH as usize,
            TooManyLabelsSnafu {
                count: labels.len()
            }
        );

        let mut word = Self::new();
        for (index, label) in (0..).zip(&labels) {
            word.register_bit(label.as_ref(), index)?;
        }
        Ok(word)
    }

    /// Creates a zero word whose named bits are taken from labels carrying explicit bit indices.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TooManyLabels`](crate::Error::TooManyLabels) if more than 64 labels are
    /// given, with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if an index is not in
    /// `0..=63`, or with a name error if a name or index repeats.
    pub fn from_label_values<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let labels: Vec<_> = labels.into_iter().collect();
        ensure!(
            labels.len() <= WIDTH as usize,
            TooManyLabelsSnafu {
                count: labels.len()
            }
        );

        let mut word = Self::new();
        for (name, index) in &labels {
            ensure!(
                *index <= u64::from(MAX_INDEX),
                IndexOutOfRangeSnafu { index: *index }
            );
            word.register_bit(name.as_ref(), *index as u32)?;
        }
        Ok(word)
    }

    /// Creates a zero word whose named bits are the labels of `L`.
    ///
    /// See [`from_label_values`](Self::from_label_values) for the failure cases.
    pub fn from_label_set<L: LabelSet>() -> Result<Self> {
        let word = Self::from_label_values(L::LABELS.iter().map(|label| label.to_pair()))?;
        trace!(
            "built a word from {} labels of {}",
            L::LABELS.len(),
            core::any::type_name::<L>(),
        );
        Ok(word)
    }

    /// Returns the value.
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Replaces the value, leaving both registries untouched.
    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }

    /// Returns the value truncated to an unsigned primitive type.
    ///
    /// ```
    /// # use flagword::FlagWord;
    /// let word = FlagWord::from_value(0x1234_5678_9abc_def0);
    /// assert_eq!(word.truncate::<u16>(), 0xdef0);
    /// ```
    pub fn truncate<T>(&self) -> T
    where
        T: Unsigned + Copy + 'static,
        u64: AsPrimitive<T>,
    {
        self.value.as_()
    }
}

macro_rules! impl_narrow_conversions {
    ($($bits:literal),*) => {$(
        paste! {
            impl From<[<u $bits>]> for FlagWord {
                #[inline(always)]
                fn from(value: [<u $bits>]) -> Self {
                    Self::from_unsigned(value)
                }
            }

            impl FlagWord {
                #[doc = concat!("Returns the lowest ", stringify!($bits), " bits of the value.")]
                #[inline(always)]
                pub fn [<to_u $bits>](&self) -> [<u $bits>] {
                    self.truncate()
                }
            }
        }
    )*};
}
impl_narrow_conversions!(8, 16, 32);

impl From<u64> for FlagWord {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<FlagWord> for u64 {
    #[inline(always)]
    fn from(word: FlagWord) -> Self {
        word.value
    }
}

impl PartialEq for FlagWord {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for FlagWord {}

impl Hash for FlagWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

macro_rules! impl_value_fmt {
    ($($trait:ident),*) => {$(
        impl fmt::$trait for FlagWord {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                fmt::$trait::fmt(&self.value, f)
            }
        }
    )*};
}
impl_value_fmt!(Display, Binary, LowerHex, UpperHex, Octal);
