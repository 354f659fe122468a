//! The error type shared by every fallible [`FlagWord`](crate::FlagWord) operation.

use alloc::string::String;

use snafu::Snafu;

/// The broad category of an [`Error`].
///
/// Every error variant belongs to exactly one kind. Callers that only care about the category can
/// match on [`Error::kind`] instead of the individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A bit index or range endpoint was outside `0..=63`, or a range had `low > high`.
    Range,
    /// A name was missing where one was required, or a strict registration hit a name or bit
    /// that was already taken.
    Name,
    /// A mask that had to select exactly one bit had some other population count.
    Shape,
    /// More labels were supplied than a 64-bit word has bits.
    Arity,
}

/// The error type returned by strict [`FlagWord`](crate::FlagWord) operations.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// A bit index was outside `0..=63`.
    #[snafu(display("bit index {} is outside 0..=63", index))]
    IndexOutOfRange {
        /// The rejected index.
        index: u64,
    },

    /// A range had its endpoints reversed.
    #[snafu(display("range {}..={} has low > high", low, high))]
    InvalidRange {
        /// The low endpoint.
        low: u32,
        /// The high endpoint.
        high: u32,
    },

    /// A name was looked up but is not registered.
    #[snafu(display("no entry is registered under the name {:?}", name))]
    UnknownName {
        /// The name that was looked up.
        name: String,
    },

    /// A name was registered twice.
    #[snafu(display("the name {:?} is already registered", name))]
    DuplicateName {
        /// The name that was already taken.
        name: String,
    },

    /// A bit was registered under a second name.
    #[snafu(display("bit {} is already registered as {:?}", index, existing))]
    BitAlreadyNamed {
        /// The index of the contested bit.
        index: u32,
        /// The name the bit is already bound to.
        existing: String,
    },

    /// Named bits were attached to a word that already has its own.
    #[snafu(display("the word already has named bits"))]
    RegistryNotEmpty,

    /// A mask that must have exactly one bit set did not.
    #[snafu(display("mask {:#x} does not have exactly one bit set", mask))]
    NotSingleBit {
        /// The rejected mask.
        mask: u64,
    },

    /// Too many labels were supplied at construction.
    #[snafu(display("{} labels do not fit in a 64-bit word", count))]
    TooManyLabels {
        /// The number of labels supplied.
        count: usize,
    },
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } | Self::InvalidRange { .. } => ErrorKind::Range,
            Self::UnknownName { .. }
            | Self::DuplicateName { .. }
            | Self::BitAlreadyNamed { .. }
            | Self::RegistryNotEmpty => ErrorKind::Name,
            Self::NotSingleBit { .. } => ErrorKind::Shape,
            Self::TooManyLabels { .. } => ErrorKind::Arity,
        }
    }
}

/// A [`Result`](core::result::Result) specialized to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
