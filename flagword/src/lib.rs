#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod bits;
mod copies;
mod error;
mod label;
mod named_bits;
mod named_masks;
pub mod prelude;
mod query;
mod range;
pub mod table;
mod word;

pub use error::{Error, ErrorKind, Result};
pub use label::{Label, LabelSet};
pub use query::SetBits;
pub use word::FlagWord;

// For macro access via `$crate`.
#[cfg(feature = "macros")]
#[doc(hidden)]
pub mod __private {
    pub use flagword_macros::label_set;
}

/// Declares a fieldless enum and implements [`LabelSet`] for it.
///
/// Each variant is labelled with its own identifier, or with the string given in a
/// `#[label("...")]` attribute. A label's value is the variant's discriminant, so explicit
/// discriminants choose bit indices when the set builds a word and masks when it defines masks.
/// A `#[repr]` attribute on the enum is passed through; a wide repr such as `u64` is needed for
/// mask values above `isize::MAX`.
///
/// # Examples
///
/// ```
/// use flagword::prelude::*;
///
/// label_set! {
///     /// Status register flags.
///     #[derive(Debug)]
///     pub enum Status {
///         Carry,
///         Zero,
///         #[label("IRQ")]
///         InterruptDisable = 2,
///         Negative = 7,
///     }
/// }
///
/// let mut word = FlagWord::from_label_set::<Status>()?;
/// word.set_by_name(Status::Negative.name(), true)?;
/// word.set_by_name("IRQ", true)?;
/// assert_eq!(word.value(), 0b1000_0100);
/// # Ok::<(), flagword::Error>(())
/// ```
///
/// Only fieldless enums are accepted.
///
/// ```compile_fail
/// flagword::label_set! {
///     pub enum Payload {
///         Empty,
///         Byte(u8),
///     }
/// }
/// ```
///
/// Labels must be unique.
///
/// ```compile_fail
/// flagword::label_set! {
///     pub enum Twice {
///         #[label("Same")]
///         First,
///         #[label("Same")]
///         Second,
///     }
/// }
/// ```
///
/// ```compile_fail
/// flagword::label_set! {
///     pub struct NotAnEnum {
///         bits: u64,
///     }
/// }
/// ```
#[cfg(feature = "macros")]
#[macro_export]
macro_rules! label_set {
    ($($tt:tt)*) => {
        $crate::__private::label_set! { ($crate, $($tt)*) }
    };
}
