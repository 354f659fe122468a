//! Convenience re-exports.

#[doc(no_inline)]
pub use crate::{Error, ErrorKind, FlagWord, Label, LabelSet};

#[doc(no_inline)]
#[cfg(feature = "macros")]
pub use crate::label_set;
