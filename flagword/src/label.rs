//! Label descriptors: the boundary between named enumerations and [`FlagWord`](crate::FlagWord)
//! registries.

/// A name paired with an explicit value.
///
/// When a word is built from labels the value is a bit index. When masks are defined from labels
/// the value is the mask itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    /// The registry name.
    pub name: &'static str,
    /// The bit index or mask, depending on how the label is consumed.
    pub value: u64,
}

impl Label {
    /// Creates a label.
    pub const fn new(name: &'static str, value: u64) -> Self {
        Self { name, value }
    }

    /// Returns the label as a `(name, value)` pair.
    pub const fn to_pair(self) -> (&'static str, u64) {
        (self.name, self.value)
    }
}

/// An enumeration whose variants each carry a [`Label`].
///
/// Usually implemented by [`label_set!`](crate::label_set), which takes each label's value from
/// the variant's discriminant.
pub trait LabelSet: Sized {
    /// Every label of the set, in declaration order.
    const LABELS: &'static [Label];

    /// Returns this variant's label.
    fn label(self) -> Label;

    /// Returns this variant's name.
    fn name(self) -> &'static str {
        self.label().name
    }
}
