//! Behavior tags — the unit of block/unblock granularity.

use std::fmt;

/// A classification label a capability carries.
///
/// Tags are small integers so applications can declare their own
/// categories as constants:
///
/// ```rust
/// use cap_core::Tag;
///
/// const MOVEMENT: Tag = Tag(1);
/// const JUMP:     Tag = Tag(2);
/// assert_ne!(MOVEMENT, JUMP);
/// assert_eq!(Tag::default(), Tag::NONE);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(pub u16);

impl Tag {
    /// The only built-in tag.  Every capability carries it unless it
    /// declares its own set.
    pub const NONE: Tag = Tag(0);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Tag::NONE {
            f.write_str("Tag(None)")
        } else {
            write!(f, "Tag({})", self.0)
        }
    }
}
