use serde::Serialize;
use std::fmt;

/// Identifier of an atom within one molecule.
///
/// IDs are positive integers, unique within a `MoleculeGraph`. They are either
/// taken from the input file or allocated for capping atoms as `max + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AtomId(pub u32);

impl AtomId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The following ID, or `None` past `u32::MAX`.
    #[inline]
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(AtomId)
    }
}

impl From<u32> for AtomId {
    fn from(value: u32) -> Self {
        AtomId(value)
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
