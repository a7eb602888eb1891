use super::ids::AtomId;
use super::molecule::MoleculeGraph;
use serde::Serialize;
use std::fmt;

/// A bond whose endpoints belong to different groups, stored with the smaller ID first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BorderBond {
    pub a: AtomId,
    pub b: AtomId,
}

impl BorderBond {
    /// Creates a canonical border bond regardless of argument order.
    pub fn new(x: AtomId, y: AtomId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Returns `true` if `id` is either endpoint.
    pub fn contains(&self, id: AtomId) -> bool {
        self.a == id || self.b == id
    }
}

impl fmt::Display for BorderBond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// One functional group with every border bond cut and capped.
    Single,
    /// Two groups joined by one retained border bond, all other border bonds capped.
    Double,
    /// A double fragment whose retained border bond is treated as intra-group.
    Dimer,
}

impl FragmentKind {
    /// Name of the output directory conventionally used for this kind.
    pub fn directory_name(self) -> &'static str {
        match self {
            FragmentKind::Single => "single_fragments",
            FragmentKind::Double => "double_fragments",
            FragmentKind::Dimer => "dimers",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FragmentKind::Single => "single",
                FragmentKind::Double => "double",
                FragmentKind::Dimer => "dimer",
            }
        )
    }
}

/// Where in the source molecule a fragment was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentOrigin {
    /// A single group, identified by its disjoint-set root in the source molecule.
    Group(AtomId),
    /// The border bond retained by a double fragment or dimer.
    Border(BorderBond),
}

impl fmt::Display for FragmentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentOrigin::Group(root) => write!(f, "group:{}", root),
            FragmentOrigin::Border(bond) => write!(f, "bond:{}", bond),
        }
    }
}

/// A capped, densely renumbered sub-molecule.
///
/// `graph` holds atoms `1..=n`; `source_ids[i]` is the original ID of atom `i + 1`
/// (`None` for capping atoms). `groups` lists the disjoint-set groups of the fragment
/// in renumbered IDs: one group for single fragments and dimers, two for double fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub origin: FragmentOrigin,
    pub graph: MoleculeGraph,
    pub source_ids: Vec<Option<AtomId>>,
    pub groups: Vec<Vec<AtomId>>,
    pub charge: i32,
}

impl Fragment {
    /// Number of atoms, capping atoms included.
    pub fn atom_count(&self) -> usize {
        self.graph.len()
    }

    /// Number of atoms added by capping.
    pub fn synthetic_count(&self) -> usize {
        self.source_ids.iter().filter(|id| id.is_none()).count()
    }

    /// Maps a renumbered atom back to its ID in the source molecule.
    pub fn source_of(&self, id: AtomId) -> Option<AtomId> {
        id.index()
            .checked_sub(1)
            .and_then(|i| self.source_ids.get(i).copied().flatten())
    }
}
