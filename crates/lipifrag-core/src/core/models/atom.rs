use super::ids::AtomId;
use nalgebra::Point3;

/// Force-field type code assigned to synthetic capping carbons.
pub const CAP_CARBON_TYPE: i32 = 1;
/// Force-field type code assigned to synthetic capping hydrogens.
pub const CAP_HYDROGEN_TYPE: i32 = 5;

/// Disjoint-set bookkeeping carried by every atom.
///
/// `parent == self` marks the root of a tree. `tree_size` is only meaningful
/// at a root, where it equals the number of atoms resolving to that root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionState {
    pub parent: AtomId,
    pub tree_size: usize,
    pub in_functional_group: bool,
}

impl PartitionState {
    pub fn singleton(id: AtomId) -> Self {
        Self {
            parent: id,
            tree_size: 1,
            in_functional_group: false,
        }
    }
}

/// Per-atom state of one bridge-detection pass.
///
/// Valid only during and after a single pass over one molecule; the pass
/// resets it before traversing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleState {
    pub visited: bool,
    pub discovery_time: usize,
    pub low_link: usize,
    pub dfs_parent: Option<AtomId>,
    pub is_cyclic: bool,
}

/// An atom of a molecule graph.
///
/// Bonds are stored as a list of neighbour IDs. The list is symmetric across
/// the graph (if A lists B, B lists A) and its order is preserved through
/// cutting and renumbering so output is reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol as given by the input (e.g. "C", "H", "N", "O", "P").
    pub element: String,
    /// Force-field type code, passed through unchanged.
    pub ff_type: i32,
    /// Cartesian position in Angstroms.
    pub position: Point3<f64>,
    /// IDs of bonded atoms.
    pub bonded: Vec<AtomId>,
    pub partition: PartitionState,
    pub cycle: CycleState,
    /// True for capping atoms created during fragment extraction.
    pub synthetic: bool,
}

impl Atom {
    /// Creates an unbonded atom that forms its own singleton group.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom's own ID, used as its initial partition root.
    /// * `element` - Element symbol; surrounding whitespace is trimmed.
    /// * `position` - Cartesian coordinates in Angstroms.
    /// * `ff_type` - Force-field type code.
    pub fn new(id: AtomId, element: &str, position: Point3<f64>, ff_type: i32) -> Self {
        Self {
            element: element.trim().to_string(),
            ff_type,
            position,
            bonded: Vec::new(),
            partition: PartitionState::singleton(id),
            cycle: CycleState::default(),
            synthetic: false,
        }
    }

    /// Creates a capping atom. Capping atoms always count as part of a functional group.
    pub fn synthetic(id: AtomId, element: &str, position: Point3<f64>, ff_type: i32) -> Self {
        let mut atom = Self::new(id, element, position, ff_type);
        atom.partition.in_functional_group = true;
        atom.synthetic = true;
        atom
    }

    /// Returns `true` if the element symbol matches `symbol` exactly (case-sensitive).
    #[inline]
    pub fn is_element(&self, symbol: &str) -> bool {
        self.element == symbol
    }

    #[inline]
    pub fn is_carbon(&self) -> bool {
        self.is_element("C")
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.is_element("H")
    }

    /// Number of bonded neighbours.
    #[inline]
    pub fn degree(&self) -> usize {
        self.bonded.len()
    }

    /// Returns `true` if `other` appears in this atom's bond list.
    pub fn is_bonded_to(&self, other: AtomId) -> bool {
        self.bonded.contains(&other)
    }
}
