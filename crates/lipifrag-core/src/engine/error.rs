use crate::core::models::ids::AtomId;
use thiserror::Error;

/// Fatal errors raised while fragmenting one molecule.
///
/// Every variant indicates that the molecule cannot be fragmented; callers
/// processing many molecules treat the failure as scoped to that molecule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// An atom ID was referenced (by a bond or a partition query) but is absent from the graph.
    /// This is a structural-consistency defect in graph construction or mutation.
    #[error("Atom {id} is referenced but missing from the molecule graph")]
    MissingAtom { id: AtomId },

    /// A capping atom could not be placed because the bond vector has zero length.
    #[error("Cannot cap atom {retained}: bonded atom {removed} occupies the same position")]
    DegenerateGeometry { retained: AtomId, removed: AtomId },

    /// A capping atom needs an ID above `max`, but `max` is already the largest representable ID.
    #[error("No atom ID is available above {max} for a capping atom")]
    IdOverflow { max: AtomId },
}
