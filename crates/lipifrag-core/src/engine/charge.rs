use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::engine::error::FragmentError;

/// Bonded neighbours of a nitrogen carrying a positive formal charge.
const CHARGED_NITROGEN_DEGREE: usize = 4;

/// Formal charge contributed by a single atom.
///
/// A nitrogen with four bonded neighbours counts `+1`. A phosphorus bonded to at
/// least one terminal oxygen (an oxygen whose only neighbour is that phosphorus)
/// counts `-1`. Everything else is neutral.
///
/// Only four-coordinate nitrogen is charged. A tertiary amine with three bonded
/// neighbours is a neutral amine and counts `0`, even though "tertiary or
/// quaternary" nitrogen is sometimes taken to mean either is cationic.
///
/// # Arguments
///
/// * `graph` - The molecule holding the atom.
/// * `id` - The atom to evaluate.
///
/// # Return
///
/// `+1`, `-1` or `0`.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if `id` or one of its neighbours is absent.
pub fn atom_charge(graph: &MoleculeGraph, id: AtomId) -> Result<i32, FragmentError> {
    let atom = graph.get(id)?;
    if atom.is_element("N") && atom.degree() == CHARGED_NITROGEN_DEGREE {
        return Ok(1);
    }
    if atom.is_element("P") {
        for &partner in &atom.bonded {
            let oxygen = graph.get(partner)?;
            if oxygen.is_element("O") && oxygen.bonded.as_slice() == [id] {
                return Ok(-1);
            }
        }
    }
    Ok(0)
}

/// Net formal charge of a set of atoms.
pub fn group_charge(graph: &MoleculeGraph, members: &[AtomId]) -> Result<i32, FragmentError> {
    members
        .iter()
        .map(|&id| atom_charge(graph, id))
        .sum()
}

/// Net formal charge of a whole graph.
pub fn formal_charge(graph: &MoleculeGraph) -> Result<i32, FragmentError> {
    graph.ids().map(|id| atom_charge(graph, id)).sum()
}
