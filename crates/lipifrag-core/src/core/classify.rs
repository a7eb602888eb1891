//! Functional-group classification and group extension.
//!
//! These passes build the final partition of a molecule on top of the
//! disjoint-set primitives in [`crate::core::partition`]. They expect
//! [`crate::core::rings::detect_bridges`] to have run so that `is_cyclic`
//! is populated.

use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::partition::union;
use crate::engine::error::FragmentError;
use tracing::debug;

/// Carbons with fewer bonded neighbours than this carry an unsaturation.
const SATURATED_CARBON_DEGREE: usize = 4;

/// Returns whether an atom seeds a functional group.
///
/// True for any element other than carbon or hydrogen, for carbon with fewer
/// than four bonded neighbours, and for any ring atom.
pub fn is_heteroatom_like(atom: &Atom) -> bool {
    let hetero_element = !atom.is_carbon() && !atom.is_hydrogen();
    let unsaturated_carbon = atom.is_carbon() && atom.degree() < SATURATED_CARBON_DEGREE;
    hetero_element || unsaturated_carbon || atom.cycle.is_cyclic
}

/// Groups every heteroatom-like atom with its non-hydrogen neighbours.
///
/// The seed atom and each such neighbour are flagged `in_functional_group`.
///
/// # Return
///
/// The number of heteroatom-like atoms found.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if a bond refers to an absent atom.
pub fn assign_functional_groups(graph: &mut MoleculeGraph) -> Result<usize, FragmentError> {
    let ids: Vec<AtomId> = graph.ids().collect();
    let mut heteroatoms = 0;

    for id in ids {
        let atom = graph.get(id)?;
        if !is_heteroatom_like(atom) {
            continue;
        }
        heteroatoms += 1;
        let neighbors = atom.bonded.clone();
        graph.get_mut(id)?.partition.in_functional_group = true;

        for neighbor in neighbors {
            let partner = graph.get_mut(neighbor)?;
            if partner.is_hydrogen() {
                continue;
            }
            partner.partition.in_functional_group = true;
            union(graph, id, neighbor)?;
        }
    }

    debug!(heteroatoms, "Functional groups assigned.");
    Ok(heteroatoms)
}

/// Chains carbons outside any functional group into alkane groups.
///
/// Each such carbon is unioned with every bonded carbon that is also outside a
/// functional group.
pub fn merge_alkanes(graph: &mut MoleculeGraph) -> Result<(), FragmentError> {
    let ids: Vec<AtomId> = graph.ids().collect();
    for id in ids {
        let atom = graph.get(id)?;
        if !atom.is_carbon() || atom.partition.in_functional_group {
            continue;
        }
        let neighbors = atom.bonded.clone();
        for neighbor in neighbors {
            let partner = graph.get(neighbor)?;
            if partner.is_carbon() && !partner.partition.in_functional_group {
                union(graph, id, neighbor)?;
            }
        }
    }
    Ok(())
}

/// Attaches every hydrogen to the group of its first bonded neighbour.
///
/// An unbonded hydrogen stays a singleton group.
pub fn merge_hydrogens(graph: &mut MoleculeGraph) -> Result<(), FragmentError> {
    let ids: Vec<AtomId> = graph.ids().collect();
    for id in ids {
        let atom = graph.get(id)?;
        if !atom.is_hydrogen() {
            continue;
        }
        match atom.bonded.first().copied() {
            Some(neighbor) => {
                if atom.degree() > 1 {
                    debug!(hydrogen = %id, bonds = atom.degree(), "Hydrogen has more than one bond; using the first.");
                }
                union(graph, id, neighbor)?;
            }
            None => debug!(hydrogen = %id, "Unbonded hydrogen left as its own group."),
        }
    }
    Ok(())
}
