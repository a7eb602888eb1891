use crate::core::models::atom::CycleState;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::engine::error::FragmentError;
use std::collections::HashMap;

/// A graph relabelled onto the dense range `1..=n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Renumbered {
    pub graph: MoleculeGraph,
    /// Original ID of new atom `i + 1`; `None` for synthetic atoms.
    pub source_ids: Vec<Option<AtomId>>,
}

/// Relabels the atoms of `graph` densely from 1 in ascending original-ID order.
///
/// Bond lists and disjoint-set parents are rewritten through the same mapping;
/// bond-list order is kept. Per-pass cycle state is cleared.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if a bond or partition parent refers to
/// an atom that is not in `graph`.
pub fn renumber(graph: &MoleculeGraph) -> Result<Renumbered, FragmentError> {
    let mapping: HashMap<AtomId, AtomId> = graph
        .ids()
        .zip(1..)
        .map(|(old, new)| (old, AtomId(new)))
        .collect();
    let remap = |id: AtomId| mapping.get(&id).copied().ok_or(FragmentError::MissingAtom { id });

    let mut renumbered = MoleculeGraph::new();
    let mut source_ids = Vec::with_capacity(graph.len());

    for (old, atom) in graph.atoms_iter() {
        let new = remap(old)?;
        let mut copy = atom.clone();
        copy.bonded = atom
            .bonded
            .iter()
            .map(|&partner| remap(partner))
            .collect::<Result<_, _>>()?;
        copy.partition.parent = remap(atom.partition.parent)?;
        copy.cycle = CycleState::default();

        source_ids.push((!atom.synthetic).then_some(old));
        renumbered.insert(new, copy);
    }

    Ok(Renumbered {
        graph: renumbered,
        source_ids,
    })
}
