//! Weighted union-find over the atoms of a [`MoleculeGraph`].
//!
//! The disjoint-set state lives on the atoms themselves (`Atom::partition`), so a
//! cloned graph carries its partition with it. `find` compresses paths, `union`
//! attaches the smaller tree under the larger one.

use crate::core::models::atom::PartitionState;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::engine::error::FragmentError;
use std::collections::BTreeMap;

/// Resolves the root of the set containing `id`.
///
/// Every atom visited on the way to the root is repointed directly at it.
///
/// # Arguments
///
/// * `graph` - The molecule whose atoms carry the partition state.
/// * `id` - Any member of the set.
///
/// # Return
///
/// The root atom of the set.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if `id`, or any parent on its path, is absent.
pub fn find(graph: &mut MoleculeGraph, id: AtomId) -> Result<AtomId, FragmentError> {
    let mut root = id;
    let mut path = Vec::new();
    loop {
        let parent = graph.get(root)?.partition.parent;
        if parent == root {
            break;
        }
        path.push(root);
        root = parent;
    }
    for node in path {
        graph.get_mut(node)?.partition.parent = root;
    }
    Ok(root)
}

/// Merges the sets containing `a` and `b`. No-op if they already share a root.
///
/// # Arguments
///
/// * `graph` - The molecule whose atoms carry the partition state.
/// * `a`, `b` - Members of the two sets to merge.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if either atom is absent.
pub fn union(graph: &mut MoleculeGraph, a: AtomId, b: AtomId) -> Result<(), FragmentError> {
    let root_a = find(graph, a)?;
    let root_b = find(graph, b)?;
    if root_a == root_b {
        return Ok(());
    }

    let size_a = graph.get(root_a)?.partition.tree_size;
    let size_b = graph.get(root_b)?.partition.tree_size;
    let (child, parent) = if size_a < size_b {
        (root_a, root_b)
    } else {
        (root_b, root_a)
    };

    graph.get_mut(child)?.partition.parent = parent;
    graph.get_mut(parent)?.partition.tree_size = size_a + size_b;
    Ok(())
}

/// Returns whether `a` and `b` belong to the same set.
///
/// Takes `&mut` because resolving the roots compresses paths.
///
/// # Arguments
///
/// * `graph` - The molecule whose atoms carry the partition state.
/// * `a`, `b` - The atoms to compare.
///
/// # Return
///
/// `true` if both atoms resolve to the same root.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if either atom is absent.
pub fn connected(graph: &mut MoleculeGraph, a: AtomId, b: AtomId) -> Result<bool, FragmentError> {
    Ok(find(graph, a)? == find(graph, b)?)
}

/// Lists the members of every set, keyed by root, members in ascending ID order.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if a partition parent refers to an absent atom.
pub fn groups(graph: &mut MoleculeGraph) -> Result<BTreeMap<AtomId, Vec<AtomId>>, FragmentError> {
    let ids: Vec<AtomId> = graph.ids().collect();
    let mut groups: BTreeMap<AtomId, Vec<AtomId>> = BTreeMap::new();
    for id in ids {
        let root = find(graph, id)?;
        groups.entry(root).or_default().push(id);
    }
    Ok(groups)
}

/// Makes every atom a singleton set and clears functional-group membership.
pub fn reset_partition(graph: &mut MoleculeGraph) {
    for (id, atom) in graph.atoms_iter_mut() {
        atom.partition = PartitionState::singleton(id);
    }
}
