use super::atom::Atom;
use super::ids::AtomId;
use crate::engine::error::FragmentError;
use nalgebra::Point3;
use std::collections::BTreeMap;

/// The bonded-atom graph of one molecule.
///
/// Atoms are stored in an ordered map keyed by their [`AtomId`]; every relationship
/// between atoms (bonds, disjoint-set parents, DFS parents) is an ID into the same
/// map. IDs may be sparse. Iteration is always in ascending ID order, which makes
/// every algorithm built on top of the graph deterministic.
///
/// A graph is exclusively owned by the fragmentation call processing it. Cloning
/// produces an independent deep copy; the extractor clones before every destructive
/// operation so that sibling fragments never observe each other's cuts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoleculeGraph {
    atoms: BTreeMap<AtomId, Atom>,
}

impl MoleculeGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of atoms in the graph.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the graph has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns `true` if an atom with this ID is present.
    pub fn contains(&self, id: AtomId) -> bool {
        self.atoms.contains_key(&id)
    }

    /// Retrieves an atom by ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the atom to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    /// Retrieves a mutable reference to an atom by ID.
    ///
    /// # Return
    ///
    /// Returns `Some(&mut Atom)` if the atom exists, otherwise `None`.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(&id)
    }

    /// Retrieves an atom that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingAtom`] if no atom has this ID.
    pub fn get(&self, id: AtomId) -> Result<&Atom, FragmentError> {
        self.atom(id).ok_or(FragmentError::MissingAtom { id })
    }

    /// Mutable counterpart of [`MoleculeGraph::get`].
    pub fn get_mut(&mut self, id: AtomId) -> Result<&mut Atom, FragmentError> {
        self.atom_mut(id).ok_or(FragmentError::MissingAtom { id })
    }

    /// Returns the IDs of all atoms in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.keys().copied()
    }

    /// Returns an iterator over `(AtomId, &Atom)` pairs in ascending ID order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter().map(|(&id, atom)| (id, atom))
    }

    /// Mutable counterpart of [`MoleculeGraph::atoms_iter`].
    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut().map(|(&id, atom)| (id, atom))
    }

    /// Returns the largest atom ID present, if any.
    pub fn max_id(&self) -> Option<AtomId> {
        self.atoms.last_key_value().map(|(&id, _)| id)
    }

    /// Returns the ID the next synthetic atom receives: one past the largest existing ID.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::IdOverflow`] if the largest ID is already `u32::MAX`.
    pub fn next_id(&self) -> Result<AtomId, FragmentError> {
        match self.max_id() {
            None => Ok(AtomId(1)),
            Some(max) => max.checked_next().ok_or(FragmentError::IdOverflow { max }),
        }
    }

    /// Places an atom in the graph under `id`, returning any atom it replaced.
    pub(crate) fn insert(&mut self, id: AtomId, atom: Atom) -> Option<Atom> {
        self.atoms.insert(id, atom)
    }

    /// Adds a synthetic capping atom with the next free ID.
    ///
    /// # Arguments
    ///
    /// * `element` - Element symbol of the new atom.
    /// * `position` - Cartesian position in Angstroms.
    /// * `ff_type` - Force-field atom type written to output files.
    ///
    /// # Return
    ///
    /// Returns the ID assigned to the new atom.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::IdOverflow`] if no larger ID is available.
    pub fn add_synthetic_atom(
        &mut self,
        element: &str,
        position: Point3<f64>,
        ff_type: i32,
    ) -> Result<AtomId, FragmentError> {
        let id = self.next_id()?;
        self.insert(id, Atom::synthetic(id, element, position, ff_type));
        Ok(id)
    }

    /// Bonds two atoms. Adding an existing bond is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingAtom`] if either atom is absent.
    pub fn connect(&mut self, a: AtomId, b: AtomId) -> Result<(), FragmentError> {
        self.get(b)?;
        let first = self.get_mut(a)?;
        if first.is_bonded_to(b) {
            return Ok(());
        }
        first.bonded.push(b);
        self.get_mut(b)?.bonded.push(a);
        Ok(())
    }

    /// Removes each atom from the other's bond list, keeping the order of the remaining bonds.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingAtom`] if either atom is absent.
    pub fn disconnect(&mut self, a: AtomId, b: AtomId) -> Result<(), FragmentError> {
        self.get(b)?;
        self.get_mut(a)?.bonded.retain(|&n| n != b);
        self.get_mut(b)?.bonded.retain(|&n| n != a);
        Ok(())
    }

    /// Deletes every atom for which `keep` returns false.
    ///
    /// Bond lists of surviving atoms are left untouched: a survivor still bonded to a
    /// deleted atom is a dangling reference that renumbering reports as an error.
    pub fn retain_atoms(&mut self, mut keep: impl FnMut(AtomId, &Atom) -> bool) {
        self.atoms.retain(|&id, atom| keep(id, atom));
    }

    /// Returns every bond exactly once as `(a, b)` with `a < b`, in ascending order.
    pub fn bonds(&self) -> Vec<(AtomId, AtomId)> {
        let mut bonds: Vec<_> = self
            .atoms_iter()
            .flat_map(|(id, atom)| {
                atom.bonded
                    .iter()
                    .filter(move |&&other| id < other)
                    .map(move |&other| (id, other))
            })
            .collect();
        bonds.sort_unstable();
        bonds
    }
}
