use super::atom::Atom;
use super::ids::AtomId;
use super::molecule::MoleculeGraph;
use nalgebra::Point3;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Atom IDs must be positive integers (found 0)")]
    ZeroId,
    #[error("Duplicate atom ID: {0}")]
    DuplicateAtom(AtomId),
    #[error("Atom {atom} is bonded to undeclared atom {partner}")]
    UnknownBondPartner { atom: AtomId, partner: AtomId },
    #[error("Atom {0} is bonded to itself")]
    SelfBond(AtomId),
}

#[derive(Debug, Clone)]
struct PendingAtom {
    id: AtomId,
    element: String,
    position: Point3<f64>,
    ff_type: i32,
    bonded: Vec<AtomId>,
}

/// Constructs a validated [`MoleculeGraph`].
///
/// Atoms may declare their bond lists directly (as atom files do) or bonds may be
/// added pairwise. `build` checks that IDs are positive and unique, that every bond
/// partner exists and that no atom bonds to itself, then symmetrizes the bond lists.
/// Declared list order is kept; reverse entries missing from a partner's list are
/// appended to it.
#[derive(Debug, Clone, Default)]
pub struct MoleculeBuilder {
    atoms: Vec<PendingAtom>,
    bonds: Vec<(AtomId, AtomId)>,
}

impl MoleculeBuilder {
    /// Starts an empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an atom with no bonds of its own; bonds may be added with [`Self::bond`].
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID; must be positive and unique within the molecule.
    /// * `element` - Element symbol, e.g. `"C"`.
    /// * `position` - Cartesian coordinates in Angstroms.
    /// * `ff_type` - Force-field type code, carried through unchanged.
    pub fn atom(self, id: u32, element: &str, position: [f64; 3], ff_type: i32) -> Self {
        self.atom_with_bonds(id, element, position, ff_type, &[])
    }

    /// Declares an atom together with its bonded partners, in file order.
    ///
    /// Repeated partners are kept once. Partners need not be declared yet; they are
    /// checked by [`Self::build`].
    pub fn atom_with_bonds(
        mut self,
        id: u32,
        element: &str,
        position: [f64; 3],
        ff_type: i32,
        bonded: &[u32],
    ) -> Self {
        self.atoms.push(PendingAtom {
            id: AtomId(id),
            element: element.to_string(),
            position: Point3::from(position),
            ff_type,
            bonded: bonded.iter().copied().map(AtomId).collect(),
        });
        self
    }

    /// Adds a bond between two atoms declared anywhere in the builder.
    pub fn bond(mut self, a: u32, b: u32) -> Self {
        self.bonds.push((AtomId(a), AtomId(b)));
        self
    }

    /// Validates the declared atoms and bonds and assembles the graph.
    ///
    /// # Return
    ///
    /// A [`MoleculeGraph`] whose bond lists are symmetric and in which every atom is
    /// its own singleton group.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] for a zero ID, a duplicate ID, a self bond or a bond
    /// to an atom that was never declared.
    pub fn build(self) -> Result<MoleculeGraph, BuildError> {
        let mut graph = MoleculeGraph::new();
        let mut declared = Vec::with_capacity(self.atoms.len());

        for pending in self.atoms {
            if pending.id.0 == 0 {
                return Err(BuildError::ZeroId);
            }
            let mut atom = Atom::new(pending.id, &pending.element, pending.position, pending.ff_type);
            let mut seen = HashSet::new();
            for partner in pending.bonded {
                if partner == pending.id {
                    return Err(BuildError::SelfBond(partner));
                }
                if seen.insert(partner) {
                    atom.bonded.push(partner);
                    declared.push((pending.id, partner));
                }
            }
            if graph.insert(pending.id, atom).is_some() {
                return Err(BuildError::DuplicateAtom(pending.id));
            }
        }

        for (a, b) in declared.into_iter().chain(self.bonds) {
            if a == b {
                return Err(BuildError::SelfBond(a));
            }
            for (atom, partner) in [(a, b), (b, a)] {
                let Some(entry) = graph.atom_mut(atom) else {
                    return Err(BuildError::UnknownBondPartner {
                        atom: partner,
                        partner: atom,
                    });
                };
                if !entry.bonded.contains(&partner) {
                    entry.bonded.push(partner);
                }
            }
        }

        Ok(graph)
    }
}
