use super::charge::formal_charge;
use super::config::CappingConfig;
use super::error::FragmentError;
use super::renumber::renumber;
use crate::core::geometry::{cap_position, methyl_hydrogens};
use crate::core::models::atom::{CAP_CARBON_TYPE, CAP_HYDROGEN_TYPE};
use crate::core::models::fragment::{BorderBond, Fragment, FragmentKind, FragmentOrigin};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::partition::{find, groups, union};
use std::collections::HashSet;
use tracing::trace;

/// Severs `bond` and caps both freed ends with a methyl group.
///
/// Each cap is a carbon placed on the line from the retained atom towards the
/// atom it lost, plus three tetrahedral hydrogens unless disabled. Cap atoms take
/// fresh IDs above the current maximum (carbon first, then its hydrogens) and
/// join the retained atom's group.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if either endpoint is absent,
/// [`FragmentError::DegenerateGeometry`] if the endpoints share a position, and
/// [`FragmentError::IdOverflow`] if no ID is left for a cap atom.
pub fn cut_and_cap(
    graph: &mut MoleculeGraph,
    bond: BorderBond,
    capping: &CappingConfig,
) -> Result<(), FragmentError> {
    graph.disconnect(bond.a, bond.b)?;
    cap(graph, bond.a, bond.b, capping)?;
    cap(graph, bond.b, bond.a, capping)?;
    Ok(())
}

fn cap(
    graph: &mut MoleculeGraph,
    retained: AtomId,
    removed: AtomId,
    capping: &CappingConfig,
) -> Result<AtomId, FragmentError> {
    let retained_pos = graph.get(retained)?.position;
    let removed_pos = graph.get(removed)?.position;
    let degenerate = FragmentError::DegenerateGeometry { retained, removed };

    let carbon_pos = cap_position(&retained_pos, &removed_pos, capping.carbon_bond_length)
        .ok_or_else(|| degenerate.clone())?;
    let hydrogen_pos = if capping.add_cap_hydrogens {
        Some(
            methyl_hydrogens(&carbon_pos, &retained_pos, capping.hydrogen_bond_length)
                .ok_or(degenerate)?,
        )
    } else {
        None
    };

    let carbon = graph.add_synthetic_atom("C", carbon_pos, CAP_CARBON_TYPE)?;
    graph.connect(retained, carbon)?;
    union(graph, retained, carbon)?;

    for position in hydrogen_pos.into_iter().flatten() {
        let hydrogen = graph.add_synthetic_atom("H", position, CAP_HYDROGEN_TYPE)?;
        graph.connect(carbon, hydrogen)?;
        union(graph, carbon, hydrogen)?;
    }

    trace!(retained = %retained, removed = %removed, cap = %carbon, "Capped cut bond.");
    Ok(carbon)
}

/// Relabels an extracted piece and packages it as a [`Fragment`].
fn finish(
    piece: &MoleculeGraph,
    kind: FragmentKind,
    origin: FragmentOrigin,
) -> Result<Fragment, FragmentError> {
    let mut renumbered = renumber(piece)?;
    let mut members: Vec<Vec<AtomId>> = groups(&mut renumbered.graph)?.into_values().collect();
    members.sort();
    let charge = formal_charge(&renumbered.graph)?;

    Ok(Fragment {
        kind,
        origin,
        graph: renumbered.graph,
        source_ids: renumbered.source_ids,
        groups: members,
        charge,
    })
}

/// Extracts one capped fragment per group.
///
/// Every border bond is cut and capped on a private copy of `graph`, then each
/// group is isolated in turn. Fragments are ordered by the smallest atom ID of
/// their group.
pub fn single_fragments(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    capping: &CappingConfig,
) -> Result<Vec<Fragment>, FragmentError> {
    let mut cut = graph.clone();
    for &bond in border {
        cut_and_cap(&mut cut, bond, capping)?;
    }

    let mut by_group: Vec<(AtomId, Vec<AtomId>)> = groups(&mut cut)?.into_iter().collect();
    by_group.sort_by_key(|(_, members)| members.first().copied());

    by_group
        .into_iter()
        .map(|(root, members)| {
            let keep: HashSet<AtomId> = members.into_iter().collect();
            let mut piece = cut.clone();
            piece.retain_atoms(|id, _| keep.contains(&id));
            finish(&piece, FragmentKind::Single, FragmentOrigin::Group(root))
        })
        .collect()
}

fn paired_fragment(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    kept: BorderBond,
    kind: FragmentKind,
    capping: &CappingConfig,
) -> Result<Fragment, FragmentError> {
    let mut piece = graph.clone();
    for &bond in border.iter().filter(|&&bond| bond != kept) {
        cut_and_cap(&mut piece, bond, capping)?;
    }

    let root_a = find(&mut piece, kept.a)?;
    let root_b = find(&mut piece, kept.b)?;
    let mut keep = HashSet::new();
    for id in piece.ids().collect::<Vec<_>>() {
        let root = find(&mut piece, id)?;
        if root == root_a || root == root_b {
            keep.insert(id);
        }
    }
    piece.retain_atoms(|id, _| keep.contains(&id));

    if kind == FragmentKind::Dimer {
        union(&mut piece, kept.a, kept.b)?;
    }
    finish(&piece, kind, FragmentOrigin::Border(kept))
}

/// Extracts the double fragment that keeps `kept` intact.
///
/// Every other bond in `border` is cut and capped on a private copy of `graph`; the
/// two groups joined by the kept bond are isolated.
pub fn double_fragment(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    kept: BorderBond,
    capping: &CappingConfig,
) -> Result<Fragment, FragmentError> {
    paired_fragment(graph, border, kept, FragmentKind::Double, capping)
}

/// Like [`double_fragment`], with the two groups merged into one.
pub fn dimer(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    kept: BorderBond,
    capping: &CappingConfig,
) -> Result<Fragment, FragmentError> {
    paired_fragment(graph, border, kept, FragmentKind::Dimer, capping)
}

/// One double fragment per border bond, in border-bond order.
pub fn double_fragments(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    capping: &CappingConfig,
) -> Result<Vec<Fragment>, FragmentError> {
    border
        .iter()
        .map(|&bond| double_fragment(graph, border, bond, capping))
        .collect()
}

/// One dimer per border bond, in border-bond order.
pub fn dimers(
    graph: &MoleculeGraph,
    border: &[BorderBond],
    capping: &CappingConfig,
) -> Result<Vec<Fragment>, FragmentError> {
    border
        .iter()
        .map(|&bond| dimer(graph, border, bond, capping))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::border::find_border_bonds;
    use crate::core::classify::{assign_functional_groups, merge_alkanes, merge_hydrogens};
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::rings::detect_bridges;

    /// Propanal-like chain: carbonyl C1(=O2) bonded to C3, C3-C4 saturated,
    /// with hydrogens completing the valences.
    fn grouped_aldehyde() -> (MoleculeGraph, Vec<BorderBond>) {
        let mut graph = MoleculeBuilder::new()
            .atom(1, "C", [0.0, 0.0, 0.0], 2)
            .atom(2, "O", [0.0, 1.2, 0.0], 3)
            .atom(3, "C", [1.5, -0.5, 0.0], 1)
            .atom(4, "C", [3.0, 0.0, 0.0], 1)
            .atom(5, "H", [-0.9, -0.5, 0.0], 5)
            .atom(6, "H", [1.5, -1.5, 0.5], 5)
            .atom(7, "H", [1.5, -1.0, -1.0], 5)
            .atom(8, "H", [3.0, 1.0, 0.5], 5)
            .atom(9, "H", [3.5, -0.8, 0.5], 5)
            .atom(10, "H", [3.5, 0.4, -0.9], 5)
            .bond(1, 2)
            .bond(1, 3)
            .bond(1, 5)
            .bond(3, 4)
            .bond(3, 6)
            .bond(3, 7)
            .bond(4, 8)
            .bond(4, 9)
            .bond(4, 10)
            .build()
            .unwrap();
        detect_bridges(&mut graph).unwrap();
        assign_functional_groups(&mut graph).unwrap();
        merge_alkanes(&mut graph).unwrap();
        merge_hydrogens(&mut graph).unwrap();
        let border = find_border_bonds(&mut graph).unwrap();
        (graph, border)
    }

    fn assert_no_dangling_bonds(fragment: &Fragment) {
        for (id, atom) in fragment.graph.atoms_iter() {
            for partner in &atom.bonded {
                let other = fragment.graph.atom(*partner).expect("dangling bond");
                assert!(other.is_bonded_to(id));
            }
        }
    }

    #[test]
    fn cut_and_cap_adds_methyl_groups_on_both_sides() {
        let (mut graph, border) = grouped_aldehyde();
        assert_eq!(border, vec![BorderBond::new(AtomId(3), AtomId(4))]);

        cut_and_cap(&mut graph, border[0], &CappingConfig::default()).unwrap();
        assert_eq!(graph.len(), 18);
        assert!(!graph.atom(AtomId(3)).unwrap().is_bonded_to(AtomId(4)));

        // Cap on atom 3 gets IDs 11..=14, cap on atom 4 gets 15..=18.
        let cap3 = graph.atom(AtomId(11)).unwrap();
        assert!(cap3.is_carbon() && cap3.synthetic);
        assert_eq!(cap3.ff_type, CAP_CARBON_TYPE);
        assert_eq!(
            cap3.bonded,
            vec![AtomId(3), AtomId(12), AtomId(13), AtomId(14)]
        );
        assert_eq!(graph.atom(AtomId(12)).unwrap().ff_type, CAP_HYDROGEN_TYPE);
        assert_eq!(graph.atom(AtomId(4)).unwrap().bonded.last(), Some(&AtomId(15)));

        let d = nalgebra::distance(
            &graph.atom(AtomId(3)).unwrap().position,
            &cap3.position,
        );
        assert!((d - 1.54).abs() < 1e-9);

        assert!(crate::core::partition::connected(&mut graph, AtomId(3), AtomId(14)).unwrap());
        assert!(crate::core::partition::connected(&mut graph, AtomId(4), AtomId(18)).unwrap());
        assert!(!crate::core::partition::connected(&mut graph, AtomId(3), AtomId(4)).unwrap());
    }

    #[test]
    fn bare_carbon_caps_when_hydrogens_disabled() {
        let (mut graph, border) = grouped_aldehyde();
        let capping = CappingConfig {
            add_cap_hydrogens: false,
            ..CappingConfig::default()
        };
        cut_and_cap(&mut graph, border[0], &capping).unwrap();
        assert_eq!(graph.len(), 12);
        assert_eq!(graph.atom(AtomId(11)).unwrap().bonded, vec![AtomId(3)]);
    }

    #[test]
    fn coincident_endpoints_are_degenerate() {
        let mut graph = MoleculeBuilder::new()
            .atom(1, "C", [1.0, 1.0, 1.0], 1)
            .atom(2, "O", [1.0, 1.0, 1.0], 2)
            .bond(1, 2)
            .build()
            .unwrap();
        let result = cut_and_cap(
            &mut graph,
            BorderBond::new(AtomId(1), AtomId(2)),
            &CappingConfig::default(),
        );
        assert_eq!(
            result,
            Err(FragmentError::DegenerateGeometry {
                retained: AtomId(1),
                removed: AtomId(2),
            })
        );
    }

    #[test]
    fn single_fragments_split_at_the_border() {
        let (graph, border) = grouped_aldehyde();
        let singles = single_fragments(&graph, &border, &CappingConfig::default()).unwrap();
        assert_eq!(singles.len(), 2);

        // Carbonyl group {1,2,3,5,6,7} plus one methyl cap.
        let first = &singles[0];
        assert_eq!(first.kind, FragmentKind::Single);
        assert_eq!(first.atom_count(), 10);
        assert_eq!(first.synthetic_count(), 4);
        assert_eq!(first.source_of(AtomId(1)), Some(AtomId(1)));
        assert_eq!(first.groups.len(), 1);

        // Methyl group {4,8,9,10} plus one methyl cap.
        let second = &singles[1];
        assert_eq!(second.atom_count(), 8);
        assert_eq!(second.source_of(AtomId(1)), Some(AtomId(4)));

        for fragment in &singles {
            assert_no_dangling_bonds(fragment);
            assert_eq!(fragment.charge, 0);
        }
        // The source graph is untouched.
        assert_eq!(graph.len(), 10);
        assert!(graph.atom(AtomId(3)).unwrap().is_bonded_to(AtomId(4)));
    }

    #[test]
    fn double_fragment_and_dimer_share_topology() {
        let (graph, border) = grouped_aldehyde();
        let capping = CappingConfig::default();
        let double = double_fragment(&graph, &border, border[0], &capping).unwrap();
        let dimer = dimer(&graph, &border, border[0], &capping).unwrap();

        // No other border bonds: the whole molecule, uncapped.
        assert_eq!(double.atom_count(), 10);
        assert_eq!(double.synthetic_count(), 0);
        assert_eq!(double.groups.len(), 2);
        assert_eq!(dimer.groups.len(), 1);
        assert_eq!(double.origin, FragmentOrigin::Border(border[0]));

        for (id, atom) in double.graph.atoms_iter() {
            assert_eq!(dimer.graph.atom(id).unwrap().bonded, atom.bonded);
        }
        assert_no_dangling_bonds(&double);
    }

    #[test]
    fn doubles_cut_every_other_border_bond() {
        // HO1-C2H2-C3H2-C4H2-O5H: the hydroxyls pull C2 and C4 into their groups,
        // leaving C3 as a lone alkane group with a border bond on each side.
        let mut builder = MoleculeBuilder::new();
        for (id, element) in [(1, "O"), (2, "C"), (3, "C"), (4, "C"), (5, "O")] {
            builder = builder.atom(id, element, [1.5 * id as f64, 0.0, 0.0], 1);
        }
        for (id, x, y) in [
            (6, 1.5, 1.0),
            (7, 3.0, 1.0),
            (8, 3.0, -1.0),
            (9, 4.5, 1.0),
            (10, 4.5, -1.0),
            (11, 6.0, 1.0),
            (12, 6.0, -1.0),
            (13, 7.5, 1.0),
        ] {
            builder = builder.atom(id, "H", [x, y, 0.0], 5);
        }
        for (a, b) in [
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (1, 6),
            (2, 7),
            (2, 8),
            (3, 9),
            (3, 10),
            (4, 11),
            (4, 12),
            (5, 13),
        ] {
            builder = builder.bond(a, b);
        }
        let mut graph = builder.build().unwrap();
        detect_bridges(&mut graph).unwrap();
        assign_functional_groups(&mut graph).unwrap();
        merge_alkanes(&mut graph).unwrap();
        merge_hydrogens(&mut graph).unwrap();
        let border = find_border_bonds(&mut graph).unwrap();
        assert_eq!(
            border,
            vec![
                BorderBond::new(AtomId(2), AtomId(3)),
                BorderBond::new(AtomId(3), AtomId(4)),
            ]
        );

        let capping = CappingConfig::default();
        let singles = single_fragments(&graph, &border, &capping).unwrap();
        let sizes: Vec<_> = singles.iter().map(Fragment::atom_count).collect();
        assert_eq!(sizes, vec![9, 11, 9]);

        let doubles = double_fragments(&graph, &border, &capping).unwrap();
        let paired = dimers(&graph, &border, &capping).unwrap();
        assert_eq!(doubles.len(), 2);
        assert_eq!(paired.len(), 2);
        for (double, dimer) in doubles.iter().zip(&paired) {
            // Two groups (8 original atoms) plus one cap on the other cut.
            assert_eq!(double.atom_count(), 12);
            assert_eq!(double.synthetic_count(), 4);
            assert_eq!(double.groups.len(), 2);
            assert_eq!(dimer.groups.len(), 1);
            assert_eq!(dimer.kind, FragmentKind::Dimer);
            assert_eq!(dimer.graph.bonds(), double.graph.bonds());
            assert_no_dangling_bonds(double);
        }
        assert_eq!(doubles[0].source_of(AtomId(1)), Some(AtomId(1)));
        assert_eq!(doubles[1].source_of(AtomId(1)), Some(AtomId(3)));
    }
}
