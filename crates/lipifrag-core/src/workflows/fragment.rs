use crate::core::border::find_border_bonds;
use crate::core::classify::{assign_functional_groups, merge_alkanes, merge_hydrogens};
use crate::core::models::fragment::{BorderBond, Fragment};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::partition::groups;
use crate::core::rings::detect_bridges;
use crate::engine::config::FragmentationConfig;
use crate::engine::error::FragmentError;
use crate::engine::extract;
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Everything produced by fragmenting one molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentationResult {
    /// Number of atoms that seeded a functional group. Informational only.
    pub heteroatom_count: usize,
    /// Acyclic bonds found by bridge detection, as `(a, b)` with `a < b`.
    pub bridges: Vec<(AtomId, AtomId)>,
    /// Bonds between different groups, in ascending order.
    pub border_bonds: Vec<BorderBond>,
    /// One fragment per group, ordered by the group's smallest atom ID.
    pub singles: Vec<Fragment>,
    /// One fragment per border bond, in border-bond order.
    pub doubles: Vec<Fragment>,
    /// One fragment per border bond, in border-bond order.
    pub dimers: Vec<Fragment>,
}

impl FragmentationResult {
    /// Iterates over every fragment: singles, then doubles, then dimers.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.singles
            .iter()
            .chain(&self.doubles)
            .chain(&self.dimers)
    }

    /// Total number of fragments of all kinds.
    pub fn fragment_count(&self) -> usize {
        self.singles.len() + self.doubles.len() + self.dimers.len()
    }
}

/// Fragments one molecule.
///
/// Runs bridge detection, classification, alkane and hydrogen merging, and border
/// location on `molecule`, then extracts the fragment kinds enabled in
/// `config.extraction`. Every extraction works on its own copy of the classified
/// molecule.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if the molecule refers to an absent
/// atom, [`FragmentError::DegenerateGeometry`] if a cut bond joins two atoms at
/// the same position, or [`FragmentError::IdOverflow`] if the molecule already
/// uses the largest atom ID and needs capping.
#[instrument(skip_all, name = "fragmentation_workflow")]
pub fn run(
    mut molecule: MoleculeGraph,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<FragmentationResult, FragmentError> {
    info!(atoms = molecule.len(), "Starting fragmentation.");

    // === Phase 1: Grouping ===
    let (bridges, heteroatom_count) = reporter.phase("Grouping", || {
        let bridges = detect_bridges(&mut molecule)?;
        let heteroatoms = assign_functional_groups(&mut molecule)?;
        merge_alkanes(&mut molecule)?;
        merge_hydrogens(&mut molecule)?;
        Ok::<_, FragmentError>((bridges, heteroatoms))
    })?;
    let border_bonds = find_border_bonds(&mut molecule)?;
    let group_count = groups(&mut molecule)?.len();

    info!(
        bridges = bridges.len(),
        heteroatoms = heteroatom_count,
        groups = group_count,
        border_bonds = border_bonds.len(),
        "Molecule partitioned."
    );
    if !border_bonds.is_empty() {
        debug!("Border bonds: {}", border_bonds.iter().join(", "));
    }

    // === Phase 2: Extraction ===
    let extraction = config.extraction;
    let capping = &config.capping;
    let paired_kinds = extraction.double_fragments as u64 + extraction.dimers as u64;
    let total_steps = extraction.single_fragments as u64 + paired_kinds * border_bonds.len() as u64;

    let (singles, doubles, dimers) = reporter.phase("Extraction", || {
        reporter.report(Progress::TaskStart { total_steps });

        let mut singles = Vec::new();
        if extraction.single_fragments {
            singles = extract::single_fragments(&molecule, &border_bonds, capping)?;
            reporter.report(Progress::TaskIncrement);
        }

        let mut doubles = Vec::new();
        let mut dimers = Vec::new();
        for &bond in &border_bonds {
            if extraction.double_fragments {
                doubles.push(extract::double_fragment(&molecule, &border_bonds, bond, capping)?);
                reporter.report(Progress::TaskIncrement);
            }
            if extraction.dimers {
                dimers.push(extract::dimer(&molecule, &border_bonds, bond, capping)?);
                reporter.report(Progress::TaskIncrement);
            }
        }

        reporter.report(Progress::TaskFinish);
        Ok::<_, FragmentError>((singles, doubles, dimers))
    })?;

    info!(
        singles = singles.len(),
        doubles = doubles.len(),
        dimers = dimers.len(),
        "Fragmentation complete."
    );

    Ok(FragmentationResult {
        heteroatom_count,
        bridges,
        border_bonds,
        singles,
        doubles,
        dimers,
    })
}
