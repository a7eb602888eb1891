use super::fragment::{self, FragmentationResult};
use crate::core::models::molecule::MoleculeGraph;
use crate::engine::config::FragmentationConfig;
use crate::engine::error::FragmentError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The outcome of fragmenting one molecule of a batch.
#[derive(Debug)]
pub struct MoleculeOutcome<K> {
    /// Caller-supplied label, typically the source file name.
    pub key: K,
    pub result: Result<FragmentationResult, FragmentError>,
}

impl<K> MoleculeOutcome<K> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fragments independent molecules, in parallel when the `parallel` feature is on.
///
/// Each molecule is owned by exactly one worker for the whole of its run. A
/// failure is recorded in that molecule's outcome and does not affect the others.
/// Outcomes are returned in input order. The reporter receives one
/// `TaskIncrement` per finished molecule.
#[instrument(skip_all, name = "batch_workflow")]
pub fn run<K>(
    molecules: Vec<(K, MoleculeGraph)>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Vec<MoleculeOutcome<K>>
where
    K: std::fmt::Display + Send,
{
    info!(molecules = molecules.len(), "Starting batch fragmentation.");
    reporter.report(Progress::TaskStart {
        total_steps: molecules.len() as u64,
    });

    let process = |(key, molecule): (K, MoleculeGraph)| {
        let result = fragment::run(molecule, config, &ProgressReporter::new());
        if let Err(e) = &result {
            warn!(molecule = %key, error = %e, "Fragmentation failed.");
        }
        reporter.report(Progress::TaskIncrement);
        MoleculeOutcome { key, result }
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<MoleculeOutcome<K>> = molecules.into_iter().map(process).collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<MoleculeOutcome<K>> = molecules.into_par_iter().map(process).collect();

    reporter.report(Progress::TaskFinish);

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        succeeded = outcomes.len() - failed,
        failed, "Batch fragmentation complete."
    );
    outcomes
}
