use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::output::write_fragments;
use crate::utils::progress::CliProgressHandler;
use lipifrag::{
    core::io::{traits::MolecularFile, txyz::TxyzFile},
    core::models::molecule::MoleculeGraph,
    engine::progress::ProgressReporter,
    workflows,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INPUT_EXTENSION: &str = "txyz";

/// Per-molecule results of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: Vec<String>,
    /// Molecule name and the reason it failed.
    pub failed: Vec<(String, String)>,
}

fn is_input_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == INPUT_EXTENSION)
}

/// Lists the `.txyz` files directly inside `dir` and inside its immediate
/// sub-directories, sorted by path.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::Argument(format!(
            "Input path is not a directory: {}",
            dir.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            for nested in fs::read_dir(&path)? {
                let nested = nested?.path();
                if is_input_file(&nested) {
                    inputs.push(nested);
                }
            }
        } else if is_input_file(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn molecule_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Argument(format!("Input file has no name: {}", path.display())))
}

pub fn run(args: BatchArgs, progress: &CliProgressHandler) -> Result<()> {
    let summary = process(&args, progress)?;

    println!(
        "Batch complete: {} succeeded, {} failed.",
        summary.succeeded.len(),
        summary.failed.len()
    );
    for (name, reason) in &summary.failed {
        println!("  {}: {}", name, reason);
    }

    if summary.succeeded.is_empty() {
        return Err(CliError::Other(anyhow::anyhow!(
            "All {} molecule(s) failed to fragment",
            summary.failed.len()
        )));
    }
    Ok(())
}

fn process(args: &BatchArgs, progress: &CliProgressHandler) -> Result<BatchSummary> {
    let config = build_config(&args.input, &args.output, &args.options)?;

    let inputs = discover_inputs(&config.input_path)?;
    if inputs.is_empty() {
        return Err(CliError::Argument(format!(
            "No .{} files found in {}",
            INPUT_EXTENSION,
            config.input_path.display()
        )));
    }
    info!(files = inputs.len(), "Discovered input molecules.");

    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut summary = BatchSummary::default();
    let mut molecules: Vec<(String, MoleculeGraph)> = Vec::with_capacity(inputs.len());
    for path in &inputs {
        let name = molecule_name(path)?;
        if let Some(previous) = seen.insert(name.clone(), path.as_path()) {
            return Err(CliError::Argument(format!(
                "Molecule name '{}' is used by both {} and {}",
                name,
                previous.display(),
                path.display()
            )));
        }

        match TxyzFile::read_from_path(path) {
            Ok((molecule, _)) => {
                debug!(molecule = %name, atoms = molecule.len(), "Molecule loaded.");
                molecules.push((name, molecule));
            }
            Err(e) => {
                warn!(molecule = %name, error = %e, "Failed to read molecule.");
                summary.failed.push((name, e.to_string()));
            }
        }
    }

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let outcomes = reporter.phase("Fragmenting molecules", || {
        workflows::batch::run(molecules, &config.core_config, &reporter)
    });

    for outcome in outcomes {
        let name = outcome.key;
        let written = outcome.result.map_err(CliError::from).and_then(|result| {
            write_fragments(
                &result,
                &config.core_config.extraction,
                &config.output_dir.join(&name),
            )
        });
        match written {
            Ok(_) => summary.succeeded.push(name),
            Err(e) => {
                warn!(molecule = %name, error = %e, "Molecule failed.");
                summary.failed.push((name, e.to_string()));
            }
        }
    }

    summary.failed.sort();
    info!(
        succeeded = summary.succeeded.len(),
        failed = summary.failed.len(),
        "Batch finished."
    );
    Ok(summary)
}
