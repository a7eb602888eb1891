use crate::cli::FragmentArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::output::write_fragments;
use crate::utils::progress::CliProgressHandler;
use lipifrag::{
    core::io::{traits::MolecularFile, txyz::TxyzFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: FragmentArgs, progress: &CliProgressHandler) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.input, &args.output, &args.options)?;

    info!("Loading input molecule from {:?}", &config.input_path);
    let (molecule, metadata) =
        TxyzFile::read_from_path(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    info!(title = %metadata.title, atoms = molecule.len(), "Molecule loaded.");

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!("Fragmenting {}...", config.input_path.display());
    let result = workflows::fragment::run(molecule, &config.core_config, &reporter)?;

    let manifest = write_fragments(
        &result,
        &config.core_config.extraction,
        &config.output_dir,
    )?;

    println!(
        "Wrote {} fragment(s) ({} single, {} double, {} dimer) to {}",
        manifest.len(),
        result.singles.len(),
        result.doubles.len(),
        result.dimers.len(),
        config.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FragmentationOptions;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const PROPANOL: &str = "\
12  propanol
1   O   0.000   0.000   0.000  1   2  4
2   C   1.430   0.000   0.000  2   1  3  5  6
3   C   1.950   1.440   0.000  3   2  7  8  9
4   H  -0.320   0.900   0.000  4   1
5   H   1.790  -0.510   0.890  5   2
6   H   1.790  -0.510  -0.890  5   2
7   C   3.480   1.440   0.000  3   3 10 11 12
8   H   1.590   1.950   0.890  5   3
9   H   1.590   1.950  -0.890  5   3
10  H   3.840   2.460   0.000  5   7
11  H   3.840   0.930   0.890  5   7
12  H   3.840   0.930  -0.890  5   7
";

    fn args(input: &Path, output: &Path) -> FragmentArgs {
        FragmentArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            options: FragmentationOptions::default(),
        }
    }

    #[test]
    fn fragments_a_molecule_into_the_output_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("propanol.txyz");
        fs::write(&input, PROPANOL).unwrap();
        let output = dir.path().join("out");

        run(args(&input, &output), &CliProgressHandler::hidden()).unwrap();

        let manifest = fs::read_to_string(output.join("manifest.csv")).unwrap();
        // Two singles, one double and one dimer for the C2-C3 border.
        assert_eq!(manifest.lines().count(), 5);
        assert!(output.join("single_fragments/fragment_1.txyz").is_file());
        assert!(output.join("double_fragments/fragment_0.txyz").is_file());
        assert!(output.join("dimers/fragment_0.txyz").is_file());
    }

    #[test]
    fn unreadable_input_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.txyz");
        fs::write(&input, "2 broken\n1 C 0.0 zero 0.0 1 2\n2 C 1.5 0.0 0.0 1 1\n").unwrap();

        let result = run(
            args(&input, &dir.path().join("out")),
            &CliProgressHandler::hidden(),
        );
        assert!(matches!(result, Err(CliError::FileParsing { path, .. }) if path == input));
    }

    #[test]
    fn degenerate_molecule_fails_with_the_core_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("collapsed.txyz");
        let collapsed = PROPANOL.replace(
            "3   C   1.950   1.440   0.000",
            "3   C   1.430   0.000   0.000",
        );
        fs::write(&input, collapsed).unwrap();

        let result = run(
            args(&input, &dir.path().join("out")),
            &CliProgressHandler::hidden(),
        );
        assert!(matches!(result, Err(CliError::Fragmentation(_))));
    }
}
