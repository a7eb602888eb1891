use crate::error::{CliError, Result};
use lipifrag::core::io::traits::MolecularFile;
use lipifrag::core::io::txyz::{TxyzFile, TxyzMetadata};
use lipifrag::core::models::fragment::{Fragment, FragmentKind};
use lipifrag::engine::config::ExtractionConfig;
use lipifrag::workflows::fragment::FragmentationResult;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.csv";

/// One row of `manifest.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub kind: FragmentKind,
    pub index: usize,
    pub atoms: usize,
    pub charge: i32,
    pub origin: String,
    /// Path of the fragment file relative to the molecule's output directory.
    pub file: String,
}

/// Writes every fragment of `result` below `output_dir` and records them in
/// `manifest.csv`.
///
/// Each enabled fragment kind gets its own sub-directory, recreated empty so
/// files from earlier runs cannot linger. Fragments are numbered from zero in
/// result order.
pub fn write_fragments(
    result: &FragmentationResult,
    extraction: &ExtractionConfig,
    output_dir: &Path,
) -> Result<Vec<ManifestEntry>> {
    fs::create_dir_all(output_dir)?;

    let sections: [(FragmentKind, bool, &[Fragment]); 3] = [
        (
            FragmentKind::Single,
            extraction.single_fragments,
            &result.singles,
        ),
        (
            FragmentKind::Double,
            extraction.double_fragments,
            &result.doubles,
        ),
        (FragmentKind::Dimer, extraction.dimers, &result.dimers),
    ];

    let mut manifest = Vec::with_capacity(result.fragment_count());
    for (kind, enabled, fragments) in sections {
        if !enabled {
            continue;
        }
        let kind_dir = output_dir.join(kind.directory_name());
        if kind_dir.exists() {
            debug!("Removing stale output directory {:?}", kind_dir);
            fs::remove_dir_all(&kind_dir)?;
        }
        fs::create_dir_all(&kind_dir)?;

        for (index, fragment) in fragments.iter().enumerate() {
            let file_name = format!("fragment_{}.txyz", index);
            let path = kind_dir.join(&file_name);
            let metadata = TxyzMetadata::new(format!("Fragment {}", index));
            TxyzFile::write_to_path(&fragment.graph, &metadata, &path).map_err(|e| {
                CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                }
            })?;

            manifest.push(ManifestEntry {
                kind,
                index,
                atoms: fragment.atom_count(),
                charge: fragment.charge,
                origin: fragment.origin.to_string(),
                file: format!("{}/{}", kind.directory_name(), file_name),
            });
        }
    }

    write_manifest(&manifest, &output_dir.join(MANIFEST_FILE))?;
    info!(
        fragments = manifest.len(),
        "Wrote fragments to {:?}", output_dir
    );
    Ok(manifest)
}

fn write_manifest(entries: &[ManifestEntry], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CliError::Other(e.into()))?;
    for entry in entries {
        writer
            .serialize(entry)
            .map_err(|e| CliError::Other(e.into()))?;
    }
    writer.flush()?;
    Ok(())
}
