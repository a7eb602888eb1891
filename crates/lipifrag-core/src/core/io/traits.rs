use crate::core::models::molecule::MoleculeGraph;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing molecular atom files.
///
/// Implementors handle format-specific parsing and serialization; the path-based
/// helpers wrap the reader/writer methods with buffered file handles.
pub trait MolecularFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a molecule graph from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, the atom records are inconsistent, or the
    /// underlying reader fails.
    fn read_from(reader: &mut impl BufRead)
    -> Result<(MoleculeGraph, Self::Metadata), Self::Error>;

    /// Writes a molecule graph and its metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        graph: &MoleculeGraph,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a molecule graph from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(MoleculeGraph, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a molecule graph and metadata to a file path, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        graph: &MoleculeGraph,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(graph, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
