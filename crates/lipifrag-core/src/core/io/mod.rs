//! Provides input/output for molecular atom files.
//!
//! Formats implement the [`traits::MolecularFile`] trait, which reads a file into a
//! validated [`MoleculeGraph`](crate::core::models::molecule::MoleculeGraph) plus
//! format-specific metadata, and writes a graph back out in ascending atom-ID order.

pub mod traits;
pub mod txyz;
