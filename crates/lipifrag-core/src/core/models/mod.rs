//! # Core Models Module
//!
//! Data structures representing one molecule and the fragments cut from it.
//!
//! - [`ids`] - The `AtomId` identifier type
//! - [`atom`] - A single atom with its element, type code, position, bonds, and algorithm state
//! - [`molecule`] - The `MoleculeGraph` arena owning all atoms of one molecule
//! - [`builder`] - Validated construction of a `MoleculeGraph`
//! - [`fragment`] - Renumbered, capped sub-molecules produced by the extractor
//!
//! ```
//! use lipifrag::core::models::builder::MoleculeBuilder;
//!
//! let molecule = MoleculeBuilder::new()
//!     .atom(1, "C", [0.0, 0.0, 0.0], 1)
//!     .atom(2, "O", [1.43, 0.0, 0.0], 6)
//!     .bond(1, 2)
//!     .build()
//!     .unwrap();
//! assert_eq!(molecule.len(), 2);
//! ```

pub mod atom;
pub mod builder;
pub mod fragment;
pub mod ids;
pub mod molecule;
