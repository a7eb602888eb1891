//! # Lipifrag Core Library
//!
//! A molecular fragmentation engine for force-field parameterization. Given a bonded-atom graph
//! (a small molecule with 3-D coordinates and explicit bonds), the library partitions atoms into
//! chemically meaningful functional groups, locates the bonds that cross group boundaries, and
//! emits capped, densely renumbered sub-molecules for every boundary.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Data models (`Atom`, `MoleculeGraph`, `Fragment`), the graph
//!   primitives (disjoint-set partition, bridge detection, functional-group classification,
//!   border-bond location), capping geometry, and the Tinker XYZ file format.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, progress reporting, and the
//!   fragment extractor which cuts, caps, renumbers and charges sub-graphs.
//!
//! - **[`workflows`]: The Public API.** Complete procedures: fragmenting a single molecule and
//!   fragmenting a batch of independent molecules in parallel.
//!
//! ## Example
//!
//! ```
//! use lipifrag::core::models::builder::MoleculeBuilder;
//! use lipifrag::engine::config::FragmentationConfig;
//! use lipifrag::engine::progress::ProgressReporter;
//! use lipifrag::workflows;
//!
//! // Water: O(1)-H(2), O(1)-H(3)
//! let molecule = MoleculeBuilder::new()
//!     .atom(1, "O", [0.0, 0.0, 0.0], 36)
//!     .atom(2, "H", [0.96, 0.0, 0.0], 37)
//!     .atom(3, "H", [-0.24, 0.93, 0.0], 37)
//!     .bond(1, 2)
//!     .bond(1, 3)
//!     .build()
//!     .unwrap();
//!
//! let result = workflows::fragment::run(
//!     molecule,
//!     &FragmentationConfig::default(),
//!     &ProgressReporter::new(),
//! )
//! .unwrap();
//!
//! assert!(result.border_bonds.is_empty());
//! assert_eq!(result.singles.len(), 1);
//! assert_eq!(result.singles[0].atom_count(), 3);
//! assert_eq!(result.singles[0].charge, 0);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
