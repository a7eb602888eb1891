//! # Core Module
//!
//! This module provides the data structures and graph algorithms on which the fragmentation
//! engine is built.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, the molecule arena, and fragments
//! - **Disjoint-Set Partition** ([`partition`]) - Weighted union-find over atom IDs
//! - **Cycle Detection** ([`rings`]) - Tarjan low-link bridge detection
//! - **Classification** ([`classify`]) - Heteroatom, alkane and hydrogen grouping rules
//! - **Boundaries** ([`border`]) - Bonds whose endpoints belong to different groups
//! - **Geometry** ([`geometry`]) - Placement of synthetic capping atoms
//! - **File I/O** ([`io`]) - Reading and writing the Tinker XYZ atom format
//!
//! Every grouping decision in [`classify`] and [`border`] is expressed through the three
//! primitives of [`partition`]: `find`, `union` and `connected`.

pub mod border;
pub mod classify;
pub mod geometry;
pub mod io;
pub mod models;
pub mod partition;
pub mod rings;
