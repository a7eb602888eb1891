//! # Engine Module
//!
//! The fragment extractor and the framework around it: configuration, the error
//! taxonomy, and progress reporting.
//!
//! ## Overview
//!
//! Extraction operates on a molecule whose partition into groups has already been
//! computed by [`crate::core`]. Every extraction mode starts from its own deep copy of
//! that molecule, so sibling fragments never observe each other's cuts.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Capping bond lengths and the enabled fragment kinds
//! - **Extraction** ([`extract`]) - Cutting, methyl capping, and isolating groups
//! - **Renumbering** ([`renumber`]) - Dense, order-preserving relabelling of fragments
//! - **Charge** ([`charge`]) - Formal-charge rules for amines and phosphates
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - The fatal, per-molecule error categories

pub mod charge;
pub mod config;
pub mod error;
pub mod extract;
pub mod progress;
pub mod renumber;
