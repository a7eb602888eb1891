//! # Workflows Module
//!
//! High-level entry points that run the complete fragmentation pipeline.
//!
//! ## Overview
//!
//! A workflow takes ownership of a validated molecule graph, runs bridge detection,
//! functional-group classification and group extension on it, locates the border
//! bonds, and extracts every fragment kind enabled in the configuration. Progress is
//! reported through [`crate::engine::progress::ProgressReporter`].
//!
//! ## Architecture
//!
//! - **Fragmentation Workflow** ([`fragment`]) - The full pipeline for one molecule
//! - **Batch Workflow** ([`batch`]) - Independent molecules fragmented in parallel, with
//!   failures isolated to the molecule that caused them

pub mod batch;
pub mod fragment;
