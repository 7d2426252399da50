//! Word-level weighted Markov chain library.
//!
//! This crate provides a first-order Markov chain over word sequences:
//! - Transition counting between consecutive words (with start/end boundaries)
//! - Weighted random generation of new sequences
//! - Chain merging and un-learning (removal)
//! - Whole-table persistence as a JSON document
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core chain model and generation logic.
///
/// This module exposes the high-level chain interface while keeping
/// the weighted sampling internals private.
pub mod model;

/// Error types for persistence and corpus loading.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;
