//! Top-level module for the word chain system.
//!
//! This module provides a first-order word-level Markov chain, including:
//! - The transition table (`TransitionTable`)
//! - The chain engine (`Chain`, `GenerateResult`)
//! - Internal weighted random sampling (`sampler`)

/// High-level chain engine: sequence ingestion, removal, merging and
/// weighted-random generation.
pub mod chain;

/// The transition table: word → successor word → occurrence count.
///
/// Handles counting, pruning on removal, merging/subtracting whole tables
/// and persistence as a JSON document.
pub mod transitions;

/// Internal weighted random sampling over occurrence counts.
///
/// This module is not exposed publicly.
mod sampler;
