use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// The transition table of a first-order word chain.
///
/// Maps each word to the words observed immediately after it, together with
/// the number of times each succession was observed. The empty string is a
/// reserved boundary word: its successors are the observed sequence starters,
/// and an empty-string successor means "the sequence ends here".
///
/// ## Responsibilities
/// - Accumulate succession occurrences during learning
/// - Remove occurrences on un-learning, pruning emptied entries
/// - Merge with / subtract another table (ex. combining chains)
/// - Persist itself as a JSON document
///
/// ## Invariants
/// - Every stored occurrence count is strictly positive
/// - A word with no successors does not appear as a key
/// - Keys are exact-match (case-sensitive)
///
/// The serialized form is exactly the bare mapping, with no surrounding
/// envelope, so the boundary key round-trips like any other word.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TransitionTable {
	/// Outgoing successions indexed by word.
	/// Example: { "the" => { "cat" => 2, "dog" => 1 } }
	links: HashMap<String, HashMap<String, usize>>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `amount` occurrences of the succession `from` → `to`.
	///
	/// - If the succession already exists, its count is increased.
	/// - Otherwise, a new entry is created with an initial count of `amount`.
	/// - An `amount` of 0 is a no-op and returns 0.
	///
	/// Returns the resulting occurrence count.
	pub fn increment(&mut self, from: &str, to: &str, amount: usize) -> usize {
		if amount == 0 {
			return 0;
		}

		let successors = self.links.entry(from.to_owned()).or_default();
		let count = successors.entry(to.to_owned()).or_insert(0);
		*count += amount;
		*count
	}

	/// Removes `amount` occurrences of the succession `from` → `to`.
	///
	/// If the count drops to zero the successor entry is deleted, and if
	/// `from` is left with no successors its whole entry is deleted too, so
	/// the table never holds empty inner mappings.
	///
	/// Returns the remaining occurrence count, or `None` when there is
	/// nothing to remove: `from` unknown, `to` not among its successors, or
	/// an `amount` of 0. In the `None` case the table is left untouched.
	pub fn decrement(&mut self, from: &str, to: &str, amount: usize) -> Option<usize> {
		if amount == 0 {
			return None;
		}

		let successors = self.links.get_mut(from)?;
		let count = successors.get_mut(to)?;

		if *count > amount {
			*count -= amount;
			return Some(*count);
		}

		successors.remove(to);
		if successors.is_empty() {
			self.links.remove(from);
		}
		Some(0)
	}

	/// Merges another table into this one.
	///
	/// Every occurrence count of `other` is added to the matching
	/// succession of `self`, creating entries as needed.
	pub fn merge(&mut self, other: &Self) {
		for (from, successors) in &other.links {
			for (to, count) in successors {
				self.increment(from, to, *count);
			}
		}
	}

	/// Subtracts another table from this one.
	///
	/// Every occurrence count of `other` is removed from the matching
	/// succession of `self`, pruning entries whose counts reach zero.
	/// Successions absent from `self` are skipped.
	pub fn subtract(&mut self, other: &Self) {
		for (from, successors) in &other.links {
			for (to, count) in successors {
				self.decrement(from, to, *count);
			}
		}
	}

	/// Removes all entries.
	pub fn clear(&mut self) {
		self.links.clear();
	}

	/// Returns the successor map of a word, or `None` if the word has
	/// no recorded successors.
	pub fn successors(&self, from: &str) -> Option<&HashMap<String, usize>> {
		self.links.get(from)
	}

	/// Returns the occurrence count of a succession (0 if absent).
	pub fn count(&self, from: &str, to: &str) -> usize {
		self.links
			.get(from)
			.and_then(|successors| successors.get(to))
			.copied()
			.unwrap_or(0)
	}

	/// Returns true if the word appears as a key in the table.
	pub fn contains(&self, from: &str) -> bool {
		self.links.contains_key(from)
	}

	/// Returns the sum of all outgoing occurrence counts of a word
	/// (0 if the word is unknown).
	pub fn total_weight(&self, from: &str) -> usize {
		self.links
			.get(from)
			.map(|successors| successors.values().sum())
			.unwrap_or(0)
	}

	/// Iterates over all `(word, successor map)` entries.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &HashMap<String, usize>)> {
		self.links.iter()
	}

	/// Returns the number of words with recorded successors.
	pub fn len(&self) -> usize {
		self.links.len()
	}

	/// Returns true if the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	/// Loads a table from a JSON document.
	///
	/// The document must be exactly the serialized mapping; any parse or
	/// shape mismatch fails the whole load, nothing is partially read.
	///
	/// # Errors
	/// - [`ChainError::Io`] if the file cannot be read
	/// - [`ChainError::Malformed`] if the document does not parse
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
		let contents = std::fs::read_to_string(path)?;
		let table = serde_json::from_str(&contents)?;
		Ok(table)
	}

	/// Writes the table as a JSON document, replacing any prior content.
	///
	/// # Errors
	/// Returns [`ChainError::Io`] if the file cannot be written.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChainError> {
		let contents = serde_json::to_string_pretty(self)?;
		std::fs::write(path, contents)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_table() -> TransitionTable {
		let mut table = TransitionTable::new();
		table.increment("", "the", 2);
		table.increment("the", "cat", 1);
		table.increment("the", "dog", 1);
		table.increment("cat", "", 1);
		table.increment("dog", "", 1);
		table
	}

	#[test]
	fn increment_creates_and_accumulates() {
		let mut table = TransitionTable::new();
		assert_eq!(table.increment("a", "b", 1), 1);
		assert_eq!(table.increment("a", "b", 1), 2);
		assert_eq!(table.increment("a", "b", 3), 5);
		assert_eq!(table.count("a", "b"), 5);
	}

	#[test]
	fn increment_zero_is_a_no_op() {
		let mut table = TransitionTable::new();
		assert_eq!(table.increment("a", "b", 0), 0);
		assert!(table.is_empty());
	}

	#[test]
	fn decrement_reduces_count() {
		let mut table = TransitionTable::new();
		table.increment("a", "b", 5);
		assert_eq!(table.decrement("a", "b", 2), Some(3));
		assert_eq!(table.count("a", "b"), 3);
	}

	#[test]
	fn decrement_to_zero_prunes_successor_and_word() {
		let mut table = TransitionTable::new();
		table.increment("a", "b", 1);
		table.increment("a", "c", 1);

		assert_eq!(table.decrement("a", "b", 1), Some(0));
		assert_eq!(table.count("a", "b"), 0);
		assert!(table.contains("a"));

		assert_eq!(table.decrement("a", "c", 1), Some(0));
		assert!(!table.contains("a"));
		assert!(table.is_empty());
	}

	#[test]
	fn decrement_below_zero_still_prunes() {
		let mut table = TransitionTable::new();
		table.increment("a", "b", 2);
		assert_eq!(table.decrement("a", "b", 10), Some(0));
		assert!(!table.contains("a"));
	}

	#[test]
	fn decrement_unknown_word_is_not_found() {
		let mut table = sample_table();
		let before = table.clone();
		assert_eq!(table.decrement("missing", "the", 1), None);
		assert_eq!(table, before);
	}

	#[test]
	fn decrement_unknown_successor_is_not_found_without_mutation() {
		let mut table = sample_table();
		let before = table.clone();
		assert_eq!(table.decrement("the", "missing", 1), None);
		assert_eq!(table, before);
	}

	#[test]
	fn decrement_zero_is_not_found() {
		let mut table = sample_table();
		let before = table.clone();
		assert_eq!(table.decrement("the", "cat", 0), None);
		assert_eq!(table, before);
	}

	#[test]
	fn merge_adds_counts_pairwise() {
		let mut left = TransitionTable::new();
		left.increment("a", "b", 1);
		left.increment("a", "c", 2);

		let mut right = TransitionTable::new();
		right.increment("a", "b", 3);
		right.increment("x", "y", 4);

		left.merge(&right);
		assert_eq!(left.count("a", "b"), 4);
		assert_eq!(left.count("a", "c"), 2);
		assert_eq!(left.count("x", "y"), 4);
	}

	#[test]
	fn merge_then_subtract_restores_original() {
		let mut left = sample_table();
		let original = left.clone();

		let mut right = TransitionTable::new();
		right.increment("", "the", 1);
		right.increment("the", "fish", 7);
		right.increment("fish", "", 7);

		left.merge(&right);
		left.subtract(&right);
		assert_eq!(left, original);
	}

	#[test]
	fn subtract_leaves_no_empty_inner_maps() {
		let mut table = sample_table();
		let copy = table.clone();
		table.subtract(&copy);

		assert!(table.is_empty());
		for (_, successors) in table.iter() {
			assert!(!successors.is_empty());
		}
	}

	#[test]
	fn clear_empties_the_table() {
		let mut table = sample_table();
		table.clear();
		assert!(table.is_empty());
		assert_eq!(table.len(), 0);
	}

	#[test]
	fn total_weight_sums_successors() {
		let table = sample_table();
		assert_eq!(table.total_weight(""), 2);
		assert_eq!(table.total_weight("the"), 2);
		assert_eq!(table.total_weight("unknown"), 0);
	}

	#[test]
	fn json_round_trip_preserves_boundary_key() {
		let table = sample_table();

		let json = serde_json::to_string(&table).expect("serialize");
		let restored: TransitionTable = serde_json::from_str(&json).expect("deserialize");

		assert_eq!(restored, table);
		assert!(restored.contains(""));
		for (_, successors) in restored.iter() {
			assert!(!successors.is_empty());
		}
	}

	#[test]
	fn serialized_form_is_the_bare_mapping() {
		let mut table = TransitionTable::new();
		table.increment("", "hi", 1);
		table.increment("hi", "", 1);

		let value = serde_json::to_value(&table).expect("serialize");
		assert_eq!(
			value,
			serde_json::json!({ "": { "hi": 1 }, "hi": { "": 1 } })
		);
	}

	#[test]
	fn file_round_trip() {
		let dir = tempfile::tempdir().expect("create temp dir");
		let path = dir.path().join("chain.json");

		let table = sample_table();
		table.save(&path).expect("save table");

		let restored = TransitionTable::load(&path).expect("load table");
		assert_eq!(restored, table);
	}

	#[test]
	fn load_missing_file_is_io_error() {
		let result = TransitionTable::load("no/such/chain.json");
		assert!(matches!(result, Err(ChainError::Io(_))));
	}

	#[test]
	fn load_malformed_document_is_an_error() {
		let dir = tempfile::tempdir().expect("create temp dir");
		let path = dir.path().join("chain.json");

		// An array is the wrong shape for a table.
		std::fs::write(&path, "[1, 2, 3]").expect("write file");
		assert!(matches!(
			TransitionTable::load(&path),
			Err(ChainError::Malformed(_))
		));

		// Counts must be plain non-negative integers.
		std::fs::write(&path, r#"{"a": {"b": "many"}}"#).expect("write file");
		assert!(matches!(
			TransitionTable::load(&path),
			Err(ChainError::Malformed(_))
		));
	}
}
