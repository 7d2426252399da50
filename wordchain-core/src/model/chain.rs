use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::sampler::pick_weighted;
use super::transitions::TransitionTable;
use crate::error::ChainError;
use crate::io::read_file;

/// Reserved boundary word marking the start and the end of a sequence.
///
/// Its outgoing successions are the observed sequence starters; an incoming
/// succession toward it means "the sequence ends here". It never appears in
/// generated output.
pub const BOUNDARY: &str = "";

/// Outcome of a seeded generation.
///
/// Callers must handle both variants; an unknown seed is an expected
/// condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResult {
	/// The generated word sequence, boundary excluded.
	Success(Vec<String>),
	/// The requested seed does not appear in the chain.
	NoSuchSeed,
}

/// A first-order weighted Markov chain over word sequences.
///
/// A `Chain` owns one [`TransitionTable`] and one random number generator.
/// It learns word successions from sequences, forgets them symmetrically,
/// and generates new sequences by weighted random walk from the boundary
/// (or from an explicit seed word).
///
/// ## Responsibilities
/// - Ingest and remove word sequences, boundary-bracketed
/// - Merge with / subtract whole other chains
/// - Generate sequences by repeated weighted sampling
/// - Load/save its table through the JSON persistence of `TransitionTable`
///
/// The chain has no internal locking: callers must serialize mutating calls
/// against each other and against generation.
#[derive(Debug, Clone)]
pub struct Chain {
	table: TransitionTable,
	rng: StdRng,
}

impl Default for Chain {
	fn default() -> Self {
		Self::new()
	}
}

impl Chain {
	/// Creates an empty chain with an OS-seeded random source.
	pub fn new() -> Self {
		Self::from_table(TransitionTable::new())
	}

	/// Creates a chain around an existing table (ex. a loaded one).
	pub fn from_table(table: TransitionTable) -> Self {
		Self {
			table,
			rng: StdRng::from_os_rng(),
		}
	}

	/// Reseeds the chain's random source for reproducible generation.
	pub fn reseed(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	/// Returns a read-only view of the underlying table.
	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Learns a word sequence.
	///
	/// Records `BOUNDARY → words[0]`, every consecutive pair, and finally
	/// `words.last() → BOUNDARY`, so the boundary's outgoing weights count
	/// sequence starters and its incoming ones count sequence enders.
	///
	/// An empty sequence is a no-op.
	pub fn add_sequence<S: AsRef<str>>(&mut self, words: &[S]) {
		if words.is_empty() {
			return;
		}

		self.table.increment(BOUNDARY, words[0].as_ref(), 1);
		for pair in words.windows(2) {
			self.table.increment(pair[0].as_ref(), pair[1].as_ref(), 1);
		}
		self.table
			.increment(words[words.len() - 1].as_ref(), BOUNDARY, 1);
	}

	/// Forgets a word sequence.
	///
	/// Removes exactly the successions [`add_sequence`](Self::add_sequence)
	/// records, in the same order; entries whose counts reach zero are
	/// pruned. Successions the chain never learned are skipped.
	pub fn remove_sequence<S: AsRef<str>>(&mut self, words: &[S]) {
		if words.is_empty() {
			return;
		}

		self.table.decrement(BOUNDARY, words[0].as_ref(), 1);
		for pair in words.windows(2) {
			self.table.decrement(pair[0].as_ref(), pair[1].as_ref(), 1);
		}
		self.table
			.decrement(words[words.len() - 1].as_ref(), BOUNDARY, 1);
	}

	/// Learns a line of text, split on whitespace.
	pub fn add_text(&mut self, text: &str) {
		let words: Vec<&str> = text.split_whitespace().collect();
		self.add_sequence(&words);
	}

	/// Forgets a line of text, split on whitespace.
	pub fn remove_text(&mut self, text: &str) {
		let words: Vec<&str> = text.split_whitespace().collect();
		self.remove_sequence(&words);
	}

	/// Merges everything another chain has learned into this one.
	pub fn add_chain(&mut self, other: &Self) {
		self.table.merge(&other.table);
	}

	/// Forgets everything another chain has learned.
	pub fn remove_chain(&mut self, other: &Self) {
		self.table.subtract(&other.table);
	}

	/// Draws the next word after `current` by weighted random sampling.
	///
	/// Returns `None` if `current` has no recorded successors. The drawn
	/// word may be [`BOUNDARY`], meaning the sequence should end.
	pub fn next_word(&mut self, current: &str) -> Option<String> {
		let successors = self.table.successors(current)?;
		pick_weighted(successors, &mut self.rng).cloned()
	}

	/// Generates a sequence starting from a random learned starter.
	///
	/// Returns an empty sequence if the chain has learned nothing.
	pub fn generate(&mut self) -> Vec<String> {
		let Some(seed) = self.next_word(BOUNDARY) else {
			return Vec::new();
		};

		match self.generate_from_seed(&seed) {
			GenerateResult::Success(words) => words,
			// The seed was just sampled from the table, so this should
			// not happen; an empty sequence is the safe outcome.
			GenerateResult::NoSuchSeed => Vec::new(),
		}
	}

	/// Generates a sequence starting from an explicit seed word.
	///
	/// The walk appends the current word and advances by weighted sampling
	/// until it draws the boundary, or until it hits a word with no
	/// successors (a truncated table); both end the walk cleanly.
	///
	/// Seed matching is exact; see
	/// [`generate_from_seed_ignore_case`](Self::generate_from_seed_ignore_case)
	/// for the relaxed lookup. The table is never mutated.
	pub fn generate_from_seed(&mut self, seed: &str) -> GenerateResult {
		if !self.table.contains(seed) {
			return GenerateResult::NoSuchSeed;
		}

		let mut words = Vec::new();
		let mut current = seed.to_owned();
		loop {
			words.push(current.clone());
			match self.next_word(&current) {
				Some(next) if next != BOUNDARY => current = next,
				_ => break,
			}
		}

		GenerateResult::Success(words)
	}

	/// Generates a sequence from a seed word matched ignoring ASCII case.
	///
	/// Every stored word matching `seed` case-insensitively becomes a
	/// candidate, weighted by its total outgoing occurrence count; one
	/// candidate is drawn by weighted sampling and the walk starts there.
	///
	/// Returns [`GenerateResult::NoSuchSeed`] if nothing matches.
	pub fn generate_from_seed_ignore_case(&mut self, seed: &str) -> GenerateResult {
		let candidates: std::collections::HashMap<String, usize> = self
			.table
			.iter()
			.filter(|(word, _)| word.eq_ignore_ascii_case(seed))
			.map(|(word, successors)| (word.clone(), successors.values().sum()))
			.collect();

		let Some(choice) = pick_weighted(&candidates, &mut self.rng).cloned() else {
			return GenerateResult::NoSuchSeed;
		};

		self.generate_from_seed(&choice)
	}

	/// Builds a chain from a text corpus, one sequence per line.
	///
	/// Splits the lines into chunks (CPU cores * factor), learns partial
	/// chains on threads, and merges them into the final chain.
	///
	/// # Errors
	/// Returns [`ChainError::Io`] if the corpus cannot be read.
	pub fn from_corpus_file<P: AsRef<Path>>(filepath: P) -> Result<Self, ChainError> {
		let lines = read_file(filepath)?;
		if lines.is_empty() {
			return Ok(Self::new());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = ((lines.len() + chunks - 1) / chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial_chain = Chain::new();
				for line in chunk {
					partial_chain.add_text(&line);
				}
				tx.send(partial_chain).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut chain = Chain::new();
		for partial_chain in rx.iter() {
			chain.add_chain(&partial_chain);
		}

		Ok(chain)
	}

	/// Loads a chain from a JSON chain file.
	///
	/// # Errors
	/// Returns [`ChainError::Io`] or [`ChainError::Malformed`] on failure;
	/// nothing is partially loaded.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
		Ok(Self::from_table(TransitionTable::load(path)?))
	}

	/// Saves the chain's table as a JSON chain file, replacing any prior
	/// content. The random source is transient and never persisted.
	///
	/// # Errors
	/// Returns [`ChainError::Io`] if the file cannot be written.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChainError> {
		self.table.save(path)
	}
}
