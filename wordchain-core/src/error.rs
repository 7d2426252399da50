//! Error types for the wordchain-core crate.

/// Error type for persistence and corpus loading operations.
///
/// In-memory chain operations never produce this error: missing seeds are
/// reported through `GenerateResult::NoSuchSeed` and non-positive amounts
/// are defined as no-ops.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// The chain file or corpus file could not be read or written.
	#[error("chain file I/O failed: {0}")]
	Io(#[from] std::io::Error),

	/// The persisted document could not be parsed into a transition table
	/// (invalid JSON, wrong nesting, or wrong value types). No partial
	/// state is loaded.
	#[error("malformed chain file: {0}")]
	Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_is_std_error() {
		fn assert_impl<T: std::error::Error>() {}
		assert_impl::<ChainError>();
	}

	#[test]
	fn error_is_send_and_sync() {
		fn assert_impl<T: Send + Sync>() {}
		assert_impl::<ChainError>();
	}

	#[test]
	fn io_error_message() {
		let e = ChainError::from(std::io::Error::new(
			std::io::ErrorKind::NotFound,
			"no such file",
		));
		assert!(e.to_string().starts_with("chain file I/O failed"));
	}
}
