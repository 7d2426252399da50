use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/corpus.txt` + `"json"` → `data/corpus.json`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/corpus.txt"` → `"corpus"`
/// - `"corpus.txt"` → `"corpus"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths).
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			if path.extension() == Some(std::ffi::OsStr::new(extension)) {
				if let Some(name) = path.file_name() {
					files.push(name.to_string_lossy().to_string());
				}
			}
		}
	}

	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn read_file_splits_lines() {
		let dir = tempfile::tempdir().expect("create temp dir");
		let path = dir.path().join("corpus.txt");
		fs::write(&path, "hello world\r\nsecond line\n").expect("write corpus");

		let lines = read_file(&path).expect("read corpus");
		assert_eq!(lines, vec!["hello world".to_owned(), "second line".to_owned()]);
	}

	#[test]
	fn read_file_missing_is_error() {
		assert!(read_file("no/such/file.txt").is_err());
	}

	#[test]
	fn output_path_swaps_extension() {
		let output = build_output_path("data/corpus.txt", "json").expect("build path");
		assert_eq!(output, PathBuf::from("data/corpus.json"));
	}

	#[test]
	fn filename_strips_path_and_extension() {
		assert_eq!(get_filename("./data/corpus.txt").expect("stem"), "corpus");
		assert_eq!(get_filename("corpus.json").expect("stem"), "corpus");
	}

	#[test]
	fn list_files_filters_by_extension() {
		let dir = tempfile::tempdir().expect("create temp dir");
		fs::write(dir.path().join("a.json"), "{}").expect("write a");
		fs::write(dir.path().join("b.txt"), "").expect("write b");

		let mut files = list_files(dir.path(), "json").expect("list");
		files.sort();
		assert_eq!(files, vec!["a.json".to_owned()]);
	}
}
