use std::collections::HashSet;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use tracing::debug;
use tracing::warn;

use crate::Corpus;
use crate::DocDriftError;
use crate::DocDriftResult;
use crate::ScanWarning;
use crate::WarningKind;

/// Gitignore and `[exclude]` rules for one tree.
#[derive(Debug)]
pub(crate) struct TreeFilter {
	gitignore: Gitignore,
	exclude: Gitignore,
}

impl TreeFilter {
	/// `exclude_patterns` use `.gitignore` syntax relative to `root`. The
	/// root's own `.gitignore` is read unless `disable_gitignore` is set.
	/// Lines of it that fail to parse are logged and dropped.
	pub(crate) fn new(
		root: &Path,
		exclude_patterns: &[String],
		disable_gitignore: bool,
	) -> DocDriftResult<Self> {
		let gitignore_path = root.join(".gitignore");
		let gitignore = if disable_gitignore || !gitignore_path.is_file() {
			Gitignore::empty()
		} else {
			let (gitignore, error) = Gitignore::new(&gitignore_path);
			if let Some(error) = error {
				debug!(path = %gitignore_path.display(), %error, "partially parsed .gitignore");
			}
			gitignore
		};

		let mut rules = GitignoreBuilder::new(root);
		for pattern in exclude_patterns {
			if let Err(error) = rules.add_line(None, pattern) {
				return Err(DocDriftError::ConfigParse(format!(
					"invalid exclude pattern `{pattern}`: {error}"
				)));
			}
		}
		let exclude = rules.build().map_err(|error| {
			DocDriftError::ConfigParse(format!("[exclude] patterns: {error}"))
		})?;

		Ok(Self { gitignore, exclude })
	}

	pub(crate) fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
		let skipped_dir = is_dir
			&& path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(is_ignored_directory_name);

		skipped_dir
			|| self.gitignore.matched(path, is_dir).is_ignore()
			|| self.exclude.matched(path, is_dir).is_ignore()
	}
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

/// A directory entry with its type resolved.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
	pub(crate) path: PathBuf,
	pub(crate) is_dir: bool,
}

impl Entry {
	pub(crate) fn file_name(&self) -> &str {
		self.path
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or_default()
	}
}

/// List a directory in sorted order. Failures are recorded as warnings and
/// yield an empty listing.
pub(crate) fn list_dir(dir: &Path, corpus: Corpus, warnings: &mut Vec<ScanWarning>) -> Vec<Entry> {
	let read_dir = match std::fs::read_dir(dir) {
		Ok(read_dir) => read_dir,
		Err(error) => {
			record(
				warnings,
				ScanWarning::new(corpus, dir, WarningKind::UnreadableDirectory {
					reason: error.to_string(),
				}),
			);
			return Vec::new();
		}
	};

	let mut entries = Vec::new();
	for entry in read_dir {
		match entry {
			Ok(entry) => {
				let path = entry.path();
				// Follow symlinks so linked module directories are scanned.
				let is_dir = path.is_dir();
				entries.push(Entry { path, is_dir });
			}
			Err(error) => {
				record(
					warnings,
					ScanWarning::new(corpus, dir, WarningKind::UnreadableDirectory {
						reason: error.to_string(),
					}),
				);
			}
		}
	}

	entries.sort_by(|a, b| a.path.cmp(&b.path));
	entries
}

/// Recursively collect files under `dir` whose extension is in
/// `extensions`, in sorted order.
pub(crate) fn collect_files(
	dir: &Path,
	filter: &TreeFilter,
	extensions: &[String],
	corpus: Corpus,
	warnings: &mut Vec<ScanWarning>,
) -> Vec<PathBuf> {
	let mut files = Vec::new();
	let mut ancestors = HashSet::new();
	walk_dir(
		dir,
		filter,
		extensions,
		corpus,
		&mut files,
		&mut ancestors,
		warnings,
	);
	files.sort();
	files
}

fn walk_dir(
	dir: &Path,
	filter: &TreeFilter,
	extensions: &[String],
	corpus: Corpus,
	files: &mut Vec<PathBuf>,
	ancestors: &mut HashSet<PathBuf>,
	warnings: &mut Vec<ScanWarning>,
) {
	// A directory that resolves to one of its own ancestors is a cycle. Two
	// links to the same directory elsewhere in the tree are both walked.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if ancestors.contains(&canonical) {
		record(warnings, ScanWarning::new(corpus, dir, WarningKind::SymlinkCycle));
		return;
	}
	ancestors.insert(canonical.clone());

	for entry in list_dir(dir, corpus, warnings) {
		if filter.is_excluded(&entry.path, entry.is_dir) {
			continue;
		}

		if entry.is_dir {
			walk_dir(
				&entry.path,
				filter,
				extensions,
				corpus,
				files,
				ancestors,
				warnings,
			);
		} else if has_extension(&entry.path, extensions) {
			files.push(entry.path);
		}
	}

	ancestors.remove(&canonical);
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
	let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
		return false;
	};

	extensions
		.iter()
		.any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Read a file as text, honouring the size limit. Failures become warnings.
pub(crate) fn read_text(
	path: &Path,
	max_file_size: u64,
	corpus: Corpus,
	warnings: &mut Vec<ScanWarning>,
) -> Option<String> {
	match std::fs::metadata(path) {
		Ok(metadata) if metadata.len() > max_file_size => {
			record(
				warnings,
				ScanWarning::new(corpus, path, WarningKind::FileTooLarge {
					size: metadata.len(),
					limit: max_file_size,
				}),
			);
			return None;
		}
		Ok(_) => {}
		Err(error) => {
			record(
				warnings,
				ScanWarning::new(corpus, path, WarningKind::UnreadableFile {
					reason: error.to_string(),
				}),
			);
			return None;
		}
	}

	match std::fs::read_to_string(path) {
		Ok(content) => Some(normalize_line_endings(&content)),
		Err(error) => {
			record(
				warnings,
				ScanWarning::new(corpus, path, WarningKind::UnreadableFile {
					reason: error.to_string(),
				}),
			);
			None
		}
	}
}

/// Resolve `.` and `..` components without touching the filesystem. Leading
/// `..` of a relative path are kept.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				match normalized.components().next_back() {
					Some(Component::Normal(_)) => {
						normalized.pop();
					}
					Some(Component::RootDir | Component::Prefix(_)) => {}
					_ => normalized.push(component),
				}
			}
			_ => normalized.push(component),
		}
	}
	normalized
}

/// Fail unless `path` lies strictly inside `docs_root` once both are
/// normalized.
pub(crate) fn ensure_inside(path: &Path, docs_root: &Path) -> DocDriftResult<()> {
	let root = normalize_path(docs_root);
	let inside = normalize_path(path)
		.strip_prefix(&root)
		.is_ok_and(|rest| {
			rest.components().next().is_some()
				&& rest.components().all(|c| matches!(c, Component::Normal(_)))
		});

	if inside {
		Ok(())
	} else {
		Err(DocDriftError::OutsideDocsRoot {
			path: path.display().to_string(),
			root: docs_root.display().to_string(),
		})
	}
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

pub(crate) fn record(warnings: &mut Vec<ScanWarning>, warning: ScanWarning) {
	warn!(corpus = %warning.corpus, path = %warning.path.display(), "{}", warning.message());
	warnings.push(warning);
}
