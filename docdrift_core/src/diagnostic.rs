use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Which of the two trees a scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corpus {
	Source,
	Docs,
}

impl fmt::Display for Corpus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Source => f.write_str("source"),
			Self::Docs => f.write_str("documentation"),
		}
	}
}

/// The kind of recoverable problem met while walking a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum WarningKind {
	/// The root of a tree does not exist or is not a directory. Nothing can
	/// be compared against it.
	RootMissing,
	/// A file could not be read (permissions, invalid UTF-8, ...).
	UnreadableFile { reason: String },
	/// A directory could not be listed.
	UnreadableDirectory { reason: String },
	/// A file exceeded the configured size limit.
	FileTooLarge { size: u64, limit: u64 },
	/// A directory was reached twice through symlinks.
	SymlinkCycle,
	/// A documentation module contains a directory that is not a category.
	UnknownCategoryDirectory { name: String },
}

/// A recoverable problem met while scanning. Never aborts the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
	pub corpus: Corpus,
	pub path: PathBuf,
	#[serde(flatten)]
	pub kind: WarningKind,
}

impl ScanWarning {
	pub fn new(corpus: Corpus, path: impl Into<PathBuf>, kind: WarningKind) -> Self {
		Self {
			corpus,
			path: path.into(),
			kind,
		}
	}

	/// Whether this warning ends the comparison for the run.
	pub fn is_terminal(&self) -> bool {
		matches!(self.kind, WarningKind::RootMissing)
	}

	/// Human-readable message for this warning.
	pub fn message(&self) -> String {
		let path = self.path.display();
		match &self.kind {
			WarningKind::RootMissing => {
				format!("{} root `{path}` is inaccessible", self.corpus)
			}
			WarningKind::UnreadableFile { reason } => {
				format!("skipped unreadable file `{path}`: {reason}")
			}
			WarningKind::UnreadableDirectory { reason } => {
				format!("skipped unreadable directory `{path}`: {reason}")
			}
			WarningKind::FileTooLarge { size, limit } => {
				format!("skipped `{path}`: {size} bytes exceeds the {limit} byte limit")
			}
			WarningKind::SymlinkCycle => format!("skipped symlink cycle at `{path}`"),
			WarningKind::UnknownCategoryDirectory { name } => {
				format!("ignored directory `{name}` in `{path}`: not client, server or shared")
			}
		}
	}
}

impl fmt::Display for ScanWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message())
	}
}
