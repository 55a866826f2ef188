use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::Category;
use crate::Corpus;
use crate::DocDriftResult;
use crate::DocLayout;
use crate::InterfaceMap;
use crate::ModuleInterface;
use crate::ScanWarning;
use crate::SymbolKind;
use crate::WarningKind;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::extractor::extract_section_headings;
use crate::walk;
use crate::walk::TreeFilter;

/// Documentation file extension for markers.
pub const DOC_EXTENSION: &str = "md";

/// File names inside a `functions/` or `events/` directory that describe
/// the directory rather than a symbol.
const NON_MARKER_FILES: [&str; 2] = ["readme", "index"];

/// Options for controlling how the documentation tree is scanned.
#[derive(Debug, Clone)]
pub struct DocScanOptions {
	pub layout: DocLayout,
	/// Gitignore-style patterns, relative to the documentation root, to
	/// exclude.
	pub exclude_patterns: Vec<String>,
	pub max_file_size: u64,
	pub disable_gitignore: bool,
}

impl Default for DocScanOptions {
	fn default() -> Self {
		Self {
			layout: DocLayout::Auto,
			exclude_patterns: Vec::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

/// How a documentation record is represented on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerLayout {
	/// The whole file documents the symbol.
	File,
	/// A level-2 heading inside a consolidated page documents the symbol.
	Section,
}

/// A documentation entry for one symbol or signal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocRecord {
	pub module: String,
	pub category: Category,
	pub kind: SymbolKind,
	pub name: String,
	pub marker: PathBuf,
	pub layout: MarkerLayout,
	/// 1-indexed line of the marker (always 1 for file markers).
	pub line: usize,
}

/// The result of scanning a documentation tree.
#[derive(Debug, Clone, Default)]
pub struct DocScan {
	pub interfaces: InterfaceMap,
	pub records: Vec<DocRecord>,
	pub warnings: Vec<ScanWarning>,
}

impl DocScan {
	/// Whether the documentation root itself was inaccessible.
	pub fn root_missing(&self) -> bool {
		self.warnings.iter().any(ScanWarning::is_terminal)
	}
}

/// Scan the documentation tree under `root` and build the documented
/// interface map.
///
/// Every top-level directory is a module; its `client`, `server` and
/// `shared` directories hold markers in the file layout
/// (`functions/<Name>.md`), the consolidated layout (`functions.md` with one
/// `## Name` heading per symbol) or both.
pub fn scan_docs(root: &Path, options: &DocScanOptions) -> DocDriftResult<DocScan> {
	let mut scan = DocScan::default();

	if !root.is_dir() {
		walk::record(
			&mut scan.warnings,
			ScanWarning::new(Corpus::Docs, root, WarningKind::RootMissing),
		);
		return Ok(scan);
	}

	let filter = TreeFilter::new(root, &options.exclude_patterns, options.disable_gitignore)?;

	for entry in walk::list_dir(root, Corpus::Docs, &mut scan.warnings) {
		if !entry.is_dir || filter.is_excluded(&entry.path, true) {
			continue;
		}

		let module_name = entry.file_name().to_string();
		let mut module = ModuleInterface::new(&module_name);
		catalog_module(&entry.path, &mut module, &filter, options, &mut scan);
		debug!(
			module = %module_name,
			records = module.symbol_count(),
			"catalogued documentation module"
		);
		scan.interfaces.merge_module(&module);
	}

	scan.records.sort();
	info!(
		modules = scan.interfaces.len(),
		records = scan.records.len(),
		warnings = scan.warnings.len(),
		"documentation scan complete"
	);

	Ok(scan)
}

fn catalog_module(
	module_dir: &Path,
	module: &mut ModuleInterface,
	filter: &TreeFilter,
	options: &DocScanOptions,
	scan: &mut DocScan,
) {
	for entry in walk::list_dir(module_dir, Corpus::Docs, &mut scan.warnings) {
		if !entry.is_dir || filter.is_excluded(&entry.path, true) {
			continue;
		}

		let Some(category) = Category::from_dir_name(entry.file_name()) else {
			walk::record(
				&mut scan.warnings,
				ScanWarning::new(Corpus::Docs, module_dir, WarningKind::UnknownCategoryDirectory {
					name: entry.file_name().to_string(),
				}),
			);
			continue;
		};

		for kind in SymbolKind::ALL {
			if options.layout.reads_files() {
				catalog_file_markers(&entry.path, category, kind, module, filter, scan);
			}
			if options.layout.reads_consolidated() {
				catalog_section_markers(&entry.path, category, kind, module, options, scan);
			}
		}
	}
}

/// `<category>/functions/<Name>.md`: one file per documented symbol.
fn catalog_file_markers(
	category_dir: &Path,
	category: Category,
	kind: SymbolKind,
	module: &mut ModuleInterface,
	filter: &TreeFilter,
	scan: &mut DocScan,
) {
	let Some(kind_dir) = find_child(category_dir, kind.docs_dir_name(), true) else {
		return;
	};

	for entry in walk::list_dir(&kind_dir, Corpus::Docs, &mut scan.warnings) {
		if entry.is_dir || filter.is_excluded(&entry.path, false) {
			continue;
		}
		let Some(name) = marker_name(&entry.path) else {
			continue;
		};

		module.insert(category, kind, name, &entry.path);
		scan.records.push(DocRecord {
			module: module.name.clone(),
			category,
			kind,
			name: name.to_string(),
			marker: entry.path.clone(),
			layout: MarkerLayout::File,
			line: 1,
		});
	}
}

/// `<category>/functions.md`: one level-2 heading per documented symbol.
fn catalog_section_markers(
	category_dir: &Path,
	category: Category,
	kind: SymbolKind,
	module: &mut ModuleInterface,
	options: &DocScanOptions,
	scan: &mut DocScan,
) {
	let page_name = format!("{}.{DOC_EXTENSION}", kind.docs_dir_name());
	let Some(page) = find_child(category_dir, &page_name, false) else {
		return;
	};
	let Some(content) = walk::read_text(
		&page,
		options.max_file_size,
		Corpus::Docs,
		&mut scan.warnings,
	) else {
		return;
	};

	for heading in extract_section_headings(&content, kind) {
		module.insert(category, kind, &heading.name, &page);
		scan.records.push(DocRecord {
			module: module.name.clone(),
			category,
			kind,
			name: heading.name,
			marker: page.clone(),
			layout: MarkerLayout::Section,
			line: heading.line,
		});
	}
}

/// Find a child of `dir` by case-insensitive name.
pub(crate) fn find_child(dir: &Path, name: &str, want_dir: bool) -> Option<PathBuf> {
	let exact = dir.join(name);
	if exact.exists() && exact.is_dir() == want_dir {
		return Some(exact);
	}

	std::fs::read_dir(dir)
		.ok()?
		.filter_map(Result::ok)
		.map(|entry| entry.path())
		.filter(|path| path.is_dir() == want_dir)
		.filter(|path| {
			path.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(|n| n.eq_ignore_ascii_case(name))
		})
		.min()
}

/// The documented name of a file marker: its stem, for `.md` files that are
/// not directory descriptions.
pub fn marker_name(path: &Path) -> Option<&str> {
	let extension = path.extension().and_then(|e| e.to_str())?;
	if !extension.eq_ignore_ascii_case(DOC_EXTENSION) {
		return None;
	}

	let stem = path.file_stem().and_then(|s| s.to_str())?;
	if stem.is_empty()
		|| NON_MARKER_FILES
			.iter()
			.any(|reserved| stem.eq_ignore_ascii_case(reserved))
	{
		return None;
	}

	Some(stem)
}
