use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;

use crate::Category;
use crate::CategoryOverrides;
use crate::Corpus;
use crate::DocDriftResult;
use crate::InterfaceMap;
use crate::ModuleInterface;
use crate::ScanWarning;
use crate::SymbolKind;
use crate::WarningKind;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::extractor::ExtractedInterface;
use crate::extractor::extract_interface;
use crate::walk;
use crate::walk::TreeFilter;

/// Options for controlling how the source tree is scanned.
#[derive(Debug, Clone)]
pub struct SourceScanOptions {
	/// File extensions (without the dot) to scan.
	pub extensions: Vec<String>,
	/// Gitignore-style patterns, relative to the source root, to exclude.
	pub exclude_patterns: Vec<String>,
	/// Explicit per-file category overrides.
	pub category_overrides: CategoryOverrides,
	/// Maximum file size to scan in bytes.
	pub max_file_size: u64,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for SourceScanOptions {
	fn default() -> Self {
		Self {
			extensions: vec!["lua".to_string()],
			exclude_patterns: Vec::new(),
			category_overrides: CategoryOverrides::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

/// A single source file, read and classified.
#[derive(Debug, Clone)]
pub struct SourceUnit {
	pub path: PathBuf,
	/// Path relative to the module directory. Category inference and
	/// overrides are matched against this.
	pub relative_path: PathBuf,
	pub category: Category,
	pub content: String,
}

impl SourceUnit {
	/// Build a unit from already loaded text.
	pub fn new(
		module_dir: &Path,
		path: impl Into<PathBuf>,
		content: impl Into<String>,
		overrides: &CategoryOverrides,
	) -> Self {
		let path = path.into();
		let relative_path = path
			.strip_prefix(module_dir)
			.map_or_else(|_| path.clone(), Path::to_path_buf);
		let category = overrides.classify(&relative_path);

		Self {
			path,
			relative_path,
			category,
			content: content.into(),
		}
	}

	pub fn extract(&self) -> ExtractedInterface {
		extract_interface(&self.content)
	}

	/// Merge this unit's extracted names into `module`.
	pub fn merge_into(&self, module: &mut ModuleInterface) {
		let extracted = self.extract();
		for name in extracted.functions {
			module.insert(self.category, SymbolKind::Function, name, &self.path);
		}
		for name in extracted.events {
			module.insert(self.category, SymbolKind::Event, name, &self.path);
		}
	}
}

/// The result of scanning a source tree.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
	pub interfaces: InterfaceMap,
	pub warnings: Vec<ScanWarning>,
	pub files_scanned: usize,
}

impl SourceScan {
	/// Whether the source root itself was inaccessible.
	pub fn root_missing(&self) -> bool {
		self.warnings.iter().any(ScanWarning::is_terminal)
	}
}

/// Scan every module directory under `root` and build the actual interface
/// map.
///
/// Every top-level directory is a module. A missing root yields an empty map
/// and a [`WarningKind::RootMissing`] warning.
pub fn scan_sources(root: &Path, options: &SourceScanOptions) -> DocDriftResult<SourceScan> {
	let mut scan = SourceScan::default();

	if !root.is_dir() {
		walk::record(
			&mut scan.warnings,
			ScanWarning::new(Corpus::Source, root, WarningKind::RootMissing),
		);
		return Ok(scan);
	}

	let filter = TreeFilter::new(root, &options.exclude_patterns, options.disable_gitignore)?;

	for entry in walk::list_dir(root, Corpus::Source, &mut scan.warnings) {
		if !entry.is_dir {
			debug!(path = %entry.path.display(), "skipping file outside of any module");
			continue;
		}
		if filter.is_excluded(&entry.path, true) {
			continue;
		}

		let module_name = entry.file_name().to_string();
		let module = scan_module(&entry.path, &module_name, &filter, options, &mut scan);
		debug!(
			module = %module_name,
			symbols = module.symbol_count(),
			"scanned source module"
		);
		scan.interfaces.merge_module(&module);
	}

	info!(
		modules = scan.interfaces.len(),
		files = scan.files_scanned,
		warnings = scan.warnings.len(),
		"source scan complete"
	);

	Ok(scan)
}

fn scan_module(
	module_dir: &Path,
	module_name: &str,
	filter: &TreeFilter,
	options: &SourceScanOptions,
	scan: &mut SourceScan,
) -> ModuleInterface {
	let mut module = ModuleInterface::new(module_name);
	let files = walk::collect_files(
		module_dir,
		filter,
		&options.extensions,
		Corpus::Source,
		&mut scan.warnings,
	);

	for file in files {
		let Some(content) = walk::read_text(
			&file,
			options.max_file_size,
			Corpus::Source,
			&mut scan.warnings,
		) else {
			continue;
		};

		let unit = SourceUnit::new(module_dir, file, content, &options.category_overrides);
		debug!(
			path = %unit.path.display(),
			category = %unit.category,
			"extracting interface"
		);
		unit.merge_into(&mut module);
		scan.files_scanned += 1;
	}

	module
}
