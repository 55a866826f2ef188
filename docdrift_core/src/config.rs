use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use serde::Deserialize;

use crate::Category;
use crate::DocDriftError;
use crate::DocDriftResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"docdrift.toml",
	".docdrift.toml",
	".config/docdrift.toml",
];

/// Source root used when neither the config nor the command line names one.
pub const DEFAULT_SOURCE_ROOT: &str = "modules";

/// Documentation root used when neither the config nor the command line
/// names one.
pub const DEFAULT_DOCS_ROOT: &str = "docs/modules";

/// Configuration loaded from a `docdrift.toml` file.
///
/// ```toml
/// max_file_size = 1048576
/// disable_gitignore = false
///
/// [source]
/// root = "resources/community_bridge/modules"
/// extensions = ["lua"]
///
/// [docs]
/// root = "community_bridge/modules"
/// layout = "auto"
///
/// [exclude]
/// patterns = ["**/locales/", "*.min.lua"]
///
/// [categories]
/// "**/cl_*.lua" = "client"
/// "**/sv_*.lua" = "server"
///
/// [scaffold]
/// template = "# {{ name }}\n"
/// ```
#[derive(Debug, Deserialize)]
pub struct DocDriftConfig {
	#[serde(default)]
	pub source: SourceConfig,
	#[serde(default)]
	pub docs: DocsConfig,
	/// Exclusion configuration using gitignore-style patterns. Applied to
	/// both the source and the documentation walks.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Explicit category overrides: glob (relative to the module directory)
	/// to category. The first matching glob in key order wins.
	#[serde(default)]
	pub categories: BTreeMap<String, Category>,
	#[serde(default)]
	pub scaffold: ScaffoldConfig,
	/// Maximum file size in bytes to scan. Larger files are skipped with a
	/// warning. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
}

impl Default for DocDriftConfig {
	fn default() -> Self {
		Self {
			source: SourceConfig::default(),
			docs: DocsConfig::default(),
			exclude: ExcludeConfig::default(),
			categories: BTreeMap::new(),
			scaffold: ScaffoldConfig::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
	/// Source root, relative to the project root.
	#[serde(default = "default_source_root")]
	pub root: PathBuf,
	/// File extensions (without the dot) that are scanned for interface
	/// declarations.
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			root: default_source_root(),
			extensions: default_extensions(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
	/// Documentation root, relative to the project root.
	#[serde(default = "default_docs_root")]
	pub root: PathBuf,
	#[serde(default)]
	pub layout: DocLayout,
}

impl Default for DocsConfig {
	fn default() -> Self {
		Self {
			root: default_docs_root(),
			layout: DocLayout::default(),
		}
	}
}

/// How documentation records are laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocLayout {
	/// One file per symbol: `<module>/<category>/functions/<Name>.md`.
	Files,
	/// One page per module/category/kind with a level-2 heading per symbol:
	/// `<module>/<category>/functions.md`.
	Consolidated,
	/// Recognize both layouts.
	#[default]
	Auto,
}

impl DocLayout {
	pub fn reads_files(self) -> bool {
		matches!(self, Self::Files | Self::Auto)
	}

	pub fn reads_consolidated(self) -> bool {
		matches!(self, Self::Consolidated | Self::Auto)
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScaffoldConfig {
	/// A minijinja template used for generated pages. When absent the
	/// built-in template is used.
	#[serde(default)]
	pub template: Option<String>,
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_source_root() -> PathBuf {
	PathBuf::from(DEFAULT_SOURCE_ROOT)
}

fn default_docs_root() -> PathBuf {
	PathBuf::from(DEFAULT_DOCS_ROOT)
}

fn default_extensions() -> Vec<String> {
	vec!["lua".to_string()]
}

impl DocDriftConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> DocDriftResult<Option<DocDriftConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> DocDriftResult<DocDriftConfig> {
		toml::from_str(content).map_err(|e| DocDriftError::ConfigParse(e.to_string()))
	}
}

/// Compiled `[categories]` overrides.
#[derive(Debug, Clone)]
pub struct CategoryOverrides {
	set: GlobSet,
	categories: Vec<Category>,
}

impl Default for CategoryOverrides {
	fn default() -> Self {
		Self {
			set: GlobSet::empty(),
			categories: Vec::new(),
		}
	}
}

impl CategoryOverrides {
	pub fn new(patterns: &BTreeMap<String, Category>) -> DocDriftResult<Self> {
		let mut builder = GlobSetBuilder::new();
		let mut categories = Vec::with_capacity(patterns.len());

		for (pattern, category) in patterns {
			let glob = Glob::new(pattern).map_err(|e| {
				DocDriftError::InvalidCategoryPattern {
					pattern: pattern.clone(),
					reason: e.to_string(),
				}
			})?;
			builder.add(glob);
			categories.push(*category);
		}

		let set = builder
			.build()
			.map_err(|e| DocDriftError::InvalidCategoryPattern {
				pattern: patterns.keys().cloned().collect::<Vec<_>>().join(", "),
				reason: e.to_string(),
			})?;

		Ok(Self { set, categories })
	}

	/// The category forced for `relative_path`, if any override matches.
	pub fn lookup(&self, relative_path: &Path) -> Option<Category> {
		self.set
			.matches(relative_path)
			.into_iter()
			.min()
			.map(|index| self.categories[index])
	}

	/// Classify a file: explicit override first, then the path heuristic.
	pub fn classify(&self, relative_path: &Path) -> Category {
		self.lookup(relative_path)
			.unwrap_or_else(|| Category::infer(relative_path))
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}
}
