use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::DocDriftError;

/// The execution context an interface element applies to.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Client,
	Server,
	Shared,
}

impl Category {
	pub const ALL: [Category; 3] = [Self::Client, Self::Server, Self::Shared];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Client => "client",
			Self::Server => "server",
			Self::Shared => "shared",
		}
	}

	/// Infer the category of a source file from its path relative to the
	/// module directory.
	///
	/// Substring containment of `client` wins over `server`; anything else is
	/// `shared`. The `_client` / `_server` filename suffixes are covered by
	/// the containment check.
	pub fn infer(relative_path: &Path) -> Self {
		let lowered = relative_path
			.to_string_lossy()
			.replace('\\', "/")
			.to_lowercase();

		if lowered.contains("client") {
			Self::Client
		} else if lowered.contains("server") {
			Self::Server
		} else {
			Self::Shared
		}
	}

	/// Match a documentation directory name (`client`, `Server`, ...) to a
	/// category.
	pub fn from_dir_name(name: &str) -> Option<Self> {
		name.parse().ok()
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Category {
	type Err = DocDriftError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"client" => Ok(Self::Client),
			"server" => Ok(Self::Server),
			"shared" => Ok(Self::Shared),
			_ => Err(DocDriftError::UnknownCategory(value.to_string())),
		}
	}
}

/// Whether an interface element is a declared function or an observed event.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
	Function,
	Event,
}

impl SymbolKind {
	pub const ALL: [SymbolKind; 2] = [Self::Function, Self::Event];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Function => "function",
			Self::Event => "event",
		}
	}

	/// Name of the documentation directory / consolidated page stem holding
	/// records of this kind.
	pub fn docs_dir_name(self) -> &'static str {
		match self {
			Self::Function => "functions",
			Self::Event => "events",
		}
	}

	pub fn from_docs_dir_name(name: &str) -> Option<Self> {
		match name.to_ascii_lowercase().as_str() {
			"functions" => Some(Self::Function),
			"events" => Some(Self::Event),
			_ => None,
		}
	}
}

impl fmt::Display for SymbolKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SymbolKind {
	type Err = DocDriftError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"function" | "functions" => Ok(Self::Function),
			"event" | "events" => Ok(Self::Event),
			_ => Err(DocDriftError::UnknownKind(value.to_string())),
		}
	}
}

/// A set of names, each with the files it was observed in.
///
/// Merging two sets unions both the names and their origins, so the result
/// does not depend on merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSet(BTreeMap<String, BTreeSet<PathBuf>>);

impl NameSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, origin: impl Into<PathBuf>) {
		self.0
			.entry(name.into())
			.or_default()
			.insert(origin.into());
	}

	pub fn merge(&mut self, other: &NameSet) {
		for (name, origins) in &other.0 {
			self.0
				.entry(name.clone())
				.or_default()
				.extend(origins.iter().cloned());
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn origins(&self, name: &str) -> impl Iterator<Item = &Path> {
		self.0
			.get(name)
			.into_iter()
			.flat_map(|origins| origins.iter().map(PathBuf::as_path))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Functions and events found for one category of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInterface {
	pub functions: NameSet,
	pub events: NameSet,
}

impl CategoryInterface {
	pub fn names(&self, kind: SymbolKind) -> &NameSet {
		match kind {
			SymbolKind::Function => &self.functions,
			SymbolKind::Event => &self.events,
		}
	}

	pub fn names_mut(&mut self, kind: SymbolKind) -> &mut NameSet {
		match kind {
			SymbolKind::Function => &mut self.functions,
			SymbolKind::Event => &mut self.events,
		}
	}

	pub fn merge(&mut self, other: &CategoryInterface) {
		self.functions.merge(&other.functions);
		self.events.merge(&other.events);
	}

	pub fn is_empty(&self) -> bool {
		self.functions.is_empty() && self.events.is_empty()
	}
}

/// The interface of one module, split by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInterface {
	pub name: String,
	pub categories: BTreeMap<Category, CategoryInterface>,
}

impl ModuleInterface {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			categories: BTreeMap::new(),
		}
	}

	pub fn insert(
		&mut self,
		category: Category,
		kind: SymbolKind,
		name: impl Into<String>,
		origin: impl Into<PathBuf>,
	) {
		self.categories
			.entry(category)
			.or_default()
			.names_mut(kind)
			.insert(name, origin);
	}

	pub fn category(&self, category: Category) -> Option<&CategoryInterface> {
		self.categories.get(&category)
	}

	/// Union another interface into this one. The module name of `self` is
	/// kept.
	pub fn merge(&mut self, other: &ModuleInterface) {
		for (category, interface) in &other.categories {
			self.categories.entry(*category).or_default().merge(interface);
		}
	}

	pub fn symbol_count(&self) -> usize {
		self.categories
			.values()
			.map(|interface| interface.functions.len() + interface.events.len())
			.sum()
	}
}

/// Module name to module interface, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceMap(BTreeMap<String, ModuleInterface>);

impl InterfaceMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the interface for `name`, creating an empty one if needed.
	pub fn module_mut(&mut self, name: &str) -> &mut ModuleInterface {
		self.0
			.entry(name.to_string())
			.or_insert_with(|| ModuleInterface::new(name))
	}

	pub fn module(&self, name: &str) -> Option<&ModuleInterface> {
		self.0.get(name)
	}

	pub fn merge_module(&mut self, module: &ModuleInterface) {
		self.module_mut(&module.name).merge(module);
	}

	pub fn modules(&self) -> impl Iterator<Item = &ModuleInterface> {
		self.0.values()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
