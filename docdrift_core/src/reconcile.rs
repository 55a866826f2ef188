use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Category;
use crate::InterfaceMap;
use crate::ModuleInterface;
use crate::NameSet;
use crate::SymbolKind;

/// Which side of the comparison holds a name the other side lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	/// Documentation describes a name the source no longer declares.
	DocumentedNotInSource,
	/// The source declares a name nothing documents.
	InSourceNotDocumented,
}

impl Direction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DocumentedNotInSource => "documented_not_in_source",
			Self::InSourceNotDocumented => "in_source_not_documented",
		}
	}

	/// Human-readable heading used when grouping findings.
	pub fn describe(self) -> &'static str {
		match self {
			Self::DocumentedNotInSource => "documented but not in source",
			Self::InSourceNotDocumented => "in source but not documented",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A name held by exactly one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
	pub module: String,
	pub category: Category,
	pub kind: SymbolKind,
	pub name: String,
	pub direction: Direction,
	/// Source files or documentation markers evidencing the name.
	#[serde(default)]
	pub locations: Vec<PathBuf>,
}

impl Discrepancy {
	fn sort_key(&self) -> (String, Category, SymbolKind, &str, Direction) {
		(
			self.module.to_lowercase(),
			self.category,
			self.kind,
			self.name.as_str(),
			self.direction,
		)
	}
}

/// A module present on only one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleFindingKind {
	/// A source module with no documentation module.
	UndocumentedModule,
	/// A documentation module with no source module.
	OrphanedDocModule,
}

impl ModuleFindingKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::UndocumentedModule => "undocumented_module",
			Self::OrphanedDocModule => "orphaned_doc_module",
		}
	}
}

impl fmt::Display for ModuleFindingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFinding {
	pub module: String,
	pub kind: ModuleFindingKind,
	/// Number of symbols the present side holds for this module.
	pub symbols: usize,
}

/// The outcome of comparing the actual and documented interface maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
	pub discrepancies: Vec<Discrepancy>,
	pub module_findings: Vec<ModuleFinding>,
	/// Modules present on both sides.
	pub modules_compared: usize,
}

impl Reconciliation {
	pub fn is_clean(&self) -> bool {
		self.discrepancies.is_empty() && self.module_findings.is_empty()
	}

	pub fn count(&self, direction: Direction) -> usize {
		self.discrepancies
			.iter()
			.filter(|discrepancy| discrepancy.direction == direction)
			.count()
	}
}

/// Compare the interface declared in source with the documented interface.
///
/// Modules are matched case-insensitively; names are compared exactly.
/// Discrepancies carry the module name as spelled in source.
pub fn reconcile(actual: &InterfaceMap, documented: &InterfaceMap) -> Reconciliation {
	let actual = fold_case(actual);
	let documented = fold_case(documented);
	let keys: BTreeSet<&String> = actual.keys().chain(documented.keys()).collect();

	let mut reconciliation = Reconciliation::default();

	for key in keys {
		match (actual.get(key), documented.get(key)) {
			(Some(source), Some(docs)) => {
				reconciliation.modules_compared += 1;
				diff_module(source, docs, &mut reconciliation.discrepancies);
			}
			(Some(source), None) => {
				reconciliation.module_findings.push(ModuleFinding {
					module: source.name.clone(),
					kind: ModuleFindingKind::UndocumentedModule,
					symbols: source.symbol_count(),
				});
			}
			(None, Some(docs)) => {
				reconciliation.module_findings.push(ModuleFinding {
					module: docs.name.clone(),
					kind: ModuleFindingKind::OrphanedDocModule,
					symbols: docs.symbol_count(),
				});
			}
			(None, None) => {}
		}
	}

	reconciliation
		.discrepancies
		.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

	debug!(
		compared = reconciliation.modules_compared,
		discrepancies = reconciliation.discrepancies.len(),
		module_findings = reconciliation.module_findings.len(),
		"reconciliation complete"
	);

	reconciliation
}

/// Merge modules whose names differ only in case. The first spelling in
/// sorted order names the merged module.
fn fold_case(map: &InterfaceMap) -> BTreeMap<String, ModuleInterface> {
	let mut folded: BTreeMap<String, ModuleInterface> = BTreeMap::new();

	for module in map.modules() {
		folded
			.entry(module.name.to_lowercase())
			.or_insert_with(|| ModuleInterface::new(&module.name))
			.merge(module);
	}

	folded
}

fn diff_module(source: &ModuleInterface, docs: &ModuleInterface, out: &mut Vec<Discrepancy>) {
	let empty = NameSet::new();

	for category in Category::ALL {
		for kind in SymbolKind::ALL {
			let in_source = source
				.category(category)
				.map_or(&empty, |interface| interface.names(kind));
			let in_docs = docs
				.category(category)
				.map_or(&empty, |interface| interface.names(kind));

			let mut push = |name: &str, direction: Direction, origins: &NameSet| {
				out.push(Discrepancy {
					module: source.name.clone(),
					category,
					kind,
					name: name.to_string(),
					direction,
					locations: origins.origins(name).map(Path::to_path_buf).collect(),
				});
			};

			for name in in_docs.names().filter(|name| !in_source.contains(name)) {
				push(name, Direction::DocumentedNotInSource, in_docs);
			}
			for name in in_source.names().filter(|name| !in_docs.contains(name)) {
				push(name, Direction::InSourceNotDocumented, in_source);
			}
		}
	}
}
