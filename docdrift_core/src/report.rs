use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Direction;
use crate::Discrepancy;
use crate::ModuleFinding;
use crate::ModuleFindingKind;
use crate::ScanWarning;

/// Everything one audit run found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
	pub source_root: PathBuf,
	pub docs_root: PathBuf,
	pub modules_in_source: usize,
	pub modules_documented: usize,
	pub files_scanned: usize,
	pub doc_records: usize,
	/// False when either root was inaccessible and no comparison ran.
	pub compared: bool,
	pub discrepancies: Vec<Discrepancy>,
	pub module_findings: Vec<ModuleFinding>,
	pub warnings: Vec<ScanWarning>,
}

impl AuditReport {
	/// No drift was found and both roots were readable.
	pub fn is_clean(&self) -> bool {
		self.compared && self.discrepancies.is_empty() && self.module_findings.is_empty()
	}

	pub fn count(&self, direction: Direction) -> usize {
		self.discrepancies
			.iter()
			.filter(|discrepancy| discrepancy.direction == direction)
			.count()
	}

	pub fn module_count(&self, kind: ModuleFindingKind) -> usize {
		self.module_findings
			.iter()
			.filter(|finding| finding.kind == kind)
			.count()
	}

	/// A copy with every path made relative to `base`, for display.
	pub fn relative_to(&self, base: &Path) -> AuditReport {
		let mut report = self.clone();
		report.source_root = make_relative(&report.source_root, base);
		report.docs_root = make_relative(&report.docs_root, base);
		for discrepancy in &mut report.discrepancies {
			for location in &mut discrepancy.locations {
				*location = make_relative(location, base);
			}
		}
		for warning in &mut report.warnings {
			warning.path = make_relative(&warning.path, base);
		}
		report
	}

	/// One-line summary of the run.
	pub fn summary(&self) -> String {
		let mut parts = vec![
			plural(
				self.count(Direction::InSourceNotDocumented),
				"undocumented symbol",
			),
			plural(
				self.count(Direction::DocumentedNotInSource),
				"stale documentation record",
			),
		];
		let undocumented = self.module_count(ModuleFindingKind::UndocumentedModule);
		if undocumented > 0 {
			parts.push(plural(undocumented, "undocumented module"));
		}
		let orphaned = self.module_count(ModuleFindingKind::OrphanedDocModule);
		if orphaned > 0 {
			parts.push(plural(orphaned, "orphaned documentation module"));
		}
		if !self.warnings.is_empty() {
			parts.push(plural(self.warnings.len(), "warning"));
		}

		parts.join(", ")
	}
}

/// Render the report as grouped text: per module, then per direction.
pub fn render_text(report: &AuditReport) -> String {
	let mut out = String::new();

	let _ = writeln!(
		out,
		"Audited {} source module(s) ({} file(s)) against {} documented module(s) ({} \
		 record(s)).",
		report.modules_in_source,
		report.files_scanned,
		report.modules_documented,
		report.doc_records
	);

	if !report.compared {
		let _ = writeln!(out, "Comparison skipped: a root is inaccessible.");
	}

	let mut modules: Vec<&str> = Vec::new();
	for discrepancy in &report.discrepancies {
		if modules.last() != Some(&discrepancy.module.as_str()) {
			modules.push(&discrepancy.module);
		}
	}

	for module in modules {
		let _ = writeln!(out);
		let _ = writeln!(out, "{module}");
		for direction in [
			Direction::InSourceNotDocumented,
			Direction::DocumentedNotInSource,
		] {
			let entries: Vec<&Discrepancy> = report
				.discrepancies
				.iter()
				.filter(|d| d.module == module && d.direction == direction)
				.collect();
			if entries.is_empty() {
				continue;
			}

			let _ = writeln!(out, "  {}:", direction.describe());
			for entry in entries {
				let _ = write!(out, "    {}/{} {}", entry.category, entry.kind, entry.name);
				if let Some(location) = entry.locations.first() {
					let _ = write!(out, " ({})", location.display());
				}
				let _ = writeln!(out);
			}
		}
	}

	for (kind, title) in [
		(
			ModuleFindingKind::UndocumentedModule,
			"Modules with no documentation:",
		),
		(
			ModuleFindingKind::OrphanedDocModule,
			"Documented modules with no source:",
		),
	] {
		let findings: Vec<&ModuleFinding> = report
			.module_findings
			.iter()
			.filter(|finding| finding.kind == kind)
			.collect();
		if findings.is_empty() {
			continue;
		}

		let _ = writeln!(out);
		let _ = writeln!(out, "{title}");
		for finding in findings {
			let _ = writeln!(out, "  {} ({} symbol(s))", finding.module, finding.symbols);
		}
	}

	if !report.warnings.is_empty() {
		let _ = writeln!(out);
		let _ = writeln!(out, "Warnings:");
		for warning in &report.warnings {
			let _ = writeln!(out, "  {warning}");
		}
	}

	let _ = writeln!(out);
	let _ = writeln!(out, "{}", report.summary());

	out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &AuditReport) -> serde_json::Result<String> {
	serde_json::to_string_pretty(report)
}

/// Render the report as GitHub Actions workflow annotations.
pub fn render_github(report: &AuditReport) -> String {
	let mut out = String::new();

	for discrepancy in &report.discrepancies {
		let message = format!(
			"{} `{}` in {}/{} is {}",
			discrepancy.kind,
			discrepancy.name,
			discrepancy.module,
			discrepancy.category,
			discrepancy.direction.describe()
		);
		match discrepancy.locations.first() {
			Some(location) => {
				let _ = writeln!(
					out,
					"::warning file={}::{message}",
					location.display()
				);
			}
			None => {
				let _ = writeln!(out, "::warning::{message}");
			}
		}
	}

	for finding in &report.module_findings {
		let message = match finding.kind {
			ModuleFindingKind::UndocumentedModule => {
				format!("module `{}` has no documentation", finding.module)
			}
			ModuleFindingKind::OrphanedDocModule => {
				format!("documentation module `{}` has no source", finding.module)
			}
		};
		let _ = writeln!(out, "::warning::{message}");
	}

	for warning in &report.warnings {
		let level = if warning.is_terminal() { "error" } else { "notice" };
		let _ = writeln!(
			out,
			"::{level} file={}::{}",
			warning.path.display(),
			warning.message()
		);
	}

	out
}

/// Strip `base` from `path` when possible.
pub fn make_relative(path: &Path, base: &Path) -> PathBuf {
	path.strip_prefix(base)
		.map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

fn plural(count: usize, noun: &str) -> String {
	if count == 1 {
		format!("{count} {noun}")
	} else {
		format!("{count} {noun}s")
	}
}
