use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::warn;

use crate::AuditReport;
use crate::CategoryOverrides;
use crate::DocDriftConfig;
use crate::DocDriftResult;
use crate::DocLayout;
use crate::DocScan;
use crate::DocScanOptions;
use crate::Reconciliation;
use crate::SourceScan;
use crate::SourceScanOptions;
use crate::reconcile;
use crate::scan_docs;
use crate::scan_sources;

/// Everything needed to run an audit over a project.
#[derive(Debug, Clone)]
pub struct AuditOptions {
	pub source_root: PathBuf,
	pub docs_root: PathBuf,
	pub source: SourceScanOptions,
	pub docs: DocScanOptions,
}

impl AuditOptions {
	/// Build options from a loaded config (or defaults when `config` is
	/// `None`). Relative roots are resolved against `project_root`; explicit
	/// overrides win over the config.
	pub fn from_config(
		project_root: &Path,
		config: Option<&DocDriftConfig>,
		source_override: Option<&Path>,
		docs_override: Option<&Path>,
	) -> DocDriftResult<Self> {
		let default_config;
		let config = if let Some(config) = config {
			config
		} else {
			default_config = DocDriftConfig::default();
			&default_config
		};

		let source_root = project_root.join(source_override.unwrap_or(config.source.root.as_path()));
		let docs_root = project_root.join(docs_override.unwrap_or(config.docs.root.as_path()));

		let source = SourceScanOptions {
			extensions: config.source.extensions.clone(),
			exclude_patterns: config.exclude.patterns.clone(),
			category_overrides: CategoryOverrides::new(&config.categories)?,
			max_file_size: config.max_file_size,
			disable_gitignore: config.disable_gitignore,
		};
		let docs = DocScanOptions {
			layout: config.docs.layout,
			exclude_patterns: config.exclude.patterns.clone(),
			max_file_size: config.max_file_size,
			disable_gitignore: config.disable_gitignore,
		};

		Ok(Self {
			source_root,
			docs_root,
			source,
			docs,
		})
	}

	/// Options over explicit roots with default scan settings.
	pub fn new(source_root: impl Into<PathBuf>, docs_root: impl Into<PathBuf>) -> Self {
		Self {
			source_root: source_root.into(),
			docs_root: docs_root.into(),
			source: SourceScanOptions::default(),
			docs: DocScanOptions::default(),
		}
	}

	#[must_use]
	pub fn with_layout(mut self, layout: DocLayout) -> Self {
		self.docs.layout = layout;
		self
	}
}

/// The scans behind a report, kept for callers that need more than the
/// findings (scaffold and `list`).
#[derive(Debug, Clone)]
pub struct Audit {
	pub source: SourceScan,
	pub docs: DocScan,
	pub report: AuditReport,
}

/// Scan both trees and reconcile them.
///
/// An inaccessible root never fails the run: the report carries the warning
/// and no comparison is made.
pub fn run_audit(options: &AuditOptions) -> DocDriftResult<Audit> {
	let source = scan_sources(&options.source_root, &options.source)?;
	let docs = scan_docs(&options.docs_root, &options.docs)?;

	let mut warnings = source.warnings.clone();
	warnings.extend(docs.warnings.iter().cloned());

	let compared = !source.root_missing() && !docs.root_missing();
	let reconciliation = if compared {
		reconcile(&source.interfaces, &docs.interfaces)
	} else {
		warn!("skipping reconciliation: a root is inaccessible");
		Reconciliation::default()
	};

	let report = AuditReport {
		source_root: options.source_root.clone(),
		docs_root: options.docs_root.clone(),
		modules_in_source: source.interfaces.len(),
		modules_documented: docs.interfaces.len(),
		files_scanned: source.files_scanned,
		doc_records: docs.records.len(),
		compared,
		discrepancies: reconciliation.discrepancies,
		module_findings: reconciliation.module_findings,
		warnings,
	};

	info!(
		discrepancies = report.discrepancies.len(),
		module_findings = report.module_findings.len(),
		clean = report.is_clean(),
		"audit complete"
	);

	Ok(Audit {
		source,
		docs,
		report,
	})
}
