use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;
use tracing::info;

use crate::Direction;
use crate::Discrepancy;
use crate::DocDriftError;
use crate::DocDriftResult;
use crate::SymbolKind;
use crate::extractor::extract_section_headings;
use crate::marker_name;
use crate::walk::ensure_inside;
use crate::walk::normalize_line_endings;

/// A consolidated page with one or more sections removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRewrite {
	pub original: String,
	pub updated: String,
	pub removed: Vec<String>,
}

/// The changes a prune would make. Nothing is touched until
/// [`apply_prune`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
	/// File markers to delete.
	pub deletions: BTreeSet<PathBuf>,
	/// Consolidated pages to rewrite.
	pub rewrites: BTreeMap<PathBuf, PageRewrite>,
}

impl PrunePlan {
	pub fn is_empty(&self) -> bool {
		self.deletions.is_empty() && self.rewrites.is_empty()
	}

	/// Number of documentation records the plan removes.
	pub fn removed_count(&self) -> usize {
		self.deletions.len()
			+ self
				.rewrites
				.values()
				.map(|rewrite| rewrite.removed.len())
				.sum::<usize>()
	}
}

/// The result of applying a prune plan.
#[derive(Debug, Default)]
pub struct PruneResult {
	pub deleted_files: Vec<PathBuf>,
	pub rewritten_files: Vec<PathBuf>,
}

/// Plan the removal of every `documented_not_in_source` record in
/// `discrepancies`.
///
/// File markers are deleted; sections of consolidated pages are cut out.
/// Every location must lie inside `docs_root`.
pub fn plan_prune(discrepancies: &[Discrepancy], docs_root: &Path) -> DocDriftResult<PrunePlan> {
	let mut plan = PrunePlan::default();

	for discrepancy in discrepancies
		.iter()
		.filter(|d| d.direction == Direction::DocumentedNotInSource)
	{
		for location in &discrepancy.locations {
			ensure_inside(location, docs_root)?;

			if is_file_marker(location, discrepancy.kind, &discrepancy.name) {
				if location.is_file() {
					plan.deletions.insert(location.clone());
				} else {
					debug!(path = %location.display(), "marker already removed");
				}
				continue;
			}

			if !plan.rewrites.contains_key(location) {
				if !location.is_file() {
					debug!(path = %location.display(), "page already removed");
					continue;
				}
				let content = normalize_line_endings(&std::fs::read_to_string(location)?);
				plan.rewrites.insert(location.clone(), PageRewrite {
					original: content.clone(),
					updated: content,
					removed: Vec::new(),
				});
			}

			if let Some(rewrite) = plan.rewrites.get_mut(location) {
				let removed = remove_section(&rewrite.updated, discrepancy.kind, &discrepancy.name);
				if let Some(updated) = removed {
					rewrite.updated = updated;
					rewrite.removed.push(discrepancy.name.clone());
				}
			}
		}
	}

	plan.rewrites.retain(|_, rewrite| !rewrite.removed.is_empty());

	debug!(
		deletions = plan.deletions.len(),
		rewrites = plan.rewrites.len(),
		"planned prune"
	);

	Ok(plan)
}

/// Delete and rewrite the files named by `plan`.
pub fn apply_prune(plan: &PrunePlan) -> DocDriftResult<PruneResult> {
	let mut result = PruneResult::default();

	for path in &plan.deletions {
		std::fs::remove_file(path)?;
		result.deleted_files.push(path.clone());
	}

	for (path, rewrite) in &plan.rewrites {
		std::fs::write(path, &rewrite.updated)?;
		result.rewritten_files.push(path.clone());
	}

	info!(
		deleted = result.deleted_files.len(),
		rewritten = result.rewritten_files.len(),
		"prune applied"
	);

	Ok(result)
}

/// Remove every level-2 section named `name` from a consolidated page.
///
/// A section runs from its heading to the next level-2 heading. Returns
/// `None` when no section has that name.
pub fn remove_section(content: &str, kind: SymbolKind, name: &str) -> Option<String> {
	let headings = extract_section_headings(content, kind);
	if !headings.iter().any(|heading| heading.name == name) {
		return None;
	}

	let lines: Vec<&str> = content.split_inclusive('\n').collect();
	let mut keep = vec![true; lines.len()];
	let mut removed_last = false;

	for (index, heading) in headings.iter().enumerate() {
		if heading.name != name {
			continue;
		}
		let start = heading.line - 1;
		let end = headings
			.get(index + 1)
			.map_or(lines.len(), |next| next.line - 1);
		for flag in &mut keep[start..end] {
			*flag = false;
		}
		removed_last |= index + 1 == headings.len();
	}

	let mut updated: String = lines
		.iter()
		.zip(&keep)
		.filter(|(_, keep)| **keep)
		.map(|(line, _)| *line)
		.collect();

	if removed_last {
		// With sections left, a trailing rule is the previous section's
		// separator. Without any, it closes the frontmatter.
		let sections_left = headings.iter().any(|heading| heading.name != name);
		loop {
			let trimmed = updated.trim_end();
			let without_rule = trimmed.strip_suffix("---").unwrap_or(trimmed);
			if !sections_left || without_rule.len() == trimmed.len() {
				updated.truncate(trimmed.len());
				break;
			}
			updated.truncate(without_rule.len());
		}
		if !updated.is_empty() {
			updated.push('\n');
		}
	}

	Some(updated)
}

fn is_file_marker(path: &Path, kind: SymbolKind, name: &str) -> bool {
	let in_kind_dir = path
		.parent()
		.and_then(Path::file_name)
		.and_then(|dir| dir.to_str())
		.is_some_and(|dir| dir.eq_ignore_ascii_case(kind.docs_dir_name()));

	in_kind_dir && marker_name(path) == Some(name)
}

/// Either a full JSON report or a bare list of discrepancies.
#[derive(Deserialize)]
#[serde(untagged)]
enum IssueListDocument {
	Report { discrepancies: Vec<Discrepancy> },
	List(Vec<Discrepancy>),
}

/// Parse an issue list produced by `check --format json`.
pub fn parse_issue_list(content: &str) -> Result<Vec<Discrepancy>, serde_json::Error> {
	let document: IssueListDocument = serde_json::from_str(content)?;
	Ok(match document {
		IssueListDocument::Report { discrepancies } | IssueListDocument::List(discrepancies) => {
			discrepancies
		}
	})
}

/// Load an issue list from `path`. Relative locations are resolved against
/// `project_root`.
pub fn load_issue_list(path: &Path, project_root: &Path) -> DocDriftResult<Vec<Discrepancy>> {
	let issue_list_error = |reason: String| {
		DocDriftError::IssueList {
			path: path.display().to_string(),
			reason,
		}
	};

	let content = std::fs::read_to_string(path).map_err(|e| issue_list_error(e.to_string()))?;
	let mut discrepancies =
		parse_issue_list(&content).map_err(|e| issue_list_error(e.to_string()))?;

	for discrepancy in &mut discrepancies {
		for location in &mut discrepancy.locations {
			if location.is_relative() {
				*location = project_root.join(&*location);
			}
		}
	}

	Ok(discrepancies)
}
