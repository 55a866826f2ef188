use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::Category;
use crate::Direction;
use crate::Discrepancy;
use crate::DocDriftError;
use crate::DocDriftResult;
use crate::SymbolKind;
use crate::catalog::DOC_EXTENSION;
use crate::catalog::find_child;
use crate::walk::ensure_inside;

/// The page written for an undocumented symbol when no template is
/// configured.
pub const DEFAULT_STUB_TEMPLATE: &str = r#"---
title: {{ name }}
parent: {{ kind_title }}
grand_parent: {{ module_title }}
nav_order: 1
---

# {{ name }}

{{ kind | capitalize }} of the `{{ module }}` module ({{ category }}).
{% if source %}
Declared in `{{ source }}`.
{% endif %}
## Syntax

```lua
{% if kind == "event" %}RegisterNetEvent("{{ name }}", function(...) end){% else %}{{ name }}(){% endif %}
```

## Example

```lua
-- Example usage will be added
```
"#;

/// Values available to a stub template.
#[derive(Debug, Clone, Serialize)]
pub struct StubContext {
	pub name: String,
	pub module: String,
	/// The module name title-cased (`community_bridge` is `Community_Bridge`).
	pub module_title: String,
	pub category: Category,
	pub kind: SymbolKind,
	/// `Functions` or `Events`.
	pub kind_title: String,
	/// First source file declaring the symbol, relative to the project root.
	pub source: Option<String>,
}

/// A stub page to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubPage {
	pub path: PathBuf,
	pub content: String,
}

/// The pages a scaffold run would create.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldPlan {
	pub pages: Vec<StubPage>,
	/// Target paths that already exist and are left alone.
	pub skipped: Vec<PathBuf>,
	/// Symbols whose name cannot be used as a file name, such as event
	/// literals containing `/` or `..`.
	pub rejected: Vec<Discrepancy>,
}

/// Render a stub for every `in_source_not_documented` discrepancy.
///
/// Pages go to `<docs_root>/<module>/<category>/<functions|events>/<Name>.md`.
/// Existing files are never overwritten. `template` replaces the built-in
/// [`DEFAULT_STUB_TEMPLATE`].
pub fn plan_scaffold(
	discrepancies: &[Discrepancy],
	docs_root: &Path,
	project_root: &Path,
	template: Option<&str>,
) -> DocDriftResult<ScaffoldPlan> {
	let mut env = minijinja::Environment::new();
	env.set_keep_trailing_newline(true);
	env.add_template("stub", template.unwrap_or(DEFAULT_STUB_TEMPLATE))
		.map_err(|e| DocDriftError::TemplateRender(e.to_string()))?;
	let stub = env
		.get_template("stub")
		.map_err(|e| DocDriftError::TemplateRender(e.to_string()))?;

	let mut plan = ScaffoldPlan::default();

	for discrepancy in discrepancies
		.iter()
		.filter(|d| d.direction == Direction::InSourceNotDocumented)
	{
		if !is_file_stem(&discrepancy.name) {
			warn!(
				module = %discrepancy.module,
				name = %discrepancy.name,
				"name is not a valid page name, not scaffolding"
			);
			plan.rejected.push(discrepancy.clone());
			continue;
		}

		let path = stub_path(docs_root, discrepancy);
		ensure_inside(&path, docs_root)?;
		if path.exists() || plan.pages.iter().any(|page| page.path == path) {
			debug!(path = %path.display(), "stub target exists, skipping");
			plan.skipped.push(path);
			continue;
		}

		let context = StubContext::new(discrepancy, project_root);
		let content = stub
			.render(&context)
			.map_err(|e| DocDriftError::TemplateRender(e.to_string()))?;
		plan.pages.push(StubPage { path, content });
	}

	Ok(plan)
}

/// Write the pages of `plan`, creating directories as needed. Returns the
/// written paths.
pub fn write_scaffold(plan: &ScaffoldPlan) -> DocDriftResult<Vec<PathBuf>> {
	let mut written = Vec::with_capacity(plan.pages.len());

	for page in &plan.pages {
		// Re-check: the tree may have changed since planning.
		if page.path.exists() {
			continue;
		}
		if let Some(parent) = page.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&page.path, &page.content)?;
		written.push(page.path.clone());
	}

	info!(written = written.len(), skipped = plan.skipped.len(), "scaffold complete");

	Ok(written)
}

/// Where the stub page for `discrepancy` lives in the file layout.
///
/// Existing module, category and kind directories are reused whatever their
/// case, so a page for source module `Housing` lands in `housing/` when that
/// is how the documentation spells it.
pub fn stub_path(docs_root: &Path, discrepancy: &Discrepancy) -> PathBuf {
	let module_dir = existing_dir(docs_root, &discrepancy.module);
	let category_dir = existing_dir(&module_dir, discrepancy.category.as_str());
	let kind_dir = existing_dir(&category_dir, discrepancy.kind.docs_dir_name());

	kind_dir.join(format!("{}.{DOC_EXTENSION}", discrepancy.name))
}

fn existing_dir(parent: &Path, name: &str) -> PathBuf {
	find_child(parent, name, true).unwrap_or_else(|| parent.join(name))
}

/// A name usable as a single path segment.
fn is_file_stem(name: &str) -> bool {
	!name.contains(['/', '\\'])
		&& matches!(
			Path::new(name).components().collect::<Vec<_>>().as_slice(),
			[Component::Normal(_)]
		)
}

impl StubContext {
	pub fn new(discrepancy: &Discrepancy, project_root: &Path) -> Self {
		let source = discrepancy.locations.first().map(|location| {
			location
				.strip_prefix(project_root)
				.unwrap_or(location)
				.display()
				.to_string()
		});

		Self {
			name: discrepancy.name.clone(),
			module: discrepancy.module.clone(),
			module_title: title_case(&discrepancy.module),
			category: discrepancy.category,
			kind: discrepancy.kind,
			kind_title: title_case(discrepancy.kind.docs_dir_name()),
			source,
		}
	}
}

/// Upper-case the first letter of every alphabetic run and lower-case the
/// rest.
fn title_case(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	let mut previous_alphabetic = false;

	for c in value.chars() {
		if c.is_alphabetic() {
			if previous_alphabetic {
				out.extend(c.to_lowercase());
			} else {
				out.extend(c.to_uppercase());
			}
			previous_alphabetic = true;
		} else {
			out.push(c);
			previous_alphabetic = false;
		}
	}

	out
}
